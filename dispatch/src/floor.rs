use std::ops::RangeInclusive;

use crate::direction::Direction;
use crate::error::DispatchError;

pub type Floor = u8;

pub const BOTTOM_FLOOR: Floor = 1;
pub const TOP_FLOOR: Floor = 5;

/// The closed range of floors a car can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shaft {
    bottom: Floor,
    top: Floor,
}

impl Shaft {
    pub fn new(bottom: Floor, top: Floor) -> Result<Self, DispatchError> {
        if bottom >= top {
            return Err(DispatchError::InvalidShaft { bottom, top });
        }
        Ok(Shaft { bottom, top })
    }

    pub fn bottom(&self) -> Floor {
        self.bottom
    }

    pub fn top(&self) -> Floor {
        self.top
    }

    pub fn num_floors(&self) -> u8 {
        self.top - self.bottom + 1
    }

    pub fn contains(&self, floor: Floor) -> bool {
        (self.bottom..=self.top).contains(&floor)
    }

    pub fn floors(&self) -> RangeInclusive<Floor> {
        self.bottom..=self.top
    }

    /// The floor the car reaches next when leaving `floor` in `direction`,
    /// `None` at the end of the shaft.
    pub fn next_floor(&self, floor: Floor, direction: Direction) -> Option<Floor> {
        let next = match direction {
            Direction::Up => floor.checked_add(1)?,
            Direction::Down => floor.checked_sub(1)?,
        };
        if self.contains(next) && self.contains(floor) {
            Some(next)
        } else {
            None
        }
    }

    pub fn check(&self, floor: Floor) -> Result<Floor, DispatchError> {
        if self.contains(floor) {
            Ok(floor)
        } else {
            Err(DispatchError::FloorOutOfRange {
                floor,
                bottom: self.bottom,
                top: self.top,
            })
        }
    }
}

impl Default for Shaft {
    fn default() -> Self {
        Shaft {
            bottom: BOTTOM_FLOOR,
            top: TOP_FLOOR,
        }
    }
}
