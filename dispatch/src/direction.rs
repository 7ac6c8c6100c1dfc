use std::fmt;

use crate::floor::Floor;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_string(self) -> String {
        match self {
            Direction::Up => String::from("up"),
            Direction::Down => String::from("down"),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Direction of travel from `from` to `to`. Callers handle `from == to` first.
    pub fn towards(from: Floor, to: Floor) -> Self {
        if to > from {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// `floor` lies strictly ahead of `current` when travelling this way.
    pub fn is_ahead(self, current: Floor, floor: Floor) -> bool {
        match self {
            Direction::Up => floor > current,
            Direction::Down => floor < current,
        }
    }

    /// `floor` lies at or beyond `bound` when travelling this way.
    pub fn reaches(self, floor: Floor, bound: Floor) -> bool {
        match self {
            Direction::Up => floor >= bound,
            Direction::Down => floor <= bound,
        }
    }

    pub fn iter() -> impl Iterator<Item = Direction> {
        [Direction::Up, Direction::Down].iter().copied()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}
