use crate::car::ElevatorCar;
use crate::direction::Direction;
use crate::error::DispatchError;
use crate::event::EventKind;
use crate::floor::Floor;
use crate::mode::Mode;
use crate::motor::Motor;
use crate::stop_queues::Tier;

use super::Behaviour;

/// Travelling, committed to a direction until `stops` runs out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Moving;

impl Behaviour for Moving {
    fn on_panel_press<M: Motor>(&self, car: &mut ElevatorCar<M>, dest: Floor) -> Result<(), DispatchError> {
        let direction = car.heading()?;
        let tier = if direction.is_ahead(car.current_floor(), dest) {
            Tier::Now
        } else {
            Tier::Later
        };
        car.queue(tier, dest);
        Ok(())
    }

    fn on_hallway_press<M: Motor>(
        &self,
        car: &mut ElevatorCar<M>,
        floor: Floor,
        requested: Direction,
    ) -> Result<(), DispatchError> {
        let direction = car.heading()?;
        let current = car.current_floor();
        let queues = car.queues();

        let tier = if floor == current {
            // the car is already leaving this floor
            if requested != direction {
                Tier::Later
            } else if queues.ends_later_run(direction, floor) {
                Tier::Later
            } else {
                Tier::AfterLater
            }
        } else if requested != direction {
            if queues.extends_run(direction, current, floor) {
                Tier::Now
            } else {
                Tier::Later
            }
        } else if direction.is_ahead(current, floor) || queues.extends_run(direction, current, floor) {
            Tier::Now
        } else {
            Tier::Later
        };

        car.queue(tier, floor);
        Ok(())
    }

    fn on_floor_sensor<M: Motor>(&self, car: &mut ElevatorCar<M>, floor: Floor) -> Result<(), DispatchError> {
        let direction = car.heading()?;
        let current = car.current_floor();
        if car.shaft().next_floor(current, direction) != Some(floor) {
            return Err(DispatchError::Sequence {
                current,
                direction,
                reported: floor,
            });
        }
        car.arrive(floor);
        Ok(())
    }

    fn on_loading_complete<M: Motor>(&self, _car: &mut ElevatorCar<M>) -> Result<(), DispatchError> {
        Err(DispatchError::Protocol {
            mode: Mode::Moving,
            event: EventKind::LoadingComplete,
        })
    }
}
