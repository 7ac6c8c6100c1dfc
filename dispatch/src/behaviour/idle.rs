use crate::car::ElevatorCar;
use crate::direction::Direction;
use crate::error::DispatchError;
use crate::event::EventKind;
use crate::floor::Floor;
use crate::mode::Mode;
use crate::motor::Motor;
use crate::stop_queues::Tier;

use super::Behaviour;

/// Stationary with nothing queued.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl Behaviour for Idle {
    fn on_panel_press<M: Motor>(&self, car: &mut ElevatorCar<M>, dest: Floor) -> Result<(), DispatchError> {
        let current = car.current_floor();
        if dest == current {
            // doors open here, no direction chosen yet
            car.load();
        } else {
            car.queue(Tier::Now, dest);
            car.drive(Direction::towards(current, dest));
        }
        Ok(())
    }

    fn on_hallway_press<M: Motor>(
        &self,
        car: &mut ElevatorCar<M>,
        floor: Floor,
        _direction: Direction,
    ) -> Result<(), DispatchError> {
        self.on_panel_press(car, floor)
    }

    fn on_floor_sensor<M: Motor>(&self, _car: &mut ElevatorCar<M>, _floor: Floor) -> Result<(), DispatchError> {
        Err(DispatchError::Protocol {
            mode: Mode::Idle,
            event: EventKind::FloorSensor,
        })
    }

    fn on_loading_complete<M: Motor>(&self, _car: &mut ElevatorCar<M>) -> Result<(), DispatchError> {
        Err(DispatchError::Protocol {
            mode: Mode::Idle,
            event: EventKind::LoadingComplete,
        })
    }
}
