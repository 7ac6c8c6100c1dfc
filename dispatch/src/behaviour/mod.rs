//! ----- BEHAVIOURS -----
//! One stateless behaviour per mode. Each reads the same four events its
//! own way and mutates the car in place; the car's mode selects which one
//! runs.

mod idle;
mod loading;
mod moving;

pub use idle::Idle;
pub use loading::Loading;
pub use moving::Moving;

use crate::car::ElevatorCar;
use crate::direction::Direction;
use crate::error::DispatchError;
use crate::event::Event;
use crate::floor::Floor;
use crate::mode::Mode;
use crate::motor::Motor;

pub trait Behaviour {
    fn on_panel_press<M: Motor>(&self, car: &mut ElevatorCar<M>, dest: Floor) -> Result<(), DispatchError>;

    fn on_hallway_press<M: Motor>(
        &self,
        car: &mut ElevatorCar<M>,
        floor: Floor,
        direction: Direction,
    ) -> Result<(), DispatchError>;

    fn on_floor_sensor<M: Motor>(&self, car: &mut ElevatorCar<M>, floor: Floor) -> Result<(), DispatchError>;

    fn on_loading_complete<M: Motor>(&self, car: &mut ElevatorCar<M>) -> Result<(), DispatchError>;

    fn handle<M: Motor>(&self, car: &mut ElevatorCar<M>, event: Event) -> Result<(), DispatchError> {
        match event {
            Event::OnboardPanelButtonPress { dest } => self.on_panel_press(car, dest),
            Event::HallwayButtonPress { floor, direction } => self.on_hallway_press(car, floor, direction),
            Event::FloorSensor { floor } => self.on_floor_sensor(car, floor),
            Event::LoadingComplete => self.on_loading_complete(car),
        }
    }
}

pub fn dispatch<M: Motor>(car: &mut ElevatorCar<M>, event: Event) -> Result<(), DispatchError> {
    match car.mode() {
        Mode::Idle => Idle.handle(car, event),
        Mode::Moving => Moving.handle(car, event),
        Mode::Loading => Loading.handle(car, event),
    }
}
