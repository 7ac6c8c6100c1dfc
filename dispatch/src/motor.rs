//! ----- MOTOR -----
//! Command sink for the car's motor. Dispatch never reads anything back.

use crate::direction::Direction;

pub trait Motor {
    /// Start, or keep, travelling in `direction`.
    fn drive(&mut self, direction: Direction);
    fn stop(&mut self);
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    On,
    Off,
}

/// Motor that only remembers the last command. Cheap to clone, which keeps
/// a car using it a plain value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotorController {
    state: MotorState,
    direction: Option<Direction>,
}

impl MotorController {
    pub fn new() -> Self {
        MotorController {
            state: MotorState::Off,
            direction: None,
        }
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    /// Direction of the last `drive`, cleared by `stop`.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }
}

impl Default for MotorController {
    fn default() -> Self {
        MotorController::new()
    }
}

impl Motor for MotorController {
    fn drive(&mut self, direction: Direction) {
        self.state = MotorState::On;
        self.direction = Some(direction);
    }

    fn stop(&mut self) {
        self.state = MotorState::Off;
        self.direction = None;
    }
}
