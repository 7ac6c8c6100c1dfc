//! ----- ELEVATOR CAR -----
//! Mutable state of one car and the single entry point for events. The
//! mode picks the behaviour that interprets each event.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, info, warn};

use crate::behaviour;
use crate::direction::Direction;
use crate::error::DispatchError;
use crate::event::{Event, RawEvent};
use crate::floor::{Floor, Shaft};
use crate::invariants;
use crate::mode::Mode;
use crate::motor::{Motor, MotorController};
use crate::stop_queues::{StopQueues, Tier};

/// What an observer may see of a car. Queue contents are deliberately left out.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElevatorState {
    pub mode: Mode,
    pub direction: Option<Direction>,
    pub current_floor: Floor,
}

impl ElevatorState {
    pub fn new(mode: Mode, direction: Option<Direction>, current_floor: Floor) -> Self {
        ElevatorState {
            mode,
            direction,
            current_floor,
        }
    }
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Some(direction) => write!(f, "({}, {}, {})", self.mode, direction, self.current_floor),
            None => write!(f, "({}, None, {})", self.mode, self.current_floor),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ElevatorCar<M = MotorController> {
    shaft: Shaft,
    mode: Mode,
    direction: Option<Direction>,
    current_floor: Floor,
    queues: StopQueues,
    motor: M,
}

impl ElevatorCar<MotorController> {
    pub fn new() -> Self {
        ElevatorCar::with_shaft(Shaft::default(), MotorController::new())
    }
}

impl Default for ElevatorCar<MotorController> {
    fn default() -> Self {
        ElevatorCar::new()
    }
}

impl<M: Motor> ElevatorCar<M> {
    /// Idle car at the bottom of `shaft` with nothing queued.
    pub fn with_shaft(shaft: Shaft, motor: M) -> Self {
        ElevatorCar {
            shaft,
            mode: Mode::Idle,
            direction: None,
            current_floor: shaft.bottom(),
            queues: StopQueues::new(),
            motor,
        }
    }

    pub fn state(&self) -> ElevatorState {
        ElevatorState::new(self.mode, self.direction, self.current_floor)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    pub fn shaft(&self) -> Shaft {
        self.shaft
    }

    pub fn queues(&self) -> &StopQueues {
        &self.queues
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// Apply one event. On error the car is left untouched.
    ///
    /// Debug builds re-check every invariant afterwards and panic on a
    /// violation: that is a defect in the dispatch rules, not an input error.
    pub fn handle_event(&mut self, event: Event) -> Result<(), DispatchError> {
        self.transition(event)?;

        if cfg!(debug_assertions) {
            if let Err(violation) = invariants::check_invariants(self) {
                panic!("{}", violation);
            }
        }

        Ok(())
    }

    pub fn handle_raw_event(&mut self, raw: RawEvent) -> Result<(), DispatchError> {
        let event = Event::try_from(raw).map_err(|e| {
            warn!("dropping undecodable event: {}", e);
            e
        })?;
        self.handle_event(event)
    }

    /// Dispatch without the invariant check, for callers that check themselves.
    pub(crate) fn transition(&mut self, event: Event) -> Result<(), DispatchError> {
        if let Some(floor) = event.floor() {
            self.shaft.check(floor).map_err(|e| {
                warn!("{:?} rejected in {}: {}", event, self.state(), e);
                e
            })?;
        }

        let before = self.state();
        if let Err(e) = behaviour::dispatch(self, event) {
            warn!("{:?} rejected in {}: {}", event, before, e);
            return Err(e);
        }

        let after = self.state();
        if before.mode != after.mode {
            info!("{:?}: {} -> {}", event, before, after);
        } else {
            debug!("{:?}: {} -> {}", event, before, after);
        }
        Ok(())
    }

    /// Direction of travel; only IDLE, and LOADING entered from IDLE, lack one.
    pub(crate) fn heading(&self) -> Result<Direction, DispatchError> {
        self.direction
            .ok_or(DispatchError::MissingDirection { mode: self.mode })
    }

    pub(crate) fn set_heading(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    pub(crate) fn queue(&mut self, tier: Tier, floor: Floor) {
        let queued = self.queues.add_to(tier, floor);
        debug!("floor {} queued in {:?} (asked {:?})", floor, queued, tier);
    }

    pub(crate) fn arrive(&mut self, floor: Floor) {
        self.current_floor = floor;
        if self.queues.stops().contains(&floor) {
            self.load();
        }
    }

    pub(crate) fn drive(&mut self, direction: Direction) {
        self.mode = Mode::Moving;
        self.direction = Some(direction);
        self.motor.drive(direction);
    }

    /// Stop and open the doors here. Calling it again while loading is harmless.
    pub(crate) fn load(&mut self) {
        self.motor.stop();
        self.mode = Mode::Loading;
        self.queues.remove(self.current_floor);
    }

    /// Reverse and promote every tier.
    pub(crate) fn change_direction(&mut self) -> Result<(), DispatchError> {
        let direction = self.heading()?.opposite();
        self.queues.rotate();
        self.drive(direction);
        Ok(())
    }

    pub(crate) fn go_idle(&mut self) {
        self.mode = Mode::Idle;
        self.direction = None;
    }
}

fn floors(set: &BTreeSet<Floor>) -> String {
    let floors: Vec<String> = set.iter().map(|floor| floor.to_string()).collect();
    format!("{{{}}}", floors.join(", "))
}

impl<M> fmt::Display for ElevatorCar<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Some(direction) => direction.to_string(),
            None => String::from("None"),
        };
        write!(
            f,
            "Elevator(mode={}, floor={}, direction={}, stops={}, stops_for_later={}, stops_for_after_later={})",
            self.mode,
            self.current_floor,
            direction,
            floors(self.queues.stops()),
            floors(self.queues.stops_for_later()),
            floors(self.queues.stops_for_after_later()),
        )
    }
}
