//! Invariant checker for the car. Pure predicate; never used for recovery.

use std::fmt;

use thiserror::Error;

use crate::car::ElevatorCar;
use crate::direction::Direction;
use crate::mode::Mode;
use crate::motor::Motor;
use crate::stop_queues::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Invariant {
    FloorInShaft,
    IdleHasNoDirection,
    IdleHasNoStops,
    MovingHasStops,
    MovingTowardsStops,
    MovingPastShaftEnd,
    TiersDisjoint,
}

impl Invariant {
    pub fn description(self) -> &'static str {
        match self {
            Invariant::FloorInShaft => "current floor outside the shaft",
            Invariant::IdleHasNoDirection => "IDLE but with a direction",
            Invariant::IdleHasNoStops => "IDLE with stops to fulfil",
            Invariant::MovingHasStops => "MOVING with no stops",
            Invariant::MovingTowardsStops => "MOVING away from every stop for now",
            Invariant::MovingPastShaftEnd => "MOVING out of the end of the shaft",
            Invariant::TiersDisjoint => "the same floor is queued in more than one tier",
        }
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A dispatch rule left the car inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant violated: {clause} in {car}")]
pub struct InvariantViolation {
    pub clause: Invariant,
    pub car: String,
}

fn violation<M>(clause: Invariant, car: &ElevatorCar<M>) -> InvariantViolation {
    InvariantViolation {
        clause,
        car: car.to_string(),
    }
}

/// Check all invariants. Returns the first clause that does not hold.
pub fn check_invariants<M: Motor>(car: &ElevatorCar<M>) -> Result<(), InvariantViolation> {
    let shaft = car.shaft();
    let floor = car.current_floor();
    let queues = car.queues();

    if !shaft.contains(floor) {
        return Err(violation(Invariant::FloorInShaft, car));
    }

    if car.mode() == Mode::Idle {
        if car.direction().is_some() {
            return Err(violation(Invariant::IdleHasNoDirection, car));
        }
        if !queues.is_empty() {
            return Err(violation(Invariant::IdleHasNoStops, car));
        }
    }

    if car.mode() == Mode::Moving {
        if queues.stops().is_empty() {
            return Err(violation(Invariant::MovingHasStops, car));
        }
        let towards_stops = match car.direction() {
            Some(direction) => queues
                .extreme(Tier::Now, direction)
                .map_or(false, |last| direction.is_ahead(floor, last)),
            None => false,
        };
        if !towards_stops {
            return Err(violation(Invariant::MovingTowardsStops, car));
        }
        let past_end = match car.direction() {
            Some(Direction::Up) => floor == shaft.top(),
            Some(Direction::Down) => floor == shaft.bottom(),
            None => false,
        };
        if past_end {
            return Err(violation(Invariant::MovingPastShaftEnd, car));
        }
    }

    let stops = queues.stops();
    let later = queues.stops_for_later();
    let after_later = queues.stops_for_after_later();
    if !stops.is_disjoint(later) || !stops.is_disjoint(after_later) || !later.is_disjoint(after_later) {
        return Err(violation(Invariant::TiersDisjoint, car));
    }

    Ok(())
}
