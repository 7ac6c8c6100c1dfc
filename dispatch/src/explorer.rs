//! ----- STATE-SPACE EXPLORER -----
//! Breadth-first walk over every (mode, direction, floor) a car can reach,
//! applying every event that can legally occur and checking the invariants
//! after each transition. Visited states are keyed on `ElevatorState`, so
//! queue contents do not multiply the frontier.

use std::collections::{BTreeSet, VecDeque};

use log::{debug, info};

use crate::car::{ElevatorCar, ElevatorState};
use crate::direction::Direction;
use crate::error::ExploreError;
use crate::event::Event;
use crate::floor::{Floor, Shaft};
use crate::invariants::check_invariants;
use crate::mode::Mode;
use crate::motor::Motor;

/// Events that can physically occur for `car`: any button at any time, the
/// next floor sensor while moving, loading complete while loading.
pub fn enumerable_events<M: Motor>(car: &ElevatorCar<M>) -> Vec<Event> {
    let shaft = car.shaft();
    let mut events: Vec<Event> = shaft
        .floors()
        .map(|dest| Event::OnboardPanelButtonPress { dest })
        .collect();
    for direction in Direction::iter() {
        for floor in shaft.floors() {
            events.push(Event::HallwayButtonPress { floor, direction });
        }
    }
    events.extend(hardware_events(car));
    events
}

/// The non-button part of `enumerable_events`.
fn hardware_events<M: Motor>(car: &ElevatorCar<M>) -> Option<Event> {
    match car.mode() {
        Mode::Idle => None,
        Mode::Moving => car
            .direction()
            .and_then(|direction| car.shaft().next_floor(car.current_floor(), direction))
            .map(|floor| Event::FloorSensor { floor }),
        Mode::Loading => Some(Event::LoadingComplete),
    }
}

/// Every state the invariants allow in `shaft`.
pub fn consistent_states(shaft: Shaft) -> BTreeSet<ElevatorState> {
    let mut states = BTreeSet::new();
    for floor in shaft.floors() {
        states.insert(ElevatorState::new(Mode::Idle, None, floor));
        states.insert(ElevatorState::new(Mode::Loading, None, floor));
        for direction in Direction::iter() {
            states.insert(ElevatorState::new(Mode::Loading, Some(direction), floor));
            if shaft.next_floor(floor, direction).is_some() {
                states.insert(ElevatorState::new(Mode::Moving, Some(direction), floor));
            }
        }
    }
    states
}

#[derive(Debug, Clone)]
pub struct Exploration {
    shaft: Shaft,
    visited: BTreeSet<ElevatorState>,
    edges: BTreeSet<(ElevatorState, ElevatorState)>,
    transitions: usize,
}

impl Exploration {
    pub fn visited(&self) -> &BTreeSet<ElevatorState> {
        &self.visited
    }

    pub fn edges(&self) -> &BTreeSet<(ElevatorState, ElevatorState)> {
        &self.edges
    }

    /// Number of (state, event) pairs applied.
    pub fn transitions(&self) -> usize {
        self.transitions
    }

    pub fn shaft(&self) -> Shaft {
        self.shaft
    }

    /// No explored edge leaves the visited set.
    pub fn is_closed(&self) -> bool {
        self.edges
            .iter()
            .all(|(from, to)| self.visited.contains(from) && self.visited.contains(to))
    }

    /// Invariant-consistent states the walk never reached.
    pub fn unreached(&self) -> BTreeSet<ElevatorState> {
        consistent_states(self.shaft)
            .difference(&self.visited)
            .copied()
            .collect()
    }
}

/// Explore from `initial`. Fails on the first rejected legal event, broken
/// invariant, or state whose queued floors would never be served.
pub fn explore<M: Motor + Clone>(initial: &ElevatorCar<M>) -> Result<Exploration, ExploreError> {
    check_invariants(initial)?;
    drain(initial)?;

    let mut visited = BTreeSet::from([initial.state()]);
    let mut edges = BTreeSet::new();
    let mut transitions = 0;
    let mut frontier = VecDeque::from([initial.clone()]);

    while let Some(car) = frontier.pop_front() {
        let from = car.state();
        for event in enumerable_events(&car) {
            let mut next = car.clone();
            next.transition(event)
                .map_err(|source| ExploreError::Rejected { state: from, event, source })?;
            check_invariants(&next)?;
            transitions += 1;

            let to = next.state();
            edges.insert((from, to));
            if visited.insert(to) {
                debug!("reached {} from {} by {:?}", to, from, event);
                drain(&next)?;
                frontier.push_back(next);
            }
        }
    }

    info!(
        "explored {} states over {} transitions",
        visited.len(),
        transitions
    );
    Ok(Exploration {
        shaft: initial.shaft(),
        visited,
        edges,
        transitions,
    })
}

/// Run `car` on sensor and loading-complete events only, the way the
/// hardware would once nobody presses anything, until it idles. Returns the
/// floors where the doors opened, in order.
pub fn drain<M: Motor + Clone>(car: &ElevatorCar<M>) -> Result<Vec<Floor>, ExploreError> {
    let start = car.state();
    // two events per floor, four sweeps of the shaft
    let limit = 8 * car.shaft().num_floors() as usize;

    let mut car = car.clone();
    let mut served = Vec::new();
    for _ in 0..limit {
        let event = match hardware_events(&car) {
            Some(event) => event,
            None => break,
        };
        let state = car.state();
        car.transition(event)
            .map_err(|source| ExploreError::Rejected { state, event, source })?;
        check_invariants(&car)?;
        if let (Mode::Loading, Event::FloorSensor { floor }) = (car.mode(), event) {
            served.push(floor);
        }
    }

    let pending = car.queues().pending();
    if car.mode() != Mode::Idle || !pending.is_empty() {
        return Err(ExploreError::Undrained {
            state: start,
            pending: pending.into_iter().collect(),
        });
    }
    Ok(served)
}
