//! Random walks over legal event sequences.
//!
//! Each walk is a list of choices; every choice picks one of the events that
//! can physically occur in the car's current state.

use std::collections::BTreeSet;

use proptest::prelude::*;

use dispatch::explorer::{consistent_states, drain, enumerable_events};
use dispatch::{check_invariants, Direction, ElevatorCar, Event, Floor, Mode, MotorController, Shaft};

fn walk(car: &mut ElevatorCar, choices: &[usize]) -> Vec<Event> {
    choices
        .iter()
        .map(|choice| {
            let events = enumerable_events(car);
            let event = events[choice % events.len()];
            car.handle_event(event).unwrap();
            event
        })
        .collect()
}

fn pressed_floor(event: &Event) -> Option<Floor> {
    match event {
        Event::OnboardPanelButtonPress { dest } => Some(*dest),
        Event::HallwayButtonPress { floor, .. } => Some(*floor),
        _ => None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        .. ProptestConfig::default()
    })]

    #[test]
    fn legal_events_are_never_rejected(choices in proptest::collection::vec(any::<usize>(), 0..200)) {
        let mut car = ElevatorCar::new();
        let consistent = consistent_states(car.shaft());
        for choice in choices {
            let events = enumerable_events(&car);
            let event = events[choice % events.len()];
            prop_assert!(car.handle_event(event).is_ok(), "{:?} rejected by {}", event, car);
            prop_assert!(check_invariants(&car).is_ok());
            prop_assert!(consistent.contains(&car.state()), "{} is not consistent", car.state());
        }
    }

    #[test]
    fn accepted_requests_are_never_lost(choices in proptest::collection::vec(any::<usize>(), 0..200)) {
        let mut car = ElevatorCar::new();
        let mut requested = BTreeSet::new();
        for choice in choices {
            let event = walk(&mut car, &[choice])[0];
            if let Some(floor) = pressed_floor(&event) {
                requested.insert(floor);
            }
            if car.mode() == Mode::Loading {
                requested.remove(&car.current_floor());
            }
            let pending = car.queues().pending();
            prop_assert!(requested.is_subset(&pending), "lost {:?} in {}", requested, car);
        }
    }

    #[test]
    fn tiers_stay_disjoint(choices in proptest::collection::vec(any::<usize>(), 0..200)) {
        let mut car = ElevatorCar::new();
        walk(&mut car, &choices);
        let queues = car.queues();
        let total = queues.stops().len() + queues.stops_for_later().len() + queues.stops_for_after_later().len();
        prop_assert_eq!(total, queues.pending().len());
    }

    #[test]
    fn press_at_the_loading_floor_keeps_the_queues(choices in proptest::collection::vec(any::<usize>(), 0..100)) {
        let mut car = ElevatorCar::new();
        for choice in choices {
            walk(&mut car, &[choice]);
            if car.mode() != Mode::Loading {
                continue;
            }
            let current = car.current_floor();
            let presses = [
                Event::OnboardPanelButtonPress { dest: current },
                Event::HallwayButtonPress { floor: current, direction: Direction::Up },
                Event::HallwayButtonPress { floor: current, direction: Direction::Down },
            ];
            for press in presses {
                let mut pressed = car.clone();
                pressed.handle_event(press).unwrap();
                prop_assert_eq!(pressed.state(), car.state());
                prop_assert_eq!(pressed.queues(), car.queues());
            }
        }
    }

    #[test]
    fn every_walk_drains_to_idle(choices in proptest::collection::vec(any::<usize>(), 0..200)) {
        let mut car = ElevatorCar::new();
        walk(&mut car, &choices);
        let pending = car.queues().pending();
        let served: BTreeSet<Floor> = drain(&car).unwrap().into_iter().collect();
        prop_assert!(pending.is_subset(&served));
    }

    #[test]
    fn travel_stays_inside_any_shaft(
        bottom in 0u8..4,
        height in 1u8..8,
        choices in proptest::collection::vec(any::<usize>(), 0..200),
    ) {
        let shaft = Shaft::new(bottom, bottom + height).unwrap();
        let mut car = ElevatorCar::with_shaft(shaft, MotorController::new());
        for choice in choices {
            let events = enumerable_events(&car);
            let event = events[choice % events.len()];
            car.handle_event(event).unwrap();
            prop_assert!(shaft.contains(car.current_floor()));
        }
        prop_assert!(drain(&car).is_ok());
    }
}
