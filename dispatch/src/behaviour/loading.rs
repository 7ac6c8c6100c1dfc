use crate::car::ElevatorCar;
use crate::direction::Direction;
use crate::error::DispatchError;
use crate::event::EventKind;
use crate::floor::Floor;
use crate::mode::Mode;
use crate::motor::Motor;
use crate::stop_queues::Tier;

use super::Behaviour;

/// Stopped with the doors open at the current floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Loading;

impl Loading {
    /// Doors opened straight from IDLE: the first request elsewhere picks
    /// the direction.
    fn first_request<M: Motor>(car: &mut ElevatorCar<M>, floor: Floor) {
        car.set_heading(Direction::towards(car.current_floor(), floor));
        car.queue(Tier::Now, floor);
    }
}

impl Behaviour for Loading {
    fn on_panel_press<M: Motor>(&self, car: &mut ElevatorCar<M>, dest: Floor) -> Result<(), DispatchError> {
        let current = car.current_floor();
        if dest == current {
            return Ok(());
        }
        match car.direction() {
            None => Loading::first_request(car, dest),
            Some(direction) => {
                let tier = if direction.is_ahead(current, dest) {
                    Tier::Now
                } else {
                    Tier::Later
                };
                car.queue(tier, dest);
            }
        }
        Ok(())
    }

    fn on_hallway_press<M: Motor>(
        &self,
        car: &mut ElevatorCar<M>,
        floor: Floor,
        requested: Direction,
    ) -> Result<(), DispatchError> {
        let current = car.current_floor();
        if floor == current {
            car.load();
            return Ok(());
        }
        let direction = match car.direction() {
            Some(direction) => direction,
            None => {
                Loading::first_request(car, floor);
                return Ok(());
            }
        };

        let queues = car.queues();
        let tier = if requested == direction && direction.is_ahead(current, floor) {
            Tier::Now
        } else if queues.extends_run(direction, current, floor) {
            Tier::Now
        } else {
            Tier::Later
        };

        car.queue(tier, floor);
        Ok(())
    }

    fn on_floor_sensor<M: Motor>(&self, _car: &mut ElevatorCar<M>, _floor: Floor) -> Result<(), DispatchError> {
        Err(DispatchError::Protocol {
            mode: Mode::Loading,
            event: EventKind::FloorSensor,
        })
    }

    fn on_loading_complete<M: Motor>(&self, car: &mut ElevatorCar<M>) -> Result<(), DispatchError> {
        let more_this_way = !car.queues().stops().is_empty();
        let more_other_way = !car.queues().stops_for_later().is_empty();
        if more_this_way {
            let direction = car.heading()?;
            car.drive(direction);
        } else if more_other_way {
            car.change_direction()?;
        } else {
            car.go_idle();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::car::ElevatorState;
    use crate::event::Event;

    /// Doors open at `floor` after travelling up from the ground floor.
    fn loading_up_at(floor: Floor) -> ElevatorCar {
        let mut car = ElevatorCar::new();
        car.handle_event(Event::OnboardPanelButtonPress { dest: floor }).unwrap();
        for next in 2..=floor {
            car.handle_event(Event::FloorSensor { floor: next }).unwrap();
        }
        assert_eq!(car.state(), ElevatorState::new(Mode::Loading, Some(Direction::Up), floor));
        car
    }

    #[test]
    fn panel_press_here_is_a_no_op() {
        let mut car = loading_up_at(3);
        car.handle_event(Event::OnboardPanelButtonPress { dest: 3 }).unwrap();
        assert!(car.queues().is_empty());
        assert_eq!(car.mode(), Mode::Loading);
    }

    #[test]
    fn panel_press_ahead_or_behind() {
        let mut car = loading_up_at(3);
        car.handle_event(Event::OnboardPanelButtonPress { dest: 5 }).unwrap();
        car.handle_event(Event::OnboardPanelButtonPress { dest: 1 }).unwrap();
        assert_eq!(car.queues().stops(), &BTreeSet::from([5]));
        assert_eq!(car.queues().stops_for_later(), &BTreeSet::from([1]));
    }

    #[test]
    fn hallway_press_here_reopens_the_doors() {
        let mut car = loading_up_at(3);
        car.handle_event(Event::OnboardPanelButtonPress { dest: 5 }).unwrap();
        let queues = car.queues().clone();
        car.handle_event(Event::HallwayButtonPress { floor: 3, direction: Direction::Down }).unwrap();
        assert_eq!(car.queues(), &queues);
        assert_eq!(car.state(), ElevatorState::new(Mode::Loading, Some(Direction::Up), 3));
    }

    #[test]
    fn opposite_call_ahead_waits_unless_it_ends_the_run() {
        let mut car = loading_up_at(2);
        car.handle_event(Event::OnboardPanelButtonPress { dest: 4 }).unwrap();
        car.handle_event(Event::HallwayButtonPress { floor: 3, direction: Direction::Down }).unwrap();
        car.handle_event(Event::HallwayButtonPress { floor: 5, direction: Direction::Down }).unwrap();
        assert_eq!(car.queues().stops(), &BTreeSet::from([4, 5]));
        assert_eq!(car.queues().stops_for_later(), &BTreeSet::from([3]));
    }

    #[test]
    fn call_behind_never_joins_the_current_run() {
        // nothing queued ahead: a floor behind must still wait for the reversal
        let mut car = loading_up_at(3);
        car.handle_event(Event::HallwayButtonPress { floor: 1, direction: Direction::Down }).unwrap();
        car.handle_event(Event::HallwayButtonPress { floor: 2, direction: Direction::Up }).unwrap();
        assert!(car.queues().stops().is_empty());
        assert_eq!(car.queues().stops_for_later(), &BTreeSet::from([1, 2]));
    }

    #[test]
    fn complete_resumes_reverses_or_idles() {
        let mut car = loading_up_at(3);
        car.handle_event(Event::OnboardPanelButtonPress { dest: 4 }).unwrap();
        car.handle_event(Event::LoadingComplete).unwrap();
        assert_eq!(car.state(), ElevatorState::new(Mode::Moving, Some(Direction::Up), 3));

        let mut car = loading_up_at(3);
        car.handle_event(Event::OnboardPanelButtonPress { dest: 1 }).unwrap();
        car.handle_event(Event::LoadingComplete).unwrap();
        assert_eq!(car.state(), ElevatorState::new(Mode::Moving, Some(Direction::Down), 3));
        assert_eq!(car.queues().stops(), &BTreeSet::from([1]));

        let mut car = loading_up_at(3);
        car.handle_event(Event::LoadingComplete).unwrap();
        assert_eq!(car.state(), ElevatorState::new(Mode::Idle, None, 3));
    }

    #[test]
    fn doors_opened_from_idle_take_the_first_direction_asked() {
        let mut car = ElevatorCar::new();
        car.handle_event(Event::OnboardPanelButtonPress { dest: 1 }).unwrap();
        assert_eq!(car.state(), ElevatorState::new(Mode::Loading, None, 1));

        car.handle_event(Event::HallwayButtonPress { floor: 4, direction: Direction::Down }).unwrap();
        assert_eq!(car.state(), ElevatorState::new(Mode::Loading, Some(Direction::Up), 1));
        assert_eq!(car.queues().stops(), &BTreeSet::from([4]));

        car.handle_event(Event::LoadingComplete).unwrap();
        assert_eq!(car.state(), ElevatorState::new(Mode::Moving, Some(Direction::Up), 1));
    }

    #[test]
    fn doors_opened_from_idle_close_back_to_idle() {
        let mut car = ElevatorCar::new();
        car.handle_event(Event::OnboardPanelButtonPress { dest: 1 }).unwrap();
        car.handle_event(Event::LoadingComplete).unwrap();
        assert_eq!(car.state(), ElevatorState::new(Mode::Idle, None, 1));
    }

    #[test]
    fn floor_sensor_while_loading_is_a_protocol_error() {
        let mut car = loading_up_at(2);
        assert_eq!(
            car.handle_event(Event::FloorSensor { floor: 3 }),
            Err(DispatchError::Protocol { mode: Mode::Loading, event: EventKind::FloorSensor })
        );
    }
}
