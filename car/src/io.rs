/// ----- I/O MODULE -----
/// This module is responsible for polling the sensors on the elevator and
/// turning them into car events on one channel, as well as owning the
/// channels that drive the motor, door light and floor indicator.
/// Driver floors are zero based; car floors start at the shaft's bottom.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use driver_rust::elevio::{elev, poll};
use log::{debug, info, warn};

use dispatch::{Direction, Event, Floor, Shaft};

use crate::config::ServerConfig;
use crate::motor::MotorCommand;

const POLL_PERIOD: Duration = Duration::from_millis(25);

pub struct Outputs {
    pub motor_tx: Sender<MotorCommand>,
    pub door_light_tx: Sender<bool>,
    pub floor_indicator_tx: Sender<Floor>,
}

/// Car event for a pressed button, `None` for a call type the driver should never report.
pub fn button_event(floor: u8, call: u8, shaft: Shaft) -> Option<Event> {
    let floor = floor + shaft.bottom();
    match call {
        elev::CAB => Some(Event::OnboardPanelButtonPress { dest: floor }),
        elev::HALL_UP => Some(Event::HallwayButtonPress { floor, direction: Direction::Up }),
        elev::HALL_DOWN => Some(Event::HallwayButtonPress { floor, direction: Direction::Down }),
        _ => None,
    }
}

pub fn motor_constant(command: MotorCommand) -> u8 {
    match command {
        MotorCommand::Drive(Direction::Up) => elev::DIRN_UP,
        MotorCommand::Drive(Direction::Down) => elev::DIRN_DOWN,
        MotorCommand::Stop => elev::DIRN_STOP,
    }
}

/// Forwards floor sensor readings as events, skipping repeats of the last floor.
fn forward_floors(floor_sensor_rx: Receiver<u8>, events_tx: Sender<Event>, shaft: Shaft, home: u8) {
    let mut last = home;
    for floor in floor_sensor_rx.iter() {
        if floor == last {
            continue;
        }
        last = floor;
        if events_tx.send(Event::FloorSensor { floor: floor + shaft.bottom() }).is_err() {
            return;
        }
    }
}

/// Drives the car down to the bottom floor so it matches a freshly built car.
fn home(elevator: &elev::Elevator) {
    if elevator.floor_sensor() == Some(0) {
        return;
    }
    info!("driving to the bottom floor...");
    elevator.motor_direction(elev::DIRN_DOWN);
    while elevator.floor_sensor() != Some(0) {
        thread::sleep(POLL_PERIOD);
    }
    elevator.motor_direction(elev::DIRN_STOP);
}

pub fn init(
    server_config: &ServerConfig,
    shaft: Shaft,
    events_tx: Sender<Event>,
) -> std::io::Result<(Receiver<bool>, Outputs)> {
    let serveraddr = "localhost:".to_owned() + &server_config.port.to_string();
    let elevator = elev::Elevator::init(serveraddr.as_str(), shaft.num_floors())?;
    home(&elevator);
    elevator.door_light(false);
    elevator.floor_indicator(0);

    {
        let (call_button_tx, call_button_rx) = unbounded();
        let elevator = elevator.clone();
        thread::Builder::new().name("poll_call_buttons".to_string()).spawn(move || poll::call_buttons(elevator, call_button_tx, POLL_PERIOD))?;
        let events_tx = events_tx.clone();
        thread::Builder::new().name("call_buttons".to_string()).spawn(move || {
            for button in call_button_rx.iter() {
                match button_event(button.floor, button.call, shaft) {
                    Some(event) => {
                        if events_tx.send(event).is_err() {
                            return;
                        }
                    }
                    None => warn!("unknown call type {} at floor {}, skipping...", button.call, button.floor),
                }
            }
        })?;
    }

    {
        let (floor_sensor_tx, floor_sensor_rx) = unbounded();
        let elevator = elevator.clone();
        thread::Builder::new().name("poll_floor_sensor".to_string()).spawn(move || poll::floor_sensor(elevator, floor_sensor_tx, POLL_PERIOD))?;
        thread::Builder::new().name("floor_sensor".to_string()).spawn(move || forward_floors(floor_sensor_rx, events_tx, shaft, 0))?;
    }

    let (stop_button_tx, stop_button_rx) = unbounded();
    {
        let elevator = elevator.clone();
        thread::Builder::new().name("stop_button".to_string()).spawn(move || poll::stop_button(elevator, stop_button_tx, POLL_PERIOD))?;
    }

    let (motor_tx, motor_rx) = unbounded::<MotorCommand>();
    {
        let elevator = elevator.clone();
        thread::Builder::new().name("motor_direction".to_string()).spawn(move || {
            for command in motor_rx.iter() {
                debug!("motor {:?}", command);
                elevator.motor_direction(motor_constant(command));
            }
        })?;
    }

    let (door_light_tx, door_light_rx) = unbounded();
    {
        let elevator = elevator.clone();
        thread::Builder::new().name("door_light".to_string()).spawn(move || {
            for on in door_light_rx.iter() {
                elevator.door_light(on);
            }
        })?;
    }

    let (floor_indicator_tx, floor_indicator_rx) = unbounded::<Floor>();
    {
        thread::Builder::new().name("floor_indicator".to_string()).spawn(move || {
            for floor in floor_indicator_rx.iter() {
                elevator.floor_indicator(floor - shaft.bottom());
            }
        })?;
    }

    Ok((
        stop_button_rx,
        Outputs {
            motor_tx,
            door_light_tx,
            floor_indicator_tx,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_to_car_floors() {
        let shaft = Shaft::default();
        assert_eq!(button_event(0, elev::CAB, shaft), Some(Event::OnboardPanelButtonPress { dest: 1 }));
        assert_eq!(
            button_event(3, elev::HALL_DOWN, shaft),
            Some(Event::HallwayButtonPress { floor: 4, direction: Direction::Down })
        );
        assert_eq!(
            button_event(4, elev::HALL_UP, shaft),
            Some(Event::HallwayButtonPress { floor: 5, direction: Direction::Up })
        );
        assert_eq!(button_event(1, 7, shaft), None);
    }

    #[test]
    fn repeated_floor_readings_are_dropped() {
        let (floor_sensor_tx, floor_sensor_rx) = unbounded();
        let (events_tx, events_rx) = unbounded();
        for floor in [0, 1, 1, 2, 1] {
            floor_sensor_tx.send(floor).unwrap();
        }
        drop(floor_sensor_tx);
        forward_floors(floor_sensor_rx, events_tx, Shaft::default(), 0);

        let floors: Vec<Event> = events_rx.try_iter().collect();
        assert_eq!(
            floors,
            vec![
                Event::FloorSensor { floor: 2 },
                Event::FloorSensor { floor: 3 },
                Event::FloorSensor { floor: 2 },
            ]
        );
    }

    #[test]
    fn motor_commands_use_driver_constants() {
        assert_eq!(motor_constant(MotorCommand::Drive(Direction::Up)), elev::DIRN_UP);
        assert_eq!(motor_constant(MotorCommand::Drive(Direction::Down)), elev::DIRN_DOWN);
        assert_eq!(motor_constant(MotorCommand::Stop), elev::DIRN_STOP);
    }
}
