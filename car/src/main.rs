use std::process;
use std::thread;

use crossbeam_channel::{select, unbounded};
use log::{error, info};

use car::config::Config;
use car::debug::Debug;
use car::error::CarError;
use car::motor::{ChannelMotor, MotorCommand};
use car::{doors, io};
use dispatch::{ElevatorCar, Event, Mode};

fn run() -> Result<(), CarError> {
    // READ CONFIGURATION
    let config = Config::get()?;
    info!("serving floors {}..={}", config.shaft.bottom(), config.shaft.top());

    // INITIALIZE CHANNELS
    let (events_tx, events_rx) = unbounded::<Event>();
    let (doors_activate_tx, doors_activate_rx) = unbounded();

    // INITIALIZE INPUTS MODULE
    let (stop_button_rx, outputs) = io::init(&config.server, config.shaft, events_tx.clone())?;

    // INITIALIZE THREAD FOR DOOR EVENTS
    {
        let open_duration = config.doors.open_duration;
        let door_light_tx = outputs.door_light_tx.clone();
        thread::Builder::new().name("doors".to_string()).spawn(move || doors::main(
            open_duration,
            doors_activate_rx,
            events_tx,
            door_light_tx,
        ))?;
    }

    let mut car = ElevatorCar::with_shaft(config.shaft, ChannelMotor::new(outputs.motor_tx.clone()));
    let mut debug = Debug::new();
    debug.printstatus(&car)?;

    loop {
        select! {
            recv(events_rx) -> msg => {
                let event = msg.map_err(|_| CarError::Disconnected)?;
                let before = car.mode();
                if let Err(e) = car.handle_event(event) {
                    let _ = outputs.motor_tx.send(MotorCommand::Stop);
                    return Err(e.into());
                }

                if let Event::FloorSensor { floor } = event {
                    let _ = outputs.floor_indicator_tx.send(floor);
                }
                let reopened = event.floor() == Some(car.current_floor()) && event.is_button_press();
                if car.mode() == Mode::Loading && (before != Mode::Loading || reopened) {
                    doors_activate_tx.send(()).map_err(|_| CarError::Disconnected)?;
                }
                debug.printstatus(&car)?;
            },
            recv(stop_button_rx) -> _ => {
                let _ = outputs.motor_tx.send(MotorCommand::Stop);
                info!("STOPPING PROGRAM...");
                return Ok(())
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}
