//! Walks every state a car on the configured shaft can reach and prints them.

use std::process;

use log::error;

use car::config::Config;
use car::error::CarError;
use dispatch::explorer::{consistent_states, explore};
use dispatch::{ElevatorCar, MotorController};

fn run() -> Result<(), CarError> {
    let config = Config::get()?;
    let car = ElevatorCar::with_shaft(config.shaft, MotorController::new());
    let exploration = explore(&car)?;

    println!("+------------+------------+------------+");
    println!("| {0:<10} | {1:<10} | {2:<10} |", "MODE", "DIRECTION", "FLOOR");
    for state in exploration.visited() {
        let direction = match state.direction {
            Some(direction) => direction.to_string(),
            None => String::from("NONE"),
        };
        println!("+------------+------------+------------+");
        println!("| {0:<10} | {1:<10} | {2:<10} |", state.mode.to_string(), direction, state.current_floor);
    }
    println!("+------------+------------+------------+");

    println!(
        "{} reachable states out of {} consistent, {} transitions, closed: {}",
        exploration.visited().len(),
        consistent_states(config.shaft).len(),
        exploration.transitions(),
        exploration.is_closed(),
    );
    for state in exploration.unreached() {
        println!("unreached: {}", state);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}
