use std::fmt::Write as _;
use std::io::{stdout, Stdout, Write};

use crossterm::{cursor, terminal, ExecutableCommand, Result};

use dispatch::{ElevatorCar, Motor, Tier};

pub struct Debug {
    stdout: Stdout,
    printed_lines: u16,
}

fn mark(on: bool) -> &'static str {
    if on {
        "x"
    } else {
        ""
    }
}

/// Stop table (top floor first) followed by the car's state.
pub fn render<M: Motor>(car: &ElevatorCar<M>) -> String {
    let mut out = String::new();
    let queues = car.queues();
    let separator = "+------------+------------+------------+------------+";

    // writing to a String cannot fail
    let _ = writeln!(out, "{}", separator);
    let _ = writeln!(out, "| STOPS FOR THIS CAR                                |");
    let _ = writeln!(out, "{}", separator);
    let _ = writeln!(out, "| {0:<10} | {1:<10} | {2:<10} | {3:<10} |", "FLOOR", "NOW", "LATER", "AFTER");
    for floor in car.shaft().floors().rev() {
        let tier = queues.tier_of(floor);
        let _ = writeln!(out, "{}", separator);
        let _ = writeln!(
            out,
            "| {0:<10} | {1:<10} | {2:<10} | {3:<10} |",
            floor,
            mark(tier == Some(Tier::Now)),
            mark(tier == Some(Tier::Later)),
            mark(tier == Some(Tier::AfterLater)),
        );
    }
    let _ = writeln!(out, "{}", separator);

    let direction = match car.direction() {
        Some(direction) => direction.to_string(),
        None => String::from("NONE"),
    };
    let _ = writeln!(out, "+-------------------------+");
    let _ = writeln!(out, "| STATE MACHINE           |");
    let _ = writeln!(out, "+------------+------------+");
    let _ = writeln!(out, "| {0:<10} | {1:<10} |", "STATE", car.mode().to_string());
    let _ = writeln!(out, "+------------+------------+");
    let _ = writeln!(out, "| {0:<10} | {1:<10} |", "FLOOR", car.current_floor());
    let _ = writeln!(out, "+------------+------------+");
    let _ = writeln!(out, "| {0:<10} | {1:<10} |", "DIRECTION", direction);
    let _ = writeln!(out, "+------------+------------+");
    out
}

impl Debug {
    pub fn new() -> Self {
        Debug {
            stdout: stdout(),
            printed_lines: 0,
        }
    }

    pub fn printstatus<M: Motor>(&mut self, car: &ElevatorCar<M>) -> Result<()> {
        if self.printed_lines > 0 {
            self.stdout.execute(cursor::MoveUp(self.printed_lines))?;
        }
        self.stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

        let status = render(car);
        self.stdout.write_all(status.as_bytes())?;
        self.stdout.flush()?;
        self.printed_lines = status.lines().count() as u16;
        Ok(())
    }
}

impl Default for Debug {
    fn default() -> Self {
        Debug::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch::{Direction, Event};

    #[test]
    fn status_shows_tiers_and_state() {
        let mut car = ElevatorCar::new();
        car.handle_event(Event::HallwayButtonPress { floor: 5, direction: Direction::Down }).unwrap();
        car.handle_event(Event::HallwayButtonPress { floor: 4, direction: Direction::Down }).unwrap();
        let status = render(&car);

        assert!(status.contains("| 5          | x          |            |            |"));
        assert!(status.contains("| 4          |            | x          |            |"));
        assert!(status.contains("| STATE      | MOVING     |"));
        assert!(status.contains("| DIRECTION  | UP         |"));
        // 4 header lines, 2 per floor, footer, 9 state lines
        assert_eq!(status.lines().count(), 4 + 2 * 5 + 1 + 9);
    }
}
