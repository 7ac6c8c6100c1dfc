/// ----- MOTOR MODULE -----
/// Motor commands from the car are forwarded to the I/O thread that owns
/// the driver connection.

use crossbeam_channel::Sender;
use log::error;

use dispatch::{Direction, Motor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorCommand {
    Drive(Direction),
    Stop,
}

#[derive(Debug, Clone)]
pub struct ChannelMotor {
    motor_tx: Sender<MotorCommand>,
}

impl ChannelMotor {
    pub fn new(motor_tx: Sender<MotorCommand>) -> Self {
        ChannelMotor { motor_tx }
    }

    fn send(&self, command: MotorCommand) {
        if self.motor_tx.send(command).is_err() {
            error!("motor thread is gone, {:?} not delivered", command);
        }
    }
}

impl Motor for ChannelMotor {
    fn drive(&mut self, direction: Direction) {
        self.send(MotorCommand::Drive(direction));
    }

    fn stop(&mut self) {
        self.send(MotorCommand::Stop);
    }
}
