/// ----- DOORS MODULE -----
/// This module is responsible for the door open light and for keeping
/// track of how long the doors have been open, to generate the
/// LOADING_COMPLETE event for the car. Every activation restarts the timer.

use std::time::Duration;

use crossbeam_channel::{select, Receiver, Sender};
use log::debug;

use dispatch::Event;

pub fn main(
    open_duration: Duration,
    doors_activate_rx: Receiver<()>,
    events_tx: Sender<Event>,
    door_light_tx: Sender<bool>,
) {
    let mut open = false;

    loop {
        select! {
            recv(doors_activate_rx) -> msg => {
                if msg.is_err() {
                    return;
                }
                open = true;
                if door_light_tx.send(true).is_err() {
                    return;
                }
            },
            default(open_duration) => {
                if open {
                    open = false;
                    debug!("doors closing");
                    if door_light_tx.send(false).is_err() || events_tx.send(Event::LoadingComplete).is_err() {
                        return;
                    }
                }
            },
        }
    }
}
