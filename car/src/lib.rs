//! Hardware side of a single elevator car: configuration, the driver
//! threads, the door timer and the terminal status view.

pub mod config;
pub mod debug;
pub mod doors;
pub mod error;
pub mod io;
pub mod motor;
