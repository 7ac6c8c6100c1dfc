//! Dispatch core for a single elevator car.
//!
//! Stops are kept in three tiers: floors to serve on the current run, on
//! the run after the next reversal, and on the run after that. The car's
//! mode (IDLE, MOVING, LOADING) decides how each event is interpreted.
//! Everything here is synchronous and free of I/O; the motor is reached
//! through the [`Motor`] trait.

pub mod behaviour;
pub mod car;
pub mod direction;
pub mod error;
pub mod event;
pub mod explorer;
pub mod floor;
pub mod invariants;
pub mod mode;
pub mod motor;
pub mod stop_queues;

pub use car::{ElevatorCar, ElevatorState};
pub use direction::Direction;
pub use error::{DispatchError, ExploreError};
pub use event::{Event, EventKind, RawEvent};
pub use explorer::{explore, Exploration};
pub use floor::{Floor, Shaft, BOTTOM_FLOOR, TOP_FLOOR};
pub use invariants::{check_invariants, Invariant, InvariantViolation};
pub use mode::Mode;
pub use motor::{Motor, MotorController, MotorState};
pub use stop_queues::{StopQueues, Tier};
