//! Error types of the dispatch core. None of them is recoverable where it
//! is detected: the caller decides whether to halt the car or abort a run.

use thiserror::Error;

use crate::car::ElevatorState;
use crate::direction::Direction;
use crate::event::{Event, EventKind};
use crate::floor::Floor;
use crate::invariants::InvariantViolation;
use crate::mode::Mode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("unsupported event kind `{kind}`")]
    UnsupportedEvent { kind: String },

    #[error("malformed {kind} event: {reason}")]
    MalformedPayload { kind: EventKind, reason: String },

    #[error("malformed event: {reason}")]
    MalformedEvent { reason: String },

    /// The event cannot physically happen in this mode.
    #[error("{event} received while {mode}")]
    Protocol { mode: Mode, event: EventKind },

    /// Missed or duplicated sensor pulse.
    #[error("floor sensor reported floor {reported}, car at floor {current} moving {direction} cannot reach it next")]
    Sequence {
        current: Floor,
        direction: Direction,
        reported: Floor,
    },

    #[error("car is {mode} without a direction of travel")]
    MissingDirection { mode: Mode },

    #[error("floor {floor} is outside the shaft {bottom}..={top}")]
    FloorOutOfRange { floor: Floor, bottom: Floor, top: Floor },

    #[error("invalid shaft: bottom floor {bottom} must be below top floor {top}")]
    InvalidShaft { bottom: Floor, top: Floor },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExploreError {
    #[error("{event:?} rejected in {state}: {source}")]
    Rejected {
        state: ElevatorState,
        event: Event,
        #[source]
        source: DispatchError,
    },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error("car in {state} never serves floors {pending:?}")]
    Undrained {
        state: ElevatorState,
        pending: Vec<Floor>,
    },
}
