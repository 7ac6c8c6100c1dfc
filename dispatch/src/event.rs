//! ----- EVENTS -----
//! The four kinds of input a car reacts to, plus the untyped form an event
//! source hands over before it is decoded.

use std::fmt;

use serde_json::Value;

use crate::direction::Direction;
use crate::error::DispatchError;
use crate::floor::Floor;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    OnboardPanelButtonPress { dest: Floor },
    FloorSensor { floor: Floor },
    HallwayButtonPress { floor: Floor, direction: Direction },
    LoadingComplete,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::OnboardPanelButtonPress { .. } => EventKind::OnboardPanelButtonPress,
            Event::FloorSensor { .. } => EventKind::FloorSensor,
            Event::HallwayButtonPress { .. } => EventKind::HallwayButtonPress,
            Event::LoadingComplete => EventKind::LoadingComplete,
        }
    }

    /// The floor carried by the payload, if any.
    pub fn floor(&self) -> Option<Floor> {
        match *self {
            Event::OnboardPanelButtonPress { dest } => Some(dest),
            Event::FloorSensor { floor } => Some(floor),
            Event::HallwayButtonPress { floor, .. } => Some(floor),
            Event::LoadingComplete => None,
        }
    }

    pub fn is_button_press(&self) -> bool {
        matches!(
            self,
            Event::OnboardPanelButtonPress { .. } | Event::HallwayButtonPress { .. }
        )
    }

    pub fn from_json(text: &str) -> Result<Self, DispatchError> {
        let raw: RawEvent = serde_json::from_str(text)
            .map_err(|e| DispatchError::MalformedEvent { reason: e.to_string() })?;
        Event::try_from(raw)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    OnboardPanelButtonPress,
    FloorSensor,
    HallwayButtonPress,
    LoadingComplete,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::OnboardPanelButtonPress => "ONBOARD_PANEL_BUTTON_PRESS",
            EventKind::FloorSensor => "FLOOR_SENSOR",
            EventKind::HallwayButtonPress => "HALLWAY_BUTTON_PRESS",
            EventKind::LoadingComplete => "LOADING_COMPLETE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        EventKind::iter().find(|kind| kind.as_str() == name)
    }

    pub fn iter() -> impl Iterator<Item = EventKind> {
        [
            EventKind::OnboardPanelButtonPress,
            EventKind::FloorSensor,
            EventKind::HallwayButtonPress,
            EventKind::LoadingComplete,
        ]
        .iter()
        .copied()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event as delivered by an untyped source: a kind name and a loose payload.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub kind: String,
    #[serde(default)]
    pub payload: Option<Value>,
}

impl RawEvent {
    pub fn new(kind: &str, payload: Option<Value>) -> Self {
        RawEvent {
            kind: kind.to_owned(),
            payload,
        }
    }
}

impl TryFrom<RawEvent> for Event {
    type Error = DispatchError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let kind = EventKind::from_name(&raw.kind)
            .ok_or_else(|| DispatchError::UnsupportedEvent { kind: raw.kind.clone() })?;
        let payload = raw.payload.unwrap_or(Value::Null);

        match kind {
            EventKind::OnboardPanelButtonPress => Ok(Event::OnboardPanelButtonPress {
                dest: floor_field(kind, &payload, "dest")?,
            }),
            EventKind::FloorSensor => Ok(Event::FloorSensor {
                floor: floor_field(kind, &payload, "floor")?,
            }),
            EventKind::HallwayButtonPress => Ok(Event::HallwayButtonPress {
                floor: floor_field(kind, &payload, "floor")?,
                direction: direction_field(kind, &payload, "direction")?,
            }),
            EventKind::LoadingComplete => Ok(Event::LoadingComplete),
        }
    }
}

fn field<'a>(kind: EventKind, payload: &'a Value, name: &str) -> Result<&'a Value, DispatchError> {
    payload.get(name).ok_or_else(|| DispatchError::MalformedPayload {
        kind,
        reason: format!("missing field `{}`", name),
    })
}

fn floor_field(kind: EventKind, payload: &Value, name: &str) -> Result<Floor, DispatchError> {
    field(kind, payload, name)?
        .as_u64()
        .and_then(|n| Floor::try_from(n).ok())
        .ok_or_else(|| DispatchError::MalformedPayload {
            kind,
            reason: format!("field `{}` is not a floor number", name),
        })
}

fn direction_field(kind: EventKind, payload: &Value, name: &str) -> Result<Direction, DispatchError> {
    serde_json::from_value(field(kind, payload, name)?.clone()).map_err(|e| {
        DispatchError::MalformedPayload {
            kind,
            reason: format!("field `{}`: {}", name, e),
        }
    })
}
