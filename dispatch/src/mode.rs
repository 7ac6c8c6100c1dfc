use std::fmt;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Idle,
    Moving,
    Loading,
}

impl Mode {
    pub fn as_string(&self) -> String {
        match self {
            Mode::Idle => String::from("idle"),
            Mode::Moving => String::from("moving"),
            Mode::Loading => String::from("loading"),
        }
    }

    pub fn iter() -> impl Iterator<Item = Mode> {
        [Mode::Idle, Mode::Moving, Mode::Loading].iter().copied()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Idle => write!(f, "IDLE"),
            Mode::Moving => write!(f, "MOVING"),
            Mode::Loading => write!(f, "LOADING"),
        }
    }
}
