use serde::{Deserialize, Serialize};

/// Triggers exposed to the control surface. No parameters, no return value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ControlCommand {
    Start,
    Pause,
    Toggle,
    Reset,
}

impl ControlCommand {
    /// Resolve against the current running flag. Toggle is the only
    /// command whose meaning depends on state.
    pub fn to_input(self, is_running: bool) -> SimInput {
        match self {
            Self::Start  => SimInput::Start,
            Self::Pause  => SimInput::Pause,
            Self::Reset  => SimInput::Reset,
            Self::Toggle if is_running => SimInput::Pause,
            Self::Toggle => SimInput::Start,
        }
    }
}

/// Everything the transition function reacts to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimInput {
    Start,
    Pause,
    Reset,
    Tick,
}
