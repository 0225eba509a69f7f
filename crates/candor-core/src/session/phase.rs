//! Session phase types for the interview state machine.

use serde::{Deserialize, Serialize};

/// Represents where a session sits in the interview lifecycle.
///
/// Phases only move forward: `Waiting -> Active -> Completed`. No operation
/// skips a phase and none reverses one. The actor enforces this; the type
/// just names the states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created but not started; no questions, no stream, no answers.
    Waiting,
    /// The interview is in progress and accepting answers.
    Active,
    /// The interview is finished and insights have been produced.
    Completed,
}

impl SessionPhase {
    /// True once the session has been started, whether or not it finished.
    pub fn is_started(&self) -> bool {
        !matches!(self, Self::Waiting)
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "Waiting"),
            Self::Active => write!(f, "Active"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}
