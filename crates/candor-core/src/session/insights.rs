//! Structured interview result produced at completion.

use serde::{Deserialize, Serialize};

/// The structured result an insight generator produces from the accumulated
/// answers of a completed interview.
///
/// Set exactly once when a session completes and immutable afterward; a
/// session carries insights if and only if it is in the `Completed` phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    /// The main points extracted from the candidate's answers.
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Observed strengths.
    #[serde(default)]
    pub strengths: Vec<String>,
    /// Follow-up recommendations for the reviewer.
    #[serde(default)]
    pub recommendations: Vec<String>,
}
