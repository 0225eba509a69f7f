//! Operation result types returned by the session actor.
//!
//! Each mutating operation returns a small receipt describing the state the
//! session reached. The transport layer serializes these as-is; the actor
//! never formats user-facing messages itself.

use super::insights::Insights;
use super::phase::SessionPhase;
use serde::{Deserialize, Serialize};

/// Result of a successful `start` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartReceipt {
    /// The freshly assigned session ID.
    pub session_id: String,
    /// The phase after the transition (always `Active`).
    pub phase: SessionPhase,
    /// Handle of the allocated media stream.
    pub stream_handle: String,
    /// The first question, or `None` for an empty question list.
    pub current_question: Option<String>,
}

/// Point-in-time view of a session. Pure read; never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub session_id: String,
    pub phase: SessionPhase,
    pub current_index: usize,
    pub total_questions: usize,
    /// Rounded percentage of questions the cursor has passed.
    pub progress_percent: u32,
}

/// Result of a successful `submit_answer` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerReceipt {
    /// Always true on success; failures surface as errors instead.
    pub accepted: bool,
    /// The question after the current one, or `None` at the end.
    pub next_question: Option<String>,
}

/// Result of a successful `advance` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceReceipt {
    /// The cursor position after the advance.
    pub current_index: usize,
    /// The question the cursor now points at.
    pub current_question: Option<String>,
    pub progress_percent: u32,
}

/// Result of a successful `complete` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionReport {
    pub session_id: String,
    /// The phase after the transition (always `Completed`).
    pub phase: SessionPhase,
    /// The generated insights.
    pub insights: Insights,
    /// Whole seconds between start and completion, never negative.
    pub duration_seconds: i64,
}
