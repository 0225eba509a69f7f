//! Session domain model.
//!
//! This module contains the core Session entity that represents one
//! interview attempt in the application's domain layer.

use super::insights::Insights;
use super::phase::SessionPhase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents one interview attempt in the application's domain layer.
///
/// A session contains:
/// - The owning profile reference
/// - The authoritative phase (`Waiting`, `Active`, `Completed`)
/// - The fixed question sequence and the cursor into it
/// - Answers recorded so far, keyed by question index
/// - The allocated media stream handle
/// - Insights, once the interview completes
///
/// This is the "pure" domain model that the actor operates on, independent
/// of any specific storage format. Mutation goes through `SessionActor`
/// exclusively; everything here is data plus read-only derivations.
///
/// Invariants the actor maintains:
/// - `phase` only moves forward (`Waiting -> Active -> Completed`)
/// - `questions` is non-empty input fixed at start and never rewritten
/// - answer keys are a subset of `[0, current_index]`
/// - `insights` is present iff `phase == Completed`
/// - `completed_at >= started_at` when both are set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format), immutable after creation.
    pub id: String,
    /// The owning profile ID. Opaque to the core; set at start.
    pub profile_id: String,
    /// The authoritative lifecycle state.
    pub phase: SessionPhase,
    /// When the interview started. Set exactly once by `start`.
    pub started_at: Option<DateTime<Utc>>,
    /// When the interview completed. Set exactly once by `complete`.
    pub completed_at: Option<DateTime<Utc>>,
    /// Ordered prompt sequence, fixed at start.
    #[serde(default)]
    pub questions: Vec<String>,
    /// Cursor into `questions`; monotonically non-decreasing while `Active`.
    #[serde(default)]
    pub current_index: usize,
    /// Recorded answers, keyed by question index.
    #[serde(default)]
    pub answers: HashMap<usize, String>,
    /// Handle of the allocated media stream, set once at start.
    pub stream_handle: Option<String>,
    /// Structured result, present iff the session is `Completed`.
    pub insights: Option<Insights>,
}

impl Session {
    /// Creates a fresh session in the `Waiting` phase with empty collections.
    pub fn waiting(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            profile_id: String::new(),
            phase: SessionPhase::Waiting,
            started_at: None,
            completed_at: None,
            questions: Vec::new(),
            current_index: 0,
            answers: HashMap::new(),
            stream_handle: None,
            insights: None,
        }
    }

    /// Returns the question the cursor currently points at, if any.
    ///
    /// `None` before start and for a session started with an empty question
    /// list (accepted structurally, yields no current question).
    pub fn current_question(&self) -> Option<&str> {
        self.questions.get(self.current_index).map(String::as_str)
    }

    /// Returns the question after the cursor, if one exists.
    pub fn next_question(&self) -> Option<&str> {
        self.questions
            .get(self.current_index + 1)
            .map(String::as_str)
    }

    /// Total number of questions in this interview.
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Progress through the question list, as a rounded percentage.
    ///
    /// `round(current_index / total * 100)`, or 0 when there are no
    /// questions.
    pub fn progress_percent(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        let ratio = self.current_index as f64 / self.questions.len() as f64;
        (ratio * 100.0).round() as u32
    }

    /// True when the cursor sits on the last question (or past the end of an
    /// empty list), i.e. `advance` has nowhere to go.
    pub fn at_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Interview duration in whole seconds.
    ///
    /// 0 when either timestamp is missing; never negative.
    pub fn duration_seconds(&self) -> i64 {
        match (self.started_at, self.completed_at) {
            (Some(started), Some(completed)) => (completed - started).num_seconds().max(0),
            _ => 0,
        }
    }
}
