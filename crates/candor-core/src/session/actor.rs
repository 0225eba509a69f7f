//! The per-session actor that owns and mutates one session's state.

use super::collaborator::{InsightGenerator, StreamAllocator};
use super::model::Session;
use super::phase::SessionPhase;
use super::report::{AdvanceReceipt, AnswerReceipt, CompletionReport, StartReceipt, StatusReport};
use crate::error::{CandorError, Result};
use chrono::Utc;
use tokio::sync::Mutex;

/// Exclusive owner of one session's mutable state.
///
/// `SessionActor` is responsible for:
/// - Validating every operation against the current phase
/// - Driving the interview through `Waiting -> Active -> Completed`
/// - Invoking the stream allocator and insight generator collaborators
/// - Keeping each operation all-or-nothing
///
/// # Concurrency
///
/// All state lives behind one `tokio::sync::Mutex`, so at most one mutating
/// operation per session is in flight at a time and operations are observed
/// in the order the lock admits them. The lock is held across the awaited
/// collaborator calls in `start` and `complete`: while such a call is
/// outstanding the session is logically locked for writes, and an operation
/// that queued behind a phase flip observes the new phase. Actors for
/// distinct sessions share nothing and never contend.
#[derive(Debug)]
pub struct SessionActor {
    /// The session state this actor exclusively owns.
    state: Mutex<Session>,
}

impl SessionActor {
    /// Creates an actor for a fresh session in the `Waiting` phase.
    ///
    /// # Arguments
    ///
    /// * `session_id` - Unique identifier the dispatcher assigned
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(Session::waiting(session_id)),
        }
    }

    /// Creates an actor that adopts a previously persisted snapshot.
    pub fn from_snapshot(session: Session) -> Self {
        Self {
            state: Mutex::new(session),
        }
    }

    /// Returns a clone of the current session state for persistence.
    pub async fn snapshot(&self) -> Session {
        self.state.lock().await.clone()
    }

    /// Starts the interview: fixes the question list, allocates a media
    /// stream, and moves the session to `Active`.
    ///
    /// The stream is allocated before any state is touched, so a failed
    /// allocation leaves the session `Waiting` and `start` can be retried.
    /// An empty question list is accepted structurally; the receipt then
    /// carries no current question.
    ///
    /// # Arguments
    ///
    /// * `profile_id` - The owning profile reference
    /// * `questions` - Ordered prompt sequence, immutable after this call
    /// * `allocator` - Collaborator that provisions the media stream
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the session is not `Waiting`
    /// - `Dependency` if stream allocation fails (session stays `Waiting`)
    pub async fn start(
        &self,
        profile_id: impl Into<String>,
        questions: Vec<String>,
        allocator: &dyn StreamAllocator,
    ) -> Result<StartReceipt> {
        let mut session = self.state.lock().await;

        if session.phase != SessionPhase::Waiting {
            return Err(CandorError::invalid_state(
                session.id.clone(),
                session.phase,
                "start",
            ));
        }

        // Allocate first; the session must stay untouched if this fails.
        let stream_handle = allocator.allocate().await.map_err(|e| {
            CandorError::dependency("stream_allocator", session.id.clone(), e.to_string())
        })?;

        session.profile_id = profile_id.into();
        session.questions = questions;
        session.phase = SessionPhase::Active;
        session.started_at = Some(Utc::now());
        session.current_index = 0;
        session.answers.clear();
        session.stream_handle = Some(stream_handle.clone());

        Ok(StartReceipt {
            session_id: session.id.clone(),
            phase: session.phase,
            stream_handle,
            current_question: session.current_question().map(str::to_string),
        })
    }

    /// Returns a point-in-time view of the session. Pure read; never fails.
    pub async fn status(&self) -> StatusReport {
        let session = self.state.lock().await;
        StatusReport {
            session_id: session.id.clone(),
            phase: session.phase,
            current_index: session.current_index,
            total_questions: session.total_questions(),
            progress_percent: session.progress_percent(),
        }
    }

    /// Records an answer for the current question.
    ///
    /// The index must equal the cursor exactly; an out-of-order or stale
    /// index is rejected, not silently ignored. Re-submitting for the
    /// current index overwrites the prior answer (last write wins). The
    /// cursor does not move; advancing is a separate explicit operation.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the session is not `Active`
    /// - `InvalidArgument` if `question_index != current_index`
    pub async fn submit_answer(
        &self,
        question_index: usize,
        answer_text: impl Into<String>,
    ) -> Result<AnswerReceipt> {
        let mut session = self.state.lock().await;

        if session.phase != SessionPhase::Active {
            return Err(CandorError::invalid_state(
                session.id.clone(),
                session.phase,
                "submit_answer",
            ));
        }

        if question_index != session.current_index {
            return Err(CandorError::invalid_argument(
                session.id.clone(),
                format!(
                    "answer submitted for question {} but the current question is {}",
                    question_index, session.current_index
                ),
            ));
        }

        session.answers.insert(question_index, answer_text.into());

        Ok(AnswerReceipt {
            accepted: true,
            next_question: session.next_question().map(str::to_string),
        })
    }

    /// Moves the cursor to the next question.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the session is not `Active`
    /// - `NoMoreQuestions` if the cursor already sits on the last question;
    ///   the cursor does not move
    pub async fn advance(&self) -> Result<AdvanceReceipt> {
        let mut session = self.state.lock().await;

        if session.phase != SessionPhase::Active {
            return Err(CandorError::invalid_state(
                session.id.clone(),
                session.phase,
                "advance",
            ));
        }

        if session.at_last_question() {
            return Err(CandorError::NoMoreQuestions {
                session_id: session.id.clone(),
                current_index: session.current_index,
            });
        }

        session.current_index += 1;

        Ok(AdvanceReceipt {
            current_index: session.current_index,
            current_question: session.current_question().map(str::to_string),
            progress_percent: session.progress_percent(),
        })
    }

    /// Completes the interview: generates insights from the accumulated
    /// answers and moves the session to `Completed`.
    ///
    /// Insights are generated before any state is touched, so a failed
    /// generation leaves the session `Active` and `complete` can be retried.
    ///
    /// # Arguments
    ///
    /// * `generator` - Collaborator that produces insights from the answers
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the session is not `Active` (a second `complete`
    ///   fails here)
    /// - `Dependency` if insight generation fails (session stays `Active`)
    pub async fn complete(&self, generator: &dyn InsightGenerator) -> Result<CompletionReport> {
        let mut session = self.state.lock().await;

        if session.phase != SessionPhase::Active {
            return Err(CandorError::invalid_state(
                session.id.clone(),
                session.phase,
                "complete",
            ));
        }

        // Generate first; the session must stay Active if this fails.
        let insights = generator.generate(&session.answers).await.map_err(|e| {
            CandorError::dependency("insight_generator", session.id.clone(), e.to_string())
        })?;

        session.insights = Some(insights.clone());
        session.phase = SessionPhase::Completed;
        session.completed_at = Some(Utc::now());

        Ok(CompletionReport {
            session_id: session.id.clone(),
            phase: session.phase,
            insights,
            duration_seconds: session.duration_seconds(),
        })
    }
}
