//! Interview use case implementation.
//!
//! This module provides the `InterviewUseCase` which wires the session
//! dispatcher, the persistence repository, and the collaborator services
//! into the five interview operations, persisting a snapshot after each
//! successful mutation.

use candor_core::error::{CandorError, Result};
use candor_core::session::{
    AdvanceReceipt, AnswerReceipt, CompletionReport, InsightGenerator, Session, SessionActor,
    SessionDispatcher, SessionRepository, StartReceipt, StatusReport, StreamAllocator,
};
use std::sync::Arc;

/// Use case for running interviews end to end.
///
/// `InterviewUseCase` coordinates between the `SessionDispatcher`, the
/// `SessionRepository`, and the collaborator services to handle all
/// session-facing operations.
///
/// # Responsibilities
///
/// - Opening a session (fresh ID + actor) and starting the interview
/// - Routing status/answer/advance/complete requests to the right actor
/// - Rehydrating actors from persisted snapshots after a restart
/// - Persisting a snapshot after every successful mutation
/// - Structured logging around the operations (the core itself stays silent)
///
/// # Thread Safety
///
/// Every component is behind an `Arc`; the dispatcher serializes operations
/// per session while operations on distinct sessions proceed in parallel.
/// The resident actor's state is the authoritative copy of a session; the
/// repository holds snapshots of it.
pub struct InterviewUseCase {
    /// Routes operations to per-session actors
    dispatcher: Arc<SessionDispatcher>,
    /// Repository for session snapshot persistence
    session_repository: Arc<dyn SessionRepository>,
    /// Collaborator that provisions interview media streams
    stream_allocator: Arc<dyn StreamAllocator>,
    /// Collaborator that produces insights at completion
    insight_generator: Arc<dyn InsightGenerator>,
}

impl InterviewUseCase {
    /// Creates a new `InterviewUseCase` instance.
    ///
    /// # Arguments
    ///
    /// * `session_repository` - Repository for session snapshot persistence
    /// * `stream_allocator` - Collaborator that provisions media streams
    /// * `insight_generator` - Collaborator that produces insights
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        stream_allocator: Arc<dyn StreamAllocator>,
        insight_generator: Arc<dyn InsightGenerator>,
    ) -> Self {
        Self {
            dispatcher: Arc::new(SessionDispatcher::new()),
            session_repository,
            stream_allocator,
            insight_generator,
        }
    }

    /// Creates a use case wired with the local infrastructure stack:
    /// TOML snapshot storage under `base_dir`, locally generated stream
    /// handles, and the template insight generator.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be created.
    pub fn with_local_defaults(base_dir: impl AsRef<std::path::Path>) -> Result<Self> {
        let repository = candor_infrastructure::TomlSessionRepository::new(base_dir)?;
        Ok(Self::new(
            Arc::new(repository),
            Arc::new(candor_infrastructure::LocalStreamAllocator::new()),
            Arc::new(candor_infrastructure::TemplateInsightGenerator::new()),
        ))
    }

    /// Starts a new interview for a profile.
    ///
    /// Mints a fresh session ID, allocates the media stream, fixes the
    /// question list, and persists the initial `Active` snapshot.
    ///
    /// # Errors
    ///
    /// Returns a `Dependency` error if stream allocation fails; nothing is
    /// persisted and no session remains registered in that case.
    pub async fn start_interview(
        &self,
        profile_id: impl Into<String>,
        questions: Vec<String>,
    ) -> Result<StartReceipt> {
        let profile_id = profile_id.into();
        let (session_id, actor) = self.dispatcher.open().await;

        let receipt = match actor
            .start(profile_id.clone(), questions, self.stream_allocator.as_ref())
            .await
        {
            Ok(receipt) => receipt,
            Err(e) => {
                // The session never left Waiting; don't keep the actor around.
                self.dispatcher.remove(&session_id).await;
                tracing::warn!(%session_id, error = %e, "failed to start interview");
                return Err(e);
            }
        };

        self.persist(&actor).await?;
        tracing::info!(%session_id, %profile_id, "interview started");
        Ok(receipt)
    }

    /// Returns a point-in-time status view of a session.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the session is neither resident nor persisted.
    pub async fn session_status(&self, session_id: &str) -> Result<StatusReport> {
        let actor = self.resolve_actor(session_id).await?;
        Ok(actor.status().await)
    }

    /// Records an answer for the current question of a session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `InvalidState` if the session is not `Active`
    /// - `InvalidArgument` if the index does not match the current question
    pub async fn submit_answer(
        &self,
        session_id: &str,
        question_index: usize,
        answer_text: impl Into<String>,
    ) -> Result<AnswerReceipt> {
        let actor = self.resolve_actor(session_id).await?;
        let receipt = actor.submit_answer(question_index, answer_text).await?;
        self.persist(&actor).await?;
        tracing::debug!(%session_id, question_index, "answer recorded");
        Ok(receipt)
    }

    /// Moves a session's cursor to the next question.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `InvalidState` / `NoMoreQuestions` per the state machine
    pub async fn advance_question(&self, session_id: &str) -> Result<AdvanceReceipt> {
        let actor = self.resolve_actor(session_id).await?;
        let receipt = actor.advance().await?;
        self.persist(&actor).await?;
        tracing::debug!(%session_id, current_index = receipt.current_index, "advanced to next question");
        Ok(receipt)
    }

    /// Completes an interview, generating insights and persisting the final
    /// snapshot.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `InvalidState` if the session is not `Active`
    /// - `Dependency` if insight generation fails (the session stays
    ///   `Active` and the call can be retried)
    pub async fn complete_interview(&self, session_id: &str) -> Result<CompletionReport> {
        let actor = self.resolve_actor(session_id).await?;
        let report = actor.complete(self.insight_generator.as_ref()).await?;
        self.persist(&actor).await?;
        tracing::info!(
            %session_id,
            duration_seconds = report.duration_seconds,
            "interview completed"
        );
        Ok(report)
    }

    /// Lists the persisted sessions belonging to one profile.
    pub async fn sessions_for_profile(&self, profile_id: &str) -> Result<Vec<Session>> {
        self.session_repository.list_for_profile(profile_id).await
    }

    /// Deletes a session from both the dispatcher and storage.
    ///
    /// Storage-lifecycle concern; the actor itself never destroys a session
    /// through its own operations.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.dispatcher.remove(session_id).await;
        self.session_repository.delete(session_id).await?;
        tracing::info!(%session_id, "session deleted");
        Ok(())
    }

    /// Resolves the actor for a session ID, rehydrating it from a persisted
    /// snapshot when it is not resident.
    async fn resolve_actor(&self, session_id: &str) -> Result<Arc<SessionActor>> {
        if let Some(actor) = self.dispatcher.get(session_id).await {
            return Ok(actor);
        }

        let snapshot = self
            .session_repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| CandorError::not_found("session", session_id))?;

        tracing::debug!(%session_id, "rehydrating session from snapshot");
        Ok(self.dispatcher.adopt(snapshot).await)
    }

    /// Persists the actor's current snapshot.
    ///
    /// The resident actor remains authoritative; a failed save surfaces as
    /// an error but does not undo the in-memory transition.
    async fn persist(&self, actor: &SessionActor) -> Result<()> {
        let snapshot = actor.snapshot().await;
        self.session_repository.save(&snapshot).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use candor_core::session::{Insights, SessionPhase};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    // Mock SessionRepository for testing
    struct MockSessionRepository {
        sessions: Mutex<HashMap<String, Session>>,
    }

    impl MockSessionRepository {
        fn new() -> Self {
            Self {
                sessions: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
            let sessions = self.sessions.lock().unwrap();
            Ok(sessions.get(session_id).cloned())
        }

        async fn save(&self, session: &Session) -> Result<()> {
            let mut sessions = self.sessions.lock().unwrap();
            sessions.insert(session.id.clone(), session.clone());
            Ok(())
        }

        async fn delete(&self, session_id: &str) -> Result<()> {
            let mut sessions = self.sessions.lock().unwrap();
            sessions.remove(session_id);
            Ok(())
        }

        async fn list_all(&self) -> Result<Vec<Session>> {
            let sessions = self.sessions.lock().unwrap();
            Ok(sessions.values().cloned().collect())
        }

        async fn list_for_profile(&self, profile_id: &str) -> Result<Vec<Session>> {
            let sessions = self.sessions.lock().unwrap();
            Ok(sessions
                .values()
                .filter(|s| s.profile_id == profile_id)
                .cloned()
                .collect())
        }
    }

    struct MockAllocator {
        fail: AtomicBool,
    }

    impl MockAllocator {
        fn new() -> Self {
            Self {
                fail: AtomicBool::new(false),
            }
        }

        fn failing() -> Self {
            let allocator = Self::new();
            allocator.fail.store(true, Ordering::SeqCst);
            allocator
        }
    }

    #[async_trait]
    impl StreamAllocator for MockAllocator {
        async fn allocate(&self) -> Result<String> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(CandorError::internal("media server unreachable"));
            }
            Ok("stream-test".to_string())
        }
    }

    struct MockGenerator;

    #[async_trait]
    impl InsightGenerator for MockGenerator {
        async fn generate(&self, answers: &HashMap<usize, String>) -> Result<Insights> {
            Ok(Insights {
                key_points: answers.values().cloned().collect(),
                strengths: Vec::new(),
                recommendations: Vec::new(),
            })
        }
    }

    fn usecase_with(repository: Arc<MockSessionRepository>) -> InterviewUseCase {
        InterviewUseCase::new(
            repository,
            Arc::new(MockAllocator::new()),
            Arc::new(MockGenerator),
        )
    }

    fn questions(items: &[&str]) -> Vec<String> {
        items.iter().map(|q| q.to_string()).collect()
    }

    #[tokio::test]
    async fn full_interview_through_the_usecase() {
        let repository = Arc::new(MockSessionRepository::new());
        let usecase = usecase_with(repository.clone());

        let start = usecase
            .start_interview("p1", questions(&["Q0", "Q1", "Q2"]))
            .await
            .unwrap();
        let id = start.session_id.clone();
        assert_eq!(start.phase, SessionPhase::Active);
        assert_eq!(start.current_question.as_deref(), Some("Q0"));

        let receipt = usecase.submit_answer(&id, 0, "A0").await.unwrap();
        assert_eq!(receipt.next_question.as_deref(), Some("Q1"));

        let advance = usecase.advance_question(&id).await.unwrap();
        assert_eq!(advance.current_index, 1);

        usecase.submit_answer(&id, 1, "A1").await.unwrap();
        usecase.advance_question(&id).await.unwrap();
        let receipt = usecase.submit_answer(&id, 2, "A2").await.unwrap();
        assert_eq!(receipt.next_question, None);

        let report = usecase.complete_interview(&id).await.unwrap();
        assert_eq!(report.phase, SessionPhase::Completed);
        assert!(report.duration_seconds >= 0);

        // The final snapshot was persisted.
        let stored = repository.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.phase, SessionPhase::Completed);
        assert_eq!(stored.answers.len(), 3);
        assert!(stored.insights.is_some());
    }

    #[tokio::test]
    async fn mutations_persist_a_snapshot_each_time() {
        let repository = Arc::new(MockSessionRepository::new());
        let usecase = usecase_with(repository.clone());

        let id = usecase
            .start_interview("p1", questions(&["Q0", "Q1"]))
            .await
            .unwrap()
            .session_id;

        let stored = repository.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.phase, SessionPhase::Active);

        usecase.submit_answer(&id, 0, "A0").await.unwrap();
        let stored = repository.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.answers[&0], "A0");

        usecase.advance_question(&id).await.unwrap();
        let stored = repository.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.current_index, 1);
    }

    #[tokio::test]
    async fn failed_allocation_registers_nothing() {
        let repository = Arc::new(MockSessionRepository::new());
        let usecase = InterviewUseCase::new(
            repository.clone(),
            Arc::new(MockAllocator::failing()),
            Arc::new(MockGenerator),
        );

        let err = usecase
            .start_interview("p1", questions(&["Q0"]))
            .await
            .unwrap_err();

        assert!(err.is_dependency());
        assert!(repository.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let usecase = usecase_with(Arc::new(MockSessionRepository::new()));

        let err = usecase.session_status("missing").await.unwrap_err();
        assert!(err.is_not_found());

        let err = usecase.submit_answer("missing", 0, "A0").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn sessions_rehydrate_from_snapshots() {
        let repository = Arc::new(MockSessionRepository::new());

        // First process lifetime: run an interview partway.
        let id = {
            let usecase = usecase_with(repository.clone());
            let id = usecase
                .start_interview("p1", questions(&["Q0", "Q1"]))
                .await
                .unwrap()
                .session_id;
            usecase.submit_answer(&id, 0, "A0").await.unwrap();
            usecase.advance_question(&id).await.unwrap();
            id
        };

        // Second lifetime: a fresh dispatcher has no resident actor, so the
        // session comes back from its snapshot and stays operable.
        let usecase = usecase_with(repository.clone());
        let status = usecase.session_status(&id).await.unwrap();
        assert_eq!(status.phase, SessionPhase::Active);
        assert_eq!(status.current_index, 1);

        usecase.submit_answer(&id, 1, "A1").await.unwrap();
        let report = usecase.complete_interview(&id).await.unwrap();
        assert_eq!(report.phase, SessionPhase::Completed);
    }

    #[tokio::test]
    async fn profile_listing_and_deletion() {
        let repository = Arc::new(MockSessionRepository::new());
        let usecase = usecase_with(repository.clone());

        let first = usecase
            .start_interview("p1", questions(&["Q0"]))
            .await
            .unwrap()
            .session_id;
        usecase
            .start_interview("p2", questions(&["Q0"]))
            .await
            .unwrap();

        let sessions = usecase.sessions_for_profile("p1").await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, first);

        usecase.delete_session(&first).await.unwrap();
        assert!(usecase.sessions_for_profile("p1").await.unwrap().is_empty());
        assert!(usecase.session_status(&first).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn distinct_sessions_do_not_interfere() {
        let usecase = Arc::new(usecase_with(Arc::new(MockSessionRepository::new())));

        let first = usecase
            .start_interview("p1", questions(&["Q0", "Q1"]))
            .await
            .unwrap()
            .session_id;
        let second = usecase
            .start_interview("p2", questions(&["Q0"]))
            .await
            .unwrap()
            .session_id;

        usecase.submit_answer(&first, 0, "A0").await.unwrap();
        usecase.advance_question(&first).await.unwrap();

        // The second session's cursor is untouched by the first's progress.
        let status = usecase.session_status(&second).await.unwrap();
        assert_eq!(status.current_index, 0);
        assert_eq!(status.total_questions, 1);
    }

    #[tokio::test]
    async fn local_defaults_run_an_interview_end_to_end() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let usecase = InterviewUseCase::with_local_defaults(temp_dir.path()).unwrap();

        let start = usecase
            .start_interview("p1", questions(&["Q0"]))
            .await
            .unwrap();
        assert!(start.stream_handle.starts_with("stream-"));

        let id = start.session_id;
        usecase.submit_answer(&id, 0, "A0").await.unwrap();
        let report = usecase.complete_interview(&id).await.unwrap();
        assert_eq!(report.insights.key_points, vec!["A0".to_string()]);

        // The snapshot landed on disk and survives a fresh use case.
        let usecase = InterviewUseCase::with_local_defaults(temp_dir.path()).unwrap();
        let status = usecase.session_status(&id).await.unwrap();
        assert_eq!(status.phase, SessionPhase::Completed);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_operations_on_one_session_serialize() {
        let usecase = Arc::new(usecase_with(Arc::new(MockSessionRepository::new())));
        let id = usecase
            .start_interview("p1", questions(&["Q0", "Q1"]))
            .await
            .unwrap()
            .session_id;

        let submitter = {
            let usecase = Arc::clone(&usecase);
            let id = id.clone();
            tokio::spawn(async move { usecase.submit_answer(&id, 0, "A0").await })
        };
        let advancer = {
            let usecase = Arc::clone(&usecase);
            let id = id.clone();
            tokio::spawn(async move { usecase.advance_question(&id).await })
        };

        let submitted = submitter.await.unwrap();
        advancer.await.unwrap().unwrap();

        // Final state matches one of the two sequential orderings.
        let status = usecase.session_status(&id).await.unwrap();
        assert_eq!(status.current_index, 1);
        if let Err(e) = submitted {
            assert!(e.is_invalid_argument());
        }
    }
}
