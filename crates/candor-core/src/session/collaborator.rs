//! Collaborator contracts consumed by the session actor.
//!
//! `start` and `complete` depend on external services the core treats as
//! opaque: a media stream provisioner and an insight generator. Both are
//! awaited inline while the session lock is held, so a failed call leaves
//! the session exactly as it was (all-or-nothing per operation).

use super::insights::Insights;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// An abstract provisioner for interview media streams.
///
/// Implementations may talk to a media server, a WebRTC gateway, or hand out
/// local handles for tests. Allocation may take arbitrary time; the actor
/// keeps the session logically locked until it resolves.
#[async_trait]
pub trait StreamAllocator: Send + Sync {
    /// Allocates a stream and returns its opaque handle.
    ///
    /// # Errors
    ///
    /// Any error is surfaced to the caller as a retryable `Dependency`
    /// error and must leave no session state behind.
    async fn allocate(&self) -> Result<String>;
}

/// An abstract generator of structured insights from interview answers.
///
/// The input is the accumulated answer map, keyed by question index. The
/// generator has no access to session state beyond what it is handed.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Produces insights from the recorded answers.
    ///
    /// # Errors
    ///
    /// A failure keeps the session `Active`; `complete` can be retried.
    async fn generate(&self, answers: &HashMap<usize, String>) -> Result<Insights>;
}
