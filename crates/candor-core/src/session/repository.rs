//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing session persistence.
///
/// This trait defines the contract for persisting and retrieving session
/// snapshots, decoupling the application's core logic from the specific
/// storage mechanism (e.g. TOML files, database, remote API).
///
/// The actor itself never persists; the application layer saves a snapshot
/// after each successful mutation and rehydrates actors from stored
/// snapshots on demand.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds a session snapshot by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>>;

    /// Saves a session snapshot to storage, replacing any prior snapshot.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Deletes a session from storage. Deleting a missing session is not an
    /// error.
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// Lists all stored sessions.
    async fn list_all(&self) -> Result<Vec<Session>>;

    /// Lists the stored sessions belonging to one profile.
    async fn list_for_profile(&self, profile_id: &str) -> Result<Vec<Session>>;
}
