//! Routes operations to per-session actors.

use super::actor::SessionActor;
use super::model::Session;
use crate::error::{CandorError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Thin routing layer that maps session IDs to their actor instances.
///
/// `SessionDispatcher` is responsible for:
/// - Minting a fresh session ID and actor when an interview opens
/// - Looking up the resident actor for a session ID
/// - Adopting actors rehydrated from persisted snapshots
/// - Evicting actors when a session is deleted
///
/// It holds no session state of its own: the map is the only shared
/// structure, and each actor exclusively owns its session. Operations on
/// distinct sessions therefore never contend with each other; the map's
/// read/write lock is held only for the lookup itself, never across an
/// operation.
#[derive(Debug, Default)]
pub struct SessionDispatcher {
    /// Resident actors, keyed by session ID. Created lazily.
    actors: RwLock<HashMap<String, Arc<SessionActor>>>,
}

impl SessionDispatcher {
    /// Creates a dispatcher with no resident actors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a fresh session ID and registers a new actor under it.
    ///
    /// The actor starts in the `Waiting` phase; the caller is expected to
    /// invoke `start` on it next.
    pub async fn open(&self) -> (String, Arc<SessionActor>) {
        let session_id = Uuid::new_v4().to_string();
        let actor = Arc::new(SessionActor::new(session_id.clone()));

        let mut actors = self.actors.write().await;
        actors.insert(session_id.clone(), actor.clone());

        (session_id, actor)
    }

    /// Returns the resident actor for a session ID, if one exists.
    pub async fn get(&self, session_id: &str) -> Option<Arc<SessionActor>> {
        let actors = self.actors.read().await;
        actors.get(session_id).cloned()
    }

    /// Returns the resident actor for a session ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no actor is resident under this ID.
    pub async fn get_or_err(&self, session_id: &str) -> Result<Arc<SessionActor>> {
        self.get(session_id)
            .await
            .ok_or_else(|| CandorError::not_found("session", session_id))
    }

    /// Adopts a persisted snapshot, registering an actor for it.
    ///
    /// If an actor is already resident under the snapshot's ID, that actor
    /// is returned unchanged; the resident copy is authoritative and a
    /// stale snapshot must not displace it.
    pub async fn adopt(&self, snapshot: Session) -> Arc<SessionActor> {
        let session_id = snapshot.id.clone();
        let mut actors = self.actors.write().await;
        actors
            .entry(session_id)
            .or_insert_with(|| Arc::new(SessionActor::from_snapshot(snapshot)))
            .clone()
    }

    /// Evicts the resident actor for a session ID, if any.
    pub async fn remove(&self, session_id: &str) {
        let mut actors = self.actors.write().await;
        actors.remove(session_id);
    }

    /// Number of resident actors.
    pub async fn resident_count(&self) -> usize {
        let actors = self.actors.read().await;
        actors.len()
    }
}
