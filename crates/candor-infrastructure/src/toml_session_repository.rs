//! TOML-based SessionRepository implementation

use crate::dto::SessionDocument;
use crate::storage::AtomicTomlFile;
use candor_core::error::{CandorError, Result};
use candor_core::session::{Session, SessionRepository};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// A repository implementation for storing session snapshots in TOML files.
///
/// - Uses DTOs ([`SessionDocument`]) for persistence
/// - Converts between DTOs and domain models at the boundary
/// - Stores sessions as individual TOML files in a sessions directory,
///   replaced atomically on every save
pub struct TomlSessionRepository {
    base_dir: PathBuf,
}

impl TomlSessionRepository {
    /// Creates a new `TomlSessionRepository` with the specified base directory.
    ///
    /// The directory structure will be created if it doesn't exist:
    /// ```text
    /// base_dir/
    /// └── sessions/
    ///     ├── session-id-1.toml
    ///     └── session-id-2.toml
    /// ```
    ///
    /// # Arguments
    ///
    /// * `base_dir` - The base directory for storing session data
    ///
    /// # Errors
    ///
    /// Returns an error if the directory structure cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let sessions_dir = base_dir.join("sessions");
        fs::create_dir_all(&sessions_dir)
            .map_err(|e| CandorError::io(format!("Failed to create sessions directory: {}", e)))?;

        tracing::debug!(path = %sessions_dir.display(), "session store ready");
        Ok(Self { base_dir })
    }

    /// Creates a `TomlSessionRepository` instance at the default location
    /// (`~/.candor`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or if
    /// the directory structure cannot be created.
    pub fn default_location() -> Result<Self> {
        let base_dir = crate::paths::CandorPaths::base_dir()
            .map_err(|e| CandorError::io(e.to_string()))?;
        Self::new(base_dir)
    }

    /// Returns the snapshot file handle for a given session ID.
    fn session_file(&self, session_id: &str) -> AtomicTomlFile<SessionDocument> {
        let path = self
            .base_dir
            .join("sessions")
            .join(format!("{}.toml", session_id));
        AtomicTomlFile::new(path)
    }

    /// Loads every snapshot in the sessions directory.
    fn load_all(&self) -> Result<Vec<Session>> {
        let sessions_dir = self.base_dir.join("sessions");
        let mut sessions = Vec::new();

        for entry in fs::read_dir(&sessions_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue;
            }

            let content = fs::read_to_string(&path)?;
            let document: SessionDocument = toml::from_str(&content)?;
            sessions.push(Session::try_from(document)?);
        }

        // Directory iteration order is arbitrary; give callers a stable one.
        sessions.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(sessions)
    }
}

#[async_trait]
impl SessionRepository for TomlSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        match self.session_file(session_id).load()? {
            Some(document) => Ok(Some(Session::try_from(document)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let document = SessionDocument::from(session);
        self.session_file(&session.id).save(&document)
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        self.session_file(session_id).remove()
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        self.load_all()
    }

    async fn list_for_profile(&self, profile_id: &str) -> Result<Vec<Session>> {
        let mut sessions = self.load_all()?;
        sessions.retain(|session| session.profile_id == profile_id);
        Ok(sessions)
    }
}
