//! Error types for the Candor interview service.

use crate::session::SessionPhase;
use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire Candor workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. The first three variants
/// form the recoverable taxonomy of the session state machine: the caller
/// can retry (`Dependency`), correct its input (`InvalidArgument`), or stop
/// issuing an operation that is no longer legal (`InvalidState`). None of
/// them corrupts the session an actor owns.
#[derive(Error, Debug, Clone, Serialize)]
pub enum CandorError {
    /// The operation is not legal in the session's current phase.
    #[error("Operation '{operation}' is not valid for session '{session_id}' in phase {phase}")]
    InvalidState {
        session_id: String,
        phase: SessionPhase,
        operation: &'static str,
    },

    /// `advance` was called while the cursor already sits on the last question.
    #[error("No more questions in session '{session_id}' (index {current_index} is the last)")]
    NoMoreQuestions {
        session_id: String,
        current_index: usize,
    },

    /// Well-formed but semantically wrong input (e.g. a stale question index).
    #[error("Invalid argument for session '{session_id}': {message}")]
    InvalidArgument {
        session_id: String,
        message: String,
    },

    /// An external collaborator call failed or timed out. Retryable.
    #[error("Dependency '{dependency}' failed for session '{session_id}': {message}")]
    Dependency {
        dependency: &'static str,
        session_id: String,
        message: String,
    },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CandorError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidState error
    pub fn invalid_state(
        session_id: impl Into<String>,
        phase: SessionPhase,
        operation: &'static str,
    ) -> Self {
        Self::InvalidState {
            session_id: session_id.into(),
            phase,
            operation,
        }
    }

    /// Creates an InvalidArgument error
    pub fn invalid_argument(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            session_id: session_id.into(),
            message: message.into(),
        }
    }

    /// Creates a Dependency error
    pub fn dependency(
        dependency: &'static str,
        session_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Dependency {
            dependency,
            session_id: session_id.into(),
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error rejects an operation for the session's phase.
    ///
    /// `NoMoreQuestions` counts: it is the phase-machine refusing to move the
    /// cursor past the last question, not a malformed input.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            Self::InvalidState { .. } | Self::NoMoreQuestions { .. }
        )
    }

    /// Check if this is an InvalidArgument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if this is a Dependency error
    pub fn is_dependency(&self) -> bool {
        matches!(self, Self::Dependency { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CandorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CandorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CandorError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CandorError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for CandorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Conversion from String (for error messages)
impl From<String> for CandorError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, CandorError>`.
pub type Result<T> = std::result::Result<T, CandorError>;
