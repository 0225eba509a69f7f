//! Unified path management for candor data files.
//!
//! All session data lives under one base directory so that every storage
//! mechanism resolves paths the same way on every platform.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for candor.
///
/// # Directory Structure
///
/// ```text
/// ~/.candor/                   # Base directory
/// └── sessions/                # One TOML snapshot per session
///     ├── <session-id-1>.toml
///     └── <session-id-2>.toml
/// ```
pub struct CandorPaths;

impl CandorPaths {
    /// Returns the candor base directory (`~/.candor`).
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to the base directory
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn base_dir() -> Result<PathBuf, PathError> {
        dirs::home_dir()
            .map(|home| home.join(".candor"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the sessions directory.
    pub fn sessions_dir() -> Result<PathBuf, PathError> {
        Ok(Self::base_dir()?.join("sessions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir() {
        let base_dir = CandorPaths::base_dir().unwrap();
        assert!(base_dir.ends_with(".candor"));
    }

    #[test]
    fn test_sessions_dir() {
        let sessions_dir = CandorPaths::sessions_dir().unwrap();
        assert!(sessions_dir.ends_with("sessions"));
        let base_dir = CandorPaths::base_dir().unwrap();
        assert!(sessions_dir.starts_with(&base_dir));
    }
}
