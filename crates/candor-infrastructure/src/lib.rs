//! Infrastructure layer for the Candor interview service.
//!
//! Provides the storage-backed [`candor_core::session::SessionRepository`]
//! implementation plus local implementations of the collaborator traits the
//! session actor depends on.

pub mod dto;
pub mod insight;
pub mod media;
pub mod paths;
pub mod storage;
pub mod toml_session_repository;

pub use crate::insight::TemplateInsightGenerator;
pub use crate::media::LocalStreamAllocator;
pub use crate::toml_session_repository::TomlSessionRepository;
