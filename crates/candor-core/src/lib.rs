//! Domain layer for the Candor interview service.
//!
//! The heart of this crate is [`session::SessionActor`], a per-session state
//! machine that drives an interview through strict phases
//! (`Waiting -> Active -> Completed`) with single-writer semantics, and
//! [`session::SessionDispatcher`], which routes operations to the right
//! actor by session ID. Persistence and the collaborator services the actor
//! depends on are abstracted behind traits; implementations live in the
//! infrastructure crate.

pub mod error;
pub mod session;

// Re-export common error type
pub use error::{CandorError, Result};
