//! Session domain module.
//!
//! This module contains all session-related domain models, collaborator
//! interfaces, and the actor that drives the interview state machine.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`)
//! - `phase`: Lifecycle state type (`SessionPhase`)
//! - `insights`: Structured interview result (`Insights`)
//! - `report`: Operation result types (`StartReceipt`, `StatusReport`, ...)
//! - `actor`: The per-session state machine (`SessionActor`)
//! - `dispatcher`: Session ID to actor routing (`SessionDispatcher`)
//! - `collaborator`: External dependency traits (`StreamAllocator`,
//!   `InsightGenerator`)
//! - `repository`: Repository trait for session persistence

mod actor;
mod collaborator;
mod dispatcher;
mod insights;
mod model;
mod phase;
mod report;
mod repository;

// Re-export public API
pub use actor::SessionActor;
pub use collaborator::{InsightGenerator, StreamAllocator};
pub use dispatcher::SessionDispatcher;
pub use insights::Insights;
pub use model::Session;
pub use phase::SessionPhase;
pub use report::{AdvanceReceipt, AnswerReceipt, CompletionReport, StartReceipt, StatusReport};
pub use repository::SessionRepository;
