//! Application layer for Candor.
//!
//! This crate provides use case implementations that coordinate the domain
//! and infrastructure layers into the interview operations a transport
//! exposes.

pub mod interview_usecase;

pub use interview_usecase::InterviewUseCase;
