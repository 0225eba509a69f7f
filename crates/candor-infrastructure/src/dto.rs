//! Storage DTOs for session snapshots.
//!
//! The domain model keys answers by `usize` and stores timestamps as
//! `DateTime<Utc>`; TOML tables cannot be keyed by integers, so the storage
//! document flattens answers into an array of `{index, text}` records and
//! keeps timestamps as RFC 3339 strings. Conversions in both directions are
//! lossless, preserving every field of the domain model.

use candor_core::error::{CandorError, Result};
use candor_core::session::{Insights, Session, SessionPhase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One recorded answer, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// The question index this answer belongs to.
    pub index: usize,
    /// The answer text.
    pub text: String,
}

/// The persisted shape of [`Insights`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsDocument {
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// The persisted shape of a [`Session`] snapshot.
///
/// Scalar fields come first so the TOML serializer emits values before the
/// `answers` and `insights` tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDocument {
    pub id: String,
    pub profile_id: String,
    pub phase: SessionPhase,
    /// RFC 3339 timestamp, if the session has started.
    pub started_at: Option<String>,
    /// RFC 3339 timestamp, if the session has completed.
    pub completed_at: Option<String>,
    pub stream_handle: Option<String>,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub current_index: usize,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    pub insights: Option<InsightsDocument>,
}

impl From<&Session> for SessionDocument {
    fn from(session: &Session) -> Self {
        // Sort answers by index so snapshot files are deterministic.
        let mut answers: Vec<AnswerRecord> = session
            .answers
            .iter()
            .map(|(&index, text)| AnswerRecord {
                index,
                text: text.clone(),
            })
            .collect();
        answers.sort_by_key(|record| record.index);

        Self {
            id: session.id.clone(),
            profile_id: session.profile_id.clone(),
            phase: session.phase,
            started_at: session.started_at.map(|t| t.to_rfc3339()),
            completed_at: session.completed_at.map(|t| t.to_rfc3339()),
            stream_handle: session.stream_handle.clone(),
            questions: session.questions.clone(),
            current_index: session.current_index,
            answers,
            insights: session.insights.as_ref().map(|i| InsightsDocument {
                key_points: i.key_points.clone(),
                strengths: i.strengths.clone(),
                recommendations: i.recommendations.clone(),
            }),
        }
    }
}

impl TryFrom<SessionDocument> for Session {
    type Error = CandorError;

    fn try_from(document: SessionDocument) -> Result<Session> {
        let answers: HashMap<usize, String> = document
            .answers
            .into_iter()
            .map(|record| (record.index, record.text))
            .collect();

        Ok(Session {
            id: document.id,
            profile_id: document.profile_id,
            phase: document.phase,
            started_at: parse_timestamp(document.started_at.as_deref())?,
            completed_at: parse_timestamp(document.completed_at.as_deref())?,
            questions: document.questions,
            current_index: document.current_index,
            answers,
            stream_handle: document.stream_handle,
            insights: document.insights.map(|i| Insights {
                key_points: i.key_points,
                strengths: i.strengths,
                recommendations: i.recommendations,
            }),
        })
    }
}

fn parse_timestamp(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| CandorError::Serialization {
                    format: "RFC 3339".to_string(),
                    message: format!("invalid timestamp '{}': {}", raw, e),
                })
        })
        .transpose()
}
