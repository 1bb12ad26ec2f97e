//! Per-round model responses recorded in the debate transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::model::ModelId;

/// How a single adapter call resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// The model produced usable content
    Ok,
    /// The adapter call failed; content carries the error placeholder
    Failed,
    /// The call exceeded the per-call timeout and was abandoned
    TimedOut,
}

impl ResponseStatus {
    /// Check if this status carries usable content
    pub fn is_ok(&self) -> bool {
        matches!(self, ResponseStatus::Ok)
    }
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseStatus::Ok => write!(f, "ok"),
            ResponseStatus::Failed => write!(f, "failed"),
            ResponseStatus::TimedOut => write!(f, "timed_out"),
        }
    }
}

/// One model's answer (or failure record) for one round
///
/// Immutable once appended to the transcript. Every attempted call leaves
/// exactly one entry per (model, round) pair; failures and timeouts keep
/// their slot with the error text as content so the transcript stays
/// complete without fabricating model output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    /// The model that produced (or failed to produce) this entry
    pub model: ModelId,
    /// Round number, 1-indexed
    pub round: u32,
    /// Model output, or an error placeholder when the call did not succeed
    pub content: String,
    /// Whether this entry revises an earlier position (always true past round 1)
    pub is_revision: bool,
    /// How the adapter call resolved
    pub status: ResponseStatus,
    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
}

impl ModelResponse {
    /// Creates a successful entry carrying model content.
    pub fn ok(model: ModelId, round: u32, content: impl Into<String>) -> Self {
        Self::record(model, round, content.into(), ResponseStatus::Ok)
    }

    /// Creates a failed entry; the error text becomes the content placeholder.
    pub fn failed(model: ModelId, round: u32, error: impl Into<String>) -> Self {
        Self::record(model, round, error.into(), ResponseStatus::Failed)
    }

    /// Creates a timed-out entry for an abandoned call.
    pub fn timed_out(model: ModelId, round: u32, timeout_secs: u64) -> Self {
        Self::record(
            model,
            round,
            format!("Error: request timed out after {}s", timeout_secs),
            ResponseStatus::TimedOut,
        )
    }

    fn record(model: ModelId, round: u32, content: String, status: ResponseStatus) -> Self {
        debug_assert!(round >= 1, "rounds are 1-indexed");
        Self {
            model,
            round,
            content,
            is_revision: round > 1,
            status,
            timestamp: Utc::now(),
        }
    }

    /// Returns `true` if this entry carries usable model content.
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}
