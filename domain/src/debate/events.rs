//! Progress events streamed to the debate's consumer.

use serde::{Deserialize, Serialize};

use crate::core::model::ModelId;
use crate::debate::report::ConsensusReport;
use crate::debate::response::{ModelResponse, ResponseStatus};

/// Typed progress event pushed to the event sink
///
/// Events exist only on the wire to the consumer; they are never stored.
/// Each debate's stream is terminated exactly once, by either [`Done`] or a
/// terminal [`Error`].
///
/// Serializes with a `type` tag so stream consumers can dispatch on the
/// event kind.
///
/// [`Done`]: ProgressEvent::Done
/// [`Error`]: ProgressEvent::Error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// One model's entry for one round, emitted as it arrives
    Response {
        model: ModelId,
        round: u32,
        content: String,
        is_revision: bool,
        status: ResponseStatus,
    },
    /// The final consensus report
    Consensus { report: ConsensusReport },
    /// Terminal: the debate finished, or was cancelled when the marker is set
    Done { cancelled: bool },
    /// Terminal when the debate failed as a whole; the optional model is set
    /// when a specific participant caused the failure
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        model: Option<ModelId>,
        reason: String,
    },
}

impl ProgressEvent {
    /// Event for a transcript entry arriving from the scheduler.
    pub fn response(entry: &ModelResponse) -> Self {
        ProgressEvent::Response {
            model: entry.model.clone(),
            round: entry.round,
            content: entry.content.clone(),
            is_revision: entry.is_revision,
            status: entry.status,
        }
    }

    /// Event carrying the consensus report.
    pub fn consensus(report: ConsensusReport) -> Self {
        ProgressEvent::Consensus { report }
    }

    /// Terminal completion event.
    pub fn done() -> Self {
        ProgressEvent::Done { cancelled: false }
    }

    /// Terminal completion event with the cancellation marker.
    pub fn done_cancelled() -> Self {
        ProgressEvent::Done { cancelled: true }
    }

    /// Terminal debate-wide error event.
    pub fn error(reason: impl Into<String>) -> Self {
        ProgressEvent::Error {
            model: None,
            reason: reason.into(),
        }
    }

    /// Check if this event terminates the stream
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProgressEvent::Done { .. } | ProgressEvent::Error { .. }
        )
    }
}
