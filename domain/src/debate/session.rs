//! Debate session entity and status lifecycle.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::model::ModelId;
use crate::debate::report::ConsensusReport;
use crate::debate::request::DebateRequest;
use crate::debate::response::ModelResponse;

/// Lifecycle status of a debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateStatus {
    /// Created, not yet running
    Pending,
    /// Rounds in progress
    Running,
    /// All rounds finished, consensus being produced
    Synthesizing,
    /// Finished with a consensus report
    Completed,
    /// Stopped by the caller before completion
    Cancelled,
    /// Terminated without usable output
    Failed,
}

impl DebateStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DebateStatus::Pending => "pending",
            DebateStatus::Running => "running",
            DebateStatus::Synthesizing => "synthesizing",
            DebateStatus::Completed => "completed",
            DebateStatus::Cancelled => "cancelled",
            DebateStatus::Failed => "failed",
        }
    }

    /// Check if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DebateStatus::Completed | DebateStatus::Cancelled | DebateStatus::Failed
        )
    }
}

impl std::fmt::Display for DebateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a single debate (Entity)
///
/// Owns the running transcript. Mutated only by the debate controller;
/// everything else observes it through snapshots or the event stream.
///
/// The transcript is the single source of truth for the participation
/// rules: [`active_models`] derives the permanent-drop policy (a model that
/// failed or timed out in two consecutive rounds no longer participates)
/// from recorded entries instead of tracking separate scheduler state.
///
/// [`active_models`]: DebateSession::active_models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateSession {
    id: String,
    #[serde(flatten)]
    request: DebateRequest,
    status: DebateStatus,
    /// Last round that was started; 0 until the first round begins
    current_round: u32,
    transcript: Vec<ModelResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<ConsensusReport>,
}

impl DebateSession {
    /// Creates a pending session for a request.
    ///
    /// The request is assumed to have passed [`DebateRequest::validate`].
    pub fn new(request: DebateRequest) -> Self {
        let id = format!("debate-{}", chrono::Utc::now().timestamp_millis());
        Self {
            id,
            request,
            status: DebateStatus::Pending,
            current_round: 0,
            transcript: Vec::new(),
            report: None,
        }
    }

    /// Overrides the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.request.question
    }

    pub fn context(&self) -> &str {
        &self.request.context
    }

    /// Participants in selection order
    pub fn selected_models(&self) -> &[ModelId] {
        &self.request.models
    }

    pub fn rounds_requested(&self) -> u32 {
        self.request.rounds
    }

    pub fn status(&self) -> DebateStatus {
        self.status
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn transcript(&self) -> &[ModelResponse] {
        &self.transcript
    }

    pub fn report(&self) -> Option<&ConsensusReport> {
        self.report.as_ref()
    }

    pub fn set_status(&mut self, status: DebateStatus) {
        self.status = status;
    }

    /// Marks a round as started.
    pub fn start_round(&mut self, round: u32) {
        self.current_round = round;
    }

    /// Appends a transcript entry; entries are immutable once recorded.
    pub fn record(&mut self, entry: ModelResponse) {
        debug_assert!(
            !self
                .transcript
                .iter()
                .any(|e| e.model == entry.model && e.round == entry.round),
            "one entry per (model, round)"
        );
        self.transcript.push(entry);
    }

    /// Attaches the final consensus report.
    pub fn attach_report(&mut self, report: ConsensusReport) {
        self.report = Some(report);
    }

    /// All entries recorded for a round, in arrival order
    pub fn responses_for_round(&self, round: u32) -> Vec<&ModelResponse> {
        self.transcript.iter().filter(|e| e.round == round).collect()
    }

    /// Whether any entry in the whole transcript carries usable content
    pub fn has_any_ok(&self) -> bool {
        self.transcript.iter().any(|e| e.is_ok())
    }

    /// A model's most recent usable entry from any round
    pub fn latest_ok(&self, model: &ModelId) -> Option<&ModelResponse> {
        self.transcript
            .iter()
            .rev()
            .find(|e| &e.model == model && e.is_ok())
    }

    /// Latest usable entry per participant, in selection order
    ///
    /// Models that never produced usable content are omitted. This is the
    /// input set for consensus synthesis: a participant dropped mid-debate
    /// still contributes its last accepted position.
    pub fn final_ok_responses(&self) -> Vec<&ModelResponse> {
        self.request
            .models
            .iter()
            .filter_map(|m| self.latest_ok(m))
            .collect()
    }

    /// Participants not yet permanently dropped, in selection order
    ///
    /// A model is dropped once it has failed or timed out in two
    /// consecutive rounds; an accepted response resets its streak.
    pub fn active_models(&self) -> Vec<ModelId> {
        let mut streaks: HashMap<&ModelId, u32> = HashMap::new();
        let mut dropped: HashSet<&ModelId> = HashSet::new();

        let last_round = self.transcript.iter().map(|e| e.round).max().unwrap_or(0);
        for round in 1..=last_round {
            for entry in self.transcript.iter().filter(|e| e.round == round) {
                if dropped.contains(&entry.model) {
                    continue;
                }
                if entry.is_ok() {
                    streaks.insert(&entry.model, 0);
                } else {
                    let streak = streaks.entry(&entry.model).or_insert(0);
                    *streak += 1;
                    if *streak >= 2 {
                        dropped.insert(&entry.model);
                    }
                }
            }
        }

        self.request
            .models
            .iter()
            .filter(|m| !dropped.contains(m))
            .cloned()
            .collect()
    }
}
