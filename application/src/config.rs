//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as per-call timeouts and the synthesis strategy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::provider::DEFAULT_MAX_TOKENS;

/// How the consensus report is produced after the final round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisMode {
    /// Ask one of the surviving models to moderate; fall back to the
    /// heuristic summary if that call fails.
    #[default]
    Moderated,
    /// Deterministic word-overlap analysis only, no extra provider call.
    Heuristic,
}

/// Debate loop control parameters.
///
/// Controls timeouts, generation budgets, and event delivery. These are
/// application-layer concerns, not domain policy: the transcript rules stay
/// the same whatever values are used here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateParams {
    /// Maximum time to wait for one provider call before recording a timeout.
    pub per_call_timeout: Duration,
    /// Upper bound on generated tokens per call.
    pub max_tokens: u32,
    /// Strategy for the final consensus report.
    pub synthesis: SynthesisMode,
    /// Buffer size for the progress event channel.
    pub event_buffer: usize,
}

impl Default for DebateParams {
    fn default() -> Self {
        Self {
            per_call_timeout: Duration::from_secs(60),
            max_tokens: DEFAULT_MAX_TOKENS,
            synthesis: SynthesisMode::default(),
            event_buffer: 64,
        }
    }
}

impl DebateParams {
    // ==================== Builder Methods ====================

    pub fn with_per_call_timeout(mut self, timeout: Duration) -> Self {
        self.per_call_timeout = timeout;
        self
    }

    /// Convenience for configuration surfaces that speak in whole seconds.
    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        self.with_per_call_timeout(Duration::from_secs(seconds))
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_synthesis(mut self, mode: SynthesisMode) -> Self {
        self.synthesis = mode;
        self
    }

    pub fn with_event_buffer(mut self, buffer: usize) -> Self {
        self.event_buffer = buffer;
        self
    }

    /// Timeout in whole seconds, as reported in timed-out transcript entries.
    pub fn timeout_seconds(&self) -> u64 {
        self.per_call_timeout.as_secs()
    }
}
