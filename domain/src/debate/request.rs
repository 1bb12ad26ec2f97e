//! Debate request input and its validation rules.

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;
use crate::core::model::ModelId;

/// Default number of debate rounds
pub const DEFAULT_ROUNDS: u32 = 2;

/// Caller input describing one debate
///
/// # Example
///
/// ```
/// use consensus_domain::debate::DebateRequest;
/// use consensus_domain::core::model::ModelId;
///
/// let request = DebateRequest::new("Is Rust memory safe?")
///     .with_models(vec![ModelId::new("claude"), ModelId::new("gpt")])
///     .with_rounds(2);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateRequest {
    /// The question under debate (required, non-empty)
    pub question: String,
    /// Optional background the models should take into account
    #[serde(default)]
    pub context: String,
    /// Participants, in speaking order; duplicates are rejected
    pub models: Vec<ModelId>,
    /// Number of rounds to run (>= 1)
    pub rounds: u32,
}

impl DebateRequest {
    /// Creates a request with the default participants and round count.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            context: String::new(),
            models: ModelId::default_models(),
            rounds: DEFAULT_ROUNDS,
        }
    }

    /// Sets the background context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Replaces the participant set.
    pub fn with_models(mut self, models: Vec<ModelId>) -> Self {
        self.models = models;
        self
    }

    /// Sets the round count.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Validate the request against the engine's preconditions
    ///
    /// A request that fails here must be rejected before the debate enters
    /// its running state; no events are emitted for it.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.question.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "question cannot be empty".to_string(),
            ));
        }
        if self.models.is_empty() {
            return Err(DomainError::InvalidRequest(
                "at least one model must be selected".to_string(),
            ));
        }
        for (i, model) in self.models.iter().enumerate() {
            if self.models[..i].contains(model) {
                return Err(DomainError::InvalidRequest(format!(
                    "duplicate model in selection: {}",
                    model
                )));
            }
        }
        if self.rounds < 1 {
            return Err(DomainError::InvalidRequest(
                "at least one round is required".to_string(),
            ));
        }
        Ok(())
    }
}
