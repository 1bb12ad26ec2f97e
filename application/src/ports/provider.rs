//! Provider adapter port
//!
//! Defines the interface the engine uses to obtain model output. One
//! adapter serves one model; vendor protocol, auth, and key handling stay
//! behind the implementation.

use std::sync::Arc;

use async_trait::async_trait;
use consensus_domain::{ModelId, Prompt};
use thiserror::Error;

/// Default generation budget per call, in tokens
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Errors that can occur during a provider call
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Transport closed")]
    TransportClosed,

    #[error("Other error: {0}")]
    Other(String),
}

/// Per-call generation options
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Adapter for one model backend
///
/// Implementations (adapters) live in the infrastructure layer or with the
/// caller. Calls must be abort-safe: the engine abandons a call by dropping
/// its future, and expects no engine-visible side effects from the
/// abandoned call.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Produce a completion for the prompt
    async fn generate(
        &self,
        prompt: &Prompt,
        options: &GenerateOptions,
    ) -> Result<String, ProviderError>;
}

/// Ordered mapping of participants to their adapters
///
/// Scheduling a model that has no registered adapter is not an error at
/// registry level; the scheduler records it as a failed call so one
/// misconfigured participant cannot abort the debate.
#[derive(Default)]
pub struct ProviderRegistry {
    adapters: Vec<(ModelId, Arc<dyn ProviderAdapter>)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter, replacing any previous one for the same model.
    pub fn register(&mut self, model: ModelId, adapter: Arc<dyn ProviderAdapter>) {
        match self.adapters.iter_mut().find(|(m, _)| m == &model) {
            Some((_, existing)) => *existing = adapter,
            None => self.adapters.push((model, adapter)),
        }
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_adapter(mut self, model: ModelId, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.register(model, adapter);
        self
    }

    /// Adapter serving a model, if one is registered
    pub fn adapter_for(&self, model: &ModelId) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters
            .iter()
            .find(|(m, _)| m == model)
            .map(|(_, a)| Arc::clone(a))
    }

    /// Registered models, in registration order
    pub fn models(&self) -> Vec<ModelId> {
        self.adapters.iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
