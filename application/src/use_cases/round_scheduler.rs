//! Concurrent fan-out for one debate round.
//!
//! Every active model is called in parallel; each call resolves to exactly
//! one transcript entry. Timeouts and provider errors become `TimedOut` and
//! `Failed` entries instead of aborting the round, so a round always
//! completes once every scheduled call has resolved.

use std::collections::HashMap;

use consensus_domain::{ModelId, ModelResponse, Prompt};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::DebateParams;
use crate::ports::provider::{GenerateOptions, ProviderError, ProviderRegistry};

/// What the collection loop produced next.
pub enum Arrival {
    /// One call resolved into a transcript entry.
    Response(ModelResponse),
    /// Cancellation observed; all in-flight calls have been aborted.
    Cancelled,
}

/// In-flight provider calls for a single round.
pub struct RoundScheduler {
    join_set: JoinSet<(ModelId, Result<String, ProviderError>)>,
    // Task id to model, so panicked tasks still yield a Failed entry.
    task_models: HashMap<tokio::task::Id, ModelId>,
    round: u32,
    timeout_secs: u64,
}

impl RoundScheduler {
    /// Spawn one provider call per `(model, prompt)` pair.
    ///
    /// A model with no registered adapter resolves immediately as a failed
    /// call; it still occupies its slot in the round.
    pub fn fan_out(
        registry: &ProviderRegistry,
        calls: Vec<(ModelId, Prompt)>,
        params: &DebateParams,
        round: u32,
    ) -> Self {
        let timeout = params.per_call_timeout;
        let options = GenerateOptions {
            max_tokens: params.max_tokens,
        };

        let mut join_set = JoinSet::new();
        let mut task_models = HashMap::new();

        for (model, prompt) in calls {
            debug!(model = %model, round, "scheduling provider call");
            let handle = match registry.adapter_for(&model) {
                Some(adapter) => {
                    let task_model = model.clone();
                    let options = options.clone();
                    join_set.spawn(async move {
                        let result =
                            match tokio::time::timeout(timeout, adapter.generate(&prompt, &options))
                                .await
                            {
                                Ok(result) => result,
                                Err(_) => Err(ProviderError::Timeout),
                            };
                        (task_model, result)
                    })
                }
                None => {
                    let task_model = model.clone();
                    join_set.spawn(async move {
                        (
                            task_model,
                            Err(ProviderError::Unavailable(
                                "no adapter registered".to_string(),
                            )),
                        )
                    })
                }
            };
            task_models.insert(handle.id(), model);
        }

        Self {
            join_set,
            task_models,
            round,
            timeout_secs: timeout.as_secs(),
        }
    }

    /// Calls still in flight.
    pub fn remaining(&self) -> usize {
        self.join_set.len()
    }

    /// Wait for the next call to resolve.
    ///
    /// Returns `None` once every scheduled call has produced its entry. If
    /// the token fires first, all remaining calls are aborted and their
    /// results discarded; no entries are produced for them.
    pub async fn next(&mut self, token: Option<&CancellationToken>) -> Option<Arrival> {
        loop {
            let joined = if let Some(token) = token {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        self.join_set.abort_all();
                        return Some(Arrival::Cancelled);
                    }
                    joined = self.join_set.join_next_with_id() => joined,
                }
            } else {
                self.join_set.join_next_with_id().await
            };

            let entry = match joined? {
                Ok((id, (model, result))) => {
                    self.task_models.remove(&id);
                    match result {
                        Ok(content) => ModelResponse::ok(model, self.round, content),
                        Err(ProviderError::Timeout) => {
                            ModelResponse::timed_out(model, self.round, self.timeout_secs)
                        }
                        Err(error) => {
                            ModelResponse::failed(model, self.round, format!("Error: {}", error))
                        }
                    }
                }
                Err(join_error) => {
                    let Some(model) = self.task_models.remove(&join_error.id()) else {
                        continue;
                    };
                    warn!(model = %model, round = self.round, "provider task aborted: {}", join_error);
                    ModelResponse::failed(
                        model,
                        self.round,
                        format!("Error: provider task aborted: {}", join_error),
                    )
                }
            };
            return Some(Arrival::Response(entry));
        }
    }
}
