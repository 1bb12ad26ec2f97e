//! Consensus synthesis after the final round.
//!
//! Runs exactly once per debate, over the latest successful response from
//! each participant. The report always carries the deterministic overlap
//! analysis; in moderated mode one surviving model is additionally asked to
//! write the summary, with the analysis summary as fallback when that call
//! fails.

use consensus_domain::{
    ConsensusReport, DebateSession, ModelCatalog, PromptBuilder, analyze,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{DebateParams, SynthesisMode};
use crate::ports::provider::{GenerateOptions, ProviderRegistry};

/// Result of the synthesis step.
pub enum SynthesisOutcome {
    Report(ConsensusReport),
    /// Cancellation observed while the moderator call was in flight.
    Cancelled,
}

/// Produce the consensus report for a finished debate.
///
/// The caller must have verified that the transcript holds at least one
/// successful response; with an all-failed transcript there is nothing to
/// synthesize and the debate fails before this step.
pub async fn synthesize(
    session: &DebateSession,
    catalog: &ModelCatalog,
    registry: &ProviderRegistry,
    params: &DebateParams,
    token: Option<&CancellationToken>,
) -> SynthesisOutcome {
    let finals = session.final_ok_responses();
    let analysis = analyze(&finals);
    let generated_from_round = finals.iter().map(|r| r.round).max().unwrap_or(1);

    let summary = match params.synthesis {
        SynthesisMode::Heuristic => analysis.fallback_summary(session.question()),
        SynthesisMode::Moderated => {
            match moderated_summary(session, catalog, registry, params, token).await {
                ModeratorCall::Summary(text) => text,
                ModeratorCall::Unavailable => analysis.fallback_summary(session.question()),
                ModeratorCall::Cancelled => return SynthesisOutcome::Cancelled,
            }
        }
    };

    let report = ConsensusReport::new(summary, generated_from_round)
        .with_themes(analysis.common_themes)
        .with_models_compared(analysis.models_compared)
        .with_response_lengths(analysis.response_lengths);
    SynthesisOutcome::Report(report)
}

enum ModeratorCall {
    Summary(String),
    Unavailable,
    Cancelled,
}

/// Ask the first surviving participant to moderate.
///
/// Moderator failure is not fatal; the debate already has a transcript
/// worth reporting, so any error here degrades to the heuristic summary.
async fn moderated_summary(
    session: &DebateSession,
    catalog: &ModelCatalog,
    registry: &ProviderRegistry,
    params: &DebateParams,
    token: Option<&CancellationToken>,
) -> ModeratorCall {
    let finals = session.final_ok_responses();
    let Some(moderator) = session
        .selected_models()
        .iter()
        .find(|&m| finals.iter().any(|r| &r.model == m) && registry.adapter_for(m).is_some())
    else {
        debug!("no model available to moderate; using analysis summary");
        return ModeratorCall::Unavailable;
    };

    info!(model = %moderator, "asking moderator for consensus summary");
    let prompt = PromptBuilder::for_synthesis(session, catalog);
    let options = GenerateOptions {
        max_tokens: params.max_tokens,
    };
    let Some(adapter) = registry.adapter_for(moderator) else {
        return ModeratorCall::Unavailable;
    };

    let call = tokio::time::timeout(
        params.per_call_timeout,
        adapter.generate(&prompt, &options),
    );
    let result = if let Some(token) = token {
        tokio::select! {
            biased;
            _ = token.cancelled() => return ModeratorCall::Cancelled,
            result = call => result,
        }
    } else {
        call.await
    };

    match result {
        Ok(Ok(text)) if !text.trim().is_empty() => ModeratorCall::Summary(text),
        Ok(Ok(_)) => {
            warn!(model = %moderator, "moderator returned empty summary");
            ModeratorCall::Unavailable
        }
        Ok(Err(error)) => {
            warn!(model = %moderator, "moderator call failed: {}", error);
            ModeratorCall::Unavailable
        }
        Err(_) => {
            warn!(model = %moderator, "moderator call timed out");
            ModeratorCall::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::provider::{ProviderAdapter, ProviderError};
    use async_trait::async_trait;
    use consensus_domain::{DebateRequest, ModelId, ModelResponse, Prompt};
    use std::sync::Arc;

    struct FixedProvider {
        reply: &'static str,
    }

    #[async_trait]
    impl ProviderAdapter for FixedProvider {
        async fn generate(
            &self,
            _prompt: &Prompt,
            _options: &GenerateOptions,
        ) -> Result<String, ProviderError> {
            Ok(self.reply.to_string())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl ProviderAdapter for FailingProvider {
        async fn generate(
            &self,
            _prompt: &Prompt,
            _options: &GenerateOptions,
        ) -> Result<String, ProviderError> {
            Err(ProviderError::RequestFailed("down".to_string()))
        }
    }

    fn session_with_two_rounds() -> DebateSession {
        let request = DebateRequest::new("Does Rust need a GC?")
            .with_models(vec![ModelId::new("claude"), ModelId::new("gpt")]);
        let mut session = DebateSession::new(request);
        session.record(ModelResponse::ok(
            ModelId::new("claude"),
            1,
            "No, ownership handles memory reclamation",
        ));
        session.record(ModelResponse::ok(
            ModelId::new("gpt"),
            1,
            "No, ownership makes collection unnecessary",
        ));
        session.record(ModelResponse::ok(
            ModelId::new("claude"),
            2,
            "Still no, ownership handles memory reclamation cleanly",
        ));
        session.record(ModelResponse::failed(
            ModelId::new("gpt"),
            2,
            "Error: connection reset",
        ));
        session
    }

    #[tokio::test]
    async fn test_heuristic_mode_never_calls_a_provider() {
        let session = session_with_two_rounds();
        let registry = ProviderRegistry::new();
        let params = DebateParams::default().with_synthesis(SynthesisMode::Heuristic);

        let outcome = synthesize(
            &session,
            &ModelCatalog::builtin(),
            &registry,
            &params,
            None,
        )
        .await;

        let SynthesisOutcome::Report(report) = outcome else {
            panic!("expected report");
        };
        assert_eq!(report.models_compared.len(), 2);
        assert!(report.common_themes.contains(&"ownership".to_string()));
        assert_eq!(report.generated_from_round, 2);
    }

    #[tokio::test]
    async fn test_moderated_mode_uses_provider_summary() {
        let session = session_with_two_rounds();
        let registry = ProviderRegistry::new().with_adapter(
            ModelId::new("claude"),
            Arc::new(FixedProvider {
                reply: "Both models agree a GC is unnecessary.",
            }),
        );

        let outcome = synthesize(
            &session,
            &ModelCatalog::builtin(),
            &registry,
            &DebateParams::default(),
            None,
        )
        .await;

        let SynthesisOutcome::Report(report) = outcome else {
            panic!("expected report");
        };
        assert_eq!(report.summary, "Both models agree a GC is unnecessary.");
        // Heuristic fields ride along even with a moderated summary.
        assert!(!report.response_lengths.is_empty());
    }

    #[tokio::test]
    async fn test_moderator_failure_falls_back_to_analysis_summary() {
        let session = session_with_two_rounds();
        let registry = ProviderRegistry::new()
            .with_adapter(ModelId::new("claude"), Arc::new(FailingProvider))
            .with_adapter(ModelId::new("gpt"), Arc::new(FailingProvider));

        let outcome = synthesize(
            &session,
            &ModelCatalog::builtin(),
            &registry,
            &DebateParams::default(),
            None,
        )
        .await;

        let SynthesisOutcome::Report(report) = outcome else {
            panic!("expected report");
        };
        assert!(!report.summary.is_empty());
        assert_ne!(report.summary, "down");
    }

    #[tokio::test]
    async fn test_cancellation_during_moderator_call() {
        let session = session_with_two_rounds();
        let registry = ProviderRegistry::new().with_adapter(
            ModelId::new("claude"),
            Arc::new(FixedProvider { reply: "summary" }),
        );
        let token = CancellationToken::new();
        token.cancel();

        let outcome = synthesize(
            &session,
            &ModelCatalog::builtin(),
            &registry,
            &DebateParams::default(),
            Some(&token),
        )
        .await;

        assert!(matches!(outcome, SynthesisOutcome::Cancelled));
    }
}
