//! Run Debate use case
//!
//! Drives the full debate lifecycle: request validation, concurrent rounds,
//! consensus synthesis, and progress events. The session is the single
//! source of truth; every status change and transcript append goes through
//! it, and an optional watch channel publishes each snapshot for observers
//! that need the current state without consuming the event stream.

use std::sync::Arc;

use consensus_domain::{
    DebateRequest, DebateSession, DebateStatus, DomainError, ModelCatalog, ModelId, ProgressEvent,
    Prompt, PromptBuilder,
};
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::DebateParams;
use crate::ports::event_sink::EventSink;
use crate::ports::provider::ProviderRegistry;
use crate::use_cases::round_scheduler::{Arrival, RoundScheduler};
use crate::use_cases::synthesize::{SynthesisOutcome, synthesize};

const OPENING_ROUND_FAILED: &str = "all models failed in the opening round";
const NOTHING_TO_SYNTHESIZE: &str = "no successful responses to synthesize";

/// Errors that reject a debate before it starts running.
///
/// Everything after validation is expressed through the session status and
/// the event stream rather than through this enum; a failed or cancelled
/// debate still returns its session so callers can inspect the transcript.
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<DomainError> for RunDebateError {
    fn from(error: DomainError) -> Self {
        RunDebateError::InvalidRequest(error.to_string())
    }
}

/// Use case for running a full debate
pub struct RunDebateUseCase {
    registry: Arc<ProviderRegistry>,
    catalog: ModelCatalog,
    params: DebateParams,
    cancellation_token: Option<CancellationToken>,
    state_tx: Option<watch::Sender<DebateSession>>,
}

impl RunDebateUseCase {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            catalog: ModelCatalog::builtin(),
            params: DebateParams::default(),
            cancellation_token: None,
            state_tx: None,
        }
    }

    pub fn with_catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_params(mut self, params: DebateParams) -> Self {
        self.params = params;
        self
    }

    /// Enable cooperative cancellation.
    ///
    /// Cancelling the token aborts in-flight provider calls; the debate
    /// finishes with `Cancelled` status and a final cancellation marker on
    /// the event stream.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Publish a session snapshot after every mutation.
    pub fn with_state_channel(mut self, tx: watch::Sender<DebateSession>) -> Self {
        self.state_tx = Some(tx);
        self
    }

    /// Execute the debate to a terminal state.
    ///
    /// Returns `Err` only when the request is rejected up front; a debate
    /// that ran returns `Ok` with terminal status `Completed`, `Cancelled`,
    /// or `Failed` on the session.
    pub async fn execute(
        &self,
        request: DebateRequest,
        events: &dyn EventSink,
    ) -> Result<DebateSession, RunDebateError> {
        request.validate()?;

        let mut session = DebateSession::new(request);
        info!(
            debate = %session.id(),
            models = session.selected_models().len(),
            rounds = session.rounds_requested(),
            "starting debate"
        );

        session.set_status(DebateStatus::Running);
        self.publish(&session);

        let token = self.cancellation_token.as_ref();

        for round in 1..=session.rounds_requested() {
            if token.is_some_and(|t| t.is_cancelled()) {
                return Ok(self.finish_cancelled(session, events).await);
            }

            // Participation is derived from the transcript: a model that
            // failed or timed out in two consecutive rounds is out.
            let active = session.active_models();
            if active.is_empty() {
                warn!(
                    debate = %session.id(),
                    round,
                    "no active models remain, skipping remaining rounds"
                );
                break;
            }

            session.start_round(round);
            self.publish(&session);
            debug!(round, active = active.len(), "fanning out round");

            let calls: Vec<(ModelId, Prompt)> = active
                .iter()
                .map(|model| {
                    (
                        model.clone(),
                        PromptBuilder::for_round(&session, &self.catalog, round, model),
                    )
                })
                .collect();

            let mut scheduler = RoundScheduler::fan_out(&self.registry, calls, &self.params, round);
            while let Some(arrival) = scheduler.next(token).await {
                match arrival {
                    Arrival::Response(entry) => {
                        let event = ProgressEvent::response(&entry);
                        session.record(entry);
                        self.publish(&session);
                        events.emit(event).await;
                    }
                    Arrival::Cancelled => {
                        return Ok(self.finish_cancelled(session, events).await);
                    }
                }
            }

            let entries = session.responses_for_round(round);
            let ok_count = entries.iter().filter(|e| e.is_ok()).count();
            info!(round, ok = ok_count, total = entries.len(), "round complete");

            // A later all-failed round still leaves earlier material to
            // synthesize; only an all-failed opening round is fatal.
            if round == 1 && ok_count == 0 {
                return Ok(self.finish_failed(session, OPENING_ROUND_FAILED, events).await);
            }
        }

        if token.is_some_and(|t| t.is_cancelled()) {
            return Ok(self.finish_cancelled(session, events).await);
        }

        session.set_status(DebateStatus::Synthesizing);
        self.publish(&session);

        if !session.has_any_ok() {
            return Ok(self
                .finish_failed(session, NOTHING_TO_SYNTHESIZE, events)
                .await);
        }

        match synthesize(&session, &self.catalog, &self.registry, &self.params, token).await {
            SynthesisOutcome::Report(report) => {
                session.attach_report(report.clone());
                self.publish(&session);
                events.emit(ProgressEvent::consensus(report)).await;

                session.set_status(DebateStatus::Completed);
                self.publish(&session);
                events.emit(ProgressEvent::done()).await;
                info!(debate = %session.id(), "debate completed");
                Ok(session)
            }
            SynthesisOutcome::Cancelled => Ok(self.finish_cancelled(session, events).await),
        }
    }

    async fn finish_cancelled(
        &self,
        mut session: DebateSession,
        events: &dyn EventSink,
    ) -> DebateSession {
        info!(debate = %session.id(), "debate cancelled");
        session.set_status(DebateStatus::Cancelled);
        self.publish(&session);
        events.emit(ProgressEvent::done_cancelled()).await;
        session
    }

    async fn finish_failed(
        &self,
        mut session: DebateSession,
        reason: &str,
        events: &dyn EventSink,
    ) -> DebateSession {
        warn!(debate = %session.id(), reason, "debate failed");
        session.set_status(DebateStatus::Failed);
        self.publish(&session);
        events.emit(ProgressEvent::error(reason)).await;
        session
    }

    fn publish(&self, session: &DebateSession) {
        if let Some(tx) = &self.state_tx {
            tx.send_replace(session.clone());
        }
    }
}
