//! Application layer for consensus
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DebateParams, SynthesisMode};
pub use ports::{
    event_sink::{ChannelEventSink, EventSink, EventStream, NullEventSink},
    provider::{GenerateOptions, ProviderAdapter, ProviderError, ProviderRegistry},
};
pub use use_cases::run_debate::{RunDebateError, RunDebateUseCase};
pub use use_cases::synthesize::{SynthesisOutcome, synthesize};
