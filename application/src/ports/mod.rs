//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod event_sink;
pub mod provider;

pub use event_sink::{ChannelEventSink, EventSink, EventStream, NullEventSink};
pub use provider::{
    DEFAULT_MAX_TOKENS, GenerateOptions, ProviderAdapter, ProviderError, ProviderRegistry,
};
