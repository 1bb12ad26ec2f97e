//! Debate domain
//!
//! Entities and value objects for one multi-model debate: the caller's
//! request, the session with its running transcript, per-round responses,
//! the final consensus report, and the progress events streamed to the
//! consumer.
//!
//! # Lifecycle
//!
//! ```text
//! Pending ──> Running(round 1..N) ──> Synthesizing ──> Completed
//!    │               │                     │
//!    └───────────────┴─────────────────────┴──> Cancelled / Failed
//! ```
//!
//! Every transition is observable through [`ProgressEvent`]s; the stream
//! ends exactly once, with `Done` or a terminal `Error`.

pub mod events;
pub mod report;
pub mod request;
pub mod response;
pub mod session;

// Re-export main types
pub use events::ProgressEvent;
pub use report::ConsensusReport;
pub use request::{DEFAULT_ROUNDS, DebateRequest};
pub use response::{ModelResponse, ResponseStatus};
pub use session::{DebateSession, DebateStatus};
