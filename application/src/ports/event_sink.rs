//! Progress event port
//!
//! The engine reports debate progress through this sink. Consumers decide
//! what to do with the events (print, stream over a socket, collect for
//! assertions); the engine only guarantees ordering and exactly one
//! terminal event per debate.

use async_trait::async_trait;
use consensus_domain::ProgressEvent;
use tokio::sync::mpsc;

/// Receiver of debate progress events
///
/// `emit` must not block the debate for long; slow consumers should buffer
/// internally. Delivery failures are the sink's problem, not the engine's:
/// a sink whose downstream is gone should swallow the event.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: ProgressEvent);
}

/// Sink that discards every event
pub struct NullEventSink;

#[async_trait]
impl EventSink for NullEventSink {
    async fn emit(&self, _event: ProgressEvent) {}
}

/// Sink backed by a bounded channel
///
/// Applies backpressure up to the buffer size, then waits for the consumer.
/// Once the consuming side is dropped, events are discarded silently so a
/// disappearing subscriber cannot wedge the debate.
pub struct ChannelEventSink {
    tx: mpsc::Sender<ProgressEvent>,
}

impl ChannelEventSink {
    /// Create a sink and the stream it feeds.
    pub fn bounded(buffer: usize) -> (Self, EventStream) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { tx }, EventStream { rx })
    }
}

#[async_trait]
impl EventSink for ChannelEventSink {
    async fn emit(&self, event: ProgressEvent) {
        // Err here means the receiver hung up; nothing left to notify.
        let _ = self.tx.send(event).await;
    }
}

/// Consumer end of a [`ChannelEventSink`]
pub struct EventStream {
    rx: mpsc::Receiver<ProgressEvent>,
}

impl EventStream {
    /// Next event, or `None` once the debate has shut its sink.
    pub async fn next(&mut self) -> Option<ProgressEvent> {
        self.rx.recv().await
    }

    /// Drain whatever has already been emitted without waiting.
    pub fn drain_ready(&mut self) -> Vec<ProgressEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}
