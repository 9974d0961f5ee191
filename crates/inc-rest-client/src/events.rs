//! Broadcast channels for cross-component notifications.
//!
//! `tokio::broadcast` based. The client owns the channels; other parts of the
//! application publish to them and subscribe to them.

use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

/// Default number of events buffered per channel before slow receivers lag
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

/// A single typed broadcast channel.
///
/// Receivers only see events published after they subscribed.
#[derive(Debug, Clone)]
pub struct EventChannel<T> {
    name: &'static str,
    tx: broadcast::Sender<T>,
}

impl<T: Clone> EventChannel<T> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { name, tx }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Publish an event, returning how many subscribers received it.
    ///
    /// Publishing with no subscribers is not an error; the event is dropped.
    pub fn publish(&self, event: T) -> usize {
        let delivered = self.tx.send(event).unwrap_or(0);
        debug!(channel = self.name, delivered, "event published");
        delivered
    }

    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// The notification channels exposed by the client
#[derive(Debug, Clone)]
pub struct EventChannels {
    pub project_created: EventChannel<bool>,
    pub dataset_created: EventChannel<bool>,
    pub optimization_created: EventChannel<bool>,
    pub benchmark_created: EventChannel<bool>,
    /// Arbitrary payload describing the change
    pub project_changed: EventChannel<Value>,
}

impl EventChannels {
    pub fn new(capacity: usize) -> Self {
        Self {
            project_created: EventChannel::new("project_created", capacity),
            dataset_created: EventChannel::new("dataset_created", capacity),
            optimization_created: EventChannel::new("optimization_created", capacity),
            benchmark_created: EventChannel::new("benchmark_created", capacity),
            project_changed: EventChannel::new("project_changed", capacity),
        }
    }
}

impl Default for EventChannels {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
