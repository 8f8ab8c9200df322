// Per-actor bounded outbound queue with drop-on-full delivery.

use axum::extract::ws::Utf8Bytes;
use tokio::sync::mpsc::{self, error::TrySendError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    /// Queue is at capacity; the message was dropped.
    Full,
    /// The consumer is gone.
    Closed,
}

/// Sending half of an actor's outbound queue.
///
/// The actor record holds the only sender, so removing the actor from the world closes the
/// queue and lets the outbound pump finish.
#[derive(Debug)]
pub struct OutboundQueue {
    tx: mpsc::Sender<Utf8Bytes>,
}

impl OutboundQueue {
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<Utf8Bytes>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Enqueues without waiting.
    pub fn offer(&self, message: Utf8Bytes) -> Result<(), DeliveryError> {
        self.tx.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::Full,
            TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }
}
