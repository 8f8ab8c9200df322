// Non-blocking fan-out of one serialized message to every connected actor.

use crate::domain::{DeliveryError, World};
use axum::extract::ws::Utf8Bytes;
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FanOut {
    pub delivered: usize,
    pub dropped: usize,
    pub closed: usize,
}

/// Offers `message` to each actor's outbound queue without waiting.
///
/// A full queue loses this message only; nothing is retried.
pub fn fan_out(world: &World, message: &Utf8Bytes) -> FanOut {
    let mut report = FanOut::default();
    for actor in world.actors() {
        match actor.outbound.offer(message.clone()) {
            Ok(()) => report.delivered += 1,
            Err(DeliveryError::Full) => {
                report.dropped += 1;
                warn!(actor_id = %actor.id, "outbound queue full; dropping message");
            }
            Err(DeliveryError::Closed) => {
                // Writer already gone; the reader removes the actor shortly.
                report.closed += 1;
                debug!(actor_id = %actor.id, "outbound queue closed");
            }
        }
    }
    report
}
