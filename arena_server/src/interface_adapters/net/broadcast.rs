use crate::interface_adapters::protocol::{GameStateDto, ServerMessage, encode};
use crate::use_cases::{FanOut, SharedWorld, fan_out};

use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, trace};

pub async fn broadcast_task(world: SharedWorld, broadcast_interval: Duration) {
    let mut interval = tokio::time::interval(broadcast_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if let Some(report) = broadcast_once(&world).await {
            trace!(
                delivered = report.delivered,
                dropped = report.dropped,
                closed = report.closed,
                "game state broadcast"
            );
        }
    }
}

/// Snapshots, serializes and fans out one game state under a single read lock.
///
/// Returns None when the snapshot could not be serialized.
pub async fn broadcast_once(world: &SharedWorld) -> Option<FanOut> {
    let world = world.read().await;
    let msg = ServerMessage::GameState(GameStateDto::from(world.snapshot()));

    // Serialize once and share the same bytes with every connection.
    let bytes = match encode(&msg) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = ?e, "failed to serialize game state");
            return None;
        }
    };

    Some(fan_out(&world, &bytes))
}
