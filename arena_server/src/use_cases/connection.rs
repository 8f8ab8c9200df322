// Actor lifecycle tied to a client connection.

use super::SharedWorld;
use crate::domain::{Actor, ActorId, ActorSnapshot};
use tracing::warn;

/// Makes the actor visible to the simulation and broadcaster. Returns the new actor count.
pub async fn join(world: &SharedWorld, actor: Actor) -> usize {
    let actor_id = actor.id;
    let mut world = world.write().await;
    if world.insert_actor(actor).is_some() {
        warn!(actor_id = %actor_id, "actor id reused; previous actor replaced");
    }
    world.actor_count()
}

/// Removes the actor and closes its outbound queue before the lock is released.
pub async fn leave(world: &SharedWorld, actor_id: ActorId) -> Option<ActorSnapshot> {
    let mut world = world.write().await;
    let actor = world.remove_actor(actor_id)?;
    let last_state = ActorSnapshot::from(&actor);
    // Dropping the actor drops the queue's only sender.
    drop(actor);
    Some(last_state)
}
