// Input mapper: applies decoded client intent to a single actor.

use super::SharedWorld;
use crate::domain::{Actor, ActorId, ActorInput};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireRequest {
    /// Fire along a direction vector (not required to be normalized).
    Direction { x: f64, y: f64 },
    /// Fire toward a point in arena coordinates.
    AimPoint { x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActorAction {
    Rename(String),
    Steer(ActorInput),
    Fire(FireRequest),
}

pub fn apply_action(actor: &mut Actor, action: ActorAction) {
    match action {
        ActorAction::Rename(nickname) => {
            debug!(actor_id = %actor.id, %nickname, "nickname set");
            actor.nickname = nickname;
        }
        ActorAction::Steer(input) => {
            actor.input = input;
            // Eager so the new aim shows up even before the next tick.
            actor.aim_at(input.aim_x, input.aim_y);
        }
        ActorAction::Fire(request) => {
            match request {
                FireRequest::Direction { x, y } => {
                    actor.aim_angle = y.atan2(x);
                }
                FireRequest::AimPoint { x, y } => actor.aim_at(x, y),
            }
            actor.wants_to_fire = true;
        }
    }
}

/// Applies `action` under the world write lock. Returns false if the actor is gone.
pub async fn apply(world: &SharedWorld, actor_id: ActorId, action: ActorAction) -> bool {
    let mut world = world.write().await;
    match world.actor_mut(actor_id) {
        Some(actor) => {
            apply_action(actor, action);
            true
        }
        None => {
            warn!(actor_id = %actor_id, "action for unknown actor ignored");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArenaBounds, OutboundQueue, World};
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::{FRAC_PI_2, PI};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn actor_at(x: f64, y: f64) -> Actor {
        let (outbound, _rx) = OutboundQueue::bounded(1);
        Actor::new(ActorId(1), (x, y), "#010203".into(), 15, outbound)
    }

    #[test]
    fn rename_is_unchecked() {
        let mut a = actor_at(100.0, 100.0);
        let long_name = "x".repeat(300);
        apply_action(&mut a, ActorAction::Rename(long_name.clone()));
        assert_eq!(a.nickname, long_name);

        apply_action(&mut a, ActorAction::Rename(String::new()));
        assert_eq!(a.nickname, "");
    }

    #[test]
    fn steer_replaces_input_and_aims_immediately() {
        let mut a = actor_at(100.0, 100.0);
        let input = ActorInput {
            up: true,
            left: true,
            aim_x: 100.0,
            aim_y: 300.0,
            ..ActorInput::default()
        };

        apply_action(&mut a, ActorAction::Steer(input));

        assert_eq!(a.input, input);
        assert_approx_eq!(a.aim_angle, FRAC_PI_2);
        // Movement only happens in the simulation step.
        assert_eq!((a.x, a.y), (100.0, 100.0));
    }

    #[test]
    fn steer_at_own_position_keeps_aim() {
        let mut a = actor_at(100.0, 100.0);
        a.aim_angle = 0.5;
        let input = ActorInput {
            aim_x: 100.0,
            aim_y: 100.0,
            ..ActorInput::default()
        };

        apply_action(&mut a, ActorAction::Steer(input));

        assert_eq!(a.aim_angle, 0.5);
    }

    #[test]
    fn fire_direction_sets_aim_and_pending_flag() {
        let mut a = actor_at(100.0, 100.0);
        apply_action(
            &mut a,
            ActorAction::Fire(FireRequest::Direction { x: -1.0, y: 0.0 }),
        );
        assert_approx_eq!(a.aim_angle, PI);
        assert!(a.wants_to_fire);
        assert!(a.last_fired_at.is_none());
    }

    #[test]
    fn fire_at_point_aims_from_actor_position() {
        let mut a = actor_at(100.0, 100.0);
        apply_action(
            &mut a,
            ActorAction::Fire(FireRequest::AimPoint { x: 100.0, y: 0.0 }),
        );
        assert_approx_eq!(a.aim_angle, -FRAC_PI_2);
        assert!(a.wants_to_fire);
    }

    #[tokio::test]
    async fn apply_reports_missing_actor() {
        let world = Arc::new(RwLock::new(World::new(ArenaBounds::default())));
        world.write().await.insert_actor(actor_at(50.0, 50.0));

        assert!(apply(&world, ActorId(1), ActorAction::Rename("Ace".into())).await);
        assert!(!apply(&world, ActorId(2), ActorAction::Rename("Ghost".into())).await);

        let world = world.read().await;
        assert_eq!(world.actor(ActorId(1)).expect("actor").nickname, "Ace");
    }
}
