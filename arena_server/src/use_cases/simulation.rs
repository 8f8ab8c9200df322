// Fixed-rate authoritative simulation over the shared world.

use super::SharedWorld;
use crate::domain::systems::movement::{self, MovementConfig};
use crate::domain::systems::projectiles::{self, Hit};
use crate::domain::{GameTuning, ProjectileId, World};
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

/// What happened during a single tick.
#[derive(Debug, Default)]
pub struct TickReport {
    pub fired: Vec<ProjectileId>,
    pub hits: Vec<Hit>,
    pub removed: usize,
}

impl TickReport {
    /// True when nothing was fired, hit or removed.
    pub fn is_quiet(&self) -> bool {
        self.fired.is_empty() && self.hits.is_empty() && self.removed == 0
    }
}

pub async fn simulation_task(world: SharedWorld, tick_interval: Duration, tuning: GameTuning) {
    // Drive the fixed-step game loop at the configured tick rate.
    let mut interval = tokio::time::interval(tick_interval);
    // A late tick integrates the real elapsed time instead of bursting to catch up.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut last_tick = Instant::now();
    loop {
        interval.tick().await;

        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f64();
        last_tick = now;

        let report = {
            let mut guard = world.write().await;
            step(&mut guard, dt, now, &tuning)
        };
        if !report.is_quiet() {
            trace!(
                fired = report.fired.len(),
                hits = report.hits.len(),
                removed = report.removed,
                "simulation tick"
            );
        }
    }
}

/// Advances the world by `dt` seconds.
///
/// Phases run strictly in order: actors (movement, aim, firing), projectile integration,
/// collision resolution, removal. Shots fired this tick are placed after removal, so a new
/// projectile is first moved and collision-tested on the next tick.
pub fn step(world: &mut World, dt: f64, now: Instant, tuning: &GameTuning) -> TickReport {
    let cfg = MovementConfig::new(&tuning.player, world.bounds());
    let mut shots = Vec::new();

    for id in world.actor_ids() {
        let Some(actor) = world.actor_mut(id) else {
            continue;
        };
        movement::tick_actor(actor, dt, cfg);
        if let Some(shot) = projectiles::try_fire(actor, now, tuning) {
            shots.push((shot, actor.aim_angle));
        }
    }

    let mut spent = projectiles::advance(world, dt);
    let hits = projectiles::resolve_hits(world, &mut spent, tuning);

    let removed = spent.len();
    for id in spent {
        world.remove_projectile(id);
    }

    let fired = shots
        .into_iter()
        .map(|(shot, angle)| {
            let projectile_id = world.spawn_projectile(shot);
            debug!(
                actor_id = %shot.owner_id,
                projectile_id = %projectile_id,
                angle,
                "projectile fired"
            );
            projectile_id
        })
        .collect();

    TickReport {
        fired,
        hits,
        removed,
    }
}
