use crate::domain::state::{Actor, ActorId, ProjectileId};
use crate::domain::tuning::GameTuning;
use crate::domain::world::{Shot, World};
use std::collections::HashSet;
use std::time::Instant;
use tracing::info;

/// Outcome of one projectile striking an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub projectile_id: ProjectileId,
    pub victim_id: ActorId,
    pub shooter_id: ActorId,
    pub victim_lives: i32,
    // None when the shooter disconnected before the hit landed.
    pub shooter_score: Option<u32>,
}

/// Consumes a pending fire request once the cooldown has elapsed.
///
/// The request stays pending while the cooldown is running, so it fires on the first tick
/// the actor is allowed to.
pub fn try_fire(a: &mut Actor, now: Instant, tuning: &GameTuning) -> Option<Shot> {
    if !a.wants_to_fire {
        return None;
    }
    let ready = a.last_fired_at.is_none_or(|last| {
        now.saturating_duration_since(last) >= tuning.player.fire_cooldown
    });
    if !ready {
        return None;
    }

    a.wants_to_fire = false;
    a.last_fired_at = Some(now);

    let dir_x = a.aim_angle.cos();
    let dir_y = a.aim_angle.sin();
    Some(Shot {
        owner_id: a.id,
        // Spawn at the actor center; the owner is excluded from hit checks.
        x: a.x,
        y: a.y,
        vx: dir_x * tuning.projectile.speed,
        vy: dir_y * tuning.projectile.speed,
    })
}

/// Integrates projectile movement and returns the ones that left the arena.
pub fn advance(world: &mut World, dt: f64) -> HashSet<ProjectileId> {
    let bounds = world.bounds();
    let mut out_of_bounds = HashSet::new();
    for p in world.projectiles_mut() {
        p.x += p.vx * dt;
        p.y += p.vy * dt;
        if !bounds.contains(p.x, p.y) {
            out_of_bounds.insert(p.id);
        }
    }
    out_of_bounds
}

/// Projectile vs actor collision, naive O(P*A) in ascending id order.
///
/// Projectiles in `spent` are skipped; every projectile that hits is added to it. Touching
/// exactly at the combined radius is not a hit.
pub fn resolve_hits(
    world: &mut World,
    spent: &mut HashSet<ProjectileId>,
    tuning: &GameTuning,
) -> Vec<Hit> {
    let hit_radius_sq = tuning.hit_radius_sq();
    let actor_ids = world.actor_ids();
    let mut hits = Vec::new();

    for projectile_id in world.projectile_ids() {
        if spent.contains(&projectile_id) {
            continue;
        }
        let Some(p) = world.projectile(projectile_id) else {
            continue;
        };
        let (px, py, owner_id) = (p.x, p.y, p.owner_id);

        let victim_id = actor_ids.iter().copied().find(|&id| {
            id != owner_id
                && world.actor(id).is_some_and(|a| {
                    let dx = a.x - px;
                    let dy = a.y - py;
                    dx * dx + dy * dy < hit_radius_sq
                })
        });
        let Some(victim_id) = victim_id else {
            continue;
        };

        spent.insert(projectile_id);
        let mut victim_lives = 0;
        if let Some(victim) = world.actor_mut(victim_id) {
            victim.lives -= 1;
            victim_lives = victim.lives;
        }
        let shooter_score = world.actor_mut(owner_id).map(|shooter| {
            shooter.score += 1;
            shooter.score
        });

        info!(
            projectile_id = %projectile_id,
            victim_id = %victim_id,
            shooter_id = %owner_id,
            victim_lives,
            shooter_score,
            "actor hit"
        );
        hits.push(Hit {
            projectile_id,
            victim_id,
            shooter_id: owner_id,
            victim_lives,
            shooter_score,
        });
    }

    hits
}
