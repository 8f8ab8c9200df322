// The single authoritative world model: actors, projectiles and arena bounds.

use crate::domain::state::{
    Actor, ActorId, ActorSnapshot, ArenaBounds, Projectile, ProjectileId, ProjectileSnapshot,
    WorldSnapshot,
};
use std::collections::HashMap;

/// A projectile that has been fired but not yet placed in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub owner_id: ActorId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

/// Actor and projectile storage.
///
/// Maps give O(1) lookup by id; anything whose result depends on visiting order (collision
/// scans, snapshots) goes through the sorted `actor_ids`/`projectile_ids` index instead of
/// iterating the maps directly.
pub struct World {
    actors: HashMap<ActorId, Actor>,
    projectiles: HashMap<ProjectileId, Projectile>,
    bounds: ArenaBounds,
    next_projectile_id: u64,
}

impl World {
    pub fn new(bounds: ArenaBounds) -> Self {
        Self {
            actors: HashMap::new(),
            projectiles: HashMap::new(),
            bounds,
            next_projectile_id: 1,
        }
    }

    pub fn bounds(&self) -> ArenaBounds {
        self.bounds
    }

    /// Inserts an actor, returning any previous actor with the same id.
    pub fn insert_actor(&mut self, actor: Actor) -> Option<Actor> {
        self.actors.insert(actor.id, actor)
    }

    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        self.actors.remove(&id)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Unordered iteration over actors.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    pub fn actor_ids(&self) -> Vec<ActorId> {
        let mut ids: Vec<ActorId> = self.actors.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn spawn_projectile(&mut self, shot: Shot) -> ProjectileId {
        let id = ProjectileId(self.next_projectile_id);
        self.next_projectile_id = self.next_projectile_id.wrapping_add(1);
        self.projectiles.insert(
            id,
            Projectile {
                id,
                owner_id: shot.owner_id,
                x: shot.x,
                y: shot.y,
                vx: shot.vx,
                vy: shot.vy,
            },
        );
        id
    }

    pub fn remove_projectile(&mut self, id: ProjectileId) -> Option<Projectile> {
        self.projectiles.remove(&id)
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.get(&id)
    }

    pub fn projectiles_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.values_mut()
    }

    pub fn projectile_ids(&self) -> Vec<ProjectileId> {
        let mut ids: Vec<ProjectileId> = self.projectiles.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    /// Copies every client-visible field; the result holds no references into the world.
    pub fn snapshot(&self) -> WorldSnapshot {
        let actors = self
            .actor_ids()
            .into_iter()
            .filter_map(|id| self.actors.get(&id))
            .map(ActorSnapshot::from)
            .collect();
        let projectiles = self
            .projectile_ids()
            .into_iter()
            .filter_map(|id| self.projectiles.get(&id))
            .map(ProjectileSnapshot::from)
            .collect();

        WorldSnapshot {
            actors,
            projectiles,
        }
    }
}
