pub mod player;
pub mod projectile;

use crate::domain::state::ArenaBounds;
use player::PlayerTuning;
use projectile::ProjectileTuning;

/// Everything the simulation needs to know about the rules of the arena.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameTuning {
    pub arena: ArenaBounds,
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
}

impl GameTuning {
    /// Squared center distance below which a projectile strikes an actor.
    pub fn hit_radius_sq(&self) -> f64 {
        let r = self.player.radius + self.projectile.radius;
        r * r
    }
}
