/// Gameplay tuning for projectiles.

#[derive(Debug, Clone, Copy)]
pub struct ProjectileTuning {
    /// Projectile speed in pixels per second.
    pub speed: f64,

    /// World-space collision radius in pixels.
    pub radius: f64,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 300.0,
            radius: 3.0,
        }
    }
}
