use std::time::Duration;

/// Gameplay tuning for player-controlled actors.
///
/// Keep this separate from runtime/server configuration (tick rates, buffer sizes, etc.).
#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Axis-aligned movement speed in pixels per second.
    pub speed: f64,

    /// World-space collision radius in pixels (also the clamp margin at arena edges).
    pub radius: f64,

    /// Lives a freshly spawned actor starts with.
    pub initial_lives: i32,

    /// Minimum time between two shots of the same actor.
    pub fire_cooldown: Duration,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 150.0,
            radius: 15.0,
            initial_lives: 15,
            fire_cooldown: Duration::from_millis(500),
        }
    }
}
