use crate::domain::state::{Actor, ActorInput, ArenaBounds};
use crate::domain::tuning::player::PlayerTuning;
use std::f64::consts::FRAC_1_SQRT_2;

#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    pub speed: f64, // px/s

    // Clamp box for actor centers.
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl MovementConfig {
    pub fn new(player: &PlayerTuning, bounds: ArenaBounds) -> Self {
        Self {
            speed: player.speed,
            min_x: player.radius,
            max_x: bounds.width - player.radius,
            min_y: player.radius,
            max_y: bounds.height - player.radius,
        }
    }
}

/// Velocity requested by the held direction keys.
///
/// Diagonals are scaled by 1/sqrt(2) so they are no faster than a single axis.
pub fn target_velocity(input: &ActorInput, speed: f64) -> (f64, f64) {
    let mut vx = 0.0;
    let mut vy = 0.0;
    if input.up {
        vy -= speed;
    }
    if input.down {
        vy += speed;
    }
    if input.left {
        vx -= speed;
    }
    if input.right {
        vx += speed;
    }

    if vx != 0.0 && vy != 0.0 {
        vx *= FRAC_1_SQRT_2;
        vy *= FRAC_1_SQRT_2;
    }
    (vx, vy)
}

pub fn tick_actor(a: &mut Actor, dt: f64, cfg: MovementConfig) {
    let (vx, vy) = target_velocity(&a.input, cfg.speed);

    // position integrate
    a.x += vx * dt;
    a.y += vy * dt;
    clamp_actor(a, cfg);

    a.aim_at(a.input.aim_x, a.input.aim_y);

    // Any held direction key re-derives the heading, even when opposing keys cancel out.
    let input = &a.input;
    if input.up || input.down || input.left || input.right {
        a.body_angle = vy.atan2(vx);
    }
}

fn clamp_actor(a: &mut Actor, cfg: MovementConfig) {
    // max().min() rather than clamp(): an arena narrower than the actor must not panic.
    a.x = a.x.max(cfg.min_x).min(cfg.max_x);
    a.y = a.y.max(cfg.min_y).min(cfg.max_y);
}
