// Domain-level simulation entities and input/snapshot types.

use crate::domain::outbound::OutboundQueue;
use std::fmt;
use std::time::Instant;

/// Identity of a player-controlled actor, rendered as `plr<N>` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plr{}", self.0)
    }
}

/// Identity of a projectile, rendered as `p<N>` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectileId(pub u64);

impl fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Fixed rectangular simulation area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub width: f64,
    pub height: f64,
}

impl ArenaBounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Latest movement keys and aim point received from the client.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActorInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub aim_x: f64,
    pub aim_y: f64,
}

pub struct Actor {
    pub id: ActorId,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub score: u32,
    // Not floored; see DESIGN.md on zero-lives handling.
    pub lives: i32,
    pub nickname: String,
    pub body_angle: f64,
    pub aim_angle: f64,

    // Server-only state (never serialized to clients)
    pub input: ActorInput,
    // None until the first shot, so a fresh actor can fire immediately.
    pub last_fired_at: Option<Instant>,
    pub wants_to_fire: bool,
    pub outbound: OutboundQueue,
}

impl Actor {
    pub fn new(
        id: ActorId,
        (x, y): (f64, f64),
        color: String,
        lives: i32,
        outbound: OutboundQueue,
    ) -> Self {
        Self {
            id,
            x,
            y,
            color,
            score: 0,
            lives,
            nickname: format!("Player {id}"),
            body_angle: 0.0,
            aim_angle: 0.0,
            input: ActorInput::default(),
            last_fired_at: None,
            wants_to_fire: false,
            outbound,
        }
    }

    /// Points the aim at `(x, y)` unless the point is the actor's own position.
    pub fn aim_at(&mut self, x: f64, y: f64) {
        if x != self.x || y != self.y {
            self.aim_angle = (y - self.y).atan2(x - self.x);
        }
    }
}

pub struct Projectile {
    pub id: ProjectileId,
    // Lookup key only; the owner may already have disconnected.
    pub owner_id: ActorId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub score: u32,
    pub lives: i32,
    pub nickname: String,
    pub body_angle: f64,
    pub aim_angle: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSnapshot {
    pub id: ProjectileId,
    pub owner_id: ActorId,
    pub x: f64,
    pub y: f64,
}

/// Point-in-time copy of every actor and projectile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSnapshot {
    pub actors: Vec<ActorSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
}

impl From<&Actor> for ActorSnapshot {
    fn from(a: &Actor) -> Self {
        Self {
            id: a.id,
            x: a.x,
            y: a.y,
            color: a.color.clone(),
            score: a.score,
            lives: a.lives,
            nickname: a.nickname.clone(),
            body_angle: a.body_angle,
            aim_angle: a.aim_angle,
        }
    }
}

impl From<&Projectile> for ProjectileSnapshot {
    fn from(p: &Projectile) -> Self {
        Self {
            id: p.id,
            owner_id: p.owner_id,
            x: p.x,
            y: p.y,
        }
    }
}
