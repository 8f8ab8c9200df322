// Domain layer: core simulation types and rules.

pub mod outbound;
pub mod state;
pub mod systems;
pub mod tuning;
pub mod world;

pub use outbound::{DeliveryError, OutboundQueue};
pub use state::{
    Actor, ActorId, ActorInput, ActorSnapshot, ArenaBounds, Projectile, ProjectileId,
    ProjectileSnapshot, WorldSnapshot,
};
pub use tuning::GameTuning;
pub use world::{Shot, World};
