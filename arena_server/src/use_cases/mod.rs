// Use cases layer: application workflows for the arena server.

pub mod broadcast;
pub mod connection;
pub mod input;
pub mod simulation;

use crate::domain::World;
use std::sync::Arc;
use tokio::sync::RwLock;

pub use broadcast::{FanOut, fan_out};
pub use input::{ActorAction, FireRequest};
pub use simulation::{TickReport, simulation_task, step};

/// The world behind its single reader/writer lock.
pub type SharedWorld = Arc<RwLock<World>>;
