use crate::domain::GameTuning;
use crate::interface_adapters::utils::rng::IdSequence;
use crate::use_cases::SharedWorld;

pub struct AppState {
    // The authoritative world, shared with the simulation and broadcast tasks.
    pub world: SharedWorld,
    // Rules used when spawning actors for new connections.
    pub tuning: GameTuning,
    // Actor ids handed out to new connections.
    pub actor_ids: IdSequence,
    // Per-actor outbound queue capacity.
    pub outbound_capacity: usize,
}
