// Network adapter modules split by per-connection sockets vs the shared broadcaster.

pub mod broadcast;
pub mod client;

pub use broadcast::{broadcast_once, broadcast_task};
pub use client::ws_handler;
