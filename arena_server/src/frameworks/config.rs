use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

// Runtime/server constants (not gameplay tuning).

pub const DEFAULT_TICK_RATE: u32 = 60;
pub const DEFAULT_BROADCAST_RATE: u32 = 30;

// Small per-actor buffer: a client that falls this far behind just misses snapshots.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 32;
// Largest inbound frame accepted; anything bigger ends the connection.
pub const MAX_MESSAGE_BYTES: usize = 512;
// How long teardown waits for the outbound pump before abandoning the socket.
pub const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

pub fn http_host() -> IpAddr {
    env::var("ARENA_SERVER_HOST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

pub fn http_port() -> u16 {
    env::var("ARENA_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080)
}

pub fn http_address() -> SocketAddr {
    SocketAddr::new(http_host(), http_port())
}

pub fn tick_interval() -> Duration {
    rate_to_interval(env::var("ARENA_TICK_RATE").ok().as_deref(), DEFAULT_TICK_RATE)
}

pub fn broadcast_interval() -> Duration {
    rate_to_interval(
        env::var("ARENA_BROADCAST_RATE").ok().as_deref(),
        DEFAULT_BROADCAST_RATE,
    )
}

/// Converts a per-second rate into a period, falling back to `default` for missing, zero or
/// unparsable values.
fn rate_to_interval(value: Option<&str>, default: u32) -> Duration {
    let rate = value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|rate| *rate > 0)
        .unwrap_or(default);
    Duration::from_secs(1) / rate
}
