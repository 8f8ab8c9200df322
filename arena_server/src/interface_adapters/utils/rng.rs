use crate::domain::ArenaBounds;
use rand::Rng;
use std::{
    sync::{
        OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Returns a process-unique, monotonically increasing identifier.
///
/// Used to correlate connection logs; not exposed to clients.
pub fn rand_id() -> u64 {
    static COUNTER: OnceLock<AtomicU64> = OnceLock::new();
    let counter = COUNTER.get_or_init(|| AtomicU64::new(now_nanos()));
    counter.fetch_add(1, Ordering::Relaxed)
}

/// Collision-free counter starting at 1, safe to share between connection tasks.
#[derive(Debug)]
pub struct IdSequence(AtomicU64);

impl IdSequence {
    pub fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Random point whose distance to every arena edge is at least `radius`.
pub fn spawn_point(bounds: ArenaBounds, radius: f64) -> (f64, f64) {
    let mut rng = rand::thread_rng();
    (
        axis_point(&mut rng, bounds.width, radius),
        axis_point(&mut rng, bounds.height, radius),
    )
}

fn axis_point(rng: &mut impl Rng, extent: f64, radius: f64) -> f64 {
    let (min, max) = (radius, extent - radius);
    if min < max {
        rng.gen_range(min..max)
    } else {
        extent / 2.0
    }
}

/// Random `#rrggbb` color tag.
pub fn random_color() -> String {
    format!("#{:06x}", rand::thread_rng().gen_range(0..0x0100_0000u32))
}
