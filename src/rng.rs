//! Seedable random source shared by every game.
//!
//! Games never touch `thread_rng`; they own a `GameRng` built from a `u64`
//! seed so a session can be replayed exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub type GameRng = Pcg32;

pub fn seeded(seed: u64) -> GameRng {
    Pcg32::seed_from_u64(seed)
}

/// Seed derived from the wall clock, used when none is configured.
pub fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Pick an element uniformly, `None` for an empty slice.
pub fn pick<T: Copy>(rng: &mut GameRng, items: &[T]) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[rng.gen_range(0..items.len())])
    }
}
