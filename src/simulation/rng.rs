//! Random number stream shared by every stochastic operator.
//!
//! The whole simulation draws from a single seedable stream. Draw order is
//! part of reproducibility: the same sequence of calls on the same seed yields
//! the same weights, mutations, parents and obstacle gaps.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random number generator used by the simulation.
pub type SimRng = ChaCha8Rng;

/// Creates the simulation stream.
///
/// With `None` a fresh seed is drawn from the OS and logged so the run can be
/// replayed with `Some(seed)`.
pub fn from_seed(seed: Option<u64>) -> SimRng {
    let seed = seed.unwrap_or_else(|| {
        let seed = rand::random::<u64>();
        log::info!("No seed configured, using {}", seed);
        seed
    });
    log::debug!("Seeding simulation stream with {}", seed);
    SimRng::seed_from_u64(seed)
}

/// Draws a uniform value in `[0, 1)`.
#[inline]
pub fn unit<R: Rng>(rng: &mut R) -> f32 {
    rng.random::<f32>()
}

/// Draws a uniform value in `[-scale, scale)`.
#[inline]
pub fn symmetric<R: Rng>(rng: &mut R, scale: f32) -> f32 {
    (unit(rng) * 2.0 - 1.0) * scale
}
