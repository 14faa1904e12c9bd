//! Deterministic simulation RNG wrapper.
//!
//! # Determinism strategy
//!
//! The engine owns exactly one `SimRng`, seeded from
//! [`FleetConfig::seed`][crate::FleetConfig::seed], and draws from it in a
//! fixed order: seeding (positions, states, then the static partition), then
//! per tick in registry order (jitter lat, jitter lon, self-start roll).
//! The same seed therefore reproduces the same fleet and the same trajectory
//! of ticks, which the tests rely on.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.  Used only behind the engine's single writer.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform offset in `[-half, half]`.  Returns `0.0` when `half <= 0`.
    #[inline]
    pub fn jitter(&mut self, half: f64) -> f64 {
        if half > 0.0 {
            self.0.gen_range(-half..=half)
        } else {
            0.0
        }
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
