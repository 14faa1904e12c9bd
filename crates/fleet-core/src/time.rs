//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  The wall-clock length
//! of one tick lives in [`FleetConfig::tick_period`][crate::FleetConfig::tick_period];
//! the engine itself only counts.

use std::fmt;

/// An absolute simulation tick counter.  Tick 0 is the seeded state before
/// any step has run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
