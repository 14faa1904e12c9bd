//! Per-tick change report.

use fleet_core::{Tick, VehicleId};

/// Transitions the engine made on its own during one tick.
///
/// Operator commands are not included; they happen between ticks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickReport {
    /// The tick that was just processed.
    pub tick: Tick,

    /// Idle `Waiting` vehicles that rolled a self-start.
    pub auto_started: Vec<VehicleId>,

    /// Vehicles that reached the last waypoint of their lap and stopped.
    pub completed: Vec<VehicleId>,
}

impl TickReport {
    pub fn new(tick: Tick) -> Self {
        Self { tick, ..Self::default() }
    }

    /// `true` if no vehicle changed ride state on its own this tick.
    pub fn is_quiet(&self) -> bool {
        self.auto_started.is_empty() && self.completed.is_empty()
    }
}
