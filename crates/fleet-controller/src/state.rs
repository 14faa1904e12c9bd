//! State the controller holds between events.

use fleet_core::{RideAction, RideState, VehicleId};
use fleet_registry::{FleetSnapshot, Vehicle};

/// Last-known snapshot, the selected vehicle and the busy flag.
///
/// Lives behind one mutex in [`FleetController`][crate::FleetController];
/// every method here runs with that lock held, so a poll update can never
/// interleave with an optimistic update or a rollback.
#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    pub snapshot: FleetSnapshot,
    /// Copy of the selected vehicle as of the last refresh.  Left stale
    /// when a snapshot no longer contains it.
    pub selected: Option<Vehicle>,
    pub busy:     bool,
}

impl ControllerState {
    /// Replace the snapshot and refresh the selection by id.
    pub fn accept(&mut self, snapshot: FleetSnapshot) {
        self.snapshot = snapshot;
        self.refresh_selection();
    }

    /// Select `id` from the held snapshot.  Returns `false` (selection
    /// unchanged) if the snapshot has no such vehicle.
    pub fn select(&mut self, id: &VehicleId) -> bool {
        match self.snapshot.get(id) {
            Some(v) => {
                self.selected = Some(v.clone());
                true
            }
            None => false,
        }
    }

    pub fn selected_id(&self) -> Option<&VehicleId> {
        self.selected.as_ref().map(Vehicle::id)
    }

    /// The action the selected vehicle currently offers.
    pub fn available_action(&self) -> Option<RideAction> {
        self.selected.as_ref().and_then(|v| v.state.available_action())
    }

    /// Set `id` to `state` in the held snapshot and in the selection.
    pub fn apply_optimistic(&mut self, id: &VehicleId, state: RideState) {
        self.snapshot.set_state(id, state);
        if let Some(selected) = self.selected.as_mut().filter(|v| v.id() == id) {
            selected.state = state;
        }
    }

    /// Put back the snapshot captured before a failed command and clear
    /// the busy flag.
    pub fn roll_back(&mut self, captured: FleetSnapshot) {
        self.snapshot = captured;
        self.refresh_selection();
        self.busy = false;
    }

    fn refresh_selection(&mut self) {
        if let Some(selected) = self.selected.as_mut() {
            if let Some(current) = self.snapshot.get(selected.id()) {
                *selected = current.clone();
            }
        }
    }
}
