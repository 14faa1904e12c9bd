//! Controller observer trait for recording and presentation.

use fleet_core::{RideAction, VehicleId};
use fleet_registry::FleetSnapshot;

/// Callbacks invoked by the controller's background tasks.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Calls are serialized; an observer is
/// never invoked concurrently with itself.
pub trait FleetObserver: Send {
    /// Called for every snapshot accepted from the data source.  `seq`
    /// counts snapshots from 1.
    fn on_snapshot(&mut self, _seq: u64, _snapshot: &FleetSnapshot) {}

    /// Called once a ride command has completed.  `committed` is `false`
    /// when the command failed and was rolled back.
    fn on_command(&mut self, _vehicle: &VehicleId, _action: RideAction, _committed: bool) {}

    /// Called when the snapshot stream ends.
    fn on_stream_end(&mut self) {}
}

/// A [`FleetObserver`] that does nothing.
pub struct NoopObserver;

impl FleetObserver for NoopObserver {}
