//! The `FleetDataSource` trait, the seam between the controller and
//! whatever owns the fleet.

use std::future::Future;
use std::pin::Pin;

use fleet_core::{GeoPoint, VehicleId};
use fleet_registry::HistoryEvent;

use crate::{FleetStream, SourceResult};

/// Boxed, owned future returned by the asynchronous operations.
///
/// The future does not borrow the source, so callers can spawn it.
pub type SourceFuture<T> = Pin<Box<dyn Future<Output = SourceResult<T>> + Send + 'static>>;

/// Capabilities a fleet backend provides.
///
/// # Command timing
///
/// `start_ride`/`stop_ride` *issue* the command when called and return a
/// future that resolves when it has *completed*.  Callers apply any local
/// state change before awaiting.
///
/// # Thread safety
///
/// Implementations are shared between the polling task and command tasks,
/// hence `Send + Sync + 'static`.
pub trait FleetDataSource: Send + Sync + 'static {
    /// Subscribe to fleet snapshots, one per tick.
    ///
    /// Must be called from within a Tokio runtime.
    fn observe_fleet(&self) -> FleetStream;

    /// Put `id` in progress.  Unknown ids succeed without effect.
    fn start_ride(&self, id: &VehicleId) -> SourceFuture<()>;

    /// Stop `id`.  Unknown ids succeed without effect.
    fn stop_ride(&self, id: &VehicleId) -> SourceFuture<()>;

    /// Append a history record stamped with the current time.  Callers
    /// treat failure as non-fatal.
    fn log_event(&self, vehicle_id: &VehicleId, action: &str) -> SourceFuture<()>;

    /// Point-in-time copy of the history log.
    fn fetch_history(&self) -> SourceFuture<Vec<HistoryEvent>>;

    /// Move the fleet to a new center, if the backend supports it.
    ///
    /// Default: no-op (a real backend's vehicles are where they are).
    fn recenter(&self, _center: GeoPoint) -> SourceResult<()> {
        Ok(())
    }
}
