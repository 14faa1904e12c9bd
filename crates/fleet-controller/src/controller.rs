//! `FleetController`: snapshot polling plus optimistic ride commands.

use std::sync::Arc;

use fleet_core::{GeoPoint, RideAction, VehicleId};
use fleet_registry::{FleetSnapshot, HistoryEvent, MapPin, MapRegion, Vehicle};
use fleet_source::{FleetDataSource, SourceResult};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::qr::parse_qr_payload;
use crate::{
    AutoTracking, CommandRejected, ControllerError, ControllerResult, ControllerState, FleetObserver,
    NoopObserver, PendingCommand,
};

type SharedObserver = Arc<Mutex<Box<dyn FleetObserver>>>;

/// The operator-side controller over any [`FleetDataSource`].
///
/// All state sits behind a single mutex ([`ControllerState`]); the polling
/// task and command completion tasks lock it for each update, so updates
/// are applied one at a time.  Must be used from within a Tokio runtime.
pub struct FleetController<S: FleetDataSource> {
    source:   Arc<S>,
    state:    Arc<Mutex<ControllerState>>,
    tracking: Mutex<AutoTracking>,
    observer: SharedObserver,
    poller:   Mutex<Option<JoinHandle<()>>>,
}

impl<S: FleetDataSource> FleetController<S> {
    pub fn new(source: S) -> Self {
        Self::with_shared_source(Arc::new(source))
    }

    /// Build over a source the caller keeps a handle to.
    pub fn with_shared_source(source: Arc<S>) -> Self {
        Self {
            source,
            state:    Arc::new(Mutex::new(ControllerState::default())),
            tracking: Mutex::new(AutoTracking::new()),
            observer: Arc::new(Mutex::new(Box::new(NoopObserver))),
            poller:   Mutex::new(None),
        }
    }

    /// Install `observer` for snapshot and command callbacks.
    pub fn with_observer(self, observer: impl FleetObserver + 'static) -> Self {
        *self.observer.lock() = Box::new(observer);
        self
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    // ── Polling ───────────────────────────────────────────────────────────

    /// Subscribe to the data source and apply every snapshot it emits.
    ///
    /// Returns immediately.  A stream error is logged and ends polling;
    /// the last good snapshot stays in place.  Calling this again replaces
    /// the previous subscription.
    pub fn start_polling(&self) {
        let mut stream = self.source.observe_fleet();
        let state = Arc::clone(&self.state);
        let observer = Arc::clone(&self.observer);

        let handle = tokio::spawn(async move {
            let mut seq = 0u64;
            while let Some(next) = stream.next().await {
                match next {
                    Ok(snapshot) => {
                        seq += 1;
                        debug!(seq, vehicles = snapshot.len(), "snapshot received");
                        observer.lock().on_snapshot(seq, &snapshot);
                        state.lock().accept(snapshot);
                    }
                    Err(e) => {
                        warn!(error = %e, "fleet stream failed; polling stopped");
                        break;
                    }
                }
            }
            observer.lock().on_stream_end();
        });

        if let Some(previous) = self.poller.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Stop polling.  The held snapshot is kept.
    pub fn stop_polling(&self) {
        if let Some(handle) = self.poller.lock().take() {
            handle.abort();
        }
    }

    // ── Selection ─────────────────────────────────────────────────────────

    /// Select `id` from the held snapshot.  Unknown ids leave the selection
    /// unchanged and return `false`.
    pub fn select_vehicle(&self, id: &VehicleId) -> bool {
        self.state.lock().select(id)
    }

    pub fn clear_selection(&self) {
        self.state.lock().selected = None;
    }

    // ── Ride commands ─────────────────────────────────────────────────────

    /// Start the selected vehicle's ride.
    pub fn start_ride(&self) -> ControllerResult<PendingCommand> {
        self.issue(RideAction::Start)
    }

    /// Stop the selected vehicle's ride.
    pub fn stop_ride(&self) -> ControllerResult<PendingCommand> {
        self.issue(RideAction::Stop)
    }

    /// Run whichever action the selected vehicle's state offers:
    /// start when `Waiting`, stop when `InProgress`.
    pub fn perform_contextual_action(&self) -> ControllerResult<PendingCommand> {
        let action = {
            let state = self.state.lock();
            if state.selected.is_none() {
                return Err(CommandRejected::NoSelection.into());
            }
            state.available_action().ok_or(CommandRejected::NoActionAvailable)?
        };
        self.issue(action)
    }

    /// Handle a scanned QR code: select the vehicle it names and start it.
    ///
    /// Returns the matched vehicle, as it was before the start, with the
    /// command handle.  See [`started_notice`](crate::qr::started_notice).
    pub fn start_ride_from_code(&self, raw: &str) -> ControllerResult<(Vehicle, PendingCommand)> {
        let id = parse_qr_payload(raw)?;
        let vehicle = {
            let mut state = self.state.lock();
            let Some(vehicle) = state.snapshot.get(&id).cloned() else {
                info!(vehicle = %id, "scanned code matches no vehicle");
                return Err(ControllerError::NoVehicleForCode(id));
            };
            state.selected = Some(vehicle.clone());
            vehicle
        };
        let pending = self.start_ride()?;
        Ok((vehicle, pending))
    }

    fn issue(&self, action: RideAction) -> ControllerResult<PendingCommand> {
        let (id, captured) = {
            let mut state = self.state.lock();
            if state.busy {
                return Err(CommandRejected::Busy.into());
            }
            let id = state.selected_id().cloned().ok_or(CommandRejected::NoSelection)?;
            let captured = state.snapshot.clone();
            state.apply_optimistic(&id, action.target_state());
            state.busy = true;
            (id, captured)
        };

        let command = match action {
            RideAction::Start => self.source.start_ride(&id),
            RideAction::Stop => self.source.stop_ride(&id),
        };
        info!(vehicle = %id, action = action.as_str(), "ride command issued");

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let observer = Arc::clone(&self.observer);
        let vehicle = id.clone();

        let task = tokio::spawn(async move {
            let outcome = command.await;
            let committed = outcome.is_ok();
            match &outcome {
                Ok(()) => {
                    state.lock().busy = false;
                    debug!(vehicle = %vehicle, action = action.as_str(), "ride command committed");
                    log_history(source.as_ref(), &vehicle, action);
                }
                Err(e) => {
                    state.lock().roll_back(captured);
                    warn!(vehicle = %vehicle, action = action.as_str(), error = %e, "ride command failed; rolled back");
                }
            }
            observer.lock().on_command(&vehicle, action, committed);
            outcome.map_err(ControllerError::from)
        });

        Ok(PendingCommand { vehicle: id, action, task })
    }

    // ── Location and camera ───────────────────────────────────────────────

    /// Feed a geolocation fix.  While following, the data source is
    /// recentered on it and the fix is returned as the new camera center.
    pub fn on_location(&self, fix: GeoPoint) -> SourceResult<Option<GeoPoint>> {
        let Some(center) = self.tracking.lock().on_location(fix) else {
            return Ok(None);
        };
        self.source.recenter(center)?;
        Ok(Some(center))
    }

    pub fn on_user_pan(&self) {
        self.tracking.lock().on_user_pan();
    }

    /// The re-center action: resume following and return the last fix.
    pub fn recenter_camera(&self) -> Option<GeoPoint> {
        self.tracking.lock().recenter()
    }

    /// Region to fit the camera to, until the first centering.
    pub fn initial_region(&self) -> Option<MapRegion> {
        let snapshot = self.state.lock().snapshot.clone();
        self.tracking.lock().fit_to(&snapshot)
    }

    pub fn tracking(&self) -> AutoTracking {
        *self.tracking.lock()
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> FleetSnapshot {
        self.state.lock().snapshot.clone()
    }

    pub fn selected(&self) -> Option<Vehicle> {
        self.state.lock().selected.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.lock().busy
    }

    pub fn available_action(&self) -> Option<RideAction> {
        self.state.lock().available_action()
    }

    pub fn pins(&self) -> Vec<MapPin> {
        self.state.lock().snapshot.pins()
    }

    /// Point-in-time copy of the data source's history log.
    pub async fn fetch_history(&self) -> SourceResult<Vec<HistoryEvent>> {
        self.source.fetch_history().await
    }
}

impl<S: FleetDataSource> Drop for FleetController<S> {
    fn drop(&mut self) {
        self.stop_polling();
    }
}

/// Record a committed command.  Failures are logged and dropped.
fn log_history<S: FleetDataSource>(source: &S, vehicle: &VehicleId, action: RideAction) {
    let write = source.log_event(vehicle, action.as_str());
    let vehicle = vehicle.clone();
    tokio::spawn(async move {
        if let Err(e) = write.await {
            warn!(vehicle = %vehicle, error = %e, "history write failed");
        }
    });
}
