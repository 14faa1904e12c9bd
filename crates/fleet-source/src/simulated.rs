//! `SimulatedSource`: a [`FleetDataSource`] backed by the in-process engine.
//!
//! # Tick driver
//!
//! One driver task per source ticks the engine every `tick_period` and fans
//! the resulting snapshot out to every live subscriber.  It starts with the
//! first subscriber and exits once the last one is gone; the next
//! `observe_fleet` call starts a new one.  Each tick advances the engine
//! exactly once no matter how many subscribers there are.
//!
//! # Commands
//!
//! Ride commands mutate the engine immediately and then complete after
//! `command_latency`, emulating a network round trip.  They never fail.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use fleet_core::{FleetConfig, GeoPoint, VehicleId};
use fleet_registry::{FleetSnapshot, HistoryEvent};
use fleet_sim::{EngineBuilder, SimulationEngine};
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::{FleetDataSource, FleetStream, SourceFuture, SourceResult};

type Subscriber = UnboundedSender<SourceResult<FleetSnapshot>>;

/// Subscriber list plus the "driver is running" flag, guarded together so
/// a subscriber can never be added between the driver's last publish and
/// its exit.
#[derive(Default)]
struct Hub {
    subscribers:    Vec<Subscriber>,
    driver_running: bool,
}

impl Hub {
    /// Register `tx`.  Returns `true` if the caller must start a driver.
    fn subscribe(&mut self, tx: Subscriber) -> bool {
        self.subscribers.push(tx);
        !std::mem::replace(&mut self.driver_running, true)
    }

    /// Send `snapshot` to every live subscriber.  Returns `false` (and
    /// clears the running flag) when none are left.
    fn publish(&mut self, snapshot: &FleetSnapshot) -> bool {
        self.subscribers.retain(|tx| tx.send(Ok(snapshot.clone())).is_ok());
        if self.subscribers.is_empty() {
            self.driver_running = false;
            return false;
        }
        true
    }
}

/// In-process fleet backend.
///
/// Cheap to clone; clones share the same engine and subscribers.
#[derive(Clone)]
pub struct SimulatedSource {
    engine:          Arc<Mutex<SimulationEngine>>,
    hub:             Arc<Mutex<Hub>>,
    tick_period:     Duration,
    command_latency: Duration,
}

impl SimulatedSource {
    pub fn new(engine: SimulationEngine, tick_period: Duration, command_latency: Duration) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            hub: Arc::new(Mutex::new(Hub::default())),
            tick_period,
            command_latency,
        }
    }

    /// Seed an engine from `config` and wrap it.
    pub fn from_config(config: &FleetConfig) -> SourceResult<Self> {
        let engine = EngineBuilder::new(config).build()?;
        Ok(Self::new(engine, config.tick_period(), config.command_latency()))
    }

    /// Shared handle to the engine, for inspection.
    pub fn engine(&self) -> Arc<Mutex<SimulationEngine>> {
        Arc::clone(&self.engine)
    }

    /// Current registry state, without ticking.
    pub fn snapshot(&self) -> FleetSnapshot {
        self.engine.lock().snapshot()
    }

    fn spawn_driver(&self) {
        let engine = Arc::clone(&self.engine);
        let hub = Arc::clone(&self.hub);
        let period = self.tick_period;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            debug!(?period, "tick driver started");
            loop {
                interval.tick().await;
                let snapshot = {
                    let mut engine = engine.lock();
                    engine.tick();
                    engine.snapshot()
                };
                if !hub.lock().publish(&snapshot) {
                    break;
                }
            }
            debug!("tick driver stopped: no subscribers");
        });
    }

    fn delayed_ok(&self) -> SourceFuture<()> {
        let latency = self.command_latency;
        Box::pin(async move {
            tokio::time::sleep(latency).await;
            Ok(())
        })
    }
}

impl FleetDataSource for SimulatedSource {
    fn observe_fleet(&self) -> FleetStream {
        let (tx, stream) = FleetStream::channel();
        if self.hub.lock().subscribe(tx) {
            self.spawn_driver();
        }
        stream
    }

    fn start_ride(&self, id: &VehicleId) -> SourceFuture<()> {
        self.engine.lock().start_ride(id);
        self.delayed_ok()
    }

    fn stop_ride(&self, id: &VehicleId) -> SourceFuture<()> {
        self.engine.lock().stop_ride(id);
        self.delayed_ok()
    }

    fn log_event(&self, vehicle_id: &VehicleId, action: &str) -> SourceFuture<()> {
        let event = self.engine.lock().log_event(vehicle_id.clone(), action, Utc::now());
        debug!(id = event.id.0, vehicle = %event.vehicle_id, action = %event.action, "history event logged");
        Box::pin(std::future::ready(Ok(())))
    }

    fn fetch_history(&self) -> SourceFuture<Vec<HistoryEvent>> {
        let history = self.engine.lock().history();
        Box::pin(std::future::ready(Ok(history)))
    }

    fn recenter(&self, center: GeoPoint) -> SourceResult<()> {
        self.engine.lock().recenter(center)?;
        Ok(())
    }
}
