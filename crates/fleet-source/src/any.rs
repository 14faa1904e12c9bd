//! `AnySource`, the backend variant picked from configuration.

use std::time::Duration;

use fleet_core::{BackendConfig, FleetConfig, GeoPoint, VehicleId};
use fleet_registry::HistoryEvent;
use tracing::info;

use crate::{FleetDataSource, FleetStream, RemoteSource, SimulatedSource, SourceFuture, SourceResult};

/// One of the two concrete backends, chosen once at construction.
///
/// The controller only sees the [`FleetDataSource`] trait; this enum lets an
/// application pick the variant at runtime without generics leaking into
/// its own types.
#[derive(Clone)]
pub enum AnySource {
    Simulated(SimulatedSource),
    Remote(RemoteSource),
}

impl AnySource {
    /// Build the backend named by `config.backend`.
    ///
    /// The remote variant polls at `config.tick_period()`.
    pub fn from_config(config: &FleetConfig) -> SourceResult<Self> {
        match &config.backend {
            BackendConfig::Simulated => {
                info!(vehicles = config.fleet_size, center = %config.center, "using simulated backend");
                Ok(AnySource::Simulated(SimulatedSource::from_config(config)?))
            }
            BackendConfig::Remote { base_url, timeout_ms } => {
                info!(%base_url, "using remote backend");
                let source = RemoteSource::new(base_url, Duration::from_millis(*timeout_ms), config.tick_period())?;
                Ok(AnySource::Remote(source))
            }
        }
    }

    /// The simulated backend, if that is the active variant.
    pub fn as_simulated(&self) -> Option<&SimulatedSource> {
        match self {
            AnySource::Simulated(s) => Some(s),
            AnySource::Remote(_) => None,
        }
    }
}

impl FleetDataSource for AnySource {
    fn observe_fleet(&self) -> FleetStream {
        match self {
            AnySource::Simulated(s) => s.observe_fleet(),
            AnySource::Remote(s) => s.observe_fleet(),
        }
    }

    fn start_ride(&self, id: &VehicleId) -> SourceFuture<()> {
        match self {
            AnySource::Simulated(s) => s.start_ride(id),
            AnySource::Remote(s) => s.start_ride(id),
        }
    }

    fn stop_ride(&self, id: &VehicleId) -> SourceFuture<()> {
        match self {
            AnySource::Simulated(s) => s.stop_ride(id),
            AnySource::Remote(s) => s.stop_ride(id),
        }
    }

    fn log_event(&self, vehicle_id: &VehicleId, action: &str) -> SourceFuture<()> {
        match self {
            AnySource::Simulated(s) => s.log_event(vehicle_id, action),
            AnySource::Remote(s) => s.log_event(vehicle_id, action),
        }
    }

    fn fetch_history(&self) -> SourceFuture<Vec<HistoryEvent>> {
        match self {
            AnySource::Simulated(s) => s.fetch_history(),
            AnySource::Remote(s) => s.fetch_history(),
        }
    }

    fn recenter(&self, center: GeoPoint) -> SourceResult<()> {
        match self {
            AnySource::Simulated(s) => s.recenter(center),
            AnySource::Remote(s) => s.recenter(center),
        }
    }
}
