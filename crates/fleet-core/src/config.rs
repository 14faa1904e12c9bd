//! Top-level fleet configuration.
//!
//! Loaded from a JSON file by the application crate (every field has a
//! default, so `{}` is a valid config) and passed to the engine builder and
//! the data-source constructors.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{FleetError, FleetResult, GeoPoint};

/// Default backend address used when a remote config omits `base_url`.
pub const DEFAULT_BASE_URL: &str = "http://192.168.1.100:3000";

/// Default per-request timeout for the remote backend.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Which fleet data source backs the controller.
///
/// ```json
/// { "backend": { "kind": "remote", "base_url": "http://localhost:3000" } }
/// ```
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// In-process simulation engine.
    #[default]
    Simulated,
    /// JSON-over-HTTP backend.
    Remote {
        #[serde(default = "default_base_url")]
        base_url:   String,
        /// Per-request timeout.  Expiry is reported as a transport failure.
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Fleet simulation and backend configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Initial fleet center.  Replaced at runtime by recentering.
    pub center: GeoPoint,

    /// Number of vehicles seeded.  Fixed for the whole session.
    pub fleet_size: usize,

    /// Master RNG seed.  The same seed always produces the same fleet.
    pub seed: u64,

    /// Milliseconds between ticks.
    pub tick_period_ms: u64,

    /// Milliseconds before a simulated ride command completes.
    pub command_latency_ms: u64,

    /// Half-width of the seeding bounding box, in degrees.
    pub seed_jitter_deg: f64,

    /// Maximum idle perturbation per axis per tick, in degrees.
    pub idle_jitter_deg: f64,

    /// Per-tick probability that an idle `Waiting` dynamic vehicle starts a
    /// ride on its own.
    pub auto_start_probability: f64,

    /// Waypoints in the closed-loop lap.
    pub lap_points: usize,

    /// Lap radius, in degrees.
    pub lap_radius_deg: f64,

    pub backend: BackendConfig,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            center:                 GeoPoint::new(37.7749, -122.4194),
            fleet_size:             20,
            seed:                   42,
            tick_period_ms:         10_000,
            command_latency_ms:     1_000,
            seed_jitter_deg:        0.007,
            idle_jitter_deg:        0.001,
            auto_start_probability: 0.15,
            lap_points:             36,
            lap_radius_deg:         0.002,
            backend:                BackendConfig::Simulated,
        }
    }
}

impl FleetConfig {
    /// Parse and validate a JSON config from any reader.
    pub fn from_json_reader<R: Read>(reader: R) -> FleetResult<Self> {
        let config: FleetConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config file.
    pub fn from_json_path(path: &Path) -> FleetResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> FleetResult<()> {
        if !self.center.is_valid() {
            return Err(FleetError::Config(format!("center {} is not a valid coordinate", self.center)));
        }
        if self.tick_period_ms == 0 {
            return Err(FleetError::Config("tick_period_ms must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.auto_start_probability) {
            return Err(FleetError::Config(format!(
                "auto_start_probability {} is outside [0, 1]",
                self.auto_start_probability
            )));
        }
        if self.lap_points == 0 {
            return Err(FleetError::Config("lap_points must be positive".into()));
        }
        for (name, value) in [
            ("seed_jitter_deg", self.seed_jitter_deg),
            ("idle_jitter_deg", self.idle_jitter_deg),
            ("lap_radius_deg", self.lap_radius_deg),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FleetError::Config(format!("{name} must be a non-negative number")));
            }
        }
        if let BackendConfig::Remote { base_url, timeout_ms } = &self.backend {
            if base_url.is_empty() {
                return Err(FleetError::Config("remote base_url is empty".into()));
            }
            if *timeout_ms == 0 {
                return Err(FleetError::Config("remote timeout_ms must be positive".into()));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    #[inline]
    pub fn command_latency(&self) -> Duration {
        Duration::from_millis(self.command_latency_ms)
    }
}
