//! Fluent builder for constructing a [`SimulationEngine`].

use std::collections::HashMap;

use fleet_core::{FleetConfig, GeoPoint, MobilityClass, SimRng, Tick, VehicleId};
use fleet_registry::{Vehicle, VehicleRegistry};

use crate::seed::{partition_mobility, seed_vehicles};
use crate::{RouteAssignments, SimError, SimResult, SimulationEngine};

/// Fluent builder for [`SimulationEngine`].
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                        |
/// |----------------------|------------------------------------------------|
/// | `.center(p)`         | `config.center`                                |
/// | `.fleet_size(n)`     | `config.fleet_size`                            |
/// | `.seed(s)`           | `config.seed`                                  |
/// | `.vehicles(v, m)`    | seeded around the center (random partition)    |
///
/// # Example
///
/// ```rust,ignore
/// let engine = EngineBuilder::new(&config)
///     .center(GeoPoint::new(0.0, 0.0))
///     .fleet_size(4)
///     .seed(7)
///     .build()?;
/// ```
pub struct EngineBuilder {
    config:   FleetConfig,
    vehicles: Option<(Vec<Vehicle>, HashMap<VehicleId, MobilityClass>)>,
}

impl EngineBuilder {
    pub fn new(config: &FleetConfig) -> Self {
        Self { config: config.clone(), vehicles: None }
    }

    pub fn center(mut self, center: GeoPoint) -> Self {
        self.config.center = center;
        self
    }

    pub fn fleet_size(mut self, n: usize) -> Self {
        self.config.fleet_size = n;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Use an explicit fleet instead of seeding one.  Vehicles missing from
    /// `mobility` are treated as `Dynamic`.  The fleet size becomes
    /// `vehicles.len()`.
    pub fn vehicles(mut self, vehicles: Vec<Vehicle>, mobility: HashMap<VehicleId, MobilityClass>) -> Self {
        self.vehicles = Some((vehicles, mobility));
        self
    }

    /// Validate the config, seed (or adopt) the fleet, and return a
    /// ready-to-tick engine at `Tick::ZERO`.
    pub fn build(self) -> SimResult<SimulationEngine> {
        let mut config = self.config;
        config.validate()?;
        let center = config.center;
        if !center.is_valid() {
            return Err(SimError::InvalidCenter(center));
        }

        let mut rng = SimRng::new(config.seed);
        let (registry, mobility) = match self.vehicles {
            Some((vehicles, mobility)) => {
                config.fleet_size = vehicles.len();
                (VehicleRegistry::new(vehicles)?, mobility)
            }
            None => {
                let vehicles = seed_vehicles(center, config.fleet_size, config.seed_jitter_deg, &mut rng);
                let registry = VehicleRegistry::new(vehicles)?;
                let mobility = partition_mobility(registry.ids(), &mut rng);
                (registry, mobility)
            }
        };
        let lap = center.closed_loop(config.lap_radius_deg, config.lap_points);

        Ok(SimulationEngine {
            config,
            clock: Tick::ZERO,
            center,
            rng,
            registry,
            mobility,
            lap,
            routes: RouteAssignments::new(),
        })
    }
}
