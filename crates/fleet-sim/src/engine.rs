//! The `SimulationEngine` and its tick loop.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fleet_core::{FleetConfig, GeoPoint, MobilityClass, RideState, SimRng, Tick, VehicleId};
use fleet_registry::{FleetSnapshot, HistoryEvent, VehicleRegistry};
use tracing::{debug, info};

use crate::seed::{partition_mobility, seed_vehicles};
use crate::{RouteAssignments, SimError, SimResult, TickReport};

/// Owns the vehicle registry and advances it one tick at a time.
///
/// The engine is a plain single-owner value with no interior locking;
/// callers that share it across tasks wrap it in a mutex so every mutation
/// (ticks, ride commands, recentering) is serialized.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct SimulationEngine {
    /// Behavioral parameters (jitter, probability, lap shape, fleet size).
    pub config: FleetConfig,

    pub(crate) clock:    Tick,
    pub(crate) center:   GeoPoint,
    pub(crate) rng:      SimRng,
    pub(crate) registry: VehicleRegistry,
    /// Fixed at seed time; replaced only by recentering.
    pub(crate) mobility: HashMap<VehicleId, MobilityClass>,
    /// Closed-loop lap around `center`, copied into each new assignment.
    pub(crate) lap:      Vec<GeoPoint>,
    pub(crate) routes:   RouteAssignments,
}

impl SimulationEngine {
    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance every vehicle by one tick and return what changed on its own.
    pub fn tick(&mut self) -> TickReport {
        self.clock = self.clock.next();
        let mut report = TickReport::new(self.clock);

        // Explicit field borrows so the closure can hold them while the
        // registry is borrowed mutably.
        let mobility   = &self.mobility;
        let routes     = &mut self.routes;
        let rng        = &mut self.rng;
        let lap        = self.lap.as_slice();
        let jitter     = self.config.idle_jitter_deg;
        let p_start    = self.config.auto_start_probability;

        self.registry.for_each_mut(|id, position, state| {
            let class = mobility.get(id).copied().unwrap_or(MobilityClass::Dynamic);
            if class.is_static() && *state != RideState::InProgress {
                return;
            }

            if *state == RideState::InProgress {
                if let Some(step) = routes.advance(id) {
                    *position = step.waypoint;
                    if step.finished {
                        *state = RideState::Stopped;
                        report.completed.push(id.clone());
                    }
                    return;
                }
            }

            // Idle: no route to follow.
            let d_lat = rng.jitter(jitter);
            let d_lon = rng.jitter(jitter);
            *position = position.offset(d_lat, d_lon);
            if *state == RideState::Waiting && rng.gen_bool(p_start) {
                *state = RideState::InProgress;
                routes.assign(id.clone(), lap);
                report.auto_started.push(id.clone());
            }
        });

        debug!(
            tick = %report.tick,
            auto_started = report.auto_started.len(),
            completed = report.completed.len(),
            on_route = self.routes.len(),
            "fleet tick"
        );
        report
    }

    /// Run `n` ticks, discarding the reports.
    pub fn run_ticks(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    // ── Ride commands ─────────────────────────────────────────────────────

    /// Put `id` in progress on a fresh lap, whatever its mobility class.
    /// Any existing assignment is overwritten.
    ///
    /// Returns `false` (and changes nothing) for an unknown id.
    pub fn start_ride(&mut self, id: &VehicleId) -> bool {
        if !self.registry.set_state(id, RideState::InProgress) {
            debug!(vehicle = %id, "start_ride for unknown vehicle ignored");
            return false;
        }
        self.routes.assign(id.clone(), &self.lap);
        info!(vehicle = %id, waypoints = self.lap.len(), "ride started");
        true
    }

    /// Stop `id` and drop its assignment.  Idempotent.
    ///
    /// Returns `false` for an unknown id.
    pub fn stop_ride(&mut self, id: &VehicleId) -> bool {
        self.routes.remove(id);
        if !self.registry.set_state(id, RideState::Stopped) {
            debug!(vehicle = %id, "stop_ride for unknown vehicle ignored");
            return false;
        }
        info!(vehicle = %id, "ride stopped");
        true
    }

    // ── Recentering ───────────────────────────────────────────────────────

    /// Re-seed the whole fleet around `center`.
    ///
    /// Positions, ride states and the Static/Dynamic partition are drawn
    /// anew, the lap is rebuilt around `center`, and every assignment is
    /// dropped.  The fleet size and the history log are kept.
    pub fn recenter(&mut self, center: GeoPoint) -> SimResult<()> {
        if !center.is_valid() {
            return Err(SimError::InvalidCenter(center));
        }
        let vehicles = seed_vehicles(center, self.config.fleet_size, self.config.seed_jitter_deg, &mut self.rng);
        self.registry.replace_all(vehicles)?;
        self.mobility = partition_mobility(self.registry.ids(), &mut self.rng);
        self.lap = center.closed_loop(self.config.lap_radius_deg, self.config.lap_points);
        self.routes.clear();
        self.center = center;
        info!(%center, vehicles = self.registry.len(), "fleet recentered");
        Ok(())
    }

    // ── History ───────────────────────────────────────────────────────────

    /// Append a history record for `vehicle_id`.  The id is not checked
    /// against the registry.
    pub fn log_event(&mut self, vehicle_id: VehicleId, action: &str, timestamp: DateTime<Utc>) -> HistoryEvent {
        self.registry.append_history(vehicle_id, action, timestamp)
    }

    /// Copy of every history record, oldest first.
    pub fn history(&self) -> Vec<HistoryEvent> {
        self.registry.history().events().to_vec()
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> FleetSnapshot {
        self.registry.snapshot()
    }

    #[inline]
    pub fn registry(&self) -> &VehicleRegistry {
        &self.registry
    }

    /// The last tick processed; `Tick::ZERO` before the first step.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock
    }

    #[inline]
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    #[inline]
    pub fn lap(&self) -> &[GeoPoint] {
        &self.lap
    }

    pub fn mobility_class(&self, id: &VehicleId) -> Option<MobilityClass> {
        self.mobility.get(id).copied()
    }

    /// Ids of every vehicle in `class`, in registry order.
    pub fn ids_with_class(&self, class: MobilityClass) -> Vec<VehicleId> {
        self.registry
            .ids()
            .filter(|id| self.mobility.get(*id) == Some(&class))
            .cloned()
            .collect()
    }

    /// Waypoints left on the assignment of `id`; `0` when it has none.
    pub fn remaining_waypoints(&self, id: &VehicleId) -> usize {
        self.routes.remaining(id)
    }

    #[inline]
    pub fn routes(&self) -> &RouteAssignments {
        &self.routes
    }
}
