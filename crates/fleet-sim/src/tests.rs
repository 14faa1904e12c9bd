//! Unit tests for fleet-sim.

use std::collections::HashMap;

use chrono::Utc;
use fleet_core::{FleetConfig, GeoPoint, HistoryEventId, MobilityClass, RideState, SimRng, Tick, VehicleId};
use fleet_registry::Vehicle;

use crate::{EngineBuilder, RouteAssignments, SimError, SimulationEngine, partition_mobility, seed_vehicles};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn id(s: &str) -> VehicleId {
    VehicleId::from(s)
}

fn origin_config() -> FleetConfig {
    FleetConfig { center: GeoPoint::new(0.0, 0.0), ..FleetConfig::default() }
}

/// Seeded fleet of `n` around (0, 0).
fn seeded(n: usize, seed: u64) -> SimulationEngine {
    EngineBuilder::new(&origin_config()).fleet_size(n).seed(seed).build().unwrap()
}

/// Explicit fleet: one vehicle per `(id, state, class)`, all at the origin.
fn explicit(config: FleetConfig, spec: &[(&str, RideState, MobilityClass)]) -> SimulationEngine {
    let vehicles = spec
        .iter()
        .map(|(i, state, _)| Vehicle::new(id(i), format!("Veh{i}"), GeoPoint::new(0.0, 0.0), *state))
        .collect();
    let mobility: HashMap<_, _> = spec.iter().map(|(i, _, class)| (id(i), *class)).collect();
    EngineBuilder::new(&config).vehicles(vehicles, mobility).build().unwrap()
}

// ── Seeding ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod seeding {
    use super::*;

    #[test]
    fn ids_names_and_bounds() {
        let mut rng = SimRng::new(1);
        let center = GeoPoint::new(37.7749, -122.4194);
        let vehicles = seed_vehicles(center, 20, 0.007, &mut rng);
        assert_eq!(vehicles.len(), 20);
        for (i, v) in vehicles.iter().enumerate() {
            assert_eq!(v.id().as_str(), (i + 1).to_string());
            assert_eq!(v.name, format!("Veh{}", i + 1));
            assert!(v.position.within_bbox(center, 0.007));
        }
    }

    #[test]
    fn partition_is_half_rounded_down() {
        let mut rng = SimRng::new(5);
        for n in [0usize, 1, 4, 7, 20] {
            let ids: Vec<_> = (1..=n).map(|i| VehicleId::new(i.to_string())).collect();
            let classes = partition_mobility(&ids, &mut rng);
            assert_eq!(classes.len(), n);
            let statics = classes.values().filter(|c| c.is_static()).count();
            assert_eq!(statics, n / 2, "n = {n}");
        }
    }

    #[test]
    fn same_seed_same_fleet() {
        let a = seeded(20, 99);
        let b = seeded(20, 99);
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.ids_with_class(MobilityClass::Static), b.ids_with_class(MobilityClass::Static));
    }

    #[test]
    fn four_vehicle_fleet_splits_two_and_two() {
        let engine = seeded(4, 42);
        assert_eq!(engine.ids_with_class(MobilityClass::Static).len(), 2);
        assert_eq!(engine.ids_with_class(MobilityClass::Dynamic).len(), 2);
        assert_eq!(engine.lap().len(), 36);
        assert_eq!(engine.current_tick(), Tick::ZERO);
    }

    #[test]
    fn invalid_center_rejected() {
        let result = EngineBuilder::new(&FleetConfig::default()).center(GeoPoint::new(95.0, 0.0)).build();
        assert!(result.is_err());
    }
}

// ── RouteAssignments ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routes {
    use super::*;

    #[test]
    fn advance_pops_in_order_and_finishes() {
        let path = [GeoPoint::new(1.0, 0.0), GeoPoint::new(2.0, 0.0)];
        let mut routes = RouteAssignments::new();
        routes.assign(id("1"), &path);
        assert_eq!(routes.remaining(&id("1")), 2);

        let first = routes.advance(&id("1")).unwrap();
        assert_eq!(first.waypoint, path[0]);
        assert!(!first.finished);

        let last = routes.advance(&id("1")).unwrap();
        assert_eq!(last.waypoint, path[1]);
        assert!(last.finished);
        assert!(!routes.contains(&id("1")));
        assert!(routes.advance(&id("1")).is_none());
    }

    #[test]
    fn assign_overwrites() {
        let mut routes = RouteAssignments::new();
        routes.assign(id("1"), &[GeoPoint::default(); 3]);
        routes.advance(&id("1"));
        routes.assign(id("1"), &[GeoPoint::default(); 3]);
        assert_eq!(routes.remaining(&id("1")), 3);
        routes.assign(id("1"), &[]);
        assert!(routes.is_empty());
    }
}

// ── Ride commands ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod commands {
    use super::*;

    #[test]
    fn start_assigns_full_lap() {
        let mut engine = seeded(4, 42);
        assert!(engine.start_ride(&id("1")));
        let v = engine.registry().get(&id("1")).unwrap();
        assert_eq!(v.state, RideState::InProgress);
        assert_eq!(engine.remaining_waypoints(&id("1")), 36);
    }

    #[test]
    fn start_ignores_mobility_class() {
        let mut engine = seeded(4, 42);
        for static_id in engine.ids_with_class(MobilityClass::Static) {
            assert!(engine.start_ride(&static_id));
            assert_eq!(engine.remaining_waypoints(&static_id), 36);
        }
    }

    #[test]
    fn restart_overwrites_assignment() {
        let mut engine = explicit(origin_config(), &[("1", RideState::Waiting, MobilityClass::Static)]);
        engine.start_ride(&id("1"));
        engine.run_ticks(5);
        assert_eq!(engine.remaining_waypoints(&id("1")), 31);
        engine.start_ride(&id("1"));
        assert_eq!(engine.remaining_waypoints(&id("1")), 36);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut engine = seeded(4, 42);
        engine.start_ride(&id("2"));
        assert!(engine.stop_ride(&id("2")));
        let once = engine.snapshot();
        assert!(engine.stop_ride(&id("2")));
        assert_eq!(engine.snapshot(), once);
        assert_eq!(engine.registry().get(&id("2")).unwrap().state, RideState::Stopped);
        assert_eq!(engine.remaining_waypoints(&id("2")), 0);
    }

    #[test]
    fn unknown_id_is_noop() {
        let mut engine = seeded(4, 42);
        let before = engine.snapshot();
        assert!(!engine.start_ride(&id("999")));
        assert!(!engine.stop_ride(&id("999")));
        assert_eq!(engine.snapshot(), before);
        assert!(engine.routes().is_empty());
    }
}

// ── Tick rules ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ticking {
    use super::*;

    #[test]
    fn route_following_hits_every_waypoint_then_stops() {
        let mut engine = seeded(4, 42);
        let target = id("3");
        engine.start_ride(&target);
        let lap = engine.lap().to_vec();

        for k in 1..=lap.len() {
            let report = engine.tick();
            let v = engine.registry().get(&target).unwrap();
            assert_eq!(v.position, lap[k - 1], "tick {k}");
            if k < lap.len() {
                assert_eq!(v.state, RideState::InProgress, "tick {k}");
                assert_eq!(engine.remaining_waypoints(&target), lap.len() - k);
            } else {
                assert_eq!(v.state, RideState::Stopped);
                assert!(report.completed.contains(&target));
                assert!(!engine.routes().contains(&target));
            }
        }
    }

    #[test]
    fn static_idle_vehicles_never_move() {
        let config = FleetConfig { auto_start_probability: 1.0, ..origin_config() };
        let mut engine = explicit(config, &[
            ("1", RideState::Waiting, MobilityClass::Static),
            ("2", RideState::Stopped, MobilityClass::Static),
        ]);
        let before = engine.snapshot();
        for _ in 0..50 {
            let report = engine.tick();
            assert!(report.is_quiet());
        }
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn static_vehicles_stay_put_in_seeded_fleet() {
        let mut engine = seeded(20, 7);
        let statics = engine.ids_with_class(MobilityClass::Static);
        let idle_before: Vec<_> = statics
            .iter()
            .map(|i| engine.registry().get(i).unwrap().clone())
            .filter(|v| v.state != RideState::InProgress)
            .collect();
        engine.run_ticks(100);
        for v in idle_before {
            let now = engine.registry().get(v.id()).unwrap();
            assert_eq!(now.position, v.position);
            assert_eq!(now.state, v.state);
        }
    }

    #[test]
    fn dynamic_waiting_vehicle_self_starts_with_certainty() {
        let config = FleetConfig { auto_start_probability: 1.0, ..origin_config() };
        let mut engine = explicit(config, &[("1", RideState::Waiting, MobilityClass::Dynamic)]);
        let report = engine.tick();
        assert_eq!(report.auto_started, vec![id("1")]);
        let v = engine.registry().get(&id("1")).unwrap();
        assert_eq!(v.state, RideState::InProgress);
        assert_eq!(engine.remaining_waypoints(&id("1")), 36);
        // Jittered, not yet on the lap.
        assert!(v.position.within_bbox(GeoPoint::new(0.0, 0.0), 0.001));
    }

    #[test]
    fn dynamic_waiting_vehicle_never_starts_at_zero_probability() {
        let config = FleetConfig { auto_start_probability: 0.0, ..origin_config() };
        let mut engine = explicit(config, &[("1", RideState::Waiting, MobilityClass::Dynamic)]);
        for _ in 0..200 {
            engine.tick();
        }
        let v = engine.registry().get(&id("1")).unwrap();
        assert_eq!(v.state, RideState::Waiting);
        // 200 ticks of ±0.001 jitter cannot exceed 0.2°.
        assert!(v.position.within_bbox(GeoPoint::new(0.0, 0.0), 0.2));
    }

    #[test]
    fn dynamic_stopped_vehicle_jitters_but_stays_stopped() {
        let config = FleetConfig { auto_start_probability: 1.0, ..origin_config() };
        let mut engine = explicit(config, &[("1", RideState::Stopped, MobilityClass::Dynamic)]);
        for _ in 0..20 {
            let report = engine.tick();
            assert!(report.is_quiet());
        }
        let v = engine.registry().get(&id("1")).unwrap();
        assert_eq!(v.state, RideState::Stopped);
        assert_ne!(v.position, GeoPoint::new(0.0, 0.0));
    }

    #[test]
    fn in_progress_without_route_is_idle() {
        let config = FleetConfig { auto_start_probability: 1.0, ..origin_config() };
        let mut engine = explicit(config, &[("1", RideState::InProgress, MobilityClass::Dynamic)]);
        let report = engine.tick();
        // Not Waiting, so it cannot self-start; it only jitters.
        assert!(report.is_quiet());
        assert_eq!(engine.registry().get(&id("1")).unwrap().state, RideState::InProgress);
        assert!(!engine.routes().contains(&id("1")));
    }

    #[test]
    fn ticks_are_deterministic() {
        let mut a = seeded(20, 3);
        let mut b = seeded(20, 3);
        for _ in 0..40 {
            assert_eq!(a.tick(), b.tick());
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.current_tick(), Tick(40));
    }

    #[test]
    fn every_state_is_valid_after_many_ticks() {
        let mut engine = seeded(20, 11);
        for _ in 0..500 {
            engine.tick();
            for v in engine.snapshot().iter() {
                assert!(RideState::ALL.contains(&v.state));
                if v.state != RideState::InProgress {
                    assert!(!engine.routes().contains(v.id()));
                }
            }
        }
    }
}

// ── Recentering ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod recentering {
    use super::*;

    #[test]
    fn reseeds_around_new_center() {
        let mut engine = seeded(20, 42);
        engine.start_ride(&id("1"));
        engine.log_event(id("1"), "start", Utc::now());

        let new_center = GeoPoint::new(51.5074, -0.1278);
        engine.recenter(new_center).unwrap();

        assert_eq!(engine.center(), new_center);
        assert_eq!(engine.registry().len(), 20);
        assert!(engine.snapshot().iter().all(|v| v.position.within_bbox(new_center, 0.007)));
        assert!(engine.routes().is_empty());
        assert_eq!(engine.ids_with_class(MobilityClass::Static).len(), 10);
        assert!(engine.lap().iter().all(|p| p.within_bbox(new_center, 0.002 + 1e-9)));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn fleet_at_pole_and_antimeridian_stays_valid() {
        let config = FleetConfig { center: GeoPoint::new(90.0, 180.0), auto_start_probability: 1.0, ..FleetConfig::default() };
        let mut engine = EngineBuilder::new(&config).fleet_size(20).seed(3).build().unwrap();
        assert!(engine.lap().iter().all(|p| p.is_valid()));
        assert!(engine.snapshot().iter().all(|v| v.position.is_valid()));

        for _ in 0..50 {
            engine.tick();
            for v in engine.snapshot().iter() {
                assert!(v.position.is_valid(), "{} at {}", v.id(), v.position);
            }
        }

        engine.recenter(GeoPoint::new(-90.0, -180.0)).unwrap();
        assert!(engine.snapshot().iter().all(|v| v.position.is_valid()));
    }

    #[test]
    fn invalid_center_leaves_fleet_untouched() {
        let mut engine = seeded(4, 42);
        let before = engine.snapshot();
        let err = engine.recenter(GeoPoint::new(0.0, 200.0)).unwrap_err();
        assert!(matches!(err, SimError::InvalidCenter(_)));
        assert_eq!(engine.snapshot(), before);
    }
}

// ── History ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod history {
    use super::*;

    #[test]
    fn log_then_fetch() {
        let mut engine = seeded(4, 42);
        engine.log_event(id("1"), "start", Utc::now());
        let history = engine.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, HistoryEventId(1));
        assert_eq!(history[0].vehicle_id, id("1"));
        assert_eq!(history[0].action, "start");
    }
}
