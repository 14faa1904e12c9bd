//! `fleet-sim` — the fleet simulation engine.
//!
//! # Per-vehicle tick rules
//!
//! ```text
//! for vehicle in registry order:
//!   Static  and not InProgress        → untouched
//!   InProgress with waypoints left    → move to next waypoint;
//!                                       last one popped → Stopped
//!   otherwise (idle)                  → jitter position;
//!                                       Waiting → InProgress with prob. p
//!                                       (and a fresh lap assignment)
//! ```
//!
//! A manually started vehicle follows the lap regardless of its
//! [`MobilityClass`][fleet_core::MobilityClass].
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`route`]   | `RouteAssignments` — sparse per-vehicle waypoint queues      |
//! | [`seed`]    | Fleet seeding and the Static/Dynamic partition               |
//! | [`engine`]  | `SimulationEngine` — tick loop, ride commands, recentering   |
//! | [`report`]  | `TickReport` — what changed on one tick                      |
//! | [`builder`] | `EngineBuilder` (fluent construction)                        |
//! | [`error`]   | `SimError`, `SimResult<T>`                                   |
//!
//! # Quick-start
//!
//! ```rust
//! use fleet_core::{FleetConfig, GeoPoint, VehicleId};
//! use fleet_sim::EngineBuilder;
//!
//! let mut engine = EngineBuilder::new(&FleetConfig::default())
//!     .center(GeoPoint::new(0.0, 0.0))
//!     .fleet_size(4)
//!     .build()
//!     .unwrap();
//!
//! engine.start_ride(&VehicleId::from("1"));
//! let report = engine.tick();
//! assert_eq!(report.tick.0, 1);
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod report;
pub mod route;
pub mod seed;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::SimulationEngine;
pub use error::{SimError, SimResult};
pub use report::TickReport;
pub use route::{RouteAssignments, RouteStep};
pub use seed::{partition_mobility, seed_vehicles};
