//! `fleet-core` — foundational types for the fleet simulation workspace.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It has no
//! `fleet-*` dependencies.
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`ids`]      | `VehicleId`, `HistoryEventId`                          |
//! | [`geo`]      | `GeoPoint`, closed-loop path generation                |
//! | [`ride`]     | `RideState`, `MobilityClass`, `RideAction`             |
//! | [`time`]     | `Tick`                                                 |
//! | [`rng`]      | `SimRng` (seeded, deterministic)                       |
//! | [`config`]   | `FleetConfig`, `BackendConfig`                         |
//! | [`error`]    | `FleetError`, `FleetResult`                            |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod ride;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BackendConfig, FleetConfig};
pub use error::{FleetError, FleetResult};
pub use geo::GeoPoint;
pub use ids::{HistoryEventId, VehicleId};
pub use ride::{MobilityClass, RideAction, RideState};
pub use rng::SimRng;
pub use time::Tick;
