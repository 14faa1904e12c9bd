//! `fleet-registry` — the authoritative in-memory set of vehicles.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`vehicle`]   | `Vehicle` — id, name, position, ride state                    |
//! | [`history`]   | `HistoryEvent`, `HistoryLog` (append-only, monotonic ids)     |
//! | [`snapshot`]  | `FleetSnapshot` value type, `MapPin`, `MapRegion`             |
//! | [`store`]     | `VehicleRegistry` — vehicles keyed by id plus the history log |
//! | [`error`]     | `RegistryError`, `RegistryResult<T>`                          |
//!
//! # Ownership
//!
//! The registry has a single owner (the simulation engine).  Everything it
//! hands out is a copy: a [`FleetSnapshot`] never observes later mutation.

pub mod error;
pub mod history;
pub mod snapshot;
pub mod store;
pub mod vehicle;


pub use error::{RegistryError, RegistryResult};
pub use history::{HistoryEvent, HistoryLog};
pub use snapshot::{FleetSnapshot, MapPin, MapRegion};
pub use store::VehicleRegistry;
pub use vehicle::Vehicle;
