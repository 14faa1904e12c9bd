//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `FleetError` as one
//! variant where they need to surface it.

use thiserror::Error;

use crate::VehicleId;

/// The top-level error type for `fleet-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FleetError {
    /// Lookup of an id that is not in the registry.  Callers that issue ride
    /// commands treat this as a no-op match failure, never as a failure.
    #[error("vehicle {0} not found")]
    UnknownVehicle(VehicleId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `fleet-*` crates.
pub type FleetResult<T> = Result<T, FleetError>;
