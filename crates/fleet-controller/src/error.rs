//! Controller error types.

use fleet_core::VehicleId;
use fleet_source::SourceError;
use thiserror::Error;

/// Why a ride command was refused before reaching the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandRejected {
    #[error("no vehicle selected")]
    NoSelection,

    #[error("another ride command is in flight")]
    Busy,

    /// The selected vehicle's state offers no action (it is `Stopped`).
    #[error("no action available for the selected vehicle")]
    NoActionAvailable,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Rejected(#[from] CommandRejected),

    #[error("unrecognised QR payload {0:?}")]
    InvalidQrPayload(String),

    /// Display text doubles as the operator notice.
    #[error("No vehicle found for ID {0}")]
    NoVehicleForCode(VehicleId),

    /// The data source failed the command; local state was rolled back.
    #[error("ride command failed: {0}")]
    Source(#[from] SourceError),

    #[error("ride command task ended abnormally: {0}")]
    TaskAborted(String),
}

pub type ControllerResult<T> = Result<T, ControllerError>;
