//! QR payload parsing.
//!
//! The scanner yields raw strings.  A ride-start code is a URI
//!
//! ```text
//! myapp://startRide?vehicleId=<id>
//! ```
//!
//! `startRide` is accepted either as the URI host (as above) or as its path
//! (`myapp:startRide?…`, `myapp:///startRide?…`).

use fleet_core::VehicleId;
use fleet_registry::Vehicle;
use reqwest::Url;

use crate::{ControllerError, ControllerResult};

pub const QR_SCHEME: &str = "myapp";
pub const QR_ACTION: &str = "startRide";
pub const QR_VEHICLE_PARAM: &str = "vehicleId";

/// Extract the vehicle id from a ride-start QR payload.
///
/// The id is returned as scanned; whether a vehicle with that id exists is
/// up to the caller.
pub fn parse_qr_payload(raw: &str) -> ControllerResult<VehicleId> {
    let invalid = || ControllerError::InvalidQrPayload(raw.to_owned());

    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if url.scheme() != QR_SCHEME {
        return Err(invalid());
    }

    let host_matches = url.host_str().is_some_and(|h| h.eq_ignore_ascii_case(QR_ACTION));
    let path_matches = url.path().trim_matches('/').eq_ignore_ascii_case(QR_ACTION);
    if !(host_matches || path_matches) {
        return Err(invalid());
    }

    url.query_pairs()
        .find(|(k, _)| k == QR_VEHICLE_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
        .map(VehicleId::from)
        .ok_or_else(invalid)
}

/// Operator notice after a successful scan-and-start.
pub fn started_notice(vehicle: &Vehicle) -> String {
    format!("Ride started for {}", vehicle.name)
}
