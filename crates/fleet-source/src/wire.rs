//! Backend wire format.
//!
//! ```text
//! GET   /vehicles       → [{id, name, latitude, longitude, state}]
//! PATCH /vehicles/{id}  ← {"state": "in_progress" | "stopped"}
//! POST  /history        ← {vehicleId, action, timestamp}
//! GET   /history        → [{id, vehicleId, action, timestamp}]
//! ```
//!
//! Timestamps are ISO-8601 (RFC 3339) strings.  Decoding is all-or-nothing:
//! one bad record fails the whole payload.

use chrono::{DateTime, Utc};
use fleet_core::{GeoPoint, RideState, VehicleId};
use fleet_registry::{FleetSnapshot, HistoryEvent, Vehicle};
use serde::{Deserialize, Serialize};

use crate::{SourceError, SourceResult};

/// One element of `GET /vehicles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id:        VehicleId,
    pub name:      String,
    pub latitude:  f64,
    pub longitude: f64,
    pub state:     RideState,
}

impl From<VehicleRecord> for Vehicle {
    fn from(r: VehicleRecord) -> Self {
        Vehicle::new(r.id, r.name, GeoPoint::new(r.latitude, r.longitude), r.state)
    }
}

impl From<&Vehicle> for VehicleRecord {
    fn from(v: &Vehicle) -> Self {
        Self {
            id:        v.id().clone(),
            name:      v.name.clone(),
            latitude:  v.position.lat,
            longitude: v.position.lon,
            state:     v.state,
        }
    }
}

/// Body of `PATCH /vehicles/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatePatch {
    pub state: RideState,
}

/// Body of `POST /history`.  The server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHistoryRecord {
    pub vehicle_id: VehicleId,
    pub action:     String,
    pub timestamp:  DateTime<Utc>,
}

/// Decode a `GET /vehicles` body into a snapshot.
///
/// Fails with [`SourceError::MalformedPayload`] on any JSON error or on a
/// coordinate outside [-90, 90] × [-180, 180].
pub fn decode_vehicles(body: &[u8]) -> SourceResult<FleetSnapshot> {
    let records: Vec<VehicleRecord> = serde_json::from_slice(body)?;
    let mut vehicles = Vec::with_capacity(records.len());
    for record in records {
        let position = GeoPoint::new(record.latitude, record.longitude);
        if !position.is_valid() {
            return Err(SourceError::MalformedPayload(format!(
                "vehicle {} has out-of-range position {position}",
                record.id
            )));
        }
        vehicles.push(Vehicle::from(record));
    }
    Ok(FleetSnapshot::new(vehicles))
}

/// Decode a `GET /history` body.
pub fn decode_history(body: &[u8]) -> SourceResult<Vec<HistoryEvent>> {
    Ok(serde_json::from_slice(body)?)
}
