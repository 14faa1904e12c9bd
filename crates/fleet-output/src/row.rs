//! Plain data row types written by output backends.

use fleet_registry::{HistoryEvent, Vehicle};

/// One vehicle as seen in the `tick`-th received snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSnapshotRow {
    /// Snapshot sequence number, counted from 1 by the controller.
    pub tick:      u64,
    pub id:        String,
    pub name:      String,
    pub latitude:  f64,
    pub longitude: f64,
    pub state:     &'static str,
}

impl VehicleSnapshotRow {
    pub fn from_vehicle(tick: u64, v: &Vehicle) -> Self {
        Self {
            tick,
            id:        v.id().to_string(),
            name:      v.name.clone(),
            latitude:  v.position.lat,
            longitude: v.position.lon,
            state:     v.state.as_str(),
        }
    }
}

/// One history event.  `timestamp` is RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub id:         u64,
    pub vehicle_id: String,
    pub action:     String,
    pub timestamp:  String,
}

impl From<&HistoryEvent> for HistoryRow {
    fn from(e: &HistoryEvent) -> Self {
        Self {
            id:         e.id.0,
            vehicle_id: e.vehicle_id.to_string(),
            action:     e.action.clone(),
            timestamp:  e.timestamp.to_rfc3339(),
        }
    }
}
