//! The `Vehicle` data model.

use fleet_core::{GeoPoint, RideState, VehicleId};

/// One rideable vehicle.
///
/// The id is read-only outside this crate, so it cannot change after
/// construction.  Position and ride state are freely mutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub(crate) id: VehicleId,

    /// Display name shown on the map and in notices.
    pub name: String,

    pub position: GeoPoint,

    pub state: RideState,
}

impl Vehicle {
    pub fn new(id: VehicleId, name: impl Into<String>, position: GeoPoint, state: RideState) -> Self {
        Self { id, name: name.into(), position, state }
    }

    #[inline]
    pub fn id(&self) -> &VehicleId {
        &self.id
    }
}
