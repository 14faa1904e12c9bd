//! The `FleetSnapshot` value handed to observers.

use fleet_core::{GeoPoint, RideState, VehicleId};

use crate::Vehicle;

/// Minimum span, in degrees, of a fitted map region on either axis.
pub const MIN_REGION_SPAN_DEG: f64 = 0.005;

/// Padding factor applied to the pins' extent when fitting a region.
pub const REGION_PADDING: f64 = 1.3;

/// An ordered, owned copy of the fleet at one instant.
///
/// Snapshots are plain values: cloning one and mutating the clone never
/// affects the registry or any other snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FleetSnapshot {
    vehicles: Vec<Vehicle>,
}

impl FleetSnapshot {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    #[inline]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn into_vehicles(self) -> Vec<Vehicle> {
        self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vehicle> {
        self.vehicles.iter()
    }

    /// Find a vehicle by id (linear scan; fleets are small).
    pub fn get(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    /// Set the ride state of `id` in this copy.  Returns `false` when the id
    /// is absent, leaving the snapshot untouched.
    pub fn set_state(&mut self, id: &VehicleId, state: RideState) -> bool {
        match self.vehicles.iter_mut().find(|v| v.id() == id) {
            Some(v) => {
                v.state = state;
                true
            }
            None => false,
        }
    }

    /// Pins for the map surface, in snapshot order.
    pub fn pins(&self) -> Vec<MapPin> {
        self.vehicles
            .iter()
            .map(|v| MapPin {
                id:        v.id().clone(),
                latitude:  v.position.lat,
                longitude: v.position.lon,
                state:     v.state,
            })
            .collect()
    }

    /// Region that frames every vehicle: the center of the pins' bounding
    /// box, with each span padded by [`REGION_PADDING`] and clamped to at
    /// least [`MIN_REGION_SPAN_DEG`].  `None` for an empty fleet.
    pub fn fit_region(&self) -> Option<MapRegion> {
        let first = self.vehicles.first()?.position;
        let (mut min, mut max) = (first, first);
        for v in &self.vehicles[1..] {
            min.lat = min.lat.min(v.position.lat);
            min.lon = min.lon.min(v.position.lon);
            max.lat = max.lat.max(v.position.lat);
            max.lon = max.lon.max(v.position.lon);
        }
        Some(MapRegion {
            center:   GeoPoint::new((min.lat + max.lat) / 2.0, (min.lon + max.lon) / 2.0),
            lat_span: ((max.lat - min.lat) * REGION_PADDING).max(MIN_REGION_SPAN_DEG),
            lon_span: ((max.lon - min.lon) * REGION_PADDING).max(MIN_REGION_SPAN_DEG),
        })
    }
}

impl From<Vec<Vehicle>> for FleetSnapshot {
    fn from(vehicles: Vec<Vehicle>) -> Self {
        Self::new(vehicles)
    }
}

impl<'a> IntoIterator for &'a FleetSnapshot {
    type Item = &'a Vehicle;
    type IntoIter = std::slice::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}

/// What the map surface needs to draw one vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPin {
    pub id:        VehicleId,
    pub latitude:  f64,
    pub longitude: f64,
    pub state:     RideState,
}

/// A map viewport: center plus latitude/longitude spans in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub center:   GeoPoint,
    pub lat_span: f64,
    pub lon_span: f64,
}
