//! Fleet seeding.
//!
//! RNG draw order is part of the determinism contract: for each vehicle in
//! id order, latitude offset, longitude offset, then ride state; after all
//! vehicles, one shuffle of the id list for the Static/Dynamic partition.

use std::collections::HashMap;

use fleet_core::{GeoPoint, MobilityClass, RideState, SimRng, VehicleId};
use fleet_registry::Vehicle;

/// Generate `count` vehicles with ids `"1"..="count"` and names `"Veh<id>"`,
/// positioned uniformly within `±jitter_deg` of `center` on each axis, each
/// in a uniformly chosen ride state.  Positions past a pole or the
/// antimeridian are normalized.
pub fn seed_vehicles(center: GeoPoint, count: usize, jitter_deg: f64, rng: &mut SimRng) -> Vec<Vehicle> {
    (1..=count)
        .map(|i| {
            let d_lat = rng.jitter(jitter_deg);
            let d_lon = rng.jitter(jitter_deg);
            let state = rng.choose(&RideState::ALL).copied().unwrap_or_default();
            Vehicle::new(VehicleId::new(i.to_string()), format!("Veh{i}"), center.offset(d_lat, d_lon), state)
        })
        .collect()
}

/// Mark exactly `len / 2` (rounded down) of `ids`, chosen uniformly at
/// random, as [`MobilityClass::Static`]; the rest are `Dynamic`.
pub fn partition_mobility<'a, I>(ids: I, rng: &mut SimRng) -> HashMap<VehicleId, MobilityClass>
where
    I: IntoIterator<Item = &'a VehicleId>,
{
    let mut ids: Vec<VehicleId> = ids.into_iter().cloned().collect();
    rng.shuffle(&mut ids);
    let static_count = ids.len() / 2;
    ids.into_iter()
        .enumerate()
        .map(|(i, id)| {
            let class = if i < static_count { MobilityClass::Static } else { MobilityClass::Dynamic };
            (id, class)
        })
        .collect()
}
