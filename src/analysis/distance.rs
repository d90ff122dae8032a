//! Great-circle distances, used to price lanes before they are added.

use crate::model::{Lane, Location};
use crate::network::SupplyChainNetwork;

/// Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_372_800.0;

/// Great-circle distance in meters between two locations given in radians.
///
/// Symmetric, non-negative, and zero for coinciding locations.
pub fn haversine_distance(a: &Location, b: &Location) -> f64 {
    let delta_lat = b.latitude - a.latitude;
    let delta_lon = b.longitude - a.longitude;
    let h = (delta_lat / 2.0).sin().powi(2)
        + a.latitude.cos() * b.latitude.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points.
    2.0 * EARTH_RADIUS_M * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Length of `lane` between its registered endpoints, or `None` if either is unknown.
pub fn lane_distance(network: &SupplyChainNetwork, lane: &Lane) -> Option<f64> {
    let origin = network.location_of(&lane.origin)?;
    let destination = network.location_of(&lane.destination)?;
    Some(haversine_distance(origin, destination))
}
