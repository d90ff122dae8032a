//! Pure derived computations over the network.
pub mod distance;

pub use distance::{haversine_distance, lane_distance, EARTH_RADIUS_M};
