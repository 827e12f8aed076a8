use crate::config::constant::{AVERAGE_SPEED_KMH, EARTH_RADIUS_KM};
use crate::domain::types::Location;

/// Great-circle distance in kilometers.
pub fn haversine_distance(from: &Location, to: &Location) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lng1_rad = from.lng.to_radians();
    let lat2_rad = to.lat.to_radians();
    let lng2_rad = to.lng.to_radians();

    let delta_lat = lat2_rad - lat1_rad;
    let delta_lng = lng2_rad - lng1_rad;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can leave `a` just above 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Hours needed to cover `distance_km` at the assumed average speed.
pub fn travel_time(distance_km: f64) -> f64 {
    distance_km / AVERAGE_SPEED_KMH
}
