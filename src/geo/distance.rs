//! Great-circle distance
//!
//! Haversine distance on a spherical Earth. Used for every distance the
//! crate reports; provider-supplied distances are never trusted.

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::geo::Coordinates;

/// Calculate the distance between two points in kilometers (Haversine formula)
///
/// The haversine term is clamped to [0, 1] before the square root so
/// rounding near antipodal points cannot push `asin` out of its domain.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Round a distance to two decimal places
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
