use crate::models::BoundingBox;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Great-circle distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance between two optional coordinate pairs
///
/// `None` is the "distance unavailable" sentinel: it is returned whenever
/// either side is missing coordinates, so callers never see NaN. Filters
/// treat the sentinel as always passing; the ranker orders it last.
#[inline]
pub fn distance_between(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<f64> {
    match (a, b) {
        (Some((lat1, lon1)), Some((lat2, lon2))) => {
            Some(haversine_distance(lat1, lon1, lat2, lon2))
        }
        _ => None,
    }
}

/// Round a distance to one decimal place for display
///
/// Only the serialization boundary rounds; sorting always uses the raw value.
#[inline]
pub fn round_for_display(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

/// Calculate a bounding box around a center point
///
/// This is much faster than Haversine and is pushed into the backend
/// candidate query as a pre-filter. 1° latitude ≈ 111km, 1° longitude
/// ≈ 111km * cos(latitude). Candidates are still exactly filtered by
/// Haversine afterwards, so the box only has to be conservative.
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / 111.0;
    let lon_delta = radius_km / (111.0 * lat.to_radians().cos().abs());

    BoundingBox {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Amsterdam to Rotterdam is approximately 57 km
        let ams_lat = 52.3676;
        let ams_lon = 4.9041;
        let rtm_lat = 51.9244;
        let rtm_lon = 4.4777;

        let distance = haversine_distance(ams_lat, ams_lon, rtm_lat, rtm_lon);
        assert!((distance - 57.0).abs() < 5.0, "Distance should be ~57km, got {}", distance);
    }

    #[test]
    fn test_distance_symmetry() {
        let d_ab = haversine_distance(52.3676, 4.9041, 48.8566, 2.3522);
        let d_ba = haversine_distance(48.8566, 2.3522, 52.3676, 4.9041);
        assert!((d_ab - d_ba).abs() < 1e-9);
    }

    #[test]
    fn test_distance_identity() {
        let d = haversine_distance(52.3676, 4.9041, 52.3676, 4.9041);
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn test_missing_coordinates_yield_sentinel() {
        assert!(distance_between(None, Some((52.0, 4.9))).is_none());
        assert!(distance_between(Some((52.0, 4.9)), None).is_none());
        assert!(distance_between(None, None).is_none());

        let d = distance_between(Some((52.0, 4.9)), Some((52.0, 4.9))).unwrap();
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn test_round_for_display() {
        assert_eq!(round_for_display(12.3456), 12.3);
        assert_eq!(round_for_display(12.35), 12.4);
        assert_eq!(round_for_display(0.0), 0.0);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = calculate_bounding_box(52.3676, 4.9041, 10.0);

        assert!(bbox.min_lat < 52.3676);
        assert!(bbox.max_lat > 52.3676);
        assert!(bbox.min_lon < 4.9041);
        assert!(bbox.max_lon > 4.9041);

        // 20km span / 111km per degree = ~0.18 degrees of latitude
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!((lat_span - 0.18).abs() < 0.02, "Lat span should be ~0.18 degrees");
    }
}
