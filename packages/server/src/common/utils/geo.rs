//! Great-circle distance between coordinate pairs.

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two (latitude, longitude) points.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat_delta = (lat2 - lat1).to_radians();
    let lon_delta = (lon2 - lon1).to_radians();

    let a = (lat_delta / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (lon_delta / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_same_point() {
        assert!(haversine_km(-34.6083, -58.3712, -34.6083, -58.3712) < 1e-9);
    }

    #[test]
    fn known_distance_between_city_zones() {
        // Centro to Belgrano is roughly 9 km.
        let d = haversine_km(-34.6083, -58.3712, -34.5633, -58.4533);
        assert!(d > 8.0 && d < 10.5, "unexpected distance {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_km(-34.6083, -58.3712, -34.5795, -58.4198);
        let back = haversine_km(-34.5795, -58.4198, -34.6083, -58.3712);
        assert!((there - back).abs() < 1e-9);
    }
}
