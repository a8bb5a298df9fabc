//! Shared utility functions for the feeding point crates.

/// Geographic helpers
pub mod geo {
    use crate::error::CoordinateError;
    use serde::{Deserialize, Serialize};

    /// Mean Earth radius in kilometers.
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// A validated latitude/longitude pair in decimal degrees.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct LatLon {
        pub latitude: f64,
        pub longitude: f64,
    }

    impl LatLon {
        /// Build a coordinate, rejecting non-finite or out-of-range values.
        pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
            if !latitude.is_finite() || !longitude.is_finite() {
                return Err(CoordinateError(format!(
                    "non-finite coordinate ({}, {})",
                    latitude, longitude
                )));
            }
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(CoordinateError(format!("latitude {} out of range", latitude)));
            }
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(CoordinateError(format!(
                    "longitude {} out of range",
                    longitude
                )));
            }
            Ok(Self {
                latitude,
                longitude,
            })
        }

        /// Great-circle distance to `other` in kilometers.
        pub fn distance_km(&self, other: &LatLon) -> f64 {
            haversine_km(self, other)
        }
    }

    /// Haversine great-circle distance between two points, in kilometers.
    pub fn haversine_km(a: &LatLon, b: &LatLon) -> f64 {
        let lat1 = a.latitude.to_radians();
        let lat2 = b.latitude.to_radians();
        let d_lat = (b.latitude - a.latitude).to_radians();
        let d_lon = (b.longitude - a.longitude).to_radians();

        let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        // clamp guards against h drifting just above 1.0 for antipodal points
        let c = 2.0 * h.sqrt().min(1.0).asin();
        EARTH_RADIUS_KM * c
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn sao_paulo() -> LatLon {
            LatLon::new(-23.55052, -46.633308).unwrap()
        }

        #[test]
        fn test_distance_to_self_is_zero() {
            let p = sao_paulo();
            assert_eq!(haversine_km(&p, &p), 0.0);
        }

        #[test]
        fn test_distance_is_symmetric() {
            let a = sao_paulo();
            let b = LatLon::new(-22.906847, -43.172896).unwrap(); // Rio de Janeiro
            assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-12);
            // ~360 km between the two city centres
            let d = a.distance_km(&b);
            assert!((d - 360.0).abs() < 10.0, "unexpected distance {}", d);
        }

        #[test]
        fn test_one_degree_of_latitude() {
            let a = LatLon::new(0.0, 0.0).unwrap();
            let b = LatLon::new(1.0, 0.0).unwrap();
            let d = haversine_km(&a, &b);
            assert!((d - 111.19).abs() < 0.01, "unexpected distance {}", d);
        }

        #[test]
        fn test_invalid_coordinates_rejected() {
            assert!(LatLon::new(91.0, 0.0).is_err());
            assert!(LatLon::new(0.0, -180.5).is_err());
            assert!(LatLon::new(f64::NAN, 0.0).is_err());
            assert!(LatLon::new(-90.0, 180.0).is_ok());
        }
    }
}

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, NaiveTime, Utc};

    /// Format a comment timestamp for display, e.g. "19/10 14:05".
    pub fn format_comment_timestamp(at: &DateTime<Utc>) -> String {
        at.format("%d/%m %H:%M").to_string()
    }

    /// Format a wall-clock time as "HH:MM:SS", used in generated station titles.
    pub fn format_clock(time: &NaiveTime) -> String {
        time.format("%H:%M:%S").to_string()
    }

    /// Parse an RFC 3339 timestamp as returned by the backend.
    pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::TimeZone;

        #[test]
        fn test_format_comment_timestamp() {
            let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
            assert_eq!(format_comment_timestamp(&at), "07/03 09:05");
        }

        #[test]
        fn test_format_clock() {
            let t = NaiveTime::from_hms_opt(8, 30, 2).unwrap();
            assert_eq!(format_clock(&t), "08:30:02");
        }

        #[test]
        fn test_parse_timestamp() {
            let parsed = parse_timestamp("2024-05-01T12:00:00+00:00").unwrap();
            assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
            assert!(parse_timestamp("yesterday").is_err());
        }
    }
}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    pub struct CoordinateError(pub String);

    impl fmt::Display for CoordinateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Coordinate error: {}", self.0)
        }
    }

    impl std::error::Error for CoordinateError {}
}
