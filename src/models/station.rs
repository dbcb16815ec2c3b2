use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeatherStation {
    pub id: i32,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl WeatherStation {
    pub const fn new(id: i32, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            latitude,
            longitude,
        }
    }

    /// Squared Euclidean distance in raw degrees, with no projection correction
    pub fn distance_squared(&self, latitude: f64, longitude: f64) -> f64 {
        let delta_latitude = latitude - self.latitude;
        let delta_longitude = longitude - self.longitude;
        delta_latitude * delta_latitude + delta_longitude * delta_longitude
    }
}

/// Weather stations covering the New York City area.
///
/// Id 10 duplicated another station and was removed. Catalog order is
/// significant: it decides ties in nearest-station lookups.
pub const WEATHER_STATIONS: [WeatherStation; 13] = [
    WeatherStation::new(0, 40.878735, -73.86914),
    WeatherStation::new(1, 40.808434, -73.89206),
    WeatherStation::new(2, 40.597538, -73.96039),
    WeatherStation::new(3, 40.667835, -73.93768),
    WeatherStation::new(4, 40.738136, -73.91489),
    WeatherStation::new(5, 40.738136, -74.04254),
    WeatherStation::new(6, 40.808434, -74.0199),
    WeatherStation::new(7, 40.738136, -74.17023),
    WeatherStation::new(8, 40.738136, -73.78723),
    WeatherStation::new(9, 40.667835, -73.81021),
    WeatherStation::new(11, 40.597538, -74.08771),
    WeatherStation::new(12, 40.52724, -74.237274),
    WeatherStation::new(13, 40.667835, -74.19266),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_valid() {
        for station in &WEATHER_STATIONS {
            assert!(station.validate().is_ok(), "station {} invalid", station.id);
        }
        assert!(WEATHER_STATIONS.iter().all(|s| s.id != 10));
        assert_eq!(WEATHER_STATIONS.len(), 13);
    }

    #[test]
    fn test_invalid_coordinates() {
        let station = WeatherStation::new(99, 91.0, -73.9);
        assert!(station.validate().is_err());
    }

    #[test]
    fn test_distance_squared() {
        let station = WeatherStation::new(1, 1.0, 2.0);
        assert_eq!(station.distance_squared(1.0, 2.0), 0.0);
        assert_eq!(station.distance_squared(4.0, 6.0), 25.0);
    }
}
