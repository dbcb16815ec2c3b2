use crate::error::{ProcessingError, Result};
use crate::models::{WeatherStation, WEATHER_STATIONS};

/// Nearest-neighbour lookup over a fixed station catalog
#[derive(Debug, Clone, Copy)]
pub struct StationAssigner<'a> {
    first: &'a WeatherStation,
    rest: &'a [WeatherStation],
}

impl StationAssigner<'static> {
    pub fn new() -> Self {
        let [first, rest @ ..] = &WEATHER_STATIONS;
        Self { first, rest }
    }
}

impl<'a> StationAssigner<'a> {
    pub fn with_catalog(stations: &'a [WeatherStation]) -> Result<Self> {
        let (first, rest) = stations.split_first().ok_or_else(|| {
            ProcessingError::MissingData("station catalog is empty".to_string())
        })?;
        Ok(Self { first, rest })
    }

    /// Id of the station closest to the point, by squared distance in degrees.
    ///
    /// The comparison is strict, so on a tie the station earlier in the
    /// catalog wins.
    pub fn nearest(&self, latitude: f64, longitude: f64) -> i32 {
        let mut closest_id = self.first.id;
        let mut closest_distance = self.first.distance_squared(latitude, longitude);

        for station in self.rest {
            let distance = station.distance_squared(latitude, longitude);
            if distance < closest_distance {
                closest_distance = distance;
                closest_id = station.id;
            }
        }

        closest_id
    }
}

impl Default for StationAssigner<'static> {
    fn default() -> Self {
        Self::new()
    }
}
