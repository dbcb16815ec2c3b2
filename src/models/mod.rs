pub mod group;
pub mod row;
pub mod station;
pub mod timestamp;
pub mod weather;

pub use group::GroupedRecord;
pub use row::{Header, Row, TimedRow, TimestampColumns};
pub use station::{WeatherStation, WEATHER_STATIONS};
pub use timestamp::Timestamp;
pub use weather::{WeatherRecord, WeatherTable};
