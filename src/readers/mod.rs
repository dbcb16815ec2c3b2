pub mod table_reader;
pub mod weather_reader;

pub use table_reader::{Table, TableReader};
pub use weather_reader::{WeatherLoadStats, WeatherReader};
