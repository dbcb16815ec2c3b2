pub mod constants;
pub mod holidays;
pub mod progress;

pub use constants::*;
pub use holidays::{HolidayCalendar, US_FEDERAL_HOLIDAYS};
pub use progress::ProgressReporter;
