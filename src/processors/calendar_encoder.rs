use std::f64::consts::PI;

use crate::models::Timestamp;
use crate::utils::HolidayCalendar;

const MONTH_PERIOD: f64 = 12.0;
const HOUR_PERIOD: f64 = 24.0;
const MINUTE_PERIOD: f64 = 60.0;

/// Calendar features derived from one timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarFeatures {
    pub is_holiday: bool,
    pub is_weekend: bool,
    pub month_cos: f64,
    pub month_sin: f64,
    pub hour_cos: f64,
    pub hour_sin: f64,
    pub minute_cos: f64,
    pub minute_sin: f64,
}

impl CalendarFeatures {
    /// Text cells in `FEATURE_COLUMNS` order; flags render as `1`/`0`
    pub fn to_fields(&self) -> Vec<String> {
        vec![
            flag(self.is_holiday),
            flag(self.is_weekend),
            self.month_cos.to_string(),
            self.month_sin.to_string(),
            self.hour_cos.to_string(),
            self.hour_sin.to_string(),
            self.minute_cos.to_string(),
            self.minute_sin.to_string(),
        ]
    }
}

fn flag(value: bool) -> String {
    String::from(if value { "1" } else { "0" })
}

/// `(cos, sin)` of `2π·value/period`.
///
/// Values are used as-is, so month 12 lands on angle 2π rather than on
/// month 0's angle.
pub fn cyclical(value: i32, period: f64) -> (f64, f64) {
    let angle = 2.0 * PI * f64::from(value) / period;
    (angle.cos(), angle.sin())
}

/// Day of week by Zeller's congruence: 0 = Saturday, 1 = Sunday, ... 6 = Friday.
///
/// January and February count as months 13 and 14 of the previous year.
pub fn zeller_day_of_week(year: i32, month: i32, day: i32) -> i32 {
    let (year, month) = if month < 3 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };

    let century = year / 100;
    let year_of_century = year % 100;

    (day + (13 * (month + 1)) / 5 + year_of_century + year_of_century / 4 + century / 4
        - 2 * century)
        % 7
}

pub fn is_weekend(timestamp: &Timestamp) -> bool {
    matches!(
        zeller_day_of_week(timestamp.year(), timestamp.month(), timestamp.day()),
        0 | 1
    )
}

/// Derives holiday, weekend and cyclical time features
pub struct CalendarFeatureEncoder<'h> {
    holidays: &'h HolidayCalendar,
}

impl<'h> CalendarFeatureEncoder<'h> {
    pub fn new(holidays: &'h HolidayCalendar) -> Self {
        Self { holidays }
    }

    pub fn encode(&self, timestamp: &Timestamp) -> CalendarFeatures {
        let (month_cos, month_sin) = cyclical(timestamp.month(), MONTH_PERIOD);
        let (hour_cos, hour_sin) = cyclical(timestamp.hour(), HOUR_PERIOD);
        let (minute_cos, minute_sin) = cyclical(timestamp.minute(), MINUTE_PERIOD);

        CalendarFeatures {
            is_holiday: self.holidays.is_holiday(timestamp),
            is_weekend: is_weekend(timestamp),
            month_cos,
            month_sin,
            hour_cos,
            hour_sin,
            minute_cos,
            minute_sin,
        }
    }
}
