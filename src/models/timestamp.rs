use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ProcessingError, Result};

/// Naive local calendar timestamp with minute resolution.
///
/// Ordering is lexicographic over (year, month, day, hour, minute) and no
/// calendar normalization is applied, so `month = 13` sorts after December
/// rather than wrapping into the next year. Fields are fixed at construction.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Timestamp {
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
}

/// One step of a `scanf`-style pattern used by [`Timestamp::parse_time_text`].
#[derive(Clone, Copy)]
enum Token {
    Int,
    Literal(char),
    Whitespace,
}

const DATE_T_TIME: [Token; 9] = [
    Token::Int,
    Token::Literal('-'),
    Token::Int,
    Token::Literal('-'),
    Token::Int,
    Token::Literal('T'),
    Token::Int,
    Token::Literal(':'),
    Token::Int,
];

const DATE_SPACE_TIME: [Token; 9] = [
    Token::Int,
    Token::Literal('-'),
    Token::Int,
    Token::Literal('-'),
    Token::Int,
    Token::Whitespace,
    Token::Int,
    Token::Literal(':'),
    Token::Int,
];

impl Timestamp {
    /// The degenerate all-zero timestamp, earlier than any real reading.
    pub const ZERO: Timestamp = Timestamp {
        year: 0,
        month: 0,
        day: 0,
        hour: 0,
        minute: 0,
    };

    pub fn new(year: i32, month: i32, day: i32, hour: i32, minute: i32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> i32 {
        self.month
    }

    pub fn day(&self) -> i32 {
        self.day
    }

    pub fn hour(&self) -> i32 {
        self.hour
    }

    pub fn minute(&self) -> i32 {
        self.minute
    }

    /// Parse a combined time column in `YYYY-MM-DDTHH:MM` or `YYYY-MM-DD HH:MM` form.
    ///
    /// Matching is `scanf`-like: integers may carry a sign and leading
    /// whitespace, and anything after the minute field (seconds, offsets) is
    /// ignored. Any other shape is rejected with
    /// [`ProcessingError::UnrecognizedTimestamp`].
    pub fn parse_time_text(text: &str) -> Result<Self> {
        for pattern in [&DATE_T_TIME, &DATE_SPACE_TIME] {
            if let Some([year, month, day, hour, minute]) = scan(text, pattern) {
                return Ok(Self::new(year, month, day, hour, minute));
            }
        }

        Err(ProcessingError::UnrecognizedTimestamp(text.to_string()))
    }

    /// Date packed as `YYYYMMDD`
    pub fn packed_date(&self) -> i32 {
        self.year * 10000 + self.month * 100 + self.day
    }

    /// Minutes since the Unix epoch, treating the fields as naive local time.
    ///
    /// Out-of-range fields carry into the next unit the way `mktime` does
    /// (month 13 is January of the following year, day 0 is the last day of
    /// the previous month), so month lengths and leap years are respected.
    pub fn epoch_minutes(&self) -> Result<i64> {
        let out_of_range = || ProcessingError::TimestampOutOfRange(self.to_string());

        let months = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let year = i32::try_from(months.div_euclid(12)).map_err(|_| out_of_range())?;
        let month = months.rem_euclid(12) as u32 + 1;

        let offset = Duration::days(i64::from(self.day) - 1)
            + Duration::hours(i64::from(self.hour))
            + Duration::minutes(i64::from(self.minute));

        let instant = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .and_then(|midnight| midnight.checked_add_signed(offset))
            .ok_or_else(out_of_range)?;

        Ok(instant.and_utc().timestamp().div_euclid(60))
    }

    /// Absolute calendar distance to `other` in whole minutes
    pub fn abs_diff_minutes(&self, other: &Timestamp) -> Result<i64> {
        Ok((self.epoch_minutes()? - other.epoch_minutes()?).abs())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

fn scan(text: &str, pattern: &[Token]) -> Option<[i32; 5]> {
    let mut rest = text;
    let mut values = [0i32; 5];
    let mut filled = 0;

    for token in pattern {
        match token {
            Token::Int => {
                let (value, remaining) = scan_int(rest)?;
                *values.get_mut(filled)? = value;
                filled += 1;
                rest = remaining;
            }
            Token::Literal(expected) => {
                rest = rest.strip_prefix(*expected)?;
            }
            Token::Whitespace => {
                rest = rest.trim_start();
            }
        }
    }

    (filled == values.len()).then_some(values)
}

fn scan_int(text: &str) -> Option<(i32, &str)> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits_len = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return None;
    }

    let end = sign_len + digits_len;
    let value = text[..end].parse::<i32>().ok()?;
    Some((value, &text[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_lexicographic() {
        let earlier = Timestamp::new(2020, 12, 31, 23, 59);
        let later = Timestamp::new(2021, 1, 1, 0, 0);
        assert!(earlier < later);

        // No wrapping: month 13 of 2020 still sorts inside 2020.
        let odd = Timestamp::new(2020, 13, 1, 0, 0);
        assert!(odd > earlier);
        assert!(odd < later);

        assert!(Timestamp::new(2020, 1, 1, 10, 5) > Timestamp::new(2020, 1, 1, 10, 0));
        assert!(Timestamp::ZERO < Timestamp::new(1, 1, 1, 0, 0));
    }

    #[test]
    fn test_parse_time_text_accepts_both_separators() {
        let t = Timestamp::parse_time_text("2006-01-01T13:45").unwrap();
        assert_eq!(t, Timestamp::new(2006, 1, 1, 13, 45));

        let s = Timestamp::parse_time_text("2006-01-01 13:45").unwrap();
        assert_eq!(s, t);

        // Trailing seconds are ignored like scanf does.
        let with_seconds = Timestamp::parse_time_text("2006-01-01T13:45:30").unwrap();
        assert_eq!(with_seconds, t);
    }

    #[test]
    fn test_parse_time_text_rejects_other_formats() {
        for text in ["", "2006/01/01 13:45", "2006-01-01", "13:45", "garbage"] {
            match Timestamp::parse_time_text(text) {
                Err(ProcessingError::UnrecognizedTimestamp(raw)) => assert_eq!(raw, text),
                other => panic!("expected UnrecognizedTimestamp for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_packed_date() {
        assert_eq!(Timestamp::new(2020, 7, 4, 8, 30).packed_date(), 20200704);
        assert_eq!(Timestamp::new(1999, 12, 31, 0, 0).packed_date(), 19991231);
    }

    #[test]
    fn test_epoch_minutes() {
        assert_eq!(Timestamp::new(1970, 1, 1, 0, 0).epoch_minutes().unwrap(), 0);
        assert_eq!(Timestamp::new(1970, 1, 2, 0, 1).epoch_minutes().unwrap(), 1441);
        assert_eq!(Timestamp::new(1969, 12, 31, 23, 0).epoch_minutes().unwrap(), -60);
    }

    #[test]
    fn test_abs_diff_respects_calendar() {
        // Leap day between the two readings.
        let before = Timestamp::new(2020, 2, 28, 23, 0);
        let after = Timestamp::new(2020, 3, 1, 1, 0);
        assert_eq!(before.abs_diff_minutes(&after).unwrap(), 26 * 60);
        assert_eq!(after.abs_diff_minutes(&before).unwrap(), 26 * 60);

        // Month boundary without a leap day.
        let jan = Timestamp::new(2021, 1, 31, 23, 30);
        let feb = Timestamp::new(2021, 2, 1, 0, 15);
        assert_eq!(jan.abs_diff_minutes(&feb).unwrap(), 45);
    }

    #[test]
    fn test_out_of_range_fields_carry() {
        let december = Timestamp::new(2020, 13, 1, 0, 0);
        let january = Timestamp::new(2021, 1, 1, 0, 0);
        assert_eq!(december.abs_diff_minutes(&january).unwrap(), 0);

        let day_zero = Timestamp::new(2021, 3, 0, 0, 0);
        let last_of_feb = Timestamp::new(2021, 2, 28, 0, 0);
        assert_eq!(day_zero.abs_diff_minutes(&last_of_feb).unwrap(), 0);

        assert!(Timestamp::ZERO.epoch_minutes().is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Timestamp::new(2000, 1, 3, 7, 5).to_string(),
            "2000-01-03 07:05"
        );
    }
}
