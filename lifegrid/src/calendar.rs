//! Calendar arithmetic and the clock seam
//!
//! All dates are plain calendar days (`NaiveDate`); time of day never
//! enters the week count.

use chrono::{Local, Months, NaiveDate};

/// Format used by HTML date inputs and by the persisted `dob` key.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse a `YYYY-MM-DD` date. Surrounding whitespace is ignored.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Add whole calendar years. 29 February clamps to 28 February when the
/// target year is not a leap year. `None` past the end of the calendar.
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    let months = years.checked_mul(12)?;
    date.checked_add_months(Months::new(months))
}

/// Whole weeks from `from` to `to`, truncated toward zero.
///
/// A span of `7 * n + r` days is `n` weeks; a negative span gives a
/// negative count.
pub fn weeks_between(from: NaiveDate, to: NaiveDate) -> i64 {
    // Integer division truncates toward zero for negative spans too.
    (to - from).num_days() / 7
}
