//! age.rs
//!
//! This module provides the age calculation behind the "Calculate" form in the
//! format:
//!     "X years and Y month Z days."
//!
//! The figure is a day-count decomposition rather than a calendar diff:
//!   • whole days between the two dates
//!   • minus a leap-day correction from the Gregorian density formula
//!   • split into fixed 365-day years and 30-day months
//!
//! Real months are 28–31 days long, so the result can be a few days off a
//! calendar-accurate age. The figures users see depend on this exact formula;
//! do not replace it with a calendar-aware borrow.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use thiserror::Error;
use tracing::debug;

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgeError {
    #[error("month {month} is out of range (1-12)")]
    InvalidMonth { month: u32 },

    #[error("day {day} is out of range for {year:04}-{month:02} ({max} days)")]
    InvalidDay {
        year: i32,
        month: u32,
        day: u32,
        max: u32,
    },

    #[error("year {year} is outside the supported calendar range")]
    InvalidYear { year: i32 },

    #[error("cannot parse '{input}' as a date (expected DD/MM/YYYY or YYYY-MM-DD)")]
    Unparsable { input: String },

    #[error("birth date {birth} is after {today}")]
    BirthDateAfterToday {
        birth: CalendarDate,
        today: CalendarDate,
    },
}

/// A validated Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, AgeError> {
        if !(1..=12).contains(&month) {
            return Err(AgeError::InvalidMonth { month });
        }

        let max = days_in_month(year, month).ok_or(AgeError::InvalidYear { year })?;
        if day == 0 || day > max {
            return Err(AgeError::InvalidDay {
                year,
                month,
                day,
                max,
            });
        }

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(AgeError::InvalidYear { year })
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }

    /// Whole days from `earlier` to `self` (negative if `earlier` is later).
    pub fn days_since(self, earlier: CalendarDate) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Accepts the form's display format `DD/MM/YYYY` as well as ISO `YYYY-MM-DD`.
impl FromStr for CalendarDate {
    type Err = AgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let unparsable = || AgeError::Unparsable {
            input: input.to_string(),
        };

        let (year, month, day) = if let Some((day, rest)) = input.split_once('/') {
            let (month, year) = rest.split_once('/').ok_or_else(unparsable)?;
            (year, month, day)
        } else {
            let (year, rest) = input.split_once('-').ok_or_else(unparsable)?;
            let (month, day) = rest.split_once('-').ok_or_else(unparsable)?;
            (year, month, day)
        };

        let year = year.parse::<i32>().map_err(|_| unparsable())?;
        let month = month.parse::<u32>().map_err(|_| unparsable())?;
        let day = day.parse::<u32>().map_err(|_| unparsable())?;

        Self::new(year, month, day)
    }
}

/// Age split into 365-day years, 30-day months and leftover days.
///
/// `months` is normally 0–11 but reaches 12 when the leftover after whole
/// years is 360–364 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeResult {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl fmt::Display for AgeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years and {} month {} days.",
            self.years, self.months, self.days
        )
    }
}

/// Computes the age of someone born on `birth` as of `today`.
pub fn compute_age(birth: CalendarDate, today: CalendarDate) -> Result<AgeResult, AgeError> {
    if birth > today {
        return Err(AgeError::BirthDateAfterToday { birth, today });
    }

    let total_days = today.days_since(birth);
    let leap_days = leap_count(today.year(), birth.year() - 1);

    // Never negative for birth <= today; the floor keeps the casts total.
    let adjusted = (total_days - leap_days).max(0);

    let years = adjusted / DAYS_PER_YEAR;
    let remainder = adjusted % DAYS_PER_YEAR;
    let months = remainder / DAYS_PER_MONTH;
    let days = remainder % DAYS_PER_MONTH;

    debug!(
        %birth,
        %today,
        total_days,
        leap_days,
        adjusted,
        "computed age"
    );

    Ok(AgeResult {
        years: years as u32,
        months: months as u32,
        days: days as u32,
    })
}

/// Leap days between `prior_year` and `current_year` estimated from the
/// Gregorian density formula, rounded half-to-even.
pub fn leap_count(current_year: i32, prior_year: i32) -> i64 {
    (leap_density(current_year) - leap_density(prior_year)).round_ties_even() as i64
}

/// `y/4 - y/100 + y/400` with real division (no truncation).
fn leap_density(year: i32) -> f64 {
    let y = f64::from(year);
    y / 4.0 - y / 100.0 + y / 400.0
}

/// Length of `month` in `year` (28–31), or `None` outside chrono's year range.
/// `month` must already be in 1–12.
fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    Some(next.signed_duration_since(first).num_days() as u32)
}
