//! Julian Day calculations shared by the calendar and solar modules.
//!
//! This module provides the Gregorian ↔ Julian Day (JD) kernel following Meeus,
//! "Astronomical Algorithms", 2nd edition, chapter 7. A Gregorian date maps to the JD of
//! its midnight (a `.5` value); the reverse conversion accepts any JD within the civil day.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::cast_sign_loss)]

use crate::error::check_month;
use crate::math::floor;
use crate::{Error, Result};
use core::fmt;
#[cfg(feature = "chrono")]
use chrono::{Datelike, NaiveDate, Timelike};

/// Julian Day Number of the first day of the Gregorian calendar (1582-10-15).
pub const GREGORIAN_REFORM_JD: f64 = 2_299_161.0;

/// Julian Day Number for J2000.0 epoch (2000-01-01 12:00:00 UTC)
pub const J2000_JD: f64 = 2_451_545.0;

/// A calendar date in the Gregorian calendar.
///
/// Dates before 1582-10-15 follow the proleptic Julian calendar, as the Julian Day kernel
/// does. Use [`GregorianDate::new`] for validated construction; dates returned by the
/// conversion functions are always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GregorianDate {
    year: i32,
    month: u32,
    day: u32,
}

impl GregorianDate {
    /// Creates a validated Gregorian date.
    ///
    /// # Arguments
    /// * `year` - Year (can be zero or negative, astronomical numbering)
    /// * `month` - Month (1-12)
    /// * `day` - Day of month (1-31, checked against the month length)
    ///
    /// # Errors
    /// Returns `InvalidDate` if the month is outside 1-12, the day does not exist in that
    /// month, or the date falls into the 1582-10-05..=1582-10-14 reform gap.
    ///
    /// # Example
    /// ```
    /// # use taqwim::GregorianDate;
    /// let date = GregorianDate::new(2024, 2, 29).unwrap();
    /// assert_eq!(date.day(), 29);
    /// assert!(GregorianDate::new(2023, 2, 29).is_err());
    /// ```
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        check_month(month)?;
        if year == 1582 && month == 10 && (5..=14).contains(&day) {
            return Err(Error::invalid_date(
                "dates 1582-10-05 through 1582-10-14 do not exist in Gregorian calendar",
            ));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(Error::invalid_date("day is out of range for month"));
        }
        Ok(Self { year, month, day })
    }

    /// Gets the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Gets the month (1-12).
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Gets the day of month (1-31).
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Julian Day of this date's midnight (always ends in `.5`).
    ///
    /// # Example
    /// ```
    /// # use taqwim::GregorianDate;
    /// let y2k = GregorianDate::new(2000, 1, 1).unwrap();
    /// assert_eq!(y2k.julian_day(), 2_451_544.5);
    /// ```
    #[must_use]
    pub fn julian_day(&self) -> f64 {
        gregorian_to_jd(self.year, self.month, self.day)
    }

    /// Gets the Gregorian date containing the given Julian Day.
    #[must_use]
    pub fn from_julian_day(jd: f64) -> Self {
        jd_to_gregorian(jd)
    }

    /// Returns the date `days` days later (or earlier, for negative values).
    #[must_use]
    pub fn add_days(self, days: i32) -> Self {
        jd_to_gregorian(self.julian_day() + f64::from(days))
    }
}

impl fmt::Display for GregorianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Converts a Gregorian calendar date to the Julian Day of its midnight.
///
/// January and February are treated as months 13 and 14 of the previous year, and the
/// century correction is applied only from the Gregorian reform (JD 2299161) onwards.
/// No validation is performed: out-of-range components yield an arithmetic, possibly
/// meaningless, value. Use [`GregorianDate::new`] for checked input.
///
/// # Example
/// ```
/// # use taqwim::time::gregorian_to_jd;
/// assert_eq!(gregorian_to_jd(1970, 1, 1), 2_440_587.5);
/// ```
#[must_use]
pub fn gregorian_to_jd(year: i32, month: u32, day: u32) -> f64 {
    let mut y = f64::from(year);
    let mut m = f64::from(month);

    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }

    let mut jd =
        floor(365.25 * (y + 4716.0)) + floor(30.6001 * (m + 1.0)) + f64::from(day) - 1524.5;

    if jd >= GREGORIAN_REFORM_JD {
        let a = floor(y / 100.0);
        let b = 2.0 - a + floor(a / 4.0);
        jd += b;
    }

    jd
}

/// Converts a Julian Day to the Gregorian calendar date containing it.
///
/// Any JD within the civil day (midnight inclusive to next midnight exclusive) maps to
/// that day, so `jd_to_gregorian(gregorian_to_jd(y, m, d))` reproduces `(y, m, d)`.
#[must_use]
pub fn jd_to_gregorian(jd: f64) -> GregorianDate {
    let z = floor(jd + 0.5);
    let a = if z < GREGORIAN_REFORM_JD {
        z
    } else {
        let alpha = floor((z - 1_867_216.25) / 36_524.25);
        z + 1.0 + alpha - floor(alpha / 4.0)
    };

    let b = a + 1524.0;
    let c = floor((b - 122.1) / 365.25);
    let d = floor(365.25 * c);
    let e = floor((b - d) / 30.6001);

    let day = b - d - floor(30.6001 * e);
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    GregorianDate {
        year: year as i32,
        month: month as u32,
        day: day as u32,
    }
}

/// Whether `year` is a leap year in the calendar in force for that year.
///
/// Years from 1582 onwards use the Gregorian rule, earlier years the Julian rule.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    if year >= 1582 {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    } else {
        year.rem_euclid(4) == 0
    }
}

/// Number of days in a Gregorian month; 0 for a month outside 1-12.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

#[cfg(feature = "chrono")]
impl From<NaiveDate> for GregorianDate {
    /// Copies the year/month/day fields. `NaiveDate` is proleptic Gregorian, so the two
    /// agree chronologically from 1582-10-15 onwards.
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<GregorianDate> for NaiveDate {
    type Error = Error;

    fn try_from(date: GregorianDate) -> Result<Self> {
        Self::from_ymd_opt(date.year, date.month, date.day)
            .ok_or_else(|| Error::invalid_date("date is not representable as chrono::NaiveDate"))
    }
}

/// Converts a wall-clock time to a decimal hour of day (e.g. 13:30:00 → 13.5).
///
/// This is the reference-time form used by
/// [`PrayerTimes::next_prayer`](crate::PrayerTimes::next_prayer) and
/// [`format_countdown`](crate::format_countdown).
#[cfg(feature = "chrono")]
#[must_use]
pub fn decimal_hour<T: Timelike>(time: &T) -> f64 {
    f64::from(time.hour())
        + f64::from(time.minute()) / 60.0
        + (f64::from(time.second()) + f64::from(time.nanosecond()) / 1e9) / 3600.0
}
