//! Tabular (arithmetic) Hijri calendar.
//!
//! The civil tabular calendar approximates the lunar Hijri calendar with a fixed 30-year
//! cycle of 11 leap years. Months alternate between 30 and 29 days, and the last month
//! (Dhul Hijjah) gains a 30th day in leap years, giving years of 354 or 355 days.
//!
//! Hijri dates map to integral Julian Day numbers (the chronological day at noon), while
//! Gregorian dates map to the `.5` JD of their midnight; both conversions agree on which
//! civil day a JD denotes.
//!
//! Actual observed dates may differ by a day or two from the tabular ones. A
//! [`HijriCalendar`] carries a signed day-count adjustment that shifts every conversion
//! consistently in both directions.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::error::check_month;
use crate::math::{floor, floor_div};
use crate::time::{GregorianDate, gregorian_to_jd, jd_to_gregorian};
use crate::{Error, Result};
use core::fmt;
use core::str::FromStr;

/// Adjustment applied when none has been configured: tabular dates run one day ahead of
/// the commonly observed calendar.
pub const DEFAULT_HIJRI_ADJUSTMENT: i32 = -1;

/// Positions of the leap years within each 30-year cycle (1-indexed).
pub const INTERCALARY_YEARS: [i64; 11] = [2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29];

/// English transliterated month names, Muharram first.
pub const HIJRI_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi al-Awwal",
    "Rabi al-Thani",
    "Jumada al-Ula",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhul Qi'dah",
    "Dhul Hijjah",
];

/// Days in the 30-year cycle (19 × 354 + 11 × 355).
const DAYS_PER_CYCLE: i64 = 10_631;

/// Julian Day Number of 1 Muharram 1 AH (civil epoch, 622-07-16 Julian).
const HIJRI_EPOCH_JDN: i64 = 1_948_440;

/// Largest day number magnitude [`jd_to_hijri`] decomposes; beyond it results saturate.
const MAX_JDN: i64 = 1 << 52;

/// A date in the tabular Hijri calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HijriDate {
    year: i32,
    month: u32,
    day: u32,
}

impl HijriDate {
    /// Creates a validated Hijri date.
    ///
    /// # Arguments
    /// * `year` - Year AH (any integer)
    /// * `month` - Month (1-12)
    /// * `day` - Day of month (1-29 or 1-30 depending on month and leap year)
    ///
    /// # Errors
    /// Returns `InvalidDate` if the month is outside 1-12 or the day does not exist in
    /// that month.
    ///
    /// # Example
    /// ```
    /// # use taqwim::HijriDate;
    /// assert!(HijriDate::new(1445, 12, 30).is_ok()); // 1445 is a leap year
    /// assert!(HijriDate::new(1446, 12, 30).is_err());
    /// ```
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        check_month(month)?;
        if day == 0 || day > month_length(year, month) {
            return Err(Error::invalid_date("day is out of range for Hijri month"));
        }
        Ok(Self { year, month, day })
    }

    /// Gets the year (AH).
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Gets the month (1-12).
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Gets the day of month (1-30).
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// English name of this date's month.
    #[must_use]
    pub const fn month_name(&self) -> &'static str {
        HIJRI_MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Whether this date's year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    /// Integral Julian Day of this date (no adjustment applied).
    #[must_use]
    pub fn julian_day(&self) -> f64 {
        hijri_to_jd(self.year, self.month, self.day)
    }

    /// Gets the Hijri date containing the given Julian Day (no adjustment applied).
    #[must_use]
    pub fn from_julian_day(jd: f64) -> Self {
        jd_to_hijri(jd)
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month_name(), self.year)
    }
}

/// Day of the week, numbered from Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    /// Sunday (0)
    Sunday,
    /// Monday (1)
    Monday,
    /// Tuesday (2)
    Tuesday,
    /// Wednesday (3)
    Wednesday,
    /// Thursday (4)
    Thursday,
    /// Friday (5), the day of congregational prayer
    Friday,
    /// Saturday (6)
    Saturday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Gets the weekday for a number counted from Sunday = 0, wrapping modulo 7.
    #[must_use]
    pub const fn from_number_from_sunday(number: i64) -> Self {
        Self::ALL[number.rem_euclid(7) as usize]
    }

    /// Day number counted from Sunday = 0 (Saturday = 6).
    #[must_use]
    pub const fn number_from_sunday(&self) -> u32 {
        *self as u32
    }

    /// Three-letter English abbreviation.
    #[must_use]
    pub const fn short_name(&self) -> &'static str {
        match self {
            Self::Sunday => "Sun",
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        }
    }
}

#[cfg(feature = "chrono")]
impl From<Weekday> for chrono::Weekday {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sunday => Self::Sun,
            Weekday::Monday => Self::Mon,
            Weekday::Tuesday => Self::Tue,
            Weekday::Wednesday => Self::Wed,
            Weekday::Thursday => Self::Thu,
            Weekday::Friday => Self::Fri,
            Weekday::Saturday => Self::Sat,
        }
    }
}

/// Whether `year` is a leap (355-day) year of the tabular calendar.
///
/// Leap years occupy positions 2, 5, 7, 10, 13, 16, 18, 21, 24, 26 and 29 of each 30-year
/// cycle. Years before 1 AH continue the same cycle backwards.
///
/// # Example
/// ```
/// # use taqwim::hijri::is_leap_year;
/// assert!(is_leap_year(1445));
/// assert!(!is_leap_year(1446));
/// ```
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    let position = (i64::from(year) - 1).rem_euclid(30) + 1;
    INTERCALARY_YEARS.contains(&position)
}

/// Number of days in a Hijri month, or 0 for a month outside 1-12.
#[must_use]
pub fn month_length(year: i32, month: u32) -> u32 {
    match month {
        12 if is_leap_year(year) => 30,
        1..=12 if month % 2 == 1 => 30,
        1..=12 => 29,
        _ => 0,
    }
}

/// Number of days in a Hijri year: 355 in leap years, 354 otherwise.
#[must_use]
pub fn year_length(year: i32) -> u32 {
    if is_leap_year(year) { 355 } else { 354 }
}

/// Chronological day number of a Hijri date.
fn hijri_day_number(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year);
    let m = i64::from(month);

    floor_div(11 * y + 3, 30) + 354 * y + 30 * m - floor_div(m - 1, 2) + i64::from(day)
        + HIJRI_EPOCH_JDN
        - 385
}

/// Converts a tabular Hijri date to its (integral) Julian Day.
///
/// No validation is performed; use [`HijriDate::new`] for checked input.
///
/// # Example
/// ```
/// # use taqwim::hijri::hijri_to_jd;
/// assert_eq!(hijri_to_jd(1, 1, 1), 1_948_440.0);
/// ```
#[must_use]
pub fn hijri_to_jd(year: i32, month: u32, day: u32) -> f64 {
    hijri_day_number(year, month, day) as f64
}

/// Converts a Julian Day to the tabular Hijri date containing it.
///
/// Decomposes the day count into 30-year cycles, the year within the cycle and the
/// residual day of year. Exact inverse of [`hijri_to_jd`] for every valid date.
///
/// Out-of-range or non-finite input gives a meaningless date rather than a panic.
#[must_use]
pub fn jd_to_hijri(jd: f64) -> HijriDate {
    let jdn = (floor(jd + 0.5) as i64).clamp(-MAX_JDN, MAX_JDN);

    let l = jdn - HIJRI_EPOCH_JDN + 10_632;
    let n = floor_div(l - 1, DAYS_PER_CYCLE);
    let l = l - DAYS_PER_CYCLE * n + 354;
    let j = floor_div(10_985 - l, 5_316) * floor_div(50 * l, 17_719)
        + floor_div(l, 5_670) * floor_div(43 * l, 15_238);
    let l = l - floor_div(30 - j, 15) * floor_div(17_719 * j, 50)
        - floor_div(j, 16) * floor_div(15_238 * j, 43)
        + 29;

    let month = floor_div(24 * l, 709);
    let day = l - floor_div(709 * month, 24);
    let year = 30 * n + j - 30;

    HijriDate {
        year: year as i32,
        month: month as u32,
        day: day as u32,
    }
}

/// Parses a stored adjustment value leniently.
///
/// Accepts leading whitespace, an optional sign and a run of digits; trailing characters
/// are ignored. Input without a leading integer, or one that overflows, yields 0.
///
/// # Example
/// ```
/// # use taqwim::hijri::parse_adjustment;
/// assert_eq!(parse_adjustment("-1"), -1);
/// assert_eq!(parse_adjustment(" 2 days"), 2);
/// assert_eq!(parse_adjustment("abc"), 0);
/// ```
#[must_use]
pub fn parse_adjustment(input: &str) -> i32 {
    let trimmed = input.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return 0;
    }
    trimmed[..sign_len + digits_len].parse().unwrap_or(0)
}

/// Tabular Hijri calendar with a day-count adjustment.
///
/// The adjustment is added to the Julian Day when converting Gregorian → Hijri and
/// subtracted when converting Hijri → Gregorian, so both directions stay exact inverses
/// for the same calendar value.
///
/// # Example
/// ```
/// # use taqwim::{GregorianDate, HijriCalendar};
/// let calendar = HijriCalendar::new(-1);
/// let hijri = calendar.gregorian_to_hijri(GregorianDate::new(2024, 1, 1).unwrap());
/// assert_eq!((hijri.year(), hijri.month(), hijri.day()), (1445, 6, 18));
/// assert_eq!(calendar.hijri_to_gregorian(hijri), GregorianDate::new(2024, 1, 1).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HijriCalendar {
    adjustment: i32,
}

impl Default for HijriCalendar {
    fn default() -> Self {
        Self::new(DEFAULT_HIJRI_ADJUSTMENT)
    }
}

impl FromStr for HijriCalendar {
    type Err = core::convert::Infallible;

    /// Builds a calendar from a stored adjustment string; unparsable input means 0.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Ok(Self::new(parse_adjustment(s)))
    }
}

impl HijriCalendar {
    /// Creates a calendar with the given adjustment in days.
    #[must_use]
    pub const fn new(adjustment: i32) -> Self {
        Self { adjustment }
    }

    /// Gets the adjustment in days.
    #[must_use]
    pub const fn adjustment(&self) -> i32 {
        self.adjustment
    }

    /// Replaces the adjustment; every later conversion uses the new value.
    pub fn set_adjustment(&mut self, adjustment: i32) {
        log::debug!(
            "Hijri adjustment changed from {} to {adjustment} days",
            self.adjustment
        );
        self.adjustment = adjustment;
    }

    /// Returns a copy of this calendar with a different adjustment.
    #[must_use]
    pub const fn with_adjustment(self, adjustment: i32) -> Self {
        Self { adjustment }
    }

    /// Converts a Gregorian date to the (adjusted) tabular Hijri date.
    #[must_use]
    pub fn gregorian_to_hijri(&self, date: GregorianDate) -> HijriDate {
        let jd =
            gregorian_to_jd(date.year(), date.month(), date.day()) + f64::from(self.adjustment);
        let hijri = jd_to_hijri(jd);
        log::trace!("{date} -> {hijri} (adjustment {})", self.adjustment);
        hijri
    }

    /// Converts a (adjusted) tabular Hijri date to the Gregorian date.
    #[must_use]
    pub fn hijri_to_gregorian(&self, date: HijriDate) -> GregorianDate {
        let jd = hijri_to_jd(date.year, date.month, date.day) - f64::from(self.adjustment);
        let gregorian = jd_to_gregorian(jd);
        log::trace!("{date} -> {gregorian} (adjustment {})", self.adjustment);
        gregorian
    }

    /// Day of the week on which the given Hijri date falls.
    ///
    /// # Example
    /// ```
    /// # use taqwim::{HijriCalendar, HijriDate, hijri::Weekday};
    /// let calendar = HijriCalendar::new(-1);
    /// // 1445-06-18 is 2024-01-01 under this adjustment, a Monday
    /// let date = HijriDate::new(1445, 6, 18).unwrap();
    /// assert_eq!(calendar.day_of_week(date), Weekday::Monday);
    /// ```
    #[must_use]
    pub fn day_of_week(&self, date: HijriDate) -> Weekday {
        let jdn = hijri_day_number(date.year, date.month, date.day) - i64::from(self.adjustment);
        // floor(JD + 1.5) for an integral JD
        Weekday::from_number_from_sunday(jdn + 1)
    }

    /// First and last Gregorian dates of a Hijri month.
    ///
    /// # Errors
    /// Returns `InvalidDate` if the month is outside 1-12.
    pub fn month_span(&self, year: i32, month: u32) -> Result<(GregorianDate, GregorianDate)> {
        let first = HijriDate::new(year, month, 1)?;
        let last = HijriDate::new(year, month, month_length(year, month))?;
        Ok((self.hijri_to_gregorian(first), self.hijri_to_gregorian(last)))
    }

    /// Today's Hijri date according to the local system clock.
    #[cfg(all(feature = "chrono", feature = "std"))]
    #[must_use]
    pub fn today(&self) -> HijriDate {
        let today = chrono::Local::now().date_naive();
        self.gregorian_to_hijri(GregorianDate::from(today))
    }
}
