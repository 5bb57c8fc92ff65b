//! User preferences consumed by the calculators.
//!
//! Stored preference values (as kept by a settings store) are gathered into a
//! [`Preferences`] value. With the `serde` feature it (de)serializes with the method and
//! Asr convention written as their short keys.

use crate::hijri::{DEFAULT_HIJRI_ADJUSTMENT, HijriCalendar};
use crate::prayer::{PrayerTimes, calculate};
use crate::time::GregorianDate;
use crate::types::{AsrConvention, CalculationMethod, Location};
use crate::{Error, Result};

/// Manual correction added to every computed prayer time, as `±mm:ss`.
///
/// # Example
/// ```
/// # use taqwim::config::TimeShift;
/// let shift = TimeShift::new(false, 2, 30).unwrap();
/// assert_eq!(shift.as_hours(), -(2.0 / 60.0 + 30.0 / 3600.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeShift {
    later: bool,
    minutes: u32,
    seconds: u32,
}

impl TimeShift {
    /// No correction.
    pub const NONE: Self = Self {
        later: true,
        minutes: 0,
        seconds: 0,
    };

    /// Creates a shift of `minutes:seconds`, later if `later` is true, otherwise earlier.
    ///
    /// # Errors
    /// Returns `InvalidTime` if `seconds` is 60 or more.
    pub const fn new(later: bool, minutes: u32, seconds: u32) -> Result<Self> {
        if seconds >= 60 {
            return Err(Error::invalid_time("seconds must be between 0 and 59"));
        }
        Ok(Self {
            later,
            minutes,
            seconds,
        })
    }

    /// Whether the shift moves times later.
    #[must_use]
    pub const fn is_later(&self) -> bool {
        self.later
    }

    /// Gets the minutes component.
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Gets the seconds component.
    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Signed shift in decimal hours.
    #[must_use]
    pub fn as_hours(&self) -> f64 {
        let magnitude = f64::from(self.minutes) / 60.0 + f64::from(self.seconds) / 3600.0;
        if self.later { magnitude } else { -magnitude }
    }
}

impl Default for TimeShift {
    fn default() -> Self {
        Self::NONE
    }
}

/// Everything a caller needs to turn a date into displayed prayer times and Hijri dates.
///
/// Coordinates are stored unvalidated, as loaded; [`Preferences::location`] validates
/// them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Preferences {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// UTC offset in hours
    pub utc_offset: f64,
    /// Fajr/Isha convention
    pub method: CalculationMethod,
    /// Asr convention
    pub asr: AsrConvention,
    /// Hijri day-count adjustment
    pub hijri_adjustment: i32,
    /// Clock correction applied to prayer times
    pub time_shift: TimeShift,
}

impl Default for Preferences {
    /// Mecca, Muslim World League, Shafi'i, default Hijri adjustment, no clock shift.
    fn default() -> Self {
        Self {
            latitude: 21.4225,
            longitude: 39.8262,
            utc_offset: 3.0,
            method: CalculationMethod::default(),
            asr: AsrConvention::default(),
            hijri_adjustment: DEFAULT_HIJRI_ADJUSTMENT,
            time_shift: TimeShift::NONE,
        }
    }
}

impl Preferences {
    /// Builds preferences from stored string keys, falling back to defaults for unknown
    /// method or Asr keys and to 0 for an unparsable adjustment.
    #[must_use]
    pub fn from_stored(
        latitude: f64,
        longitude: f64,
        utc_offset: f64,
        method_key: &str,
        asr_key: &str,
        hijri_adjustment: &str,
    ) -> Self {
        Self {
            latitude,
            longitude,
            utc_offset,
            method: CalculationMethod::from_key_or_default(method_key),
            asr: AsrConvention::from_key_or_default(asr_key),
            hijri_adjustment: crate::hijri::parse_adjustment(hijri_adjustment),
            time_shift: TimeShift::NONE,
        }
    }

    /// Validated location.
    ///
    /// # Errors
    /// Returns `InvalidLatitude`, `InvalidLongitude` or `InvalidUtcOffset`.
    pub fn location(&self) -> Result<Location> {
        Location::new(self.latitude, self.longitude, self.utc_offset)
    }

    /// Hijri calendar carrying the configured adjustment.
    #[must_use]
    pub const fn hijri_calendar(&self) -> HijriCalendar {
        HijriCalendar::new(self.hijri_adjustment)
    }

    /// Prayer times for `date` with the clock shift applied.
    ///
    /// # Errors
    /// Returns an error if the stored location is invalid.
    pub fn prayer_times(&self, date: GregorianDate) -> Result<PrayerTimes> {
        let location = self.location()?;
        let times = calculate(date, &location, self.method, self.asr);
        Ok(times.shifted(self.time_shift.as_hours()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_shift() {
        assert_eq!(TimeShift::NONE.as_hours(), 0.0);
        assert_eq!(TimeShift::default().as_hours(), 0.0);
        assert!((TimeShift::new(true, 1, 30).unwrap().as_hours() - 0.025).abs() < 1e-12);
        assert_eq!(TimeShift::new(false, 3, 0).unwrap().as_hours(), -0.05);
        assert_eq!(
            TimeShift::new(true, 0, 60),
            Err(Error::invalid_time("seconds must be between 0 and 59"))
        );
    }

    #[test]
    fn test_default_preferences() {
        let preferences = Preferences::default();
        assert_eq!(preferences.method, CalculationMethod::Mwl);
        assert_eq!(preferences.asr, AsrConvention::Shafii);
        assert_eq!(preferences.hijri_calendar(), HijriCalendar::default());
        assert!(preferences.location().is_ok());
    }

    #[test]
    fn test_from_stored() {
        let preferences = Preferences::from_stored(23.8103, 90.4125, 6.0, "karachi", "hanafi", "1");
        assert_eq!(preferences.method, CalculationMethod::Karachi);
        assert_eq!(preferences.asr, AsrConvention::Hanafi);
        assert_eq!(preferences.hijri_adjustment, 1);

        let fallback = Preferences::from_stored(0.0, 0.0, 0.0, "", "???", "x");
        assert_eq!(fallback.method, CalculationMethod::Mwl);
        assert_eq!(fallback.asr, AsrConvention::Shafii);
        assert_eq!(fallback.hijri_adjustment, 0);
    }

    #[test]
    fn test_prayer_times_apply_shift() {
        let date = GregorianDate::new(2024, 6, 21).unwrap();
        let mut preferences = Preferences::default();
        let plain = preferences.prayer_times(date).unwrap();

        preferences.time_shift = TimeShift::new(true, 2, 0).unwrap();
        let shifted = preferences.prayer_times(date).unwrap();

        let delta = shifted.fajr().hours().unwrap() - plain.fajr().hours().unwrap();
        assert!((delta - 2.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_location() {
        let preferences = Preferences {
            latitude: 95.0,
            ..Preferences::default()
        };
        let date = GregorianDate::new(2024, 6, 21).unwrap();
        assert_eq!(
            preferences.prayer_times(date),
            Err(Error::invalid_latitude(95.0))
        );
    }
}
