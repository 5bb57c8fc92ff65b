//! Core data types for prayer time calculations.

use crate::error::{check_coordinates, check_utc_offset};
use crate::math::{HOURS_PER_DAY, floor, normalize_hours_0_to_24, round};
use crate::{Error, Result};
use core::fmt;
use core::str::FromStr;

/// Observer location: geographic coordinates plus the civil UTC offset in force.
///
/// The offset is fixed for a calculation; daylight saving time is the caller's concern.
///
/// # Example
/// ```
/// # use taqwim::Location;
/// let mecca = Location::new(21.4225, 39.8262, 3.0).unwrap();
/// assert_eq!(mecca.latitude(), 21.4225);
/// assert!(Location::new(21.4225, 39.8262, 15.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Latitude in degrees (-90° to +90°, north positive)
    latitude: f64,
    /// Longitude in degrees (-180° to +180°, east positive)
    longitude: f64,
    /// Offset from UTC in hours, may be fractional
    utc_offset: f64,
}

impl Location {
    /// Creates a new location.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to +90)
    /// * `longitude` - Longitude in degrees (-180 to +180)
    /// * `utc_offset` - UTC offset in hours (-12 to +14, fractions such as 5.5 allowed)
    ///
    /// # Errors
    /// Returns `InvalidLatitude`, `InvalidLongitude` or `InvalidUtcOffset` for
    /// out-of-range values.
    pub fn new(latitude: f64, longitude: f64, utc_offset: f64) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        check_utc_offset(utc_offset)?;
        Ok(Self {
            latitude,
            longitude,
            utc_offset,
        })
    }

    /// Gets the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Gets the UTC offset in hours.
    #[must_use]
    pub const fn utc_offset(&self) -> f64 {
        self.utc_offset
    }
}

/// How a calculation method places Isha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IshaRule {
    /// Sun depression angle below the horizon, in degrees
    Angle(f64),
    /// Fixed interval after Maghrib, in minutes
    MinutesAfterMaghrib(f64),
}

/// Institutional convention for the Fajr and Isha twilight definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CalculationMethod {
    /// Muslim World League: Fajr 18°, Isha 17°
    #[default]
    Mwl,
    /// Islamic Society of North America: Fajr 15°, Isha 15°
    Isna,
    /// Egyptian General Authority of Survey: Fajr 19.5°, Isha 17.5°
    Egypt,
    /// Umm al-Qura University, Makkah: Fajr 18.5°, Isha 90 minutes after Maghrib
    Makkah,
    /// University of Islamic Sciences, Karachi: Fajr 18°, Isha 18°
    Karachi,
}

impl CalculationMethod {
    /// All registered methods.
    pub const ALL: [Self; 5] = [
        Self::Mwl,
        Self::Isna,
        Self::Egypt,
        Self::Makkah,
        Self::Karachi,
    ];

    /// Sun depression angle for Fajr in degrees.
    #[must_use]
    pub const fn fajr_angle(&self) -> f64 {
        match self {
            Self::Mwl | Self::Karachi => 18.0,
            Self::Isna => 15.0,
            Self::Egypt => 19.5,
            Self::Makkah => 18.5,
        }
    }

    /// Rule used to place Isha.
    #[must_use]
    pub const fn isha_rule(&self) -> IshaRule {
        match self {
            Self::Mwl => IshaRule::Angle(17.0),
            Self::Isna => IshaRule::Angle(15.0),
            Self::Egypt => IshaRule::Angle(17.5),
            Self::Makkah => IshaRule::MinutesAfterMaghrib(90.0),
            Self::Karachi => IshaRule::Angle(18.0),
        }
    }

    /// Short key used in stored preferences (`"mwl"`, `"isna"`, ...).
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Mwl => "mwl",
            Self::Isna => "isna",
            Self::Egypt => "egypt",
            Self::Makkah => "makkah",
            Self::Karachi => "karachi",
        }
    }

    /// English display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mwl => "Muslim World League",
            Self::Isna => "ISNA (North America)",
            Self::Egypt => "Egyptian General Authority",
            Self::Makkah => "Umm al-Qura (Makkah)",
            Self::Karachi => "University of Islamic Sciences, Karachi",
        }
    }

    /// Looks up a method by key, falling back to [`CalculationMethod::Mwl`].
    #[must_use]
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            log::warn!("unknown calculation method {key:?}, using {}", Self::Mwl.key());
            Self::default()
        })
    }
}

impl FromStr for CalculationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.key() == s)
            .ok_or(Error::UnknownCalculationMethod)
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Juristic convention for the Asr shadow length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum AsrConvention {
    /// Shafi'i, Maliki and Hanbali: shadow equals object length plus noon shadow
    #[default]
    Shafii,
    /// Hanafi: shadow equals twice the object length plus noon shadow
    Hanafi,
}

impl AsrConvention {
    /// Shadow length factor (1 or 2).
    #[must_use]
    pub const fn factor(&self) -> f64 {
        match self {
            Self::Shafii => 1.0,
            Self::Hanafi => 2.0,
        }
    }

    /// Short key used in stored preferences.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Shafii => "shafii",
            Self::Hanafi => "hanafi",
        }
    }

    /// English display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Shafii => "Shafi'i",
            Self::Hanafi => "Hanafi",
        }
    }

    /// Looks up a convention by key, falling back to [`AsrConvention::Shafii`].
    #[must_use]
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            log::warn!("unknown Asr convention {key:?}, using {}", Self::Shafii.key());
            Self::default()
        })
    }
}

impl FromStr for AsrConvention {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "shafii" => Ok(Self::Shafii),
            "hanafi" => Ok(Self::Hanafi),
            _ => Err(Error::UnknownAsrConvention),
        }
    }
}

impl fmt::Display for AsrConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The eight daily instants, in their usual chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Prayer {
    /// End of the pre-dawn meal, shortly before Fajr
    Sehri,
    /// Dawn prayer
    Fajr,
    /// Sunrise (end of the Fajr window)
    Sunrise,
    /// Midday prayer, just after solar noon
    Dhuhr,
    /// Afternoon prayer
    Asr,
    /// Sunset prayer
    Maghrib,
    /// Night prayer
    Isha,
    /// Voluntary night prayer in the last third of the night
    Tahajjud,
}

impl Prayer {
    /// All instants, Sehri first.
    pub const ALL: [Self; 8] = [
        Self::Sehri,
        Self::Fajr,
        Self::Sunrise,
        Self::Dhuhr,
        Self::Asr,
        Self::Maghrib,
        Self::Isha,
        Self::Tahajjud,
    ];

    /// The five obligatory prayers.
    pub const OBLIGATORY: [Self; 5] = [
        Self::Fajr,
        Self::Dhuhr,
        Self::Asr,
        Self::Maghrib,
        Self::Isha,
    ];

    /// Lowercase key (`"fajr"`, `"dhuhr"`, ...).
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Sehri => "sehri",
            Self::Fajr => "fajr",
            Self::Sunrise => "sunrise",
            Self::Dhuhr => "dhuhr",
            Self::Asr => "asr",
            Self::Maghrib => "maghrib",
            Self::Isha => "isha",
            Self::Tahajjud => "tahajjud",
        }
    }

    /// English display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sehri => "Sehri",
            Self::Fajr => "Fajr",
            Self::Sunrise => "Sunrise",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
            Self::Tahajjud => "Tahajjud",
        }
    }

    /// Whether this is one of the five obligatory prayers.
    #[must_use]
    pub const fn is_obligatory(&self) -> bool {
        matches!(
            self,
            Self::Fajr | Self::Dhuhr | Self::Asr | Self::Maghrib | Self::Isha
        )
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A computed instant as a decimal local hour, or undefined.
///
/// The raw value is kept as computed and may fall outside [0, 24): Tahajjud usually lies
/// after midnight (> 24), and at extreme longitudes an instant can precede the local
/// midnight (< 0). Use [`PrayerTime::decimal_hours`] for the time of day.
///
/// An undefined time means the sun never reaches the required depression angle on that
/// date at that latitude.
///
/// # Example
/// ```
/// # use taqwim::PrayerTime;
/// let time = PrayerTime::new(25.25);
/// assert_eq!(time.hours(), Some(25.25));
/// assert_eq!(time.decimal_hours(), Some(1.25));
/// assert_eq!(time.h24().to_string(), "01:15");
/// assert_eq!(time.h12().to_string(), "1:15 AM");
/// assert_eq!(PrayerTime::UNDEFINED.to_string(), "--:--");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrayerTime(Option<f64>);

impl PrayerTime {
    /// An astronomically undefined time.
    pub const UNDEFINED: Self = Self(None);

    /// Wraps a decimal hour; non-finite input becomes undefined.
    #[must_use]
    pub const fn new(hours: f64) -> Self {
        if hours.is_finite() {
            Self(Some(hours))
        } else {
            Self(None)
        }
    }

    /// Gets the raw decimal hour, which may lie outside [0, 24).
    #[must_use]
    pub const fn hours(&self) -> Option<f64> {
        self.0
    }

    /// Gets the time of day as a decimal hour in [0, 24).
    #[must_use]
    pub fn decimal_hours(&self) -> Option<f64> {
        self.0.map(normalize_hours_0_to_24)
    }

    /// Whether the instant exists.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        self.0.is_some()
    }

    /// Returns this time moved by `delta_hours`; undefined stays undefined.
    #[must_use]
    pub fn shifted(self, delta_hours: f64) -> Self {
        Self(self.0.map(|hours| hours + delta_hours))
    }

    /// Hour (0-23) and minute (0-59) of day, rounded to the nearest minute.
    ///
    /// A time within half a minute of midnight rounds to 00:00.
    #[allow(clippy::cast_sign_loss)]
    #[must_use]
    pub fn hour_minute(&self) -> Option<(u32, u32)> {
        let hours = self.decimal_hours()?;
        let minutes_per_day = HOURS_PER_DAY * 60.0;
        let total = round(hours * 60.0) % minutes_per_day;
        let hour = floor(total / 60.0);
        Some((hour as u32, (total - hour * 60.0) as u32))
    }

    /// 24-hour `"HH:MM"` form, `"--:--"` when undefined.
    #[must_use]
    pub const fn h24(&self) -> H24 {
        H24(*self)
    }

    /// 12-hour `"H:MM AM"` form, `"--:-- --"` when undefined.
    #[must_use]
    pub const fn h12(&self) -> H12 {
        H12(*self)
    }
}

impl From<f64> for PrayerTime {
    fn from(hours: f64) -> Self {
        Self::new(hours)
    }
}

impl From<Option<f64>> for PrayerTime {
    fn from(hours: Option<f64>) -> Self {
        hours.map_or(Self::UNDEFINED, Self::new)
    }
}

impl fmt::Display for PrayerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.h24().fmt(f)
    }
}

/// 24-hour display adaptor returned by [`PrayerTime::h24`].
#[derive(Debug, Clone, Copy)]
pub struct H24(PrayerTime);

impl fmt::Display for H24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.hour_minute() {
            Some((hour, minute)) => write!(f, "{hour:02}:{minute:02}"),
            None => f.write_str("--:--"),
        }
    }
}

/// 12-hour display adaptor returned by [`PrayerTime::h12`].
#[derive(Debug, Clone, Copy)]
pub struct H12(PrayerTime);

impl fmt::Display for H12 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.hour_minute() {
            Some((hour, minute)) => {
                let meridiem = if hour < 12 { "AM" } else { "PM" };
                let hour = match hour {
                    0 => 12,
                    13.. => hour - 12,
                    _ => hour,
                };
                write!(f, "{hour}:{minute:02} {meridiem}")
            }
            None => f.write_str("--:-- --"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_validation() {
        assert!(Location::new(21.4225, 39.8262, 3.0).is_ok());
        assert!(Location::new(23.8103, 90.4125, 6.0).is_ok());
        assert!(Location::new(28.6139, 77.209, 5.5).is_ok());

        assert_eq!(
            Location::new(91.0, 0.0, 0.0),
            Err(Error::invalid_latitude(91.0))
        );
        assert_eq!(
            Location::new(0.0, -181.0, 0.0),
            Err(Error::invalid_longitude(-181.0))
        );
        assert_eq!(
            Location::new(0.0, 0.0, -12.5),
            Err(Error::invalid_utc_offset(-12.5))
        );
    }

    #[test]
    fn test_method_registry() {
        assert_eq!(CalculationMethod::Mwl.fajr_angle(), 18.0);
        assert_eq!(CalculationMethod::Mwl.isha_rule(), IshaRule::Angle(17.0));
        assert_eq!(CalculationMethod::Isna.fajr_angle(), 15.0);
        assert_eq!(CalculationMethod::Egypt.isha_rule(), IshaRule::Angle(17.5));
        assert_eq!(CalculationMethod::Makkah.fajr_angle(), 18.5);
        assert_eq!(
            CalculationMethod::Makkah.isha_rule(),
            IshaRule::MinutesAfterMaghrib(90.0)
        );
        assert_eq!(CalculationMethod::Karachi.isha_rule(), IshaRule::Angle(18.0));
    }

    #[test]
    fn test_method_keys() {
        for method in CalculationMethod::ALL {
            assert_eq!(method.key().parse::<CalculationMethod>(), Ok(method));
        }
        assert_eq!(
            "MWL".parse::<CalculationMethod>(),
            Err(Error::UnknownCalculationMethod)
        );
        assert_eq!(
            CalculationMethod::from_key_or_default("tehran"),
            CalculationMethod::Mwl
        );
        assert_eq!(
            CalculationMethod::from_key_or_default("karachi"),
            CalculationMethod::Karachi
        );
    }

    #[test]
    fn test_asr_convention() {
        assert_eq!(AsrConvention::Shafii.factor(), 1.0);
        assert_eq!(AsrConvention::Hanafi.factor(), 2.0);
        assert_eq!("hanafi".parse::<AsrConvention>(), Ok(AsrConvention::Hanafi));
        assert_eq!(
            "jafari".parse::<AsrConvention>(),
            Err(Error::UnknownAsrConvention)
        );
        assert_eq!(AsrConvention::from_key_or_default(""), AsrConvention::Shafii);
    }

    #[test]
    fn test_prayer_sets() {
        assert!(
            Prayer::ALL
                .into_iter()
                .filter(Prayer::is_obligatory)
                .eq(Prayer::OBLIGATORY)
        );
        assert!(!Prayer::Sunrise.is_obligatory());
        assert_eq!(Prayer::Tahajjud.key(), "tahajjud");
        assert!(Prayer::Sehri < Prayer::Fajr);
    }

    #[test]
    fn test_prayer_time_definedness() {
        assert!(PrayerTime::new(5.0).is_defined());
        assert!(!PrayerTime::new(f64::NAN).is_defined());
        assert!(!PrayerTime::new(f64::INFINITY).is_defined());
        assert_eq!(PrayerTime::default(), PrayerTime::UNDEFINED);
        assert_eq!(PrayerTime::UNDEFINED.shifted(1.0), PrayerTime::UNDEFINED);
        assert_eq!(PrayerTime::new(5.0).shifted(-0.5).hours(), Some(4.5));
    }

    #[test]
    fn test_decimal_hours_wrap() {
        assert_eq!(PrayerTime::new(25.5).decimal_hours(), Some(1.5));
        assert_eq!(PrayerTime::new(-0.5).decimal_hours(), Some(23.5));
        assert_eq!(PrayerTime::new(12.0).decimal_hours(), Some(12.0));
        assert_eq!(PrayerTime::UNDEFINED.decimal_hours(), None);
    }

    #[test]
    fn test_hour_minute_rounding_carries() {
        assert_eq!(PrayerTime::new(5.5).hour_minute(), Some((5, 30)));
        // 05:59:45 rounds up into the next hour
        assert_eq!(PrayerTime::new(5.0 + 59.75 / 60.0).hour_minute(), Some((6, 0)));
        // 23:59:45 rounds to midnight
        assert_eq!(PrayerTime::new(23.0 + 59.75 / 60.0).hour_minute(), Some((0, 0)));
        assert_eq!(PrayerTime::new(4.2331).hour_minute(), Some((4, 14)));
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_formatting() {
        let fajr = PrayerTime::new(4.2331);
        assert_eq!(fajr.h24().to_string(), "04:14");
        assert_eq!(fajr.h12().to_string(), "4:14 AM");

        let isha = PrayerTime::new(20.4301);
        assert_eq!(isha.h24().to_string(), "20:26");
        assert_eq!(isha.h12().to_string(), "8:26 PM");

        let noon = PrayerTime::new(12.25);
        assert_eq!(noon.h12().to_string(), "12:15 PM");

        let after_midnight = PrayerTime::new(24.5);
        assert_eq!(after_midnight.h24().to_string(), "00:30");
        assert_eq!(after_midnight.h12().to_string(), "12:30 AM");

        assert_eq!(PrayerTime::UNDEFINED.h24().to_string(), "--:--");
        assert_eq!(PrayerTime::UNDEFINED.h12().to_string(), "--:-- --");
        assert_eq!(fajr.to_string(), "04:14");
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_display_names() {
        assert_eq!(CalculationMethod::Makkah.to_string(), "Umm al-Qura (Makkah)");
        assert_eq!(AsrConvention::Shafii.to_string(), "Shafi'i");
        assert_eq!(Prayer::Maghrib.to_string(), "Maghrib");
    }
}
