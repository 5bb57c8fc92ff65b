//! Error types for the calendar and prayer time library.

use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur when validating calendar or location input.
///
/// Astronomically unreachable prayer instants are not errors; they are reported as
/// undefined [`PrayerTime`](crate::PrayerTime) values.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be between -180 and +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// Invalid UTC offset (must be between -12 and +14 hours).
    InvalidUtcOffset {
        /// The invalid offset value provided, in hours.
        value: f64,
    },
    /// Invalid Gregorian or Hijri calendar date.
    InvalidDate {
        /// Description of the date constraint violation.
        message: &'static str,
    },
    /// Invalid time-of-day or clock shift component.
    InvalidTime {
        /// Description of the time constraint violation.
        message: &'static str,
    },
    /// Calculation method key not present in the registry.
    UnknownCalculationMethod,
    /// Asr convention key not present in the registry.
    UnknownAsrConvention,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be between -180° and +180°)"
                )
            }
            Self::InvalidUtcOffset { value } => {
                write!(
                    f,
                    "invalid UTC offset {value}h (must be between -12h and +14h)"
                )
            }
            Self::InvalidDate { message } => write!(f, "invalid date: {message}"),
            Self::InvalidTime { message } => write!(f, "invalid time: {message}"),
            Self::UnknownCalculationMethod => write!(
                f,
                "unknown calculation method (expected one of mwl, isna, egypt, makkah, karachi)"
            ),
            Self::UnknownAsrConvention => {
                write!(f, "unknown Asr convention (expected shafii or hanafi)")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid UTC offset error.
    #[must_use]
    pub const fn invalid_utc_offset(value: f64) -> Self {
        Self::InvalidUtcOffset { value }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub const fn invalid_date(message: &'static str) -> Self {
        Self::InvalidDate { message }
    }

    /// Creates an invalid time error.
    #[must_use]
    pub const fn invalid_time(message: &'static str) -> Self {
        Self::InvalidTime { message }
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Validates a UTC offset in hours.
///
/// Fractional offsets (5.5, 5.75, -3.5, ...) are accepted; the range covers every
/// civil offset in use (UTC-12 to UTC+14).
///
/// # Errors
/// Returns `InvalidUtcOffset` if the offset is not finite or outside -12 to +14 hours.
pub fn check_utc_offset(utc_offset_hours: f64) -> Result<()> {
    if !(-12.0..=14.0).contains(&utc_offset_hours) {
        return Err(Error::invalid_utc_offset(utc_offset_hours));
    }
    Ok(())
}

/// Validates a month number (1 to 12).
///
/// # Errors
/// Returns `InvalidDate` if month is outside 1 to 12.
pub fn check_month(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(Error::invalid_date("month must be between 1 and 12"));
    }
    Ok(())
}
