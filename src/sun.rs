//! Low-precision solar position for prayer time calculation.
//!
//! This follows the short algorithm of the U.S. Naval Observatory ("Approximate Solar
//! Coordinates"), which gives the sun's declination and the equation of time to about one
//! arc minute for dates within a couple of centuries of J2000.0. Prayer times computed
//! from it are accurate to roughly a minute, which is the resolution they are shown at.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::suboptimal_flops)]

use crate::math::{
    DEGREES_PER_HOUR, HOURS_PER_DAY, asin_deg, atan2_deg, cos_deg, normalize_degrees_0_to_360,
    normalize_hours_0_to_24, sin_deg,
};
use crate::time::J2000_JD;

/// Apparent position quantities of the sun needed for prayer times.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunPosition {
    /// Declination in degrees (-23.44° to +23.44°).
    declination: f64,
    /// Equation of time in hours, within [-12, 12).
    equation_of_time: f64,
}

impl SunPosition {
    /// Gets the declination in degrees.
    #[must_use]
    pub const fn declination(&self) -> f64 {
        self.declination
    }

    /// Gets the equation of time in hours (apparent minus mean solar time).
    ///
    /// Values stay within about ±0.28 h (±17 minutes) over the year.
    #[must_use]
    pub const fn equation_of_time(&self) -> f64 {
        self.equation_of_time
    }
}

/// Calculates the sun's declination and equation of time for a Julian Day.
///
/// # Example
/// ```
/// # use taqwim::sun::sun_position;
/// // 2024-06-21, close to the June solstice
/// let position = sun_position(2_460_482.5);
/// assert!((position.declination() - 23.44).abs() < 0.01);
/// ```
#[must_use]
pub fn sun_position(jd: f64) -> SunPosition {
    let d = jd - J2000_JD;

    // Mean anomaly and mean longitude
    let g = normalize_degrees_0_to_360(357.529 + 0.98560028 * d);
    let q = normalize_degrees_0_to_360(280.459 + 0.98564736 * d);

    // Apparent ecliptic longitude
    let l = normalize_degrees_0_to_360(q + 1.915 * sin_deg(g) + 0.020 * sin_deg(2.0 * g));

    // Mean obliquity of the ecliptic
    let e = 23.439 - 0.00000036 * d;

    let right_ascension =
        normalize_hours_0_to_24(atan2_deg(cos_deg(e) * sin_deg(l), cos_deg(l)) / DEGREES_PER_HOUR);
    let declination = asin_deg(sin_deg(e) * sin_deg(l));
    let equation_of_time = wrap_hours(q / DEGREES_PER_HOUR - right_ascension);

    log::trace!(
        "sun at JD {jd}: declination {declination:.4}°, equation of time {equation_of_time:.4}h"
    );

    SunPosition {
        declination,
        equation_of_time,
    }
}

/// Wraps an hour difference into [-12, 12).
fn wrap_hours(hours: f64) -> f64 {
    let half_day = HOURS_PER_DAY / 2.0;
    normalize_hours_0_to_24(hours + half_day) - half_day
}
