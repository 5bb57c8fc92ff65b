//! Daily prayer time calculation.
//!
//! Times are derived from the sun's declination and equation of time at the civil date's
//! midnight (see [`sun`](crate::sun)). Dhuhr is placed at local apparent noon; every other
//! instant is Dhuhr plus or minus the hour angle at which the sun reaches a given altitude.
//!
//! All results are decimal hours in the location's civil time. When the sun never reaches
//! the required altitude (high latitudes around the solstices) the instant is undefined
//! rather than an error.

#![allow(clippy::suboptimal_flops)]

use crate::math::{
    DEGREES_PER_HOUR, HOURS_PER_DAY, acos_deg, atan_deg, cos_deg, floor, normalize_hours_0_to_24,
    sin_deg, tan_deg,
};
use crate::sun::sun_position;
use crate::time::GregorianDate;
use crate::types::{AsrConvention, CalculationMethod, IshaRule, Location, Prayer, PrayerTime};
use core::fmt;

/// Minutes between Sehri (end of the pre-dawn meal) and Fajr.
pub const SEHRI_OFFSET_MINUTES: f64 = 10.0;

/// Fraction of the Maghrib-to-Fajr night after which Tahajjud begins.
pub const TAHAJJUD_NIGHT_FRACTION: f64 = 2.0 / 3.0;

/// Sun depression in degrees at sunrise and sunset (refraction plus solar semi-diameter).
pub const SUNRISE_SUNSET_DEPRESSION: f64 = 0.833;

/// Prayer times for one date and location.
///
/// Each value is the raw decimal hour as computed; see [`PrayerTime`] for formatting.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrayerTimes {
    sehri: PrayerTime,
    fajr: PrayerTime,
    sunrise: PrayerTime,
    dhuhr: PrayerTime,
    asr: PrayerTime,
    maghrib: PrayerTime,
    isha: PrayerTime,
    tahajjud: PrayerTime,
}

/// Calculates the prayer times of a civil date.
///
/// # Arguments
/// * `date` - Civil date at the location
/// * `location` - Coordinates and UTC offset
/// * `method` - Fajr/Isha convention
/// * `asr` - Asr shadow convention
///
/// # Returns
/// All eight instants; those the sun cannot reach on this date are undefined.
///
/// # Example
/// ```
/// # use taqwim::{calculate, AsrConvention, CalculationMethod, GregorianDate, Location};
/// let mecca = Location::new(21.4225, 39.8262, 3.0).unwrap();
/// let date = GregorianDate::new(2024, 6, 21).unwrap();
/// let times = calculate(date, &mecca, CalculationMethod::Mwl, AsrConvention::Shafii);
///
/// assert_eq!(times.fajr().h24().to_string(), "04:14");
/// assert_eq!(times.maghrib().h12().to_string(), "7:06 PM");
/// ```
#[must_use]
pub fn calculate(
    date: GregorianDate,
    location: &Location,
    method: CalculationMethod,
    asr: AsrConvention,
) -> PrayerTimes {
    let sun = sun_position(date.julian_day());
    let latitude = location.latitude();
    let declination = sun.declination();

    let dhuhr = normalize_hours_0_to_24(12.0 - sun.equation_of_time()) + location.utc_offset()
        - location.longitude() / DEGREES_PER_HOUR;

    let horizon = hour_angle(SUNRISE_SUNSET_DEPRESSION, latitude, declination);
    let fajr = hour_angle(method.fajr_angle(), latitude, declination).map(|t| dhuhr - t);
    let sunrise = horizon.map(|t| dhuhr - t);
    let maghrib = horizon.map(|t| dhuhr + t);
    let isha = match method.isha_rule() {
        IshaRule::Angle(angle) => hour_angle(angle, latitude, declination).map(|t| dhuhr + t),
        IshaRule::MinutesAfterMaghrib(minutes) => maghrib.map(|m| m + minutes / 60.0),
    };
    let asr_time = asr_hour_angle(asr.factor(), latitude, declination).map(|t| dhuhr + t);

    let sehri = fajr.map(|f| f - SEHRI_OFFSET_MINUTES / 60.0);
    // Night spans this evening's Maghrib to the Fajr of the same date
    let tahajjud = fajr.zip(maghrib).map(|(f, m)| {
        let night = normalize_hours_0_to_24(f + HOURS_PER_DAY - m);
        m + night * TAHAJJUD_NIGHT_FRACTION
    });

    let times = PrayerTimes {
        sehri: sehri.into(),
        fajr: fajr.into(),
        sunrise: sunrise.into(),
        dhuhr: PrayerTime::new(dhuhr),
        asr: asr_time.into(),
        maghrib: maghrib.into(),
        isha: isha.into(),
        tahajjud: tahajjud.into(),
    };

    log::trace!(
        "{date} at ({latitude}, {}) using {}: declination {declination:.4}°, dhuhr {dhuhr:.4}h",
        location.longitude(),
        method.key()
    );
    if times.iter().any(|(_, time)| !time.is_defined()) {
        log::warn!(
            "sun does not reach every prayer altitude on {date} at latitude {latitude}; \
             some times are undefined"
        );
    }

    times
}

/// Hours between solar noon and the moment the sun is `depression` degrees below the
/// horizon, or `None` if it never gets there.
fn hour_angle(depression: f64, latitude: f64, declination: f64) -> Option<f64> {
    let ratio = (-sin_deg(depression) - sin_deg(latitude) * sin_deg(declination))
        / (cos_deg(latitude) * cos_deg(declination));
    hours_from_cosine(ratio)
}

/// Hours between solar noon and Asr, when a shadow reaches `factor` times the object length
/// plus its noon shadow.
fn asr_hour_angle(factor: f64, latitude: f64, declination: f64) -> Option<f64> {
    let altitude = atan_deg(1.0 / (factor + tan_deg((latitude - declination).abs())));
    let ratio = (sin_deg(altitude) - sin_deg(latitude) * sin_deg(declination))
        / (cos_deg(latitude) * cos_deg(declination));
    hours_from_cosine(ratio)
}

fn hours_from_cosine(ratio: f64) -> Option<f64> {
    (-1.0..=1.0)
        .contains(&ratio)
        .then(|| acos_deg(ratio) / DEGREES_PER_HOUR)
}

impl PrayerTimes {
    /// Gets the Sehri time (Fajr minus [`SEHRI_OFFSET_MINUTES`]).
    #[must_use]
    pub const fn sehri(&self) -> PrayerTime {
        self.sehri
    }

    /// Gets the Fajr time.
    #[must_use]
    pub const fn fajr(&self) -> PrayerTime {
        self.fajr
    }

    /// Gets the sunrise time.
    #[must_use]
    pub const fn sunrise(&self) -> PrayerTime {
        self.sunrise
    }

    /// Gets the Dhuhr time (local apparent noon); always defined.
    #[must_use]
    pub const fn dhuhr(&self) -> PrayerTime {
        self.dhuhr
    }

    /// Gets the Asr time.
    #[must_use]
    pub const fn asr(&self) -> PrayerTime {
        self.asr
    }

    /// Gets the Maghrib (sunset) time.
    #[must_use]
    pub const fn maghrib(&self) -> PrayerTime {
        self.maghrib
    }

    /// Gets the Isha time.
    #[must_use]
    pub const fn isha(&self) -> PrayerTime {
        self.isha
    }

    /// Gets the Tahajjud time, usually past midnight (raw hour above 24).
    #[must_use]
    pub const fn tahajjud(&self) -> PrayerTime {
        self.tahajjud
    }

    /// Gets the time of the given instant.
    #[must_use]
    pub const fn get(&self, prayer: Prayer) -> PrayerTime {
        match prayer {
            Prayer::Sehri => self.sehri,
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
            Prayer::Tahajjud => self.tahajjud,
        }
    }

    /// Iterates over all eight instants in [`Prayer::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, PrayerTime)> + '_ {
        Prayer::ALL.into_iter().map(|prayer| (prayer, self.get(prayer)))
    }

    /// Returns these times moved by `delta_hours` (a user clock correction).
    ///
    /// Undefined times stay undefined.
    #[must_use]
    pub fn shifted(&self, delta_hours: f64) -> Self {
        Self {
            sehri: self.sehri.shifted(delta_hours),
            fajr: self.fajr.shifted(delta_hours),
            sunrise: self.sunrise.shifted(delta_hours),
            dhuhr: self.dhuhr.shifted(delta_hours),
            asr: self.asr.shifted(delta_hours),
            maghrib: self.maghrib.shifted(delta_hours),
            isha: self.isha.shifted(delta_hours),
            tahajjud: self.tahajjud.shifted(delta_hours),
        }
    }

    /// Finds the next upcoming instant after `current_hour` (decimal local hour).
    ///
    /// Sehri through Isha are checked in order, then Tahajjud. When all of them have
    /// passed, the result is the next day's Sehri, approximated by today's Sehri plus 24
    /// hours. Undefined instants are skipped.
    ///
    /// # Example
    /// ```
    /// # use taqwim::{
    /// #     calculate, AsrConvention, CalculationMethod, GregorianDate, Location, Prayer,
    /// # };
    /// let mecca = Location::new(21.4225, 39.8262, 3.0).unwrap();
    /// let date = GregorianDate::new(2024, 6, 21).unwrap();
    /// let times = calculate(date, &mecca, CalculationMethod::Mwl, AsrConvention::Shafii);
    ///
    /// let next = times.next_prayer(13.0);
    /// assert_eq!(next.prayer(), Prayer::Asr);
    /// assert!(!next.is_tomorrow());
    /// ```
    #[must_use]
    pub fn next_prayer(&self, current_hour: f64) -> NextPrayer {
        let is_after = |time: PrayerTime| time.hours().is_some_and(|hours| hours > current_hour);

        Prayer::ALL
            .into_iter()
            .find(|&prayer| is_after(self.get(prayer)))
            .map_or(
                NextPrayer {
                    prayer: Prayer::Sehri,
                    time: self.sehri.shifted(HOURS_PER_DAY),
                    is_tomorrow: true,
                },
                |prayer| NextPrayer {
                    prayer,
                    time: self.get(prayer),
                    is_tomorrow: false,
                },
            )
    }

    /// Obligatory prayer whose time began within the last minute before `current_hour`.
    ///
    /// A prayer at time-of-day `t` is due when `0 <= (current_hour - t) * 60 < 1`. Polling
    /// this at least once a minute catches every prayer exactly once; see
    /// [`NotificationTracker`] for de-duplication across polls.
    #[must_use]
    pub fn prayer_due(&self, current_hour: f64) -> Option<Prayer> {
        Prayer::OBLIGATORY.into_iter().find(|&prayer| {
            self.get(prayer).decimal_hours().is_some_and(|time| {
                let minutes_since = (current_hour - time) * 60.0;
                (0.0..1.0).contains(&minutes_since)
            })
        })
    }
}

/// The next upcoming instant, as returned by [`PrayerTimes::next_prayer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextPrayer {
    prayer: Prayer,
    time: PrayerTime,
    is_tomorrow: bool,
}

impl NextPrayer {
    /// Gets which instant is next.
    #[must_use]
    pub const fn prayer(&self) -> Prayer {
        self.prayer
    }

    /// Gets its raw time; for tomorrow's Sehri this is above 24.
    #[must_use]
    pub const fn time(&self) -> PrayerTime {
        self.time
    }

    /// Whether the instant falls on the following day.
    #[must_use]
    pub const fn is_tomorrow(&self) -> bool {
        self.is_tomorrow
    }

    /// Time remaining from `current_hour`, or `None` if the instant is undefined.
    #[must_use]
    pub fn countdown(&self, current_hour: f64) -> Option<Countdown> {
        self.time
            .hours()
            .map(|target| format_countdown(target, current_hour))
    }
}

/// Remaining time until an instant, displayed as `"Hh MMm SSs"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Countdown {
    total_seconds: u64,
}

impl Countdown {
    /// Gets the whole remaining seconds.
    #[must_use]
    pub const fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    /// Gets the whole hours component.
    #[must_use]
    pub const fn hours(&self) -> u64 {
        self.total_seconds / 3600
    }

    /// Gets the minutes component (0-59).
    #[must_use]
    pub const fn minutes(&self) -> u64 {
        self.total_seconds / 60 % 60
    }

    /// Gets the seconds component (0-59).
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.total_seconds % 60
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}h {:02}m {:02}s",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

/// Computes the time remaining from `current_hour` until `target_hour`.
///
/// A target earlier than the current hour is taken to be on the next day. Components are
/// truncated, not rounded. Non-finite input gives a zero countdown.
///
/// # Example
/// ```
/// # use taqwim::format_countdown;
/// assert_eq!(format_countdown(1.0, 23.5).to_string(), "1h 30m 00s");
/// assert_eq!(format_countdown(14.25, 12.0).to_string(), "2h 15m 00s");
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn format_countdown(target_hour: f64, current_hour: f64) -> Countdown {
    let mut diff = target_hour - current_hour;
    if diff < 0.0 {
        diff += HOURS_PER_DAY;
    }
    // Absorbs representation error so whole seconds are not lost to truncation
    let seconds = floor(diff * 3600.0 + 1e-6).max(0.0);
    Countdown {
        total_seconds: seconds as u64,
    }
}

/// Reports each obligatory prayer once as its time arrives.
///
/// Meant to be polled with the current local hour (for example every 20 seconds). The
/// most recently reported prayer is remembered so repeated polls within the same minute
/// stay quiet; the memory is cleared in the first 36 seconds after midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationTracker {
    last_notified: Option<Prayer>,
}

impl NotificationTracker {
    /// Creates a tracker that has not reported anything yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_notified: None,
        }
    }

    /// Gets the most recently reported prayer.
    #[must_use]
    pub const fn last_notified(&self) -> Option<Prayer> {
        self.last_notified
    }

    /// Returns a prayer that has just become due and was not reported before.
    pub fn poll(&mut self, times: &PrayerTimes, current_hour: f64) -> Option<Prayer> {
        let due = times
            .prayer_due(current_hour)
            .filter(|&prayer| self.last_notified != Some(prayer));
        if let Some(prayer) = due {
            log::debug!("{prayer} is due at {current_hour:.4}h");
            self.last_notified = Some(prayer);
        }
        if current_hour < 0.01 {
            self.last_notified = None;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-3;

    fn mecca() -> Location {
        Location::new(21.4225, 39.8262, 3.0).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> GregorianDate {
        GregorianDate::new(year, month, day).unwrap()
    }

    fn assert_hours(time: PrayerTime, expected: f64) {
        let hours = time.hours().unwrap();
        assert!(
            (hours - expected).abs() < EPSILON,
            "expected {expected}, got {hours}"
        );
    }

    #[test]
    fn test_mecca_june_solstice() {
        let times = calculate(
            date(2024, 6, 21),
            &mecca(),
            CalculationMethod::Mwl,
            AsrConvention::Shafii,
        );

        assert_hours(times.sehri(), 4.0664);
        assert_hours(times.fajr(), 4.2331);
        assert_hours(times.sunrise(), 5.6563);
        assert_hours(times.dhuhr(), 12.3752);
        assert_hours(times.asr(), 15.7056);
        assert_hours(times.maghrib(), 19.0941);
        assert_hours(times.isha(), 20.4301);
        assert_hours(times.tahajjud(), 25.1868);
    }

    #[test]
    fn test_makkah_isha_follows_maghrib() {
        let times = calculate(
            date(2024, 3, 11),
            &mecca(),
            CalculationMethod::Makkah,
            AsrConvention::Shafii,
        );

        assert_hours(times.fajr(), 5.2802);
        assert_hours(times.maghrib(), 18.477);
        let gap = times.isha().hours().unwrap() - times.maghrib().hours().unwrap();
        assert!((gap - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_hanafi_asr_is_later() {
        let dhaka = Location::new(23.8103, 90.4125, 6.0).unwrap();
        let shafii = calculate(
            date(2024, 3, 11),
            &dhaka,
            CalculationMethod::Karachi,
            AsrConvention::Shafii,
        );
        let hanafi = calculate(
            date(2024, 3, 11),
            &dhaka,
            CalculationMethod::Karachi,
            AsrConvention::Hanafi,
        );

        assert_hours(hanafi.asr(), 16.4332);
        assert!(hanafi.asr().hours() > shafii.asr().hours());
        assert_eq!(hanafi.fajr(), shafii.fajr());
    }

    #[test]
    fn test_sehri_and_tahajjud_derivation() {
        let times = calculate(
            date(2024, 1, 1),
            &mecca(),
            CalculationMethod::Mwl,
            AsrConvention::Shafii,
        );
        let fajr = times.fajr().hours().unwrap();
        let maghrib = times.maghrib().hours().unwrap();

        assert!((times.sehri().hours().unwrap() - (fajr - 10.0 / 60.0)).abs() < 1e-9);
        let night = fajr + 24.0 - maghrib;
        let expected = maghrib + night * 2.0 / 3.0;
        assert!((times.tahajjud().hours().unwrap() - expected).abs() < 1e-9);
        assert!(times.tahajjud().hours().unwrap() > 24.0);
    }

    #[test]
    fn test_polar_night_leaves_sun_times_undefined() {
        let tromso = Location::new(69.6496, 18.956, 1.0).unwrap();
        let times = calculate(
            date(2024, 12, 21),
            &tromso,
            CalculationMethod::Mwl,
            AsrConvention::Shafii,
        );

        assert!(!times.sunrise().is_defined());
        assert!(!times.maghrib().is_defined());
        assert!(!times.tahajjud().is_defined());
        assert!(times.fajr().is_defined());
        assert!(times.isha().is_defined());
        assert!(times.dhuhr().is_defined());
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_polar_night_displays_placeholder() {
        let tromso = Location::new(69.6496, 18.956, 1.0).unwrap();
        let times = calculate(
            date(2024, 12, 21),
            &tromso,
            CalculationMethod::Mwl,
            AsrConvention::Shafii,
        );

        assert_eq!(times.sunrise().h24().to_string(), "--:--");
        assert_eq!(times.maghrib().h12().to_string(), "--:-- --");
        assert_eq!(times.fajr().h24().to_string().len(), 5);
    }

    #[test]
    fn test_shifted() {
        let times = calculate(
            date(2024, 6, 21),
            &mecca(),
            CalculationMethod::Mwl,
            AsrConvention::Shafii,
        );
        let shifted = times.shifted(-2.0 / 60.0);

        for ((prayer, original), (_, moved)) in times.iter().zip(shifted.iter()) {
            let delta = original.hours().unwrap() - moved.hours().unwrap();
            assert!((delta - 2.0 / 60.0).abs() < 1e-9, "{prayer:?}");
        }
    }

    #[test]
    fn test_next_prayer() {
        let times = calculate(
            date(2024, 6, 21),
            &mecca(),
            CalculationMethod::Mwl,
            AsrConvention::Shafii,
        );

        assert_eq!(times.next_prayer(0.0).prayer(), Prayer::Sehri);
        assert_eq!(times.next_prayer(4.1).prayer(), Prayer::Fajr);
        assert_eq!(times.next_prayer(12.0).prayer(), Prayer::Dhuhr);

        // Between Maghrib and Isha
        let next = times.next_prayer(19.5);
        assert_eq!(next.prayer(), Prayer::Isha);
        assert!(!next.is_tomorrow());

        // After Isha, Tahajjud is still ahead (raw hour > 24)
        assert_eq!(times.next_prayer(22.0).prayer(), Prayer::Tahajjud);

        let next = times.next_prayer(25.5);
        assert_eq!(next.prayer(), Prayer::Sehri);
        assert!(next.is_tomorrow());
        assert_hours(next.time(), 4.0664 + 24.0);
    }

    #[test]
    fn test_next_prayer_countdown() {
        let times = calculate(
            date(2024, 6, 21),
            &mecca(),
            CalculationMethod::Mwl,
            AsrConvention::Shafii,
        );
        let next = times.next_prayer(15.0);
        assert_eq!(next.prayer(), Prayer::Asr);
        let countdown = next.countdown(15.0).unwrap();
        assert_eq!(countdown.hours(), 0);
        assert_eq!(countdown.minutes(), 42);
    }

    #[test]
    fn test_format_countdown() {
        let countdown = format_countdown(1.0, 23.5);
        assert_eq!(countdown.total_seconds(), 5400);
        assert_eq!(countdown.hours(), 1);
        assert_eq!(countdown.minutes(), 30);
        assert_eq!(countdown.seconds(), 0);

        assert_eq!(format_countdown(12.0, 12.0).total_seconds(), 0);
        assert_eq!(format_countdown(f64::NAN, 12.0).total_seconds(), 0);
        assert_eq!(
            format_countdown(13.0 + 1.0 / 3600.0, 12.0).total_seconds(),
            3601
        );
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_countdown_display() {
        assert_eq!(format_countdown(1.0, 23.5).to_string(), "1h 30m 00s");
        assert_eq!(format_countdown(5.0, 4.99).to_string(), "0h 00m 36s");
        assert_eq!(format_countdown(23.0, 0.0).to_string(), "23h 00m 00s");
    }

    #[test]
    fn test_prayer_due() {
        let times = calculate(
            date(2024, 6, 21),
            &mecca(),
            CalculationMethod::Mwl,
            AsrConvention::Shafii,
        );
        let dhuhr = times.dhuhr().hours().unwrap();

        assert_eq!(times.prayer_due(dhuhr), Some(Prayer::Dhuhr));
        assert_eq!(times.prayer_due(dhuhr + 0.5 / 60.0), Some(Prayer::Dhuhr));
        assert_eq!(times.prayer_due(dhuhr + 1.5 / 60.0), None);
        assert_eq!(times.prayer_due(dhuhr - 0.5 / 60.0), None);
        // Sehri and sunrise never trigger
        assert_eq!(times.prayer_due(times.sunrise().hours().unwrap()), None);
    }

    #[test]
    fn test_notification_tracker() {
        let times = calculate(
            date(2024, 6, 21),
            &mecca(),
            CalculationMethod::Mwl,
            AsrConvention::Shafii,
        );
        let asr = times.asr().hours().unwrap();
        let mut tracker = NotificationTracker::new();

        assert_eq!(tracker.poll(&times, asr - 0.1), None);
        assert_eq!(tracker.poll(&times, asr), Some(Prayer::Asr));
        assert_eq!(tracker.poll(&times, asr + 0.3 / 60.0), None);
        assert_eq!(tracker.last_notified(), Some(Prayer::Asr));

        let maghrib = times.maghrib().hours().unwrap();
        assert_eq!(tracker.poll(&times, maghrib), Some(Prayer::Maghrib));

        tracker.poll(&times, 0.0);
        assert_eq!(tracker.last_notified(), None);
    }

    #[test]
    fn test_hour_angle_out_of_range() {
        assert!(hour_angle(18.0, 89.0, 23.0).is_none());
        assert!(hour_angle(0.833, 0.0, 0.0).is_some());
        assert!(hours_from_cosine(f64::NAN).is_none());
        assert!((hours_from_cosine(0.0).unwrap() - 6.0).abs() < 1e-12);
    }
}
