//! # Taqwim
//!
//! Tabular Hijri calendar conversion and Islamic prayer time calculation.

#![cfg_attr(not(feature = "std"), no_std)]
//!
//! This library provides two independent calculators:
//! - **Hijri calendar**: the civil tabular (arithmetic) Hijri calendar with its 30-year
//!   leap cycle, converting exactly in both directions via Julian Day numbers, with a
//!   configurable day-count adjustment to follow the locally observed calendar
//! - **Prayer times**: Sehri, Fajr, sunrise, Dhuhr, Asr, Maghrib, Isha and Tahajjud from
//!   coordinates and date, using a low-precision solar model and the common institutional
//!   conventions (Muslim World League, ISNA, Egypt, Umm al-Qura, Karachi)
//!
//! In addition, it provides the Qibla bearing and helpers for next-prayer countdowns and
//! prayer notifications.
//!
//! ## Features
//!
//! - Multiple configurations: `std` or `no_std`, with or without `chrono`, math via native or
//!   `libm`
//! - Pure computation: no global state, no I/O; the Hijri adjustment lives in a
//!   [`HijriCalendar`] value
//! - Undefined instants (polar day/night) are reported as undefined [`PrayerTime`]s, not errors
//!
//! ## Feature Flags
//!
//! - `std` (default): Use standard library for native math functions (usually faster than `libm`)
//! - `chrono` (default): Enable `NaiveDate`/`Timelike` conversions and [`HijriCalendar::today`]
//! - `libm`: Use pure Rust math for `no_std` environments
//! - `serde`: Serialize and deserialize data types and [`config::Preferences`]
//!
//! **Configuration examples:**
//! ```toml
//! # Default: std + chrono (most convenient)
//! taqwim = "0.1"
//!
//! # Minimal std (no chrono, smallest dependency tree)
//! taqwim = { version = "0.1", default-features = false, features = ["std"] }
//!
//! # Minimal no_std (pure numeric API)
//! taqwim = { version = "0.1", default-features = false, features = ["libm"] }
//! ```
//!
//! ## References
//!
//! - Meeus, J. (1998). Astronomical Algorithms, 2nd edition. Willmann-Bell. Chapter 7.
//! - U.S. Naval Observatory. Approximate Solar Coordinates.
//!   <https://aa.usno.navy.mil/faq/sun_approx>
//!
//! ## Quick Start
//!
//! ### Hijri dates
//! ```rust
//! use taqwim::{GregorianDate, HijriCalendar, HijriDate};
//!
//! // Default adjustment of -1 day
//! let calendar = HijriCalendar::default();
//! let hijri = calendar.gregorian_to_hijri(GregorianDate::new(2024, 1, 1).unwrap());
//! assert_eq!(hijri.to_string(), "18 Jumada al-Thani 1445 AH");
//!
//! let ramadan = HijriDate::new(1445, 9, 1).unwrap();
//! let gregorian = calendar.hijri_to_gregorian(ramadan);
//! println!("1 Ramadan 1445 AH is {gregorian}");
//! ```
//!
//! ### Prayer times
//! ```rust
//! use taqwim::{calculate, AsrConvention, CalculationMethod, GregorianDate, Location};
//!
//! let mecca = Location::new(21.4225, 39.8262, 3.0).unwrap();
//! let date = GregorianDate::new(2024, 6, 21).unwrap();
//! let times = calculate(date, &mecca, CalculationMethod::Mwl, AsrConvention::Shafii);
//!
//! for (prayer, time) in times.iter() {
//!     println!("{:<9} {} ({})", prayer.name(), time.h24(), time.h12());
//! }
//!
//! let next = times.next_prayer(13.0);
//! println!("Next: {} in {}", next.prayer(), next.countdown(13.0).unwrap());
//! ```
//!
//! ## Conventions
//!
//! - **Julian Day**: Gregorian dates map to the JD of their midnight (`.5`), Hijri dates to
//!   the integral JD of their noon
//! - **Times**: decimal hours in the location's civil time; raw values may exceed 24
//! - **Angles**: degrees; latitude north positive, longitude east positive

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
)]

// Public API exports
pub use crate::error::{Error, Result};
pub use crate::hijri::{HijriCalendar, HijriDate};
pub use crate::prayer::{
    Countdown, NextPrayer, NotificationTracker, PrayerTimes, calculate, format_countdown,
};
pub use crate::time::GregorianDate;
pub use crate::types::{AsrConvention, CalculationMethod, IshaRule, Location, Prayer, PrayerTime};

// Calculator modules
pub mod hijri;
pub mod prayer;
pub mod qibla;
pub mod sun;

// Core modules
pub mod config;
pub mod error;
pub mod types;

// Internal modules
mod math;

// Public modules
pub mod time;
