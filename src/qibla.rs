//! Direction of prayer towards the Kaaba.

use crate::math::{atan2_deg, cos_deg, normalize_degrees_0_to_360, sin_deg, tan_deg};
use crate::types::Location;

/// Latitude of the Kaaba in degrees.
pub const KAABA_LATITUDE: f64 = 21.4225;

/// Longitude of the Kaaba in degrees.
pub const KAABA_LONGITUDE: f64 = 39.8262;

/// Initial great-circle bearing from the location to the Kaaba.
///
/// Returns degrees clockwise from true north in [0, 360). At the Kaaba itself the
/// direction is undefined and 0 is returned.
///
/// # Example
/// ```
/// # use taqwim::{qibla::qibla_bearing, Location};
/// let london = Location::new(51.5074, -0.1278, 0.0).unwrap();
/// assert!((qibla_bearing(&london) - 118.99).abs() < 0.01);
/// ```
#[must_use]
pub fn qibla_bearing(location: &Location) -> f64 {
    let latitude = location.latitude();
    let delta_longitude = KAABA_LONGITUDE - location.longitude();

    let y = sin_deg(delta_longitude);
    let x = cos_deg(latitude) * tan_deg(KAABA_LATITUDE)
        - sin_deg(latitude) * cos_deg(delta_longitude);

    normalize_degrees_0_to_360(atan2_deg(y, x))
}
