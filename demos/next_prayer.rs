//! Shows the next prayer and a live countdown from the local clock.

use chrono::Local;
use taqwim::config::Preferences;
use taqwim::time::decimal_hour;
use taqwim::{GregorianDate, NotificationTracker};

fn main() {
    env_logger::init();

    // Stored values as a settings store would hand them over
    let preferences = Preferences::from_stored(51.5074, -0.1278, 0.0, "mwl", "shafii", "-1");

    let now = Local::now();
    let today = GregorianDate::from(now.date_naive());
    let times = preferences.prayer_times(today).expect("Valid location");
    let current = decimal_hour(&now);

    println!("Today: {} / {}", today, preferences.hijri_calendar().today());
    for (prayer, time) in times.iter() {
        println!("  {:<9} {}", prayer.name(), time.h12());
    }

    let next = times.next_prayer(current);
    let when = if next.is_tomorrow() { " tomorrow" } else { "" };
    match next.countdown(current) {
        Some(countdown) => println!("\nNext: {}{when} in {countdown}", next.prayer()),
        None => println!("\nNext: {}{when} (not reached at this latitude)", next.prayer()),
    }

    let mut tracker = NotificationTracker::new();
    if let Some(prayer) = tracker.poll(&times, current) {
        println!("It is time for {prayer} prayer.");
    }
}
