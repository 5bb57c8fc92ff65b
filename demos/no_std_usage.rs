//! Example demonstrating usage without chrono.
//!
//! Everything works on plain date components and decimal hours, so the same calls are
//! available in no_std builds (with the `libm` feature) where the caller supplies the date.

use taqwim::time::gregorian_to_jd;
use taqwim::{
    AsrConvention, CalculationMethod, GregorianDate, HijriCalendar, HijriDate, Location,
    calculate, format_countdown, sun::sun_position,
};

fn main() {
    println!("Hijri and prayer times without chrono\n");

    let jd = gregorian_to_jd(2024, 6, 21);
    let sun = sun_position(jd);
    println!("Julian Day: {jd:.1}");
    println!("Declination: {:.4}°", sun.declination());
    println!("Equation of time: {:.2} min\n", sun.equation_of_time() * 60.0);

    let calendar = HijriCalendar::new(0);
    let date = GregorianDate::new(2024, 6, 21).expect("Valid date");
    println!("{date} = {}", calendar.gregorian_to_hijri(date));

    let eid = HijriDate::new(1445, 12, 10).expect("Valid Hijri date");
    println!("{eid} = {}\n", calendar.hijri_to_gregorian(eid));

    let mecca = Location::new(21.4225, 39.8262, 3.0).expect("Valid location");
    let times = calculate(date, &mecca, CalculationMethod::Makkah, AsrConvention::Shafii);
    for (prayer, time) in times.iter() {
        match time.hours() {
            Some(hours) => println!("  {:<9} {hours:>8.4} h  {}", prayer.name(), time.h24()),
            None => println!("  {:<9} undefined", prayer.name()),
        }
    }

    // Caller-supplied clock: 21:45 local
    let current = 21.75;
    let next = times.next_prayer(current);
    if let Some(target) = next.time().hours() {
        println!("\nNext: {} in {}", next.prayer(), format_countdown(target, current));
    }
}
