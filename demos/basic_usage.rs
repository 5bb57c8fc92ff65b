//! Basic prayer times and Hijri date for a single day.

use taqwim::qibla::qibla_bearing;
use taqwim::{
    AsrConvention, CalculationMethod, GregorianDate, HijriCalendar, Location, calculate,
};

fn main() {
    env_logger::init();

    // Dhaka: 23.8103°N, 90.4125°E, UTC+6
    let dhaka = Location::new(23.8103, 90.4125, 6.0).expect("Valid location");
    let date = GregorianDate::new(2024, 3, 11).expect("Valid date");

    let calendar = HijriCalendar::default();
    let hijri = calendar.gregorian_to_hijri(date);
    println!("{date} = {hijri} ({})", calendar.day_of_week(hijri).short_name());
    println!("Qibla: {:.1}° from north\n", qibla_bearing(&dhaka));

    for method in CalculationMethod::ALL {
        let times = calculate(date, &dhaka, method, AsrConvention::Hanafi);
        println!("{method}:");
        for (prayer, time) in times.iter() {
            println!("  {:<9} {}  {:>8}", prayer.name(), time.h24(), time.h12().to_string());
        }
        println!();
    }
}
