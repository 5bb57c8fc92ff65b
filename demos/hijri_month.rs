//! Prints a Hijri month as a weekly grid with Gregorian dates.
//!
//! Usage: `cargo run --example hijri_month -- [year] [month] [adjustment]`

use taqwim::hijri::{Weekday, month_length, parse_adjustment};
use taqwim::{HijriCalendar, HijriDate};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let year: i32 = args.first().and_then(|s| s.parse().ok()).unwrap_or(1445);
    let month: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(9);
    let calendar = args
        .get(2)
        .map_or_else(HijriCalendar::default, |s| HijriCalendar::new(parse_adjustment(s)));

    let first = HijriDate::new(year, month, 1).expect("Valid Hijri month");
    let (start, end) = calendar.month_span(year, month).expect("Valid Hijri month");
    println!(
        "{} {} AH ({start} to {end}, adjustment {})",
        first.month_name(),
        year,
        calendar.adjustment()
    );

    for weekday in 0..7 {
        print!("{:>9}", Weekday::from_number_from_sunday(weekday).short_name());
    }
    println!();

    let offset = calendar.day_of_week(first).number_from_sunday();
    print!("{}", " ".repeat(9 * offset as usize));
    for day in 1..=month_length(year, month) {
        let date = HijriDate::new(year, month, day).expect("Valid day");
        let gregorian = calendar.hijri_to_gregorian(date);
        print!("{:>3} {:02}/{:02}", day, gregorian.day(), gregorian.month());
        if calendar.day_of_week(date) == Weekday::Saturday {
            println!();
        }
    }
    println!();
}
