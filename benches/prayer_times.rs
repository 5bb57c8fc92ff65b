use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use taqwim::{AsrConvention, CalculationMethod, GregorianDate, Location, calculate};

fn benchmark_single_day(c: &mut Criterion) {
    let mecca = Location::new(21.4225, 39.8262, 3.0).unwrap();
    let date = GregorianDate::new(2024, 6, 21).unwrap();

    c.bench_function("prayer_times_single", |b| {
        b.iter(|| {
            calculate(
                black_box(date),
                black_box(&mecca),
                black_box(CalculationMethod::Mwl),
                black_box(AsrConvention::Shafii),
            )
        })
    });
}

fn benchmark_year_fixed_location(c: &mut Criterion) {
    let mut group = c.benchmark_group("year_fixed_location");
    let start = GregorianDate::new(2024, 1, 1).unwrap();
    let dates: Vec<GregorianDate> = (0..366).map(|offset| start.add_days(offset)).collect();

    group.throughput(Throughput::Elements(dates.len() as u64));

    // Monthly timetable pattern: one location, every day of the year
    for (name, location) in [
        ("mecca", Location::new(21.4225, 39.8262, 3.0).unwrap()),
        ("london", Location::new(51.5074, -0.1278, 0.0).unwrap()),
        ("tromso", Location::new(69.6496, 18.956, 1.0).unwrap()),
    ] {
        group.bench_with_input(BenchmarkId::new("mwl", name), &location, |b, location| {
            b.iter(|| {
                for &date in &dates {
                    black_box(calculate(
                        date,
                        location,
                        CalculationMethod::Mwl,
                        AsrConvention::Shafii,
                    ));
                }
            })
        });
    }

    group.finish();
}

fn benchmark_coordinate_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("coordinate_sweep");
    let date = GregorianDate::new(2024, 3, 20).unwrap();

    for count in [10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));

        let locations: Vec<Location> = (0..count)
            .map(|i| {
                let latitude = -60.0 + 120.0 * f64::from(i) / f64::from(count);
                let longitude = -180.0 + 360.0 * f64::from(i) / f64::from(count);
                Location::new(latitude, longitude, 0.0).unwrap()
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &locations, |b, locations| {
            b.iter(|| {
                for location in locations {
                    black_box(calculate(
                        black_box(date),
                        location,
                        CalculationMethod::Isna,
                        AsrConvention::Hanafi,
                    ));
                }
            })
        });
    }

    group.finish();
}

fn benchmark_next_prayer(c: &mut Criterion) {
    let mecca = Location::new(21.4225, 39.8262, 3.0).unwrap();
    let date = GregorianDate::new(2024, 6, 21).unwrap();
    let times = calculate(date, &mecca, CalculationMethod::Mwl, AsrConvention::Shafii);

    c.bench_function("next_prayer_with_countdown", |b| {
        b.iter(|| {
            let next = times.next_prayer(black_box(22.5));
            next.countdown(black_box(22.5))
        })
    });
}

criterion_group!(
    benches,
    benchmark_single_day,
    benchmark_year_fixed_location,
    benchmark_coordinate_sweep,
    benchmark_next_prayer
);

criterion_main!(benches);
