use aphrodite::chart::{BirthData, ChartSettings};
use aphrodite::ephemeris::{ChartCalculator, EphemerisEngine, HouseSystem};
use chrono::{NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn birth() -> BirthData {
    BirthData::new(
        NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
        NaiveTime::from_hms_opt(14, 30, 0),
        40.7128,
        -74.0060,
        "America/New_York",
    )
    .unwrap()
}

fn bench_compute_chart(c: &mut Criterion) {
    let engine = EphemerisEngine::new(ChartSettings::default());
    let birth = birth();

    for system in [HouseSystem::Placidus, HouseSystem::WholeSign] {
        c.bench_function(&format!("compute_chart_{}", system.id()), |b| {
            b.iter(|| engine.compute_chart(black_box(&birth), system))
        });
    }
}

fn bench_compute_transits(c: &mut Criterion) {
    let engine = EphemerisEngine::new(ChartSettings::default());
    let natal = engine.compute_chart(&birth(), HouseSystem::Placidus).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    c.bench_function("compute_transits", |b| {
        b.iter(|| engine.compute_transits(black_box(&natal), black_box(date)))
    });
}

criterion_group!(benches, bench_compute_chart, bench_compute_transits);
criterion_main!(benches);
