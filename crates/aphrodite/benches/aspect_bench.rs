use aphrodite::aspects::{AspectCalculator, AspectSettings};
use aphrodite::ephemeris::{Planet, PlanetPosition};
use aphrodite::western::ZodiacSign;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn position(planet: Planet, longitude: f64, speed: f64) -> PlanetPosition {
    PlanetPosition {
        planet,
        longitude,
        sign: ZodiacSign::from_longitude(longitude),
        house: 1,
        retrograde: speed < 0.0,
        speed,
    }
}

fn bench_calculate_aspect(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let settings = AspectSettings::default();
    let sun = position(Planet::Sun, 100.0, 1.0);
    let moon = position(Planet::Moon, 218.5, 13.2);

    c.bench_function("calculate_aspect", |b| {
        b.iter(|| calculator.calculate_aspect(black_box(&sun), black_box(&moon), black_box(&settings)))
    });
}

fn bench_compute_chart_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let settings = AspectSettings::default();
    let planets: Vec<PlanetPosition> = Planet::ALL
        .iter()
        .enumerate()
        .map(|(i, planet)| position(*planet, i as f64 * 27.5, 1.0 - i as f64 * 0.1))
        .collect();

    c.bench_function("compute_chart_aspects", |b| {
        b.iter(|| calculator.compute_chart_aspects(black_box(&planets), black_box(&settings)))
    });
}

criterion_group!(benches, bench_calculate_aspect, bench_compute_chart_aspects);
criterion_main!(benches);
