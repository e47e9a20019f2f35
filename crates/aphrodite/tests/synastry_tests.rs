mod common;

use aphrodite::aspects::AspectType;
use aphrodite::chart::{Chart, ChartSettings};
use aphrodite::clock::ManualClock;
use aphrodite::compatibility::{CompatibilityEngine, ConnectionType};
use aphrodite::ephemeris::{ChartAngles, ChartCalculator, EphemerisEngine, HouseSystem, Planet, PlanetPosition};
use aphrodite::western::ZodiacSign;
use common::{birth, london, new_york, start};
use std::sync::Arc;

fn compute(birth: &aphrodite::BirthData) -> Chart {
    let engine = EphemerisEngine::with_clock(ChartSettings::default(), Arc::new(ManualClock::new(start())));
    engine.compute_chart(birth, HouseSystem::Placidus).unwrap()
}

/// A chart holding only the Sun and Moon at the given longitudes
fn luminaries(sun: f64, moon: f64) -> Chart {
    let position = |planet, longitude: f64| PlanetPosition {
        planet,
        longitude,
        sign: ZodiacSign::from_longitude(longitude),
        house: 1,
        retrograde: false,
        speed: if planet == Planet::Moon { 13.0 } else { 1.0 },
    };
    Chart {
        birth_data: new_york(),
        house_system: HouseSystem::Placidus,
        planets: vec![position(Planet::Sun, sun), position(Planet::Moon, moon)],
        houses: Vec::new(),
        angles: ChartAngles::new(0.0, 270.0),
        aspects: Vec::new(),
        computed_at: start(),
    }
}

#[test]
fn test_self_synastry_is_fully_resonant() {
    let engine = CompatibilityEngine::default();
    let chart = compute(&new_york());
    let analysis = engine.analyze_synastry(&chart, &chart);

    assert_eq!(analysis.resonance, 1.0);
    for planet in Planet::ALL {
        let own = analysis
            .strengths
            .iter()
            .find(|f| f.planet_a == planet && f.planet_b == planet)
            .unwrap_or_else(|| panic!("{} lacks a self-conjunction", planet));
        assert_eq!(own.aspect_type, AspectType::Conjunction);
        assert_eq!(own.orb, 0.0);
    }
    assert!(analysis.overall_compatibility > 50.0);
}

#[test]
fn test_opposed_suns_are_a_challenge() {
    let engine = CompatibilityEngine::default();
    let a = luminaries(0.0, 100.0);
    let b = luminaries(180.0, 20.0);
    let analysis = engine.analyze_synastry(&a, &b);

    let opposition = analysis
        .challenges
        .iter()
        .find(|f| f.planet_a == Planet::Sun && f.planet_b == Planet::Sun)
        .unwrap();
    assert_eq!(opposition.aspect_type, AspectType::Opposition);
    assert!(opposition.score < 0.0);
    assert!(analysis.strengths.is_empty());
    assert!(analysis.overall_compatibility < 50.0);
    assert_eq!(analysis.resonance, 0.0);
    // General advice plus the opposition template
    assert_eq!(analysis.advice.len(), 2);
    assert!(analysis.advice[1].contains("Opposition"));
}

#[test]
fn test_synastry_is_symmetric() {
    let engine = CompatibilityEngine::default();
    let pairs = [
        (compute(&new_york()), compute(&london())),
        (
            compute(&birth((1975, 2, 28), None, -33.8688, 151.2093, "Australia/Sydney")),
            compute(&birth((2001, 9, 9), Some((23, 5)), 35.6762, 139.6503, "Asia/Tokyo")),
        ),
        (luminaries(10.0, 250.0), luminaries(130.5, 96.0)),
    ];

    for (a, b) in &pairs {
        let ab = engine.analyze_synastry(a, b);
        let ba = engine.analyze_synastry(b, a);
        assert_eq!(ab.overall_compatibility, ba.overall_compatibility);
        assert_eq!(ab.connection_type, ba.connection_type);
        assert_eq!(ab.resonance, ba.resonance);
        assert_eq!(ab.strengths.len(), ba.strengths.len());
        assert_eq!(ab.challenges.len(), ba.challenges.len());
        assert_eq!(ab.advice, ba.advice);
    }
}

#[test]
fn test_score_stays_in_range() {
    let engine = CompatibilityEngine::default();
    let analysis = engine.analyze_synastry(&compute(&new_york()), &compute(&london()));
    assert!((0.0..=100.0).contains(&analysis.overall_compatibility));
    assert!((0.0..=1.0).contains(&analysis.resonance));
    assert_eq!(
        analysis.connection_type,
        ConnectionType::from_score(analysis.overall_compatibility)
    );
    assert!(!analysis.advice.is_empty());
    for finding in &analysis.challenges {
        assert!(finding.score < 0.0 || finding.aspect_type.is_hard());
    }
    for finding in &analysis.strengths {
        assert!(finding.score >= 0.0 && !finding.aspect_type.is_hard());
    }
}
