use aphrodite::chart::{BirthData, ChartSettings};
use aphrodite::clock::ManualClock;
use aphrodite::ephemeris::{ChartCalculator, EphemerisEngine, EphemerisError, HouseSystem, Planet};
use aphrodite::western::ZodiacSign;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Arc;

fn engine() -> EphemerisEngine {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    EphemerisEngine::with_clock(ChartSettings::default(), clock)
}

fn new_york_birth() -> BirthData {
    BirthData::new(
        NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
        NaiveTime::from_hms_opt(14, 30, 0),
        40.7128,
        -74.0060,
        "America/New_York",
    )
    .unwrap()
}

#[test]
fn test_new_york_placidus_chart_shape() {
    let chart = engine()
        .compute_chart(&new_york_birth(), HouseSystem::Placidus)
        .unwrap();

    assert_eq!(chart.planets.len(), 13);
    assert_eq!(chart.houses.len(), 12);
    let order: Vec<Planet> = chart.planets.iter().map(|p| p.planet).collect();
    assert_eq!(order, Planet::ALL.to_vec());
    for (i, cusp) in chart.houses.iter().enumerate() {
        assert_eq!(cusp.house as usize, i + 1);
        assert_eq!(cusp.system, HouseSystem::Placidus);
    }
    for p in &chart.planets {
        assert!((0.0..360.0).contains(&p.longitude));
        assert!((1..=12).contains(&p.house));
        assert_eq!(p.sign, ZodiacSign::from_longitude(p.longitude));
        assert_eq!(p.retrograde, p.speed < 0.0);
    }

    // Mid-June: the Sun is in late Gemini
    let sun = chart.planet(Planet::Sun).unwrap();
    assert_eq!(sun.sign, ZodiacSign::Gemini);
    assert!((sun.longitude - 84.3).abs() < 1.0, "sun at {}", sun.longitude);

    // Placidus cusp 1 and 10 are the angles
    assert!((chart.houses[0].longitude - chart.angles.ascendant).abs() < 1e-9);
    assert!((chart.houses[9].longitude - chart.angles.midheaven).abs() < 1e-9);
}

#[test]
fn test_chart_is_deterministic_with_fixed_clock() {
    let engine = engine();
    let birth = new_york_birth();
    let first = engine.compute_chart(&birth, HouseSystem::Koch).unwrap();
    let second = engine.compute_chart(&birth, HouseSystem::Koch).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_nodes_are_opposite_and_not_aspected() {
    let chart = engine()
        .compute_chart(&new_york_birth(), HouseSystem::Equal)
        .unwrap();
    let north = chart.planet(Planet::NorthNode).unwrap();
    let south = chart.planet(Planet::SouthNode).unwrap();
    assert!(((south.longitude - north.longitude).rem_euclid(360.0) - 180.0).abs() < 1e-9);
    assert!(north.retrograde);
    assert!(!chart
        .aspects
        .iter()
        .any(|a| a.involves(Planet::NorthNode) && a.involves(Planet::SouthNode)));
}

#[test]
fn test_mercury_retrograde_april_2024() {
    let birth = BirthData::new(
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
        NaiveTime::from_hms_opt(12, 0, 0),
        51.5074,
        -0.1278,
        "Europe/London",
    )
    .unwrap();
    let chart = engine().compute_chart(&birth, HouseSystem::WholeSign).unwrap();
    assert!(chart.planet(Planet::Mercury).unwrap().retrograde);
    assert!(!chart.planet(Planet::Sun).unwrap().retrograde);
    assert!(chart.houses.iter().all(|c| (c.longitude % 30.0).abs() < 1e-9));
}

#[test]
fn test_unknown_time_uses_local_noon() {
    let date = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
    let unknown = BirthData::new(date, None, 40.7128, -74.0060, "America/New_York").unwrap();
    let noon = BirthData::new(date, NaiveTime::from_hms_opt(12, 0, 0), 40.7128, -74.0060, "America/New_York").unwrap();

    let engine = engine();
    let a = engine.compute_chart(&unknown, HouseSystem::Placidus).unwrap();
    let b = engine.compute_chart(&noon, HouseSystem::Placidus).unwrap();
    assert_eq!(a.planets, b.planets);
    assert_eq!(a.houses, b.houses);
    assert!(a.birth_data.time().is_none());
}

#[test]
fn test_quadrant_houses_fail_near_the_pole() {
    let birth = BirthData::new(
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0),
        80.0,
        15.0,
        "Arctic/Longyearbyen",
    )
    .unwrap();
    let engine = engine();

    let err = engine.compute_chart(&birth, HouseSystem::Placidus).unwrap_err();
    assert!(matches!(err, EphemerisError::HouseCalculationFailed { .. }));
    assert!(!err.is_invalid_input());

    let chart = engine.compute_chart(&birth, HouseSystem::Equal).unwrap();
    assert_eq!(chart.houses.len(), 12);
}

#[test]
fn test_invalid_input_names_field() {
    let date = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
    let time = NaiveTime::from_hms_opt(14, 30, 0);

    let field = |result: Result<BirthData, EphemerisError>| match result {
        Err(EphemerisError::InvalidInput { field, .. }) => field,
        other => panic!("expected invalid input, got {:?}", other),
    };

    assert_eq!(field(BirthData::new(date, time, 91.0, 0.0, "UTC")), "latitude");
    assert_eq!(field(BirthData::new(date, time, 0.0, -180.5, "UTC")), "longitude");
    assert_eq!(field(BirthData::new(date, time, f64::NAN, 0.0, "UTC")), "latitude");
    assert_eq!(field(BirthData::new(date, time, 0.0, 0.0, "Mars/Olympus_Mons")), "timezone");
    let ancient = NaiveDate::from_ymd_opt(1492, 10, 12).unwrap();
    assert_eq!(field(BirthData::new(ancient, time, 0.0, 0.0, "UTC")), "date");
}

#[test]
fn test_transits_over_natal_houses() {
    let engine = engine();
    let natal = engine
        .compute_chart(&new_york_birth(), HouseSystem::Placidus)
        .unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let transits = engine.compute_transits(&natal, date).unwrap();

    assert_eq!(transits.date, date);
    assert_eq!(transits.planets.len(), 13);
    assert!(transits.planets.iter().all(|p| (1..=12).contains(&p.house)));
    assert!(!transits.aspects.is_empty());
    assert!(transits
        .aspects
        .iter()
        .all(|a| transits.planet(a.planet_a).is_some() && natal.planet(a.planet_b).is_some()));

    let too_late = NaiveDate::from_ymd_opt(2300, 1, 1).unwrap();
    assert!(engine.compute_transits(&natal, too_late).unwrap_err().is_invalid_input());
}
