mod common;

use aphrodite::cache::{CacheError, CachePolicy, CacheStore, MemoryBackend};
use aphrodite::chart::{Chart, ChartSettings};
use aphrodite::clock::ManualClock;
use aphrodite::ephemeris::{ChartCalculator, EphemerisEngine, HouseSystem};
use chrono::{Duration, NaiveDate};
use common::{london, new_york, start, FailingBackend};
use std::sync::Arc;

struct Fixture {
    clock: Arc<ManualClock>,
    engine: EphemerisEngine,
    store: CacheStore,
}

fn fixture() -> Fixture {
    let clock = Arc::new(ManualClock::new(start()));
    Fixture {
        engine: EphemerisEngine::with_clock(ChartSettings::default(), clock.clone()),
        store: CacheStore::new(Arc::new(MemoryBackend::new()), CachePolicy::default(), clock.clone()),
        clock,
    }
}

fn chart(f: &Fixture, birth: &aphrodite::BirthData) -> (String, Chart) {
    let fingerprint = f
        .store
        .chart_fingerprint(birth, HouseSystem::Placidus, f.engine.aspect_settings())
        .unwrap();
    let chart = f.engine.compute_chart(birth, HouseSystem::Placidus).unwrap();
    (fingerprint, chart)
}

#[tokio::test]
async fn test_put_then_get_round_trips() {
    let f = fixture();
    let (fp, chart) = chart(&f, &new_york());

    assert!(f.store.get_chart(&fp).await.unwrap().is_none());
    f.store.put_chart(&fp, &chart, Duration::days(365)).await.unwrap();
    let cached = f.store.get_chart(&fp).await.unwrap().unwrap();
    assert_eq!(cached, chart);

    let stats = f.store.cache_stats().await.unwrap();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.writes, 1);
    assert_eq!(stats.birth_chart_entries, 1);
    assert!((stats.hit_rate - 0.5).abs() < 1e-12);
}

#[tokio::test]
async fn test_zero_ttl_put_is_an_immediate_miss() {
    let f = fixture();
    let (fp, chart) = chart(&f, &new_york());

    f.store.put_chart(&fp, &chart, Duration::zero()).await.unwrap();
    assert!(f.store.get_chart(&fp).await.unwrap().is_none());

    // A zero TTL also supersedes an existing row
    f.store.put_chart(&fp, &chart, Duration::days(1)).await.unwrap();
    f.store.put_chart(&fp, &chart, Duration::zero()).await.unwrap();
    assert!(f.store.get_chart(&fp).await.unwrap().is_none());
    assert_eq!(f.store.cache_stats().await.unwrap().birth_chart_entries, 0);
}

#[tokio::test]
async fn test_entries_expire_with_the_clock() {
    let f = fixture();
    let (fp, chart) = chart(&f, &new_york());

    f.store.put_chart(&fp, &chart, Duration::hours(2)).await.unwrap();
    f.clock.advance(Duration::minutes(119));
    assert!(f.store.get_chart(&fp).await.unwrap().is_some());
    f.clock.advance(Duration::minutes(1));
    assert!(f.store.get_chart(&fp).await.unwrap().is_none());
}

#[tokio::test]
async fn test_last_write_wins_for_expiry() {
    let f = fixture();
    let (fp, chart) = chart(&f, &new_york());

    f.store.put_chart(&fp, &chart, Duration::hours(1)).await.unwrap();
    f.store.put_chart(&fp, &chart, Duration::days(3)).await.unwrap();
    f.clock.advance(Duration::days(2));
    assert!(f.store.get_chart(&fp).await.unwrap().is_some());
    assert_eq!(f.store.cache_stats().await.unwrap().birth_chart_entries, 1);
}

#[tokio::test]
async fn test_cleanup_removes_only_expired_rows() {
    let f = fixture();
    let (fp_ny, chart_ny) = chart(&f, &new_york());
    let (fp_ldn, chart_ldn) = chart(&f, &london());
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let transits = f.engine.compute_transits(&chart_ny, date).unwrap();
    let fp_transit = f.store.transit_fingerprint(&fp_ny, date);

    f.store.put_chart(&fp_ny, &chart_ny, Duration::days(1)).await.unwrap();
    f.store.put_chart(&fp_ldn, &chart_ldn, Duration::days(10)).await.unwrap();
    f.store
        .put_transits(&fp_transit, &transits, f.store.transit_ttl(date))
        .await
        .unwrap();

    f.clock.advance(Duration::days(2));
    let before = f.store.cache_stats().await.unwrap();
    assert_eq!(before.birth_chart_entries, 2);
    assert_eq!(before.transit_entries, 1);

    let report = f.store.clean_expired_cache().await.unwrap();
    assert_eq!(report.birth_charts_cleaned, 1);
    assert_eq!(report.transits_cleaned, 1);

    let after = f.store.cache_stats().await.unwrap();
    assert_eq!(after.birth_chart_entries, before.birth_chart_entries - report.birth_charts_cleaned);
    assert_eq!(after.transit_entries, before.transit_entries - report.transits_cleaned);
    assert_eq!(f.store.get_chart(&fp_ldn).await.unwrap(), Some(chart_ldn));

    // Nothing left to expire: a second sweep is a no-op
    let again = f.store.clean_expired_cache().await.unwrap();
    assert_eq!(again.total(), 0);
}

#[tokio::test]
async fn test_transit_rows_live_until_end_of_day() {
    let f = fixture();
    let (fp, natal) = chart(&f, &new_york());
    let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let transits = f.engine.compute_transits(&natal, today).unwrap();
    let tfp = f.store.transit_fingerprint(&fp, today);

    f.store.put_transits(&tfp, &transits, f.store.transit_ttl(today)).await.unwrap();
    f.clock.advance(Duration::hours(14) + Duration::minutes(59));
    assert_eq!(f.store.get_transits(&tfp).await.unwrap(), Some(transits));
    f.clock.advance(Duration::minutes(1));
    assert!(f.store.get_transits(&tfp).await.unwrap().is_none());
}

#[tokio::test]
async fn test_invalidate_and_clear() {
    let f = fixture();
    let (fp_ny, chart_ny) = chart(&f, &new_york());
    let (fp_ldn, chart_ldn) = chart(&f, &london());
    f.store.put_chart(&fp_ny, &chart_ny, Duration::days(1)).await.unwrap();
    f.store.put_chart(&fp_ldn, &chart_ldn, Duration::days(1)).await.unwrap();

    assert!(f.store.invalidate(&fp_ny).await.unwrap());
    assert!(!f.store.invalidate(&fp_ny).await.unwrap());
    assert!(f.store.get_chart(&fp_ny).await.unwrap().is_none());

    assert_eq!(f.store.clear().await.unwrap(), 1);
    assert!(f.store.get_chart(&fp_ldn).await.unwrap().is_none());
}

#[tokio::test]
async fn test_clear_report_never_fails() {
    let f = fixture();
    let report = f.store.clear_expired_report().await;
    assert!(report.success);
    assert_eq!(report.birth_charts_cleaned, 0);
    assert_eq!(report.timestamp, start());

    let broken = CacheStore::new(Arc::new(FailingBackend), CachePolicy::default(), f.clock.clone());
    let report = broken.clear_expired_report().await;
    assert!(!report.success);
    assert_eq!(report.transits_cleaned, 0);

    let err = broken.get_chart("anything").await.unwrap_err();
    assert!(matches!(err, CacheError::Unavailable { operation: "get", .. }));
}

#[tokio::test]
async fn test_concurrent_access_across_fingerprints() {
    let f = fixture();
    let (_, chart) = chart(&f, &new_york());
    let store = Arc::new(f.store);

    let mut handles = Vec::new();
    for i in 0..32 {
        let store = store.clone();
        let chart = chart.clone();
        handles.push(tokio::spawn(async move {
            let fp = format!("fingerprint-{}", i);
            store.put_chart(&fp, &chart, Duration::days(1)).await.unwrap();
            store.get_chart(&fp).await.unwrap().is_some()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    let stats = store.cache_stats().await.unwrap();
    assert_eq!(stats.birth_chart_entries, 32);
    assert_eq!(stats.hits, 32);
    assert_eq!(stats.writes, 32);
}
