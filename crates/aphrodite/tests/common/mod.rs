#![allow(dead_code)]

use aphrodite::aspects::AspectSettings;
use aphrodite::cache::{CacheBackend, CacheCategory, CacheError, CacheRow};
use aphrodite::chart::{BirthData, Chart, TransitChart};
use aphrodite::ephemeris::{ChartCalculator, EphemerisError, HouseSystem};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

pub fn birth(date: (i32, u32, u32), time: Option<(u32, u32)>, lat: f64, lon: f64, tz: &str) -> BirthData {
    BirthData::new(
        NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        time.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap()),
        lat,
        lon,
        tz,
    )
    .unwrap()
}

pub fn new_york() -> BirthData {
    birth((1990, 6, 15), Some((14, 30)), 40.7128, -74.0060, "America/New_York")
}

pub fn london() -> BirthData {
    birth((1987, 11, 2), Some((7, 45)), 51.5074, -0.1278, "Europe/London")
}

/// Backend whose every call fails, standing in for an unreachable store
pub struct FailingBackend;

fn unavailable(operation: &'static str) -> CacheError {
    CacheError::Unavailable {
        operation,
        message: "connection refused".to_string(),
    }
}

#[async_trait]
impl CacheBackend for FailingBackend {
    async fn get_row(&self, _fingerprint: &str) -> Result<Option<CacheRow>, CacheError> {
        Err(unavailable("get"))
    }

    async fn put_row(&self, _row: CacheRow) -> Result<(), CacheError> {
        Err(unavailable("put"))
    }

    async fn delete_row(&self, _fingerprint: &str) -> Result<bool, CacheError> {
        Err(unavailable("delete"))
    }

    async fn delete_expired(&self, _category: CacheCategory, _now: DateTime<Utc>) -> Result<u64, CacheError> {
        Err(unavailable("delete_expired"))
    }

    async fn count_rows(&self, _category: CacheCategory) -> Result<u64, CacheError> {
        Err(unavailable("count"))
    }

    async fn clear(&self) -> Result<u64, CacheError> {
        Err(unavailable("clear"))
    }
}

/// Wraps a calculator and counts how often it is asked to compute.
pub struct CountingCalculator<C> {
    inner: C,
    charts: AtomicUsize,
    transits: AtomicUsize,
}

impl<C: ChartCalculator> CountingCalculator<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            charts: AtomicUsize::new(0),
            transits: AtomicUsize::new(0),
        }
    }

    pub fn charts(&self) -> usize {
        self.charts.load(Ordering::SeqCst)
    }

    pub fn transits(&self) -> usize {
        self.transits.load(Ordering::SeqCst)
    }
}

impl<C: ChartCalculator> ChartCalculator for CountingCalculator<C> {
    fn compute_chart(&self, birth: &BirthData, house_system: HouseSystem) -> Result<Chart, EphemerisError> {
        self.charts.fetch_add(1, Ordering::SeqCst);
        self.inner.compute_chart(birth, house_system)
    }

    fn compute_transits(&self, natal: &Chart, date: NaiveDate) -> Result<TransitChart, EphemerisError> {
        self.transits.fetch_add(1, Ordering::SeqCst);
        self.inner.compute_transits(natal, date)
    }

    fn aspect_settings(&self) -> &AspectSettings {
        self.inner.aspect_settings()
    }
}
