use crate::aspects::AspectSettings;
use crate::cache::backend::{CacheBackend, CacheCategory, CacheError, CacheRow};
use crate::cache::fingerprint;
use crate::cache::stats::{CacheClearResponse, CacheCounters, CacheStats, CleanupReport};
use crate::chart::{BirthData, Chart, TransitChart};
use crate::clock::Clock;
use crate::ephemeris::{EphemerisError, HouseSystem};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Lifetimes and key precision applied by a [`CacheStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct CachePolicy {
    pub birth_chart_ttl: Duration,
    /// Used for transits whose covered day has already ended
    pub transit_min_ttl: Duration,
    pub coordinate_decimals: u32,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            birth_chart_ttl: Duration::days(365),
            transit_min_ttl: Duration::hours(1),
            coordinate_decimals: 4,
        }
    }
}

/// Typed chart/transit cache over a [`CacheBackend`].
pub struct CacheStore {
    backend: Arc<dyn CacheBackend>,
    policy: CachePolicy,
    clock: Arc<dyn Clock>,
    counters: CacheCounters,
}

impl CacheStore {
    pub fn new(backend: Arc<dyn CacheBackend>, policy: CachePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            policy,
            clock,
            counters: CacheCounters::default(),
        }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// `aspects` are the settings the chart is computed with.
    pub fn chart_fingerprint(
        &self,
        birth: &BirthData,
        house_system: HouseSystem,
        aspects: &AspectSettings,
    ) -> Result<String, EphemerisError> {
        fingerprint::chart_fingerprint(birth, house_system, self.policy.coordinate_decimals, aspects)
    }

    pub fn transit_fingerprint(&self, natal_fingerprint: &str, date: NaiveDate) -> String {
        fingerprint::transit_fingerprint(natal_fingerprint, date)
    }

    /// Time a transit row for `date` should live: until the end of that UTC
    /// day, or the minimum TTL once the day is over.
    pub fn transit_ttl(&self, date: NaiveDate) -> Duration {
        let end_of_day = date
            .succ_opt()
            .map(|next| Utc.from_utc_datetime(&next.and_time(NaiveTime::MIN)));
        match end_of_day {
            Some(end) if end > self.clock.now() => end - self.clock.now(),
            _ => self.policy.transit_min_ttl,
        }
    }

    pub async fn get_chart(&self, fingerprint: &str) -> Result<Option<Chart>, CacheError> {
        self.get_payload(CacheCategory::BirthChart, fingerprint).await
    }

    pub async fn put_chart(&self, fingerprint: &str, chart: &Chart, ttl: Duration) -> Result<(), CacheError> {
        self.put_payload(CacheCategory::BirthChart, fingerprint, chart, ttl).await
    }

    pub async fn get_transits(&self, fingerprint: &str) -> Result<Option<TransitChart>, CacheError> {
        self.get_payload(CacheCategory::Transit, fingerprint).await
    }

    pub async fn put_transits(
        &self,
        fingerprint: &str,
        transits: &TransitChart,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.put_payload(CacheCategory::Transit, fingerprint, transits, ttl).await
    }

    /// Drop one row regardless of expiry; returns whether it existed.
    pub async fn invalidate(&self, fingerprint: &str) -> Result<bool, CacheError> {
        self.backend.delete_row(fingerprint).await
    }

    /// Remove every row whose `expires_at` has passed. Live rows are untouched.
    pub async fn clean_expired_cache(&self) -> Result<CleanupReport, CacheError> {
        let now = self.clock.now();
        let report = CleanupReport {
            birth_charts_cleaned: self.backend.delete_expired(CacheCategory::BirthChart, now).await?,
            transits_cleaned: self.backend.delete_expired(CacheCategory::Transit, now).await?,
        };
        log::info!(
            "Cache cleanup removed {} birth charts and {} transits",
            report.birth_charts_cleaned,
            report.transits_cleaned
        );
        Ok(report)
    }

    /// Remove every row, live or not
    pub async fn clear(&self) -> Result<u64, CacheError> {
        let removed = self.backend.clear().await?;
        log::info!("Cache cleared ({} rows)", removed);
        Ok(removed)
    }

    pub async fn cache_stats(&self) -> Result<CacheStats, CacheError> {
        let birth_charts = self.backend.count_rows(CacheCategory::BirthChart).await?;
        let transits = self.backend.count_rows(CacheCategory::Transit).await?;
        Ok(self.counters.snapshot(birth_charts, transits, self.clock.now()))
    }

    /// Expiry sweep shaped for the clear endpoint; backend failures are
    /// reported rather than returned.
    pub async fn clear_expired_report(&self) -> CacheClearResponse {
        match self.clean_expired_cache().await {
            Ok(report) => CacheClearResponse {
                success: true,
                birth_charts_cleaned: report.birth_charts_cleaned,
                transits_cleaned: report.transits_cleaned,
                timestamp: self.clock.now(),
            },
            Err(e) => {
                log::error!("Cache cleanup failed: {}", e);
                CacheClearResponse {
                    success: false,
                    birth_charts_cleaned: 0,
                    transits_cleaned: 0,
                    timestamp: self.clock.now(),
                }
            }
        }
    }

    async fn get_payload<T: DeserializeOwned>(
        &self,
        category: CacheCategory,
        fingerprint: &str,
    ) -> Result<Option<T>, CacheError> {
        let row = self.backend.get_row(fingerprint).await.map_err(|e| {
            self.counters.read_failure();
            e
        })?;

        let row = match row {
            Some(row) if row.category == category && row.is_live(self.clock.now()) => row,
            _ => {
                self.counters.miss();
                return Ok(None);
            }
        };

        match serde_json::from_str(&row.payload) {
            Ok(value) => {
                self.counters.hit();
                Ok(Some(value))
            }
            Err(source) => {
                self.counters.read_failure();
                Err(CacheError::Payload {
                    fingerprint: fingerprint.to_string(),
                    source,
                })
            }
        }
    }

    async fn put_payload<T: Serialize>(
        &self,
        category: CacheCategory,
        fingerprint: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        // A non-positive TTL supersedes whatever is stored and keeps nothing.
        if ttl <= Duration::zero() {
            return self.backend.delete_row(fingerprint).await.map(|_| ());
        }

        let payload = serde_json::to_string(value).map_err(|source| {
            self.counters.write_failure();
            CacheError::Payload {
                fingerprint: fingerprint.to_string(),
                source,
            }
        })?;

        let created_at = self.clock.now();
        let row = CacheRow {
            fingerprint: fingerprint.to_string(),
            category,
            payload,
            created_at,
            // A TTL reaching past the representable range never expires.
            expires_at: created_at.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        match self.backend.put_row(row).await {
            Ok(()) => {
                self.counters.write();
                log::debug!("Cached {} {}", category, fingerprint);
                Ok(())
            }
            Err(e) => {
                self.counters.write_failure();
                Err(e)
            }
        }
    }
}
