use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-lifetime counters for one cache store.
#[derive(Debug, Default)]
pub(crate) struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
    write_failures: AtomicU64,
    read_failures: AtomicU64,
}

impl CacheCounters {
    pub(crate) fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn write_failure(&self) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn read_failure(&self) {
        self.read_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(
        &self,
        birth_chart_entries: u64,
        transit_entries: u64,
        timestamp: DateTime<Utc>,
    ) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;
        CacheStats {
            hits,
            misses,
            writes: self.writes.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
            read_failures: self.read_failures.load(Ordering::Relaxed),
            hit_rate: if lookups == 0 { 0.0 } else { hits as f64 / lookups as f64 },
            birth_chart_entries,
            transit_entries,
            timestamp,
        }
    }
}

/// Point-in-time view of cache activity and occupancy.
///
/// Entry counts include rows that have expired but not yet been cleaned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    pub write_failures: u64,
    pub read_failures: u64,
    pub hit_rate: f64,
    pub birth_chart_entries: u64,
    pub transit_entries: u64,
    pub timestamp: DateTime<Utc>,
}

/// Rows removed by one expiry sweep, per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleanupReport {
    pub birth_charts_cleaned: u64,
    pub transits_cleaned: u64,
}

impl CleanupReport {
    pub fn total(&self) -> u64 {
        self.birth_charts_cleaned + self.transits_cleaned
    }
}

/// Result of the cache-clear endpoint. Never an error: a failing backend
/// is reported with `success: false` and zero counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheClearResponse {
    pub success: bool,
    pub birth_charts_cleaned: u64,
    pub transits_cleaned: u64,
    pub timestamp: DateTime<Utc>,
}

/// Result of the cache-stats endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub birth_chart_entries: u64,
    pub transit_entries: u64,
    pub timestamp: DateTime<Utc>,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            hit_rate: stats.hit_rate,
            birth_chart_entries: stats.birth_chart_entries,
            transit_entries: stats.transit_entries,
            timestamp: stats.timestamp,
        }
    }
}
