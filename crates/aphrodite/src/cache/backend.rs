//! Persistence seam for cache rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache unavailable during {operation}: {message}")]
    Unavailable { operation: &'static str, message: String },
    #[error("Cache payload for {fingerprint} is unreadable: {source}")]
    Payload {
        fingerprint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// What a cache row holds; reported separately by cleanup and stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheCategory {
    BirthChart,
    Transit,
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheCategory::BirthChart => f.write_str("birth_chart"),
            CacheCategory::Transit => f.write_str("transit"),
        }
    }
}

/// One stored row: fingerprint key, category, JSON payload and lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRow {
    pub fingerprint: String,
    pub category: CacheCategory,
    pub payload: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheRow {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Storage collaborator behind the cache store. Implementations must
/// tolerate concurrent calls; a put for an existing fingerprint replaces
/// the row (last write wins).
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get_row(&self, fingerprint: &str) -> Result<Option<CacheRow>, CacheError>;

    async fn put_row(&self, row: CacheRow) -> Result<(), CacheError>;

    /// Returns whether a row was removed
    async fn delete_row(&self, fingerprint: &str) -> Result<bool, CacheError>;

    /// Remove rows of `category` with `expires_at <= now`; returns the count removed
    async fn delete_expired(&self, category: CacheCategory, now: DateTime<Utc>) -> Result<u64, CacheError>;

    /// Rows currently stored for `category`, expired or not
    async fn count_rows(&self, category: CacheCategory) -> Result<u64, CacheError>;

    /// Remove every row; returns the count removed
    async fn clear(&self) -> Result<u64, CacheError>;
}
