use crate::cache::backend::{CacheBackend, CacheCategory, CacheError, CacheRow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// In-process backend over a sharded map: operations on different
/// fingerprints do not contend on a single lock.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    rows: DashMap<String, CacheRow>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get_row(&self, fingerprint: &str) -> Result<Option<CacheRow>, CacheError> {
        Ok(self.rows.get(fingerprint).map(|row| row.value().clone()))
    }

    async fn put_row(&self, row: CacheRow) -> Result<(), CacheError> {
        self.rows.insert(row.fingerprint.clone(), row);
        Ok(())
    }

    async fn delete_row(&self, fingerprint: &str) -> Result<bool, CacheError> {
        Ok(self.rows.remove(fingerprint).is_some())
    }

    async fn delete_expired(&self, category: CacheCategory, now: DateTime<Utc>) -> Result<u64, CacheError> {
        let mut removed = 0u64;
        self.rows.retain(|_, row| {
            let expired = row.category == category && !row.is_live(now);
            if expired {
                removed += 1;
            }
            !expired
        });
        Ok(removed)
    }

    async fn count_rows(&self, category: CacheCategory) -> Result<u64, CacheError> {
        Ok(self.rows.iter().filter(|row| row.category == category).count() as u64)
    }

    async fn clear(&self) -> Result<u64, CacheError> {
        let removed = self.rows.len() as u64;
        self.rows.clear();
        Ok(removed)
    }
}
