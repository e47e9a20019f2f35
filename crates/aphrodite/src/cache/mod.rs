//! Fingerprint-keyed cache for computed charts and transits.

pub mod backend;
pub mod fingerprint;
pub mod memory;
pub mod stats;
pub mod store;

pub use backend::{CacheBackend, CacheCategory, CacheError, CacheRow};
pub use fingerprint::{chart_fingerprint, transit_fingerprint};
pub use memory::MemoryBackend;
pub use stats::{CacheClearResponse, CacheStats, CacheStatsResponse, CleanupReport};
pub use store::{CachePolicy, CacheStore};
