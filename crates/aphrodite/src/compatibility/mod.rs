//! Synastry: comparing two charts for relationship compatibility.

pub mod synastry;

pub use synastry::{CompatibilityAnalysis, CompatibilityEngine, ConnectionType, SynastryFinding};
