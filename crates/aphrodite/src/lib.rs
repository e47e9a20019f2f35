pub mod aspects;
pub mod cache;
pub mod chart;
pub mod clock;
pub mod compatibility;
pub mod ephemeris;
pub mod interpretation;
pub mod service;
pub mod western;

pub use aspects::{Aspect, AspectCalculator, AspectSettings, AspectType};
pub use cache::{CacheBackend, CacheError, CachePolicy, CacheStore, MemoryBackend};
pub use chart::{BirthData, Chart, ChartSettings, TransitChart};
pub use clock::{Clock, ManualClock, SystemClock};
pub use compatibility::{CompatibilityAnalysis, CompatibilityEngine, ConnectionType};
pub use ephemeris::{ChartCalculator, EphemerisEngine, EphemerisError, HouseSystem, Planet, PlanetPosition};
pub use interpretation::{ConfidencePolicy, InterpretationEngine, LoveProfile};
pub use service::ChartService;
pub use western::{Element, Modality, ZodiacSign};
