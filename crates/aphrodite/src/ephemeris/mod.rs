pub mod engine;
pub mod houses;
pub mod julian;
pub mod orbits;
pub mod types;

pub use engine::{ChartCalculator, EphemerisEngine, EphemerisError};
pub use types::{ChartAngles, GeoLocation, HouseCusp, HouseSystem, Planet, PlanetPosition};
