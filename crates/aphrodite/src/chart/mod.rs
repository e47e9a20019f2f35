pub mod birth;
pub mod data;
pub mod settings;

pub use birth::{BirthData, MAX_SUPPORTED_YEAR, MIN_SUPPORTED_YEAR};
pub use data::{Chart, TransitChart};
pub use settings::ChartSettings;
