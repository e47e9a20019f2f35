use crate::aspects::AspectSettings;
use crate::ephemeris::HouseSystem;
use serde::{Deserialize, Serialize};

/// Computation settings for charts and transits
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default)]
    pub default_house_system: HouseSystem,
    #[serde(default)]
    pub aspects: AspectSettings,
}
