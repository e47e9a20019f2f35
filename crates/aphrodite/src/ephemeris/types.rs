use crate::western::ZodiacSign;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bodies and points computed for every chart, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    NorthNode,
    SouthNode,
}

impl Planet {
    pub const ALL: [Planet; 13] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
        Planet::Chiron,
        Planet::NorthNode,
        Planet::SouthNode,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Planet::Sun => "sun",
            Planet::Moon => "moon",
            Planet::Mercury => "mercury",
            Planet::Venus => "venus",
            Planet::Mars => "mars",
            Planet::Jupiter => "jupiter",
            Planet::Saturn => "saturn",
            Planet::Uranus => "uranus",
            Planet::Neptune => "neptune",
            Planet::Pluto => "pluto",
            Planet::Chiron => "chiron",
            Planet::NorthNode => "north_node",
            Planet::SouthNode => "south_node",
        }
    }

    /// The lunar nodes are calculated points rather than bodies.
    pub fn is_node(&self) -> bool {
        matches!(self, Planet::NorthNode | Planet::SouthNode)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Planet::NorthNode => "North Node",
            Planet::SouthNode => "South Node",
            other => {
                let id = other.id();
                return write!(f, "{}{}", id[..1].to_uppercase(), &id[1..]);
            }
        };
        f.write_str(name)
    }
}

impl FromStr for Planet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Planet::ALL
            .iter()
            .copied()
            .find(|p| p.id() == normalized)
            .ok_or_else(|| format!("Unknown planet: {}", s))
    }
}

/// Supported house systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Equal,
    WholeSign,
}

impl HouseSystem {
    pub const ALL: [HouseSystem; 4] = [
        HouseSystem::Placidus,
        HouseSystem::Koch,
        HouseSystem::Equal,
        HouseSystem::WholeSign,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            HouseSystem::Placidus => "placidus",
            HouseSystem::Koch => "koch",
            HouseSystem::Equal => "equal",
            HouseSystem::WholeSign => "whole_sign",
        }
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for HouseSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        HouseSystem::ALL
            .iter()
            .copied()
            .find(|h| h.id() == normalized || (normalized == "wholesign" && *h == HouseSystem::WholeSign))
            .ok_or_else(|| {
                format!(
                    "Invalid house system: {}. Valid systems: {:?}",
                    s,
                    HouseSystem::ALL.iter().map(|h| h.id()).collect::<Vec<_>>()
                )
            })
    }
}

/// Planetary position data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub planet: Planet,
    /// Ecliptic longitude in degrees (0-360)
    pub longitude: f64,
    pub sign: ZodiacSign,
    /// House number (1-12)
    pub house: u8,
    pub retrograde: bool,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

impl PlanetPosition {
    /// Degrees elapsed within the sign (0-30)
    pub fn degree_in_sign(&self) -> f64 {
        self.longitude.rem_euclid(30.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// House number (1-12)
    pub house: u8,
    pub longitude: f64,
    pub system: HouseSystem,
}

/// Chart angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartAngles {
    pub ascendant: f64,
    pub midheaven: f64,
    pub descendant: f64,
    pub imum_coeli: f64,
}

impl ChartAngles {
    pub fn new(ascendant: f64, midheaven: f64) -> Self {
        Self {
            ascendant,
            midheaven,
            descendant: (ascendant + 180.0).rem_euclid(360.0),
            imum_coeli: (midheaven + 180.0).rem_euclid(360.0),
        }
    }
}

/// Result of an external geolocation lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}
