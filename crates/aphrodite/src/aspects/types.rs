use crate::ephemeris::Planet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Aspect vocabulary, in classification table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectType {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
    Quincunx,
    Semisextile,
    Semisquare,
    Sesquiquadrate,
}

impl AspectType {
    pub const ALL: [AspectType; 9] = [
        AspectType::Conjunction,
        AspectType::Opposition,
        AspectType::Trine,
        AspectType::Square,
        AspectType::Sextile,
        AspectType::Quincunx,
        AspectType::Semisextile,
        AspectType::Semisquare,
        AspectType::Sesquiquadrate,
    ];

    /// Exact angle for this aspect
    pub fn angle(&self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Opposition => 180.0,
            AspectType::Trine => 120.0,
            AspectType::Square => 90.0,
            AspectType::Sextile => 60.0,
            AspectType::Quincunx => 150.0,
            AspectType::Semisextile => 30.0,
            AspectType::Semisquare => 45.0,
            AspectType::Sesquiquadrate => 135.0,
        }
    }

    /// Orb allowed when no override is configured
    pub fn default_orb(&self) -> f64 {
        match self {
            AspectType::Conjunction | AspectType::Opposition => 8.0,
            AspectType::Trine => 7.0,
            AspectType::Square => 6.0,
            AspectType::Sextile => 4.0,
            AspectType::Quincunx => 3.0,
            AspectType::Semisextile | AspectType::Semisquare | AspectType::Sesquiquadrate => 2.0,
        }
    }

    pub fn is_major(&self) -> bool {
        matches!(
            self,
            AspectType::Conjunction
                | AspectType::Opposition
                | AspectType::Trine
                | AspectType::Square
                | AspectType::Sextile
        )
    }

    /// Square and opposition: the aspects read as tension.
    pub fn is_hard(&self) -> bool {
        matches!(self, AspectType::Square | AspectType::Opposition)
    }

    pub fn id(&self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Opposition => "opposition",
            AspectType::Trine => "trine",
            AspectType::Square => "square",
            AspectType::Sextile => "sextile",
            AspectType::Quincunx => "quincunx",
            AspectType::Semisextile => "semisextile",
            AspectType::Semisquare => "semisquare",
            AspectType::Sesquiquadrate => "sesquiquadrate",
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id();
        write!(f, "{}{}", id[..1].to_uppercase(), &id[1..])
    }
}

impl FromStr for AspectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        AspectType::ALL
            .iter()
            .copied()
            .find(|a| a.id() == normalized)
            .ok_or_else(|| format!("Unknown aspect type: {}", s))
    }
}

/// An aspect between two planets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub planet_a: Planet,
    pub planet_b: Planet,
    pub aspect_type: AspectType,
    /// Actual angular separation (0-180)
    pub angle: f64,
    /// Deviation from the exact aspect angle
    pub orb: f64,
    /// Whether the aspect is applying (approaching exact)
    pub applying: bool,
}

impl Aspect {
    /// Same aspect with the planet roles exchanged.
    pub fn swapped(&self) -> Aspect {
        Aspect {
            planet_a: self.planet_b,
            planet_b: self.planet_a,
            ..self.clone()
        }
    }

    /// Within 0.1 degrees of exact
    pub fn is_exact(&self) -> bool {
        self.orb < 0.1
    }

    pub fn involves(&self, planet: Planet) -> bool {
        self.planet_a == planet || self.planet_b == planet
    }
}

/// Settings for aspect calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSettings {
    /// Orb overrides per aspect type
    #[serde(default)]
    pub orbs: HashMap<AspectType, f64>,
    /// Whether minor aspects are classified at all
    #[serde(default = "default_include_minor")]
    pub include_minor: bool,
}

fn default_include_minor() -> bool {
    true
}

impl AspectSettings {
    pub fn orb_for(&self, aspect_type: AspectType) -> f64 {
        self.orbs
            .get(&aspect_type)
            .copied()
            .unwrap_or_else(|| aspect_type.default_orb())
    }

    pub fn with_orb(mut self, aspect_type: AspectType, orb: f64) -> Self {
        self.orbs.insert(aspect_type, orb);
        self
    }

    /// Aspect types considered under these settings, in table order.
    pub fn active_types(&self) -> impl Iterator<Item = AspectType> + '_ {
        AspectType::ALL
            .into_iter()
            .filter(move |a| self.include_minor || a.is_major())
    }
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            orbs: HashMap::new(),
            include_minor: true,
        }
    }
}
