//! Rule-based chart interpretation.
//!
//! Every profile is assembled from static lookup tables keyed by closed
//! vocabularies (planet, sign, element, modality, house). The engine keeps
//! track of how many lookups it attempted and how many produced a finding;
//! that coverage feeds the confidence value when the policy asks for it.

pub mod career;
pub mod love;
pub mod personality;
pub mod tables;

pub use career::CareerProfile;
pub use love::{CompatibilityHints, LoveLanguage, LoveProfile};
pub use personality::{PersonalityProfile, PlanetDignity};

use crate::aspects::{Aspect, AspectCalculator, AspectSettings};
use crate::chart::{BirthData, Chart};
use crate::ephemeris::{HouseCusp, Planet, PlanetPosition};
use crate::western::ZodiacSign;
use serde::{Deserialize, Serialize};

/// Confidence reported with fully covered rule sets under the default policy
pub const DEFAULT_CONFIDENCE: f64 = 0.8;

/// One qualitative reading produced by a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub title: String,
    pub description: String,
    /// Planets whose placement triggered the rule
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub planets: Vec<Planet>,
}

impl Finding {
    pub fn new(title: impl Into<String>, description: impl Into<String>, planets: Vec<Planet>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            planets,
        }
    }
}

/// How profile confidence is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum ConfidencePolicy {
    /// Report the same value for every chart
    Fixed(f64),
    /// Report the share of rule lookups that matched
    Coverage,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        ConfidencePolicy::Fixed(DEFAULT_CONFIDENCE)
    }
}

impl ConfidencePolicy {
    pub fn resolve(&self, coverage: &RuleCoverage) -> f64 {
        match self {
            ConfidencePolicy::Fixed(value) => value.clamp(0.0, 1.0),
            ConfidencePolicy::Coverage => coverage.ratio(),
        }
    }
}

/// Tally of rule lookups for one analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleCoverage {
    pub consulted: u32,
    pub matched: u32,
}

impl RuleCoverage {
    /// Record one lookup and pass its result through.
    pub fn track<T>(&mut self, result: Option<T>) -> Option<T> {
        self.consulted += 1;
        if result.is_some() {
            self.matched += 1;
        }
        result
    }

    pub fn ratio(&self) -> f64 {
        if self.consulted == 0 {
            0.0
        } else {
            self.matched as f64 / self.consulted as f64
        }
    }
}

/// Placements handed to a profile analysis, with lookups by planet and house.
pub(crate) struct ChartView<'a> {
    pub birth: &'a BirthData,
    pub planets: &'a [PlanetPosition],
    pub houses: &'a [HouseCusp],
    pub aspect_settings: &'a AspectSettings,
}

impl<'a> ChartView<'a> {
    pub fn planet(&self, planet: Planet) -> Option<&'a PlanetPosition> {
        self.planets.iter().find(|p| p.planet == planet)
    }

    /// House placements are only meaningful when the birth time is known.
    pub fn houses_known(&self) -> bool {
        self.birth.time_known() && self.houses.len() == 12
    }

    /// Sign on the cusp of `house`, when houses are usable
    pub fn cusp_sign(&self, house: u8) -> Option<ZodiacSign> {
        if !self.houses_known() {
            return None;
        }
        self.houses
            .iter()
            .find(|c| c.house == house)
            .map(|c| ZodiacSign::from_longitude(c.longitude))
    }

    pub fn planets_in_house(&self, house: u8) -> Vec<&'a PlanetPosition> {
        if !self.houses_known() {
            return Vec::new();
        }
        self.planets.iter().filter(|p| p.house == house).collect()
    }

    /// Aspects among the placements, classified with the engine's orbs
    pub fn aspects(&self) -> Vec<Aspect> {
        AspectCalculator::new().compute_chart_aspects(self.planets, self.aspect_settings)
    }
}

/// Produces love, personality and career profiles from chart placements.
#[derive(Debug, Clone, Default)]
pub struct InterpretationEngine {
    policy: ConfidencePolicy,
    aspects: AspectSettings,
}

impl InterpretationEngine {
    /// `aspects` should match the settings charts are computed with, so
    /// aspect-based rules see the same aspects as the chart.
    pub fn new(policy: ConfidencePolicy, aspects: AspectSettings) -> Self {
        Self { policy, aspects }
    }

    pub fn policy(&self) -> ConfidencePolicy {
        self.policy
    }

    pub fn aspect_settings(&self) -> &AspectSettings {
        &self.aspects
    }

    fn view<'a>(
        &'a self,
        birth: &'a BirthData,
        planets: &'a [PlanetPosition],
        houses: &'a [HouseCusp],
    ) -> ChartView<'a> {
        ChartView {
            birth,
            planets,
            houses,
            aspect_settings: &self.aspects,
        }
    }

    pub fn analyze_love_profile(
        &self,
        birth: &BirthData,
        planets: &[PlanetPosition],
        houses: &[HouseCusp],
    ) -> LoveProfile {
        let view = self.view(birth, planets, houses);
        love::analyze(&view, &self.policy)
    }

    pub fn analyze_personality_profile(
        &self,
        birth: &BirthData,
        planets: &[PlanetPosition],
        houses: &[HouseCusp],
    ) -> PersonalityProfile {
        let view = self.view(birth, planets, houses);
        personality::analyze(&view, &self.policy)
    }

    pub fn analyze_career_profile(
        &self,
        birth: &BirthData,
        planets: &[PlanetPosition],
        houses: &[HouseCusp],
    ) -> CareerProfile {
        let view = self.view(birth, planets, houses);
        career::analyze(&view, &self.policy)
    }

    pub fn love_profile_for(&self, chart: &Chart) -> LoveProfile {
        self.analyze_love_profile(&chart.birth_data, &chart.planets, &chart.houses)
    }

    pub fn personality_profile_for(&self, chart: &Chart) -> PersonalityProfile {
        self.analyze_personality_profile(&chart.birth_data, &chart.planets, &chart.houses)
    }

    pub fn career_profile_for(&self, chart: &Chart) -> CareerProfile {
        self.analyze_career_profile(&chart.birth_data, &chart.planets, &chart.houses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_ratio() {
        let mut coverage = RuleCoverage::default();
        assert_eq!(coverage.ratio(), 0.0);
        coverage.track(Some(1));
        coverage.track::<u8>(None);
        assert_eq!(coverage.consulted, 2);
        assert_eq!(coverage.matched, 1);
        assert!((coverage.ratio() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_policy_ignores_coverage() {
        let coverage = RuleCoverage { consulted: 10, matched: 1 };
        assert_eq!(ConfidencePolicy::default().resolve(&coverage), DEFAULT_CONFIDENCE);
        assert_eq!(ConfidencePolicy::Fixed(1.7).resolve(&coverage), 1.0);
        assert!((ConfidencePolicy::Coverage.resolve(&coverage) - 0.1).abs() < 1e-12);
    }
}
