use crate::aspects::{Aspect, AspectCalculator, AspectSettings, AspectType};
use crate::chart::Chart;
use crate::ephemeris::Planet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Raw contribution sum mapped to half of the 0-100 range by tanh
const SCORE_SCALE: f64 = 6.0;
/// Share of the score kept by an aspect at the edge of its orb
const MIN_TIGHTNESS: f64 = 0.5;

lazy_static::lazy_static! {
    /// Pairs that carry extra weight in synastry, keyed in enum order
    static ref PAIR_BONUS: HashMap<(Planet, Planet), f64> = {
        let mut m = HashMap::new();
        m.insert((Planet::Sun, Planet::Moon), 1.5);
        m.insert((Planet::Venus, Planet::Mars), 1.5);
        m.insert((Planet::Sun, Planet::Venus), 1.3);
        m.insert((Planet::Moon, Planet::Venus), 1.3);
        m.insert((Planet::Moon, Planet::Moon), 1.2);
        m.insert((Planet::Moon, Planet::Saturn), 1.2);
        m.insert((Planet::Venus, Planet::Saturn), 1.2);
        m.insert((Planet::Sun, Planet::Sun), 1.1);
        m.insert((Planet::Mercury, Planet::Mercury), 1.1);
        m.insert((Planet::Sun, Planet::NorthNode), 1.1);
        m.insert((Planet::Moon, Planet::NorthNode), 1.1);
        m
    };
}

fn aspect_base(aspect_type: AspectType) -> f64 {
    match aspect_type {
        AspectType::Conjunction => 1.0,
        AspectType::Trine => 1.0,
        AspectType::Sextile => 0.7,
        AspectType::Semisextile => 0.2,
        AspectType::Opposition => -0.6,
        AspectType::Square => -0.8,
        AspectType::Quincunx => -0.3,
        AspectType::Semisquare => -0.2,
        AspectType::Sesquiquadrate => -0.3,
    }
}

fn planet_weight(planet: Planet) -> f64 {
    match planet {
        Planet::Sun | Planet::Moon => 1.0,
        Planet::Venus => 0.9,
        Planet::Mars => 0.8,
        Planet::Mercury | Planet::Saturn => 0.6,
        Planet::Jupiter => 0.5,
        Planet::NorthNode | Planet::SouthNode => 0.4,
        Planet::Uranus | Planet::Neptune | Planet::Pluto | Planet::Chiron => 0.3,
    }
}

fn pair_bonus(a: Planet, b: Planet) -> f64 {
    let key = if a <= b { (a, b) } else { (b, a) };
    PAIR_BONUS.get(&key).copied().unwrap_or(1.0)
}

/// Overall label bucketed from the 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    DeepHarmony,
    Harmonious,
    Balanced,
    GrowthOriented,
    Challenging,
}

impl ConnectionType {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            ConnectionType::DeepHarmony
        } else if score >= 60.0 {
            ConnectionType::Harmonious
        } else if score >= 45.0 {
            ConnectionType::Balanced
        } else if score >= 30.0 {
            ConnectionType::GrowthOriented
        } else {
            ConnectionType::Challenging
        }
    }

    fn advice(&self) -> &'static str {
        match self {
            ConnectionType::DeepHarmony => "The bond comes easily; keep choosing each other so ease does not turn into autopilot.",
            ConnectionType::Harmonious => "Plenty of natural support; lean on it when the harder contacts flare.",
            ConnectionType::Balanced => "Ease and friction are evenly matched; shared intention tips the balance.",
            ConnectionType::GrowthOriented => "This pairing teaches more than it soothes; patience turns friction into growth.",
            ConnectionType::Challenging => "Differences dominate; clear agreements and outside support make the difference.",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionType::DeepHarmony => "Deep harmony",
            ConnectionType::Harmonious => "Harmonious",
            ConnectionType::Balanced => "Balanced",
            ConnectionType::GrowthOriented => "Growth-oriented",
            ConnectionType::Challenging => "Challenging",
        };
        f.write_str(name)
    }
}

/// Advice for the aspect type carrying most of the tension
fn challenge_advice(aspect_type: AspectType) -> &'static str {
    match aspect_type {
        AspectType::Square => "Squares bring friction over how things get done; agree on process before tempers rise.",
        AspectType::Opposition => "Oppositions mirror what each partner lacks; meet in the middle instead of pulling apart.",
        AspectType::Quincunx => "Quincunxes need constant small adjustments; be explicit about expectations.",
        AspectType::Semisquare | AspectType::Sesquiquadrate => {
            "Minor irritations accumulate; address small annoyances before they harden."
        }
        AspectType::Conjunction | AspectType::Trine | AspectType::Sextile | AspectType::Semisextile => {
            "Even supportive contacts can be taken for granted; keep showing appreciation."
        }
    }
}

fn aspect_reading(aspect_type: AspectType) -> &'static str {
    match aspect_type {
        AspectType::Conjunction => "merges and intensifies",
        AspectType::Trine => "flows with ease",
        AspectType::Sextile => "offers friendly opportunity",
        AspectType::Semisextile => "adds mild support",
        AspectType::Opposition => "pulls in opposite directions",
        AspectType::Square => "creates friction",
        AspectType::Quincunx => "needs adjustment",
        AspectType::Semisquare | AspectType::Sesquiquadrate => "produces low-grade tension",
    }
}

/// One scored cross-chart aspect. `planet_a` belongs to the first chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynastryFinding {
    pub planet_a: Planet,
    pub planet_b: Planet,
    pub aspect_type: AspectType,
    pub orb: f64,
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityAnalysis {
    pub connection_type: ConnectionType,
    /// 0-100
    pub overall_compatibility: f64,
    pub strengths: Vec<SynastryFinding>,
    pub challenges: Vec<SynastryFinding>,
    pub advice: Vec<String>,
    /// 0-1 share of planets conjunct their counterpart, weighted by exactness
    pub resonance: f64,
}

pub struct CompatibilityEngine {
    settings: AspectSettings,
    calculator: AspectCalculator,
}

impl CompatibilityEngine {
    pub fn new(settings: AspectSettings) -> Self {
        Self {
            settings,
            calculator: AspectCalculator::new(),
        }
    }

    /// Every aspect between a planet of `a` and a planet of `b`
    pub fn synastry_aspects(&self, a: &Chart, b: &Chart) -> Vec<Aspect> {
        self.calculator
            .compute_inter_chart_aspects(&a.planets, &b.planets, &self.settings)
    }

    pub fn analyze_synastry(&self, a: &Chart, b: &Chart) -> CompatibilityAnalysis {
        let findings: Vec<SynastryFinding> = self
            .synastry_aspects(a, b)
            .into_iter()
            .map(|aspect| self.score(&aspect))
            .collect();

        // Summing in sorted order makes the total independent of chart order.
        let mut contributions: Vec<f64> = findings.iter().map(|f| f.score).collect();
        contributions.sort_by(f64::total_cmp);
        let total: f64 = contributions.iter().sum();
        let overall_compatibility = round_tenth(50.0 + 50.0 * (total / SCORE_SCALE).tanh());
        let connection_type = ConnectionType::from_score(overall_compatibility);

        let (mut challenges, mut strengths): (Vec<_>, Vec<_>) = findings
            .into_iter()
            .partition(|f| f.score < 0.0 || f.aspect_type.is_hard());
        strengths.sort_by(|x, y| y.score.total_cmp(&x.score).then_with(|| pair_order(x, y)));
        challenges.sort_by(|x, y| x.score.total_cmp(&y.score).then_with(|| pair_order(x, y)));

        let mut advice = vec![connection_type.advice().to_string()];
        if let Some(aspect_type) = dominant_challenge(&challenges) {
            advice.push(challenge_advice(aspect_type).to_string());
        }

        log::debug!(
            "Synastry: {} strengths, {} challenges, score {:.1}",
            strengths.len(),
            challenges.len(),
            overall_compatibility
        );

        CompatibilityAnalysis {
            connection_type,
            overall_compatibility,
            strengths,
            challenges,
            advice,
            resonance: self.resonance(a, b),
        }
    }

    fn tightness(&self, aspect_type: AspectType, orb: f64) -> f64 {
        let allowed = self.settings.orb_for(aspect_type);
        if allowed <= 0.0 {
            return 1.0;
        }
        1.0 - (1.0 - MIN_TIGHTNESS) * (orb / allowed).clamp(0.0, 1.0)
    }

    fn score(&self, aspect: &Aspect) -> SynastryFinding {
        // The two weights are multiplied first so swapping the planets
        // cannot change the rounding.
        let weights = planet_weight(aspect.planet_a) * planet_weight(aspect.planet_b);
        let score = aspect_base(aspect.aspect_type)
            * weights
            * pair_bonus(aspect.planet_a, aspect.planet_b)
            * self.tightness(aspect.aspect_type, aspect.orb);
        SynastryFinding {
            planet_a: aspect.planet_a,
            planet_b: aspect.planet_b,
            aspect_type: aspect.aspect_type,
            orb: aspect.orb,
            score,
            description: format!(
                "{} {} {}: {}",
                aspect.planet_a,
                aspect.aspect_type,
                aspect.planet_b,
                aspect_reading(aspect.aspect_type)
            ),
        }
    }

    /// How closely each planet sits on its counterpart. A planet without a
    /// counterpart conjunction contributes zero.
    fn resonance(&self, a: &Chart, b: &Chart) -> f64 {
        let shared: Vec<_> = a
            .planets
            .iter()
            .filter_map(|pa| b.planet(pa.planet).map(|pb| (pa, pb)))
            .collect();
        if shared.is_empty() {
            return 0.0;
        }
        let mut closeness: Vec<f64> = shared
            .iter()
            .filter_map(|(pa, pb)| self.calculator.calculate_aspect(pa, pb, &self.settings))
            .filter(|aspect| aspect.aspect_type == AspectType::Conjunction)
            .map(|aspect| 1.0 - aspect.orb / self.settings.orb_for(AspectType::Conjunction).max(f64::EPSILON))
            .collect();
        closeness.sort_by(f64::total_cmp);
        let total: f64 = closeness.iter().sum();
        (total / shared.len() as f64).clamp(0.0, 1.0)
    }
}

impl Default for CompatibilityEngine {
    fn default() -> Self {
        Self::new(AspectSettings::default())
    }
}

fn pair_order(x: &SynastryFinding, y: &SynastryFinding) -> Ordering {
    (x.planet_a, x.planet_b, x.aspect_type).cmp(&(y.planet_a, y.planet_b, y.aspect_type))
}

/// Aspect type with the largest accumulated tension; earlier types win ties.
fn dominant_challenge(challenges: &[SynastryFinding]) -> Option<AspectType> {
    let mut best: Option<(AspectType, f64)> = None;
    for aspect_type in AspectType::ALL {
        let mut scores: Vec<f64> = challenges
            .iter()
            .filter(|f| f.aspect_type == aspect_type)
            .map(|f| f.score.abs())
            .collect();
        scores.sort_by(f64::total_cmp);
        let weight: f64 = scores.iter().sum();
        if weight > 0.0 && best.map_or(true, |(_, w)| weight > w) {
            best = Some((aspect_type, weight));
        }
    }
    best.map(|(aspect_type, _)| aspect_type)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
