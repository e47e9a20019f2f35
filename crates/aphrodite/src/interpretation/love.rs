use crate::aspects::AspectType;
use crate::ephemeris::Planet;
use crate::interpretation::tables;
use crate::interpretation::{ChartView, ConfidencePolicy, Finding, RuleCoverage};
use crate::western::{DignitiesService, DignityType, Element, ZodiacSign};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoveLanguage {
    WordsOfAffirmation,
    QualityTime,
    ActsOfService,
    PhysicalTouch,
    ReceivingGifts,
}

impl LoveLanguage {
    /// Language suggested by the element Venus occupies
    pub fn from_element(element: Element) -> Self {
        match element {
            Element::Fire => LoveLanguage::QualityTime,
            Element::Earth => LoveLanguage::PhysicalTouch,
            Element::Air => LoveLanguage::WordsOfAffirmation,
            Element::Water => LoveLanguage::ActsOfService,
        }
    }
}

impl fmt::Display for LoveLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoveLanguage::WordsOfAffirmation => "Words of affirmation",
            LoveLanguage::QualityTime => "Quality time",
            LoveLanguage::ActsOfService => "Acts of service",
            LoveLanguage::PhysicalTouch => "Physical touch",
            LoveLanguage::ReceivingGifts => "Receiving gifts",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityHints {
    /// Signs sharing or complementing the element of Venus
    pub harmonious_signs: Vec<ZodiacSign>,
    /// Signs square to Venus
    pub challenging_signs: Vec<ZodiacSign>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoveProfile {
    pub relationship_style: Option<Finding>,
    pub love_language: Option<LoveLanguage>,
    pub emotional_needs: Vec<Finding>,
    pub shadow_work: Vec<Finding>,
    pub compatibility: Option<CompatibilityHints>,
    pub confidence: f64,
}

pub(crate) fn analyze(view: &ChartView<'_>, policy: &ConfidencePolicy) -> LoveProfile {
    let mut coverage = RuleCoverage::default();
    let venus = view.planet(Planet::Venus);
    let moon = view.planet(Planet::Moon);

    let mut relationship_style = coverage
        .track(venus.map(|v| tables::venus_style(v.sign)))
        .map(|text| Finding::new("Venus style", text, vec![Planet::Venus]));
    if let Some(style) = relationship_style.as_mut() {
        if let Some(partner) = coverage.track(view.cusp_sign(7).map(|s| tables::partner_archetype(s.element()))) {
            style.description = format!("{} {}", style.description, partner);
        }
    }

    let love_language = coverage.track(venus.map(|v| {
        if view.houses_known() && v.house == 2 {
            LoveLanguage::ReceivingGifts
        } else {
            LoveLanguage::from_element(v.sign.element())
        }
    }));

    let mut emotional_needs = Vec::new();
    if let Some(text) = coverage.track(moon.map(|m| tables::emotional_need(m.sign.element()))) {
        emotional_needs.push(Finding::new("Moon element", text, vec![Planet::Moon]));
    }
    if let Some(m) = moon.filter(|_| view.houses_known()) {
        if let Some(text) = coverage.track(tables::moon_house_need(m.house)) {
            emotional_needs.push(Finding::new(format!("Moon in house {}", m.house), text, vec![Planet::Moon]));
        }
    }

    let shadow_work = shadow_findings(view, &mut coverage);
    let compatibility = venus.map(|v| compatibility_hints(v.sign));

    log::debug!(
        "Love profile: {}/{} rule lookups matched",
        coverage.matched,
        coverage.consulted
    );

    LoveProfile {
        relationship_style,
        love_language,
        emotional_needs,
        shadow_work,
        compatibility,
        confidence: policy.resolve(&coverage),
    }
}

fn shadow_findings(view: &ChartView<'_>, coverage: &mut RuleCoverage) -> Vec<Finding> {
    let mut findings = Vec::new();

    for aspect in view.aspects() {
        let difficult = aspect.aspect_type.is_hard() || aspect.aspect_type == AspectType::Conjunction;
        // Every shadow contact involves Venus or the Moon.
        if !difficult || !(aspect.involves(Planet::Venus) || aspect.involves(Planet::Moon)) {
            continue;
        }
        if let Some((title, text)) = coverage.track(tables::shadow_contact(aspect.planet_a, aspect.planet_b)) {
            findings.push(Finding::new(
                format!("{}: {} {} {}", title, aspect.planet_a, aspect.aspect_type, aspect.planet_b),
                text,
                vec![aspect.planet_a, aspect.planet_b],
            ));
        }
    }

    if let Some(venus) = view.planet(Planet::Venus) {
        if venus.retrograde {
            findings.push(Finding::new(
                "Venus retrograde",
                "Revisits past loves and old values; self-worth is built from the inside first.",
                vec![Planet::Venus],
            ));
        }
        let debility = DignitiesService
            .get_dignities(Planet::Venus, venus.longitude, None)
            .into_iter()
            .find(|d| matches!(d.dignity_type, DignityType::Detriment | DignityType::Fall));
        if let Some(dignity) = coverage.track(debility) {
            findings.push(Finding::new(
                format!("Venus in {}", dignity.sign),
                format!(
                    "Venus is {}; what feels loving may not be received that way.",
                    tables::dignity_note(dignity.dignity_type)
                ),
                vec![Planet::Venus],
            ));
        }
    }

    findings
}

fn compatibility_hints(venus_sign: ZodiacSign) -> CompatibilityHints {
    let element = venus_sign.element();
    let harmonious_signs: Vec<ZodiacSign> = ZodiacSign::ALL
        .into_iter()
        .filter(|s| s.element() == element || s.element() == element.complement())
        .collect();
    let challenging_signs = vec![
        ZodiacSign::from_index(venus_sign.index() + 3),
        ZodiacSign::from_index(venus_sign.index() + 9),
    ];
    let summary = format!(
        "Venus in {} harmonizes with {} and {} signs; {} and {} ask for more compromise.",
        venus_sign,
        element,
        element.complement(),
        challenging_signs[0],
        challenging_signs[1]
    );
    CompatibilityHints {
        harmonious_signs,
        challenging_signs,
        summary,
    }
}
