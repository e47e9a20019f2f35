use crate::ephemeris::Planet;
use crate::interpretation::tables;
use crate::interpretation::{ChartView, ConfidencePolicy, Finding, RuleCoverage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerProfile {
    pub vocation: Option<Finding>,
    pub work_style: Option<Finding>,
    pub ambitions: Vec<Finding>,
    pub confidence: f64,
}

pub(crate) fn analyze(view: &ChartView<'_>, policy: &ConfidencePolicy) -> CareerProfile {
    let mut coverage = RuleCoverage::default();

    // Without a birth time the tenth house is unknown; fall back to the Sun.
    let vocation = match view.cusp_sign(10) {
        Some(sign) => coverage
            .track(Some(tables::vocation(sign)))
            .map(|text| Finding::new(format!("{} on the tenth house", sign), text, Vec::new())),
        None => coverage
            .track(view.planet(Planet::Sun).map(|sun| (sun.sign, tables::vocation(sun.sign))))
            .map(|(sign, text)| Finding::new(format!("Sun in {}", sign), text, vec![Planet::Sun])),
    };

    let work_style = coverage
        .track(view.planet(Planet::Mars).map(|mars| (mars.sign, tables::work_style(mars.sign.element()))))
        .map(|(sign, text)| Finding::new(format!("Mars in {}", sign), text, vec![Planet::Mars]));

    let mut ambitions = Vec::new();
    if let Some(text) = coverage.track(view.planet(Planet::Saturn).map(|s| tables::ambition(s.sign.modality()))) {
        ambitions.push(Finding::new("Saturn", text, vec![Planet::Saturn]));
    }
    for position in view.planets_in_house(10) {
        if let Some(text) = coverage.track(tables::tenth_house_planet(position.planet)) {
            ambitions.push(Finding::new(
                format!("{} in the tenth house", position.planet),
                text,
                vec![position.planet],
            ));
        }
    }

    CareerProfile {
        vocation,
        work_style,
        ambitions,
        confidence: policy.resolve(&coverage),
    }
}
