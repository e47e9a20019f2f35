use crate::ephemeris::Planet;
use crate::interpretation::tables;
use crate::interpretation::{ChartView, ConfidencePolicy, Finding, RuleCoverage};
use crate::western::{
    get_decan_info_from_longitude, get_sign_ruler, DecanInfo, DignitiesService, DignityType, Element, Modality,
    ZodiacSign,
};
use serde::{Deserialize, Serialize};

/// Planets counted towards the element and modality balance, with weights
const BALANCE_WEIGHTS: [(Planet, u32); 7] = [
    (Planet::Sun, 3),
    (Planet::Moon, 2),
    (Planet::Mercury, 1),
    (Planet::Venus, 1),
    (Planet::Mars, 1),
    (Planet::Jupiter, 1),
    (Planet::Saturn, 1),
];
const RISING_WEIGHT: u32 = 2;

const TRAIT_PLANETS: [Planet; 5] = [Planet::Mercury, Planet::Venus, Planet::Mars, Planet::Jupiter, Planet::Saturn];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetDignity {
    pub planet: Planet,
    pub dignity: DignityType,
    pub sign: ZodiacSign,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub core_identity: Option<Finding>,
    pub emotional_nature: Option<Finding>,
    /// Rising sign reading; absent when the birth time is unknown
    pub outward_persona: Option<Finding>,
    /// Modern ruler of the rising sign
    pub chart_ruler: Option<Planet>,
    pub sun_decan: Option<DecanInfo>,
    pub dominant_element: Option<Element>,
    pub dominant_modality: Option<Modality>,
    pub dignities: Vec<PlanetDignity>,
    pub traits: Vec<String>,
    pub confidence: f64,
}

pub(crate) fn analyze(view: &ChartView<'_>, policy: &ConfidencePolicy) -> PersonalityProfile {
    let mut coverage = RuleCoverage::default();

    let core_identity = coverage
        .track(view.planet(Planet::Sun).map(|sun| (sun.sign, tables::sign_identity(sun.sign))))
        .map(|(sign, text)| Finding::new(format!("Sun in {}", sign), text, vec![Planet::Sun]));

    let emotional_nature = coverage
        .track(view.planet(Planet::Moon).map(|moon| (moon.sign, tables::emotional_need(moon.sign.element()))))
        .map(|(sign, text)| {
            Finding::new(
                format!("Moon in {}", sign),
                format!("{} {}", text, tables::modality_approach(sign.modality())),
                vec![Planet::Moon],
            )
        });

    let rising = view.cusp_sign(1);
    let outward_persona = if view.houses_known() {
        coverage
            .track(rising.map(|sign| (sign, tables::persona(sign.element()))))
            .map(|(sign, text)| Finding::new(format!("{} rising", sign), text, Vec::new()))
    } else {
        None
    };

    let chart_ruler = rising.map(|sign| get_sign_ruler(sign, true));
    let sun_decan = view
        .planet(Planet::Sun)
        .map(|sun| get_decan_info_from_longitude(sun.longitude));

    let placed: Vec<(ZodiacSign, u32)> = BALANCE_WEIGHTS
        .iter()
        .filter_map(|(planet, weight)| view.planet(*planet).map(|p| (p.sign, *weight)))
        .chain(rising.map(|sign| (sign, RISING_WEIGHT)))
        .collect();
    let dominant_element = dominant(&Element::ALL, &placed, |sign| sign.element());
    let dominant_modality = dominant(&Modality::ALL, &placed, |sign| sign.modality());

    let exact = DignitiesService::get_default_exact_exaltations();
    let dignities = Planet::ALL
        .iter()
        .filter_map(|planet| view.planet(*planet))
        .flat_map(|position| {
            DignitiesService
                .get_dignities(position.planet, position.longitude, Some(exact.as_slice()))
                .into_iter()
                .map(move |d| PlanetDignity {
                    planet: position.planet,
                    dignity: d.dignity_type,
                    sign: d.sign,
                    note: format!("{} is {}", position.planet, tables::dignity_note(d.dignity_type)),
                })
        })
        .collect();

    let traits = TRAIT_PLANETS
        .iter()
        .filter_map(|planet| {
            let position = view.planet(*planet)?;
            coverage.track(tables::planet_element_trait(*planet, position.sign.element()))
        })
        .map(str::to_string)
        .collect();

    PersonalityProfile {
        core_identity,
        emotional_nature,
        outward_persona,
        chart_ruler,
        sun_decan,
        dominant_element,
        dominant_modality,
        dignities,
        traits,
        confidence: policy.resolve(&coverage),
    }
}

/// Heaviest category among the placements; ties keep the earlier category.
fn dominant<T: Copy + PartialEq>(
    categories: &[T],
    placed: &[(ZodiacSign, u32)],
    classify: impl Fn(ZodiacSign) -> T,
) -> Option<T> {
    let mut best: Option<(T, u32)> = None;
    for category in categories {
        let total: u32 = placed
            .iter()
            .filter(|(sign, _)| classify(*sign) == *category)
            .map(|(_, weight)| weight)
            .sum();
        if total > 0 && best.map_or(true, |(_, w)| total > w) {
            best = Some((*category, total));
        }
    }
    best.map(|(category, _)| category)
}
