//! Dignities calculation for Western astrology.
//!
//! Calculates rulership, detriment, exaltation, fall, and exact exaltation for planets.

use crate::ephemeris::Planet;
use crate::western::types::ZodiacSign;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DignityType {
    Rulership,
    Detriment,
    Exaltation,
    Fall,
    ExactExaltation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DignityResult {
    #[serde(rename = "type")]
    pub dignity_type: DignityType,
    pub sign: ZodiacSign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExactExaltation {
    pub planet: Planet,
    pub position: f64, // Longitude in degrees
    pub orbit: f64,    // Orb in degrees (default 2)
}

use ZodiacSign::*;

/// Domicile signs per planet
fn rulership_signs(planet: Planet) -> &'static [ZodiacSign] {
    match planet {
        Planet::Sun => &[Leo],
        Planet::Moon => &[Cancer],
        Planet::Mercury => &[Gemini, Virgo],
        Planet::Venus => &[Taurus, Libra],
        Planet::Mars => &[Aries, Scorpio],
        Planet::Jupiter => &[Sagittarius, Pisces],
        Planet::Saturn => &[Capricorn, Aquarius],
        Planet::Uranus => &[Aquarius],
        Planet::Neptune => &[Pisces],
        Planet::Pluto => &[Scorpio],
        Planet::Chiron | Planet::NorthNode | Planet::SouthNode => &[],
    }
}

fn exaltation_sign(planet: Planet) -> Option<ZodiacSign> {
    match planet {
        Planet::Sun => Some(Aries),
        Planet::Moon => Some(Taurus),
        Planet::Mercury => Some(Virgo),
        Planet::Venus => Some(Pisces),
        Planet::Mars => Some(Capricorn),
        Planet::Jupiter => Some(Cancer),
        Planet::Saturn => Some(Libra),
        Planet::Pluto => Some(Aries),
        _ => None,
    }
}

/// Check if planet has exact exaltation
fn has_exact_exaltation(planet_position: f64, exact_position: f64, orbit: f64) -> bool {
    let diff = (planet_position - exact_position).rem_euclid(360.0);
    diff.min(360.0 - diff) <= orbit
}

pub struct DignitiesService;

impl DignitiesService {
    /// Get dignities for a planet based on its longitude
    pub fn get_dignities(
        &self,
        planet: Planet,
        longitude: f64,
        exact_exaltations: Option<&[ExactExaltation]>,
    ) -> Vec<DignityResult> {
        let sign = ZodiacSign::from_longitude(longitude);
        let normalized_position = longitude.rem_euclid(360.0);
        let mut result = Vec::new();

        let ruled = rulership_signs(planet);
        if ruled.contains(&sign) {
            result.push(DignityResult { dignity_type: DignityType::Rulership, sign, degree: None });
        } else if ruled.iter().any(|s| s.opposite() == sign) {
            result.push(DignityResult { dignity_type: DignityType::Detriment, sign, degree: None });
        }

        if let Some(exalted) = exaltation_sign(planet) {
            if exalted == sign {
                result.push(DignityResult { dignity_type: DignityType::Exaltation, sign, degree: None });
            } else if exalted.opposite() == sign {
                result.push(DignityResult { dignity_type: DignityType::Fall, sign, degree: None });
            }
        }

        if let Some(exact_list) = exact_exaltations {
            for exact in exact_list.iter().filter(|e| e.planet == planet) {
                if has_exact_exaltation(normalized_position, exact.position, exact.orbit) {
                    result.push(DignityResult {
                        dignity_type: DignityType::ExactExaltation,
                        sign,
                        degree: Some(exact.position),
                    });
                }
            }
        }

        result
    }

    pub fn get_default_exact_exaltations() -> Vec<ExactExaltation> {
        vec![
            ExactExaltation { planet: Planet::Sun, position: 19.0, orbit: 2.0 },
            ExactExaltation { planet: Planet::Moon, position: 33.0, orbit: 2.0 },
            ExactExaltation { planet: Planet::Mercury, position: 165.0, orbit: 2.0 },
            ExactExaltation { planet: Planet::Venus, position: 357.0, orbit: 2.0 },
            ExactExaltation { planet: Planet::Mars, position: 298.0, orbit: 2.0 },
            ExactExaltation { planet: Planet::Jupiter, position: 95.0, orbit: 2.0 },
            ExactExaltation { planet: Planet::Saturn, position: 201.0, orbit: 2.0 },
        ]
    }
}
