use crate::aspects::types::{Aspect, AspectSettings, AspectType};
use crate::ephemeris::{Planet, PlanetPosition};

/// Projection step used to decide applying/separating (days)
const APPLYING_TIME_STEP: f64 = 0.1;

/// Angular separation between two longitudes, normalized to 0-180
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    // abs() first so swapping the arguments gives bit-identical results
    let diff = (lon1 - lon2).abs().rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Aspect calculator
pub struct AspectCalculator;

impl AspectCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Classify a separation against the aspect table. When two types
    /// qualify, the one with the tighter allowed orb wins, then the one
    /// closer to exact.
    pub fn classify(&self, separation: f64, settings: &AspectSettings) -> Option<(AspectType, f64)> {
        settings
            .active_types()
            .filter_map(|aspect_type| {
                let allowed = settings.orb_for(aspect_type);
                let deviation = (separation - aspect_type.angle()).abs();
                (deviation <= allowed).then_some((aspect_type, allowed, deviation))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.2.total_cmp(&b.2)))
            .map(|(aspect_type, _, deviation)| (aspect_type, deviation))
    }

    /// Calculate the aspect between two positions, if any
    pub fn calculate_aspect(
        &self,
        a: &PlanetPosition,
        b: &PlanetPosition,
        settings: &AspectSettings,
    ) -> Option<Aspect> {
        let separation = angular_separation(a.longitude, b.longitude);
        let (aspect_type, orb) = self.classify(separation, settings)?;
        Some(Aspect {
            planet_a: a.planet,
            planet_b: b.planet,
            aspect_type,
            angle: separation,
            orb,
            applying: self.is_aspect_applying(a.longitude, b.longitude, a.speed, b.speed, aspect_type.angle()),
        })
    }

    /// Aspects among the planets of one chart. The node axis is skipped:
    /// the nodes are always exactly opposite each other.
    pub fn compute_chart_aspects(&self, planets: &[PlanetPosition], settings: &AspectSettings) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..planets.len() {
            for j in (i + 1)..planets.len() {
                if is_node_axis(planets[i].planet, planets[j].planet) {
                    continue;
                }
                if let Some(aspect) = self.calculate_aspect(&planets[i], &planets[j], settings) {
                    aspects.push(aspect);
                }
            }
        }
        aspects
    }

    /// Aspects between every planet of `from` and every planet of `to`,
    /// same planets included. `planet_a` always belongs to `from`.
    pub fn compute_inter_chart_aspects(
        &self,
        from: &[PlanetPosition],
        to: &[PlanetPosition],
        settings: &AspectSettings,
    ) -> Vec<Aspect> {
        from.iter()
            .flat_map(|a| to.iter().filter_map(move |b| self.calculate_aspect(a, b, settings)))
            .collect()
    }

    /// Determine if an aspect is applying (approaching exact) or separating
    fn is_aspect_applying(&self, lon1: f64, lon2: f64, speed1: f64, speed2: f64, aspect_angle: f64) -> bool {
        if (speed1 - speed2).abs() < 1e-9 {
            return false;
        }
        let current = (angular_separation(lon1, lon2) - aspect_angle).abs();
        let future = (angular_separation(
            lon1 + speed1 * APPLYING_TIME_STEP,
            lon2 + speed2 * APPLYING_TIME_STEP,
        ) - aspect_angle)
            .abs();
        future < current
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn is_node_axis(a: Planet, b: Planet) -> bool {
    a.is_node() && b.is_node() && a != b
}
