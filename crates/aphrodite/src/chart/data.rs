use crate::aspects::Aspect;
use crate::chart::birth::BirthData;
use crate::ephemeris::{ChartAngles, HouseCusp, HouseSystem, Planet, PlanetPosition};
use crate::western::ZodiacSign;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A computed natal chart. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub birth_data: BirthData,
    pub house_system: HouseSystem,
    /// One entry per planet, in `Planet::ALL` order
    pub planets: Vec<PlanetPosition>,
    /// Houses 1-12 in order
    pub houses: Vec<HouseCusp>,
    pub angles: ChartAngles,
    pub aspects: Vec<Aspect>,
    pub computed_at: DateTime<Utc>,
}

impl Chart {
    pub fn planet(&self, planet: Planet) -> Option<&PlanetPosition> {
        self.planets.iter().find(|p| p.planet == planet)
    }

    pub fn sign_of(&self, planet: Planet) -> Option<ZodiacSign> {
        self.planet(planet).map(|p| p.sign)
    }

    pub fn rising_sign(&self) -> ZodiacSign {
        ZodiacSign::from_longitude(self.angles.ascendant)
    }

    /// Cusp longitudes indexed by house - 1, if all twelve are present.
    pub fn cusp_longitudes(&self) -> Option<[f64; 12]> {
        cusp_array(&self.houses)
    }
}

pub(crate) fn cusp_array(houses: &[HouseCusp]) -> Option<[f64; 12]> {
    if houses.len() != 12 {
        return None;
    }
    let mut cusps = [0.0; 12];
    for cusp in houses {
        let index = cusp.house.checked_sub(1)? as usize;
        *cusps.get_mut(index)? = cusp.longitude;
    }
    Some(cusps)
}

/// Planet positions for one day laid over a natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitChart {
    pub birth_data: BirthData,
    pub house_system: HouseSystem,
    /// Day the transits cover (positions are cast for 12:00 UTC)
    pub date: NaiveDate,
    /// Transiting planets, placed in the natal houses
    pub planets: Vec<PlanetPosition>,
    /// Transit (`planet_a`) to natal (`planet_b`) aspects
    pub aspects: Vec<Aspect>,
    pub computed_at: DateTime<Utc>,
}

impl TransitChart {
    pub fn planet(&self, planet: Planet) -> Option<&PlanetPosition> {
        self.planets.iter().find(|p| p.planet == planet)
    }
}
