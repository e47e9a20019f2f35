use crate::aspects::{AspectCalculator, AspectSettings};
use crate::chart::birth::check_supported_date;
use crate::chart::data::cusp_array;
use crate::chart::{BirthData, Chart, ChartSettings, TransitChart};
use crate::clock::{Clock, SystemClock};
use crate::ephemeris::houses::{ascendant, calc_house_cusps, house_of, midheaven, signed_separation};
use crate::ephemeris::julian::{datetime_to_julian_day, local_sidereal_degrees, mean_obliquity};
use crate::ephemeris::orbits::geocentric_longitude;
use crate::ephemeris::types::{ChartAngles, HouseCusp, HouseSystem, Planet, PlanetPosition};
use crate::western::ZodiacSign;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Half-width of the window used for the numeric speed (days)
const SPEED_HALF_WINDOW: f64 = 0.5;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: &'static str, message: String },
    #[error("Failed to calculate position for {planet} at {datetime}: {message}")]
    CalculationFailed {
        planet: Planet,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

impl EphemerisError {
    /// Caller-side problem (as opposed to a model failure)
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EphemerisError::InvalidInput { .. })
    }
}

/// The computation seam the chart service depends on.
pub trait ChartCalculator: Send + Sync {
    fn compute_chart(&self, birth: &BirthData, house_system: HouseSystem) -> Result<Chart, EphemerisError>;

    fn compute_transits(&self, natal: &Chart, date: NaiveDate) -> Result<TransitChart, EphemerisError>;

    /// Settings the aspect lists of computed charts are classified with
    fn aspect_settings(&self) -> &AspectSettings;
}

/// Pure-Rust ephemeris engine
pub struct EphemerisEngine {
    settings: ChartSettings,
    calculator: AspectCalculator,
    clock: Arc<dyn Clock>,
}

impl EphemerisEngine {
    pub fn new(settings: ChartSettings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: ChartSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings,
            calculator: AspectCalculator::new(),
            clock,
        }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Calculate position for a single planet. With `cusps` the planet is
    /// placed in a house; without, house 1 is reported.
    pub fn calc_planet_position(
        &self,
        planet: Planet,
        jd: f64,
        cusps: Option<&[f64; 12]>,
    ) -> Result<PlanetPosition, EphemerisError> {
        let at = |jd: f64| {
            geocentric_longitude(planet, jd).ok_or_else(|| EphemerisError::CalculationFailed {
                planet,
                datetime: julian_day_to_datetime(jd),
                message: "orbit solution did not converge".to_string(),
            })
        };

        let longitude = at(jd)?;
        let before = at(jd - SPEED_HALF_WINDOW)?;
        let after = at(jd + SPEED_HALF_WINDOW)?;
        let speed = signed_separation(before, after) / (2.0 * SPEED_HALF_WINDOW);

        if !longitude.is_finite() || !speed.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                planet,
                datetime: julian_day_to_datetime(jd),
                message: "non-finite longitude".to_string(),
            });
        }

        Ok(PlanetPosition {
            planet,
            longitude,
            sign: ZodiacSign::from_longitude(longitude),
            house: cusps.map(|c| house_of(longitude, c)).unwrap_or(1),
            retrograde: speed < 0.0,
            speed,
        })
    }

    fn calc_all_planets(&self, jd: f64, cusps: &[f64; 12]) -> Result<Vec<PlanetPosition>, EphemerisError> {
        Planet::ALL
            .iter()
            .map(|planet| self.calc_planet_position(*planet, jd, Some(cusps)))
            .collect()
    }
}

impl ChartCalculator for EphemerisEngine {
    fn compute_chart(&self, birth: &BirthData, house_system: HouseSystem) -> Result<Chart, EphemerisError> {
        birth.validate()?;
        let instant = birth.utc_datetime()?;
        let jd = datetime_to_julian_day(instant);

        let obliquity = mean_obliquity(jd);
        let ramc = local_sidereal_degrees(jd, birth.longitude());
        let cusps = calc_house_cusps(house_system, ramc, obliquity, birth.latitude())?;
        let angles = ChartAngles::new(
            ascendant(ramc, obliquity, birth.latitude()),
            midheaven(ramc, obliquity),
        );

        let planets = self.calc_all_planets(jd, &cusps)?;
        let houses = cusps
            .iter()
            .enumerate()
            .map(|(i, lon)| HouseCusp {
                house: (i + 1) as u8,
                longitude: *lon,
                system: house_system,
            })
            .collect();
        let aspects = self.calculator.compute_chart_aspects(&planets, &self.settings.aspects);

        log::debug!(
            "Computed {} chart for {} ({} aspects)",
            house_system,
            instant,
            aspects.len()
        );

        Ok(Chart {
            birth_data: birth.clone(),
            house_system,
            planets,
            houses,
            angles,
            aspects,
            computed_at: self.clock.now(),
        })
    }

    fn compute_transits(&self, natal: &Chart, date: NaiveDate) -> Result<TransitChart, EphemerisError> {
        check_supported_date(date)?;
        let cusps = cusp_array(&natal.houses).ok_or_else(|| EphemerisError::InvalidInput {
            field: "houses",
            message: format!("natal chart has {} house cusps, expected 12", natal.houses.len()),
        })?;

        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        let instant = Utc.from_utc_datetime(&date.and_time(noon));
        let jd = datetime_to_julian_day(instant);

        let planets = self.calc_all_planets(jd, &cusps)?;
        let aspects =
            self.calculator
                .compute_inter_chart_aspects(&planets, &natal.planets, &self.settings.aspects);

        Ok(TransitChart {
            birth_data: natal.birth_data.clone(),
            house_system: natal.house_system,
            date,
            planets,
            aspects,
            computed_at: self.clock.now(),
        })
    }

    fn aspect_settings(&self) -> &AspectSettings {
        &self.settings.aspects
    }
}

/// Convert Julian Day to UTC datetime (for error reporting)
fn julian_day_to_datetime(jd: f64) -> DateTime<Utc> {
    let millis = ((jd - 2_440_587.5) * 86_400_000.0).round() as i64;
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}
