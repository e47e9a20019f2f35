//! House cusps and chart angles.

use crate::ephemeris::engine::EphemerisError;
use crate::ephemeris::types::HouseSystem;

const PLACIDUS_MAX_ITERATIONS: usize = 50;
const PLACIDUS_TOLERANCE: f64 = 1e-9;

fn sin_d(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cos_d(x: f64) -> f64 {
    x.to_radians().cos()
}

fn tan_d(x: f64) -> f64 {
    x.to_radians().tan()
}

/// Shortest signed distance from `a` to `b` in degrees (-180, 180]
pub fn signed_separation(a: f64, b: f64) -> f64 {
    let diff = (b - a).rem_euclid(360.0);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Ecliptic degree rising on the eastern horizon for a given RAMC.
pub fn ascendant(ramc: f64, obliquity: f64, latitude: f64) -> f64 {
    let y = cos_d(ramc);
    let x = -(sin_d(ramc) * cos_d(obliquity) + tan_d(latitude) * sin_d(obliquity));
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Ecliptic degree culminating on the meridian.
pub fn midheaven(ramc: f64, obliquity: f64) -> f64 {
    sin_d(ramc)
        .atan2(cos_d(ramc) * cos_d(obliquity))
        .to_degrees()
        .rem_euclid(360.0)
}

/// Ecliptic longitude of the point with the given right ascension.
fn ecliptic_from_right_ascension(ra: f64, obliquity: f64) -> f64 {
    sin_d(ra).atan2(cos_d(ra) * cos_d(obliquity)).to_degrees().rem_euclid(360.0)
}

/// Ascensional difference of an ecliptic point, failing where the point
/// never rises or never sets.
fn ascensional_difference(longitude: f64, obliquity: f64, latitude: f64) -> Result<f64, EphemerisError> {
    let declination = (sin_d(obliquity) * sin_d(longitude)).asin().to_degrees();
    let x = tan_d(latitude) * tan_d(declination);
    if !x.is_finite() || x.abs() >= 1.0 {
        return Err(EphemerisError::HouseCalculationFailed {
            message: format!(
                "semi-arc undefined at latitude {:.4} (circumpolar ecliptic degree {:.2})",
                latitude, longitude
            ),
        });
    }
    Ok(x.asin().to_degrees())
}

/// Placidus intermediate cusp: trisection of the diurnal (`above`) or
/// nocturnal semi-arc of the cusp degree itself.
fn placidus_cusp(
    ramc: f64,
    obliquity: f64,
    latitude: f64,
    fraction: f64,
    above: bool,
) -> Result<f64, EphemerisError> {
    let mut ra = if above {
        ramc + 90.0 * fraction
    } else {
        ramc + 180.0 - 90.0 * fraction
    };

    for _ in 0..PLACIDUS_MAX_ITERATIONS {
        let lon = ecliptic_from_right_ascension(ra, obliquity);
        let ad = ascensional_difference(lon, obliquity, latitude)?;
        let next = if above {
            ramc + fraction * (90.0 + ad)
        } else {
            ramc + 180.0 - fraction * (90.0 - ad)
        };
        let converged = signed_separation(ra, next).abs() < PLACIDUS_TOLERANCE;
        ra = next;
        if converged {
            return Ok(ecliptic_from_right_ascension(ra, obliquity));
        }
    }

    Err(EphemerisError::HouseCalculationFailed {
        message: format!("Placidus cusp did not converge at latitude {:.4}", latitude),
    })
}

fn opposite(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0)
}

/// Fill in the six cusps below/above the given eastern half.
fn mirror(c1: f64, c2: f64, c3: f64, c10: f64, c11: f64, c12: f64) -> [f64; 12] {
    [
        c1,
        c2,
        c3,
        opposite(c10),
        opposite(c11),
        opposite(c12),
        opposite(c1),
        opposite(c2),
        opposite(c3),
        c10,
        c11,
        c12,
    ]
}

/// Compute the twelve house cusps (index 0 = house 1).
pub fn calc_house_cusps(
    system: HouseSystem,
    ramc: f64,
    obliquity: f64,
    latitude: f64,
) -> Result<[f64; 12], EphemerisError> {
    let asc = ascendant(ramc, obliquity, latitude);
    let mc = midheaven(ramc, obliquity);

    let cusps = match system {
        HouseSystem::Equal => std::array::from_fn(|i| (asc + 30.0 * i as f64).rem_euclid(360.0)),
        HouseSystem::WholeSign => {
            let start = (asc / 30.0).floor() * 30.0;
            std::array::from_fn(|i| (start + 30.0 * i as f64).rem_euclid(360.0))
        }
        HouseSystem::Placidus => {
            let c11 = placidus_cusp(ramc, obliquity, latitude, 1.0 / 3.0, true)?;
            let c12 = placidus_cusp(ramc, obliquity, latitude, 2.0 / 3.0, true)?;
            let c2 = placidus_cusp(ramc, obliquity, latitude, 2.0 / 3.0, false)?;
            let c3 = placidus_cusp(ramc, obliquity, latitude, 1.0 / 3.0, false)?;
            mirror(asc, c2, c3, mc, c11, c12)
        }
        HouseSystem::Koch => {
            // Trisect the time the MC degree takes to rise to the meridian.
            let dsa = 90.0 + ascensional_difference(mc, obliquity, latitude)?;
            let asc_at = |offset: f64| ascendant(ramc + offset, obliquity, latitude);
            let c11 = asc_at(-2.0 * dsa / 3.0);
            let c12 = asc_at(-dsa / 3.0);
            let c2 = asc_at(dsa / 3.0);
            let c3 = asc_at(2.0 * dsa / 3.0);
            mirror(asc, c2, c3, mc, c11, c12)
        }
    };

    if cusps.iter().any(|c| !c.is_finite()) {
        return Err(EphemerisError::HouseCalculationFailed {
            message: format!("non-finite cusp for {} at latitude {:.4}", system, latitude),
        });
    }
    Ok(cusps)
}

/// House number (1-12) whose cusp interval contains `longitude`.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> u8 {
    let lon = longitude.rem_euclid(360.0);
    for i in 0..12 {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];
        let span = (end - start).rem_euclid(360.0);
        let offset = (lon - start).rem_euclid(360.0);
        if offset < span {
            return (i + 1) as u8;
        }
    }
    // Degenerate cusps (all equal): fall back to the first house.
    1
}
