//! Geocentric ecliptic longitudes from mean orbital elements.
//!
//! Planets use the J2000 Keplerian elements and centennial rates published
//! for the 1800-2050 span, which stay stable (if slowly less accurate) across
//! the supported range. The Moon uses the largest terms of the ELP-derived
//! lunar series, the nodes the mean lunar node.

use crate::ephemeris::julian::{centuries_since_j2000, precession_since_j2000};
use crate::ephemeris::types::Planet;

const KEPLER_TOLERANCE: f64 = 1e-10;
const KEPLER_MAX_ITERATIONS: usize = 30;

/// Mean elements at J2000 with per-century rates.
/// (a AU, e, I deg, L deg, long. perihelion deg, long. node deg)
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    base: [f64; 6],
    rate: [f64; 6],
}

const MERCURY: OrbitalElements = OrbitalElements {
    base: [0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93],
    rate: [0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81],
};

const VENUS: OrbitalElements = OrbitalElements {
    base: [0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55],
    rate: [0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18],
};

const EARTH_MOON_BARYCENTER: OrbitalElements = OrbitalElements {
    base: [1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0],
    rate: [0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0],
};

const MARS: OrbitalElements = OrbitalElements {
    base: [1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91],
    rate: [0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43],
};

const JUPITER: OrbitalElements = OrbitalElements {
    base: [5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09],
    rate: [-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06],
};

const SATURN: OrbitalElements = OrbitalElements {
    base: [9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48],
    rate: [-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94],
};

const URANUS: OrbitalElements = OrbitalElements {
    base: [19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03],
    rate: [-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89],
};

const NEPTUNE: OrbitalElements = OrbitalElements {
    base: [30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74],
    rate: [0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64],
};

const PLUTO: OrbitalElements = OrbitalElements {
    base: [39.482_116_75, 0.248_827_30, 17.140_012_06, 238.929_038_33, 224.068_916_29, 110.303_936_84],
    rate: [-0.000_315_96, 0.000_051_70, 0.000_048_18, 145.207_805_15, -0.040_629_42, -0.011_834_82],
};

// Osculating elements near J2000; the mean motion follows from a.
const CHIRON: OrbitalElements = OrbitalElements {
    base: [13.648_1, 0.379_11, 6.931_1, 216.327_3, 188.627_3, 209.379_7],
    rate: [0.0, 0.0, 0.0, 714.0, 0.0, 0.0],
};

/// Heliocentric ecliptic rectangular coordinates (AU, J2000 ecliptic)
#[derive(Debug, Clone, Copy)]
struct Vector3 {
    x: f64,
    y: f64,
    z: f64,
}

/// Solve Kepler's equation M = E - e sin E (radians). `None` if the
/// iteration does not converge.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Option<f64> {
    let m = mean_anomaly;
    let mut e_anom = if eccentricity < 0.8 { m } else { std::f64::consts::PI };
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (e_anom - eccentricity * e_anom.sin() - m) / (1.0 - eccentricity * e_anom.cos());
        e_anom -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            return Some(e_anom);
        }
    }
    None
}

fn heliocentric(elements: &OrbitalElements, t: f64) -> Option<Vector3> {
    let el: [f64; 6] = std::array::from_fn(|i| elements.base[i] + elements.rate[i] * t);
    let (a, e, incl, mean_lon, peri_lon, node) = (el[0], el[1], el[2], el[3], el[4], el[5]);

    let arg_peri = (peri_lon - node).to_radians();
    let mean_anomaly = (mean_lon - peri_lon).rem_euclid(360.0);
    // Keep M in (-180, 180] so the solver starts near the root.
    let mean_anomaly = if mean_anomaly > 180.0 { mean_anomaly - 360.0 } else { mean_anomaly };
    let ecc_anomaly = solve_kepler(mean_anomaly.to_radians(), e)?;

    let x_orb = a * (ecc_anomaly.cos() - e);
    let y_orb = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    let (sin_w, cos_w) = arg_peri.sin_cos();
    let (sin_n, cos_n) = node.to_radians().sin_cos();
    let (sin_i, cos_i) = incl.to_radians().sin_cos();

    Some(Vector3 {
        x: (cos_w * cos_n - sin_w * sin_n * cos_i) * x_orb + (-sin_w * cos_n - cos_w * sin_n * cos_i) * y_orb,
        y: (cos_w * sin_n + sin_w * cos_n * cos_i) * x_orb + (-sin_w * sin_n + cos_w * cos_n * cos_i) * y_orb,
        z: (sin_w * sin_i) * x_orb + (cos_w * sin_i) * y_orb,
    })
}

fn elements_for(planet: Planet) -> Option<&'static OrbitalElements> {
    match planet {
        Planet::Mercury => Some(&MERCURY),
        Planet::Venus => Some(&VENUS),
        Planet::Mars => Some(&MARS),
        Planet::Jupiter => Some(&JUPITER),
        Planet::Saturn => Some(&SATURN),
        Planet::Uranus => Some(&URANUS),
        Planet::Neptune => Some(&NEPTUNE),
        Planet::Pluto => Some(&PLUTO),
        Planet::Chiron => Some(&CHIRON),
        _ => None,
    }
}

/// Geocentric tropical longitude of the Moon (degrees, ecliptic of date)
fn moon_longitude(t: f64) -> f64 {
    let l = 218.316_447_7 + 481_267.881_234_21 * t;
    let d = (297.850_192_1 + 445_267.111_403_4 * t).to_radians();
    let m = (357.529_109_2 + 35_999.050_290_9 * t).to_radians();
    let mp = (134.963_396_4 + 477_198.867_505_5 * t).to_radians();
    let f = (93.272_095_0 + 483_202.017_523_3 * t).to_radians();

    let terms = 6.288_774 * mp.sin()
        + 1.274_027 * (2.0 * d - mp).sin()
        + 0.658_314 * (2.0 * d).sin()
        + 0.213_618 * (2.0 * mp).sin()
        - 0.185_116 * m.sin()
        - 0.114_332 * (2.0 * f).sin()
        + 0.058_793 * (2.0 * d - 2.0 * mp).sin()
        + 0.057_066 * (2.0 * d - m - mp).sin()
        + 0.053_322 * (2.0 * d + mp).sin()
        + 0.045_758 * (2.0 * d - m).sin()
        - 0.040_923 * (m - mp).sin()
        - 0.034_720 * d.sin()
        - 0.030_383 * (m + mp).sin();

    (l + terms).rem_euclid(360.0)
}

/// Mean longitude of the ascending lunar node (degrees, ecliptic of date)
fn mean_node_longitude(t: f64) -> f64 {
    (125.044_522_2 - 1_934.136_260_8 * t + 0.002_070_8 * t * t + t * t * t / 450_000.0).rem_euclid(360.0)
}

/// Geocentric tropical ecliptic longitude of a planet at a Julian day.
/// Returns `None` only when the orbit solution fails to converge.
pub fn geocentric_longitude(planet: Planet, jd: f64) -> Option<f64> {
    let t = centuries_since_j2000(jd);
    let longitude = match planet {
        Planet::Moon => return Some(moon_longitude(t)),
        Planet::NorthNode => return Some(mean_node_longitude(t)),
        Planet::SouthNode => return Some((mean_node_longitude(t) + 180.0).rem_euclid(360.0)),
        Planet::Sun => {
            let earth = heliocentric(&EARTH_MOON_BARYCENTER, t)?;
            (-earth.y).atan2(-earth.x).to_degrees()
        }
        other => {
            let elements = elements_for(other)?;
            let earth = heliocentric(&EARTH_MOON_BARYCENTER, t)?;
            let body = heliocentric(elements, t)?;
            (body.y - earth.y).atan2(body.x - earth.x).to_degrees()
        }
    };
    Some((longitude + precession_since_j2000(jd)).rem_euclid(360.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::julian::J2000;

    #[test]
    fn test_solve_kepler_circular_orbit() {
        let e = solve_kepler(1.0, 0.0).unwrap();
        assert!((e - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_kepler_satisfies_equation() {
        let (m, ecc) = (0.75, 0.38);
        let e = solve_kepler(m, ecc).unwrap();
        assert!((e - ecc * e.sin() - m).abs() < 1e-9);
    }

    #[test]
    fn test_sun_near_capricorn_at_j2000() {
        // The Sun sits at roughly 280.4° on 2000-01-01 12:00 TT.
        let lon = geocentric_longitude(Planet::Sun, J2000).unwrap();
        assert!((lon - 280.4).abs() < 1.0, "sun longitude {}", lon);
    }

    #[test]
    fn test_moon_at_j2000() {
        // Published value ~223.3°
        let lon = geocentric_longitude(Planet::Moon, J2000).unwrap();
        assert!((lon - 223.3).abs() < 2.0, "moon longitude {}", lon);
    }

    #[test]
    fn test_nodes_are_opposite() {
        let north = geocentric_longitude(Planet::NorthNode, J2000).unwrap();
        let south = geocentric_longitude(Planet::SouthNode, J2000).unwrap();
        let diff = (south - north).rem_euclid(360.0);
        assert!((diff - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_every_planet_resolves() {
        for planet in Planet::ALL {
            let lon = geocentric_longitude(planet, J2000 + 1234.5).unwrap();
            assert!((0.0..360.0).contains(&lon), "{:?} -> {}", planet, lon);
        }
    }
}
