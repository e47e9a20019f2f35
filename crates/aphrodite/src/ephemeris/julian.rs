//! Time scales: Julian day, centuries since J2000, sidereal time, obliquity.

use chrono::{DateTime, Datelike, Timelike, Utc};

pub const J2000: f64 = 2_451_545.0;
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Convert UTC datetime to Julian Day (Gregorian calendar)
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let mut year = dt.year() as f64;
    let mut month = dt.month() as f64;
    let day = dt.day() as f64;
    let hour_decimal = dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + (dt.second() as f64 + dt.nanosecond() as f64 / 1e9) / 3600.0;

    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }
    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5
        + hour_decimal / 24.0
}

/// Julian centuries elapsed since J2000.0
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_CENTURY
}

/// Greenwich mean sidereal time in degrees (0-360)
pub fn greenwich_sidereal_degrees(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let gmst = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    gmst.rem_euclid(360.0)
}

/// Local sidereal time (RAMC) in degrees for an east-positive longitude
pub fn local_sidereal_degrees(jd: f64, longitude: f64) -> f64 {
    (greenwich_sidereal_degrees(jd) + longitude).rem_euclid(360.0)
}

/// Mean obliquity of the ecliptic in degrees
pub fn mean_obliquity(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    23.439_291_11 - 0.013_004_2 * t - 1.64e-7 * t * t + 5.04e-7 * t * t * t
}

/// General precession in longitude since J2000, in degrees
pub fn precession_since_j2000(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    1.396_971_3 * t + 0.000_308_6 * t * t
}
