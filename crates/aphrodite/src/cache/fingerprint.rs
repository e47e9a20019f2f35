//! Canonical cache keys.
//!
//! Two logically identical inputs must hash to the same key: the birth
//! moment is reduced to its UTC instant (so equivalent zone names agree)
//! and coordinates are rounded to a fixed number of decimals. The aspect
//! orbs are part of the key because a chart stores its aspect list.

use crate::aspects::AspectSettings;
use crate::chart::BirthData;
use crate::ephemeris::{EphemerisError, HouseSystem};
use chrono::NaiveDate;
use sha2::{Digest, Sha256};

const FINGERPRINT_VERSION: &str = "v2";
/// Beyond this the scaled coordinate no longer fits comfortably in an i64.
const MAX_COORDINATE_DECIMALS: u32 = 9;

fn digest(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

fn round_coordinate(value: f64, decimals: u32) -> i64 {
    let scale = 10f64.powi(decimals.min(MAX_COORDINATE_DECIMALS) as i32);
    (value * scale).round() as i64
}

/// Active aspect types with their orbs, in table order
fn aspect_settings_key(aspects: &AspectSettings) -> String {
    aspects
        .active_types()
        .map(|aspect_type| format!("{}={:.4}", aspect_type.id(), aspects.orb_for(aspect_type)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Canonical text a chart fingerprint is hashed from
pub fn canonical_chart_key(
    birth: &BirthData,
    house_system: HouseSystem,
    coordinate_decimals: u32,
    aspects: &AspectSettings,
) -> Result<String, EphemerisError> {
    let instant = birth.utc_datetime()?;
    Ok(format!(
        "chart:{}|{}|{}|{}|{}|{}|{}",
        FINGERPRINT_VERSION,
        instant.format("%Y-%m-%dT%H:%M:%SZ"),
        if birth.time_known() { "time" } else { "notime" },
        round_coordinate(birth.latitude(), coordinate_decimals),
        round_coordinate(birth.longitude(), coordinate_decimals),
        house_system.id(),
        aspect_settings_key(aspects),
    ))
}

pub fn chart_fingerprint(
    birth: &BirthData,
    house_system: HouseSystem,
    coordinate_decimals: u32,
    aspects: &AspectSettings,
) -> Result<String, EphemerisError> {
    canonical_chart_key(birth, house_system, coordinate_decimals, aspects).map(|key| digest(&key))
}

/// Transits are keyed by the natal chart they overlay plus the covered day.
pub fn transit_fingerprint(natal_fingerprint: &str, date: NaiveDate) -> String {
    digest(&format!(
        "transit:{}|{}|{}",
        FINGERPRINT_VERSION,
        natal_fingerprint,
        date.format("%Y-%m-%d")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn birth(lat: f64, lon: f64, tz: &str, hour: u32) -> BirthData {
        BirthData::new(
            NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
            NaiveTime::from_hms_opt(hour, 30, 0),
            lat,
            lon,
            tz,
        )
        .unwrap()
    }

    fn default_key(birth: &BirthData, house_system: HouseSystem, decimals: u32) -> String {
        chart_fingerprint(birth, house_system, decimals, &AspectSettings::default()).unwrap()
    }

    #[test]
    fn test_fingerprint_is_stable_hex() {
        let fp = default_key(&birth(40.7128, -74.0060, "America/New_York", 14), HouseSystem::Placidus, 4);
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        let again = default_key(&birth(40.7128, -74.0060, "America/New_York", 14), HouseSystem::Placidus, 4);
        assert_eq!(fp, again);
    }

    #[test]
    fn test_equivalent_timezones_share_a_key() {
        // Same instant: 14:30 EDT == 18:30 UTC
        let ny = birth(40.7128, -74.0060, "America/New_York", 14);
        let alias = birth(40.7128, -74.0060, "US/Eastern", 14);
        let utc = birth(40.7128, -74.0060, "UTC", 18);
        let fp = |b: &BirthData| default_key(b, HouseSystem::Placidus, 4);
        assert_eq!(fp(&ny), fp(&alias));
        assert_eq!(fp(&ny), fp(&utc));
    }

    #[test]
    fn test_coordinates_round_to_precision() {
        let a = birth(40.712_81, -74.006_04, "UTC", 10);
        let b = birth(40.712_84, -74.005_96, "UTC", 10);
        assert_eq!(
            default_key(&a, HouseSystem::Koch, 4),
            default_key(&b, HouseSystem::Koch, 4)
        );
        assert_ne!(
            default_key(&a, HouseSystem::Koch, 6),
            default_key(&b, HouseSystem::Koch, 6)
        );
    }

    #[test]
    fn test_house_system_changes_key() {
        let b = birth(10.0, 20.0, "UTC", 3);
        assert_ne!(
            default_key(&b, HouseSystem::Placidus, 4),
            default_key(&b, HouseSystem::WholeSign, 4)
        );
    }

    #[test]
    fn test_orb_settings_change_key() {
        let b = birth(10.0, 20.0, "UTC", 3);
        let key = |aspects: &AspectSettings| chart_fingerprint(&b, HouseSystem::Placidus, 4, aspects).unwrap();
        let defaults = AspectSettings::default();
        let wide = AspectSettings::default().with_orb(crate::aspects::AspectType::Conjunction, 10.0);
        let majors = AspectSettings {
            include_minor: false,
            ..AspectSettings::default()
        };
        assert_ne!(key(&defaults), key(&wide));
        assert_ne!(key(&defaults), key(&majors));
        // An override equal to the built-in orb describes the same chart
        let explicit = AspectSettings::default().with_orb(crate::aspects::AspectType::Trine, 7.0);
        assert_eq!(key(&defaults), key(&explicit));
    }

    #[test]
    fn test_transit_key_depends_on_date() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_ne!(transit_fingerprint("abc", d1), transit_fingerprint("abc", d2));
        assert_eq!(transit_fingerprint("abc", d1), transit_fingerprint("abc", d1));
    }
}
