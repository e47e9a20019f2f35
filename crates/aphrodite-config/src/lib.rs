use aphrodite::{AspectType, CachePolicy, ChartSettings, ConfidencePolicy, HouseSystem};
use chrono::Duration;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Resolved settings for the chart service
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AphroditeSettings {
    pub chart: ChartSettings,
    pub cache: CachePolicy,
    pub confidence: ConfidencePolicy,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    chart: ChartToml,
    #[serde(default)]
    orbs: OrbsToml,
    #[serde(default)]
    cache: CacheToml,
    #[serde(default)]
    interpretation: InterpretationToml,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartToml {
    #[serde(default = "default_house_system")]
    house_system: String,
    #[serde(default = "default_true")]
    include_minor_aspects: bool,
}

impl Default for ChartToml {
    fn default() -> Self {
        Self {
            house_system: default_house_system(),
            include_minor_aspects: true,
        }
    }
}

/// Orb overrides; absent entries keep the built-in table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrbsToml {
    conjunction: Option<f64>,
    opposition: Option<f64>,
    trine: Option<f64>,
    square: Option<f64>,
    sextile: Option<f64>,
    quincunx: Option<f64>,
    semisextile: Option<f64>,
    semisquare: Option<f64>,
    sesquiquadrate: Option<f64>,
}

impl OrbsToml {
    fn overrides(&self) -> [(AspectType, Option<f64>); 9] {
        [
            (AspectType::Conjunction, self.conjunction),
            (AspectType::Opposition, self.opposition),
            (AspectType::Trine, self.trine),
            (AspectType::Square, self.square),
            (AspectType::Sextile, self.sextile),
            (AspectType::Quincunx, self.quincunx),
            (AspectType::Semisextile, self.semisextile),
            (AspectType::Semisquare, self.semisquare),
            (AspectType::Sesquiquadrate, self.sesquiquadrate),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CacheToml {
    #[serde(default = "default_birth_chart_ttl_days")]
    birth_chart_ttl_days: i64,
    #[serde(default = "default_transit_min_ttl_minutes")]
    transit_min_ttl_minutes: i64,
    #[serde(default = "default_coordinate_decimals")]
    coordinate_decimals: u32,
}

impl Default for CacheToml {
    fn default() -> Self {
        Self {
            birth_chart_ttl_days: default_birth_chart_ttl_days(),
            transit_min_ttl_minutes: default_transit_min_ttl_minutes(),
            coordinate_decimals: default_coordinate_decimals(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct InterpretationToml {
    #[serde(default = "default_confidence_mode")]
    confidence: String,
    #[serde(default)]
    confidence_value: Option<f64>,
}

impl Default for InterpretationToml {
    fn default() -> Self {
        Self {
            confidence: default_confidence_mode(),
            confidence_value: None,
        }
    }
}

fn default_house_system() -> String {
    "placidus".to_string()
}

fn default_true() -> bool {
    true
}

fn default_birth_chart_ttl_days() -> i64 {
    365
}

fn default_transit_min_ttl_minutes() -> i64 {
    60
}

fn default_coordinate_decimals() -> u32 {
    4
}

fn default_confidence_mode() -> String {
    "fixed".to_string()
}

const MAX_COORDINATE_DECIMALS: u32 = 9;
/// 100 years
const MAX_BIRTH_CHART_TTL_DAYS: i64 = 36_525;
/// One week
const MAX_TRANSIT_MIN_TTL_MINUTES: i64 = 10_080;

/// Try the usual relative locations of `configs/aphrodite.toml`.
pub fn read_config_toml_text() -> Option<String> {
    let paths = ["configs/aphrodite.toml", "../../configs/aphrodite.toml"];
    paths.iter().find_map(|p| fs::read_to_string(p).ok())
}

/// Settings from the default config locations; defaults when no file exists.
pub fn load_settings() -> anyhow::Result<AphroditeSettings> {
    match read_config_toml_text() {
        Some(text) => parse_settings(&text),
        None => {
            log::info!("No aphrodite.toml found, using default settings");
            Ok(AphroditeSettings::default())
        }
    }
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<AphroditeSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_settings(&text)
}

pub fn parse_settings(text: &str) -> anyhow::Result<AphroditeSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse aphrodite.toml: {e}"))?;
    let RootConfigToml {
        chart,
        orbs,
        cache,
        interpretation,
    } = root;

    let house_system: HouseSystem = chart
        .house_system
        .parse()
        .map_err(|e: String| anyhow::anyhow!("chart.house_system: {e}"))?;

    let mut settings = ChartSettings {
        default_house_system: house_system,
        ..ChartSettings::default()
    };
    settings.aspects.include_minor = chart.include_minor_aspects;
    for (aspect_type, orb) in orbs.overrides() {
        if let Some(orb) = orb {
            if !orb.is_finite() || orb < 0.0 || orb > 15.0 {
                anyhow::bail!("orbs.{} must be between 0 and 15 degrees, got {orb}", aspect_type.id());
            }
            settings.aspects.orbs.insert(aspect_type, orb);
        }
    }

    if !(1..=MAX_BIRTH_CHART_TTL_DAYS).contains(&cache.birth_chart_ttl_days) {
        anyhow::bail!(
            "cache.birth_chart_ttl_days must be between 1 and {MAX_BIRTH_CHART_TTL_DAYS}, got {}",
            cache.birth_chart_ttl_days
        );
    }
    if !(1..=MAX_TRANSIT_MIN_TTL_MINUTES).contains(&cache.transit_min_ttl_minutes) {
        anyhow::bail!(
            "cache.transit_min_ttl_minutes must be between 1 and {MAX_TRANSIT_MIN_TTL_MINUTES}, got {}",
            cache.transit_min_ttl_minutes
        );
    }
    if cache.coordinate_decimals > MAX_COORDINATE_DECIMALS {
        anyhow::bail!("cache.coordinate_decimals must be at most {MAX_COORDINATE_DECIMALS}");
    }
    let cache_policy = CachePolicy {
        birth_chart_ttl: Duration::try_days(cache.birth_chart_ttl_days)
            .ok_or_else(|| anyhow::anyhow!("cache.birth_chart_ttl_days is out of range"))?,
        transit_min_ttl: Duration::try_minutes(cache.transit_min_ttl_minutes)
            .ok_or_else(|| anyhow::anyhow!("cache.transit_min_ttl_minutes is out of range"))?,
        coordinate_decimals: cache.coordinate_decimals,
    };

    let confidence = match interpretation.confidence.trim().to_lowercase().as_str() {
        "fixed" => {
            let value = interpretation.confidence_value.unwrap_or(aphrodite::interpretation::DEFAULT_CONFIDENCE);
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("interpretation.confidence_value must be within [0, 1], got {value}");
            }
            ConfidencePolicy::Fixed(value)
        }
        "coverage" => ConfidencePolicy::Coverage,
        other => anyhow::bail!("interpretation.confidence must be \"fixed\" or \"coverage\", got \"{other}\""),
    };

    Ok(AphroditeSettings {
        chart: settings,
        cache: cache_policy,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, AphroditeSettings::default());
    }

    #[test]
    fn full_config_is_applied() {
        let text = r#"
            [chart]
            house_system = "whole_sign"
            include_minor_aspects = false

            [orbs]
            conjunction = 10.0
            sextile = 5.0

            [cache]
            birth_chart_ttl_days = 30
            transit_min_ttl_minutes = 15
            coordinate_decimals = 2

            [interpretation]
            confidence = "coverage"
        "#;
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.chart.default_house_system, HouseSystem::WholeSign);
        assert!(!settings.chart.aspects.include_minor);
        assert_eq!(settings.chart.aspects.orb_for(AspectType::Conjunction), 10.0);
        assert_eq!(settings.chart.aspects.orb_for(AspectType::Sextile), 5.0);
        assert_eq!(settings.chart.aspects.orb_for(AspectType::Trine), 7.0);
        assert_eq!(settings.cache.birth_chart_ttl, Duration::days(30));
        assert_eq!(settings.cache.transit_min_ttl, Duration::minutes(15));
        assert_eq!(settings.cache.coordinate_decimals, 2);
        assert_eq!(settings.confidence, ConfidencePolicy::Coverage);
    }

    #[test]
    fn fixed_confidence_value() {
        let text = "[interpretation]\nconfidence = \"fixed\"\nconfidence_value = 0.65\n";
        assert_eq!(parse_settings(text).unwrap().confidence, ConfidencePolicy::Fixed(0.65));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse_settings("[chart]\nhouse_system = \"porphyry\"\n").is_err());
        assert!(parse_settings("[orbs]\ntrine = -1.0\n").is_err());
        assert!(parse_settings("[cache]\nbirth_chart_ttl_days = 0\n").is_err());
        assert!(parse_settings("[cache]\ntransit_min_ttl_minutes = -5\n").is_err());
        assert!(parse_settings("[cache]\ncoordinate_decimals = 12\n").is_err());
        assert!(parse_settings("[interpretation]\nconfidence = \"vibes\"\n").is_err());
        assert!(parse_settings("[interpretation]\nconfidence_value = 1.5\n").is_err());
        assert!(parse_settings("[unknown]\nkey = 1\n").is_err());
    }

    #[test]
    fn oversized_ttls_are_rejected_without_panicking() {
        let err = parse_settings("[cache]\nbirth_chart_ttl_days = 9223372036854775807\n").unwrap_err();
        assert!(err.to_string().contains("birth_chart_ttl_days"));
        assert!(parse_settings("[cache]\nbirth_chart_ttl_days = 36526\n").is_err());
        assert!(parse_settings("[cache]\ntransit_min_ttl_minutes = 9223372036854775807\n").is_err());

        let longest = parse_settings("[cache]\nbirth_chart_ttl_days = 36525\n").unwrap();
        assert_eq!(longest.cache.birth_chart_ttl, Duration::days(36_525));
    }
}
