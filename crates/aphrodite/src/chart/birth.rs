use crate::ephemeris::{EphemerisError, GeoLocation};
use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Earliest calendar year the ephemeris model is used for
pub const MIN_SUPPORTED_YEAR: i32 = 1800;
/// Latest calendar year the ephemeris model is used for
pub const MAX_SUPPORTED_YEAR: i32 = 2200;

/// Birth moment and place. Fields are private so a value can only be built
/// through the validating constructors and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<NaiveTime>,
    latitude: f64,
    longitude: f64,
    timezone: Tz,
}

impl BirthData {
    /// `time: None` marks an unknown birth time; such charts are cast for
    /// local noon.
    pub fn new(
        date: NaiveDate,
        time: Option<NaiveTime>,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<Self, EphemerisError> {
        let timezone: Tz = timezone.trim().parse().map_err(|_| EphemerisError::InvalidInput {
            field: "timezone",
            message: format!("unknown IANA timezone '{}'", timezone),
        })?;
        let birth = Self { date, time, latitude, longitude, timezone };
        birth.validate()?;
        Ok(birth)
    }

    /// Build from the output of a geolocation lookup performed by the caller.
    pub fn from_geolocation(
        date: NaiveDate,
        time: Option<NaiveTime>,
        location: &GeoLocation,
    ) -> Result<Self, EphemerisError> {
        Self::new(date, time, location.latitude, location.longitude, &location.timezone)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn time_known(&self) -> bool {
        self.time.is_some()
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Range checks. Deserialized values bypass the constructor, so the
    /// engine runs this again before computing.
    pub fn validate(&self) -> Result<(), EphemerisError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(EphemerisError::InvalidInput {
                field: "latitude",
                message: format!("{} is outside [-90, 90]", self.latitude),
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(EphemerisError::InvalidInput {
                field: "longitude",
                message: format!("{} is outside [-180, 180]", self.longitude),
            });
        }
        check_supported_date(self.date)
    }

    /// Local wall-clock moment of birth (noon when the time is unknown)
    pub fn local_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or_else(local_noon))
    }

    /// Absolute birth instant. Times falling in a DST gap are moved forward
    /// by an hour; ambiguous times resolve to the earlier instant.
    pub fn utc_datetime(&self) -> Result<DateTime<Utc>, EphemerisError> {
        let local = self.local_datetime();
        let resolved = match self.timezone.from_local_datetime(&local) {
            LocalResult::Single(dt) => Some(dt),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => self
                .timezone
                .from_local_datetime(&(local + Duration::hours(1)))
                .earliest(),
        };
        resolved
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| EphemerisError::InvalidInput {
                field: "time",
                message: format!("{} does not exist in {}", local, self.timezone.name()),
            })
    }
}

fn local_noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}

/// Reject dates outside the range the ephemeris model is used for.
pub fn check_supported_date(date: NaiveDate) -> Result<(), EphemerisError> {
    if !(MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&date.year()) {
        return Err(EphemerisError::InvalidInput {
            field: "date",
            message: format!(
                "{} is outside the supported ephemeris range {}-{}",
                date, MIN_SUPPORTED_YEAR, MAX_SUPPORTED_YEAR
            ),
        });
    }
    Ok(())
}
