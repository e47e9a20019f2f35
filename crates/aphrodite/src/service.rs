//! Cache-through orchestration of chart computation and analysis.
//!
//! Cache reads and writes are best effort: a failing cache is logged and
//! the chart is computed directly, so callers only ever see computation
//! errors.

use crate::cache::{CacheClearResponse, CacheError, CachePolicy, CacheStatsResponse, CacheStore, MemoryBackend};
use crate::chart::birth::check_supported_date;
use crate::chart::{BirthData, Chart, ChartSettings, TransitChart};
use crate::clock::Clock;
use crate::compatibility::{CompatibilityAnalysis, CompatibilityEngine};
use crate::ephemeris::{ChartCalculator, EphemerisEngine, EphemerisError, HouseSystem};
use crate::interpretation::{
    CareerProfile, ConfidencePolicy, InterpretationEngine, LoveProfile, PersonalityProfile,
};
use chrono::NaiveDate;
use std::sync::Arc;

pub struct ChartService {
    calculator: Arc<dyn ChartCalculator>,
    cache: CacheStore,
    interpretation: InterpretationEngine,
    compatibility: CompatibilityEngine,
}

impl ChartService {
    pub fn new(
        calculator: Arc<dyn ChartCalculator>,
        cache: CacheStore,
        interpretation: InterpretationEngine,
        compatibility: CompatibilityEngine,
    ) -> Self {
        Self {
            calculator,
            cache,
            interpretation,
            compatibility,
        }
    }

    /// Pure-Rust engine over an in-process cache, sharing one clock.
    pub fn in_memory(
        settings: ChartSettings,
        cache_policy: CachePolicy,
        confidence: ConfidencePolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let compatibility = CompatibilityEngine::new(settings.aspects.clone());
        let interpretation = InterpretationEngine::new(confidence, settings.aspects.clone());
        let engine = EphemerisEngine::with_clock(settings, clock.clone());
        let cache = CacheStore::new(Arc::new(MemoryBackend::new()), cache_policy, clock);
        Self::new(
            Arc::new(engine),
            cache,
            interpretation,
            compatibility,
        )
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Return the chart for `birth`, computing and caching it on a miss.
    pub async fn get_or_compute_chart(
        &self,
        birth: &BirthData,
        house_system: HouseSystem,
    ) -> Result<Chart, EphemerisError> {
        birth.validate()?;
        let fingerprint = self
            .cache
            .chart_fingerprint(birth, house_system, self.calculator.aspect_settings())?;

        match self.cache.get_chart(&fingerprint).await {
            Ok(Some(chart)) => {
                log::debug!("Chart cache hit for {}", fingerprint);
                return Ok(chart);
            }
            Ok(None) => {}
            Err(e) => log::warn!("Chart cache read failed for {}: {}", fingerprint, e),
        }

        let chart = self.calculator.compute_chart(birth, house_system)?;

        let ttl = self.cache.policy().birth_chart_ttl;
        if let Err(e) = self.cache.put_chart(&fingerprint, &chart, ttl).await {
            log::warn!("Chart cache write failed for {}: {}", fingerprint, e);
        }
        Ok(chart)
    }

    /// Transits for `date` over the natal chart of `birth`, cached until the
    /// end of that day.
    pub async fn get_or_compute_transits(
        &self,
        birth: &BirthData,
        house_system: HouseSystem,
        date: NaiveDate,
    ) -> Result<TransitChart, EphemerisError> {
        check_supported_date(date)?;
        let natal = self.get_or_compute_chart(birth, house_system).await?;
        let natal_fingerprint = self
            .cache
            .chart_fingerprint(birth, house_system, self.calculator.aspect_settings())?;
        let fingerprint = self.cache.transit_fingerprint(&natal_fingerprint, date);

        match self.cache.get_transits(&fingerprint).await {
            Ok(Some(transits)) => {
                log::debug!("Transit cache hit for {}", fingerprint);
                return Ok(transits);
            }
            Ok(None) => {}
            Err(e) => log::warn!("Transit cache read failed for {}: {}", fingerprint, e),
        }

        let transits = self.calculator.compute_transits(&natal, date)?;

        let ttl = self.cache.transit_ttl(date);
        if let Err(e) = self.cache.put_transits(&fingerprint, &transits, ttl).await {
            log::warn!("Transit cache write failed for {}: {}", fingerprint, e);
        }
        Ok(transits)
    }

    pub async fn love_profile(&self, birth: &BirthData, house_system: HouseSystem) -> Result<LoveProfile, EphemerisError> {
        let chart = self.get_or_compute_chart(birth, house_system).await?;
        Ok(self.interpretation.love_profile_for(&chart))
    }

    pub async fn personality_profile(
        &self,
        birth: &BirthData,
        house_system: HouseSystem,
    ) -> Result<PersonalityProfile, EphemerisError> {
        let chart = self.get_or_compute_chart(birth, house_system).await?;
        Ok(self.interpretation.personality_profile_for(&chart))
    }

    pub async fn career_profile(
        &self,
        birth: &BirthData,
        house_system: HouseSystem,
    ) -> Result<CareerProfile, EphemerisError> {
        let chart = self.get_or_compute_chart(birth, house_system).await?;
        Ok(self.interpretation.career_profile_for(&chart))
    }

    /// Compatibility of two people; both charts go through the cache.
    pub async fn synastry(
        &self,
        first: &BirthData,
        second: &BirthData,
        house_system: HouseSystem,
    ) -> Result<CompatibilityAnalysis, EphemerisError> {
        let (a, b) = tokio::join!(
            self.get_or_compute_chart(first, house_system),
            self.get_or_compute_chart(second, house_system)
        );
        Ok(self.compatibility.analyze_synastry(&a?, &b?))
    }

    pub async fn clear_cache_report(&self) -> CacheClearResponse {
        self.cache.clear_expired_report().await
    }

    pub async fn cache_stats_report(&self) -> Result<CacheStatsResponse, CacheError> {
        self.cache.cache_stats().await.map(CacheStatsResponse::from)
    }
}
