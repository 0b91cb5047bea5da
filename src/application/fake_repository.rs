// In-memory analytics repository for tests
use crate::application::analytics_repository::{AnalyticsError, AnalyticsRepository, Series};
use crate::domain::region::RegionFilter;
use crate::domain::trends::{
    AnalyticsSnapshot, GeoRecord, PopularityRecord, SentimentRecord, TemporalRecord,
};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub fn sample_snapshot() -> AnalyticsSnapshot {
    AnalyticsSnapshot::new(
        vec![
            PopularityRecord::new("ai", 1200),
            PopularityRecord::new("cricket", 500),
        ],
        vec![
            SentimentRecord::new("ai", 0.4),
            SentimentRecord::new("cricket", -0.2),
        ],
        vec![
            TemporalRecord::new(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(), 12),
            TemporalRecord::new(Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap(), 17),
        ],
        vec![
            GeoRecord::country("India", "IND", 0.5, 40),
            GeoRecord::city("Mumbai", 19.07, 72.87, -0.3, 3),
        ],
    )
}

/// Serves a fixed snapshot per region, records every call, and can be told
/// to fail a series or stall a region.
pub struct FakeRepository {
    default_snapshot: AnalyticsSnapshot,
    by_region: HashMap<RegionFilter, AnalyticsSnapshot>,
    delays: HashMap<RegionFilter, Duration>,
    failing: Option<Series>,
    calls: Mutex<Vec<(Series, Option<RegionFilter>)>>,
}

impl FakeRepository {
    pub fn new(default_snapshot: AnalyticsSnapshot) -> Self {
        Self {
            default_snapshot,
            by_region: HashMap::new(),
            delays: HashMap::new(),
            failing: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_region(mut self, region: RegionFilter, snapshot: AnalyticsSnapshot) -> Self {
        self.by_region.insert(region, snapshot);
        self
    }

    pub fn with_delay(mut self, region: RegionFilter, delay: Duration) -> Self {
        self.delays.insert(region, delay);
        self
    }

    pub fn failing(mut self, series: Series) -> Self {
        self.failing = Some(series);
        self
    }

    pub fn calls(&self) -> Vec<(Series, Option<RegionFilter>)> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(
        &self,
        series: Series,
        region: Option<RegionFilter>,
    ) -> Result<&AnalyticsSnapshot, AnalyticsError> {
        self.calls.lock().unwrap().push((series, region));

        if let Some(delay) = region.and_then(|r| self.delays.get(&r)) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing == Some(series) {
            return Err(AnalyticsError::Status {
                series,
                status: 503,
                body: "unavailable".to_string(),
            });
        }

        Ok(region
            .and_then(|r| self.by_region.get(&r))
            .unwrap_or(&self.default_snapshot))
    }
}

#[async_trait]
impl AnalyticsRepository for FakeRepository {
    async fn fetch_popularity(
        &self,
        region: RegionFilter,
    ) -> Result<Vec<PopularityRecord>, AnalyticsError> {
        Ok(self.enter(Series::Popularity, Some(region)).await?.popularity.clone())
    }

    async fn fetch_sentiment(
        &self,
        region: RegionFilter,
    ) -> Result<Vec<SentimentRecord>, AnalyticsError> {
        Ok(self.enter(Series::Sentiment, Some(region)).await?.sentiment.clone())
    }

    async fn fetch_temporal(
        &self,
        region: RegionFilter,
    ) -> Result<Vec<TemporalRecord>, AnalyticsError> {
        Ok(self.enter(Series::Temporal, Some(region)).await?.temporal.clone())
    }

    async fn fetch_geographical(&self) -> Result<Vec<GeoRecord>, AnalyticsError> {
        Ok(self.enter(Series::Geographical, None).await?.geographical.clone())
    }
}
