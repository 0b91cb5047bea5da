// Repository trait for trend analytics access
use crate::domain::region::RegionFilter;
use crate::domain::trends::{GeoRecord, PopularityRecord, SentimentRecord, TemporalRecord};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// The four series served by the analytics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    Popularity,
    Sentiment,
    Temporal,
    Geographical,
}

impl Series {
    pub fn path(&self) -> &'static str {
        match self {
            Series::Popularity => "popularity",
            Series::Sentiment => "sentiment",
            Series::Temporal => "temporal",
            Series::Geographical => "geographical",
        }
    }

    /// Whether the backend accepts a `region` parameter for this series
    pub fn is_region_scoped(&self) -> bool {
        !matches!(self, Series::Geographical)
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("request for {series} series failed: {source}")]
    Transport {
        series: Series,
        #[source]
        source: reqwest::Error,
    },

    #[error("{series} series returned status {status}: {body}")]
    Status {
        series: Series,
        status: u16,
        body: String,
    },

    #[error("could not decode {series} series: {message}")]
    Decode { series: Series, message: String },

    #[error("{series} series timed out after {after:?}")]
    Timeout { series: Series, after: Duration },
}

impl AnalyticsError {
    pub fn series(&self) -> Series {
        match self {
            AnalyticsError::Transport { series, .. }
            | AnalyticsError::Status { series, .. }
            | AnalyticsError::Decode { series, .. }
            | AnalyticsError::Timeout { series, .. } => *series,
        }
    }
}

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Mentions per trend, scoped to `region`
    async fn fetch_popularity(
        &self,
        region: RegionFilter,
    ) -> Result<Vec<PopularityRecord>, AnalyticsError>;

    /// Sentiment per trend, scoped to `region`
    async fn fetch_sentiment(
        &self,
        region: RegionFilter,
    ) -> Result<Vec<SentimentRecord>, AnalyticsError>;

    /// Trend counts over time, scoped to `region`
    async fn fetch_temporal(
        &self,
        region: RegionFilter,
    ) -> Result<Vec<TemporalRecord>, AnalyticsError>;

    /// Country and city sentiment. Never region-scoped.
    async fn fetch_geographical(&self) -> Result<Vec<GeoRecord>, AnalyticsError>;
}
