// Trend analytics domain models
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct PopularityRecord {
    pub trend: String,
    pub mentions: u64,
}

impl PopularityRecord {
    pub fn new(trend: impl Into<String>, mentions: u64) -> Self {
        Self {
            trend: trend.into(),
            mentions,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentRecord {
    pub trend: String,
    /// Aggregate polarity in [-1, 1]
    pub sentiment: f64,
}

impl SentimentRecord {
    pub fn new(trend: impl Into<String>, sentiment: f64) -> Self {
        Self {
            trend: trend.into(),
            sentiment,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemporalRecord {
    pub timestamp: DateTime<Utc>,
    pub trend_count: u64,
}

impl TemporalRecord {
    pub fn new(timestamp: DateTime<Utc>, trend_count: u64) -> Self {
        Self {
            timestamp,
            trend_count,
        }
    }
}

/// Where a geographic record is anchored. The producer's `type` tag selects
/// the variant, so a record never carries both a country code and coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoLocation {
    Country { country_code: String },
    City { lat: f64, lon: f64 },
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoRecord {
    pub region: String,
    pub sentiment: f64,
    pub count: u64,
    pub location: GeoLocation,
}

impl GeoRecord {
    pub fn country(
        region: impl Into<String>,
        country_code: impl Into<String>,
        sentiment: f64,
        count: u64,
    ) -> Self {
        Self {
            region: region.into(),
            sentiment,
            count,
            location: GeoLocation::Country {
                country_code: country_code.into(),
            },
        }
    }

    pub fn city(region: impl Into<String>, lat: f64, lon: f64, sentiment: f64, count: u64) -> Self {
        Self {
            region: region.into(),
            sentiment,
            count,
            location: GeoLocation::City { lat, lon },
        }
    }
}

/// The four series of one successful fetch cycle. Replaced wholesale by the
/// next cycle, never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsSnapshot {
    pub popularity: Vec<PopularityRecord>,
    pub sentiment: Vec<SentimentRecord>,
    pub temporal: Vec<TemporalRecord>,
    pub geographical: Vec<GeoRecord>,
}

impl AnalyticsSnapshot {
    pub fn new(
        popularity: Vec<PopularityRecord>,
        sentiment: Vec<SentimentRecord>,
        temporal: Vec<TemporalRecord>,
        geographical: Vec<GeoRecord>,
    ) -> Self {
        Self {
            popularity,
            sentiment,
            temporal,
            geographical,
        }
    }

    pub fn record_count(&self) -> usize {
        self.popularity.len() + self.sentiment.len() + self.temporal.len() + self.geographical.len()
    }
}
