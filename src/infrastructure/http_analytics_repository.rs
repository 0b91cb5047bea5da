// HTTP repository for the trend analytics service
use crate::application::analytics_repository::{AnalyticsError, AnalyticsRepository, Series};
use crate::domain::region::RegionFilter;
use crate::domain::trends::{
    GeoLocation, GeoRecord, PopularityRecord, SentimentRecord, TemporalRecord,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Upper bound, in characters, on the error body kept from a failed response
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone)]
pub struct HttpAnalyticsRepository {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PopularityRow {
    trend: String,
    mentions: u64,
}

#[derive(Debug, Deserialize)]
struct SentimentRow {
    trend: String,
    sentiment: f64,
}

#[derive(Debug, Deserialize)]
struct TemporalRow {
    timestamp: String,
    trend_count: u64,
}

#[derive(Debug, Deserialize)]
struct GeoRow {
    #[serde(rename = "type")]
    kind: String,
    region: String,
    sentiment: f64,
    count: u64,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl TryFrom<PopularityRow> for PopularityRecord {
    type Error = String;

    fn try_from(row: PopularityRow) -> Result<Self, Self::Error> {
        Ok(PopularityRecord::new(row.trend, row.mentions))
    }
}

impl TryFrom<SentimentRow> for SentimentRecord {
    type Error = String;

    fn try_from(row: SentimentRow) -> Result<Self, Self::Error> {
        Ok(SentimentRecord::new(row.trend, row.sentiment))
    }
}

impl TryFrom<TemporalRow> for TemporalRecord {
    type Error = String;

    fn try_from(row: TemporalRow) -> Result<Self, Self::Error> {
        let timestamp = parse_timestamp(&row.timestamp)
            .ok_or_else(|| format!("invalid timestamp {:?}", row.timestamp))?;
        Ok(TemporalRecord::new(timestamp, row.trend_count))
    }
}

impl TryFrom<GeoRow> for GeoRecord {
    type Error = String;

    fn try_from(row: GeoRow) -> Result<Self, Self::Error> {
        match row.kind.as_str() {
            "country" => {
                let code = row
                    .country_code
                    .ok_or_else(|| format!("country record {:?} has no country_code", row.region))?;
                Ok(GeoRecord::country(row.region, code, row.sentiment, row.count))
            }
            "city" => match (row.lat, row.lon) {
                (Some(lat), Some(lon)) => {
                    Ok(GeoRecord::city(row.region, lat, lon, row.sentiment, row.count))
                }
                _ => Err(format!("city record {:?} is missing lat/lon", row.region)),
            },
            // Kept so the partitioner can exclude it
            _ => Ok(GeoRecord {
                location: GeoLocation::Unrecognized(row.kind.clone()),
                region: row.region,
                sentiment: row.sentiment,
                count: row.count,
            }),
        }
    }
}

/// RFC 3339, or a naive ISO-8601 timestamp taken as UTC
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

impl HttpAnalyticsRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(concat!("trend-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `{base}/trends/{series}`, plus a percent-encoded `region` parameter for
    /// region-scoped series when a region is selected
    fn series_url(&self, series: Series, region: Option<RegionFilter>) -> String {
        let mut url = format!("{}/trends/{}", self.base_url, series.path());

        if series.is_region_scoped() {
            if let Some(value) = region.and_then(|r| r.query_value()) {
                url.push_str("?region=");
                url.push_str(&urlencoding::encode(value));
            }
        }

        url
    }

    async fn fetch_series<Row, Record>(
        &self,
        series: Series,
        region: Option<RegionFilter>,
    ) -> Result<Vec<Record>, AnalyticsError>
    where
        Row: DeserializeOwned,
        Record: TryFrom<Row, Error = String>,
    {
        let url = self.series_url(series, region);
        tracing::debug!(series = %series, url = %url, "requesting analytics series");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| AnalyticsError::Transport { series, source })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = match response.text().await {
                Ok(text) => truncate_body(&text),
                Err(e) => {
                    tracing::warn!(series = %series, status, error = %e, "error body unreadable");
                    format!("<body unreadable: {e}>")
                }
            };
            return Err(AnalyticsError::Status { series, status, body });
        }

        let body = response
            .text()
            .await
            .map_err(|source| AnalyticsError::Transport { series, source })?;

        let rows: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| AnalyticsError::Decode {
                series,
                message: e.to_string(),
            })?;

        Ok(decode_rows(series, rows))
    }
}

fn truncate_body(text: &str) -> String {
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}... ({} bytes total)", &text[..cut], text.len()),
        None => text.to_string(),
    }
}

/// Decode each row independently; malformed rows are dropped, not fatal.
fn decode_rows<Row, Record>(series: Series, rows: Vec<serde_json::Value>) -> Vec<Record>
where
    Row: DeserializeOwned,
    Record: TryFrom<Row, Error = String>,
{
    let total = rows.len();
    let records: Vec<Record> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let decoded = serde_json::from_value::<Row>(value)
                .map_err(|e| e.to_string())
                .and_then(<Record as TryFrom<Row>>::try_from);

            match decoded {
                Ok(record) => Some(record),
                Err(error) => {
                    tracing::warn!(
                        series = %series,
                        index,
                        error = %error,
                        "dropping malformed record"
                    );
                    None
                }
            }
        })
        .collect();

    if records.len() < total {
        tracing::warn!(
            series = %series,
            kept = records.len(),
            dropped = total - records.len(),
            "some records could not be decoded"
        );
    }

    records
}

#[async_trait]
impl AnalyticsRepository for HttpAnalyticsRepository {
    async fn fetch_popularity(
        &self,
        region: RegionFilter,
    ) -> Result<Vec<PopularityRecord>, AnalyticsError> {
        self.fetch_series::<PopularityRow, _>(Series::Popularity, Some(region)).await
    }

    async fn fetch_sentiment(
        &self,
        region: RegionFilter,
    ) -> Result<Vec<SentimentRecord>, AnalyticsError> {
        self.fetch_series::<SentimentRow, _>(Series::Sentiment, Some(region)).await
    }

    async fn fetch_temporal(
        &self,
        region: RegionFilter,
    ) -> Result<Vec<TemporalRecord>, AnalyticsError> {
        self.fetch_series::<TemporalRow, _>(Series::Temporal, Some(region)).await
    }

    async fn fetch_geographical(&self) -> Result<Vec<GeoRecord>, AnalyticsError> {
        self.fetch_series::<GeoRow, _>(Series::Geographical, None).await
    }
}
