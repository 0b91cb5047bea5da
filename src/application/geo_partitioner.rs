// Geo partitioner - Splits geographic records into country and city views
use crate::domain::trends::{GeoLocation, GeoRecord};

/// Smallest marker size, so low-count cities stay visible
pub const MIN_MARKER_SIZE: u64 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct CountryArea {
    pub location_code: String,
    pub sentiment: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityMarker {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
    pub size: u64,
    /// Raw sentiment, mapped to a color by the shared scale
    pub color_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoViews {
    pub countries: Vec<CountryArea>,
    pub cities: Vec<CityMarker>,
}

/// Marker size grows with the trend count and has no upper bound.
pub fn marker_size(count: u64) -> u64 {
    count.saturating_mul(2).max(MIN_MARKER_SIZE)
}

pub fn partition(records: &[GeoRecord]) -> GeoViews {
    let mut views = GeoViews::default();

    for record in records {
        match &record.location {
            GeoLocation::Country { country_code } => views.countries.push(CountryArea {
                location_code: country_code.clone(),
                sentiment: record.sentiment,
                label: format!(
                    "{}: {} sentiment ({} trends)",
                    record.region, record.sentiment, record.count
                ),
            }),
            GeoLocation::City { lat, lon } => views.cities.push(CityMarker {
                lat: *lat,
                lon: *lon,
                label: format!("{}: {} ({} trends)", record.region, record.sentiment, record.count),
                size: marker_size(record.count),
                color_value: record.sentiment,
            }),
            GeoLocation::Unrecognized(kind) => {
                tracing::debug!(
                    region = %record.region,
                    kind = %kind,
                    "skipping geo record with unrecognized type"
                );
            }
        }
    }

    views
}
