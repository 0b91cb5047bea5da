// Trace builder - Maps analytics series into chart figures
use crate::application::geo_partitioner::{GeoViews, partition};
use crate::domain::chart::{
    BarTrace, ChoroplethTrace, ColorBar, ColorScale, DASHBOARD_TITLE, DashboardCharts, Figure,
    GeoMarker, Layout, ScatterGeoTrace, ScatterMode, ScatterTrace, TextFont, Trace,
};
use crate::domain::trends::{
    AnalyticsSnapshot, GeoRecord, PopularityRecord, SentimentRecord, TemporalRecord,
};
use chrono::SecondsFormat;

const CITY_MARKER_OPACITY: f64 = 0.8;
const CITY_LABEL_FONT_SIZE: u32 = 10;
const MAP_PROJECTION: &str = "natural earth";

pub fn build_dashboard(snapshot: &AnalyticsSnapshot) -> DashboardCharts {
    DashboardCharts {
        title: DASHBOARD_TITLE.to_string(),
        popularity: popularity_figure(&snapshot.popularity),
        sentiment: sentiment_figure(&snapshot.sentiment),
        temporal: temporal_figure(&snapshot.temporal),
        geographic: geographic_figure(&snapshot.geographical),
    }
}

pub fn popularity_figure(records: &[PopularityRecord]) -> Figure {
    let trace = BarTrace {
        x: records.iter().map(|r| r.trend.clone()).collect(),
        y: records.iter().map(|r| r.mentions).collect(),
        name: "Mentions".to_string(),
    };

    Figure {
        section: "Trend Popularity".to_string(),
        data: vec![Trace::Bar(trace)],
        layout: Layout::cartesian("Top Trending Topics", "Trend", "Mentions"),
    }
}

pub fn sentiment_figure(records: &[SentimentRecord]) -> Figure {
    let trace = ScatterTrace {
        mode: ScatterMode::Markers,
        x: records.iter().map(|r| r.trend.clone()).collect(),
        y: records.iter().map(|r| r.sentiment).collect(),
        name: "Sentiment Score".to_string(),
    };

    Figure {
        section: "Sentiment Analysis".to_string(),
        data: vec![Trace::Scatter(trace)],
        layout: Layout::cartesian("Sentiment Distribution", "Trend", "Sentiment (-1 to 1)"),
    }
}

/// Points are kept in producer order; the series is assumed chronological.
pub fn temporal_figure(records: &[TemporalRecord]) -> Figure {
    let trace = ScatterTrace {
        mode: ScatterMode::Lines,
        x: records
            .iter()
            .map(|r| r.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
            .collect(),
        y: records.iter().map(|r| r.trend_count as f64).collect(),
        name: "Trend Count".to_string(),
    };

    Figure {
        section: "Temporal Trends".to_string(),
        data: vec![Trace::Scatter(trace)],
        layout: Layout::cartesian("Trends Over Time", "Time", "Number of Trends"),
    }
}

pub fn geographic_figure(records: &[GeoRecord]) -> Figure {
    let GeoViews { countries, cities } = partition(records);
    let scale = ColorScale::sentiment();

    let choropleth = ChoroplethTrace {
        locations: countries.iter().map(|c| c.location_code.clone()).collect(),
        z: countries.iter().map(|c| c.sentiment).collect(),
        text: countries.into_iter().map(|c| c.label).collect(),
        colorscale: scale.clone(),
        zmin: scale.min(),
        zmax: scale.max(),
        colorbar: ColorBar {
            title: "Sentiment Score".to_string(),
            titleside: "right".to_string(),
        },
        showscale: true,
    };

    // The legend is drawn once by the choropleth layer
    let markers = ScatterGeoTrace {
        mode: ScatterMode::MarkersText,
        lat: cities.iter().map(|c| c.lat).collect(),
        lon: cities.iter().map(|c| c.lon).collect(),
        text: cities.iter().map(|c| c.label.clone()).collect(),
        marker: GeoMarker {
            size: cities.iter().map(|c| c.size).collect(),
            color: cities.iter().map(|c| c.color_value).collect(),
            colorscale: scale.clone(),
            cmin: scale.min(),
            cmax: scale.max(),
            showscale: false,
            opacity: CITY_MARKER_OPACITY,
        },
        textposition: "top center".to_string(),
        textfont: TextFont {
            size: CITY_LABEL_FONT_SIZE,
        },
    };

    Figure {
        section: "Geographical Sentiment Map".to_string(),
        data: vec![Trace::Choropleth(choropleth), Trace::Scattergeo(markers)],
        layout: Layout::map("Global Sentiment Analysis by Region", MAP_PROJECTION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fake_repository::sample_snapshot;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_popularity_trace_keeps_collection_order() {
        let figure = popularity_figure(&[
            PopularityRecord::new("zebra", 3),
            PopularityRecord::new("cricket", 500),
            PopularityRecord::new("apple", 42),
        ]);

        match &figure.data[0] {
            Trace::Bar(bar) => {
                assert_eq!(bar.x, vec!["zebra", "cricket", "apple"]);
                assert_eq!(bar.y, vec![3, 500, 42]);
            }
            other => panic!("expected bar trace, got {:?}", other),
        }
        assert_eq!(figure.layout.title, "Top Trending Topics");
    }

    #[test]
    fn test_india_cricket_scenario() {
        let figure = popularity_figure(&[PopularityRecord::new("cricket", 500)]);
        let json = serde_json::to_value(&figure).unwrap();

        assert_eq!(json["data"][0]["type"], "bar");
        assert_eq!(json["data"][0]["x"], serde_json::json!(["cricket"]));
        assert_eq!(json["data"][0]["y"], serde_json::json!([500]));
    }

    #[test]
    fn test_sentiment_trace_is_markers_only() {
        let figure = sentiment_figure(&[
            SentimentRecord::new("ai", 0.4),
            SentimentRecord::new("tax", -0.7),
        ]);

        match &figure.data[0] {
            Trace::Scatter(scatter) => {
                assert_eq!(scatter.mode, ScatterMode::Markers);
                assert_eq!(scatter.x, vec!["ai", "tax"]);
                assert_eq!(scatter.y, vec![0.4, -0.7]);
            }
            other => panic!("expected scatter trace, got {:?}", other),
        }
        assert_eq!(figure.data.len(), 1);
    }

    #[test]
    fn test_temporal_trace_does_not_resort() {
        let later = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let figure =
            temporal_figure(&[TemporalRecord::new(later, 9), TemporalRecord::new(earlier, 4)]);

        match &figure.data[0] {
            Trace::Scatter(line) => {
                assert_eq!(line.mode, ScatterMode::Lines);
                assert_eq!(line.x, vec!["2024-05-02T00:00:00Z", "2024-05-01T00:00:00Z"]);
                assert_eq!(line.y, vec![9.0, 4.0]);
            }
            other => panic!("expected scatter trace, got {:?}", other),
        }
    }

    #[test]
    fn test_geo_layers_share_color_scale() {
        let figure = geographic_figure(&sample_snapshot().geographical);

        let (choropleth, markers) = match (&figure.data[0], &figure.data[1]) {
            (Trace::Choropleth(c), Trace::Scattergeo(s)) => (c, s),
            other => panic!("unexpected layers: {:?}", other),
        };

        assert_eq!(choropleth.colorscale, markers.marker.colorscale);
        assert_eq!((choropleth.zmin, choropleth.zmax), (markers.marker.cmin, markers.marker.cmax));
        assert_eq!(
            choropleth.colorscale.color_at(0.5),
            markers.marker.colorscale.color_at(0.5)
        );
        assert!(choropleth.showscale);
        assert!(!markers.marker.showscale);
    }

    #[test]
    fn test_geo_layers_carry_partitioned_views() {
        let figure = geographic_figure(&sample_snapshot().geographical);
        let json = serde_json::to_value(&figure).unwrap();

        assert_eq!(json["data"][0]["type"], "choropleth");
        assert_eq!(json["data"][0]["locations"], serde_json::json!(["IND"]));
        assert_eq!(
            json["data"][0]["text"],
            serde_json::json!(["India: 0.5 sentiment (40 trends)"])
        );
        assert_eq!(json["data"][1]["type"], "scattergeo");
        assert_eq!(json["data"][1]["mode"], "markers+text");
        assert_eq!(json["data"][1]["marker"]["size"], serde_json::json!([8]));
        assert_eq!(json["data"][1]["marker"]["opacity"], 0.8);
        assert_eq!(json["layout"]["geo"]["projection"]["type"], "natural earth");
    }

    #[test]
    fn test_empty_snapshot_builds_empty_traces() {
        let charts = build_dashboard(&AnalyticsSnapshot::default());

        assert_eq!(charts.title, DASHBOARD_TITLE);
        match &charts.popularity.data[0] {
            Trace::Bar(bar) => assert!(bar.x.is_empty()),
            other => panic!("expected bar trace, got {:?}", other),
        }
        assert_eq!(charts.geographic.data.len(), 2);
    }
}
