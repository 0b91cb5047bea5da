// Chart trace descriptors consumed by the rendering engine
//
// Field names follow the renderer's figure vocabulary (`x`, `y`, `z`,
// `locations`, `marker`, `colorscale`, ...) so a figure serializes straight
// into something the charting engine can draw.
use serde::{Serialize, Serializer};
use std::fmt;

pub const DASHBOARD_TITLE: &str = "Social Media Trend Analysis Dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One `[position, color]` stop of a color scale, position in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorStop(pub f64, pub Rgb);

/// A continuous color scale together with the data range it spans.
///
/// Serializes as the bare stop list; the range is emitted separately as
/// `zmin/zmax` or `cmin/cmax` by the trace that uses it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<ColorStop>,
    min: f64,
    max: f64,
}

impl ColorScale {
    /// Diverging sentiment scale: deep red at -1, pale yellow at 1.
    pub fn sentiment() -> Self {
        Self {
            stops: vec![
                ColorStop(0.0, Rgb(165, 0, 38)),
                ColorStop(0.25, Rgb(215, 48, 39)),
                ColorStop(0.5, Rgb(244, 109, 67)),
                ColorStop(0.75, Rgb(253, 174, 97)),
                ColorStop(1.0, Rgb(254, 224, 144)),
            ],
            min: -1.0,
            max: 1.0,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Color the renderer assigns to `value`. Values outside the range are
    /// clamped to the end stops.
    pub fn color_at(&self, value: f64) -> Rgb {
        let span = self.max - self.min;
        let t = if span > 0.0 && value.is_finite() {
            ((value - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        for pair in self.stops.windows(2) {
            let (ColorStop(lo, from), ColorStop(hi, to)) = (pair[0], pair[1]);
            if t <= hi {
                let local = if hi > lo { (t - lo) / (hi - lo) } else { 0.0 };
                return Rgb(
                    lerp(from.0, to.0, local),
                    lerp(from.1, to.1, local),
                    lerp(from.2, to.2, local),
                );
            }
        }

        self.stops.last().map(|s| s.1).unwrap_or(Rgb(0, 0, 0))
    }
}

fn lerp(from: u8, to: u8, t: f64) -> u8 {
    (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
}

impl Serialize for ColorScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.stops)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScatterMode {
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers+text")]
    MarkersText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<u64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub mode: ScatterMode,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: String,
    pub titleside: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethTrace {
    pub locations: Vec<String>,
    pub z: Vec<f64>,
    pub text: Vec<String>,
    pub colorscale: ColorScale,
    pub zmin: f64,
    pub zmax: f64,
    pub colorbar: ColorBar,
    pub showscale: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoMarker {
    pub size: Vec<u64>,
    pub color: Vec<f64>,
    pub colorscale: ColorScale,
    pub cmin: f64,
    pub cmax: f64,
    pub showscale: bool,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFont {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterGeoTrace {
    pub mode: ScatterMode,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub text: Vec<String>,
    pub marker: GeoMarker,
    pub textposition: String,
    pub textfont: TextFont,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar(BarTrace),
    Scatter(ScatterTrace),
    Choropleth(ChoroplethTrace),
    Scattergeo(ScatterGeoTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
}

impl Axis {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoLayout {
    pub showframe: bool,
    pub showcoastlines: bool,
    pub projection: Projection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

impl Layout {
    pub fn cartesian(title: &str, x_title: &str, y_title: &str) -> Self {
        Self {
            title: title.to_string(),
            xaxis: Some(Axis::titled(x_title)),
            yaxis: Some(Axis::titled(y_title)),
            geo: None,
            showlegend: None,
        }
    }

    pub fn map(title: &str, projection: &str) -> Self {
        Self {
            title: title.to_string(),
            xaxis: None,
            yaxis: None,
            geo: Some(GeoLayout {
                showframe: false,
                showcoastlines: true,
                projection: Projection {
                    kind: projection.to_string(),
                },
            }),
            showlegend: Some(false),
        }
    }
}

/// A titled dashboard section: traces plus the layout to draw them with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub section: String,
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub title: String,
    pub popularity: Figure,
    pub sentiment: Figure,
    pub temporal: Figure,
    pub geographic: Figure,
}
