// Region filter domain model
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic scope selected in the dashboard.
///
/// `All` is the empty filter: region-scoped series are requested without a
/// `region` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RegionFilter {
    #[default]
    All,
    Worldwide,
    UnitedStates,
    India,
    UnitedKingdom,
    Canada,
    Australia,
    Germany,
    France,
    Japan,
    SouthKorea,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown region: {0:?}")]
pub struct UnknownRegion(pub String);

impl RegionFilter {
    /// Every selectable region, in selector order.
    pub const ALL: [RegionFilter; 11] = [
        RegionFilter::All,
        RegionFilter::Worldwide,
        RegionFilter::UnitedStates,
        RegionFilter::India,
        RegionFilter::UnitedKingdom,
        RegionFilter::Canada,
        RegionFilter::Australia,
        RegionFilter::Germany,
        RegionFilter::France,
        RegionFilter::Japan,
        RegionFilter::SouthKorea,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            RegionFilter::All => "",
            RegionFilter::Worldwide => "Worldwide",
            RegionFilter::UnitedStates => "United States",
            RegionFilter::India => "India",
            RegionFilter::UnitedKingdom => "United Kingdom",
            RegionFilter::Canada => "Canada",
            RegionFilter::Australia => "Australia",
            RegionFilter::Germany => "Germany",
            RegionFilter::France => "France",
            RegionFilter::Japan => "Japan",
            RegionFilter::SouthKorea => "South Korea",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegionFilter::All => "All Regions",
            other => other.value(),
        }
    }

    /// Value for the `region` query parameter, `None` when unfiltered
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            RegionFilter::All => None,
            other => Some(other.value()),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(RegionFilter::All);
        }

        Self::ALL
            .iter()
            .copied()
            .find(|r| {
                r.value().eq_ignore_ascii_case(trimmed) || r.label().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

impl TryFrom<String> for RegionFilter {
    type Error = UnknownRegion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RegionFilter> for String {
    fn from(region: RegionFilter) -> Self {
        region.value().to_string()
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
