//! The YAML plan file.
//!
//! ```yaml
//! journeys:
//!   - name: To Bath
//!     legs:
//!       - type: train
//!         id: P12345
//!         date: 2024-03-15
//!         board: PAD
//!         alight: BRI
//!       - type: walk
//!         from: { name: Temple Meads, lat: 51.4491, lon: -2.5813 }
//!         to: { name: Bus Station, lat: 51.4592, lon: -2.5923 }
//!         depart: 2024-03-15T11:35
//!       - type: bus
//!         id: 4242
//!         date: 2024-03-15
//!         board: 0100BRP90312
//!         alight: 0180BAC30001
//!         colour: { bg: "#6b2c91", fg: "#ffffff" }
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::info;

use super::error::PlanError;
use crate::domain::{Colour, ColourPair, SegmentColours, TransitTime, WalkPoint};

/// A whole plan file.
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    pub journeys: Vec<JourneyPlan>,
}

impl Plan {
    /// Load a plan from a YAML file.
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PlanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let plan = Self::from_yaml(&contents)?;
        info!(path = %path.display(), journeys = plan.journeys.len(), "loaded plan");
        Ok(plan)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, PlanError> {
        Ok(serde_yaml::from_str(contents)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JourneyPlan {
    #[serde(default)]
    pub name: Option<String>,
    pub legs: Vec<LegPlan>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LegPlan {
    Bus(TripLegPlan),
    Train(TripLegPlan),
    Walk(WalkLegPlan),
}

/// A ride on a scheduled trip, from one stop identifier to another.
#[derive(Debug, Clone, Deserialize)]
pub struct TripLegPlan {
    /// Bus trip id or train schedule UID
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub date: String,
    pub board: String,
    pub alight: String,
    #[serde(default)]
    pub colour: Option<ColourPlan>,
}

impl TripLegPlan {
    pub fn run_date(&self) -> Result<NaiveDate, PlanError> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| PlanError::InvalidDate(self.date.clone()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointPlan {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&PointPlan> for WalkPoint {
    fn from(point: &PointPlan) -> Self {
        WalkPoint::new(point.name.clone(), point.lat, point.lon)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalkLegPlan {
    pub from: PointPlan,
    pub to: PointPlan,
    pub depart: String,
    #[serde(default)]
    pub colour: Option<ColourPlan>,
}

impl WalkLegPlan {
    pub fn depart_time(&self) -> Result<TransitTime, PlanError> {
        TransitTime::parse_iso(self.depart.trim()).map_err(|_| PlanError::InvalidTime(self.depart.clone()))
    }
}

/// Colours written into the plan by hand.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColourPlan {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub border: Option<String>,
}

impl ColourPlan {
    pub fn parse(&self) -> Result<ExplicitColours, PlanError> {
        let field = |name: &'static str, value: &Option<String>| {
            value
                .as_deref()
                .map(|v| {
                    Colour::parse_hex(v).map_err(|_| PlanError::InvalidColour {
                        field: name,
                        value: v.to_string(),
                    })
                })
                .transpose()
        };
        Ok(ExplicitColours {
            foreground: field("fg", &self.fg)?,
            background: field("bg", &self.bg)?,
            border: field("border", &self.border)?,
        })
    }
}

/// Parsed hand-written colours; any side may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitColours {
    pub foreground: Option<Colour>,
    pub background: Option<Colour>,
    pub border: Option<Colour>,
}

impl ExplicitColours {
    /// The pair to use outright, when the plan names either side. A
    /// missing side is white text or a black background.
    pub fn pair(&self) -> Option<ColourPair> {
        if self.foreground.is_none() && self.background.is_none() {
            return None;
        }
        Some(ColourPair::new(
            self.background.unwrap_or(Colour::BLACK),
            self.foreground.unwrap_or(Colour::WHITE),
        ))
    }

    /// Final colours given the pair found some other way. The border is
    /// the plan's border if it names one, else the background.
    pub fn apply(&self, resolved: ColourPair) -> SegmentColours {
        let pair = self.pair().unwrap_or(resolved);
        let colours = SegmentColours::from_pair(pair);
        match self.border {
            Some(border) => colours.with_border(border),
            None => colours,
        }
    }
}

/// Trip ids may be written as bare numbers.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s.trim().to_string(),
        Id::Number(n) => n.to_string(),
    })
}
