//! Wire request bodies.
//!
//! Counts are read as signed integers so that zero and negative values reach
//! validation and are reported against their field instead of surfacing as
//! opaque parse errors.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of `POST /calculate-roi/auto`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutoRoiRequest {
    pub years: i64,
    pub cards_number: i64,
    #[serde(rename = "cardType")]
    pub card_type: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub starting_number: i64,
    #[serde(alias = "growth_rate")]
    pub expected_cards_growth_rate: f64,
}

/// Body of `POST /calculate-roi/manual`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManualRoiRequest {
    pub explicit_cards_number: BTreeMap<YearKey, i64>,
    #[serde(rename = "cardType")]
    pub card_type: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Year key of `explicit_cards_number`.
///
/// JSON object keys are always strings while YAML scenario files usually
/// write plain integers; both are accepted here and checked in validation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearKey {
    Number(i64),
    Text(String),
}

impl From<u32> for YearKey {
    fn from(year: u32) -> Self {
        YearKey::Number(i64::from(year))
    }
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearKey::Number(n) => write!(f, "{n}"),
            YearKey::Text(s) => f.write_str(s),
        }
    }
}

/// Tagged body of `POST /calculate-roi`, dispatched on `calculationType`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "calculationType")]
pub enum RoiRequest {
    #[serde(rename = "auto")]
    Auto(AutoRoiRequest),
    #[serde(rename = "manual")]
    Manual(ManualRoiRequest),
}

/// The ROI-relevant part of a submitted card-issuing application form.
///
/// Every field is optional; missing values fall back to defaults during
/// validation the way the application form flow always has.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApplicationRequest {
    #[serde(rename = "numberOfCardsIn5Years", default)]
    pub number_of_cards_in_5_years: Option<f64>,
    #[serde(rename = "numberOfCards", default)]
    pub number_of_cards: Option<f64>,
    #[serde(rename = "expectedMonthlyVolume", default)]
    pub expected_monthly_volume: Option<f64>,
    #[serde(rename = "cardType", default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(rename = "customTimelineMonths", default)]
    pub custom_timeline_months: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
}
