//! Validated inputs consumed by the projection engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{CardType, FeatureSet};

/// Automatic growth: card counts are derived from a start, a target, and a
/// per-year growth rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomaticInput {
    pub projection_years: u32,
    pub target_card_count: u64,
    pub starting_card_count: u64,
    pub growth_rate: f64,
    pub card_type: CardType,
    pub features: FeatureSet,
}

/// Manual schedule: card counts are given explicitly per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualInput {
    /// Year index (1-based, not necessarily contiguous) to card count.
    pub cards_by_year: BTreeMap<u32, u64>,
    pub card_type: CardType,
    pub features: FeatureSet,
}

/// Exactly one growth model per computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoiInput {
    Automatic(AutomaticInput),
    Manual(ManualInput),
}

impl RoiInput {
    pub fn kind(&self) -> &'static str {
        match self {
            RoiInput::Automatic(_) => "automatic",
            RoiInput::Manual(_) => "manual",
        }
    }

    pub fn card_type(&self) -> CardType {
        match self {
            RoiInput::Automatic(input) => input.card_type,
            RoiInput::Manual(input) => input.card_type,
        }
    }
}

/// Monthly estimate attached to an application form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationInput {
    pub cards: f64,
    pub transactions_per_year: f64,
    pub card_type: CardType,
    pub months: u32,
    pub features: FeatureSet,
}
