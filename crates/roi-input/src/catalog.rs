//! Card types and the fixed feature catalog.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Virtual,
    Physical,
    Both,
}

impl CardType {
    pub const ALL: [CardType; 3] = [CardType::Virtual, CardType::Physical, CardType::Both];

    pub fn as_str(self) -> &'static str {
        match self {
            CardType::Virtual => "Virtual",
            CardType::Physical => "Physical",
            CardType::Both => "Both",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|card_type| card_type.as_str() == s)
            .ok_or(())
    }
}

/// Add-on features a customer can select. Each selected feature adds a
/// fixed amount to the yearly opex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    Rewards,
    #[serde(rename = "FX")]
    Fx,
    #[serde(rename = "Corporate Controls")]
    CorporateControls,
    Analytics,
    #[serde(rename = "API Integration")]
    ApiIntegration,
    #[serde(rename = "Custom Branding")]
    CustomBranding,
}

impl Feature {
    pub const CATALOG: [Feature; 6] = [
        Feature::Rewards,
        Feature::Fx,
        Feature::CorporateControls,
        Feature::Analytics,
        Feature::ApiIntegration,
        Feature::CustomBranding,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Feature::Rewards => "Rewards",
            Feature::Fx => "FX",
            Feature::CorporateControls => "Corporate Controls",
            Feature::Analytics => "Analytics",
            Feature::ApiIntegration => "API Integration",
            Feature::CustomBranding => "Custom Branding",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::CATALOG.into_iter().find(|f| f.label() == label)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Order-irrelevant set of selected catalog features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet(BTreeSet<Feature>);

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from wire labels. Labels outside the catalog are dropped.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut set = BTreeSet::new();
        for label in labels {
            match Feature::from_label(label.as_ref()) {
                Some(feature) => {
                    set.insert(feature);
                }
                None => {
                    tracing::debug!(feature = label.as_ref(), "dropping unknown feature");
                }
            }
        }
        Self(set)
    }

    pub fn insert(&mut self, feature: Feature) -> bool {
        self.0.insert(feature)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
