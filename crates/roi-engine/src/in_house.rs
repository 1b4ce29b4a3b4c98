//! In-house cost models.
//!
//! The in-house figure is a comparison baseline, not something the product
//! prices, so it is pluggable: callers pick the model that matches the
//! comparison they want to show.

use std::fmt;
use std::str::FromStr;

use roi_core::Real;
use serde::{Deserialize, Serialize};

use crate::params::CostParameters;

/// Cumulative cost of running issuance in-house after `years`.
pub trait InHouseCostModel {
    fn name(&self) -> &'static str;

    /// `scale` is the volume factor and `transactions_per_year` is quoted
    /// per baseline unit, as in [`CostParameters`].
    fn cost(
        &self,
        params: &CostParameters,
        years: Real,
        scale: Real,
        transactions_per_year: Real,
    ) -> Real;
}

/// No in-house baseline: cost is zero and in-house ROI is undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NoInHouseCost;

impl InHouseCostModel for NoInHouseCost {
    fn name(&self) -> &'static str {
        "none"
    }

    fn cost(&self, _: &CostParameters, _: Real, _: Real, _: Real) -> Real {
        0.0
    }
}

/// Building the platform in-house: a fixed setup cost and a fixed yearly
/// run cost that do not scale with card volume, plus the same
/// per-transaction cost the IaaS model pays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildCost {
    pub setup: Real,
    pub per_year: Real,
}

impl Default for BuildCost {
    fn default() -> Self {
        Self {
            setup: 3_200_000.0,
            per_year: 1_340_000.0,
        }
    }
}

impl InHouseCostModel for BuildCost {
    fn name(&self) -> &'static str {
        "build"
    }

    fn cost(
        &self,
        params: &CostParameters,
        years: Real,
        scale: Real,
        transactions_per_year: Real,
    ) -> Real {
        self.setup
            + self.per_year * years
            + params.transaction_term(transactions_per_year, years) * scale
    }
}

/// Configurable choice of in-house model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum InHouseModel {
    None,
    Build(BuildCost),
}

impl Default for InHouseModel {
    fn default() -> Self {
        InHouseModel::Build(BuildCost::default())
    }
}

impl InHouseCostModel for InHouseModel {
    fn name(&self) -> &'static str {
        match self {
            InHouseModel::None => NoInHouseCost.name(),
            InHouseModel::Build(build) => build.name(),
        }
    }

    fn cost(
        &self,
        params: &CostParameters,
        years: Real,
        scale: Real,
        transactions_per_year: Real,
    ) -> Real {
        match self {
            InHouseModel::None => NoInHouseCost.cost(params, years, scale, transactions_per_year),
            InHouseModel::Build(build) => build.cost(params, years, scale, transactions_per_year),
        }
    }
}

impl fmt::Display for InHouseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InHouseModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "zero" => Ok(InHouseModel::None),
            "build" => Ok(InHouseModel::default()),
            other => Err(format!(
                "unknown in-house model '{other}' (expected 'build' or 'none')"
            )),
        }
    }
}
