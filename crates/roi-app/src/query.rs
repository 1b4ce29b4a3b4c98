//! Query helpers over computed projections.

use roi_core::Real;
use roi_engine::RoiResult;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Names accepted by [`extract_series`].
pub const SERIES_NAMES: [&str; 7] = [
    "incomes",
    "costs.in_house",
    "costs.iaas",
    "net.in_house",
    "net.iaas",
    "roi.in_house",
    "roi.iaas",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSummary {
    pub year_count: usize,
    pub year_range: Option<(u32, u32)>,
    /// First year whose net is positive, per deployment model.
    pub breakeven_year_in_house: Option<u32>,
    pub breakeven_year_iaas: Option<u32>,
    pub final_roi_in_house: Option<Real>,
    pub final_roi_iaas: Option<Real>,
    /// Sum over all years of in-house cost minus IaaS cost.
    pub total_savings_vs_in_house: Real,
}

pub fn summarize(result: &RoiResult) -> ProjectionSummary {
    let first_positive = |net: &[Real]| {
        result
            .years
            .iter()
            .zip(net)
            .find(|(_, n)| **n > 0.0)
            .map(|(y, _)| *y)
    };

    let total_savings_vs_in_house = result
        .costs
        .in_house
        .iter()
        .zip(&result.costs.iaas)
        .map(|(in_house, iaas)| in_house - iaas)
        .sum();

    ProjectionSummary {
        year_count: result.len(),
        year_range: result.years.first().copied().zip(result.years.last().copied()),
        breakeven_year_in_house: first_positive(&result.net.in_house),
        breakeven_year_iaas: first_positive(&result.net.iaas),
        final_roi_in_house: result.roi.in_house.last().copied().flatten(),
        final_roi_iaas: result.roi.iaas.last().copied().flatten(),
        total_savings_vs_in_house,
    }
}

/// `(year, value)` pairs for a named series. Years with an undefined ROI
/// are skipped.
pub fn extract_series(result: &RoiResult, name: &str) -> AppResult<Vec<(u32, Real)>> {
    let plain = |values: &[Real]| -> Vec<(u32, Real)> {
        result.years.iter().copied().zip(values.iter().copied()).collect()
    };
    let optional = |values: &[Option<Real>]| -> Vec<(u32, Real)> {
        result
            .years
            .iter()
            .zip(values)
            .filter_map(|(y, v)| v.map(|v| (*y, v)))
            .collect()
    };

    let series = match name {
        "incomes" | "income" => plain(&result.incomes),
        "costs.in_house" => plain(&result.costs.in_house),
        "costs.iaas" => plain(&result.costs.iaas),
        "net.in_house" => plain(&result.net.in_house),
        "net.iaas" => plain(&result.net.iaas),
        "roi.in_house" => optional(&result.roi.in_house),
        "roi.iaas" => optional(&result.roi.iaas),
        _ => {
            return Err(AppError::InvalidInput(format!(
                "Unknown series: {} (expected one of: {})",
                name,
                SERIES_NAMES.join(", ")
            )));
        }
    };

    Ok(series)
}
