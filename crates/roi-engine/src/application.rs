//! Month-by-month IaaS estimate attached to an application form.

use roi_core::{Real, ensure_finite, percent_of};
use roi_input::ApplicationInput;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::params::CostParameters;

/// Cumulative IaaS figures at one point of the application timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// Elapsed time in years (`month / 12`).
    pub years: Real,
    pub transactions_per_year: Real,
    pub total_cost_iaas: Real,
    pub revenue_iaas: Real,
    pub net_iaas: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEstimate {
    pub estimated_setup_cost: Option<i64>,
    pub estimated_monthly_cost: Option<i64>,
    pub in_house_setup_cost: i64,
    pub in_house_monthly_cost: i64,
    pub annual_savings: Option<i64>,
    pub breakeven_months: Option<u32>,
    #[serde(rename = "threeYearROI")]
    pub three_year_roi: Option<i64>,
    pub costs_revenues_timeline: Option<Vec<TimelinePoint>>,
}

/// Evaluate the IaaS formulas at the end of every month of the timeline
/// and summarize the final month.
///
/// Unlike the yearly projections, the transaction volume comes from the
/// application itself and is not scaled per baseline unit.
pub fn estimate_application(
    input: &ApplicationInput,
    params: &CostParameters,
) -> EngineResult<ApplicationEstimate> {
    params.validate()?;

    let months = input.months.max(1);
    let scale = params.scale(input.cards);
    let n = input.transactions_per_year;

    let mut timeline = Vec::with_capacity(months as usize);
    for month in 1..=months {
        let years = Real::from(month) / 12.0;
        let total_cost_iaas =
            params.iaas_unscaled_cost(input.card_type, &input.features, n, years) * scale;
        let revenue_iaas = params.unscaled_income(n, years) * scale;
        timeline.push(TimelinePoint {
            years,
            transactions_per_year: n,
            total_cost_iaas: ensure_finite(total_cost_iaas, "total_cost_iaas")?,
            revenue_iaas: ensure_finite(revenue_iaas, "revenue_iaas")?,
            net_iaas: revenue_iaas - total_cost_iaas,
        });
    }

    let span_years = Real::from(months) / 12.0;
    let last = timeline.last().cloned();
    let last = last.as_ref();
    let estimate = ApplicationEstimate {
        estimated_setup_cost: last.map(|p| round(p.total_cost_iaas)),
        estimated_monthly_cost: last.map(|p| round(p.total_cost_iaas / Real::from(months))),
        in_house_setup_cost: 0,
        in_house_monthly_cost: 0,
        annual_savings: last.map(|p| round(p.net_iaas / span_years)),
        breakeven_months: last.filter(|p| p.net_iaas > 0.0).map(|_| 12),
        three_year_roi: last
            .filter(|p| p.revenue_iaas > 0.0)
            .and_then(|p| percent_of(p.net_iaas, p.total_cost_iaas))
            .map(round),
        costs_revenues_timeline: (!timeline.is_empty()).then_some(timeline),
    };
    Ok(estimate)
}

fn round(value: Real) -> i64 {
    value.round() as i64
}
