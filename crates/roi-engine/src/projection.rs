//! Year-by-year projection for both growth models.

use roi_core::{Real, ensure_finite, percent_of};
use roi_input::{
    AutomaticInput, CardType, FeatureSet, ManualInput, RoiInput, ValidationError,
    MAX_PROJECTION_YEARS,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::growth::automatic_card_curve;
use crate::in_house::{InHouseCostModel, InHouseModel};
use crate::params::CostParameters;

/// One series per deployment model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSeries<T> {
    pub in_house: Vec<T>,
    pub iaas: Vec<T>,
}

/// Year-indexed projection. Index `i` of every series refers to `years[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub years: Vec<u32>,
    pub incomes: Vec<Real>,
    pub costs: ModelSeries<Real>,
    pub net: ModelSeries<Real>,
    /// `None` (serialized as `null`) where the cost is zero.
    pub roi: ModelSeries<Option<Real>>,
}

impl RoiResult {
    fn with_capacity(n: usize) -> Self {
        Self {
            years: Vec::with_capacity(n),
            incomes: Vec::with_capacity(n),
            costs: ModelSeries {
                in_house: Vec::with_capacity(n),
                iaas: Vec::with_capacity(n),
            },
            net: ModelSeries {
                in_house: Vec::with_capacity(n),
                iaas: Vec::with_capacity(n),
            },
            roi: ModelSeries {
                in_house: Vec::with_capacity(n),
                iaas: Vec::with_capacity(n),
            },
        }
    }

    fn push(&mut self, figures: &YearFigures) {
        self.years.push(figures.year);
        self.incomes.push(figures.income);
        self.costs.in_house.push(figures.cost_in_house);
        self.costs.iaas.push(figures.cost_iaas);
        self.net.in_house.push(figures.net_in_house());
        self.net.iaas.push(figures.net_iaas());
        self.roi.in_house.push(figures.roi_in_house());
        self.roi.iaas.push(figures.roi_iaas());
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Figures for the `index`-th projected year.
    pub fn figures(&self, index: usize) -> Option<YearFigures> {
        Some(YearFigures {
            year: *self.years.get(index)?,
            cards: None,
            income: *self.incomes.get(index)?,
            cost_in_house: *self.costs.in_house.get(index)?,
            cost_iaas: *self.costs.iaas.get(index)?,
        })
    }

    /// True when every series has one entry per year.
    pub fn is_aligned(&self) -> bool {
        let n = self.years.len();
        [
            self.incomes.len(),
            self.costs.in_house.len(),
            self.costs.iaas.len(),
            self.net.in_house.len(),
            self.net.iaas.len(),
            self.roi.in_house.len(),
            self.roi.iaas.len(),
        ]
        .iter()
        .all(|&len| len == n)
    }
}

/// Income and costs of a single projected year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearFigures {
    pub year: u32,
    /// Card count the figures were computed for, when known.
    pub cards: Option<u64>,
    pub income: Real,
    pub cost_in_house: Real,
    pub cost_iaas: Real,
}

impl YearFigures {
    pub fn net_in_house(&self) -> Real {
        self.income - self.cost_in_house
    }

    pub fn net_iaas(&self) -> Real {
        self.income - self.cost_iaas
    }

    pub fn roi_in_house(&self) -> Option<Real> {
        percent_of(self.net_in_house(), self.cost_in_house)
    }

    pub fn roi_iaas(&self) -> Option<Real> {
        percent_of(self.net_iaas(), self.cost_iaas)
    }
}

/// Cost constants plus the in-house comparison model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionModel {
    params: CostParameters,
    in_house: InHouseModel,
}

impl ProjectionModel {
    pub fn new(params: CostParameters, in_house: InHouseModel) -> EngineResult<Self> {
        params.validate()?;
        Ok(Self { params, in_house })
    }

    pub fn params(&self) -> &CostParameters {
        &self.params
    }

    pub fn in_house(&self) -> &InHouseModel {
        &self.in_house
    }

    pub fn project(&self, input: &RoiInput) -> EngineResult<RoiResult> {
        match input {
            RoiInput::Automatic(auto) => self.automatic(auto),
            RoiInput::Manual(manual) => self.manual(manual),
        }
    }

    /// Projection over `1..=projection_years` along the automatic growth curve.
    pub fn automatic(&self, input: &AutomaticInput) -> EngineResult<RoiResult> {
        check_automatic(input)?;
        let curve = automatic_card_curve(input);
        tracing::trace!(years = input.projection_years, ?curve, "automatic card curve");
        let schedule = (1..=input.projection_years).zip(curve);
        self.run(schedule, input.card_type, &input.features)
    }

    /// Projection over the supplied years, in ascending order.
    pub fn manual(&self, input: &ManualInput) -> EngineResult<RoiResult> {
        check_manual(input)?;
        let schedule = input
            .cards_by_year
            .iter()
            .map(|(&year, &cards)| (year, cards));
        self.run(schedule, input.card_type, &input.features)
    }

    /// Income and costs for `cards` cards after `year` years.
    pub fn year_figures(
        &self,
        year: u32,
        cards: u64,
        card_type: CardType,
        features: &FeatureSet,
    ) -> EngineResult<YearFigures> {
        let params = &self.params;
        let elapsed = Real::from(year);
        let scale = params.scale(cards as Real);
        let n = params.transactions_per_year;

        let cost_iaas = params.iaas_unscaled_cost(card_type, features, n, elapsed) * scale;
        let income = params.unscaled_income(n, elapsed) * scale;
        let cost_in_house = self.in_house.cost(params, elapsed, scale, n);

        Ok(YearFigures {
            year,
            cards: Some(cards),
            income: ensure_finite(income, "income")?,
            cost_in_house: ensure_finite(cost_in_house, "in-house cost")?,
            cost_iaas: ensure_finite(cost_iaas, "iaas cost")?,
        })
    }

    fn run<I>(
        &self,
        schedule: I,
        card_type: CardType,
        features: &FeatureSet,
    ) -> EngineResult<RoiResult>
    where
        I: Iterator<Item = (u32, u64)>,
    {
        let mut result = RoiResult::with_capacity(schedule.size_hint().0);
        for (year, cards) in schedule {
            let figures = self.year_figures(year, cards, card_type, features)?;
            result.push(&figures);
        }
        debug_assert!(result.is_aligned());
        Ok(result)
    }
}

/// Automatic projection with the default constants and in-house model.
pub fn compute_automatic_projection(input: &AutomaticInput) -> EngineResult<RoiResult> {
    ProjectionModel::default().automatic(input)
}

/// Manual projection with the default constants and in-house model.
pub fn compute_manual_projection(input: &ManualInput) -> EngineResult<RoiResult> {
    ProjectionModel::default().manual(input)
}

pub fn compute_projection(input: &RoiInput) -> EngineResult<RoiResult> {
    ProjectionModel::default().project(input)
}

fn check_automatic(input: &AutomaticInput) -> Result<(), ValidationError> {
    if input.projection_years == 0 {
        return Err(ValidationError::NotPositive {
            field: "years",
            value: "0".to_string(),
        });
    }
    if input.projection_years > MAX_PROJECTION_YEARS {
        return Err(ValidationError::OutOfRange {
            field: "years",
            value: input.projection_years.to_string(),
            reason: "projection horizon is limited to 1000 years",
        });
    }
    if input.target_card_count == 0 {
        return Err(ValidationError::NotPositive {
            field: "cards_number",
            value: "0".to_string(),
        });
    }
    if input.starting_card_count == 0 {
        return Err(ValidationError::NotPositive {
            field: "starting_number",
            value: "0".to_string(),
        });
    }
    if !input.growth_rate.is_finite() || input.growth_rate <= 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "expected_cards_growth_rate",
            value: input.growth_rate.to_string(),
            reason: "must be a finite number greater than zero",
        });
    }
    Ok(())
}

fn check_manual(input: &ManualInput) -> Result<(), ValidationError> {
    const FIELD: &str = "explicit_cards_number";
    if input.cards_by_year.is_empty() {
        return Err(ValidationError::Empty { field: FIELD });
    }
    if input.cards_by_year.contains_key(&0) {
        return Err(ValidationError::InvalidYear {
            field: FIELD,
            key: "0".to_string(),
        });
    }
    Ok(())
}
