//! Cost and revenue constants.

use roi_core::Real;
use roi_input::{CardType, FeatureSet};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Bumped whenever a default constant changes, so archived projections
/// computed with older constants get distinct IDs.
pub const PARAMETERS_VERSION: &str = "2024.1";

/// Constants of the per-year cost and revenue formulas.
///
/// All IaaS terms are quoted per `baseline_cards` cards and scaled linearly
/// by `cards / baseline_cards`. Missing keys in a parameter file keep their
/// default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostParameters {
    pub baseline_cards: Real,
    pub opex_base: Real,
    pub opex_per_feature: Real,
    pub capex_virtual: Real,
    pub capex_physical: Real,
    pub transaction_cost: Real,
    /// Transactions per year for `baseline_cards` cards.
    pub transactions_per_year: Real,
    pub average_ticket: Real,
    pub primary_fee_rate: Real,
    pub primary_fee_share: Real,
    pub secondary_fee_rate: Real,
    pub markup: Real,
}

impl Default for CostParameters {
    fn default() -> Self {
        Self {
            baseline_cards: 10_000.0,
            opex_base: 44_000.0,
            opex_per_feature: 1_000.0,
            capex_virtual: 365_000.0,
            capex_physical: 415_000.0,
            transaction_cost: 0.14,
            // 0.5 transactions per card per day over 10,000 cards
            transactions_per_year: 1_825_000.0,
            average_ticket: 50.0,
            primary_fee_rate: 0.018,
            primary_fee_share: 0.8,
            secondary_fee_rate: 0.013,
            markup: 1.015,
        }
    }
}

impl CostParameters {
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("baseline_cards", self.baseline_cards),
            ("opex_base", self.opex_base),
            ("opex_per_feature", self.opex_per_feature),
            ("capex_virtual", self.capex_virtual),
            ("capex_physical", self.capex_physical),
            ("transaction_cost", self.transaction_cost),
            ("transactions_per_year", self.transactions_per_year),
            ("average_ticket", self.average_ticket),
            ("primary_fee_rate", self.primary_fee_rate),
            ("primary_fee_share", self.primary_fee_share),
            ("secondary_fee_rate", self.secondary_fee_rate),
            ("markup", self.markup),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::Parameters {
                    what: format!("{name} must be a finite non-negative number (got {value})"),
                });
            }
        }
        if self.baseline_cards == 0.0 {
            return Err(EngineError::Parameters {
                what: "baseline_cards must be greater than zero".to_string(),
            });
        }
        if self.primary_fee_share > 1.0 {
            return Err(EngineError::Parameters {
                what: format!(
                    "primary_fee_share must not exceed 1 (got {})",
                    self.primary_fee_share
                ),
            });
        }
        Ok(())
    }

    /// Volume factor: card count normalized to the baseline unit.
    pub fn scale(&self, cards: Real) -> Real {
        cards / self.baseline_cards
    }

    /// Capital constant for a card type. `Both` carries both programmes.
    pub fn capex(&self, card_type: CardType) -> Real {
        match card_type {
            CardType::Virtual => self.capex_virtual,
            CardType::Physical => self.capex_physical,
            CardType::Both => self.capex_virtual + self.capex_physical,
        }
    }

    /// Yearly opex. Only the number of selected features matters.
    pub fn opex(&self, features: &FeatureSet) -> Real {
        self.opex_base + self.opex_per_feature * features.len() as Real
    }

    /// Blended per-transaction take rate across the two fee tiers.
    pub fn take_rate(&self) -> Real {
        self.primary_fee_share * self.primary_fee_rate
            + (1.0 - self.primary_fee_share) * self.secondary_fee_rate
    }

    /// Cumulative transaction cost after `years` at `transactions_per_year`.
    pub fn transaction_term(&self, transactions_per_year: Real, years: Real) -> Real {
        self.transaction_cost * transactions_per_year * years
    }

    /// IaaS cost after `years`, before volume scaling.
    pub fn iaas_unscaled_cost(
        &self,
        card_type: CardType,
        features: &FeatureSet,
        transactions_per_year: Real,
        years: Real,
    ) -> Real {
        self.capex(card_type)
            + self.opex(features) * years
            + self.transaction_term(transactions_per_year, years)
    }

    /// Revenue after `years`, before volume scaling.
    pub fn unscaled_income(&self, transactions_per_year: Real, years: Real) -> Real {
        years * transactions_per_year * self.average_ticket * self.take_rate() * self.markup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roi_core::{Tolerances, nearly_equal};

    #[test]
    fn defaults_are_valid() {
        CostParameters::default().validate().unwrap();
    }

    #[test]
    fn take_rate_blends_fee_tiers() {
        let params = CostParameters::default();
        assert!(nearly_equal(
            params.take_rate(),
            0.017,
            Tolerances::default()
        ));
    }

    #[test]
    fn capex_for_both_is_sum_of_programmes() {
        let params = CostParameters::default();
        assert_eq!(params.capex(CardType::Virtual), 365_000.0);
        assert_eq!(params.capex(CardType::Physical), 415_000.0);
        assert_eq!(params.capex(CardType::Both), 780_000.0);
    }

    #[test]
    fn opex_counts_features() {
        let params = CostParameters::default();
        assert_eq!(params.opex(&FeatureSet::new()), 44_000.0);
        let two = FeatureSet::from_labels(&["FX", "Rewards"]);
        assert_eq!(params.opex(&two), 46_000.0);
    }

    #[test]
    fn rejects_zero_baseline() {
        let params = CostParameters {
            baseline_cards: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(EngineError::Parameters { .. })
        ));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let params: CostParameters = serde_yaml::from_str("opex_base: 50000\n").unwrap();
        assert_eq!(params.opex_base, 50_000.0);
        assert_eq!(params.capex_virtual, 365_000.0);
    }
}
