//! Card-count curve for the automatic growth model.

use roi_core::Real;
use roi_input::AutomaticInput;

/// Card count for each year `1..=projection_years`.
///
/// Counts compound from `starting_card_count` at `growth_rate` per year
/// (rates below 1 are treated as 1 so the curve never shrinks), are capped
/// at `target_card_count`, and the final year lands exactly on the target.
/// When the target is below the starting count every year sits at the
/// target. Fractional cards are truncated.
pub fn automatic_card_curve(input: &AutomaticInput) -> Vec<u64> {
    let start = input.starting_card_count as Real;
    let target = input.target_card_count as Real;
    let rate = input.growth_rate.max(1.0);
    let last = input.projection_years;
    let pins_target = input.target_card_count >= input.starting_card_count;

    (1..=last)
        .map(|year| {
            if year == last && pins_target {
                return input.target_card_count;
            }
            let exponent = i32::try_from(year - 1).unwrap_or(i32::MAX);
            let grown = start * rate.powi(exponent);
            grown.min(target).floor() as u64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use roi_input::{CardType, FeatureSet};

    fn input(years: u32, start: u64, target: u64, rate: f64) -> AutomaticInput {
        AutomaticInput {
            projection_years: years,
            target_card_count: target,
            starting_card_count: start,
            growth_rate: rate,
            card_type: CardType::Virtual,
            features: FeatureSet::new(),
        }
    }

    #[test]
    fn compounds_then_caps_at_target() {
        let curve = automatic_card_curve(&input(5, 5_000, 50_000, 2.0));
        assert_eq!(curve, vec![5_000, 10_000, 20_000, 40_000, 50_000]);
    }

    #[test]
    fn final_year_reaches_target_with_slow_growth() {
        let curve = automatic_card_curve(&input(3, 5_000, 50_000, 1.5));
        assert_eq!(curve, vec![5_000, 7_500, 50_000]);
    }

    #[test]
    fn single_year_is_the_target() {
        assert_eq!(
            automatic_card_curve(&input(1, 10_000, 10_000, 1.0)),
            vec![10_000]
        );
    }

    #[test]
    fn shrinking_rate_is_flat() {
        let curve = automatic_card_curve(&input(4, 1_000, 5_000, 0.5));
        assert_eq!(curve, vec![1_000, 1_000, 1_000, 5_000]);
    }

    #[test]
    fn target_below_start_holds_target() {
        let curve = automatic_card_curve(&input(3, 9_000, 4_000, 2.0));
        assert_eq!(curve, vec![4_000, 4_000, 4_000]);
    }

    #[test]
    fn huge_rate_does_not_overflow() {
        let curve = automatic_card_curve(&input(400, 1, 1_000_000, 1e6));
        assert_eq!(curve.len(), 400);
        assert!(curve.iter().all(|&c| c <= 1_000_000));
    }

    proptest! {
        #[test]
        fn curve_is_monotone_and_anchored(
            years in 1u32..60,
            start in 1u64..1_000_000,
            extra in 0u64..1_000_000,
            rate in 0.01f64..5.0,
        ) {
            let target = start + extra;
            let curve = automatic_card_curve(&input(years, start, target, rate));
            prop_assert_eq!(curve.len(), years as usize);
            prop_assert!(curve.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(*curve.last().unwrap(), target);
            if years > 1 {
                prop_assert_eq!(curve[0], start);
            }
        }
    }
}
