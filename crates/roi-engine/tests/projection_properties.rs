//! Properties every projection must satisfy.

use std::collections::BTreeMap;

use proptest::prelude::*;
use roi_engine::{
    CostParameters, InHouseModel, ProjectionModel, RoiResult, compute_automatic_projection,
    compute_manual_projection,
};
use roi_input::{AutomaticInput, CardType, FeatureSet, Feature, ManualInput};

fn card_type() -> impl Strategy<Value = CardType> {
    prop_oneof![
        Just(CardType::Virtual),
        Just(CardType::Physical),
        Just(CardType::Both)
    ]
}

fn features() -> impl Strategy<Value = FeatureSet> {
    prop::collection::vec(0usize..Feature::CATALOG.len(), 0..6)
        .prop_map(|idx| idx.into_iter().map(|i| Feature::CATALOG[i]).collect())
}

fn automatic() -> impl Strategy<Value = AutomaticInput> {
    (
        1u32..40,
        1u64..500_000,
        0u64..500_000,
        0.1f64..4.0,
        card_type(),
        features(),
    )
        .prop_map(|(years, start, extra, rate, card_type, features)| AutomaticInput {
            projection_years: years,
            target_card_count: start + extra,
            starting_card_count: start,
            growth_rate: rate,
            card_type,
            features,
        })
}

fn manual() -> impl Strategy<Value = ManualInput> {
    (
        prop::collection::btree_map(1u32..200, 0u64..1_000_000, 1..20),
        card_type(),
        features(),
    )
        .prop_map(|(cards_by_year, card_type, features)| ManualInput {
            cards_by_year,
            card_type,
            features,
        })
}

fn assert_aligned(result: &RoiResult) {
    let n = result.years.len();
    assert_eq!(result.incomes.len(), n);
    assert_eq!(result.costs.in_house.len(), n);
    assert_eq!(result.costs.iaas.len(), n);
    assert_eq!(result.net.in_house.len(), n);
    assert_eq!(result.net.iaas.len(), n);
    assert_eq!(result.roi.in_house.len(), n);
    assert_eq!(result.roi.iaas.len(), n);
}

proptest! {
    #[test]
    fn automatic_years_are_one_through_horizon(input in automatic()) {
        let result = compute_automatic_projection(&input).unwrap();
        let expected: Vec<u32> = (1..=input.projection_years).collect();
        prop_assert_eq!(&result.years, &expected);
        assert_aligned(&result);
    }

    #[test]
    fn manual_years_are_sorted_keys(input in manual()) {
        let result = compute_manual_projection(&input).unwrap();
        let expected: Vec<u32> = input.cards_by_year.keys().copied().collect();
        prop_assert_eq!(&result.years, &expected);
        prop_assert!(result.years.windows(2).all(|w| w[0] < w[1]));
        assert_aligned(&result);
    }

    #[test]
    fn projections_are_idempotent(input in automatic()) {
        let a = compute_automatic_projection(&input).unwrap();
        let b = compute_automatic_projection(&input).unwrap();
        let a_json = serde_json::to_string(&a).unwrap();
        let b_json = serde_json::to_string(&b).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(a_json, b_json);
    }

    #[test]
    fn both_card_types_cost_at_least_virtual(input in automatic().prop_filter(
        "growth of at least one",
        |i| i.growth_rate >= 1.0,
    )) {
        let mut virt = input.clone();
        virt.card_type = CardType::Virtual;
        let mut both = input;
        both.card_type = CardType::Both;

        let v = compute_automatic_projection(&virt).unwrap();
        let b = compute_automatic_projection(&both).unwrap();
        for i in 0..v.years.len() {
            prop_assert!(b.costs.iaas[i] >= v.costs.iaas[i]);
            prop_assert!(b.incomes[i] >= v.incomes[i]);
        }
    }

    #[test]
    fn features_never_lower_cost(input in manual()) {
        let mut bare = input.clone();
        bare.features = FeatureSet::new();

        let with = compute_manual_projection(&input).unwrap();
        let without = compute_manual_projection(&bare).unwrap();
        for i in 0..with.years.len() {
            prop_assert!(without.costs.iaas[i] <= with.costs.iaas[i]);
        }
    }

    #[test]
    fn roi_is_never_nan_or_infinite(input in manual()) {
        let model = ProjectionModel::new(CostParameters::default(), InHouseModel::None).unwrap();
        let result = model.manual(&input).unwrap();
        for roi in result.roi.iaas.iter().chain(result.roi.in_house.iter()) {
            if let Some(value) = roi {
                prop_assert!(value.is_finite());
            }
        }
    }
}

#[test]
fn manual_schedule_ignores_insertion_order() {
    let mut forward = BTreeMap::new();
    forward.insert(1, 10_000);
    forward.insert(5, 40_000);
    forward.insert(3, 20_000);
    let reversed: BTreeMap<u32, u64> = forward.iter().rev().map(|(k, v)| (*k, *v)).collect();

    let a = compute_manual_projection(&ManualInput {
        cards_by_year: forward,
        card_type: CardType::Virtual,
        features: FeatureSet::new(),
    })
    .unwrap();
    let b = compute_manual_projection(&ManualInput {
        cards_by_year: reversed,
        card_type: CardType::Virtual,
        features: FeatureSet::new(),
    })
    .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.years, vec![1, 3, 5]);
}
