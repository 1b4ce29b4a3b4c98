//! Content-based hashing for projection IDs.

use roi_engine::{CostParameters, InHouseModel};
use roi_input::RoiInput;
use sha2::{Digest, Sha256};

use crate::ResultsResult;

/// SHA-256 over the normalized input, the cost constants, and the
/// in-house model. Identical requests map to the same ID.
pub fn compute_projection_id(
    input: &RoiInput,
    params: &CostParameters,
    in_house: &InHouseModel,
    parameters_version: &str,
) -> ResultsResult<String> {
    let mut hasher = Sha256::new();

    hasher.update(serde_json::to_string(input)?.as_bytes());
    hasher.update(serde_json::to_string(params)?.as_bytes());
    hasher.update(serde_json::to_string(in_house)?.as_bytes());
    hasher.update(parameters_version.as_bytes());

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roi_input::{AutomaticInput, CardType, FeatureSet};

    fn input(card_type: CardType, features: &[&str]) -> RoiInput {
        RoiInput::Automatic(AutomaticInput {
            projection_years: 3,
            target_card_count: 50_000,
            starting_card_count: 5_000,
            growth_rate: 1.5,
            card_type,
            features: FeatureSet::from_labels(features),
        })
    }

    #[test]
    fn hash_stability() {
        let params = CostParameters::default();
        let model = InHouseModel::default();
        let a = compute_projection_id(&input(CardType::Virtual, &["FX"]), &params, &model, "v1")
            .unwrap();
        let b = compute_projection_id(&input(CardType::Virtual, &["FX"]), &params, &model, "v1")
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn feature_order_does_not_change_id() {
        let params = CostParameters::default();
        let model = InHouseModel::default();
        let a = compute_projection_id(
            &input(CardType::Both, &["FX", "Analytics"]),
            &params,
            &model,
            "v1",
        )
        .unwrap();
        let b = compute_projection_id(
            &input(CardType::Both, &["Analytics", "FX"]),
            &params,
            &model,
            "v1",
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let params = CostParameters::default();
        let model = InHouseModel::default();
        let virt = compute_projection_id(&input(CardType::Virtual, &[]), &params, &model, "v1")
            .unwrap();
        let phys = compute_projection_id(&input(CardType::Physical, &[]), &params, &model, "v1")
            .unwrap();
        let other_model =
            compute_projection_id(&input(CardType::Virtual, &[]), &params, &InHouseModel::None, "v1")
                .unwrap();
        let other_version =
            compute_projection_id(&input(CardType::Virtual, &[]), &params, &model, "v2").unwrap();
        assert_ne!(virt, phys);
        assert_ne!(virt, other_model);
        assert_ne!(virt, other_version);
    }
}
