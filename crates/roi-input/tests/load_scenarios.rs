use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use roi_input::{CardType, Feature, InputError, RoiInput, load_application, load_scenario};

fn write_temp(name: &str, content: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("roi_input_{nanos}"));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn yaml_manual_scenario_with_integer_years() {
    let path = write_temp(
        "manual.yaml",
        r#"
calculationType: manual
cardType: Physical
features: [Rewards, Analytics]
explicit_cards_number:
  2: 5000
  1: 0
"#,
    );

    let input = load_scenario(&path).unwrap();
    match input {
        RoiInput::Manual(manual) => {
            assert_eq!(manual.cards_by_year.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
            assert_eq!(manual.cards_by_year[&2], 5000);
            assert_eq!(manual.card_type, CardType::Physical);
            assert_eq!(manual.features.len(), 2);
        }
        other => panic!("expected manual input, got {other:?}"),
    }
}

#[test]
fn json_auto_scenario() {
    let path = write_temp(
        "auto.json",
        r#"{
            "calculationType": "auto",
            "years": 5,
            "cards_number": 50000,
            "cardType": "Both",
            "features": ["FX"],
            "starting_number": 5000,
            "growth_rate": 1.8
        }"#,
    );

    match load_scenario(&path).unwrap() {
        RoiInput::Automatic(auto) => {
            assert_eq!(auto.projection_years, 5);
            assert_eq!(auto.target_card_count, 50_000);
            assert_eq!(auto.card_type, CardType::Both);
            assert!(auto.features.iter().any(|f| f == Feature::Fx));
        }
        other => panic!("expected automatic input, got {other:?}"),
    }
}

#[test]
fn invalid_scenario_reports_the_field() {
    let path = write_temp(
        "bad.yaml",
        r#"
calculationType: auto
years: 0
cards_number: 100
cardType: Virtual
starting_number: 10
expected_cards_growth_rate: 1.2
"#,
    );

    match load_scenario(&path).unwrap_err() {
        InputError::Validation(err) => assert_eq!(err.field(), "years"),
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn missing_discriminator_is_a_parse_error() {
    let path = write_temp("untagged.json", r#"{ "years": 3 }"#);
    assert!(matches!(load_scenario(&path), Err(InputError::Json(_))));
}

#[test]
fn application_defaults_apply() {
    let path = write_temp(
        "application.json",
        r#"{ "cardType": "Virtual", "timeline": "6 months" }"#,
    );
    let input = load_application(&path).unwrap();
    assert_eq!(input.cards, 1.0);
    assert_eq!(input.transactions_per_year, 1.0);
    assert_eq!(input.months, 6);
}
