//! Request validation and normalization.

use std::collections::BTreeMap;

use crate::catalog::{CardType, FeatureSet};
use crate::normalized::{ApplicationInput, AutomaticInput, ManualInput, RoiInput};
use crate::schema::{ApplicationRequest, AutoRoiRequest, ManualRoiRequest, RoiRequest, YearKey};

/// Upper bound on the automatic projection horizon.
pub const MAX_PROJECTION_YEARS: u32 = 1_000;

/// Upper bound on the application estimate timeline.
pub const MAX_APPLICATION_MONTHS: u32 = 1_200;

/// Upper bound on the card count of an application form. Together with
/// [`MAX_MONTHLY_VOLUME`] and [`MAX_APPLICATION_MONTHS`] it keeps every
/// rounded estimate figure within `i64`.
pub const MAX_APPLICATION_CARDS: f64 = 1e8;

/// Upper bound on the monthly transaction volume of an application form.
pub const MAX_MONTHLY_VOLUME: f64 = 1e9;

const CARD_TYPE_NAMES: &str = "Virtual, Physical, Both";

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a positive integer (got {value})")]
    NotPositive { field: &'static str, value: String },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: String },

    #[error("{field} must be one of {expected} (got '{value}')")]
    UnknownVariant {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is out of range: {value} ({reason})")]
    OutOfRange {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("{field} has an invalid year '{key}'")]
    InvalidYear { field: &'static str, key: String },

    #[error("{field} lists year {year} more than once")]
    DuplicateYear { field: &'static str, year: u32 },
}

impl ValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotPositive { field, .. }
            | ValidationError::Negative { field, .. }
            | ValidationError::UnknownVariant { field, .. }
            | ValidationError::Empty { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidYear { field, .. }
            | ValidationError::DuplicateYear { field, .. } => field,
        }
    }
}

pub fn validate_request(request: &RoiRequest) -> Result<RoiInput, ValidationError> {
    match request {
        RoiRequest::Auto(auto) => validate_auto(auto).map(RoiInput::Automatic),
        RoiRequest::Manual(manual) => validate_manual(manual).map(RoiInput::Manual),
    }
}

pub fn validate_auto(request: &AutoRoiRequest) -> Result<AutomaticInput, ValidationError> {
    let card_type = parse_card_type(&request.card_type)?;

    let projection_years = positive_u32("years", request.years)?;
    if projection_years > MAX_PROJECTION_YEARS {
        return Err(ValidationError::OutOfRange {
            field: "years",
            value: request.years.to_string(),
            reason: "projection horizon is limited to 1000 years",
        });
    }

    let target_card_count = positive_u64("cards_number", request.cards_number)?;
    let starting_card_count = positive_u64("starting_number", request.starting_number)?;

    let growth_rate = request.expected_cards_growth_rate;
    if !growth_rate.is_finite() || growth_rate <= 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "expected_cards_growth_rate",
            value: growth_rate.to_string(),
            reason: "must be a finite number greater than zero",
        });
    }

    Ok(AutomaticInput {
        projection_years,
        target_card_count,
        starting_card_count,
        growth_rate,
        card_type,
        features: FeatureSet::from_labels(&request.features),
    })
}

pub fn validate_manual(request: &ManualRoiRequest) -> Result<ManualInput, ValidationError> {
    const FIELD: &str = "explicit_cards_number";

    let card_type = parse_card_type(&request.card_type)?;

    if request.explicit_cards_number.is_empty() {
        return Err(ValidationError::Empty { field: FIELD });
    }

    let mut cards_by_year = BTreeMap::new();
    for (key, &count) in &request.explicit_cards_number {
        let year = parse_year(key).ok_or_else(|| ValidationError::InvalidYear {
            field: FIELD,
            key: key.to_string(),
        })?;
        if count < 0 {
            return Err(ValidationError::Negative {
                field: FIELD,
                value: format!("year {year}: {count}"),
            });
        }
        // "1" and "01" are distinct keys on the wire but the same year.
        if cards_by_year.insert(year, count as u64).is_some() {
            return Err(ValidationError::DuplicateYear { field: FIELD, year });
        }
    }

    Ok(ManualInput {
        cards_by_year,
        card_type,
        features: FeatureSet::from_labels(&request.features),
    })
}

pub fn validate_application(
    request: &ApplicationRequest,
) -> Result<ApplicationInput, ValidationError> {
    let card_type = match request.card_type.as_deref() {
        None | Some("") => CardType::Virtual,
        Some(name) => parse_card_type(name)?,
    };

    let cards = bounded(
        "numberOfCardsIn5Years",
        request.number_of_cards_in_5_years,
        MAX_APPLICATION_CARDS,
        "card count is limited to 1e8",
    )?
    .filter(|&c| c > 0.0)
    .or(bounded(
        "numberOfCards",
        request.number_of_cards,
        MAX_APPLICATION_CARDS,
        "card count is limited to 1e8",
    )?
    .filter(|&c| c > 0.0))
    .unwrap_or(1.0);

    let transactions_per_year = bounded(
        "expectedMonthlyVolume",
        request.expected_monthly_volume,
        MAX_MONTHLY_VOLUME,
        "monthly volume is limited to 1e9",
    )?
    .map(|monthly| monthly * 12.0)
        .filter(|&n| n > 0.0)
        .unwrap_or(1.0);

    let months = timeline_months(request.timeline.as_deref(), request.custom_timeline_months);
    if months > MAX_APPLICATION_MONTHS {
        return Err(ValidationError::OutOfRange {
            field: "timeline",
            value: months.to_string(),
            reason: "timeline is limited to 1200 months",
        });
    }

    Ok(ApplicationInput {
        cards,
        transactions_per_year,
        card_type,
        months,
        features: FeatureSet::from_labels(&request.features),
    })
}

/// Months covered by an application timeline label.
///
/// `Immediate` is one month, `Flexible` uses the custom month count when
/// one is given, any other label uses the first integer it contains. The
/// default is twelve months and a zero count becomes one month.
fn timeline_months(timeline: Option<&str>, custom_months: Option<u32>) -> u32 {
    let mut months = 12;
    if let Some(label) = timeline {
        let lower = label.to_lowercase();
        if lower == "immediate" {
            months = 1;
        } else if lower == "flexible" && custom_months.is_some_and(|m| m > 0) {
            months = custom_months.unwrap_or(months);
        } else if let Some(parsed) = first_integer(label) {
            months = parsed;
        }
    }
    months.max(1)
}

fn first_integer(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    // Saturate absurdly long digit runs so the range check reports them.
    if digits.is_empty() {
        None
    } else {
        Some(digits.parse().unwrap_or(u32::MAX))
    }
}

fn parse_card_type(value: &str) -> Result<CardType, ValidationError> {
    value
        .parse()
        .map_err(|_| ValidationError::UnknownVariant {
            field: "cardType",
            value: value.to_string(),
            expected: CARD_TYPE_NAMES,
        })
}

fn parse_year(key: &YearKey) -> Option<u32> {
    let year = match key {
        YearKey::Number(n) => u32::try_from(*n).ok()?,
        YearKey::Text(s) => s.trim().parse::<u32>().ok()?,
    };
    (year >= 1).then_some(year)
}

fn positive_u32(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    if value < 1 {
        return Err(ValidationError::NotPositive {
            field,
            value: value.to_string(),
        });
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange {
        field,
        value: value.to_string(),
        reason: "value is too large",
    })
}

fn positive_u64(field: &'static str, value: i64) -> Result<u64, ValidationError> {
    if value < 1 {
        return Err(ValidationError::NotPositive {
            field,
            value: value.to_string(),
        });
    }
    Ok(value as u64)
}

fn non_negative(field: &'static str, value: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match value {
        Some(v) if !v.is_finite() => Err(ValidationError::OutOfRange {
            field,
            value: v.to_string(),
            reason: "must be a finite number",
        }),
        Some(v) if v < 0.0 => Err(ValidationError::Negative {
            field,
            value: v.to_string(),
        }),
        other => Ok(other),
    }
}

/// `non_negative`, additionally capped at `max` so the cost formulas stay
/// finite.
fn bounded(
    field: &'static str,
    value: Option<f64>,
    max: f64,
    reason: &'static str,
) -> Result<Option<f64>, ValidationError> {
    match non_negative(field, value)? {
        Some(v) if v > max => Err(ValidationError::OutOfRange {
            field,
            value: v.to_string(),
            reason,
        }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto_request() -> AutoRoiRequest {
        AutoRoiRequest {
            years: 3,
            cards_number: 50_000,
            card_type: "Virtual".to_string(),
            features: vec![],
            starting_number: 5_000,
            expected_cards_growth_rate: 1.5,
        }
    }

    fn manual_request(entries: &[(&str, i64)]) -> ManualRoiRequest {
        ManualRoiRequest {
            explicit_cards_number: entries
                .iter()
                .map(|(k, v)| (YearKey::Text(k.to_string()), *v))
                .collect(),
            card_type: "Physical".to_string(),
            features: vec![],
        }
    }

    #[test]
    fn valid_auto_request_normalizes() {
        let input = validate_auto(&auto_request()).unwrap();
        assert_eq!(input.projection_years, 3);
        assert_eq!(input.target_card_count, 50_000);
        assert_eq!(input.starting_card_count, 5_000);
        assert_eq!(input.card_type, CardType::Virtual);
        assert!(input.features.is_empty());
    }

    #[test]
    fn zero_years_names_years_field() {
        let mut req = auto_request();
        req.years = 0;
        let err = validate_auto(&req).unwrap_err();
        assert_eq!(err.field(), "years");
        assert!(err.to_string().contains("years"));
    }

    #[test]
    fn non_positive_counts_are_rejected() {
        let mut req = auto_request();
        req.cards_number = 0;
        assert_eq!(validate_auto(&req).unwrap_err().field(), "cards_number");

        let mut req = auto_request();
        req.starting_number = -4;
        assert_eq!(validate_auto(&req).unwrap_err().field(), "starting_number");
    }

    #[test]
    fn non_positive_growth_rate_is_rejected() {
        let mut req = auto_request();
        req.expected_cards_growth_rate = 0.0;
        assert_eq!(
            validate_auto(&req).unwrap_err().field(),
            "expected_cards_growth_rate"
        );

        req.expected_cards_growth_rate = f64::NAN;
        assert_eq!(
            validate_auto(&req).unwrap_err().field(),
            "expected_cards_growth_rate"
        );
    }

    #[test]
    fn unknown_card_type_names_card_type_field() {
        let mut req = auto_request();
        req.card_type = "Plastic".to_string();
        let err = validate_auto(&req).unwrap_err();
        assert_eq!(err.field(), "cardType");
        assert!(err.to_string().contains("Plastic"));
    }

    #[test]
    fn horizon_is_bounded() {
        let mut req = auto_request();
        req.years = i64::from(MAX_PROJECTION_YEARS) + 1;
        assert!(matches!(
            validate_auto(&req),
            Err(ValidationError::OutOfRange { field: "years", .. })
        ));
    }

    #[test]
    fn manual_years_are_sorted_numerically() {
        let input = validate_manual(&manual_request(&[("10", 3), ("2", 2), ("1", 1)])).unwrap();
        let years: Vec<u32> = input.cards_by_year.keys().copied().collect();
        assert_eq!(years, vec![1, 2, 10]);
    }

    #[test]
    fn manual_zero_cards_is_valid() {
        let input = validate_manual(&manual_request(&[("1", 0), ("2", 5000)])).unwrap();
        assert_eq!(input.cards_by_year.get(&1), Some(&0));
    }

    #[test]
    fn manual_rejects_bad_schedules() {
        assert_eq!(
            validate_manual(&manual_request(&[])).unwrap_err(),
            ValidationError::Empty {
                field: "explicit_cards_number"
            }
        );
        assert!(matches!(
            validate_manual(&manual_request(&[("0", 10)])),
            Err(ValidationError::InvalidYear { .. })
        ));
        assert!(matches!(
            validate_manual(&manual_request(&[("year one", 10)])),
            Err(ValidationError::InvalidYear { .. })
        ));
        assert!(matches!(
            validate_manual(&manual_request(&[("1", -1)])),
            Err(ValidationError::Negative { .. })
        ));
        assert_eq!(
            validate_manual(&manual_request(&[("1", 1), ("01", 2)])).unwrap_err(),
            ValidationError::DuplicateYear {
                field: "explicit_cards_number",
                year: 1
            }
        );
    }

    #[test]
    fn application_defaults() {
        let input = validate_application(&ApplicationRequest::default()).unwrap();
        assert_eq!(input.cards, 1.0);
        assert_eq!(input.transactions_per_year, 1.0);
        assert_eq!(input.card_type, CardType::Virtual);
        assert_eq!(input.months, 12);
    }

    #[test]
    fn application_falls_back_to_number_of_cards() {
        let req = ApplicationRequest {
            number_of_cards_in_5_years: Some(0.0),
            number_of_cards: Some(700.0),
            expected_monthly_volume: Some(1000.0),
            ..Default::default()
        };
        let input = validate_application(&req).unwrap();
        assert_eq!(input.cards, 700.0);
        assert_eq!(input.transactions_per_year, 12_000.0);
    }

    #[test]
    fn timeline_labels() {
        assert_eq!(timeline_months(Some("Immediate"), None), 1);
        assert_eq!(timeline_months(Some("3 months"), None), 3);
        assert_eq!(timeline_months(Some("12 months"), None), 12);
        assert_eq!(timeline_months(Some("Flexible"), Some(18)), 18);
        assert_eq!(timeline_months(Some("Flexible"), None), 12);
        assert_eq!(timeline_months(Some("0 months"), None), 1);
        assert_eq!(timeline_months(None, None), 12);
    }

    #[test]
    fn application_rejects_oversized_timeline() {
        let req = ApplicationRequest {
            timeline: Some("99999999999 months".to_string()),
            ..Default::default()
        };
        assert_eq!(validate_application(&req).unwrap_err().field(), "timeline");
    }

    #[test]
    fn application_rejects_huge_counts() {
        let cards = ApplicationRequest {
            number_of_cards_in_5_years: Some(1e300),
            ..Default::default()
        };
        assert_eq!(
            validate_application(&cards).unwrap_err().field(),
            "numberOfCardsIn5Years"
        );

        let volume = ApplicationRequest {
            expected_monthly_volume: Some(MAX_MONTHLY_VOLUME * 2.0),
            ..Default::default()
        };
        assert_eq!(
            validate_application(&volume).unwrap_err().field(),
            "expectedMonthlyVolume"
        );

        let at_limit = ApplicationRequest {
            number_of_cards_in_5_years: Some(MAX_APPLICATION_CARDS),
            expected_monthly_volume: Some(MAX_MONTHLY_VOLUME),
            ..Default::default()
        };
        assert!(validate_application(&at_limit).is_ok());
    }

    #[test]
    fn application_rejects_negative_volume() {
        let req = ApplicationRequest {
            expected_monthly_volume: Some(-1.0),
            ..Default::default()
        };
        assert_eq!(
            validate_application(&req).unwrap_err().field(),
            "expectedMonthlyVolume"
        );
    }
}
