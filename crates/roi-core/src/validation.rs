//! Input validation for step submissions.
//!
//! Validation runs before the formula engine, which assumes well-formed input.

use serde::{Deserialize, Serialize};

use crate::step::StepInput;

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("step name is required")]
    NameRequired,

    #[error("weekly frequency must be greater than 0 (got {0})")]
    NonPositiveFrequency(f64),

    #[error("manual minutes must be greater than 0 (got {0})")]
    NonPositiveManualMinutes(f64),

    #[error("{field} cannot be negative (got {value})")]
    NegativeDuration { field: &'static str, value: f64 },

    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("accuracy must be between 0 and 100 (got {0})")]
    AccuracyOutOfRange(f64),
}

/// How to treat an accuracy percentage outside 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyPolicy {
    /// Reject the submission (default).
    #[default]
    Reject,
    /// Clamp into range and log a warning.
    Clamp,
}

/// Validates a submission and returns the normalized input.
///
/// The returned input has a trimmed name and, under
/// [`AccuracyPolicy::Clamp`], an accuracy clamped into 0-100.
pub fn validate_input(
    input: &StepInput,
    policy: AccuracyPolicy,
) -> Result<StepInput, ValidationError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    let numbers = [
        ("weekly frequency", input.weekly_frequency),
        ("manual minutes", input.manual_minutes),
        ("accuracy", input.accuracy_percent),
        ("review minutes", input.review_minutes),
        ("fix minutes", input.fix_minutes),
    ];
    for (field, value) in numbers {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite(field));
        }
    }

    if input.weekly_frequency <= 0.0 {
        return Err(ValidationError::NonPositiveFrequency(input.weekly_frequency));
    }
    if input.manual_minutes <= 0.0 {
        return Err(ValidationError::NonPositiveManualMinutes(input.manual_minutes));
    }
    if input.review_minutes < 0.0 {
        return Err(ValidationError::NegativeDuration {
            field: "review minutes",
            value: input.review_minutes,
        });
    }
    if input.fix_minutes < 0.0 {
        return Err(ValidationError::NegativeDuration {
            field: "fix minutes",
            value: input.fix_minutes,
        });
    }

    let mut accuracy_percent = input.accuracy_percent;
    if input.has_error_path && !(0.0..=100.0).contains(&accuracy_percent) {
        match policy {
            AccuracyPolicy::Reject => {
                return Err(ValidationError::AccuracyOutOfRange(accuracy_percent));
            }
            AccuracyPolicy::Clamp => {
                let clamped = accuracy_percent.clamp(0.0, 100.0);
                tracing::warn!(
                    step = name,
                    given = accuracy_percent,
                    clamped,
                    "accuracy out of range, clamping"
                );
                accuracy_percent = clamped;
            }
        }
    }

    Ok(StepInput {
        name: name.to_owned(),
        accuracy_percent,
        ..input.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid() -> StepInput {
        StepInput::new("Invoice processing", 100.0, 10.0).with_error_path(90.0, 2.0, 15.0)
    }

    #[test]
    fn valid_input_passes() {
        assert_eq!(validate_input(&valid(), AccuracyPolicy::Reject), Ok(valid()));
    }

    #[test]
    fn name_is_trimmed() {
        let mut input = valid();
        input.name = "  Invoice processing \t".into();
        let normalized = validate_input(&input, AccuracyPolicy::Reject).unwrap();
        assert_eq!(normalized.name, "Invoice processing");
    }

    #[test]
    fn blank_name_fails() {
        let mut input = valid();
        input.name = "   ".into();
        assert_eq!(
            validate_input(&input, AccuracyPolicy::Reject),
            Err(ValidationError::NameRequired)
        );
    }

    #[test]
    fn non_positive_frequency_fails() {
        let mut input = valid();
        input.weekly_frequency = 0.0;
        assert!(matches!(
            validate_input(&input, AccuracyPolicy::Reject),
            Err(ValidationError::NonPositiveFrequency(_))
        ));
    }

    #[test]
    fn non_positive_manual_minutes_fails() {
        let mut input = valid();
        input.manual_minutes = -3.0;
        assert!(matches!(
            validate_input(&input, AccuracyPolicy::Reject),
            Err(ValidationError::NonPositiveManualMinutes(_))
        ));
    }

    #[test]
    fn negative_fix_minutes_fails() {
        let mut input = valid();
        input.fix_minutes = -1.0;
        match validate_input(&input, AccuracyPolicy::Reject) {
            Err(ValidationError::NegativeDuration { field, .. }) => {
                assert_eq!(field, "fix minutes")
            }
            other => panic!("expected NegativeDuration, got {:?}", other),
        }
    }

    #[test]
    fn nan_fails() {
        let mut input = valid();
        input.review_minutes = f64::NAN;
        assert_eq!(
            validate_input(&input, AccuracyPolicy::Reject),
            Err(ValidationError::NotFinite("review minutes"))
        );
    }

    #[test]
    fn out_of_range_accuracy_rejected_by_default() {
        let mut input = valid();
        input.accuracy_percent = 120.0;
        assert_eq!(
            validate_input(&input, AccuracyPolicy::default()),
            Err(ValidationError::AccuracyOutOfRange(120.0))
        );
    }

    #[test]
    fn out_of_range_accuracy_clamped_with_policy() {
        let mut input = valid();
        input.accuracy_percent = -10.0;
        let normalized = validate_input(&input, AccuracyPolicy::Clamp).unwrap();
        assert_eq!(normalized.accuracy_percent, 0.0);
    }

    #[test]
    fn accuracy_ignored_without_error_path() {
        let mut input = StepInput::new("Filing", 5.0, 5.0);
        input.accuracy_percent = 250.0;
        assert!(validate_input(&input, AccuracyPolicy::Reject).is_ok());
    }
}
