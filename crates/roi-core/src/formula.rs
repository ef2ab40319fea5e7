//! The ROI formula: maps one step's inputs to its derived savings metrics.
//!
//! The engine assumes its inputs were validated (positive frequency and
//! manual time, non-empty name); it does not re-check them. For well-formed
//! numbers it never fails. Negative savings are a valid result.

use serde::{Deserialize, Serialize};

use crate::step::{StepInput, StepRecord};

/// Weeks in a working year.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Standard annual work hours of one full-time-equivalent.
pub const HOURS_PER_FTE: f64 = 2000.0;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Calendar constants the formula is parameterised over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    #[serde(default = "default_weeks_per_year")]
    pub weeks_per_year: f64,

    #[serde(default = "default_hours_per_fte")]
    pub hours_per_fte: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            weeks_per_year: WEEKS_PER_YEAR,
            hours_per_fte: HOURS_PER_FTE,
        }
    }
}

fn default_weeks_per_year() -> f64 {
    WEEKS_PER_YEAR
}

fn default_hours_per_fte() -> f64 {
    HOURS_PER_FTE
}

/// Rounds `value` to `decimals` places. Exact ties go to the even digit.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Computes a step record with the standard 52-week / 2000-hour assumptions.
pub fn compute_step(input: &StepInput) -> StepRecord {
    compute_step_with(&Assumptions::default(), input)
}

/// Computes a step record under the given assumptions.
pub fn compute_step_with(assumptions: &Assumptions, input: &StepInput) -> StepRecord {
    // Without an error path the fix time is overridden, not defaulted.
    let (accuracy, fix_minutes) = if input.has_error_path {
        ((input.accuracy_percent / 100.0).clamp(0.0, 1.0), input.fix_minutes)
    } else {
        (1.0, 0.0)
    };

    let weeks = assumptions.weeks_per_year;
    let original_annual = input.weekly_frequency * input.manual_minutes * weeks;

    // Skip the fix term entirely at full accuracy so the result is exactly
    // the review time.
    let new_minutes = if accuracy == 1.0 {
        input.review_minutes
    } else {
        accuracy * input.review_minutes + (1.0 - accuracy) * fix_minutes
    };

    let new_annual = input.weekly_frequency * new_minutes * weeks;
    let saved_minutes = original_annual - new_annual;
    let saved_hours = saved_minutes / MINUTES_PER_HOUR;
    let fte = saved_hours / assumptions.hours_per_fte;
    let efficiency_ratio = if original_annual > 0.0 {
        saved_minutes / original_annual
    } else {
        0.0
    };

    StepRecord {
        name: input.name.clone(),
        weekly_frequency: input.weekly_frequency,
        manual_minutes: input.manual_minutes,
        has_error_path: input.has_error_path,
        accuracy_ratio: accuracy,
        review_minutes: input.review_minutes,
        fix_minutes,
        new_minutes,
        saved_hours_per_year: round_to(saved_hours, 1),
        freed_fte: round_to(fte, 3),
        efficiency_ratio,
        weeks_per_year: weeks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn invoice_scenario() {
        let input = StepInput::new("发票处理", 100.0, 10.0).with_error_path(90.0, 2.0, 15.0);
        let record = compute_step(&input);

        assert_eq!(record.name(), "发票处理");
        assert!(approx(record.original_annual_minutes(), 52000.0));
        assert!(approx(record.new_minutes(), 3.3));
        assert!(approx(record.new_annual_minutes(), 17160.0));
        assert_eq!(record.saved_hours_per_year(), 580.7);
        assert_eq!(record.freed_fte(), 0.29);
        assert!(approx(record.efficiency_ratio(), 0.67));
    }

    #[test]
    fn no_error_path_scenario() {
        let input = StepInput::new("Data entry", 50.0, 20.0);
        let record = compute_step(&input);

        assert_eq!(record.new_minutes(), 0.0);
        assert_eq!(record.saved_hours_per_year(), 866.7);
        assert_eq!(record.freed_fte(), 0.433);
        assert_eq!(record.efficiency_ratio(), 1.0);
    }

    #[test]
    fn no_error_path_ignores_fix_time() {
        for fix in [0.0, 1.0, 15.0, 999.0] {
            for review in [0.0, 0.7, 2.333, 9.0] {
                let mut input = StepInput::new("Step", 30.0, 12.0).with_review(review);
                input.fix_minutes = fix;
                input.accuracy_percent = 40.0;
                let record = compute_step(&input);
                assert_eq!(record.new_minutes(), review);
                assert_eq!(record.fix_minutes(), 0.0);
                assert_eq!(record.accuracy_ratio(), 1.0);
            }
        }
    }

    #[test]
    fn new_minutes_is_convex_combination() {
        let (review, fix) = (2.0, 15.0);
        for percent in 0..=100 {
            let input =
                StepInput::new("Step", 10.0, 20.0).with_error_path(percent as f64, review, fix);
            let record = compute_step(&input);
            assert!(record.new_minutes() >= review - 1e-12);
            assert!(record.new_minutes() <= fix + 1e-12);
        }
    }

    #[test]
    fn accuracy_endpoints_are_exact() {
        let full =
            compute_step(&StepInput::new("Step", 10.0, 20.0).with_error_path(100.0, 2.0, 15.0));
        assert_eq!(full.new_minutes(), 2.0);

        let none =
            compute_step(&StepInput::new("Step", 10.0, 20.0).with_error_path(0.0, 2.0, 15.0));
        assert_eq!(none.new_minutes(), 15.0);
    }

    #[test]
    fn saved_hours_matches_closed_form() {
        let cases = [
            (100.0, 10.0, 90.0, 2.0, 15.0),
            (7.5, 3.0, 50.0, 1.0, 4.0),
            (1.0, 1.0, 10.0, 0.5, 30.0),
            (250.0, 45.0, 99.0, 5.0, 60.0),
        ];
        for (freq, manual, acc, review, fix) in cases {
            let input = StepInput::new("Step", freq, manual).with_error_path(acc, review, fix);
            let record = compute_step(&input);
            let expected = (freq * manual * 52.0 - freq * record.new_minutes() * 52.0) / 60.0;
            assert!((record.saved_hours_per_year() - expected).abs() <= 0.05 + 1e-9);
        }
    }

    #[test]
    fn freed_fte_is_hours_over_2000() {
        let record = compute_step(&StepInput::new("Step", 80.0, 6.0).with_review(1.0));
        let expected = 80.0 * 5.0 * 52.0 / 60.0 / 2000.0;
        assert!((record.freed_fte() - expected).abs() <= 0.0005 + 1e-9);
        assert!((record.freed_fte() - record.saved_hours_per_year() / 2000.0).abs() < 0.001);
    }

    #[test]
    fn slower_automation_yields_negative_savings() {
        let record =
            compute_step(&StepInput::new("Step", 10.0, 2.0).with_error_path(50.0, 1.0, 20.0));
        assert!(record.saved_hours_per_year() < 0.0);
        assert!(record.freed_fte() < 0.0);
        assert!(record.efficiency_ratio() < 0.0);
    }

    #[test]
    fn zero_original_time_has_zero_efficiency() {
        let record = compute_step(&StepInput::new("Step", 0.0, 10.0));
        assert_eq!(record.efficiency_ratio(), 0.0);
    }

    #[test]
    fn out_of_range_accuracy_is_clamped() {
        let high =
            compute_step(&StepInput::new("Step", 10.0, 20.0).with_error_path(140.0, 2.0, 15.0));
        assert_eq!(high.accuracy_ratio(), 1.0);
        assert_eq!(high.new_minutes(), 2.0);

        let low =
            compute_step(&StepInput::new("Step", 10.0, 20.0).with_error_path(-5.0, 2.0, 15.0));
        assert_eq!(low.accuracy_ratio(), 0.0);
        assert_eq!(low.new_minutes(), 15.0);
    }

    #[test]
    fn custom_assumptions_scale_results() {
        let assumptions = Assumptions {
            weeks_per_year: 48.0,
            hours_per_fte: 1600.0,
        };
        let record = compute_step_with(&assumptions, &StepInput::new("Step", 50.0, 20.0));
        assert_eq!(record.saved_hours_per_year(), 800.0);
        assert_eq!(record.freed_fte(), 0.5);
        assert!(approx(record.original_annual_minutes(), 48000.0));
    }

    #[test]
    fn to_input_recomputes_identically() {
        let input = StepInput::new("Step", 100.0, 10.0).with_error_path(90.0, 2.0, 15.0);
        let record = compute_step(&input);
        assert_eq!(compute_step(&record.to_input()), record);
    }

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(580.666, 1), 580.7);
        assert_eq!(round_to(0.290333, 3), 0.29);
        assert_eq!(round_to(-1.25, 1), -1.2);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
    }

    #[test]
    fn saved_hours_tie_rounds_to_even() {
        // 0.75 * 5 min * 52 weeks = 195 min = 3.25 h exactly.
        let record = compute_step(&StepInput::new("Step", 0.75, 5.0));
        assert_eq!(record.saved_hours_per_year(), 3.2);

        // 2.25 * 5 min * 52 weeks = 585 min = 9.75 h exactly.
        let record = compute_step(&StepInput::new("Step", 2.25, 5.0));
        assert_eq!(record.saved_hours_per_year(), 9.8);
    }

    #[test]
    fn freed_fte_tie_rounds_to_even() {
        // 10 min per week over 54 weeks = 9 h, 9 / 2000 = 0.0045.
        let down = compute_step_with(
            &Assumptions {
                weeks_per_year: 54.0,
                hours_per_fte: 2000.0,
            },
            &StepInput::new("Step", 1.0, 10.0),
        );
        assert_eq!(down.saved_hours_per_year(), 9.0);
        assert_eq!(down.freed_fte(), 0.004);

        // 10 min per week over 18 weeks = 3 h, 3 / 2000 = 0.0015.
        let up = compute_step_with(
            &Assumptions {
                weeks_per_year: 18.0,
                hours_per_fte: 2000.0,
            },
            &StepInput::new("Step", 1.0, 10.0),
        );
        assert_eq!(up.saved_hours_per_year(), 3.0);
        assert_eq!(up.freed_fte(), 0.002);
    }
}
