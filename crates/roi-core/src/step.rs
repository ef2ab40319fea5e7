//! Step input and computed step record -- the domain model of the calculator.

use serde::{Deserialize, Serialize};

fn default_accuracy_percent() -> f64 {
    100.0
}

/// Raw, caller-supplied inputs for one process step.
///
/// This is what a form submission or a steps file produces. It carries no
/// derived values; pass it through [`crate::validation::validate_input`] and
/// then [`crate::formula::compute_step`] to obtain a [`StepRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInput {
    pub name: String,

    /// Occurrences per week.
    pub weekly_frequency: f64,

    /// Minutes per occurrence before automation.
    pub manual_minutes: f64,

    /// Whether automated results may fail and need a manual fix.
    #[serde(default)]
    pub has_error_path: bool,

    /// Share of automated occurrences that succeed, 0-100.
    /// Ignored when `has_error_path` is false.
    #[serde(default = "default_accuracy_percent")]
    pub accuracy_percent: f64,

    /// Minutes to review a successful automated result.
    #[serde(default)]
    pub review_minutes: f64,

    /// Minutes to redo a failed automated result.
    /// Ignored when `has_error_path` is false.
    #[serde(default)]
    pub fix_minutes: f64,
}

impl StepInput {
    /// Creates an input with no error path and no review cost.
    pub fn new(name: impl Into<String>, weekly_frequency: f64, manual_minutes: f64) -> Self {
        Self {
            name: name.into(),
            weekly_frequency,
            manual_minutes,
            has_error_path: false,
            accuracy_percent: default_accuracy_percent(),
            review_minutes: 0.0,
            fix_minutes: 0.0,
        }
    }

    /// Sets the per-occurrence review time.
    pub fn with_review(mut self, review_minutes: f64) -> Self {
        self.review_minutes = review_minutes;
        self
    }

    /// Enables the error path with the given accuracy, review and fix times.
    pub fn with_error_path(
        mut self,
        accuracy_percent: f64,
        review_minutes: f64,
        fix_minutes: f64,
    ) -> Self {
        self.has_error_path = true;
        self.accuracy_percent = accuracy_percent;
        self.review_minutes = review_minutes;
        self.fix_minutes = fix_minutes;
        self
    }
}

/// One computed process step.
///
/// Fields are private: a record is only ever produced by the formula engine,
/// so the derived values always match the inputs they were computed from.
/// To change a step, compute a new record and replace the old one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub(crate) name: String,
    pub(crate) weekly_frequency: f64,
    pub(crate) manual_minutes: f64,
    pub(crate) has_error_path: bool,
    pub(crate) accuracy_ratio: f64,
    pub(crate) review_minutes: f64,
    pub(crate) fix_minutes: f64,

    // Derived.
    pub(crate) new_minutes: f64,
    pub(crate) saved_hours_per_year: f64,
    pub(crate) freed_fte: f64,
    pub(crate) efficiency_ratio: f64,

    #[serde(skip)]
    pub(crate) weeks_per_year: f64,
}

impl StepRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weekly_frequency(&self) -> f64 {
        self.weekly_frequency
    }

    pub fn manual_minutes(&self) -> f64 {
        self.manual_minutes
    }

    pub fn has_error_path(&self) -> bool {
        self.has_error_path
    }

    /// Effective accuracy in [0, 1]; always 1.0 without an error path.
    pub fn accuracy_ratio(&self) -> f64 {
        self.accuracy_ratio
    }

    pub fn review_minutes(&self) -> f64 {
        self.review_minutes
    }

    /// Effective fix time; always 0 without an error path.
    pub fn fix_minutes(&self) -> f64 {
        self.fix_minutes
    }

    /// Expected minutes per occurrence after automation (unrounded).
    pub fn new_minutes(&self) -> f64 {
        self.new_minutes
    }

    /// Hours saved per year, rounded to one decimal.
    pub fn saved_hours_per_year(&self) -> f64 {
        self.saved_hours_per_year
    }

    /// Freed full-time-equivalents, rounded to three decimals.
    pub fn freed_fte(&self) -> f64 {
        self.freed_fte
    }

    /// Fraction of the original annual time eliminated (unrounded).
    /// Negative when the automated process is slower.
    pub fn efficiency_ratio(&self) -> f64 {
        self.efficiency_ratio
    }

    pub fn original_annual_minutes(&self) -> f64 {
        self.weekly_frequency * self.manual_minutes * self.weeks_per_year
    }

    pub fn new_annual_minutes(&self) -> f64 {
        self.weekly_frequency * self.new_minutes * self.weeks_per_year
    }

    /// Minutes saved on a single occurrence.
    pub fn saved_minutes_per_occurrence(&self) -> f64 {
        self.manual_minutes - self.new_minutes
    }

    /// Reconstructs the inputs this record was computed from, for editing.
    pub fn to_input(&self) -> StepInput {
        StepInput {
            name: self.name.clone(),
            weekly_frequency: self.weekly_frequency,
            manual_minutes: self.manual_minutes,
            has_error_path: self.has_error_path,
            accuracy_percent: self.accuracy_ratio * 100.0,
            review_minutes: self.review_minutes,
            fix_minutes: self.fix_minutes,
        }
    }
}
