//! `roi calc` -- compute ROI for a single step.

use anyhow::{Context, Result};
use roi_core::formula::compute_step_with;
use roi_core::report::format_percent;
use roi_core::step::{StepInput, StepRecord};
use roi_core::validation::validate_input;
use serde::Serialize;

use crate::cli::CalcArgs;
use crate::context::RuntimeContext;
use crate::output::{format_record_detail, output_json};

/// JSON view of a single computed step.
#[derive(Serialize)]
struct CalcView<'a> {
    step: &'a StepRecord,
    original_annual_minutes: f64,
    new_annual_minutes: f64,
    efficiency: String,
}

/// Execute the `roi calc` command.
pub fn run(ctx: &RuntimeContext, args: &CalcArgs) -> Result<()> {
    let config = ctx.load_config()?;

    let input = validate_input(&input_from_args(args), config.validation.accuracy)
        .context("invalid step")?;
    let record = compute_step_with(&config.assumptions, &input);
    tracing::debug!(
        name = record.name(),
        saved_hours = record.saved_hours_per_year(),
        "computed step"
    );

    if ctx.json {
        output_json(&CalcView {
            step: &record,
            original_annual_minutes: record.original_annual_minutes(),
            new_annual_minutes: record.new_annual_minutes(),
            efficiency: format_percent(record.efficiency_ratio()),
        });
    } else {
        println!("{}", format_record_detail(&record));
    }

    Ok(())
}

/// Builds the raw input. Giving an accuracy or fix time implies an error path.
fn input_from_args(args: &CalcArgs) -> StepInput {
    let input = StepInput::new(args.name.clone(), args.frequency, args.manual);
    if args.error_path || args.accuracy.is_some() || args.fix.is_some() {
        input.with_error_path(
            args.accuracy.unwrap_or(100.0),
            args.review,
            args.fix.unwrap_or(0.0),
        )
    } else {
        input.with_review(args.review)
    }
}
