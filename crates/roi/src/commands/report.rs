//! `roi report` -- compute a report for every step in a steps file.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use roi_config::config::RoiConfig;
use roi_core::formula::compute_step_with;
use roi_core::ledger::Ledger;
use roi_core::report::write_csv;
use roi_core::step::StepInput;
use roi_core::validation::validate_input;
use roi_ui::styles::render_pass_icon;
use serde::Deserialize;

use crate::cli::ReportArgs;
use crate::context::RuntimeContext;
use crate::output::{ReportView, output_json, write_report};

/// Accepted layouts of a steps file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StepsFile {
    Wrapped { steps: Vec<StepInput> },
    List(Vec<StepInput>),
}

/// Execute the `roi report` command.
pub fn run(ctx: &RuntimeContext, args: &ReportArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let inputs = load_steps(&args.file)?;
    let ledger = build_ledger(&inputs, &config)?;
    tracing::debug!(steps = ledger.len(), file = %args.file.display(), "built ledger");

    if let Some(ref csv_path) = args.csv {
        let file = File::create(csv_path)
            .with_context(|| format!("failed to create {}", csv_path.display()))?;
        write_csv(&ledger, BufWriter::new(file), config.export.bom && !args.no_bom)
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
        if !ctx.json && !ctx.quiet {
            println!(
                "{} Exported {} step(s) to {}",
                render_pass_icon(),
                ledger.len(),
                csv_path.display()
            );
        }
    }

    if ctx.json {
        output_json(&ReportView::from_ledger(&ledger));
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_report(&mut handle, &ledger, &config.assumptions)?;
    }

    Ok(())
}

/// Reads step inputs from a YAML (or JSON) file.
pub fn load_steps(path: &Path) -> Result<Vec<StepInput>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read steps file: {}", path.display()))?;
    parse_steps(&content).with_context(|| format!("failed to parse steps file: {}", path.display()))
}

fn parse_steps(content: &str) -> Result<Vec<StepInput>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: StepsFile = serde_yaml::from_str(content)?;
    Ok(match file {
        StepsFile::Wrapped { steps } => steps,
        StepsFile::List(steps) => steps,
    })
}

/// Validates and computes every input in order. Fails on the first bad step.
pub fn build_ledger(inputs: &[StepInput], config: &RoiConfig) -> Result<Ledger> {
    let mut ledger = Ledger::new();
    for (i, input) in inputs.iter().enumerate() {
        let valid = validate_input(input, config.validation.accuracy)
            .with_context(|| format!("step {} ({:?}) is invalid", i + 1, input.name))?;
        ledger.append(compute_step_with(&config.assumptions, &valid));
    }
    Ok(ledger)
}
