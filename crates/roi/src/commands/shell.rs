//! `roi shell` -- interactive menu for building a step ledger.
//!
//! Each form submission is validated and computed on its own; the only state
//! kept between submissions is the session's [`Ledger`]. End of input quits
//! the session.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use roi_config::config::RoiConfig;
use roi_core::formula::compute_step_with;
use roi_core::ledger::Ledger;
use roi_core::report::write_csv;
use roi_core::step::{StepInput, StepRecord};
use roi_core::validation::validate_input;
use roi_ui::styles::{
    render_category, render_fail_icon, render_fte, render_heavy_separator, render_hours,
    render_info_icon, render_pass_icon, render_step_compact, render_warn_icon,
};

use crate::context::RuntimeContext;
use crate::output::write_report;

// Defaults offered for a new step with an error path.
const DEFAULT_ACCURACY: f64 = 90.0;
const DEFAULT_REVIEW_MINUTES: f64 = 2.0;
const DEFAULT_FIX_MINUTES: f64 = 15.0;

/// Execute the `roi shell` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let config = ctx.load_config()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), config);
    shell.run()?;
    tracing::debug!(steps = shell.ledger().len(), "shell session ended");
    Ok(())
}

/// An interactive session over a line-based input and an output sink.
pub struct Shell<R, W> {
    input: R,
    out: W,
    config: RoiConfig,
    ledger: Ledger,
    closed: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, out: W, config: RoiConfig) -> Self {
        Self {
            input,
            out,
            config,
            ledger: Ledger::new(),
            closed: false,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    /// Runs the menu loop until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        self.banner()?;
        loop {
            self.menu()?;
            let Some(choice) = self.ask("Choice: ")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.add_step()?,
                "2" => write_report(&mut self.out, &self.ledger, &self.config.assumptions)?,
                "3" => self.edit_step()?,
                "4" => self.delete_step()?,
                "5" => self.clear_all()?,
                "6" => self.export_csv()?,
                "0" | "q" | "quit" | "exit" => {
                    writeln!(self.out, "Goodbye!")?;
                    break;
                }
                _ => writeln!(self.out, "{} Invalid option", render_warn_icon())?,
            }
            if self.closed {
                break;
            }
        }
        self.out.flush()
    }

    fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", render_heavy_separator(50))?;
        writeln!(
            self.out,
            "  {}",
            render_category("ROI calculator - process automation savings")
        )?;
        writeln!(self.out, "{}", render_heavy_separator(50))
    }

    fn menu(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Choose an action:")?;
        writeln!(self.out, "  1. Add step")?;
        writeln!(self.out, "  2. Show report")?;
        writeln!(self.out, "  3. Edit step")?;
        writeln!(self.out, "  4. Delete step")?;
        writeln!(self.out, "  5. Clear all")?;
        writeln!(self.out, "  6. Export CSV")?;
        writeln!(self.out, "  0. Quit")
    }

    // -----------------------------------------------------------------------
    // Prompts
    // -----------------------------------------------------------------------

    /// Prints `prompt` and reads one trimmed line. `None` means end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            self.closed = true;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks for a number until one parses. Empty input takes `default`.
    fn ask_number(&mut self, label: &str, default: Option<f64>) -> io::Result<Option<f64>> {
        let prompt = match default {
            Some(d) => format!("{} [{}]: ", label, d),
            None => format!("{}: ", label),
        };
        loop {
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                if let Some(d) = default {
                    return Ok(Some(d));
                }
            }
            match answer.parse::<f64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(
                    self.out,
                    "{} '{}' is not a number",
                    render_fail_icon(),
                    answer
                )?,
            }
        }
    }

    fn ask_yes_no(&mut self, label: &str, default: bool) -> io::Result<Option<bool>> {
        let hint = if default { "Y/n" } else { "y/N" };
        let Some(answer) = self.ask(&format!("{} ({}): ", label, hint))? else {
            return Ok(None);
        };
        Ok(Some(match answer.to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        }))
    }

    /// Asks for a one-based sequence number. `None` on cancel or bad input.
    fn ask_sequence(&mut self, label: &str) -> io::Result<Option<usize>> {
        let Some(answer) = self.ask(&format!("{} (Enter to cancel): ", label))? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.parse::<usize>() {
            Ok(seq) => Ok(Some(seq)),
            Err(_) => {
                writeln!(
                    self.out,
                    "{} '{}' is not a valid sequence number",
                    render_fail_icon(),
                    answer
                )?;
                Ok(None)
            }
        }
    }

    /// Collects one form submission, prefilled from `current` when editing.
    fn collect_input(&mut self, current: Option<&StepInput>) -> io::Result<Option<StepInput>> {
        let name_prompt = match current {
            Some(c) => format!("Step name [{}]: ", c.name),
            None => "Step name: ".to_string(),
        };
        let Some(mut name) = self.ask(&name_prompt)? else {
            return Ok(None);
        };
        if name.is_empty() {
            match current {
                Some(c) => name = c.name.clone(),
                None => {
                    writeln!(self.out, "Cancelled")?;
                    return Ok(None);
                }
            }
        }

        let Some(weekly_frequency) =
            self.ask_number("Weekly frequency", current.map(|c| c.weekly_frequency))?
        else {
            return Ok(None);
        };
        let Some(manual_minutes) = self.ask_number(
            "Manual minutes per occurrence",
            current.map(|c| c.manual_minutes),
        )?
        else {
            return Ok(None);
        };

        let had_error_path = current.is_some_and(|c| c.has_error_path);
        let Some(has_error_path) =
            self.ask_yes_no("Include review/fix cost for failed results?", had_error_path)?
        else {
            return Ok(None);
        };

        let mut input = StepInput::new(name, weekly_frequency, manual_minutes);
        if has_error_path {
            let previous = current.filter(|c| c.has_error_path);
            let Some(accuracy) = self.ask_number(
                "Accuracy % (0-100)",
                Some(previous.map_or(DEFAULT_ACCURACY, |c| c.accuracy_percent)),
            )?
            else {
                return Ok(None);
            };
            let Some(review) = self.ask_number(
                "Review minutes when correct",
                Some(previous.map_or(DEFAULT_REVIEW_MINUTES, |c| c.review_minutes)),
            )?
            else {
                return Ok(None);
            };
            let Some(fix) = self.ask_number(
                "Fix minutes when wrong",
                Some(previous.map_or(DEFAULT_FIX_MINUTES, |c| c.fix_minutes)),
            )?
            else {
                return Ok(None);
            };
            input = input.with_error_path(accuracy, review, fix);
        } else {
            let Some(review) = self.ask_number(
                "Review minutes (0 if none)",
                Some(current.map_or(0.0, |c| c.review_minutes)),
            )?
            else {
                return Ok(None);
            };
            input = input.with_review(review);
        }
        Ok(Some(input))
    }

    /// Validates and computes a submission, reporting validation errors.
    fn compute(&mut self, input: &StepInput) -> io::Result<Option<StepRecord>> {
        match validate_input(input, self.config.validation.accuracy) {
            Ok(valid) => Ok(Some(compute_step_with(&self.config.assumptions, &valid))),
            Err(e) => {
                writeln!(self.out, "{} {}", render_fail_icon(), e)?;
                Ok(None)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    fn add_step(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{}", render_category("Add step"))?;
        let Some(input) = self.collect_input(None)? else {
            return Ok(());
        };
        let Some(record) = self.compute(&input)? else {
            return Ok(());
        };

        writeln!(self.out, "{} Added: {}", render_pass_icon(), record.name())?;
        writeln!(
            self.out,
            "  Saved per occurrence: {:.2} min",
            record.saved_minutes_per_occurrence()
        )?;
        writeln!(
            self.out,
            "  Saved hours/yr:       {}",
            render_hours(record.saved_hours_per_year())
        )?;
        writeln!(
            self.out,
            "  Freed FTE:            {}",
            render_fte(record.freed_fte(), 2)
        )?;
        self.ledger.append(record);
        Ok(())
    }

    fn list_steps(&mut self) -> io::Result<()> {
        for (i, record) in self.ledger.iter().enumerate() {
            writeln!(self.out, "  {}", render_step_compact(i + 1, record))?;
        }
        Ok(())
    }

    fn no_steps(&mut self) -> io::Result<()> {
        writeln!(self.out, "{} No steps yet", render_info_icon())
    }

    fn missing_step(&mut self, seq: usize) -> io::Result<()> {
        writeln!(
            self.out,
            "{} No step #{} (ledger has {} step(s))",
            render_fail_icon(),
            seq,
            self.ledger.len()
        )
    }

    fn edit_step(&mut self) -> io::Result<()> {
        if self.ledger.is_empty() {
            return self.no_steps();
        }
        self.list_steps()?;
        let Some(seq) = self.ask_sequence("Sequence number to edit")? else {
            return Ok(());
        };
        let Some(position) = seq.checked_sub(1).filter(|p| *p < self.ledger.len()) else {
            return self.missing_step(seq);
        };
        let current = self.ledger.get(position).map(StepRecord::to_input);

        let Some(input) = self.collect_input(current.as_ref())? else {
            return Ok(());
        };
        let Some(record) = self.compute(&input)? else {
            return Ok(());
        };
        let name = record.name().to_string();
        match self.ledger.replace_at(position, record) {
            Ok(_) => writeln!(self.out, "{} Updated: {}", render_pass_icon(), name),
            Err(e) => writeln!(self.out, "{} {}", render_fail_icon(), e),
        }
    }

    fn delete_step(&mut self) -> io::Result<()> {
        if self.ledger.is_empty() {
            return self.no_steps();
        }
        write_report(&mut self.out, &self.ledger, &self.config.assumptions)?;
        let Some(seq) = self.ask_sequence("Sequence number to delete")? else {
            return Ok(());
        };
        match seq.checked_sub(1).map(|p| self.ledger.remove_at(p)) {
            Some(Ok(removed)) => {
                writeln!(self.out, "{} Deleted: {}", render_pass_icon(), removed.name())
            }
            _ => self.missing_step(seq),
        }
    }

    fn clear_all(&mut self) -> io::Result<()> {
        let Some(confirmed) = self.ask_yes_no("Clear all steps?", false)? else {
            return Ok(());
        };
        if confirmed {
            self.ledger.clear();
            writeln!(self.out, "{} Cleared", render_pass_icon())
        } else {
            writeln!(self.out, "Cancelled")
        }
    }

    fn export_csv(&mut self) -> io::Result<()> {
        if self.ledger.is_empty() {
            return self.no_steps();
        }
        let default = self.config.export.path.clone();
        let Some(answer) = self.ask(&format!("Export path [{}]: ", default))? else {
            return Ok(());
        };
        let path = if answer.is_empty() { default } else { answer };

        match self.write_export(Path::new(&path)) {
            Ok(()) => writeln!(
                self.out,
                "{} Exported {} step(s) to {}",
                render_pass_icon(),
                self.ledger.len(),
                path
            ),
            Err(e) => writeln!(
                self.out,
                "{} Failed to export to {}: {}",
                render_fail_icon(),
                path,
                e
            ),
        }
    }

    fn write_export(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        write_csv(&self.ledger, BufWriter::new(file), self.config.export.bom)
    }
}
