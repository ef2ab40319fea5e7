//! Output formatting helpers for the `roi` CLI.
//!
//! Provides JSON output, table formatting, a detailed single-step view, and
//! the full ledger report shared by the shell and `roi report`.

use std::io::{self, Write};

use roi_core::formula::Assumptions;
use roi_core::ledger::{Ledger, LedgerSummary};
use roi_core::report::{ReportRow, report_rows};
use roi_core::step::StepRecord;
use roi_ui::styles::{
    render_bold, render_category, render_efficiency, render_fte, render_heavy_separator,
    render_hours, render_muted, render_separator,
};
use roi_ui::terminal::terminal_width;
use serde::Serialize;

/// Column headers of the report table.
pub const REPORT_HEADERS: [&str; 8] = [
    "#",
    "STEP",
    "FREQ/WK",
    "MANUAL MIN",
    "NEW MIN",
    "SAVED H/YR",
    "FTE",
    "EFFICIENCY",
];

/// JSON view of a full report.
#[derive(Debug, Serialize)]
pub struct ReportView {
    pub steps: Vec<ReportRow>,
    pub summary: LedgerSummary,
}

impl ReportView {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            steps: report_rows(ledger),
            summary: ledger.summarize(),
        }
    }
}

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Display width of a cell; counts characters, not bytes.
fn cell_width(cell: &str) -> usize {
    cell.chars().count()
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell_width(cell));
    format!("{}{}", cell, " ".repeat(fill))
}

/// Write a simple table with headers and rows.
///
/// Each row is a `Vec<String>` with columns matching the headers.
/// Column widths are computed from the data for alignment.
pub fn write_table<W: Write>(
    out: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
) -> io::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| cell_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell_width(cell));
            }
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect();
    writeln!(out, "{}", header_line.join("  ").trim_end())?;

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", separator.join("  "))?;

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| match widths.get(i) {
                Some(w) => pad(cell, *w),
                None => cell.clone(),
            })
            .collect();
        writeln!(out, "{}", cells.join("  ").trim_end())?;
    }
    Ok(())
}

/// Width of separator lines, capped to the terminal.
fn rule_width() -> usize {
    terminal_width().min(90)
}

/// Format a step record in detailed multi-line view.
pub fn format_record_detail(record: &StepRecord) -> String {
    let mut lines = Vec::new();

    lines.push(render_bold(record.name()));
    lines.push(format!("  Weekly frequency:      {}", record.weekly_frequency()));
    lines.push(format!("  Manual minutes:        {}", record.manual_minutes()));
    if record.has_error_path() {
        lines.push(format!(
            "  Error path:            yes (accuracy {:.1}%, review {} min, fix {} min)",
            record.accuracy_ratio() * 100.0,
            record.review_minutes(),
            record.fix_minutes()
        ));
    } else {
        lines.push(format!(
            "  Error path:            no (review {} min)",
            record.review_minutes()
        ));
    }
    lines.push(format!("  New minutes:           {:.2}", record.new_minutes()));
    lines.push(format!(
        "  Saved per occurrence:  {:.2} min",
        record.saved_minutes_per_occurrence()
    ));
    lines.push(format!(
        "  Saved hours/yr:        {}",
        render_hours(record.saved_hours_per_year())
    ));
    lines.push(format!(
        "  Freed FTE:             {}",
        render_fte(record.freed_fte(), 3)
    ));
    lines.push(format!(
        "  Efficiency:            {}",
        render_efficiency(record.efficiency_ratio())
    ));

    lines.join("\n")
}

/// Write the summary block for a ledger.
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &LedgerSummary,
    assumptions: &Assumptions,
) -> io::Result<()> {
    writeln!(out, "{}", render_category("Summary"))?;
    writeln!(out, "  Steps:            {}", summary.count)?;
    writeln!(
        out,
        "  Saved hours/yr:   {}",
        render_hours(summary.total_saved_hours)
    )?;
    writeln!(
        out,
        "  Freed FTE:        {}",
        render_fte(summary.total_freed_fte, 2)
    )?;
    writeln!(
        out,
        "  {}",
        render_muted(&format!(
            "FTE = {} work hours per year",
            assumptions.hours_per_fte
        ))
    )
}

/// Write the full ledger report: table of steps plus summary.
pub fn write_report<W: Write>(
    out: &mut W,
    ledger: &Ledger,
    assumptions: &Assumptions,
) -> io::Result<()> {
    if ledger.is_empty() {
        return writeln!(out, "No steps yet. Add a step first.");
    }

    let width = rule_width();
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M");
    writeln!(out, "{}", render_heavy_separator(width))?;
    writeln!(
        out,
        "{}  {}",
        render_category("ROI Report"),
        render_muted(&format!("generated {}", generated))
    )?;
    writeln!(out, "{}", render_heavy_separator(width))?;

    let rows: Vec<Vec<String>> = report_rows(ledger).iter().map(ReportRow::cells).collect();
    write_table(out, &REPORT_HEADERS, &rows)?;

    writeln!(out, "{}", render_separator(width))?;
    write_summary(out, &ledger.summarize(), assumptions)?;
    writeln!(out, "{}", render_heavy_separator(width))
}
