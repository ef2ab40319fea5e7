//! Flat report rows for tabular rendering, JSON output and CSV export.

use std::io::{self, Write};

use serde::Serialize;

use crate::formula::round_to;
use crate::ledger::Ledger;
use crate::step::StepRecord;

/// Header line of the CSV export, in column order.
pub const CSV_HEADERS: [&str; 8] = [
    "seq",
    "name",
    "weekly_frequency",
    "original_minutes",
    "new_minutes",
    "saved_hours",
    "freed_fte",
    "efficiency",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One display/export row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// One-based sequence number.
    pub seq: usize,
    pub name: String,
    pub weekly_frequency: f64,
    pub original_minutes: f64,
    /// Minutes per occurrence after automation, rounded to two decimals.
    pub new_minutes: f64,
    pub saved_hours: f64,
    pub freed_fte: f64,
    /// Efficiency gain as a percentage string, e.g. `"67.0%"`.
    pub efficiency: String,
}

impl ReportRow {
    pub fn from_record(seq: usize, record: &StepRecord) -> Self {
        Self {
            seq,
            name: record.name().to_owned(),
            weekly_frequency: record.weekly_frequency(),
            original_minutes: record.manual_minutes(),
            new_minutes: round_to(record.new_minutes(), 2),
            saved_hours: record.saved_hours_per_year(),
            freed_fte: record.freed_fte(),
            efficiency: format_percent(record.efficiency_ratio()),
        }
    }

    /// Cell values in [`CSV_HEADERS`] order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.seq.to_string(),
            self.name.clone(),
            self.weekly_frequency.to_string(),
            self.original_minutes.to_string(),
            self.new_minutes.to_string(),
            self.saved_hours.to_string(),
            self.freed_fte.to_string(),
            self.efficiency.clone(),
        ]
    }
}

/// Formats a ratio as a percentage with one decimal.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Builds report rows for every record, numbered from 1.
pub fn report_rows(ledger: &Ledger) -> Vec<ReportRow> {
    ledger
        .iter()
        .enumerate()
        .map(|(i, record)| ReportRow::from_record(i + 1, record))
        .collect()
}

/// Writes the ledger as CSV.
///
/// With `bom` set, the output starts with a UTF-8 byte order mark so that
/// spreadsheet tools detect the encoding of non-ASCII step names.
pub fn write_csv<W: Write>(ledger: &Ledger, mut writer: W, bom: bool) -> io::Result<()> {
    if bom {
        writer.write_all(UTF8_BOM)?;
    }
    write_csv_line(&mut writer, CSV_HEADERS.iter().copied())?;
    for row in report_rows(ledger) {
        let cells = row.cells();
        write_csv_line(&mut writer, cells.iter().map(String::as_str))?;
    }
    writer.flush()
}

fn write_csv_line<'a, W: Write>(
    writer: &mut W,
    cells: impl Iterator<Item = &'a str>,
) -> io::Result<()> {
    let line: Vec<String> = cells.map(escape_csv_field).collect();
    write!(writer, "{}\r\n", line.join(","))
}

/// Quotes a field when it contains a delimiter, quote or line break.
fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
