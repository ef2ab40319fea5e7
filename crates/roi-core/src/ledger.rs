//! The step ledger: an ordered, caller-owned list of computed step records.
//!
//! Positions are zero-based and follow insertion order. Removing a record
//! shifts every later record down by one.

use serde::Serialize;

use crate::step::StepRecord;

/// Errors returned by positional ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("position {position} is out of range (ledger has {len} step(s))")]
    OutOfRange { position: usize, len: usize },
}

/// Aggregate totals over a ledger.
///
/// Totals are sums of each record's stored, already-rounded values, so they
/// can differ slightly from a totals-first computation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LedgerSummary {
    pub count: usize,
    pub total_saved_hours: f64,
    pub total_freed_fte: f64,
}

/// Ordered collection of step records for one session.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<StepRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record at the end.
    pub fn append(&mut self, record: StepRecord) {
        tracing::debug!(name = record.name(), position = self.records.len(), "append step");
        self.records.push(record);
    }

    /// Replaces the record at `position`, returning the old one.
    pub fn replace_at(
        &mut self,
        position: usize,
        record: StepRecord,
    ) -> Result<StepRecord, LedgerError> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(position)
            .ok_or(LedgerError::OutOfRange { position, len })?;
        tracing::debug!(name = record.name(), position, "replace step");
        Ok(std::mem::replace(slot, record))
    }

    /// Removes and returns the record at `position`.
    pub fn remove_at(&mut self, position: usize) -> Result<StepRecord, LedgerError> {
        if position >= self.records.len() {
            return Err(LedgerError::OutOfRange {
                position,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(position);
        tracing::debug!(name = removed.name(), position, "remove step");
        Ok(removed)
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.records.len(), "clear ledger");
        self.records.clear();
    }

    pub fn summarize(&self) -> LedgerSummary {
        self.records
            .iter()
            .fold(LedgerSummary::default(), |acc, r| LedgerSummary {
                count: acc.count + 1,
                total_saved_hours: acc.total_saved_hours + r.saved_hours_per_year(),
                total_freed_fte: acc.total_freed_fte + r.freed_fte(),
            })
    }

    pub fn get(&self, position: usize) -> Option<&StepRecord> {
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<StepRecord> for Ledger {
    fn from_iter<I: IntoIterator<Item = StepRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::compute_step;
    use crate::step::StepInput;
    use pretty_assertions::assert_eq;

    fn record(name: &str, freq: f64) -> StepRecord {
        compute_step(&StepInput::new(name, freq, 10.0).with_error_path(90.0, 2.0, 15.0))
    }

    fn names(ledger: &Ledger) -> Vec<&str> {
        ledger.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn empty_ledger_summary() {
        let ledger = Ledger::new();
        assert_eq!(ledger.summarize(), LedgerSummary::default());
        assert!(ledger.is_empty());
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.append(record("a", 10.0));
        ledger.append(record("b", 20.0));
        ledger.append(record("c", 30.0));
        assert_eq!(names(&ledger), vec!["a", "b", "c"]);
    }

    #[test]
    fn append_then_remove_restores_summary() {
        let mut ledger = Ledger::new();
        ledger.append(record("a", 10.0));
        ledger.append(record("b", 20.0));
        let before = ledger.summarize();

        ledger.append(record("c", 30.0));
        let during = ledger.summarize();
        assert_eq!(during.count, before.count + 1);

        ledger.remove_at(2).unwrap();
        let after = ledger.summarize();
        assert_eq!(after.count, before.count);
        assert!((after.total_saved_hours - before.total_saved_hours).abs() < 1e-9);
        assert!((after.total_freed_fte - before.total_freed_fte).abs() < 1e-9);
    }

    #[test]
    fn remove_shifts_later_positions() {
        let mut ledger: Ledger = ["a", "b", "c"].iter().map(|n| record(n, 10.0)).collect();
        let removed = ledger.remove_at(0).unwrap();
        assert_eq!(removed.name(), "a");
        assert_eq!(names(&ledger), vec!["b", "c"]);
        assert_eq!(ledger.get(0).map(StepRecord::name), Some("b"));
    }

    #[test]
    fn remove_on_empty_ledger_is_out_of_range() {
        let mut ledger = Ledger::new();
        for position in [0, 1, 7, usize::MAX] {
            assert_eq!(
                ledger.remove_at(position),
                Err(LedgerError::OutOfRange { position, len: 0 })
            );
        }
    }

    #[test]
    fn replace_at_swaps_record() {
        let mut ledger: Ledger = ["a", "b"].iter().map(|n| record(n, 10.0)).collect();
        let old = ledger.replace_at(1, record("b2", 50.0)).unwrap();
        assert_eq!(old.name(), "b");
        assert_eq!(names(&ledger), vec!["a", "b2"]);
        assert_eq!(ledger.get(1).unwrap().weekly_frequency(), 50.0);
    }

    #[test]
    fn replace_at_out_of_range_leaves_ledger_untouched() {
        let mut ledger: Ledger = ["a"].iter().map(|n| record(n, 10.0)).collect();
        assert_eq!(
            ledger.replace_at(1, record("x", 1.0)).map(|_| ()),
            Err(LedgerError::OutOfRange { position: 1, len: 1 })
        );
        assert_eq!(names(&ledger), vec!["a"]);
    }

    #[test]
    fn summary_sums_rounded_values() {
        let ledger: Ledger = [
            compute_step(
                &StepInput::new("发票处理", 100.0, 10.0).with_error_path(90.0, 2.0, 15.0),
            ),
            compute_step(&StepInput::new("Data entry", 50.0, 20.0)),
        ]
        .into_iter()
        .collect();

        let summary = ledger.summarize();
        assert_eq!(summary.count, 2);
        assert!((summary.total_saved_hours - (580.7 + 866.7)).abs() < 1e-9);
        assert!((summary.total_freed_fte - (0.29 + 0.433)).abs() < 1e-9);
    }

    #[test]
    fn summary_uses_tie_rounded_hours() {
        // Each step saves exactly 3.25 h, stored as 3.2.
        let ledger: Ledger = (0..2)
            .map(|_| compute_step(&StepInput::new("Step", 0.75, 5.0)))
            .collect();
        let summary = ledger.summarize();
        assert!((summary.total_saved_hours - 6.4).abs() < 1e-9);
    }

    #[test]
    fn borrowed_iteration_matches_iter() {
        let ledger: Ledger = ["a", "b", "c"].iter().map(|n| record(n, 10.0)).collect();
        let mut seen = Vec::new();
        for r in &ledger {
            seen.push(r.name());
        }
        assert_eq!(seen, names(&ledger));
    }

    #[test]
    fn clear_empties_ledger() {
        let mut ledger: Ledger = ["a", "b"].iter().map(|n| record(n, 10.0)).collect();
        ledger.clear();
        assert_eq!(ledger.len(), 0);
        assert_eq!(ledger.summarize().count, 0);
    }
}
