//! Core types for the roi calculator.
//!
//! This crate holds the ROI formula, the in-memory step ledger, input
//! validation, and the flat report rows used for tables and CSV export.

pub mod formula;
pub mod ledger;
pub mod report;
pub mod step;
pub mod validation;
