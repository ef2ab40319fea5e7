//! Configuration management for the roi calculator.
//!
//! This crate loads `roi.yaml`, layers `ROI_*` environment overrides on top
//! of it, and provides typed access to the calculator's settings.

pub mod config;
