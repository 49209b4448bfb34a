//! wcag-report core library.
//!
//! Turns raw axe-core audit output into a structured WCAG compliance report.
//! The pipeline is pure and synchronous: normalize the raw lists, classify
//! each violation by severity and topic, enrich each failing node with WCAG
//! criteria and remediation guidance, and aggregate node counts.
//!
//! High-level modules:
//! - `models`: Raw audit input, guidance schema, and report output structs.
//! - `classify`: Severity and category assignment.
//! - `criteria`: WCAG criterion extraction from rule tags.
//! - `remediation`: Guidance tables and per-node remediation lookup.
//! - `report`: Report assembly and summary statistics.
//! - `batch`: Loading audit files and processing many at once.
//! - `config`: Discovery and effective configuration resolution.
//! - `output`: Human/JSON printers.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `error`: Errors raised while loading inputs.
//! - `utils`: Supporting helpers.
pub mod batch;
pub mod classify;
pub mod cli;
pub mod config;
pub mod criteria;
pub mod error;
pub mod models;
pub mod output;
pub mod remediation;
pub mod report;
pub mod utils;

pub use models::{ErrorEnvelope, Report};
pub use report::{build_report, build_report_with, ReportOptions};
