//! Extracts formula function usage from saved report definitions.
//!
//! Reports are stored as XML. Each one is mapped to a generic tree, normalized
//! into a [`Report`], scanned for catalog function names in its cell texts, and
//! merged into a [`UsageTable`] that is printed as a flat delimited table.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod usage;

pub use error::UsageError;
pub use pipeline::{MalformedPolicy, build_usage};
pub use report::{Report, normalize, parse_report};
pub use source::{ContentRecord, ReportQuery, ReportSource, SqlReportSource};
pub use usage::{FunctionCatalog, FunctionSet, OutputFormat, UsageTable, csv_escape, scan_usage, usage_lines};
