//! Usage table output
//!
//! The legacy layout is kept byte-for-byte: a space-separated header, then
//! `report,function,cell_text` lines with a narrow escaping rule (see
//! [`csv_escape`]). `Csv` is an opt-in RFC 4180 rendering of the same rows.

use std::io::Write;

use clap::ValueEnum;
use serde::Deserialize;

use super::table::UsageTable;
use crate::error::Result;

pub const LEGACY_HEADER: &str = "report_name function location";

/// Location label for every row; usage is only ever found in cell text
pub const CELL_TEXT_LOCATION: &str = "cell_text";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Header line plus comma-separated rows with minimal quoting (default)
    #[default]
    Legacy,
    /// Standard CSV with a comma-separated header and full quoting rules
    Csv,
}

/// Quote a field containing a comma.
///
/// Only the first `"` in such a field is removed before wrapping; further
/// quotes are left as they are. Fields without a comma are returned unchanged.
pub fn csv_escape(text: &str) -> String {
    if !text.contains(',') {
        return text.to_string();
    }
    format!("\"{}\"", text.replacen('"', "", 1))
}

/// Legacy lines: header followed by one line per (report, function) pair
pub fn usage_lines(table: &UsageTable) -> Vec<String> {
    std::iter::once(LEGACY_HEADER.to_string())
        .chain(table.pairs().map(|(report, function)| {
            format!(
                "{},{},{}",
                csv_escape(report),
                csv_escape(function),
                CELL_TEXT_LOCATION
            )
        }))
        .collect()
}

/// Write the table to `out`, one newline-terminated line per row
pub fn write_table<W: Write>(table: &UsageTable, format: OutputFormat, mut out: W) -> Result<()> {
    match format {
        OutputFormat::Legacy => {
            for line in usage_lines(table) {
                writeln!(out, "{}", line)?;
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut out);
            writer
                .write_record(["report_name", "function", "location"])
                .map_err(csv_io_error)?;
            for (report, function) in table.pairs() {
                writer
                    .write_record([report, function, CELL_TEXT_LOCATION])
                    .map_err(csv_io_error)?;
            }
            writer.flush()?;
        }
    }
    out.flush()?;
    Ok(())
}

fn csv_io_error(error: csv::Error) -> std::io::Error {
    std::io::Error::other(error)
}
