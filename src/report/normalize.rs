//! Restores the cardinality of repeatable report sections
//!
//! The generic XML mapping stores a tag that appears once as a bare value.
//! For the sections below that is wrong: a report with one cell still has a
//! *list* of cells. The fix is an explicit allow-list, not a guess from shape.

use log::debug;
use serde_json::{Map, Value};

use super::model::Report;
use super::xml::{self, RawNode};
use crate::error::{Result, UsageError};

/// Root tag of a report document
pub const REPORT_ROOT: &str = "report";

/// Sections that are always sequences in the canonical model
pub const MAINTAIN_AS_ARRAY: [&str; 6] = ["entity", "cell", "row", "column", "sort", "filter"];

/// Parse a report document straight into its canonical form
pub fn parse_report(text: &str) -> Result<Report> {
    let (root, raw) = xml::parse_document(text)?;
    if root != REPORT_ROOT {
        return Err(UsageError::malformed(format!(
            "Expected <{}> root element, found <{}>",
            REPORT_ROOT, root
        )));
    }
    normalize(raw)
}

/// Convert a raw report node into the canonical model
pub fn normalize(mut raw: RawNode) -> Result<Report> {
    let sections = raw
        .as_object_mut()
        .ok_or_else(|| UsageError::malformed("Report element has no sections"))?;

    if !sections.contains_key("main") {
        return Err(UsageError::malformed("Missing <main> section"));
    }

    coerce_arrays(sections);

    let report: Report = serde_json::from_value(raw)
        .map_err(|e| UsageError::malformed(format!("Unexpected report structure: {}", e)))?;

    debug!(
        "Normalized report '{}': {} entities, {} cells",
        report.main.report_name,
        report.entity.len(),
        report.cell.len()
    );
    Ok(report)
}

/// Wrap bare values of the allow-listed sections in single-element arrays.
///
/// Absent sections stay absent and arrays keep their length and order. An item
/// that is not a record, such as an empty element (`<cell/>`) or a text-only
/// one (`<entity>orders</entity>`), is turned into an empty record.
pub fn coerce_arrays(sections: &mut Map<String, Value>) {
    for field in MAINTAIN_AS_ARRAY {
        let Some(value) = sections.get_mut(field) else {
            continue;
        };

        if !value.is_array() {
            let single = value.take();
            *value = Value::Array(vec![single]);
        }

        if let Value::Array(items) = value {
            for item in items.iter_mut().filter(|item| !item.is_object()) {
                debug!("Dropping non-record <{}> content: {}", field, item);
                *item = Value::Object(Map::new());
            }
        }
    }
}
