//! Batch extraction: fetched records in, usage table out

use log::{debug, info, warn};

use crate::error::{Result, UsageError};
use crate::report::{Report, parse_report};
use crate::source::{ContentRecord, ReportQuery, ReportSource};
use crate::usage::{FunctionCatalog, UsageTable, scan_usage};

/// What to do with a record whose XML cannot be read as a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Stop the run with the error
    #[default]
    Abort,
    /// Log a warning and leave the record out of the table
    Skip,
}

/// Scan every record, in order, into a usage table
pub fn build_usage(
    records: &[ContentRecord],
    catalog: &FunctionCatalog,
    policy: MalformedPolicy,
) -> Result<UsageTable> {
    let mut table = UsageTable::new();
    let mut skipped = 0usize;

    for record in records {
        let report = match parse_record(record) {
            Ok(report) => report,
            Err(e) if policy == MalformedPolicy::Skip && e.is_malformed_report() => {
                warn!("Skipping record '{}' ({}): {}", record.content_id, record.name, e);
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        let used = scan_usage(&report, catalog);
        debug!(
            "Report '{}' ({} cells) uses {} catalog functions",
            report.main.report_name,
            report.cell.len(),
            used.len()
        );
        table.record(&report.main.report_name, used);
    }

    info!(
        "Scanned {} reports ({} distinct names) against {} functions ({} skipped)",
        table.recorded(),
        table.len(),
        catalog.len(),
        skipped
    );
    Ok(table)
}

fn parse_record(record: &ContentRecord) -> Result<Report> {
    let text = record.text_content.as_deref().ok_or_else(|| {
        UsageError::malformed("Report text is NULL").for_record(&record.content_id)
    })?;
    parse_report(text).map_err(|e| e.for_record(&record.content_id))
}

/// Fetch every matching report from `source` and build its usage table
pub async fn run(
    source: &dyn ReportSource,
    query: &ReportQuery,
    catalog: &FunctionCatalog,
    policy: MalformedPolicy,
) -> Result<UsageTable> {
    let records = source.fetch_reports(query).await?;
    build_usage(&records, catalog, policy)
}
