//! End-to-end tests for the usage extraction pipeline
//!
//! Records come from an in-memory report source so these run without a
//! database; `source_test.rs` covers the SQL path.

use async_trait::async_trait;
use report_function_usage::pipeline::{self, MalformedPolicy};
use report_function_usage::{
    ContentRecord, FunctionCatalog, ReportQuery, ReportSource, UsageError, build_usage, usage_lines,
};
use std::sync::Mutex;

/// Report source backed by a fixed list, recording the queries it receives
struct MemorySource {
    records: Vec<ContentRecord>,
    queries: Mutex<Vec<ReportQuery>>,
}

impl MemorySource {
    fn new(records: Vec<ContentRecord>) -> Self {
        Self {
            records,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ReportSource for MemorySource {
    async fn fetch_reports(&self, query: &ReportQuery) -> Result<Vec<ContentRecord>, UsageError> {
        self.queries.lock().unwrap().push(*query);
        Ok(self.records.clone())
    }
}

struct FailingSource;

#[async_trait]
impl ReportSource for FailingSource {
    async fn fetch_reports(&self, _query: &ReportQuery) -> Result<Vec<ContentRecord>, UsageError> {
        Err(UsageError::SourceFetch(sqlx::Error::PoolClosed))
    }
}

fn record(id: &str, xml: &str) -> ContentRecord {
    ContentRecord {
        content_id: id.to_string(),
        name: format!("content {}", id),
        created_date: Some("2024-01-01 00:00:00".to_string()),
        modified_date: Some("2024-02-01 00:00:00".to_string()),
        text_content: Some(xml.to_string()),
    }
}

fn report_xml(name: &str, cells: &[&str]) -> String {
    let cells: String = cells
        .iter()
        .enumerate()
        .map(|(i, text)| {
            format!(
                "<cell><id>{}</id><cell_text>{}</cell_text><cell_row>{}</cell_row><cell_col>0</cell_col></cell>",
                i + 1,
                text,
                i
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<report>
  <main>
    <id>abc</id>
    <report_name>{}</report_name>
    <version>2</version>
    <sql_stmt>SELECT 1</sql_stmt>
  </main>
  <entity><entity_name>sales</entity_name></entity>
  {}
  <row><group_type>detail</group_type></row>
  <join><entity_from_name>a</entity_from_name></join>
</report>"#,
        name, cells
    )
}

fn catalog(names: &[&str]) -> FunctionCatalog {
    names.iter().copied().collect()
}

#[tokio::test]
async fn test_single_report_end_to_end() {
    let source = MemorySource::new(vec![record(
        "1",
        &report_xml("Report A", &["=SUM(Revenue)", "=Count(X)"]),
    )]);

    let table = pipeline::run(&source, &ReportQuery::default(), &catalog(&["SUM", "AVG"]), MalformedPolicy::Abort)
        .await
        .unwrap();

    assert_eq!(
        usage_lines(&table),
        vec!["report_name function location", "Report A,SUM,cell_text"]
    );
    assert_eq!(*source.queries.lock().unwrap(), vec![ReportQuery::default()]);
}

#[tokio::test]
async fn test_fetch_failure_propagates() {
    let err = pipeline::run(&FailingSource, &ReportQuery::default(), &catalog(&["SUM"]), MalformedPolicy::Skip)
        .await
        .unwrap_err();
    assert!(matches!(err, UsageError::SourceFetch(_)));
}

#[test]
fn test_duplicate_report_name_overwrites_earlier_usage() {
    let records = vec![
        record("1", &report_xml("Shared", &["=SUM(a)", "=AVG(b)"])),
        record("2", &report_xml("Other", &["=MAX(c)"])),
        record("3", &report_xml("Shared", &["=MIN(d)"])),
    ];

    let table = build_usage(&records, &catalog(&["SUM", "AVG", "MIN", "MAX"]), MalformedPolicy::Abort).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.recorded(), 3);
    assert_eq!(
        usage_lines(&table),
        vec![
            "report_name function location",
            "Shared,MIN,cell_text",
            "Other,MAX,cell_text",
        ]
    );
}

#[test]
fn test_reports_are_emitted_in_fetch_order() {
    let records = vec![
        record("1", &report_xml("Zulu", &["=avg(a)"])),
        record("2", &report_xml("Alpha, Inc", &["=Sum(b) + AVG(c)"])),
    ];

    let table = build_usage(&records, &catalog(&["SUM", "AVG"]), MalformedPolicy::Abort).unwrap();

    assert_eq!(
        usage_lines(&table),
        vec![
            "report_name function location",
            "Zulu,AVG,cell_text",
            "\"Alpha, Inc\",SUM,cell_text",
            "\"Alpha, Inc\",AVG,cell_text",
        ]
    );
}

#[test]
fn test_malformed_report_aborts_by_default() {
    let records = vec![
        record("1", &report_xml("Good", &["=SUM(a)"])),
        record("2", "<report><cell><cell_text>=SUM(a)</cell_text></cell></report>"),
    ];

    let err = build_usage(&records, &catalog(&["SUM"]), MalformedPolicy::Abort).unwrap_err();
    match err {
        UsageError::MalformedReport { content_id, .. } => assert_eq!(content_id.as_deref(), Some("2")),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_malformed_report_is_skipped_when_requested() {
    let mut null_text = record("3", "");
    null_text.text_content = None;

    let records = vec![
        record("1", "this is not xml"),
        record("2", &report_xml("Good", &["=SUM(a)"])),
        null_text,
    ];

    let table = build_usage(&records, &catalog(&["SUM"]), MalformedPolicy::Skip).unwrap();
    assert_eq!(table.recorded(), 1);
    assert_eq!(
        usage_lines(&table),
        vec!["report_name function location", "Good,SUM,cell_text"]
    );
}

#[test]
fn test_irregular_report_shapes_do_not_abort_the_batch() {
    let irregular = "<report><main><report_name>Loose</report_name>\
        <description><p>quarterly</p></description></main>\
        <entity>orders</entity>\
        <row><group_field>region</group_field><group_field>year</group_field></row>\
        <cell>note</cell><cell><cell_text>=SUM(a)</cell_text></cell></report>";
    let records = vec![
        record("1", irregular),
        record("2", &report_xml("Strict", &["=AVG(b)"])),
    ];

    let table = build_usage(&records, &catalog(&["SUM", "AVG"]), MalformedPolicy::Abort).unwrap();
    assert_eq!(
        usage_lines(&table),
        vec![
            "report_name function location",
            "Loose,SUM,cell_text",
            "Strict,AVG,cell_text",
        ]
    );
}

#[test]
fn test_empty_catalog_yields_header_only() {
    let records = vec![record("1", &report_xml("Report A", &["=SUM(a)"]))];
    let table = build_usage(&records, &FunctionCatalog::default(), MalformedPolicy::Abort).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(usage_lines(&table), vec!["report_name function location"]);
}

#[test]
fn test_report_fixture_file() {
    let xml = include_str!("fixtures/advanced_report.xml");
    let table = build_usage(
        &[record("fixture", xml)],
        &catalog(&["DateDiff", "IIf", "Sum", "Avg", "Left"]),
        MalformedPolicy::Abort,
    )
    .unwrap();

    assert_eq!(
        usage_lines(&table),
        vec![
            "report_name function location",
            "Quarterly Revenue,Sum,cell_text",
            "Quarterly Revenue,IIf,cell_text",
            "Quarterly Revenue,DateDiff,cell_text",
        ]
    );
}
