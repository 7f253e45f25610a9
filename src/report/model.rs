//! Canonical report model
//!
//! Every repeatable section is a `Vec`, so a report with one cell and a
//! report with many look the same to downstream code. Scalar values are kept
//! as the strings found in the XML. Apart from `report_name`, a known field
//! holding anything other than text (nested or repeated elements) reads as
//! absent.

use serde::{Deserialize, Deserializer};

use super::xml::RawNode;

#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    pub main: ReportMain,
    #[serde(default)]
    pub entity: Vec<ReportEntity>,
    #[serde(default)]
    pub cell: Vec<ReportCell>,
    #[serde(default)]
    pub row: Vec<ReportRow>,
    #[serde(default)]
    pub column: Vec<ReportColumn>,
    #[serde(default)]
    pub sort: Vec<ReportSort>,
    #[serde(default)]
    pub filter: Vec<ReportFilter>,

    // Consumed opaquely
    pub join: Option<RawNode>,
    pub topn: Option<RawNode>,
    pub widget: Option<RawNode>,
    pub dynamicfilters: Option<RawNode>,
}

/// Report identity and configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportMain {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "required_text")]
    pub report_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub folder_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub folder_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub version: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub report_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sql_stmt: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub filter_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub page_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub page_orientation: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub output_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub show_grid: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub fit_page_width: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub visualization_report: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub row_range_limit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportEntity {
    #[serde(deserialize_with = "lenient_text")]
    pub entity_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub group_by_flag: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportCell {
    #[serde(deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub widget_id: Option<String>,
    /// Formula or literal text; anything that is not plain text reads as absent
    #[serde(deserialize_with = "lenient_text")]
    pub cell_text: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cell_type: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cell_row: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cell_col: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cell_colspan: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub cell_rowspan: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub wrap_text_flag: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub font_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub font_size: Option<String>,
}

impl ReportCell {
    /// Cell text, if present and non-empty
    pub fn text(&self) -> Option<&str> {
        self.cell_text.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportRow {
    #[serde(deserialize_with = "lenient_text")]
    pub group_type: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub group_field: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub row_height: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub repeat_flag: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub collapse_header_flag: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportColumn {
    #[serde(deserialize_with = "lenient_text")]
    pub column_width: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportSort {
    #[serde(deserialize_with = "lenient_text")]
    pub sort_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub sort_title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub order_num: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub ascending_flag: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportFilter {
    #[serde(deserialize_with = "lenient_text")]
    pub filter_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub order_num: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub operator: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub prompt_flag: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub and_flag: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub group_with_next_flag: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub filter_ref_id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub filter_title: Option<String>,
    pub values: Option<RawNode>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawNode::deserialize(deserializer)? {
        RawNode::String(text) => Some(text),
        _ => None,
    })
}

fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match RawNode::deserialize(deserializer)? {
        RawNode::String(text) => Ok(text),
        other => Err(serde::de::Error::custom(format!(
            "expected text for report_name, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text_accessor_skips_empty() {
        let cell = ReportCell {
            cell_text: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(cell.text(), None);

        let cell = ReportCell {
            cell_text: Some("=AVG(x)".to_string()),
            ..Default::default()
        };
        assert_eq!(cell.text(), Some("=AVG(x)"));
    }

    #[test]
    fn test_nested_cell_text_reads_as_absent() {
        let cell: ReportCell = serde_json::from_value(json!({
            "cell_text": { "b": "bold" },
            "cell_row": "1"
        }))
        .unwrap();
        assert_eq!(cell.cell_text, None);
        assert_eq!(cell.cell_row.as_deref(), Some("1"));
    }

    #[test]
    fn test_nested_or_repeated_fields_read_as_absent() {
        let main: ReportMain = serde_json::from_value(json!({
            "report_name": "A",
            "description": { "p": "x" },
            "version": ["1", "2"]
        }))
        .unwrap();
        assert_eq!(main.report_name, "A");
        assert_eq!(main.description, None);
        assert_eq!(main.version, None);

        let row: ReportRow = serde_json::from_value(json!({
            "group_field": ["region", "year"],
            "row_height": "20"
        }))
        .unwrap();
        assert_eq!(row.group_field, None);
        assert_eq!(row.row_height.as_deref(), Some("20"));
    }

    #[test]
    fn test_report_name_is_required() {
        let result: Result<ReportMain, _> = serde_json::from_value(json!({ "id": "7" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_report_name_must_be_text() {
        let result: Result<ReportMain, _> =
            serde_json::from_value(json!({ "report_name": { "x": "y" } }));
        assert!(result.is_err());
    }
}
