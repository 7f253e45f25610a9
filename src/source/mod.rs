//! Report store access
//!
//! The pipeline only needs one bulk read: every saved report of a given
//! content type and report type, with its XML definition.

pub mod db;

use async_trait::async_trait;

use crate::error::Result;

pub use db::{DEFAULT_CONTENT_TABLE, SqlReportSource};

/// A saved content row holding a report definition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentRecord {
    pub content_id: String,
    pub name: String,
    pub created_date: Option<String>,
    pub modified_date: Option<String>,
    /// Report XML; `None` when the column is NULL
    pub text_content: Option<String>,
}

/// Filter for the content rows to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQuery {
    pub content_type: i64,
    pub report_type: i64,
}

impl ReportQuery {
    /// Content type of saved reports
    pub const CONTENT_TYPE_REPORT: i64 = 0;
    /// Report type of advanced reports
    pub const REPORT_TYPE_ADVANCED: i64 = 0;
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self {
            content_type: Self::CONTENT_TYPE_REPORT,
            report_type: Self::REPORT_TYPE_ADVANCED,
        }
    }
}

#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Load every matching record in one read
    async fn fetch_reports(&self, query: &ReportQuery) -> Result<Vec<ContentRecord>>;
}
