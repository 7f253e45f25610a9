//! SQL-backed report source

use async_trait::async_trait;
use log::{debug, info};
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;

use super::{ContentRecord, ReportQuery, ReportSource};
use crate::error::{Result, UsageError};

pub const DEFAULT_CONTENT_TABLE: &str = "sm_access.content";

type ContentRow = (
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

/// Reads report definitions from a content table through a connection pool
pub struct SqlReportSource {
    pool: AnyPool,
    table: String,
}

impl SqlReportSource {
    /// Connect to `database_url` (`mysql://…`, `sqlite:…`)
    pub async fn connect(database_url: &str, max_connections: u32, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await?;

        debug!("Connected to report store ({} max connections)", max_connections);
        Self::from_pool(pool, table)
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: AnyPool, table: &str) -> Result<Self> {
        validate_table_name(table)?;
        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Release every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Closed report store connection pool");
    }

    fn select_sql(&self) -> String {
        // Columns are cast to text so the query decodes the same on every driver
        format!(
            r#"
            SELECT CAST(content_id AS CHAR), CAST(name AS CHAR),
                   CAST(created_date AS CHAR), CAST(modified_date AS CHAR),
                   CAST(text_content AS CHAR)
            FROM {}
            WHERE content_type = ? AND report_type = ?
            "#,
            self.table
        )
    }
}

#[async_trait]
impl ReportSource for SqlReportSource {
    async fn fetch_reports(&self, query: &ReportQuery) -> Result<Vec<ContentRecord>> {
        let sql = self.select_sql();
        let rows: Vec<ContentRow> = sqlx::query_as(&sql)
            .bind(query.content_type)
            .bind(query.report_type)
            .fetch_all(&self.pool)
            .await?;

        info!(
            "Fetched {} report records from {} (content_type = {}, report_type = {})",
            rows.len(),
            self.table,
            query.content_type,
            query.report_type
        );

        Ok(rows
            .into_iter()
            .map(
                |(content_id, name, created_date, modified_date, text_content)| ContentRecord {
                    content_id,
                    name: name.unwrap_or_default(),
                    created_date,
                    modified_date,
                    text_content,
                },
            )
            .collect())
    }
}

/// Table names are interpolated into SQL, so only plain identifiers are allowed
fn validate_table_name(table: &str) -> Result<()> {
    let valid = !table.is_empty()
        && table.split('.').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if valid {
        Ok(())
    } else {
        Err(UsageError::Config(format!("Invalid content table name '{}'", table)))
    }
}
