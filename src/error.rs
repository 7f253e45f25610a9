//! Error kinds raised by the usage extraction pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UsageError {
    /// Bulk read from the report store failed
    #[error("Failed to fetch reports from source store: {0}")]
    SourceFetch(#[from] sqlx::Error),

    /// Report text is not XML, or lacks the mandatory `main` section
    #[error("Malformed report {}: {reason}", .content_id.as_deref().unwrap_or("<unknown>"))]
    MalformedReport {
        content_id: Option<String>,
        reason: String,
    },

    #[error("Invalid function catalog {path:?}: {reason}")]
    Catalog { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl UsageError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        UsageError::MalformedReport {
            content_id: None,
            reason: reason.into(),
        }
    }

    /// Attach the offending record id to a malformed-report error
    pub fn for_record(self, id: &str) -> Self {
        match self {
            UsageError::MalformedReport { reason, .. } => UsageError::MalformedReport {
                content_id: Some(id.to_string()),
                reason,
            },
            other => other,
        }
    }

    pub fn is_malformed_report(&self) -> bool {
        matches!(self, UsageError::MalformedReport { .. })
    }
}

pub type Result<T> = std::result::Result<T, UsageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_includes_record_id() {
        let err = UsageError::malformed("missing <main> section").for_record("42");
        assert_eq!(err.to_string(), "Malformed report 42: missing <main> section");
        assert!(err.is_malformed_report());
    }

    #[test]
    fn test_malformed_message_without_record_id() {
        let err = UsageError::malformed("not XML");
        assert_eq!(err.to_string(), "Malformed report <unknown>: not XML");
    }
}
