//! Runtime settings for a scan
//!
//! Values come from, in order of precedence: command-line flags or their
//! environment variables (`.env` is loaded first), the TOML config file, and
//! built-in defaults.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::MalformedPolicy;
use crate::source::{DEFAULT_CONTENT_TABLE, ReportQuery};
use crate::usage::{FunctionCatalog, OutputFormat};

pub const DEFAULT_FUNCTION_NAMES: &str = "function-names.json";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Contents of the optional `config.toml`
///
/// ```toml
/// database_url = "mysql://reports@db/sm_access"
/// table = "sm_access.content"
/// function_names = ["SUM", "AVG"]
/// skip_malformed = true
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub database_url: Option<String>,
    pub table: Option<String>,
    pub content_type: Option<i64>,
    pub report_type: Option<i64>,
    /// Path to a JSON function list
    pub functions: Option<PathBuf>,
    /// Inline function list, used when no path is configured anywhere
    pub function_names: Option<Vec<String>>,
    pub max_connections: Option<u32>,
    pub format: Option<OutputFormat>,
    pub skip_malformed: Option<bool>,
}

impl FileConfig {
    /// Default location: `<config dir>/report-function-usage/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("report-function-usage").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Function list: the flag path, then the file's path, then its inline
    /// names, then `function-names.json`
    pub fn catalog_source(&self, flag: Option<&Path>) -> CatalogSource {
        flag.map(Path::to_path_buf)
            .or_else(|| self.functions.clone())
            .map(CatalogSource::File)
            .or_else(|| self.function_names.clone().map(CatalogSource::Inline))
            .unwrap_or_else(|| CatalogSource::File(PathBuf::from(DEFAULT_FUNCTION_NAMES)))
    }

    pub fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.format).unwrap_or_default()
    }

    pub fn malformed_policy(&self, skip_flag: bool) -> MalformedPolicy {
        if skip_flag || self.skip_malformed.unwrap_or(false) {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Abort
        }
    }

    /// Load the explicit path if given, else the default path when it exists
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No config file found, using flags and environment only");
                Ok(Self::default())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Inline(Vec<String>),
}

impl CatalogSource {
    pub fn load(&self) -> Result<FunctionCatalog> {
        match self {
            CatalogSource::File(path) => Ok(FunctionCatalog::load(path)?),
            CatalogSource::Inline(names) => Ok(FunctionCatalog::new(names.clone())),
        }
    }
}

/// Values taken from command-line flags or their environment variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_url: Option<String>,
    pub table: Option<String>,
    pub content_type: Option<i64>,
    pub report_type: Option<i64>,
    pub functions: Option<PathBuf>,
    pub max_connections: Option<u32>,
    pub format: Option<OutputFormat>,
    pub skip_malformed: bool,
}

/// Fully resolved settings for the `scan` command
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub table: String,
    pub query: ReportQuery,
    pub catalog: CatalogSource,
    pub max_connections: u32,
    pub format: OutputFormat,
    pub policy: MalformedPolicy,
}

impl Settings {
    pub fn resolve(flags: Overrides, file: FileConfig) -> Result<Self> {
        let catalog = file.catalog_source(flags.functions.as_deref());
        let format = file.output_format(flags.format);
        let policy = file.malformed_policy(flags.skip_malformed);

        let database_url = flags
            .database_url
            .or(file.database_url)
            .context("No database URL configured. Set DATABASE_URL or pass --database-url.")?;

        let defaults = ReportQuery::default();
        let query = ReportQuery {
            content_type: flags.content_type.or(file.content_type).unwrap_or(defaults.content_type),
            report_type: flags.report_type.or(file.report_type).unwrap_or(defaults.report_type),
        };

        let settings = Self {
            database_url,
            table: flags
                .table
                .or(file.table)
                .unwrap_or_else(|| DEFAULT_CONTENT_TABLE.to_string()),
            query,
            catalog,
            max_connections: flags
                .max_connections
                .or(file.max_connections)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            format,
            policy,
        };

        info!(
            "Scanning {} (content_type = {}, report_type = {}, on malformed: {:?})",
            settings.table, settings.query.content_type, settings.query.report_type, settings.policy
        );
        Ok(settings)
    }
}
