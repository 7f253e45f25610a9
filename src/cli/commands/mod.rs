pub mod files;
pub mod scan;

use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::usage::{OutputFormat, UsageTable, write_table};

pub use files::handle_files_command;
pub use scan::handle_scan_command;

/// Options shared by every scanning command
#[derive(Args, Debug, Clone, Default)]
pub struct UsageOptions {
    /// JSON file with the function names to look for
    #[arg(short, long, env = "FUNCTION_NAMES", value_name = "PATH")]
    pub functions: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Skip reports whose XML cannot be read instead of stopping the run
    #[arg(long)]
    pub skip_malformed: bool,

    /// Save the table to a file instead of printing it
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML config file (defaults to the user config directory)
    #[arg(long, env = "REPORT_USAGE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Write the table to `--output` or stdout
pub(crate) fn emit(table: &UsageTable, format: OutputFormat, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_table(table, format, BufWriter::new(file))
                .with_context(|| format!("Failed to write output to: {}", path.display()))?;
            log::info!("Usage table saved to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_table(table, format, &mut out).context("Failed to write usage table")?;
            out.flush()?;
        }
    }
    Ok(())
}
