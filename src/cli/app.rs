use super::commands::files::FilesArgs;
use super::commands::scan::ScanArgs;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "report-function-usage")]
#[command(about = "List which formula functions each saved report uses")]
#[command(version)]
pub struct Cli {
    /// Write log output to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan every advanced report in the report store
    Scan(ScanArgs),
    /// Scan report XML files from disk
    Files(FilesArgs),
}
