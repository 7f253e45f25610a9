//! `files`: scan report XML files from disk without a report store

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use super::{UsageOptions, emit};
use crate::config::FileConfig;
use crate::pipeline;
use crate::source::ContentRecord;

#[derive(Args, Debug, Clone)]
pub struct FilesArgs {
    /// Report XML files, scanned in the order given
    #[arg(required = true, value_name = "FILE")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub common: UsageOptions,
}

/// Handle the files command
pub fn handle_files_command(args: FilesArgs) -> Result<()> {
    let file = FileConfig::discover(args.common.config.as_deref())?;
    let catalog = file.catalog_source(args.common.functions.as_deref()).load()?;
    let format = file.output_format(args.common.format);
    let policy = file.malformed_policy(args.common.skip_malformed);

    let records = args
        .paths
        .iter()
        .map(read_record)
        .collect::<Result<Vec<_>>>()?;

    let table = pipeline::build_usage(&records, &catalog, policy)?;
    emit(&table, format, args.common.output.as_ref())
}

fn read_record(path: &PathBuf) -> Result<ContentRecord> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report file: {}", path.display()))?;

    Ok(ContentRecord {
        content_id: path.display().to_string(),
        name: path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        text_content: Some(text),
        ..Default::default()
    })
}
