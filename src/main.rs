use anyhow::Result;
use clap::Parser;
use log::info;

use report_function_usage::cli::Cli;
use report_function_usage::cli::app::Commands;
use report_function_usage::cli::commands::{handle_files_command, handle_scan_command};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logs go to stderr (or --log-file) so stdout carries only the table
    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &cli.log_file {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        logger.target(env_logger::Target::Pipe(Box::new(log_file)));
    }
    logger.init();

    info!("Starting report-function-usage");

    match cli.command {
        Commands::Scan(args) => handle_scan_command(args).await?,
        Commands::Files(args) => handle_files_command(args)?,
    }

    Ok(())
}
