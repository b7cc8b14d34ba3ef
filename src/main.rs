use crate::config::cli::Args;
use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::{ChromeRenderer, FileSystemStore};
use crate::services::{HarvestService, TracingReporter};
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;

mod config;
mod domain;
mod error;
mod infrastructure;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt().with_max_level(args.log_level).init();

    let config = Config::from_args(args)?;
    config.ensure_directories()?;

    let renderer = Arc::new(ChromeRenderer::new(
        config.args.chrome_executable.clone(),
        !config.args.no_sandbox,
    ));
    let store = Arc::new(FileSystemStore::new(&config.args.data_dir));

    let harvest = HarvestService::new(&config, renderer, store, Arc::new(TracingReporter))?
        .with_progress(std::io::stderr().is_terminal());
    harvest.process().await?;

    info!("Harvest completed");
    Ok(())
}
