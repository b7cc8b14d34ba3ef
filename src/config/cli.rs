use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to scraper configuration file; built-in defaults are used when it is missing
    #[arg(long, default_value = "scraper_config.json")]
    pub config_file: PathBuf,

    /// Directory to store output data
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Seconds one page may take from browser launch to serialized markup
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Number of schedule days fetched at the same time
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Chromium binary to launch instead of the auto-detected one
    #[arg(long, env = "CHROME_EXECUTABLE")]
    pub chrome_executable: Option<PathBuf>,

    /// Launch the browser without its sandbox (needed when running as root in containers)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: Level,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch the medal table snapshot only
    Medals,
    /// Fetch the daily schedule only
    Schedule {
        /// First day (YYYY-MM-DD), defaults to the configured start date
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day (YYYY-MM-DD), inclusive, defaults to the configured end date
        #[arg(long)]
        end: Option<NaiveDate>,
    },
}
