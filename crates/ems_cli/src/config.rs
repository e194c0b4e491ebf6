//! Command-line and environment configuration for the console.

use clap::Parser;
use std::path::{Path, PathBuf};

const DEFAULT_LOG_SUBDIR: &str = "logs";

#[derive(Parser, Debug, Clone)]
#[command(name = "ems", version, about = "Employee record management console")]
pub struct CliConfig {
    /// SQLite database file; created on first run.
    #[arg(long, env = "EMS_DB_PATH", default_value = "ems.sqlite3")]
    pub db: PathBuf,

    /// Keep records in memory only; nothing is written to disk.
    #[arg(long)]
    pub in_memory: bool,

    /// Log directory. Relative paths resolve against the working directory.
    #[arg(long, env = "EMS_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// One of trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "EMS_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Log level to start with.
    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(ems_core::default_log_level())
    }

    /// Absolute log directory, as required by `ems_core::init_logging`.
    pub fn absolute_log_dir(&self, working_dir: &Path) -> PathBuf {
        match &self.log_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => working_dir.join(dir),
            None => working_dir.join(DEFAULT_LOG_SUBDIR),
        }
    }
}
