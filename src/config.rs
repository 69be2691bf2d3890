use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::crawler::CrawlerConfig;

/// Log levels as defined in log2 crate
#[derive(Debug, Serialize, Deserialize, Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Command-line arguments for a whole run. Crawl mechanics are handed to the
/// engine through `crawler_config`; output placement stays here.
#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Seed URLs, one independent crawl per entry
    pub base_urls: Vec<String>,
    /// Maximum number of pages to crawl per seed
    #[arg(long, default_value = "30")]
    pub max_pages: usize,
    /// Timeout for a single page request in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,
    /// Directory the per-domain corpus files are written to
    #[arg(short, long, default_value = "./results")]
    pub output_dir: PathBuf,
    /// Attempts per page before giving up on it
    #[arg(long, default_value = "3")]
    pub retry_count: usize,
    /// Pages fetched in parallel within one round
    #[arg(long, default_value = "5")]
    pub max_workers: usize,
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", value_enum)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_pages == 0 {
            anyhow::bail!("max_pages must be greater than 0");
        }
        if self.max_workers == 0 {
            anyhow::bail!("max_workers must be greater than 0");
        }
        if self.retry_count == 0 {
            anyhow::bail!("retry_count must be greater than 0");
        }
        if self.timeout == 0 {
            anyhow::bail!("timeout must be greater than 0");
        }
        Ok(())
    }

    /// Crawl-engine view of these arguments.
    pub fn crawler_config(&self) -> CrawlerConfig {
        CrawlerConfig::new()
            .with_max_pages(self.max_pages)
            .with_max_workers(self.max_workers)
            .with_retry_count(self.retry_count)
            .with_timeout_sec(self.timeout)
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}
