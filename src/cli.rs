//! Command-line surface

use clap::Parser;
use scrape_urls::config::timeout_from_secs;
use scrape_urls::{OutputFormat, Result, RunConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scrape-urls")]
#[command(about = "Download multiple URLs concurrently and write their bodies to a single file")]
#[command(version)]
pub struct Cli {
    /// URL to scrape (can be provided multiple times)
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// File with newline-separated URLs; use '-' to read from stdin (repeatable)
    #[arg(long = "urls-file", value_name = "PATH")]
    pub urls_files: Vec<String>,

    /// Output file path (default: scraped_content.<json|txt|pdf>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Per-request timeout in seconds (default: 15)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Number of concurrent workers (default: based on CPU count)
    #[arg(long, value_name = "N")]
    pub max_workers: Option<usize>,

    /// Maximum bytes to read for each response body before truncating (default: 1,000,000)
    #[arg(long, value_name = "BYTES")]
    pub max_bytes: Option<usize>,

    /// User-Agent header to send with each request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Report 4xx/5xx responses as HTTPError failures instead of successes
    #[arg(long)]
    pub error_status: bool,

    /// JSON config file; command-line flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log per-request detail to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the run configuration: config file (if any), then flags on top
    pub fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };

        config.urls.extend(self.urls);
        config.urls_files.extend(self.urls_files);
        if let Some(output) = self.output {
            config.output = Some(output);
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(secs) = self.timeout {
            config.timeout = timeout_from_secs(secs)?;
        }
        if let Some(max_workers) = self.max_workers {
            config.max_workers = Some(max_workers);
        }
        if let Some(max_bytes) = self.max_bytes {
            config.max_bytes = max_bytes;
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
        if self.error_status {
            config.error_statuses_as_failures = true;
        }

        config.validate()?;
        Ok(config)
    }
}
