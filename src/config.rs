//! Configuration types for scrape-urls

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User-Agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/124.0.0.0 Safari/537.36"
);

/// Output file stem used when no output path is given
pub const DEFAULT_OUTPUT_STEM: &str = "scraped_content";

/// Output format of the aggregated results
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array, one object per URL
    #[default]
    Structured,
    /// Plain text blocks separated by rule lines
    Text,
    /// Paginated PDF with a fixed-width font
    Document,
}

impl OutputFormat {
    /// File extension written for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Structured => "json",
            OutputFormat::Text => "txt",
            OutputFormat::Document => "pdf",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Structured => "structured",
            OutputFormat::Text => "text",
            OutputFormat::Document => "document",
        };
        f.write_str(name)
    }
}

/// Settings for one scrape run
///
/// Built once before any fetch starts and never changed afterwards. Can be
/// loaded from a JSON file; missing keys take their defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    /// URLs given directly
    #[serde(default)]
    pub urls: Vec<String>,

    /// Files with one URL per line; `-` reads standard input
    #[serde(default)]
    pub urls_files: Vec<String>,

    /// Output path (None = `scraped_content.<ext>`)
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Output format (default: structured)
    #[serde(default)]
    pub format: OutputFormat,

    /// Per-request timeout, in seconds when serialized (default: 15)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// Explicit worker count (None = derived from CPU count)
    #[serde(default)]
    pub max_workers: Option<usize>,

    /// Maximum body bytes kept per response (default: 1,000,000)
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Report 4xx/5xx responses as `HTTPError` failures instead of successes
    #[serde(default)]
    pub error_statuses_as_failures: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            urls_files: Vec::new(),
            output: None,
            format: OutputFormat::default(),
            timeout: default_timeout(),
            max_workers: None,
            max_bytes: default_max_bytes(),
            user_agent: default_user_agent(),
            error_statuses_as_failures: false,
        }
    }
}

impl RunConfig {
    /// Load a config from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(
                format!("cannot read config file {}: {}", path.display(), e),
                "config",
            )
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            Error::config(
                format!("invalid config file {}: {}", path.display(), e),
                "config",
            )
        })
    }

    /// Reject values that would make the run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero", "timeout"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::config("user agent must not be empty", "user_agent"));
        }
        Ok(())
    }

    /// Where the output will be written
    pub fn output_path(&self) -> PathBuf {
        resolve_output_path(self.output.as_deref(), self.format)
    }
}

/// Convert a timeout given in seconds into a [`Duration`]
pub fn timeout_from_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(Error::config(
            format!("timeout must be a positive number of seconds, got {}", secs),
            "timeout",
        ));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| Error::config(format!("invalid timeout {}: {}", secs, e), "timeout"))
}

/// Resolve the output path for a format
///
/// - No path: `scraped_content.<ext>` in the working directory
/// - Path without extension: the format's extension is appended
/// - Leading `~/` expands to the home directory
pub fn resolve_output_path(explicit: Option<&Path>, format: OutputFormat) -> PathBuf {
    match explicit {
        None => PathBuf::from(format!("{}.{}", DEFAULT_OUTPUT_STEM, format.extension())),
        Some(path) => {
            let path = crate::utils::expand_home(path);
            if path.extension().is_none() {
                path.with_extension(format.extension())
            } else {
                path
            }
        }
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(15)
}

fn default_max_bytes() -> usize {
    1_000_000
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

// Duration serialization helper (fractional seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
