//! Run orchestration: plan, execute, finish
//!
//! The three steps are public so a caller (the binary) can report progress
//! between them. [`run`] chains them for library users.

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::render::write_output;
use crate::scheduler;
use crate::sequencer;
use crate::sources;
use crate::types::{FetchRequest, ResultSet};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything resolved before the first request goes out
#[derive(Clone, Debug)]
pub struct Plan {
    /// Requests in input order
    pub requests: Vec<FetchRequest>,
    /// Concurrent worker slots
    pub workers: usize,
}

/// Outcome of a completed run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    /// Successful fetches
    pub succeeded: usize,
    /// All fetches
    pub total: usize,
    /// Where the output was written
    pub output: PathBuf,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Finished. {}/{} succeeded. Output -> {}",
            self.succeeded,
            self.total,
            self.output.display()
        )
    }
}

/// Resolve URLs and worker count
///
/// # Errors
///
/// - [`Error::Config`] for invalid settings or unreadable list files
/// - [`Error::NoTargets`] when no URL remains after deduplication
pub fn plan(config: &RunConfig) -> Result<Plan> {
    config.validate()?;
    let urls = sources::load(&config.urls, &config.urls_files)?;
    if urls.is_empty() {
        return Err(Error::NoTargets);
    }

    let workers = scheduler::worker_count(
        urls.len(),
        config.max_workers,
        scheduler::available_parallelism(),
    );
    Ok(Plan {
        requests: FetchRequest::from_urls(urls),
        workers,
    })
}

/// Fetch every planned request and restore input order
pub async fn execute(plan: Plan, fetcher: Arc<dyn Fetcher>) -> ResultSet {
    let total = plan.requests.len();
    tracing::info!(urls = total, workers = plan.workers, "starting fetch");

    let results = scheduler::run(plan.requests, plan.workers, fetcher).await;
    let ordered = sequencer::order(results);

    tracing::info!(
        succeeded = ordered.succeeded(),
        total = ordered.len(),
        "fetch complete"
    );
    ordered
}

/// Write the results and summarize the run
///
/// # Errors
///
/// Returns [`Error::Render`] if the output cannot be produced.
pub fn finish(config: &RunConfig, results: &ResultSet) -> Result<Report> {
    let output = config.output_path();
    write_output(&output, results, config.format)?;
    Ok(Report {
        succeeded: results.succeeded(),
        total: results.len(),
        output,
    })
}

/// Plan, fetch over HTTP and write the output in one call
pub async fn run(config: &RunConfig) -> Result<Report> {
    let plan = plan(config)?;
    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::from_config(config)?);
    let results = execute(plan, fetcher).await;
    finish(config, &results)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_no_targets() {
        let err = plan(&RunConfig::default()).unwrap_err();
        assert!(matches!(err, Error::NoTargets));
    }

    #[test]
    fn plan_deduplicates_and_numbers_requests() {
        let config = RunConfig {
            urls: vec!["a".into(), "b".into(), "a".into(), "c".into()],
            max_workers: Some(2),
            ..Default::default()
        };
        let plan = plan(&config).unwrap();
        let urls: Vec<&str> = plan.requests.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c"]);
        assert_eq!(
            plan.requests
                .iter()
                .map(|r| r.sequence_index)
                .collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(plan.workers, 2);
    }

    #[test]
    fn single_url_always_uses_one_worker() {
        let config = RunConfig {
            urls: vec!["https://example.com".into()],
            max_workers: Some(16),
            ..Default::default()
        };
        assert_eq!(plan(&config).unwrap().workers, 1);
    }

    #[test]
    fn invalid_config_fails_before_loading_urls() {
        let config = RunConfig {
            urls: vec!["https://example.com".into()],
            timeout: std::time::Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(plan(&config), Err(Error::Config { .. })));
    }

    #[test]
    fn report_summary_line() {
        let report = Report {
            succeeded: 3,
            total: 4,
            output: PathBuf::from("scraped_content.json"),
        };
        assert_eq!(
            report.to_string(),
            "Finished. 3/4 succeeded. Output -> scraped_content.json"
        );
    }
}
