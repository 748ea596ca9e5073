//! # scrape-urls
//!
//! Fetch a list of URLs concurrently and aggregate the responses, in input
//! order, into a single JSON, plain-text or PDF file.
//!
//! ## Pipeline
//!
//! - [`sources`] - collect and deduplicate URLs from arguments and list files
//! - [`fetcher`] - one bounded GET per URL, every outcome classified
//! - [`scheduler`] - bounded, supervised worker pool
//! - [`sequencer`] - restore input order
//! - [`render`] - write the ordered results in the chosen format
//!
//! ## Quick Start
//!
//! ```no_run
//! use scrape_urls::{RunConfig, pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RunConfig {
//!         urls: vec!["https://example.com".to_string()],
//!         ..Default::default()
//!     };
//!
//!     let report = pipeline::run(&config).await?;
//!     println!("{}", report);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// HTTP fetch worker
pub mod fetcher;
/// Plan/execute/finish orchestration
pub mod pipeline;
/// Output renderers
pub mod render;
/// Bounded worker pool
pub mod scheduler;
/// Result ordering
pub mod sequencer;
/// URL list loading
pub mod sources;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{DEFAULT_USER_AGENT, OutputFormat, RunConfig};
pub use error::{EXIT_INTERRUPTED, Error, FetchError, FormatError, Result, ToExitCode};
pub use fetcher::{Fetcher, HttpFetcher};
pub use pipeline::{Plan, Report};
pub use types::{FetchFailure, FetchRequest, FetchResult, FetchSuccess, ResultSet};

/// Resolve once the user asks the run to stop (SIGINT or SIGTERM on Unix, Ctrl+C elsewhere)
///
/// If the Unix handlers cannot be installed this falls back to
/// `tokio::signal::ctrl_c()`.
#[cfg(unix)]
pub async fn wait_for_interrupt() {
    use tokio::signal::unix::{SignalKind, signal};

    let (mut sigint, mut sigterm) =
        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "signal handlers unavailable, watching ctrl_c only");
                tokio::signal::ctrl_c().await.ok();
                return;
            }
        };

    let received = tokio::select! {
        _ = sigint.recv() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    };
    tracing::debug!(signal = received, "interrupt received");
}

/// Resolve once the user presses Ctrl+C
#[cfg(not(unix))]
pub async fn wait_for_interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::debug!("interrupt received");
}
