//! Error types for scrape-urls
//!
//! Two layers of failure exist:
//! - [`Error`] covers setup and output problems that abort the whole run
//!   (bad list file, no targets, unwritable output).
//! - [`FetchError`] covers a single URL. It is recorded inside the result set
//!   and never aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scrape-urls operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for scrape-urls
///
/// Every variant is fatal to the run. Per-URL failures use [`FetchError`] instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "urls_files")
        key: Option<String>,
    },

    /// The resolved URL list is empty; nothing was fetched
    #[error("No URLs provided. Use --url or --urls-file to supply targets.")]
    NoTargets,

    /// Rendering or writing the output failed; nothing was written
    #[error("failed to write output to {}: {reason}", path.display())]
    Render {
        /// The output path that could not be produced
        path: PathBuf,
        /// Why rendering or writing failed
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Config`] tied to a configuration key
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Shorthand for a [`Error::Render`]
    pub fn render(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Render {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Failure of a single fetch attempt
///
/// The `Display` output of each variant is part of the output format and is
/// consumed by downstream tools, so the prefixes must not change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with an error status that the client surfaced as an error
    #[error("HTTPError: {code} {reason}")]
    Http {
        /// HTTP status code
        code: u16,
        /// Canonical reason phrase for the status
        reason: String,
    },

    /// Transport-level failure: DNS, connection refused, TLS, timeout
    #[error("URLError: {0}")]
    Transport(String),

    /// Anything else that went wrong inside the fetch
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// The worker task died before producing a result
    #[error("Worker crashed: {0}")]
    WorkerCrashed(String),
}

/// The selected output format could not be produced
#[derive(Debug, Error)]
pub enum FormatError {
    /// Structured output could not be serialized
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The format needs a capability this build does not include
    #[error("missing optional rendering capability: {0}")]
    MissingCapability(&'static str),
}

/// Process exit code for user interruption (128 + SIGINT)
pub const EXIT_INTERRUPTED: u8 = 130;

/// Map fatal errors to process exit codes
///
/// The binary uses this to pick a distinguished exit status per failure class.
pub trait ToExitCode {
    /// Get the process exit code for this error
    fn exit_code(&self) -> u8;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToExitCode for Error {
    fn exit_code(&self) -> u8 {
        match self {
            Error::NoTargets => 1,
            Error::Config { .. } => 2,
            Error::Render { .. } | Error::Io(_) => 3,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::NoTargets => "no_targets",
            Error::Config { .. } => "config_error",
            Error::Render { .. } => "render_error",
            Error::Io(_) => "io_error",
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn all_error_variants() -> Vec<(Error, u8, &'static str)> {
        vec![
            (Error::NoTargets, 1, "no_targets"),
            (
                Error::config("cannot read list", "urls_files"),
                2,
                "config_error",
            ),
            (
                Error::render("/tmp/out.pdf", "document feature disabled"),
                3,
                "render_error",
            ),
            (
                Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
                3,
                "io_error",
            ),
        ]
    }

    #[test]
    fn every_error_maps_to_its_exit_code_and_error_code() {
        for (error, code, name) in all_error_variants() {
            assert_eq!(error.exit_code(), code, "{error:?}");
            assert_eq!(error.error_code(), name, "{error:?}");
        }
    }

    #[test]
    fn fatal_exit_codes_never_collide_with_success_or_interrupt() {
        for (error, _, _) in all_error_variants() {
            assert_ne!(error.exit_code(), 0);
            assert_ne!(error.exit_code(), EXIT_INTERRUPTED);
        }
    }

    #[test]
    fn no_targets_message_tells_the_user_which_flags_to_use() {
        assert_eq!(
            Error::NoTargets.to_string(),
            "No URLs provided. Use --url or --urls-file to supply targets."
        );
    }

    #[test]
    fn fetch_error_messages_keep_their_prefixes() {
        let http = FetchError::Http {
            code: 404,
            reason: "Not Found".into(),
        };
        assert_eq!(http.to_string(), "HTTPError: 404 Not Found");
        assert_eq!(
            FetchError::Transport("timed out".into()).to_string(),
            "URLError: timed out"
        );
        assert_eq!(
            FetchError::Unexpected("relative URL without a base".into()).to_string(),
            "Unexpected error: relative URL without a base"
        );
        assert_eq!(
            FetchError::WorkerCrashed("boom".into()).to_string(),
            "Worker crashed: boom"
        );
    }

    #[test]
    fn missing_capability_names_what_is_missing() {
        let err = FormatError::MissingCapability("the `document` feature");
        assert_eq!(
            err.to_string(),
            "missing optional rendering capability: the `document` feature"
        );
    }

    #[test]
    fn render_error_names_the_path() {
        let err = Error::render("out/results.pdf", "permission denied");
        let msg = err.to_string();
        assert!(msg.contains("out/results.pdf"));
        assert!(msg.contains("permission denied"));
    }
}
