//! Fetch worker: one bounded HTTP GET per request
//!
//! [`Fetcher`] is the seam the scheduler drives. [`HttpFetcher`] is the
//! production implementation on top of reqwest. It never returns an error;
//! every outcome is folded into a [`FetchResult`].

use crate::config::RunConfig;
use crate::error::{Error, FetchError, Result};
use crate::types::{FetchFailure, FetchRequest, FetchResult, FetchSuccess};
use crate::utils::{charset_from_content_type, decode_body, root_cause, round_elapsed};
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use std::time::{Duration, Instant};

/// Performs one fetch attempt for one request
///
/// Implementations must be safe to call concurrently and must not panic on
/// ordinary failures; the scheduler still guards against panics.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `request` and classify the outcome
    async fn fetch(&self, request: FetchRequest) -> FetchResult;
}

/// Production [`Fetcher`] backed by a shared reqwest client
pub struct HttpFetcher {
    client: reqwest::Client,
    max_bytes: usize,
    error_statuses_as_failures: bool,
}

impl HttpFetcher {
    /// Build a fetcher with the given timeout, byte cap and user agent
    pub fn new(timeout: Duration, max_bytes: usize, user_agent: &str) -> Result<Self> {
        // Idle connections are never kept, so each request opens its own.
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| {
                Error::config(format!("failed to create HTTP client: {}", e), "user_agent")
            })?;

        Ok(Self {
            client,
            max_bytes,
            error_statuses_as_failures: false,
        })
    }

    /// Build a fetcher from a run configuration
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        Ok(Self::new(config.timeout, config.max_bytes, &config.user_agent)?
            .with_error_statuses_as_failures(config.error_statuses_as_failures))
    }

    /// Report 4xx/5xx responses as `HTTPError` failures
    pub fn with_error_statuses_as_failures(mut self, enabled: bool) -> Self {
        self.error_statuses_as_failures = enabled;
        self
    }

    async fn fetch_inner(
        &self,
        request: &FetchRequest,
        started: Instant,
    ) -> std::result::Result<FetchResult, Attempt> {
        let url = url::Url::parse(&request.url).map_err(|e| {
            Attempt::Failed(FetchError::Unexpected(format!("{}: '{}'", e, request.url)))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Attempt::Failed(FetchError::Unexpected(format!(
                "unknown url type: '{}'",
                request.url
            ))));
        }

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Attempt::Failed(classify_reqwest_error(&e)))?;

        let status = response.status();
        let content_type = header_string(response.headers());

        if self.error_statuses_as_failures {
            if let Err(e) = response.error_for_status_ref() {
                tracing::debug!(url = %request.url, error = %e, "error status reported as failure");
                return Err(Attempt::Status {
                    code: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("").to_string(),
                    content_type,
                });
            }
        }

        let mut raw: Vec<u8> = Vec::new();
        while raw.len() <= self.max_bytes {
            match response.chunk().await {
                Ok(Some(chunk)) => raw.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(e) => return Err(Attempt::Failed(classify_reqwest_error(&e))),
            }
        }
        let truncated = raw.len() > self.max_bytes;
        if truncated {
            raw.truncate(self.max_bytes);
        }

        let body = decode_body(&raw, charset_from_content_type(&content_type));

        Ok(FetchResult::Success(FetchSuccess {
            sequence_index: request.sequence_index,
            url: request.url.clone(),
            status: status.as_u16(),
            content_type,
            elapsed_seconds: round_elapsed(started.elapsed()),
            truncated,
            body,
        }))
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: FetchRequest) -> FetchResult {
        let started = Instant::now();
        let result = match self.fetch_inner(&request, started).await {
            Ok(result) => result,
            Err(attempt) => attempt.into_result(&request, started),
        };

        match &result {
            FetchResult::Success(s) => tracing::debug!(
                url = %s.url,
                sequence_index = s.sequence_index,
                status = s.status,
                truncated = s.truncated,
                elapsed_seconds = s.elapsed_seconds,
                "fetched"
            ),
            FetchResult::Failure(f) => tracing::warn!(
                url = %f.url,
                sequence_index = f.sequence_index,
                error = %f.error,
                elapsed_seconds = f.elapsed_seconds,
                "fetch failed"
            ),
        }
        result
    }
}

/// Why an attempt ended without a body
enum Attempt {
    /// A response arrived but its status was reported as an error
    Status {
        code: u16,
        reason: String,
        content_type: String,
    },
    /// No usable response
    Failed(FetchError),
}

impl Attempt {
    fn into_result(self, request: &FetchRequest, started: Instant) -> FetchResult {
        let elapsed_seconds = round_elapsed(started.elapsed());
        match self {
            Attempt::Status {
                code,
                reason,
                content_type,
            } => FetchResult::Failure(FetchFailure {
                sequence_index: request.sequence_index,
                url: request.url.clone(),
                status: Some(code),
                content_type: Some(content_type),
                elapsed_seconds,
                error: FetchError::Http { code, reason },
            }),
            Attempt::Failed(error) => FetchResult::failure(request, elapsed_seconds, error),
        }
    }
}

/// Map a reqwest error onto the transport/unexpected split
///
/// Builder errors never touched the network, so they are unexpected; anything
/// that happened on the wire is a transport error.
pub(crate) fn classify_reqwest_error(error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Transport("timed out".to_string())
    } else if error.is_builder() {
        FetchError::Unexpected(error.to_string())
    } else if error.is_connect() || error.is_request() || error.is_body() || error.is_redirect() {
        FetchError::Transport(root_cause(error))
    } else {
        FetchError::Unexpected(root_cause(error))
    }
}

fn header_string(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}
