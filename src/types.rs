//! Core types for scrape-urls

use serde::Serialize;

use crate::error::FetchError;

/// One URL to fetch, tagged with its position in the deduplicated input list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    /// Stable position in the input list; the only ordering key for output
    pub sequence_index: usize,
    /// Target URL exactly as supplied
    pub url: String,
}

impl FetchRequest {
    /// Create a new FetchRequest
    pub fn new(sequence_index: usize, url: impl Into<String>) -> Self {
        Self {
            sequence_index,
            url: url.into(),
        }
    }

    /// Number the URLs in input order
    pub fn from_urls(urls: impl IntoIterator<Item = String>) -> Vec<Self> {
        urls.into_iter()
            .enumerate()
            .map(|(sequence_index, url)| Self::new(sequence_index, url))
            .collect()
    }
}

/// A response was received and its body read (up to the byte cap)
#[derive(Clone, Debug, PartialEq)]
pub struct FetchSuccess {
    /// Position of the originating request
    pub sequence_index: usize,
    /// Requested URL
    pub url: String,
    /// HTTP status code (any status, including 4xx/5xx)
    pub status: u16,
    /// `Content-Type` header value, empty when absent
    pub content_type: String,
    /// Wall time of the fetch in seconds, rounded to milliseconds
    pub elapsed_seconds: f64,
    /// Whether the body was cut at the byte cap
    pub truncated: bool,
    /// Decoded body text
    pub body: String,
}

/// The fetch did not produce a body
#[derive(Clone, Debug, PartialEq)]
pub struct FetchFailure {
    /// Position of the originating request
    pub sequence_index: usize,
    /// Requested URL
    pub url: String,
    /// HTTP status code, only for status-bearing failures
    pub status: Option<u16>,
    /// `Content-Type` header value, only for status-bearing failures
    pub content_type: Option<String>,
    /// Wall time until the failure in seconds, rounded to milliseconds
    pub elapsed_seconds: f64,
    /// Classified cause
    pub error: FetchError,
}

impl FetchFailure {
    /// The error text as it appears in the output (`HTTPError: ...`, `URLError: ...`, ...)
    pub fn error_message(&self) -> String {
        self.error.to_string()
    }
}

/// Outcome of exactly one [`FetchRequest`]
#[derive(Clone, Debug, PartialEq)]
pub enum FetchResult {
    /// A response was received
    Success(FetchSuccess),
    /// The fetch failed
    Failure(FetchFailure),
}

impl FetchResult {
    /// Position of the originating request
    pub fn sequence_index(&self) -> usize {
        match self {
            FetchResult::Success(s) => s.sequence_index,
            FetchResult::Failure(f) => f.sequence_index,
        }
    }

    /// Requested URL
    pub fn url(&self) -> &str {
        match self {
            FetchResult::Success(s) => &s.url,
            FetchResult::Failure(f) => &f.url,
        }
    }

    /// Whether this result counts towards the success tally
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    /// Build a failure for `request` with no HTTP metadata
    pub fn failure(request: &FetchRequest, elapsed_seconds: f64, error: FetchError) -> Self {
        FetchResult::Failure(FetchFailure {
            sequence_index: request.sequence_index,
            url: request.url.clone(),
            status: None,
            content_type: None,
            elapsed_seconds,
            error,
        })
    }

    /// Serializable view of this result, without the sequence index
    pub fn to_record(&self) -> OutputRecord<'_> {
        match self {
            FetchResult::Success(s) => OutputRecord {
                url: &s.url,
                status: Some(s.status),
                content_type: Some(s.content_type.as_str()),
                elapsed_seconds: s.elapsed_seconds,
                truncated: Some(s.truncated),
                content: Some(s.body.as_str()),
                error: None,
            },
            FetchResult::Failure(f) => OutputRecord {
                url: &f.url,
                status: f.status,
                content_type: f.content_type.as_deref(),
                elapsed_seconds: f.elapsed_seconds,
                truncated: None,
                content: None,
                error: Some(f.error_message()),
            },
        }
    }
}

/// One entry of the rendered output
///
/// Field order is the key order of the structured format. Absent fields are omitted.
#[derive(Debug, Serialize)]
pub struct OutputRecord<'a> {
    /// Requested URL
    pub url: &'a str,
    /// HTTP status code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// `Content-Type` header value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<&'a str>,
    /// Elapsed seconds
    pub elapsed_seconds: f64,
    /// Truncation flag, successes only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
    /// Body text, successes only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
    /// Error text, failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Results sorted ascending by sequence index
///
/// Only [`crate::sequencer::order`] builds one, so holding a `ResultSet` means
/// the ordering has already been restored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    pub(crate) results: Vec<FetchResult>,
}

impl ResultSet {
    /// Number of results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of successful fetches
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Iterate in sequence order
    pub fn iter(&self) -> std::slice::Iter<'_, FetchResult> {
        self.results.iter()
    }

    /// Serializable records in sequence order
    pub fn records(&self) -> Vec<OutputRecord<'_>> {
        self.results.iter().map(FetchResult::to_record).collect()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a FetchResult;
    type IntoIter = std::slice::Iter<'a, FetchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn success() -> FetchResult {
        FetchResult::Success(FetchSuccess {
            sequence_index: 3,
            url: "https://example.com/".into(),
            status: 200,
            content_type: "text/html; charset=utf-8".into(),
            elapsed_seconds: 0.25,
            truncated: false,
            body: "<p>hi</p>".into(),
        })
    }

    #[test]
    fn from_urls_numbers_requests_in_input_order() {
        let requests = FetchRequest::from_urls(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            requests,
            vec![FetchRequest::new(0, "a"), FetchRequest::new(1, "b")]
        );
    }

    #[test]
    fn success_record_keys_follow_output_order() {
        let json = serde_json::to_string(&success().to_record()).unwrap();
        let positions: Vec<usize> = [
            "\"url\"",
            "\"status\"",
            "\"content_type\"",
            "\"elapsed_seconds\"",
            "\"truncated\"",
            "\"content\"",
        ]
        .iter()
        .map(|key| json.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
        assert!(!json.contains("sequence_index"));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn transport_failure_record_omits_status_and_content_type() {
        let request = FetchRequest::new(0, "https://unreachable.invalid/");
        let failure =
            FetchResult::failure(&request, 1.5, FetchError::Transport("timed out".into()));
        let value = serde_json::to_value(failure.to_record()).unwrap();
        assert_eq!(value["error"], "URLError: timed out");
        assert!(value.get("status").is_none());
        assert!(value.get("content_type").is_none());
        assert!(value.get("truncated").is_none());
        assert!(value.get("content").is_none());
    }

    #[test]
    fn http_failure_record_keeps_status_and_content_type() {
        let failure = FetchResult::Failure(FetchFailure {
            sequence_index: 0,
            url: "https://example.com/missing".into(),
            status: Some(404),
            content_type: Some("text/html".into()),
            elapsed_seconds: 0.1,
            error: FetchError::Http {
                code: 404,
                reason: "Not Found".into(),
            },
        });
        let value = serde_json::to_value(failure.to_record()).unwrap();
        assert_eq!(value["status"], 404);
        assert_eq!(value["content_type"], "text/html");
        assert_eq!(value["error"], "HTTPError: 404 Not Found");
    }

    #[test]
    fn accessors_cover_both_variants() {
        let ok = success();
        assert_eq!(ok.sequence_index(), 3);
        assert_eq!(ok.url(), "https://example.com/");
        assert!(ok.is_success());

        let failed = FetchResult::failure(
            &FetchRequest::new(7, "x"),
            0.0,
            FetchError::WorkerCrashed("panic".into()),
        );
        assert_eq!(failed.sequence_index(), 7);
        assert!(!failed.is_success());
    }
}
