//! JSON output: an array of objects in input order
//!
//! Pretty-printed with two-space indentation and a trailing newline. Non-ASCII
//! text is written as-is, not escaped.

use crate::error::FormatError;
use crate::types::ResultSet;

/// Serialize the result set as a JSON array
pub fn render(results: &ResultSet) -> Result<Vec<u8>, FormatError> {
    let mut out = serde_json::to_vec_pretty(&results.records())?;
    out.push(b'\n');
    Ok(out)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::sequencer::order;
    use crate::types::{FetchRequest, FetchResult, FetchSuccess};

    fn results() -> ResultSet {
        order(vec![
            FetchResult::failure(
                &FetchRequest::new(1, "https://b.example/"),
                0.75,
                FetchError::Transport("timed out".into()),
            ),
            FetchResult::Success(FetchSuccess {
                sequence_index: 0,
                url: "https://a.example/".into(),
                status: 200,
                content_type: "text/plain; charset=utf-8".into(),
                elapsed_seconds: 0.125,
                truncated: false,
                body: "grüße".into(),
            }),
        ])
    }

    #[test]
    fn renders_objects_in_sequence_order_without_index() {
        let out = String::from_utf8(render(&results()).unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let entries = value.as_array().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["url"], "https://a.example/");
        assert_eq!(entries[0]["status"], 200);
        assert_eq!(entries[0]["truncated"], false);
        assert_eq!(entries[0]["content"], "grüße");
        assert_eq!(entries[1]["url"], "https://b.example/");
        assert_eq!(entries[1]["error"], "URLError: timed out");
        assert!(!out.contains("sequence_index"));
    }

    #[test]
    fn keeps_non_ascii_unescaped_and_ends_with_newline() {
        let out = String::from_utf8(render(&results()).unwrap()).unwrap();
        assert!(out.contains("grüße"));
        assert!(out.ends_with("]\n"));
        assert!(out.contains("\n  {\n    \"url\""));
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let set = results();
        assert_eq!(render(&set).unwrap(), render(&set).unwrap());
    }

    #[test]
    fn empty_set_is_an_empty_array() {
        let out = render(&order(Vec::new())).unwrap();
        assert_eq!(out, b"[]\n");
    }
}
