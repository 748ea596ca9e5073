//! Utility functions for body decoding, timing and path handling

use encoding_rs::{Encoding, UTF_8};
use std::any::Any;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extract the `charset` parameter from a `Content-Type` header value
///
/// # Examples
///
/// ```
/// use scrape_urls::utils::charset_from_content_type;
///
/// assert_eq!(charset_from_content_type("text/html; charset=ISO-8859-1"), Some("ISO-8859-1"));
/// assert_eq!(charset_from_content_type("text/html; charset=\"utf-8\""), Some("utf-8"));
/// assert_eq!(charset_from_content_type("application/json"), None);
/// ```
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches('"').trim();
        (!value.is_empty()).then_some(value)
    })
}

/// Decode a body using the declared charset, falling back to UTF-8
///
/// Unknown charset labels fall back to UTF-8. Invalid byte sequences are
/// replaced with U+FFFD; decoding never fails.
#[must_use]
pub fn decode_body(bytes: &[u8], charset: Option<&str>) -> String {
    let encoding = charset
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _had_errors) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Elapsed seconds rounded to three decimal places
#[must_use]
pub fn round_elapsed(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0).round() / 1000.0
}

/// Human-readable message from a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// Innermost error message in a source chain
///
/// reqwest wraps hyper and io errors; the innermost message ("Connection
/// refused", "dns error: ...") is the useful part.
pub fn root_cause(error: &(dyn std::error::Error + 'static)) -> String {
    let mut current = error;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

/// Expand a leading `~` to the user's home directory
///
/// Paths without a leading `~`, or with no `HOME` set, are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}
