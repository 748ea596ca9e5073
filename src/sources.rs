//! URL source: direct arguments plus line-oriented list files
//!
//! List files hold one URL per line. Lines are trimmed; blank lines and lines
//! starting with `#` are skipped. The path `-` reads standard input.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::io::{BufRead, BufReader};

/// Path that stands for standard input
pub const STDIN_PATH: &str = "-";

/// Collect URLs from direct arguments and list files
///
/// Direct URLs come first, then each list file in the order given. Duplicates
/// keep their first position; empty strings are dropped.
///
/// # Errors
///
/// Returns [`Error::Config`] if a list file cannot be opened or read.
pub fn load(direct_urls: &[String], list_file_paths: &[String]) -> Result<Vec<String>> {
    let mut combined: Vec<String> = direct_urls.to_vec();
    for path in list_file_paths {
        combined.extend(read_list(path)?);
    }
    Ok(dedup_preserving_order(combined))
}

/// Read URL lines from any buffered reader, skipping blanks and `#` comments
pub fn read_url_lines<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut urls = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        urls.push(entry.to_string());
    }
    Ok(urls)
}

fn read_list(path: &str) -> Result<Vec<String>> {
    if path == STDIN_PATH {
        let stdin = std::io::stdin();
        return read_url_lines(stdin.lock()).map_err(|e| {
            Error::config(format!("failed to read URLs from stdin: {}", e), "urls_files")
        });
    }

    let file = std::fs::File::open(path).map_err(|e| {
        Error::config(
            format!("cannot open URL list file '{}': {}", path, e),
            "urls_files",
        )
    })?;
    let urls = read_url_lines(BufReader::new(file)).map_err(|e| {
        Error::config(
            format!("cannot read URL list file '{}': {}", path, e),
            "urls_files",
        )
    })?;
    tracing::debug!(path, count = urls.len(), "loaded URL list file");
    Ok(urls)
}

fn dedup_preserving_order(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(urls.len());
    urls.into_iter()
        .filter(|url| !url.is_empty() && seen.insert(url.clone()))
        .collect()
}
