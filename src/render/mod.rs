//! Output rendering for an ordered result set
//!
//! Renderers never reorder or alter results; they only format them. The
//! whole output is rendered in memory before anything touches the disk, so a
//! failed render leaves no partial file behind.
//!
//! - [`structured`] - JSON array, one object per URL
//! - [`text`] - labeled plain-text blocks
//! - [`document`] - the text blocks paginated into a PDF (feature `document`)

#[cfg(feature = "document")]
pub mod document;
pub mod structured;
pub mod text;

use crate::config::OutputFormat;
use crate::error::{Error, FormatError, Result};
use crate::types::ResultSet;
use std::path::Path;

/// Render `results` in `format`
pub fn render(
    results: &ResultSet,
    format: OutputFormat,
) -> std::result::Result<Vec<u8>, FormatError> {
    match format {
        OutputFormat::Structured => structured::render(results),
        OutputFormat::Text => Ok(text::render(results).into_bytes()),
        OutputFormat::Document => render_document(results),
    }
}

#[cfg(feature = "document")]
fn render_document(results: &ResultSet) -> std::result::Result<Vec<u8>, FormatError> {
    Ok(document::render(&text::render(results)))
}

#[cfg(not(feature = "document"))]
fn render_document(_results: &ResultSet) -> std::result::Result<Vec<u8>, FormatError> {
    Err(FormatError::MissingCapability(
        "document output requires the `document` feature",
    ))
}

/// Render `results` and write them to `path`, creating parent directories
///
/// # Errors
///
/// Returns [`Error::Render`] if rendering fails (nothing is written) or if the
/// file cannot be written.
pub fn write_output(path: &Path, results: &ResultSet, format: OutputFormat) -> Result<()> {
    let bytes = render(results, format).map_err(|e| Error::render(path, e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::render(
                path,
                format!("cannot create directory {}: {}", parent.display(), e),
            )
        })?;
    }
    std::fs::write(path, &bytes).map_err(|e| Error::render(path, e.to_string()))?;

    tracing::info!(
        path = %path.display(),
        format = %format,
        bytes = bytes.len(),
        results = results.len(),
        "output written"
    );
    Ok(())
}
