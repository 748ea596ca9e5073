//! Plain-text output: one labeled block per URL, separated by rule lines

use crate::types::{FetchResult, ResultSet};

/// Width of the rule line between blocks
pub const RULE_WIDTH: usize = 80;

/// Render every result as a text block
pub fn render(results: &ResultSet) -> String {
    let separator = format!("{}\n", "-".repeat(RULE_WIDTH));
    let blocks: Vec<String> = results
        .iter()
        .map(|result| {
            let mut block = render_block(result);
            if !block.ends_with('\n') {
                block.push('\n');
            }
            block
        })
        .collect();
    blocks.join(&separator)
}

fn render_block(result: &FetchResult) -> String {
    let record = result.to_record();
    let mut lines = vec![format!("URL: {}", record.url)];

    if let Some(status) = record.status {
        lines.push(format!("Status: {}", status));
    }
    if let Some(content_type) = record.content_type.filter(|ct| !ct.is_empty()) {
        lines.push(format!("Content-Type: {}", content_type));
    }
    lines.push(format!("Elapsed seconds: {:?}", record.elapsed_seconds));
    if let Some(truncated) = record.truncated {
        lines.push(format!("Truncated: {}", truncated));
    }
    match (&record.error, record.content) {
        (Some(error), _) => lines.push(format!("Error: {}", error)),
        (None, Some(content)) => {
            lines.push("Content:".to_string());
            lines.push(content.to_string());
        }
        (None, None) => {}
    }
    lines.join("\n")
}
