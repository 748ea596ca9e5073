//! Restores input order to results collected in completion order

use crate::types::{FetchResult, ResultSet};

/// Sort results ascending by sequence index
///
/// Stable, so equal indices (which a single run never produces) keep their
/// arrival order.
pub fn order(mut results: Vec<FetchResult>) -> ResultSet {
    results.sort_by_key(FetchResult::sequence_index);
    ResultSet { results }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::types::FetchRequest;

    fn failure(index: usize, url: &str) -> FetchResult {
        FetchResult::failure(
            &FetchRequest::new(index, url),
            0.0,
            FetchError::Transport("timed out".into()),
        )
    }

    #[test]
    fn sorts_by_sequence_index() {
        let set = order(vec![failure(2, "c"), failure(0, "a"), failure(1, "b")]);
        let urls: Vec<&str> = set.iter().map(FetchResult::url).collect();
        assert_eq!(urls, vec!["a", "b", "c"]);
    }

    #[test]
    fn equal_indices_keep_arrival_order() {
        let set = order(vec![failure(1, "first"), failure(0, "zero"), failure(1, "second")]);
        let urls: Vec<&str> = set.iter().map(FetchResult::url).collect();
        assert_eq!(urls, vec!["zero", "first", "second"]);
    }

    #[test]
    fn empty_input_gives_empty_set() {
        assert!(order(Vec::new()).is_empty());
    }
}
