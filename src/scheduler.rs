//! Worker pool: bounded, supervised execution of fetches
//!
//! Every request is spawned as its own tokio task. A semaphore with
//! `worker_count` permits limits how many fetch at the same time; the rest
//! wait in FIFO order for a permit. Join handles are drained in completion
//! order, and a task that panics is turned into a `Worker crashed` failure so
//! the output always holds one result per request.

use crate::error::FetchError;
use crate::fetcher::Fetcher;
use crate::types::{FetchRequest, FetchResult};
use crate::utils::{panic_message, round_elapsed};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinError;

/// Parallelism assumed when the platform cannot report it
const FALLBACK_PARALLELISM: usize = 4;

/// Workers per available CPU when no explicit count is given
const WORKERS_PER_CPU: usize = 5;

/// Number of concurrent workers for a run
///
/// - One request (or none): 1 worker
/// - Explicit count: that count, at least 1
/// - Otherwise: `min(total, parallelism * 5)`, at least 1
///
/// # Examples
///
/// ```
/// use scrape_urls::scheduler::worker_count;
///
/// assert_eq!(worker_count(1, None, 8), 1);
/// assert_eq!(worker_count(100, None, 4), 20);
/// assert_eq!(worker_count(100, Some(3), 4), 3);
/// ```
#[must_use]
pub fn worker_count(total_requests: usize, explicit: Option<usize>, parallelism: usize) -> usize {
    if total_requests <= 1 {
        return 1;
    }
    match explicit {
        Some(n) => n.max(1),
        None => total_requests
            .min(parallelism.saturating_mul(WORKERS_PER_CPU))
            .max(1),
    }
}

/// CPUs available to this process
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(FALLBACK_PARALLELISM)
}

/// Fetch every request with at most `worker_count` in flight
///
/// Returns exactly one result per request, in completion order. Ordering is
/// restored afterwards by [`crate::sequencer::order`].
pub async fn run(
    requests: Vec<FetchRequest>,
    worker_count: usize,
    fetcher: Arc<dyn Fetcher>,
) -> Vec<FetchResult> {
    let total = requests.len();
    let limit = Arc::new(Semaphore::new(worker_count.max(1)));
    let mut pending = FuturesUnordered::new();

    for request in requests {
        let limit = Arc::clone(&limit);
        let fetcher = Arc::clone(&fetcher);
        let task_request = request.clone();
        let dispatched = Instant::now();

        let handle = tokio::spawn(async move {
            // The semaphore is never closed, so acquire only fails if it is dropped.
            let _permit = limit.acquire_owned().await.ok();
            fetcher.fetch(task_request).await
        });

        pending.push(async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => crashed(&request, dispatched, e),
            }
        });
    }

    let mut results = Vec::with_capacity(total);
    while let Some(result) = pending.next().await {
        results.push(result);
        tracing::trace!(done = results.len(), total, "result collected");
    }
    results
}

fn crashed(request: &FetchRequest, dispatched: Instant, error: JoinError) -> FetchResult {
    let message = if error.is_panic() {
        panic_message(error.into_panic().as_ref())
    } else {
        error.to_string()
    };
    tracing::warn!(
        url = %request.url,
        sequence_index = request.sequence_index,
        error = %message,
        "worker crashed"
    );
    FetchResult::failure(
        request,
        round_elapsed(dispatched.elapsed()),
        FetchError::WorkerCrashed(message),
    )
}
