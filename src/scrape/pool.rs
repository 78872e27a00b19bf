//! Bounded-parallelism task dispatch
//!
//! Every address becomes one spawned task gated by a shared semaphore.
//! Tasks are isolated: a transport failure, an incomplete record, or even a
//! panic in one task never cancels or affects another. Dispatch returns only
//! after every task has reached exactly one terminal state.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// Terminal state of one dispatched task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The record passed the gate and was written
    Committed,
    /// The record was dropped (incomplete, fetch failure, or sink error)
    Discarded,
}

/// Aggregate terminal outcomes of one dispatch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub committed: usize,
    pub discarded: usize,
}

impl DispatchStats {
    /// Total number of tasks that reached a terminal state
    pub fn total(&self) -> usize {
        self.committed + self.discarded
    }
}

/// Runs `task` over every address with a bounded number in flight
///
/// The effective concurrency is `min(max_concurrency, addrs.len())`, with a
/// floor of one. Completion order is unspecified; the returned stats count
/// every task exactly once. A panicking task surfaces as a join error and is
/// counted as discarded.
///
/// # Arguments
///
/// * `addrs` - The addresses to process, one task each
/// * `max_concurrency` - Upper bound on tasks in flight at once
/// * `task` - Maps one address to its terminal outcome
///
/// # Returns
///
/// Aggregate counts of committed and discarded tasks
pub async fn dispatch<F, Fut>(addrs: Vec<Url>, max_concurrency: usize, task: F) -> DispatchStats
where
    F: Fn(Url) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = TaskOutcome> + Send + 'static,
{
    let bound = max_concurrency.min(addrs.len()).max(1);
    let semaphore = Arc::new(Semaphore::new(bound));
    let task = Arc::new(task);

    let mut handles = Vec::with_capacity(addrs.len());
    for addr in addrs {
        let semaphore = Arc::clone(&semaphore);
        let task = Arc::clone(&task);

        handles.push(tokio::spawn(async move {
            // The permit spans the whole task body, so the bound covers the
            // pacing delay and the fetch alike
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return TaskOutcome::Discarded;
            };
            task(addr).await
        }));
    }

    let mut stats = DispatchStats::default();
    for handle in handles {
        match handle.await {
            Ok(TaskOutcome::Committed) => stats.committed += 1,
            Ok(TaskOutcome::Discarded) => stats.discarded += 1,
            Err(e) => {
                tracing::error!("Dispatched task failed: {}", e);
                stats.discarded += 1;
            }
        }
    }

    stats
}
