//! Concurrency limiter bounding the number of checks in flight.
//!
//! Operations are admitted in queue order as permits become available.
//! Each admitted operation runs as its own tokio task holding an owned
//! semaphore permit; the permit is released when the task ends, whether
//! it completed or panicked. Tasks live in a `JoinSet`, so dropping an
//! unfinished `run_all` aborts every operation it already started.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::trace;

/// Counting-semaphore gate over a batch of deferred operations.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl ConcurrencyLimiter {
    /// Create a limiter admitting at most `capacity` operations at once.
    /// The capacity is clamped to `1..=Semaphore::MAX_PERMITS`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits not currently held by a running operation.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run every operation to completion, at most `capacity` at a time.
    ///
    /// Returns one result per operation in input order. An `Err` means the
    /// operation's task panicked or was cancelled; the limiter itself
    /// never fails.
    pub async fn run_all<I, F, T>(&self, ops: I) -> Vec<Result<T, JoinError>>
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let mut tasks = JoinSet::new();
        let mut slots = HashMap::new();
        let mut results: Vec<Option<Result<T, JoinError>>> = Vec::new();

        for (index, op) in ops.into_iter().enumerate() {
            // `acquire_owned` only fails on a closed semaphore, and this
            // one is never closed.
            let permit = Arc::clone(&self.permits).acquire_owned().await.ok();
            trace!(index, available = self.permits.available_permits(), "operation admitted");

            let handle = tasks.spawn(async move {
                let _permit = permit;
                op.await
            });
            slots.insert(handle.id(), index);
            results.push(None);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, value)) => (id, Ok(value)),
                Err(e) => (e.id(), Err(e)),
            };
            if let Some(&index) = slots.get(&id) {
                results[index] = Some(result);
            }
        }

        // Every spawned task is joined above, so each slot is filled.
        results.into_iter().flatten().collect()
    }
}
