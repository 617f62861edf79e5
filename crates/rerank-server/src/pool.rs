//! Dispatch of blocking inference onto tokio's blocking thread pool.
//!
//! A bounded pool caps how many inference calls run at once (the gRPC service); an
//! unbounded pool only moves the work off the async workers (the HTTP service). Neither
//! queues with a limit or times out: callers wait for a permit as long as it takes.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("worker pool is closed")]
    Closed,

    #[error("worker task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Option<Arc<Semaphore>>,
    size: Option<usize>,
}

impl WorkerPool {
    /// At most `size` closures run concurrently (`size` is raised to 1 if zero).
    pub fn bounded(size: usize) -> Self {
        let size = size.max(1);
        Self {
            permits: Some(Arc::new(Semaphore::new(size))),
            size: Some(size),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            permits: None,
            size: None,
        }
    }

    /// Worker count, `None` when unbounded.
    pub fn size(&self) -> Option<usize> {
        self.size
    }

    /// Idle workers, `None` when unbounded.
    pub fn available(&self) -> Option<usize> {
        self.permits.as_ref().map(|p| p.available_permits())
    }

    /// Runs `f` on the blocking pool, waiting for a free worker first when bounded.
    ///
    /// The worker stays occupied until `f` returns, even if the caller stops waiting.
    pub async fn run<F, T>(&self, f: F) -> Result<T, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = match &self.permits {
            Some(permits) => Some(
                Arc::clone(permits)
                    .acquire_owned()
                    .await
                    .map_err(|_| PoolError::Closed)?,
            ),
            None => None,
        };

        let output = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            f()
        })
        .await?;

        Ok(output)
    }
}
