//! Rayon thread pool sizing for budget sweeps.
//!
//! [WorkerPool::install] runs a closure either on the global Rayon pool (all
//! cores) or on a dedicated pool with a fixed thread count.

use rayon::ThreadPoolBuilder;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to build worker pool with {workers} threads")]
pub struct PoolError {
    pub workers: usize,
    #[source]
    source: rayon::ThreadPoolBuildError,
}

/// How many worker threads a parallel sweep uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use the Rayon default (num_cpus).
    pub workers: usize,
}

impl WorkerPool {
    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    pub fn install<F, R>(&self, f: F) -> Result<R, PoolError>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return Ok(f());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|source| PoolError {
                workers: self.workers,
                source,
            })?;
        Ok(pool.install(f))
    }
}
