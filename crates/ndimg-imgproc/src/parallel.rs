use rayon::prelude::*;
use thiserror::Error;

/// Number of output elements above which [`ExecutionStrategy::Auto`] goes parallel.
pub const AUTO_PARALLEL_THRESHOLD: usize = 100_000;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how the output rows of a filter are computed.
///
/// Every strategy evaluates each output element with the same, fixed
/// accumulation order, so results are bit-identical across strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Parallel over rows for outputs of at least [`AUTO_PARALLEL_THRESHOLD`]
    /// elements, serial otherwise.
    #[default]
    Auto,

    /// Use the global Rayon thread pool to process rows in parallel.
    Parallel,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small arrays, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Whether this strategy runs in parallel for an output of `numel` elements.
    pub fn is_parallel(&self, numel: usize) -> bool {
        match self {
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel | ExecutionStrategy::Fixed(_) => true,
            ExecutionStrategy::Auto => numel >= AUTO_PARALLEL_THRESHOLD,
        }
    }
}

/// Fill `dst` row by row, where a row is `row_len` consecutive elements.
///
/// `f` receives the flat offset of the first element of the row and the
/// mutable row slice. Rows are independent, so they may run in any order.
pub fn for_each_row<T, F>(
    dst: &mut [T],
    row_len: usize,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if dst.is_empty() || row_len == 0 {
        return Ok(());
    }

    let run_parallel = |dst: &mut [T]| {
        dst.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(r, row)| f(r * row_len, row));
    };

    match strategy {
        ExecutionStrategy::Fixed(0) => return Err(ParallelError::InvalidThreadCount(0)),
        ExecutionStrategy::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;
            pool.install(|| run_parallel(dst));
        }
        s if s.is_parallel(dst.len()) => run_parallel(dst),
        _ => dst
            .chunks_mut(row_len)
            .enumerate()
            .for_each(|(r, row)| f(r * row_len, row)),
    }

    Ok(())
}
