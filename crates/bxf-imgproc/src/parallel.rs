use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The destination buffer cannot be split into rows of the given width.
    #[error("buffer of length {0} is not a whole number of rows of width {1}")]
    SizeMismatch(usize, usize),
}

/// Controls how row-partitioned operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
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
    /// Check that the strategy can be executed.
    pub fn validate(&self) -> Result<(), ParallelError> {
        match self {
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            _ => Ok(()),
        }
    }
}

/// Apply a function to each row of a destination buffer.
///
/// The closure receives the row index and the mutable row slice. Rows are independent,
/// so the result does not depend on the strategy.
///
/// # Arguments
///
/// * `dst` - The destination buffer, row-major with `cols` elements per row.
/// * `cols` - The number of elements per row.
/// * `strategy` - The execution strategy.
/// * `f` - The operation to perform on each row.
pub fn par_iter_rows_indexed<T, F>(
    dst: &mut [T],
    cols: usize,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    strategy.validate()?;

    if dst.is_empty() {
        return Ok(());
    }

    if cols == 0 || dst.len() % cols != 0 {
        return Err(ParallelError::SizeMismatch(dst.len(), cols));
    }

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(cols)
                .enumerate()
                .for_each(|(row, chunk)| f(row, chunk));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(cols)
                .enumerate()
                .for_each(|(row, chunk)| f(row, chunk));
        }
        ExecutionStrategy::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(cols)
                    .enumerate()
                    .for_each(|(row, chunk)| f(row, chunk));
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_rows(strategy: ExecutionStrategy) -> Result<Vec<usize>, ParallelError> {
        let mut dst = vec![0; 6];
        par_iter_rows_indexed(&mut dst, 3, strategy, |row, chunk| {
            chunk
                .iter_mut()
                .enumerate()
                .for_each(|(col, v)| *v = row * 10 + col);
        })?;
        Ok(dst)
    }

    #[test]
    fn test_rows_serial() -> Result<(), ParallelError> {
        assert_eq!(fill_rows(ExecutionStrategy::Serial)?, vec![0, 1, 2, 10, 11, 12]);
        Ok(())
    }

    #[test]
    fn test_rows_parallel() -> Result<(), ParallelError> {
        assert_eq!(
            fill_rows(ExecutionStrategy::ParallelRows)?,
            vec![0, 1, 2, 10, 11, 12]
        );
        Ok(())
    }

    #[test]
    fn test_rows_fixed_success() -> Result<(), ParallelError> {
        assert_eq!(
            fill_rows(ExecutionStrategy::Fixed(2))?,
            vec![0, 1, 2, 10, 11, 12]
        );
        Ok(())
    }

    #[test]
    fn test_rows_fixed_error() {
        let res = fill_rows(ExecutionStrategy::Fixed(0));
        assert_eq!(res, Err(ParallelError::InvalidThreadCount(0)));
    }

    #[test]
    fn test_rows_size_mismatch() {
        let mut dst = vec![0u8; 5];
        let res = par_iter_rows_indexed(&mut dst, 2, ExecutionStrategy::Serial, |_, _| {});
        assert_eq!(res, Err(ParallelError::SizeMismatch(5, 2)));
    }

    #[test]
    fn test_rows_empty() -> Result<(), ParallelError> {
        let mut dst: Vec<u8> = vec![];
        par_iter_rows_indexed(&mut dst, 0, ExecutionStrategy::ParallelRows, |_, _| {
            unreachable!()
        })?;
        Ok(())
    }
}
