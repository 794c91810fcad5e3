use ndimg_tensor::TensorError;
use thiserror::Error;

use crate::parallel::ParallelError;

/// An error type for the filtering, wavelet and labeling operations.
///
/// Every variant is raised by an eager precondition check, before any
/// output is written.
#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    /// The kernel rank differs from the source rank.
    #[error("Kernel rank ({1}) does not match source rank ({0})")]
    RankMismatch(usize, usize),

    /// One-dimensional weights were expected.
    #[error("Weights must be one-dimensional, got rank {0}")]
    InvalidWeightsRank(usize),

    /// The requested axis does not exist.
    #[error("Axis {0} is out of bounds for an array of rank {1}")]
    AxisOutOfBounds(usize, usize),

    /// Wavelet transforms only accept 2-D arrays.
    #[error("Wavelet transforms only work on 2-D arrays, got rank {0}")]
    NotTwoDimensional(usize),

    /// The boundary mode name is not recognized.
    #[error("Unknown boundary mode '{0}'. Known modes are: reflect, constant, nearest, mirror, wrap, ignore")]
    InvalidMode(String),

    /// The wavelet family tag is not recognized.
    #[error("Unknown wavelet family '{0}'. Known families are D2, D4, D6, ..., D20")]
    UnknownWavelet(String),

    /// The Gaussian derivative order is not an integer in `0..=3`.
    #[error("Gaussian derivative order must be an integer in 0..=3, got {0}")]
    InvalidOrder(String),

    /// The Gaussian sigma is negative or not finite.
    #[error("Gaussian sigma must be finite and non-negative, got {0}")]
    InvalidSigma(f64),

    /// The structuring element does not fit the label map.
    #[error("Invalid structuring element: {0}")]
    InvalidStructure(String),

    /// Array construction error.
    #[error(transparent)]
    TensorError(#[from] TensorError),

    /// Parallel execution error.
    #[error(transparent)]
    ParallelError(#[from] ParallelError),
}
