//! Filter operations
//!
//! N-D convolution and correlation with boundary handling, and the Gaussian filters built on it.

/// Filter kernels
pub mod kernels;

/// Generic N-D and 1-D convolution and correlation
mod convolution;
pub use convolution::*;

/// Gaussian filter operations
mod ops;
pub use ops::*;
