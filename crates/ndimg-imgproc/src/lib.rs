#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// error types for the filtering operations.
pub mod error;

/// image filtering module.
pub mod filter;

/// borders between regions of a label map.
pub mod labeled;

/// boundary modes used to extend arrays past their edges.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;

/// Haar and Daubechies wavelet transforms.
pub mod wavelet;

pub use error::FilterError;
