#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `ndimg-tensor` provides [`NdArray`], a dense row-major array with a
//! dynamic number of axes, and the [`Element`] trait describing the numeric
//! scalars the filters in `ndimg-imgproc` accept.
//!
//! ```rust
//! use ndimg_tensor::NdArray;
//!
//! let a = NdArray::<f32>::from_shape_fn(&[3, 3], |idx| (idx[0] == idx[1]) as u8 as f32);
//! assert_eq!(a.get(&[1, 1]), Some(&1.0));
//! assert_eq!(a.ndim(), 2);
//!
//! let b: NdArray<u8> = a.cast();
//! assert_eq!(b.as_slice().iter().map(|&x| x as u32).sum::<u32>(), 3);
//! ```

/// Numeric element traits and dtype promotion.
pub mod element;

/// Serde support for [`NdArray`], enabled with the `serde` feature.
#[cfg(feature = "serde")]
pub mod serde;

/// The array type and its error type.
pub mod tensor;

pub use crate::element::{Element, Float, Promote};
pub use crate::tensor::{NdArray, TensorError};
