#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use ndimg_tensor as tensor;

#[doc(inline)]
pub use ndimg_imgproc as imgproc;
