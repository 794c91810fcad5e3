use crate::error::FilterError;

/// Gaussian kernels are truncated at this many standard deviations.
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Derivative order of a Gaussian filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DerivativeOrder {
    /// Plain Gaussian smoothing.
    #[default]
    Smooth,
    /// First derivative of the Gaussian.
    First,
    /// Second derivative of the Gaussian.
    Second,
    /// Third derivative of the Gaussian.
    Third,
}

impl DerivativeOrder {
    /// The order as an integer in `0..=3`.
    pub fn as_usize(&self) -> usize {
        match self {
            DerivativeOrder::Smooth => 0,
            DerivativeOrder::First => 1,
            DerivativeOrder::Second => 2,
            DerivativeOrder::Third => 3,
        }
    }
}

/// Conversion of a caller-supplied value into a [`DerivativeOrder`].
///
/// Implemented for the enum itself, integers and floats; only integral values
/// in `0..=3` are accepted.
pub trait IntoDerivativeOrder {
    /// Validate and convert.
    fn into_order(self) -> Result<DerivativeOrder, FilterError>;
}

impl IntoDerivativeOrder for DerivativeOrder {
    fn into_order(self) -> Result<DerivativeOrder, FilterError> {
        Ok(self)
    }
}

impl IntoDerivativeOrder for i64 {
    fn into_order(self) -> Result<DerivativeOrder, FilterError> {
        match self {
            0 => Ok(DerivativeOrder::Smooth),
            1 => Ok(DerivativeOrder::First),
            2 => Ok(DerivativeOrder::Second),
            3 => Ok(DerivativeOrder::Third),
            other => Err(FilterError::InvalidOrder(other.to_string())),
        }
    }
}

impl IntoDerivativeOrder for i32 {
    fn into_order(self) -> Result<DerivativeOrder, FilterError> {
        i64::from(self).into_order()
    }
}

impl IntoDerivativeOrder for usize {
    fn into_order(self) -> Result<DerivativeOrder, FilterError> {
        i64::try_from(self)
            .map_err(|_| FilterError::InvalidOrder(self.to_string()))?
            .into_order()
    }
}

impl IntoDerivativeOrder for f64 {
    fn into_order(self) -> Result<DerivativeOrder, FilterError> {
        if self.fract() != 0.0 || !(0.0..=3.0).contains(&self) {
            return Err(FilterError::InvalidOrder(self.to_string()));
        }
        (self as i64).into_order()
    }
}

impl IntoDerivativeOrder for f32 {
    fn into_order(self) -> Result<DerivativeOrder, FilterError> {
        f64::from(self).into_order()
    }
}

/// Create a 1-D Gaussian kernel, or the kernel of one of its derivatives.
///
/// The kernel has `2 * lw + 1` taps with `lw = floor(4 * sigma + 0.5)` and its
/// centre at `lw`. The smoothing kernel is normalized to sum 1; derivative
/// kernels are derived from it so that correlating with them differentiates
/// along increasing index.
///
/// # Arguments
///
/// * `sigma` - The standard deviation, strictly positive.
/// * `order` - The derivative order.
///
/// # Returns
///
/// A vector of the kernel.
pub fn gaussian_kernel_1d(sigma: f64, order: DerivativeOrder) -> Vec<f64> {
    let lw = (GAUSSIAN_TRUNCATE * sigma + 0.5) as usize;
    let var = sigma * sigma;

    let mut kernel = vec![0.0; 2 * lw + 1];
    kernel[lw] = 1.0;
    let mut sum = 1.0;
    for ii in 1..=lw {
        let x = ii as f64;
        let w = (-0.5 * x * x / var).exp();
        kernel[lw + ii] = w;
        kernel[lw - ii] = w;
        sum += 2.0 * w;
    }
    kernel.iter_mut().for_each(|k| *k /= sum);

    match order {
        DerivativeOrder::Smooth => {}
        DerivativeOrder::First => {
            kernel[lw] = 0.0;
            for ii in 1..=lw {
                let x = ii as f64;
                let d = x / var * kernel[lw + ii];
                kernel[lw + ii] = d;
                kernel[lw - ii] = -d;
            }
        }
        DerivativeOrder::Second => {
            kernel[lw] *= -1.0 / var;
            for ii in 1..=lw {
                let x = ii as f64;
                let d = (x * x / var - 1.0) * kernel[lw + ii] / var;
                kernel[lw + ii] = d;
                kernel[lw - ii] = d;
            }
        }
        DerivativeOrder::Third => {
            kernel[lw] = 0.0;
            let var2 = var * var;
            for ii in 1..=lw {
                let x = ii as f64;
                let d = (3.0 - x * x / var) * x * kernel[lw + ii] / var2;
                kernel[lw + ii] = -d;
                kernel[lw - ii] = d;
            }
        }
    }

    log::trace!(
        "gaussian kernel sigma={} order={} taps={}",
        sigma,
        order.as_usize(),
        kernel.len()
    );

    kernel
}
