use ndimg_tensor::{Element, NdArray};

use super::{
    convolution::correlate1d,
    kernels::{gaussian_kernel_1d, IntoDerivativeOrder},
};
use crate::{error::FilterError, padding::BoundaryMode};

/// Sigmas at or below this are treated as "no smoothing".
const SIGMA_EPSILON: f64 = 1e-15;

fn check_sigma(sigma: f64) -> Result<(), FilterError> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(FilterError::InvalidSigma(sigma));
    }
    Ok(())
}

/// Apply a Gaussian filter (or a Gaussian derivative) along every axis.
///
/// The source is converted to `f64` and correlated with the 1-D kernel from
/// [`gaussian_kernel_1d`] along axis 0, then axis 1, and so on, with
/// [`BoundaryMode::Reflect`]. A derivative order applies to every axis, so
/// `order = 1` on a 2-D image yields the mixed derivative.
///
/// # Arguments
///
/// * `src` - The source array of any rank.
/// * `sigma` - The standard deviation in samples.
/// * `order` - The derivative order, an integer in `0..=3`.
///
/// # Errors
///
/// * [`FilterError::InvalidOrder`] for any order outside `0..=3`.
/// * [`FilterError::InvalidSigma`] for a negative or non-finite sigma.
///
/// # Example
///
/// ```
/// use ndimg_imgproc::filter::gaussian_filter;
/// use ndimg_tensor::NdArray;
///
/// let src = NdArray::<u8>::from_shape_val(&[8, 8], 10);
/// let dst = gaussian_filter(&src, 1.5, 0).unwrap();
/// assert!(dst.iter().all(|&v| (v - 10.0).abs() < 1e-9));
/// ```
pub fn gaussian_filter<T, O>(
    src: &NdArray<T>,
    sigma: f64,
    order: O,
) -> Result<NdArray<f64>, FilterError>
where
    T: Element,
    O: IntoDerivativeOrder,
{
    gaussian_filter_with_mode(src, sigma, order, BoundaryMode::Reflect)
}

/// Same as [`gaussian_filter`], with an explicit boundary mode.
pub fn gaussian_filter_with_mode<T, O>(
    src: &NdArray<T>,
    sigma: f64,
    order: O,
    mode: BoundaryMode,
) -> Result<NdArray<f64>, FilterError>
where
    T: Element,
    O: IntoDerivativeOrder,
{
    let order = order.into_order()?;
    check_sigma(sigma)?;

    let mut dst: NdArray<f64> = src.cast();
    if sigma <= SIGMA_EPSILON {
        return Ok(dst);
    }

    let kernel = gaussian_kernel_1d(sigma, order);
    log::debug!(
        "gaussian_filter: shape={:?} sigma={} order={} taps={}",
        src.shape(),
        sigma,
        order.as_usize(),
        kernel.len()
    );
    for axis in 0..src.ndim() {
        dst = correlate1d(&dst, &kernel, axis, mode)?;
    }
    Ok(dst)
}

/// Apply a Gaussian filter (or derivative) along a single axis.
///
/// # Errors
///
/// As [`gaussian_filter`], plus [`FilterError::AxisOutOfBounds`].
pub fn gaussian_filter1d<T, O>(
    src: &NdArray<T>,
    sigma: f64,
    axis: usize,
    order: O,
    mode: BoundaryMode,
) -> Result<NdArray<f64>, FilterError>
where
    T: Element,
    O: IntoDerivativeOrder,
{
    let order = order.into_order()?;
    check_sigma(sigma)?;
    if axis >= src.ndim() {
        return Err(FilterError::AxisOutOfBounds(axis, src.ndim()));
    }

    let dst: NdArray<f64> = src.cast();
    if sigma <= SIGMA_EPSILON {
        return Ok(dst);
    }
    let kernel = gaussian_kernel_1d(sigma, order);
    correlate1d(&dst, &kernel, axis, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::kernels::DerivativeOrder;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_image(rows: usize, cols: usize, seed: u64) -> Result<NdArray<f64>, FilterError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..rows * cols)
            .map(|_| rng.random_range(0.0..255.0))
            .collect();
        Ok(NdArray::from_shape_vec(&[rows, cols], data)?)
    }

    /// Full 2-D correlation with the outer product of the 1-D kernel.
    fn reference_2d(src: &NdArray<f64>, sigma: f64) -> Vec<f64> {
        let k = gaussian_kernel_1d(sigma, DerivativeOrder::Smooth);
        let lw = (k.len() / 2) as isize;
        let (rows, cols) = (src.shape()[0], src.shape()[1]);
        let mut out = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let mut acc = 0.0;
                for (i, ki) in k.iter().enumerate() {
                    let rr = BoundaryMode::Reflect.resolve(r as isize + i as isize - lw, rows);
                    for (j, kj) in k.iter().enumerate() {
                        let cc = BoundaryMode::Reflect.resolve(c as isize + j as isize - lw, cols);
                        if let (Some(rr), Some(cc)) = (rr, cc) {
                            acc += src.as_slice()[rr * cols + cc] * ki * kj;
                        }
                    }
                }
                out.push(acc);
            }
        }
        out
    }

    #[test]
    fn test_gaussian_matches_direct_2d() -> Result<(), FilterError> {
        let src = random_image(40, 48, 11)?;
        for sigma in [4.0, 8.0, 12.0] {
            let dst = gaussian_filter(&src, sigma, 0)?;
            let expected = reference_2d(&src, sigma);
            for (a, b) in dst.iter().zip(&expected) {
                assert_relative_eq!(*a, *b, epsilon = 1e-5);
            }
        }
        Ok(())
    }

    /// Normalized `exp(-x^2 / 2 sigma^2)` sampled at `|x| <= int(4 sigma + 0.5)`.
    fn sampled_gaussian(sigma: f64) -> impl Fn(isize) -> f64 {
        let lw = (4.0 * sigma + 0.5) as isize;
        let g = move |x: isize| (-((x * x) as f64) / (2.0 * sigma * sigma)).exp();
        let norm = (-lw..=lw).map(g).sum::<f64>();
        move |x| if x.abs() > lw { 0.0 } else { g(x) / norm }
    }

    #[test]
    fn test_gaussian_impulse_response() -> Result<(), FilterError> {
        let sigma = 4.0;
        let g = sampled_gaussian(sigma);
        let mut src = NdArray::<f64>::zeros(&[41, 41]);
        src.as_slice_mut()[20 * 41 + 20] = 1.0;

        let dst = gaussian_filter(&src, sigma, 0)?;
        for (dr, dc) in [(0, 0), (0, 3), (-5, 2), (7, -7), (16, 0), (17, 0)] {
            let (r, c) = ((20 + dr) as usize, (20 + dc) as usize);
            let got = *dst.get(&[r, c]).unwrap_or(&f64::NAN);
            assert_relative_eq!(got, g(dr) * g(dc), epsilon = 1e-5);
        }
        assert_relative_eq!(dst.iter().sum::<f64>(), 1.0, epsilon = 1e-9);

        // first derivative of the Gaussian, -x / sigma^2 * g(x), along columns
        let dx = gaussian_filter1d(&src, sigma, 1, 1, BoundaryMode::Reflect)?;
        for d in [-9isize, -4, -1, 0, 2, 6] {
            let got = *dx.get(&[20, (20 + d) as usize]).unwrap_or(&f64::NAN);
            let expected = -(d as f64) / (sigma * sigma) * g(d);
            assert_relative_eq!(got, expected, epsilon = 1e-5);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_preserves_constant() -> Result<(), FilterError> {
        let src = NdArray::<u16>::from_shape_val(&[6, 7, 5], 300);
        let dst = gaussian_filter(&src, 2.0, DerivativeOrder::Smooth)?;
        assert_eq!(dst.shape(), src.shape());
        for v in dst.iter() {
            assert_relative_eq!(*v, 300.0, epsilon = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_orders() -> Result<(), FilterError> {
        let src = random_image(16, 16, 5)?;
        for order in 0..4i32 {
            let dst = gaussian_filter(&src, 1.0, order)?;
            assert_eq!(dst.shape(), src.shape());
        }
        for bad in [4i32, 5, -3, -1] {
            assert!(matches!(
                gaussian_filter(&src, 1.0, bad),
                Err(FilterError::InvalidOrder(_))
            ));
        }
        assert!(matches!(
            gaussian_filter(&src, 1.0, 1.5f64),
            Err(FilterError::InvalidOrder(_))
        ));
        Ok(())
    }

    #[test]
    fn test_gaussian_invalid_sigma() {
        let src = NdArray::<f64>::zeros(&[4, 4]);
        assert_eq!(
            gaussian_filter(&src, -1.0, 0),
            Err(FilterError::InvalidSigma(-1.0))
        );
        assert!(gaussian_filter(&src, f64::INFINITY, 0).is_err());
    }

    #[test]
    fn test_zero_sigma_is_copy() -> Result<(), FilterError> {
        let src = NdArray::<u8>::from_shape_fn(&[3, 4], |idx| (idx[0] * 4 + idx[1]) as u8);
        let dst = gaussian_filter(&src, 0.0, 2)?;
        assert_eq!(dst, src.cast::<f64>());
        Ok(())
    }

    #[test]
    fn test_first_derivative_of_ramp() -> Result<(), FilterError> {
        // a ramp along columns has unit slope; along rows it is flat
        let src = NdArray::<f64>::from_shape_fn(&[9, 40], |idx| idx[1] as f64);
        let dx = gaussian_filter1d(&src, 2.0, 1, 1, BoundaryMode::Reflect)?;
        let dy = gaussian_filter1d(&src, 2.0, 0, 1, BoundaryMode::Reflect)?;
        for r in 0..9 {
            assert_relative_eq!(*dx.get(&[r, 20]).unwrap_or(&0.0), 1.0, epsilon = 5e-3);
            assert_relative_eq!(*dy.get(&[r, 20]).unwrap_or(&1.0), 0.0, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_filter1d_axis_check() {
        let src = NdArray::<f64>::zeros(&[4, 4]);
        assert_eq!(
            gaussian_filter1d(&src, 1.0, 2, 0, BoundaryMode::Reflect),
            Err(FilterError::AxisOutOfBounds(2, 2))
        );
    }
}
