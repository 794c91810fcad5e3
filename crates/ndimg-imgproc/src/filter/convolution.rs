use ndimg_tensor::{tensor::unravel_index, Element, NdArray, Promote};

use crate::{
    error::FilterError,
    padding::BoundaryMode,
    parallel::{for_each_row, ExecutionStrategy},
};

/// Whether kernel weights are read as-is or mirrored about the centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Orientation {
    /// `src[x - k + centre]`, as `scipy.ndimage.convolve`.
    Convolve,
    /// `src[x + k - centre]`, as `scipy.ndimage.correlate`.
    Correlate,
}

impl Orientation {
    /// Offset of kernel index `k` from the output sample, for a centre `c`.
    #[inline]
    fn delta(self, k: usize, c: isize) -> isize {
        match self {
            Orientation::Convolve => c - k as isize,
            Orientation::Correlate => k as isize - c,
        }
    }
}

/// A single nonzero kernel weight, positioned relative to the kernel centre.
struct Tap {
    deltas: Vec<isize>,
    linear: isize,
    weight: f64,
}

/// The nonzero taps of an N-D kernel, in row-major kernel order.
///
/// Zero weights are dropped up front, so padding a kernel with zeros never
/// changes a result.
struct CompiledKernel {
    taps: Vec<Tap>,
    reach_lo: Vec<usize>,
    reach_hi: Vec<usize>,
}

impl CompiledKernel {
    fn new<K: Element>(
        kernel: &NdArray<K>,
        src_strides: &[usize],
        orientation: Orientation,
    ) -> Self {
        let ndim = kernel.ndim();
        let centre = kernel.shape().iter().map(|&n| (n / 2) as isize);
        let centre = centre.collect::<Vec<_>>();

        let mut taps = Vec::new();
        let mut reach_lo = vec![0; ndim];
        let mut reach_hi = vec![0; ndim];

        for (offset, &w) in kernel.as_slice().iter().enumerate() {
            let weight = w.to_f64();
            if weight == 0.0 {
                continue;
            }
            let index = unravel_index(offset, kernel.strides());
            let deltas = index
                .iter()
                .zip(&centre)
                .map(|(&i, &c)| orientation.delta(i, c))
                .collect::<Vec<_>>();
            let mut linear = 0isize;
            for (a, &d) in deltas.iter().enumerate() {
                reach_lo[a] = reach_lo[a].max((-d).max(0) as usize);
                reach_hi[a] = reach_hi[a].max(d.max(0) as usize);
                linear += d * src_strides[a] as isize;
            }
            taps.push(Tap {
                deltas,
                linear,
                weight,
            });
        }

        Self {
            taps,
            reach_lo,
            reach_hi,
        }
    }

    /// Whether every tap lands inside the source at `index`.
    #[inline]
    fn is_interior(&self, index: &[usize], shape: &[usize]) -> bool {
        index
            .iter()
            .zip(shape)
            .enumerate()
            .all(|(a, (&i, &n))| i >= self.reach_lo[a] && i + self.reach_hi[a] < n)
    }

    fn apply<T, O>(
        &self,
        src: &NdArray<T>,
        dst: &mut NdArray<O>,
        mode: BoundaryMode,
        strategy: ExecutionStrategy,
    ) -> Result<(), FilterError>
    where
        T: Element,
        O: Element,
    {
        let shape = src.shape();
        let strides = src.strides();
        let src_data = src.as_slice();
        let ndim = shape.len();
        let row_len = shape.last().copied().unwrap_or(1);
        let fill = mode.fill_value();

        for_each_row(dst.as_slice_mut(), row_len, strategy, |start, row| {
            let mut index = unravel_index(start, strides);
            for (c, out) in row.iter_mut().enumerate() {
                if ndim > 0 {
                    index[ndim - 1] = c;
                }
                let offset = (start + c) as isize;
                let acc = if self.is_interior(&index, shape) {
                    self.taps.iter().fold(0.0, |acc, tap| {
                        acc + src_data[(offset + tap.linear) as usize].to_f64() * tap.weight
                    })
                } else {
                    self.taps.iter().fold(0.0, |acc, tap| {
                        match mode.resolve_offset(&index, &tap.deltas, shape, strides) {
                            Some(o) => acc + src_data[o].to_f64() * tap.weight,
                            None if mode == BoundaryMode::Ignore => acc,
                            None => acc + fill * tap.weight,
                        }
                    })
                };
                *out = O::from_f64(acc);
            }
        })?;

        Ok(())
    }
}

/// Convolve an N-D array with an N-D kernel.
///
/// The kernel is mirrored along every axis, so each output sample is the sum
/// of `src[x - k + centre] * kernel[k]` with the centre at `extent / 2`. This
/// matches `scipy.ndimage.convolve` with its default origin, for odd and even
/// extents alike. Nonzero weights are accumulated in `f64` in row-major kernel
/// order and then cast to the output element type. Samples that fall outside
/// the source are resolved with `mode`.
///
/// # Arguments
///
/// * `src` - The source array.
/// * `kernel` - The kernel, with the same rank as `src`.
/// * `mode` - The boundary mode.
///
/// # Returns
///
/// An array of the same shape as `src`, of the promoted element type.
///
/// # Errors
///
/// [`FilterError::RankMismatch`] if the ranks differ.
///
/// # Example
///
/// ```
/// use ndimg_imgproc::filter::convolve;
/// use ndimg_imgproc::padding::BoundaryMode;
/// use ndimg_tensor::NdArray;
///
/// let src = NdArray::<f64>::from_shape_vec(&[1, 4], vec![0.0, 1.0, 2.0, 3.0]).unwrap();
/// let kernel = NdArray::<f64>::from_shape_vec(&[1, 3], vec![1.0, 2.0, 3.0]).unwrap();
/// let dst = convolve(&src, &kernel, BoundaryMode::Constant(0.0)).unwrap();
/// assert_eq!(dst.as_slice(), &[1.0, 4.0, 10.0, 12.0]);
/// ```
pub fn convolve<T, K>(
    src: &NdArray<T>,
    kernel: &NdArray<K>,
    mode: BoundaryMode,
) -> Result<NdArray<<T as Promote<K>>::Output>, FilterError>
where
    T: Promote<K>,
    K: Element,
{
    convolve_with_strategy(src, kernel, mode, ExecutionStrategy::default())
}

/// Same as [`convolve`], with an explicit [`ExecutionStrategy`].
pub fn convolve_with_strategy<T, K>(
    src: &NdArray<T>,
    kernel: &NdArray<K>,
    mode: BoundaryMode,
    strategy: ExecutionStrategy,
) -> Result<NdArray<<T as Promote<K>>::Output>, FilterError>
where
    T: Promote<K>,
    K: Element,
{
    filter_nd(src, kernel, mode, strategy, Orientation::Convolve)
}

/// Correlate an N-D array with an N-D kernel.
///
/// Same as [`convolve`] without mirroring the kernel: each output sample is
/// the sum of `src[x + k - centre] * kernel[k]`.
///
/// # Errors
///
/// [`FilterError::RankMismatch`] if the ranks differ.
pub fn correlate<T, K>(
    src: &NdArray<T>,
    kernel: &NdArray<K>,
    mode: BoundaryMode,
) -> Result<NdArray<<T as Promote<K>>::Output>, FilterError>
where
    T: Promote<K>,
    K: Element,
{
    filter_nd(src, kernel, mode, ExecutionStrategy::default(), Orientation::Correlate)
}

fn filter_nd<T, K>(
    src: &NdArray<T>,
    kernel: &NdArray<K>,
    mode: BoundaryMode,
    strategy: ExecutionStrategy,
    orientation: Orientation,
) -> Result<NdArray<<T as Promote<K>>::Output>, FilterError>
where
    T: Promote<K>,
    K: Element,
{
    if kernel.ndim() != src.ndim() {
        return Err(FilterError::RankMismatch(src.ndim(), kernel.ndim()));
    }

    let compiled = CompiledKernel::new(kernel, src.strides(), orientation);
    log::debug!(
        "{:?}: shape={:?} kernel={:?} taps={} mode={}",
        orientation,
        src.shape(),
        kernel.shape(),
        compiled.taps.len(),
        mode
    );

    let mut dst = NdArray::zeros(src.shape());
    compiled.apply(src, &mut dst, mode, strategy)?;
    Ok(dst)
}

/// Convolve along a single axis with a 1-D weight vector.
///
/// The result is identical to [`convolve`] with the weights embedded along
/// `axis` of an otherwise singleton kernel, but runs without building one.
///
/// # Errors
///
/// * [`FilterError::InvalidWeightsRank`] if `weights` is not 1-D.
/// * [`FilterError::AxisOutOfBounds`] if `axis >= src.ndim()`.
pub fn convolve1d<T, K>(
    src: &NdArray<T>,
    weights: &NdArray<K>,
    axis: usize,
    mode: BoundaryMode,
) -> Result<NdArray<<T as Promote<K>>::Output>, FilterError>
where
    T: Promote<K>,
    K: Element,
{
    convolve1d_with_strategy(src, weights, axis, mode, ExecutionStrategy::default())
}

/// Same as [`convolve1d`], taking the weights as a plain slice.
pub fn convolve1d_slice<T, K>(
    src: &NdArray<T>,
    weights: &[K],
    axis: usize,
    mode: BoundaryMode,
) -> Result<NdArray<<T as Promote<K>>::Output>, FilterError>
where
    T: Promote<K>,
    K: Element,
{
    check_axis(src, axis)?;
    filter_axis(
        src,
        weights,
        axis,
        mode,
        ExecutionStrategy::default(),
        Orientation::Convolve,
    )
}

/// Same as [`convolve1d`], with an explicit [`ExecutionStrategy`].
pub fn convolve1d_with_strategy<T, K>(
    src: &NdArray<T>,
    weights: &NdArray<K>,
    axis: usize,
    mode: BoundaryMode,
    strategy: ExecutionStrategy,
) -> Result<NdArray<<T as Promote<K>>::Output>, FilterError>
where
    T: Promote<K>,
    K: Element,
{
    if weights.ndim() != 1 {
        return Err(FilterError::InvalidWeightsRank(weights.ndim()));
    }
    check_axis(src, axis)?;
    filter_axis(src, weights.as_slice(), axis, mode, strategy, Orientation::Convolve)
}

/// Correlate along a single axis with a 1-D weight slice.
///
/// The weights are not mirrored. The Gaussian filters run on this.
///
/// # Errors
///
/// [`FilterError::AxisOutOfBounds`] if `axis >= src.ndim()`.
pub fn correlate1d<T, K>(
    src: &NdArray<T>,
    weights: &[K],
    axis: usize,
    mode: BoundaryMode,
) -> Result<NdArray<<T as Promote<K>>::Output>, FilterError>
where
    T: Promote<K>,
    K: Element,
{
    check_axis(src, axis)?;
    filter_axis(
        src,
        weights,
        axis,
        mode,
        ExecutionStrategy::default(),
        Orientation::Correlate,
    )
}

fn check_axis<T>(src: &NdArray<T>, axis: usize) -> Result<(), FilterError> {
    if axis >= src.ndim() {
        return Err(FilterError::AxisOutOfBounds(axis, src.ndim()));
    }
    Ok(())
}

fn filter_axis<T, K>(
    src: &NdArray<T>,
    weights: &[K],
    axis: usize,
    mode: BoundaryMode,
    strategy: ExecutionStrategy,
    orientation: Orientation,
) -> Result<NdArray<<T as Promote<K>>::Output>, FilterError>
where
    T: Promote<K>,
    K: Element,
{
    let centre = (weights.len() / 2) as isize;
    let taps = weights
        .iter()
        .enumerate()
        .map(|(k, w)| (orientation.delta(k, centre), w.to_f64()))
        .filter(|&(_, w)| w != 0.0)
        .collect::<Vec<_>>();
    let reach_lo = taps.iter().map(|&(d, _)| (-d).max(0) as usize).max().unwrap_or(0);
    let reach_hi = taps.iter().map(|&(d, _)| d.max(0) as usize).max().unwrap_or(0);

    log::debug!(
        "{:?}1d: shape={:?} axis={} taps={} mode={}",
        orientation,
        src.shape(),
        axis,
        taps.len(),
        mode
    );

    let shape = src.shape();
    let strides = src.strides();
    let src_data = src.as_slice();
    let n = shape[axis];
    let stride = strides[axis];
    let row_len = shape.last().copied().unwrap_or(1);
    let last = shape.len() - 1;
    let fill = mode.fill_value();

    let mut dst = NdArray::<<T as Promote<K>>::Output>::zeros(shape);
    for_each_row(dst.as_slice_mut(), row_len, strategy, |start, row| {
        let row_pos = unravel_index(start, strides)[axis];
        for (c, out) in row.iter_mut().enumerate() {
            let offset = start + c;
            let pos = if axis == last { c } else { row_pos };
            let base = offset - pos * stride;
            let acc = if pos >= reach_lo && pos + reach_hi < n {
                taps.iter().fold(0.0, |acc, &(d, w)| {
                    acc + src_data[(offset as isize + d * stride as isize) as usize].to_f64() * w
                })
            } else {
                taps.iter().fold(0.0, |acc, &(d, w)| {
                    match mode.resolve(pos as isize + d, n) {
                        Some(i) => acc + src_data[base + i * stride].to_f64() * w,
                        None if mode == BoundaryMode::Ignore => acc,
                        None => acc + fill * w,
                    }
                })
            };
            *out = <T as Promote<K>>::Output::from_f64(acc);
        }
    })?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Direct evaluation over the full kernel, zeros included.
    fn reference(
        src: &NdArray<f64>,
        kernel: &NdArray<f64>,
        mode: BoundaryMode,
        flip: bool,
    ) -> Vec<f64> {
        let centre = kernel.shape().iter().map(|&n| (n / 2) as isize).collect::<Vec<_>>();
        (0..src.numel())
            .map(|offset| {
                let x = unravel_index(offset, src.strides());
                let mut acc = 0.0;
                for (k, &w) in kernel.as_slice().iter().enumerate() {
                    let kidx = unravel_index(k, kernel.strides());
                    let mut pos = Vec::with_capacity(x.len());
                    for a in 0..x.len() {
                        let k = kidx[a] as isize - centre[a];
                        let i = if flip { x[a] as isize - k } else { x[a] as isize + k };
                        pos.push(mode.resolve(i, src.shape()[a]));
                    }
                    if pos.iter().all(Option::is_some) {
                        let pos = pos.into_iter().flatten().collect::<Vec<_>>();
                        let v = *src.get(&pos).unwrap_or(&0.0);
                        acc += v * w;
                    } else if mode != BoundaryMode::Ignore {
                        acc += mode.fill_value() * w;
                    }
                }
                acc
            })
            .collect()
    }

    #[test]
    fn test_convolve_1d_modes() -> Result<(), FilterError> {
        let src = NdArray::<f64>::from_shape_vec(&[3], vec![1.0, 2.0, 3.0])?;
        let kernel = NdArray::<f64>::from_shape_vec(&[3], vec![1.0, 1.0, 1.0])?;
        let cases = [
            (BoundaryMode::Reflect, [4.0, 6.0, 8.0]),
            (BoundaryMode::Mirror, [5.0, 6.0, 7.0]),
            (BoundaryMode::Nearest, [4.0, 6.0, 8.0]),
            (BoundaryMode::Wrap, [6.0, 6.0, 6.0]),
            (BoundaryMode::Constant(0.0), [3.0, 6.0, 5.0]),
            (BoundaryMode::Constant(10.0), [13.0, 6.0, 15.0]),
            (BoundaryMode::Ignore, [3.0, 6.0, 5.0]),
        ];
        for (mode, expected) in cases {
            let dst = convolve(&src, &kernel, mode)?;
            assert_eq!(dst.as_slice(), &expected, "mode {mode}");
        }
        Ok(())
    }

    #[test]
    fn test_convolve_matches_reference_all_modes() -> Result<(), FilterError> {
        let src = NdArray::<f64>::from_shape_fn(&[34, 340], |idx| ((idx[0] * 340 + idx[1]) % 3) as f64);
        let kernel = NdArray::<f64>::from_shape_val(&[3, 3], 1.0);
        for mode in BoundaryMode::ALL {
            let dst = convolve(&src, &kernel, mode)?;
            assert_eq!(dst.shape(), src.shape());
            assert_eq!(dst.as_slice(), reference(&src, &kernel, mode, true).as_slice(), "mode {mode}");
        }
        Ok(())
    }

    #[test]
    fn test_convolve_asymmetric_kernel_3d() -> Result<(), FilterError> {
        let src = random_array(&[5, 6, 7], 7)?;
        let kernel = NdArray::<f64>::from_shape_vec(
            &[2, 3, 1],
            vec![1.0, -2.0, 0.0, 0.5, 3.0, -1.0],
        )?;
        for mode in BoundaryMode::ALL {
            let dst = convolve(&src, &kernel, mode)?;
            let expected = reference(&src, &kernel, mode, true);
            for (a, b) in dst.as_slice().iter().zip(&expected) {
                approx::assert_relative_eq!(*a, *b, epsilon = 1e-12);
            }
            let dst = correlate(&src, &kernel, mode)?;
            let expected = reference(&src, &kernel, mode, false);
            for (a, b) in dst.as_slice().iter().zip(&expected) {
                approx::assert_relative_eq!(*a, *b, epsilon = 1e-12);
            }
        }
        Ok(())
    }

    fn random_array(shape: &[usize], seed: u64) -> Result<NdArray<f64>, FilterError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| rng.random_range(-4.0..4.0))
            .collect();
        Ok(NdArray::from_shape_vec(shape, data)?)
    }

    #[test]
    fn test_zero_padding_invariance() -> Result<(), FilterError> {
        let src = NdArray::<f64>::from_shape_fn(&[32, 32], |idx| (idx[0] * 32 + idx[1]) as f64);
        let small = NdArray::<f64>::from_shape_vec(&[2, 2], vec![0.0, 1.0, 2.0, 3.0])?;
        let padded = NdArray::<f64>::from_shape_vec(
            &[3, 3],
            vec![0.0, 1.0, 0.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0],
        )?;
        for mode in BoundaryMode::ALL {
            let a = convolve(&src, &small, mode)?;
            let b = convolve(&src, &padded, mode)?;
            assert_eq!(a, b, "mode {mode}");
        }
        Ok(())
    }

    #[test]
    fn test_rank_mismatch() {
        let src = NdArray::<u8>::zeros(&[4, 4]);
        let kernel = NdArray::<f64>::from_shape_val(&[3], 1.0);
        assert_eq!(
            convolve(&src, &kernel, BoundaryMode::Reflect),
            Err(FilterError::RankMismatch(2, 1))
        );
    }

    #[test]
    fn test_promotion_and_saturation() -> Result<(), FilterError> {
        let src = NdArray::<u8>::from_shape_val(&[4, 4], 200);
        let ones_f = NdArray::<f64>::from_shape_val(&[3, 3], 1.0);
        let dst: NdArray<f64> = convolve(&src, &ones_f, BoundaryMode::Reflect)?;
        assert!(dst.iter().all(|&v| v == 1800.0));

        let ones_u8 = NdArray::<u8>::from_shape_val(&[3, 3], 1);
        let dst: NdArray<u8> = convolve(&src, &ones_u8, BoundaryMode::Reflect)?;
        assert!(dst.iter().all(|&v| v == 255));

        let halves = NdArray::<f32>::from_shape_val(&[1, 1], 0.5);
        let dst: NdArray<f32> = convolve(&src, &halves, BoundaryMode::Reflect)?;
        assert!(dst.iter().all(|&v| v == 100.0));
        Ok(())
    }

    #[test]
    fn test_empty_kernel_gives_zeros() -> Result<(), FilterError> {
        let src = NdArray::<f64>::from_shape_val(&[3, 3], 5.0);
        let kernel = NdArray::<f64>::zeros(&[3, 3]);
        let dst = convolve(&src, &kernel, BoundaryMode::Constant(9.0))?;
        assert!(dst.iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn test_convolve1d_errors() {
        let src = NdArray::<f64>::zeros(&[4, 5]);
        let w2 = NdArray::<f64>::zeros(&[3, 1]);
        let w1 = NdArray::<f64>::zeros(&[3]);
        assert_eq!(
            convolve1d(&src, &w2, 0, BoundaryMode::Reflect),
            Err(FilterError::InvalidWeightsRank(2))
        );
        assert_eq!(
            convolve1d(&src, &w1, 2, BoundaryMode::Reflect),
            Err(FilterError::AxisOutOfBounds(2, 2))
        );
        assert_eq!(
            convolve1d_slice(&src, &[1.0f64], 3, BoundaryMode::Reflect),
            Err(FilterError::AxisOutOfBounds(3, 2))
        );
    }

    #[test]
    fn test_convolve1d_matches_embedded_kernel() -> Result<(), FilterError> {
        let src = random_array(&[6, 7, 8], 42)?;
        let weights = vec![0.25, -1.0, 0.0, 2.0, 0.5];
        for axis in 0..3 {
            let mut kshape = vec![1; 3];
            kshape[axis] = weights.len();
            let kernel = NdArray::<f64>::from_shape_slice(&kshape, &weights)?;
            let w = NdArray::<f64>::from_shape_slice(&[weights.len()], &weights)?;
            for mode in BoundaryMode::ALL {
                let a = convolve1d(&src, &w, axis, mode)?;
                let b = convolve(&src, &kernel, mode)?;
                assert_eq!(a, b, "axis {axis} mode {mode}");
            }
        }
        Ok(())
    }

    #[test]
    fn test_convolve1d_shape_and_dtype() -> Result<(), FilterError> {
        let src = NdArray::<u8>::from_shape_fn(&[2, 3], |idx| (idx[0] * 3 + idx[1]) as u8);
        let dst: NdArray<f64> = convolve1d_slice(&src, &[1.0f64, 0.0, -1.0], 1, BoundaryMode::Nearest)?;
        assert_eq!(dst.shape(), &[2, 3]);
        assert_eq!(dst.as_slice(), &[1.0, 2.0, 1.0, 1.0, 2.0, 1.0]);

        let dst: NdArray<f64> = correlate1d(&src, &[1.0f64, 0.0, -1.0], 1, BoundaryMode::Nearest)?;
        assert_eq!(dst.as_slice(), &[-1.0, -2.0, -1.0, -1.0, -2.0, -1.0]);
        Ok(())
    }

    #[test]
    fn test_convolve_mirrors_kernel() -> Result<(), FilterError> {
        // values from scipy.ndimage.convolve / correlate with mode="constant"
        let src = NdArray::<f64>::from_shape_vec(&[1, 4], vec![0.0, 1.0, 2.0, 3.0])?;
        let odd = NdArray::<f64>::from_shape_vec(&[1, 3], vec![1.0, 2.0, 3.0])?;
        let zero = BoundaryMode::Constant(0.0);
        assert_eq!(convolve(&src, &odd, zero)?.as_slice(), &[1.0, 4.0, 10.0, 12.0]);
        assert_eq!(correlate(&src, &odd, zero)?.as_slice(), &[3.0, 8.0, 14.0, 8.0]);

        let even = NdArray::<f64>::from_shape_vec(&[1, 2], vec![1.0, 2.0])?;
        assert_eq!(convolve(&src, &even, zero)?.as_slice(), &[1.0, 4.0, 7.0, 6.0]);
        assert_eq!(correlate(&src, &even, zero)?.as_slice(), &[0.0, 2.0, 5.0, 8.0]);

        let w = [1.0f64, 2.0, 3.0];
        assert_eq!(convolve1d_slice(&src, &w, 1, zero)?, convolve(&src, &odd, zero)?);
        assert_eq!(correlate1d(&src, &w, 1, zero)?, correlate(&src, &odd, zero)?);
        Ok(())
    }

    #[test]
    fn test_strategies_agree() -> Result<(), FilterError> {
        let src: NdArray<f32> = random_array(&[64, 80], 3)?.cast();
        let kernel = NdArray::<f32>::from_shape_fn(&[5, 3], |idx| (idx[0] as f32 - idx[1] as f32) * 0.1);
        let serial = convolve_with_strategy(&src, &kernel, BoundaryMode::Mirror, ExecutionStrategy::Serial)?;
        for strategy in [
            ExecutionStrategy::Parallel,
            ExecutionStrategy::Fixed(3),
            ExecutionStrategy::Auto,
        ] {
            let other = convolve_with_strategy(&src, &kernel, BoundaryMode::Mirror, strategy)?;
            assert_eq!(serial, other);
        }

        let w = NdArray::<f32>::from_shape_vec(&[3], vec![1.0, 2.0, 1.0])?;
        let a = convolve1d_with_strategy(&src, &w, 0, BoundaryMode::Wrap, ExecutionStrategy::Serial)?;
        let b = convolve1d_with_strategy(&src, &w, 0, BoundaryMode::Wrap, ExecutionStrategy::Parallel)?;
        assert_eq!(a, b);
        Ok(())
    }
}
