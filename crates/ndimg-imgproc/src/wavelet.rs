use std::fmt;
use std::str::FromStr;

use ndimg_tensor::{Element, Float, NdArray};

use crate::error::FilterError;

// Daubechies low-pass filters, normalized so that the taps sum to 2.

const D2: [f64; 2] = [1.0, 1.0];

const D4: [f64; 4] = [
    0.6830127018922193,
    1.1830127018922192,
    0.3169872981077807,
    -0.1830127018922193,
];

const D6: [f64; 6] = [
    0.4704672077841636,
    1.1411169158314434,
    0.6503650005262327,
    -0.19093441556832735,
    -0.1208322083103962,
    0.04981749973688372,
];

const D8: [f64; 8] = [
    0.32580342805129836,
    1.0109457150918288,
    0.8922001382467598,
    -0.039575026235644385,
    -0.26450716736903956,
    0.043616300474177284,
    0.046503601070981754,
    -0.014986989330361473,
];

const D10: [f64; 10] = [
    0.22641898258355886,
    0.8539435427050299,
    1.0243269442591978,
    0.19576696134780744,
    -0.34265671538293657,
    -0.045601131883547044,
    0.1097026586421342,
    -0.008826800108358334,
    -0.017791870101954266,
    0.004717427939067894,
];

const D12: [f64; 12] = [
    0.15774243200290206,
    0.6995038140752382,
    1.062263759881741,
    0.44583132293003463,
    -0.31998659889212583,
    -0.18351806406029716,
    0.1378880929747452,
    0.03892320970832927,
    -0.04466374833018937,
    0.000783251152297182,
    0.006756062362927912,
    -0.0015235338056025166,
];

const D14: [f64; 14] = [
    0.11009943074562704,
    0.5607912836255405,
    1.0311484916362201,
    0.6643724822110801,
    -0.20351382246271899,
    -0.31683501128068353,
    0.10084646500939133,
    0.1140034451597459,
    -0.053782452589694225,
    -0.02343994156420735,
    0.017749792379362386,
    0.0006075149954021091,
    -0.002547904718187493,
    0.0005002268531225167,
];

const D16: [f64; 16] = [
    0.07695562210817561,
    0.44246724715237024,
    0.955486150427957,
    0.8278165324224518,
    -0.02238573533398631,
    -0.40165863278119635,
    0.0006681940924553989,
    0.18207635684737355,
    -0.024563901045729523,
    -0.06235020665030263,
    0.01977215929671515,
    0.01236884481963536,
    -0.006887719256887598,
    -0.0005540045489585559,
    0.000955229711299748,
    -0.00016613726137335038,
];

const D18: [f64; 18] = [
    0.053850349589305346,
    0.34483430381384067,
    0.8553490643591913,
    0.9295457143662085,
    0.18836954950663723,
    -0.4147517618015621,
    -0.13695354902478088,
    0.2100683422788578,
    0.04345267546123665,
    -0.09564726412014149,
    0.0003548928132128353,
    0.03162416585249248,
    -0.006679620226268279,
    -0.006054960575087317,
    0.0026129672804920314,
    0.00032581467135221753,
    -0.00035632975902126436,
    5.564551403425051e-05,
];

const D20: [f64; 20] = [
    0.037717157592163986,
    0.2661221827933313,
    0.7455750714852107,
    0.9736281107325218,
    0.39763774176967026,
    -0.3533362017921387,
    -0.2771098787200707,
    0.18012744853281967,
    0.13160298710078155,
    -0.10096657119644625,
    -0.04165924808751689,
    0.046969814097249596,
    0.0051004369678126805,
    -0.01517900233580996,
    0.0019733253649550087,
    0.0028176865901864026,
    -0.0009699478398533178,
    -0.00016470900609032426,
    0.00013235436685070465,
    -1.875841562744742e-05,
];

/// A Daubechies wavelet family, named by its number of filter taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveletFamily {
    /// Two taps; identical to the unnormalized Haar wavelet.
    D2,
    /// Four taps.
    D4,
    /// Six taps.
    D6,
    /// Eight taps.
    D8,
    /// Ten taps.
    D10,
    /// Twelve taps.
    D12,
    /// Fourteen taps.
    D14,
    /// Sixteen taps.
    D16,
    /// Eighteen taps.
    D18,
    /// Twenty taps.
    D20,
}

impl WaveletFamily {
    /// Every supported family, shortest filter first.
    pub const ALL: [WaveletFamily; 10] = [
        WaveletFamily::D2,
        WaveletFamily::D4,
        WaveletFamily::D6,
        WaveletFamily::D8,
        WaveletFamily::D10,
        WaveletFamily::D12,
        WaveletFamily::D14,
        WaveletFamily::D16,
        WaveletFamily::D18,
        WaveletFamily::D20,
    ];

    /// The tag of the family, e.g. `"D4"`.
    pub fn name(&self) -> &'static str {
        match self {
            WaveletFamily::D2 => "D2",
            WaveletFamily::D4 => "D4",
            WaveletFamily::D6 => "D6",
            WaveletFamily::D8 => "D8",
            WaveletFamily::D10 => "D10",
            WaveletFamily::D12 => "D12",
            WaveletFamily::D14 => "D14",
            WaveletFamily::D16 => "D16",
            WaveletFamily::D18 => "D18",
            WaveletFamily::D20 => "D20",
        }
    }

    /// The low-pass analysis filter. Its taps sum to 2 and their squares sum to 2.
    pub fn coefficients(&self) -> &'static [f64] {
        match self {
            WaveletFamily::D2 => &D2,
            WaveletFamily::D4 => &D4,
            WaveletFamily::D6 => &D6,
            WaveletFamily::D8 => &D8,
            WaveletFamily::D10 => &D10,
            WaveletFamily::D12 => &D12,
            WaveletFamily::D14 => &D14,
            WaveletFamily::D16 => &D16,
            WaveletFamily::D18 => &D18,
            WaveletFamily::D20 => &D20,
        }
    }

    /// The high-pass analysis filter, the alternating flip of the low-pass one.
    pub fn high_pass(&self) -> Vec<f64> {
        let h = self.coefficients();
        let m = h.len();
        (0..m)
            .map(|k| if k % 2 == 0 { -h[m - 1 - k] } else { h[m - 1 - k] })
            .collect()
    }
}

impl fmt::Display for WaveletFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaveletFamily {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaveletFamily::ALL
            .into_iter()
            .find(|family| family.name() == s)
            .ok_or_else(|| FilterError::UnknownWavelet(s.to_string()))
    }
}

fn check_2d<T>(image: &NdArray<T>) -> Result<(), FilterError> {
    if image.ndim() != 2 {
        return Err(FilterError::NotTwoDimensional(image.ndim()));
    }
    Ok(())
}

/// Run `f` over every 1-D lane of `image` along `axis`, through a contiguous copy.
fn for_each_lane<F, L>(image: &mut NdArray<F>, axis: usize, mut f: L) -> Result<(), FilterError>
where
    F: Float,
    L: FnMut(&mut [F]),
{
    let n = image.shape()[axis];
    let stride = image.strides()[axis];
    let starts = image.lane_offsets(axis)?;
    let data = image.as_slice_mut();

    let mut lane = vec![F::zero(); n];
    for start in starts {
        for (i, v) in lane.iter_mut().enumerate() {
            *v = data[start + i * stride];
        }
        f(&mut lane);
        for (i, v) in lane.iter().enumerate() {
            data[start + i * stride] = *v;
        }
    }
    Ok(())
}

fn scale<F: Float>(image: &mut NdArray<F>, factor: f64) {
    let factor = <F as Element>::from_f64(factor);
    image.iter_mut().for_each(|v| *v = *v * factor);
}

fn haar_lane<F: Float>(lane: &mut [F], tmp: &mut Vec<F>) {
    let half = lane.len() / 2;
    tmp.clear();
    tmp.extend_from_slice(lane);
    for i in 0..half {
        let (a, b) = (tmp[2 * i], tmp[2 * i + 1]);
        lane[i] = a + b;
        lane[half + i] = b - a;
    }
}

fn ihaar_lane<F: Float>(lane: &mut [F], tmp: &mut Vec<F>) {
    let half = lane.len() / 2;
    let two = F::one() + F::one();
    tmp.clear();
    tmp.extend_from_slice(lane);
    for i in 0..half {
        let (s, d) = (tmp[i], tmp[half + i]);
        lane[2 * i] = (s - d) / two;
        lane[2 * i + 1] = (s + d) / two;
    }
}

/// Forward Haar transform of a 2-D image, in place.
///
/// Each row and then each column is split into pairs `(a, b)`; the sums
/// `a + b` fill the first half of the lane and the differences `b - a` the
/// second half, which arranges the four sub-bands as quadrants. A trailing
/// sample of an odd-length lane is carried through unchanged. With
/// `preserve_energy` the result is divided by 2, giving the orthonormal
/// transform.
///
/// # Returns
///
/// The same array, transformed.
///
/// # Errors
///
/// [`FilterError::NotTwoDimensional`] if `image` is not 2-D; the array is
/// left untouched.
pub fn haar_inplace<F: Float>(
    image: &mut NdArray<F>,
    preserve_energy: bool,
) -> Result<&mut NdArray<F>, FilterError> {
    check_2d(image)?;
    log::debug!(
        "haar: shape={:?} preserve_energy={}",
        image.shape(),
        preserve_energy
    );

    let mut tmp = Vec::new();
    for_each_lane(image, 1, |lane| haar_lane(lane, &mut tmp))?;
    for_each_lane(image, 0, |lane| haar_lane(lane, &mut tmp))?;
    if preserve_energy {
        scale(image, 0.5);
    }
    Ok(image)
}

/// Forward Haar transform into a fresh `f64` array.
///
/// See [`haar_inplace`].
///
/// # Example
///
/// ```
/// use ndimg_imgproc::wavelet::haar;
/// use ndimg_tensor::NdArray;
///
/// let image = NdArray::<u8>::from_shape_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
/// let wav = haar(&image, false).unwrap();
/// assert_eq!(wav.as_slice(), &[10.0, 2.0, 4.0, 0.0]);
/// ```
pub fn haar<T: Element>(image: &NdArray<T>, preserve_energy: bool) -> Result<NdArray<f64>, FilterError> {
    check_2d(image)?;
    let mut out = image.cast::<f64>();
    haar_inplace(&mut out, preserve_energy)?;
    Ok(out)
}

/// Inverse Haar transform, in place.
///
/// Undoes [`haar_inplace`] when called with the same `preserve_energy`
/// flag; with a different flag the result is off by a factor of 2.
pub fn ihaar_inplace<F: Float>(
    coeffs: &mut NdArray<F>,
    preserve_energy: bool,
) -> Result<&mut NdArray<F>, FilterError> {
    check_2d(coeffs)?;
    log::debug!(
        "ihaar: shape={:?} preserve_energy={}",
        coeffs.shape(),
        preserve_energy
    );

    if preserve_energy {
        scale(coeffs, 2.0);
    }
    let mut tmp = Vec::new();
    for_each_lane(coeffs, 0, |lane| ihaar_lane(lane, &mut tmp))?;
    for_each_lane(coeffs, 1, |lane| ihaar_lane(lane, &mut tmp))?;
    Ok(coeffs)
}

/// Inverse Haar transform into a fresh `f64` array.
pub fn ihaar<T: Element>(coeffs: &NdArray<T>, preserve_energy: bool) -> Result<NdArray<f64>, FilterError> {
    check_2d(coeffs)?;
    let mut out = coeffs.cast::<f64>();
    ihaar_inplace(&mut out, preserve_energy)?;
    Ok(out)
}

/// Filters of a family converted to the working element type.
struct FilterBank<F> {
    low: Vec<F>,
    high: Vec<F>,
}

impl<F: Float> FilterBank<F> {
    fn new(family: WaveletFamily) -> Self {
        let convert = |v: &[f64]| {
            v.iter()
                .map(|&c| <F as Element>::from_f64(c))
                .collect::<Vec<_>>()
        };
        Self {
            low: convert(family.coefficients()),
            high: convert(&family.high_pass()),
        }
    }

    /// One analysis level over the even-length prefix of the lane, with
    /// periodic extension.
    fn analyze(&self, lane: &mut [F], tmp: &mut Vec<F>) {
        let ne = lane.len() - lane.len() % 2;
        let half = ne / 2;
        tmp.clear();
        tmp.extend_from_slice(&lane[..ne]);
        for i in 0..half {
            let mut lo = F::zero();
            let mut hi = F::zero();
            for (k, (&h, &g)) in self.low.iter().zip(&self.high).enumerate() {
                let x = tmp[(2 * i + k) % ne];
                lo = lo + h * x;
                hi = hi + g * x;
            }
            lane[i] = lo;
            lane[half + i] = hi;
        }
    }

    /// The transpose of [`FilterBank::analyze`], halved.
    fn synthesize(&self, lane: &mut [F], tmp: &mut Vec<F>) {
        let ne = lane.len() - lane.len() % 2;
        let half = ne / 2;
        let two = F::one() + F::one();
        tmp.clear();
        tmp.extend_from_slice(&lane[..ne]);
        lane[..ne].iter_mut().for_each(|v| *v = F::zero());
        for i in 0..half {
            let (lo, hi) = (tmp[i], tmp[half + i]);
            for (k, (&h, &g)) in self.low.iter().zip(&self.high).enumerate() {
                let j = (2 * i + k) % ne;
                lane[j] = lane[j] + (h * lo + g * hi) / two;
            }
        }
    }
}

/// Forward Daubechies transform of a 2-D image, in place.
///
/// Rows and then columns are filtered with the low- and high-pass filters of
/// `family` and downsampled by two, low-pass results in the first half of
/// each lane. Lanes are extended periodically; a trailing sample of an
/// odd-length lane is carried through unchanged. [`WaveletFamily::D2`]
/// gives exactly [`haar_inplace`] without energy preservation.
///
/// # Errors
///
/// [`FilterError::NotTwoDimensional`] if `image` is not 2-D.
pub fn daubechies_inplace<F: Float>(
    image: &mut NdArray<F>,
    family: WaveletFamily,
) -> Result<&mut NdArray<F>, FilterError> {
    check_2d(image)?;
    log::debug!("daubechies: shape={:?} family={}", image.shape(), family);

    let bank = FilterBank::<F>::new(family);
    let mut tmp = Vec::new();
    for_each_lane(image, 1, |lane| bank.analyze(lane, &mut tmp))?;
    for_each_lane(image, 0, |lane| bank.analyze(lane, &mut tmp))?;
    Ok(image)
}

/// Forward Daubechies transform into a fresh `f64` array.
///
/// # Example
///
/// ```
/// use ndimg_imgproc::wavelet::{daubechies, WaveletFamily};
/// use ndimg_tensor::NdArray;
///
/// let image = NdArray::<u8>::from_shape_fn(&[8, 8], |idx| (idx[0] * 8 + idx[1]) as u8);
/// let family: WaveletFamily = "D4".parse().unwrap();
/// let wav = daubechies(&image, family).unwrap();
/// assert_eq!(wav.shape(), &[8, 8]);
/// ```
pub fn daubechies<T: Element>(
    image: &NdArray<T>,
    family: WaveletFamily,
) -> Result<NdArray<f64>, FilterError> {
    check_2d(image)?;
    let mut out = image.cast::<f64>();
    daubechies_inplace(&mut out, family)?;
    Ok(out)
}

/// Inverse Daubechies transform, in place. Undoes [`daubechies_inplace`].
pub fn idaubechies_inplace<F: Float>(
    coeffs: &mut NdArray<F>,
    family: WaveletFamily,
) -> Result<&mut NdArray<F>, FilterError> {
    check_2d(coeffs)?;
    log::debug!("idaubechies: shape={:?} family={}", coeffs.shape(), family);

    let bank = FilterBank::<F>::new(family);
    let mut tmp = Vec::new();
    for_each_lane(coeffs, 0, |lane| bank.synthesize(lane, &mut tmp))?;
    for_each_lane(coeffs, 1, |lane| bank.synthesize(lane, &mut tmp))?;
    Ok(coeffs)
}

/// Inverse Daubechies transform into a fresh `f64` array.
pub fn idaubechies<T: Element>(
    coeffs: &NdArray<T>,
    family: WaveletFamily,
) -> Result<NdArray<f64>, FilterError> {
    check_2d(coeffs)?;
    let mut out = coeffs.cast::<f64>();
    idaubechies_inplace(&mut out, family)?;
    Ok(out)
}
