use ndimg_tensor::{
    tensor::{get_strides_from_shape, unravel_index},
    Element, NdArray,
};

use crate::{
    error::FilterError,
    padding::BoundaryMode,
    parallel::{for_each_row, ExecutionStrategy},
};

/// The neighbourhood used to decide which pixels touch each other.
///
/// Only the offsets of the set elements are kept; the centre is never a
/// neighbour of itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    ndim: usize,
    offsets: Vec<Vec<isize>>,
}

impl StructuringElement {
    /// The face-connected neighbourhood: one step along a single axis
    /// (4-connectivity in 2-D, 6-connectivity in 3-D).
    pub fn cross(ndim: usize) -> Self {
        let mut offsets = Vec::with_capacity(2 * ndim);
        for axis in 0..ndim {
            for step in [-1, 1] {
                let mut delta = vec![0; ndim];
                delta[axis] = step;
                offsets.push(delta);
            }
        }
        Self { ndim, offsets }
    }

    /// The fully connected neighbourhood (8-connectivity in 2-D).
    pub fn full(ndim: usize) -> Self {
        let window = vec![3; ndim];
        let strides = get_strides_from_shape(&window);
        let offsets = (0..window.iter().product::<usize>())
            .map(|k| unravel_index(k, &strides))
            .map(|idx| idx.iter().map(|&i| i as isize - 1).collect::<Vec<_>>())
            .filter(|delta| delta.iter().any(|&d| d != 0))
            .collect();
        Self { ndim, offsets }
    }

    /// Build a structuring element from a boolean mask centred at `extent / 2`.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidStructure`] if the mask has rank 0 or an even
    /// extent along some axis.
    pub fn from_array(mask: &NdArray<bool>) -> Result<Self, FilterError> {
        if mask.ndim() == 0 {
            return Err(FilterError::InvalidStructure(
                "structuring element must have at least one axis".to_string(),
            ));
        }
        if let Some(&n) = mask.shape().iter().find(|&&n| n % 2 == 0) {
            return Err(FilterError::InvalidStructure(format!(
                "every extent must be odd, got {} in shape {:?}",
                n,
                mask.shape()
            )));
        }

        let centre = mask.shape().iter().map(|&n| (n / 2) as isize).collect::<Vec<_>>();
        let offsets = mask
            .iter()
            .enumerate()
            .filter(|(_, &set)| set)
            .map(|(k, _)| {
                unravel_index(k, mask.strides())
                    .iter()
                    .zip(&centre)
                    .map(|(&i, &c)| i as isize - c)
                    .collect::<Vec<_>>()
            })
            .filter(|delta| delta.iter().any(|&d| d != 0))
            .collect();

        Ok(Self {
            ndim: mask.ndim(),
            offsets,
        })
    }

    /// The number of axes.
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Offsets of the neighbours relative to the centre.
    pub fn offsets(&self) -> &[Vec<isize>] {
        &self.offsets
    }
}

fn check_rank<L>(labels: &NdArray<L>, structure: &StructuringElement) -> Result<(), FilterError> {
    if structure.ndim() != labels.ndim() {
        return Err(FilterError::InvalidStructure(format!(
            "structuring element has rank {}, labels have rank {}",
            structure.ndim(),
            labels.ndim()
        )));
    }
    Ok(())
}

/// Mark every pixel for which `touches(pixel_label, neighbour_label)` holds
/// for at least one neighbour.
fn scan_neighbours<L, P>(
    labels: &NdArray<L>,
    structure: &StructuringElement,
    mode: BoundaryMode,
    touches: P,
) -> Result<NdArray<bool>, FilterError>
where
    L: Element + Eq,
    P: Fn(L, L) -> bool + Send + Sync,
{
    check_rank(labels, structure)?;

    let shape = labels.shape();
    let strides = labels.strides();
    let data = labels.as_slice();
    let ndim = shape.len();
    let fill = L::from_f64(mode.fill_value());
    let row_len = shape.last().copied().unwrap_or(1);

    let mut marked = NdArray::from_shape_val(shape, false);
    for_each_row(
        marked.as_slice_mut(),
        row_len,
        ExecutionStrategy::Auto,
        |start, row| {
            let mut index = unravel_index(start, strides);
            for (c, out) in row.iter_mut().enumerate() {
                if ndim > 0 {
                    index[ndim - 1] = c;
                }
                let v = data[start + c];
                *out = structure.offsets().iter().any(|delta| {
                    match mode.resolve_offset(&index, delta, shape, strides) {
                        Some(o) => touches(v, data[o]),
                        None if mode == BoundaryMode::Ignore => false,
                        None => touches(v, fill),
                    }
                });
            }
        },
    )?;

    Ok(marked)
}

/// Compute the border between regions `l1` and `l2`.
///
/// A pixel is on the border when it is labeled `l1` and one of its
/// face-connected neighbours is labeled `l2`, or the other way round.
/// Neighbours outside the array read as label 0.
///
/// # Arguments
///
/// * `labels` - The label map.
/// * `l1`, `l2` - The two region labels.
/// * `always_return` - Return an all-false map instead of `None` when the
///   regions do not touch.
///
/// # Example
///
/// ```
/// use ndimg_imgproc::labeled::border;
/// use ndimg_tensor::NdArray;
///
/// let labels = NdArray::<u8>::from_shape_vec(&[1, 4], vec![1, 1, 2, 2]).unwrap();
/// let b = border(&labels, 1, 2, false).unwrap().unwrap();
/// assert_eq!(b.as_slice(), &[false, true, true, false]);
/// assert!(border(&labels, 1, 3, false).unwrap().is_none());
/// ```
pub fn border<L>(
    labels: &NdArray<L>,
    l1: L,
    l2: L,
    always_return: bool,
) -> Result<Option<NdArray<bool>>, FilterError>
where
    L: Element + Eq,
{
    border_with(
        labels,
        l1,
        l2,
        &StructuringElement::cross(labels.ndim()),
        BoundaryMode::Constant(0.0),
        always_return,
    )
}

/// Same as [`border`], with an explicit neighbourhood and boundary mode for
/// neighbours outside the array.
///
/// # Errors
///
/// [`FilterError::InvalidStructure`] if `structure` and `labels` differ in rank.
pub fn border_with<L>(
    labels: &NdArray<L>,
    l1: L,
    l2: L,
    structure: &StructuringElement,
    mode: BoundaryMode,
    always_return: bool,
) -> Result<Option<NdArray<bool>>, FilterError>
where
    L: Element + Eq,
{
    let marked = if l1 == l2 {
        check_rank(labels, structure)?;
        NdArray::from_shape_val(labels.shape(), false)
    } else {
        scan_neighbours(labels, structure, mode, |v, n| {
            (v == l1 && n == l2) || (v == l2 && n == l1)
        })?
    };

    let count = marked.iter().filter(|&&m| m).count();
    log::debug!("border: labels={:?}/{:?} marked={}", l1, l2, count);

    if count == 0 && !always_return {
        return Ok(None);
    }
    Ok(Some(marked))
}

/// Compute the borders between all regions.
///
/// A pixel is marked when any face-connected neighbour carries a different
/// label, with neighbours outside the array reading as label 0. The image
/// frame therefore acts as a region of label 0: when 0 is among the labels
/// the result is the union of [`border`] over every pair of distinct labels,
/// otherwise the pixels along the frame are marked as well. Use
/// [`borders_with`] and [`BoundaryMode::Ignore`] to leave the frame out.
pub fn borders<L>(labels: &NdArray<L>) -> Result<NdArray<bool>, FilterError>
where
    L: Element + Eq,
{
    borders_with(
        labels,
        &StructuringElement::cross(labels.ndim()),
        BoundaryMode::Constant(0.0),
    )
}

/// Same as [`borders`], with an explicit neighbourhood and boundary mode.
pub fn borders_with<L>(
    labels: &NdArray<L>,
    structure: &StructuringElement,
    mode: BoundaryMode,
) -> Result<NdArray<bool>, FilterError>
where
    L: Element + Eq,
{
    log::debug!(
        "borders: shape={:?} neighbours={} mode={}",
        labels.shape(),
        structure.offsets().len(),
        mode
    );
    scan_neighbours(labels, structure, mode, |v, n| v != n)
}

/// The distinct labels in `labels`, in increasing order.
pub fn labels_present<L>(labels: &NdArray<L>) -> Vec<L>
where
    L: Element + Eq,
{
    let mut present = labels.as_slice().to_vec();
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    present.dedup();
    present
}
