use thiserror::Error;

use crate::element::Element;

/// An error type for array construction and access.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// The array shape does not match the provided data.
    ///
    /// The product of the shape extents must equal the number of elements.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// Index exceeds the array bounds.
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index that was attempted
        index: usize,
        /// The size of the dimension being indexed
        size: usize,
    },

    /// Array ranks or extents incompatible for the requested operation.
    #[error("Dimension mismatch: {message}. Expected shape: {expected}, got: {actual}")]
    DimensionMismatch {
        /// Human-readable description of the mismatch
        message: String,
        /// Expected shape description
        expected: String,
        /// Actual shape description
        actual: String,
    },
}

impl TensorError {
    /// Creates an InvalidShape error.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }

    /// Creates an IndexOutOfBounds error.
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Creates a DimensionMismatch error with formatted shapes.
    pub fn dimension_mismatch(
        message: impl Into<String>,
        expected: &[usize],
        actual: &[usize],
    ) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        }
    }
}

/// Computes the strides for a row-major (C-contiguous) layout.
///
/// The rightmost dimension has stride 1, and each dimension's stride is the
/// product of all dimensions to its right.
///
/// # Examples
///
/// ```rust
/// use ndimg_tensor::tensor::get_strides_from_shape;
///
/// assert_eq!(get_strides_from_shape(&[2, 3]), vec![3, 1]);
/// assert_eq!(get_strides_from_shape(&[2, 3, 4]), vec![12, 4, 1]);
/// ```
pub fn get_strides_from_shape(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// Converts a flat row-major offset back into a multi-index, given the strides.
///
/// ```rust
/// use ndimg_tensor::tensor::unravel_index;
///
/// assert_eq!(unravel_index(7, &[12, 4, 1]), vec![0, 1, 3]);
/// ```
pub fn unravel_index(offset: usize, strides: &[usize]) -> Vec<usize> {
    let mut rem = offset;
    strides
        .iter()
        .map(|&s| {
            let i = rem / s;
            rem %= s;
            i
        })
        .collect()
}

/// A dense, row-major N-dimensional array with owned data.
///
/// The rank is dynamic: filters in this workspace accept arrays of any
/// dimensionality and validate ranks at call time.
///
/// # Invariants
///
/// * `data.len() == shape.iter().product()`
/// * `strides == get_strides_from_shape(shape)`
///
/// # Examples
///
/// ```rust
/// use ndimg_tensor::NdArray;
///
/// let a = NdArray::<u8>::from_shape_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(a.shape(), &[2, 2]);
/// assert_eq!(a.get(&[1, 0]), Some(&3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray<T> {
    pub(crate) data: Vec<T>,
    pub(crate) shape: Vec<usize>,
    pub(crate) strides: Vec<usize>,
}

impl<T> NdArray<T> {
    /// Creates a new array with the given shape and data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape, an error is returned.
    pub fn from_shape_vec(shape: &[usize], data: Vec<T>) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a new array with the given shape and a slice of data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape, an error is returned.
    pub fn from_shape_slice(shape: &[usize], data: &[T]) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        Self::from_shape_vec(shape, data.to_vec())
    }

    /// Creates a new array with the given shape filled with `value`.
    ///
    /// ```
    /// use ndimg_tensor::NdArray;
    ///
    /// let t = NdArray::<u8>::from_shape_val(&[2, 1, 3], 2);
    /// assert_eq!(t.as_slice(), &[2, 2, 2, 2, 2, 2]);
    /// ```
    pub fn from_shape_val(shape: &[usize], value: T) -> Self
    where
        T: Clone,
    {
        let numel = shape.iter().product::<usize>();
        Self {
            data: vec![value; numel],
            shape: shape.to_vec(),
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new array with the given shape and a function to generate the data.
    ///
    /// The function `f` is called with the index of the element to generate.
    ///
    /// ```
    /// use ndimg_tensor::NdArray;
    ///
    /// let t = NdArray::<u8>::from_shape_fn(&[2, 2], |idx| (idx[0] * 2 + idx[1]) as u8);
    /// assert_eq!(t.as_slice(), &[0, 1, 2, 3]);
    /// ```
    pub fn from_shape_fn<F>(shape: &[usize], f: F) -> Self
    where
        F: Fn(&[usize]) -> T,
    {
        let numel = shape.iter().product::<usize>();
        let mut index = vec![0; shape.len()];
        let data = (0..numel)
            .map(|i| {
                let mut j = i;
                for k in (0..shape.len()).rev() {
                    index[k] = j % shape[k];
                    j /= shape[k];
                }
                f(&index)
            })
            .collect();
        Self {
            data,
            shape: shape.to_vec(),
            strides: get_strides_from_shape(shape),
        }
    }

    /// Creates a zero-filled array.
    pub fn zeros(shape: &[usize]) -> Self
    where
        T: Element,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// The extent of every axis.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Row-major strides, in elements.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// The number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Returns the number of elements in the array.
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Get the data of the array as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the data of the array as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the array and returns the underlying vector.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns an iterator over the elements in row-major order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Returns a mutable iterator over the elements in row-major order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Get the offset of the element at the given index.
    ///
    /// Returns `None` if the rank differs or any coordinate is out of bounds.
    pub fn offset_of(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0;
        for ((&idx, &dim_size), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Get the index of the element at the given offset. The reverse of [`Self::offset_of`].
    ///
    /// # Errors
    ///
    /// If the offset is out of bounds (>= numel), an error is returned.
    pub fn index_of(&self, offset: usize) -> Result<Vec<usize>, TensorError> {
        let numel = self.numel();
        if offset >= numel {
            return Err(TensorError::index_out_of_bounds(offset, numel));
        }
        Ok(unravel_index(offset, &self.strides))
    }

    /// Get the element at the given index, or `None` when out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.offset_of(index).and_then(|i| self.data.get(i))
    }

    /// Get a mutable reference to the element at the given index.
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        self.offset_of(index).and_then(|i| self.data.get_mut(i))
    }

    /// Reshape the array to a new shape with the same number of elements.
    ///
    /// # Errors
    ///
    /// If the number of elements in the new shape differs, an error is returned.
    pub fn reshape(self, shape: &[usize]) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != self.numel() {
            return Err(TensorError::DimensionMismatch {
                message: "Reshape operation requires same number of elements".to_string(),
                expected: format!("{:?} ({} elements)", shape, numel),
                actual: format!("{:?} ({} elements)", self.shape, self.numel()),
            });
        }
        Ok(Self {
            data: self.data,
            shape: shape.to_vec(),
            strides: get_strides_from_shape(shape),
        })
    }

    /// Apply a function to every element, producing a new array of the same shape.
    pub fn map<U, F>(&self, f: F) -> NdArray<U>
    where
        F: Fn(&T) -> U,
    {
        NdArray {
            data: self.data.iter().map(f).collect(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }

    /// Start offsets of every 1-D lane running along `axis`.
    ///
    /// A lane is the sequence of elements `start + k * strides[axis]` for
    /// `k` in `0..shape[axis]`. Lanes are returned in row-major order of
    /// their remaining coordinates.
    ///
    /// # Errors
    ///
    /// If `axis >= ndim`, an error is returned.
    ///
    /// ```
    /// use ndimg_tensor::NdArray;
    ///
    /// let a = NdArray::<u8>::zeros(&[2, 3]);
    /// assert_eq!(a.lane_offsets(0).unwrap(), vec![0, 1, 2]);
    /// assert_eq!(a.lane_offsets(1).unwrap(), vec![0, 3]);
    /// ```
    pub fn lane_offsets(&self, axis: usize) -> Result<Vec<usize>, TensorError> {
        if axis >= self.ndim() {
            return Err(TensorError::index_out_of_bounds(axis, self.ndim()));
        }
        let len = self.shape[axis];
        if len == 0 {
            return Ok(Vec::new());
        }
        let outer = self.strides[axis] * len;
        let inner = self.strides[axis];
        Ok((0..self.numel() / len)
            .map(|lane| (lane / inner) * outer + lane % inner)
            .collect())
    }
}

impl<T: Element> NdArray<T> {
    /// Convert every element to another element type through `f64`.
    ///
    /// Float to integer conversion truncates toward zero and saturates.
    pub fn cast<U: Element>(&self) -> NdArray<U> {
        self.map(|&x| U::from_f64(x.to_f64()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_rejects_mismatched_len() {
        let res = NdArray::<u8>::from_shape_vec(&[2, 3], vec![0; 5]);
        assert_eq!(res, Err(TensorError::invalid_shape(6, 5)));
    }

    #[test]
    fn from_shape_fn_row_major() {
        let t = NdArray::<usize>::from_shape_fn(&[2, 3, 2], |idx| {
            idx[0] * 100 + idx[1] * 10 + idx[2]
        });
        assert_eq!(t.strides(), &[6, 2, 1]);
        assert_eq!(t.get(&[1, 2, 1]), Some(&121));
        assert_eq!(t.get(&[0, 1, 0]), Some(&10));
        assert_eq!(t.get(&[2, 0, 0]), None);
        assert_eq!(t.get(&[0, 0]), None);
    }

    #[test]
    fn offset_index_inverse() -> Result<(), TensorError> {
        let t = NdArray::<f32>::zeros(&[3, 4, 5]);
        for offset in [0, 7, 21, 59] {
            let idx = t.index_of(offset)?;
            assert_eq!(t.offset_of(&idx), Some(offset));
        }
        assert!(t.index_of(60).is_err());
        Ok(())
    }

    #[test]
    fn reshape_keeps_data() -> Result<(), TensorError> {
        let t = NdArray::from_shape_vec(&[4], vec![1u8, 2, 3, 4])?;
        let t2 = t.reshape(&[2, 2])?;
        assert_eq!(t2.shape(), &[2, 2]);
        assert_eq!(t2.strides(), &[2, 1]);
        assert_eq!(t2.as_slice(), &[1, 2, 3, 4]);
        assert!(t2.reshape(&[3]).is_err());
        Ok(())
    }

    #[test]
    fn lane_offsets_3d() -> Result<(), TensorError> {
        let t = NdArray::<u8>::zeros(&[2, 3, 4]);
        assert_eq!(t.lane_offsets(1)?, vec![0, 1, 2, 3, 12, 13, 14, 15]);
        assert_eq!(t.lane_offsets(2)?.len(), 6);
        assert_eq!(t.lane_offsets(0)?.len(), 12);
        assert!(t.lane_offsets(3).is_err());
        Ok(())
    }

    #[test]
    fn cast_truncates_toward_zero() -> Result<(), TensorError> {
        let t = NdArray::from_shape_vec(&[4], vec![-1.7f64, 0.9, 254.6, 300.0])?;
        let c = t.cast::<u8>();
        assert_eq!(c.as_slice(), &[0, 0, 254, 255]);
        let i = t.cast::<i32>();
        assert_eq!(i.as_slice(), &[-1, 0, 254, 300]);
        Ok(())
    }
}
