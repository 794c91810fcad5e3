use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// Policy for resolving indices that fall outside an axis during filtering.
///
/// The names and semantics follow the usual `ndimage` conventions so that
/// results can be compared mode by mode against that reference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundaryMode {
    /// Half-sample symmetric extension: the edge sample is repeated.
    ///
    /// Example: ...d c b a | a b c d | d c b a...
    #[default]
    Reflect,

    /// Out-of-range samples take a constant fill value.
    ///
    /// Example: ...k k k k | a b c d | k k k k...
    Constant(f64),

    /// The outermost sample is repeated.
    ///
    /// Example: ...a a a a | a b c d | d d d d...
    Nearest,

    /// Whole-sample symmetric extension: the edge sample is not repeated.
    ///
    /// Example: ...d c b | a b c d | c b a...
    Mirror,

    /// Periodic extension.
    ///
    /// Example: ...a b c d | a b c d | a b c d...
    Wrap,

    /// Out-of-range samples are skipped entirely.
    Ignore,
}

impl BoundaryMode {
    /// Every recognized mode name, in the order they are listed to users.
    pub const NAMES: [&'static str; 6] = ["reflect", "constant", "nearest", "mirror", "wrap", "ignore"];

    /// All modes, with a zero fill value for [`BoundaryMode::Constant`].
    pub const ALL: [BoundaryMode; 6] = [
        BoundaryMode::Reflect,
        BoundaryMode::Constant(0.0),
        BoundaryMode::Nearest,
        BoundaryMode::Mirror,
        BoundaryMode::Wrap,
        BoundaryMode::Ignore,
    ];

    /// The public name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryMode::Reflect => "reflect",
            BoundaryMode::Constant(_) => "constant",
            BoundaryMode::Nearest => "nearest",
            BoundaryMode::Mirror => "mirror",
            BoundaryMode::Wrap => "wrap",
            BoundaryMode::Ignore => "ignore",
        }
    }

    /// The value used for out-of-range samples; zero unless the mode is
    /// [`BoundaryMode::Constant`].
    pub fn fill_value(&self) -> f64 {
        match self {
            BoundaryMode::Constant(c) => *c,
            _ => 0.0,
        }
    }

    /// Maps index `i` to a valid index within `[0, len)` according to the mode.
    ///
    /// Returns `None` when the sample has no source: out of range under
    /// [`BoundaryMode::Constant`] or [`BoundaryMode::Ignore`], or an empty axis.
    /// Indices arbitrarily far outside the axis are folded repeatedly.
    ///
    /// ```
    /// use ndimg_imgproc::padding::BoundaryMode;
    ///
    /// assert_eq!(BoundaryMode::Reflect.resolve(-1, 4), Some(0));
    /// assert_eq!(BoundaryMode::Mirror.resolve(-1, 4), Some(1));
    /// assert_eq!(BoundaryMode::Nearest.resolve(9, 4), Some(3));
    /// assert_eq!(BoundaryMode::Wrap.resolve(-1, 4), Some(3));
    /// assert_eq!(BoundaryMode::Constant(0.0).resolve(4, 4), None);
    /// ```
    #[inline]
    pub fn resolve(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let n = len as isize;
        if (0..n).contains(&i) {
            return Some(i as usize);
        }
        match self {
            BoundaryMode::Reflect => {
                let m = i.rem_euclid(2 * n);
                let j = if m < n { m } else { 2 * n - 1 - m };
                Some(j as usize)
            }
            BoundaryMode::Mirror => {
                if n == 1 {
                    return Some(0);
                }
                let period = 2 * n - 2;
                let m = i.rem_euclid(period);
                let j = if m < n { m } else { period - m };
                Some(j as usize)
            }
            BoundaryMode::Nearest => Some(i.clamp(0, n - 1) as usize),
            BoundaryMode::Wrap => Some(i.rem_euclid(n) as usize),
            BoundaryMode::Constant(_) | BoundaryMode::Ignore => None,
        }
    }

    /// Resolves the multi-index `index + deltas` to a flat row-major offset.
    ///
    /// Returns `None` as soon as one axis has no source sample.
    #[inline]
    pub fn resolve_offset(
        &self,
        index: &[usize],
        deltas: &[isize],
        shape: &[usize],
        strides: &[usize],
    ) -> Option<usize> {
        let mut offset = 0;
        for a in 0..index.len() {
            let i = self.resolve(index[a] as isize + deltas[a], shape[a])?;
            offset += i * strides[a];
        }
        Some(offset)
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryMode {
    type Err = FilterError;

    /// Parses a mode name; `constant` gets a zero fill value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reflect" => Ok(BoundaryMode::Reflect),
            "constant" => Ok(BoundaryMode::Constant(0.0)),
            "nearest" => Ok(BoundaryMode::Nearest),
            "mirror" => Ok(BoundaryMode::Mirror),
            "wrap" => Ok(BoundaryMode::Wrap),
            "ignore" => Ok(BoundaryMode::Ignore),
            other => Err(FilterError::InvalidMode(other.to_string())),
        }
    }
}
