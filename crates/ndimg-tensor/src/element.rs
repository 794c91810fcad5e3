/// A numeric scalar that can be stored in an [`crate::NdArray`] and filtered.
///
/// Filters accumulate in `f64`; `from_f64` converts the accumulator back with
/// C-style semantics: floats round to nearest representable, integers
/// truncate toward zero and saturate at the type bounds.
pub trait Element:
    Copy + Send + Sync + PartialEq + PartialOrd + std::fmt::Debug + num_traits::Zero + 'static
{
    /// Whether the type is a floating point type.
    const IS_FLOAT: bool;

    /// Widen the value to `f64`.
    fn to_f64(self) -> f64;

    /// Narrow an `f64` accumulator to this type.
    fn from_f64(val: f64) -> Self;
}

macro_rules! impl_element {
    ($is_float:expr, $($t:ty),*) => {
        $(
            impl Element for $t {
                const IS_FLOAT: bool = $is_float;

                #[inline(always)]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline(always)]
                fn from_f64(val: f64) -> Self {
                    val as $t
                }
            }
        )*
    };
}

impl_element!(false, u8, u16, u32, i16, i32, i64);
impl_element!(true, f32, f64);

/// Floating point elements; wavelet transforms operate in place on these.
pub trait Float: Element + num_traits::Float {}

impl Float for f32 {}
impl Float for f64 {}

/// Element type promotion between a source array and a kernel.
///
/// Integer sources filtered with same-typed integer kernels stay integer;
/// a floating point operand promotes the result to floating point.
pub trait Promote<K: Element>: Element {
    /// The promoted element type.
    type Output: Element;
}

macro_rules! impl_promote_same {
    ($($t:ty),*) => {
        $(
            impl Promote<$t> for $t {
                type Output = $t;
            }
        )*
    };
}

macro_rules! impl_promote_float {
    ($f:ty => $($t:ty),*) => {
        $(
            impl Promote<$f> for $t {
                type Output = $f;
            }
            impl Promote<$t> for $f {
                type Output = $f;
            }
        )*
    };
}

impl_promote_same!(u8, u16, u32, i16, i32, i64, f32, f64);
impl_promote_float!(f32 => u8, u16, u32, i16, i32, i64);
impl_promote_float!(f64 => u8, u16, u32, i16, i32, i64);

impl Promote<f64> for f32 {
    type Output = f64;
}

impl Promote<f32> for f64 {
    type Output = f64;
}
