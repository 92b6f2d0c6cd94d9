//! Conversion of samples and table items into `f64`.
//!
//! Weighted statistics (mean, median) and the bucketing engine only need to
//! place a value on the real line. [`Numeric`] is that single capability; it
//! is implemented for the primitive numbers and for
//! [`ClassInterval`](crate::interval::ClassInterval), whose position is its
//! midpoint.

/// A value that can be placed on the real line.
///
/// # Examples
///
/// ```
/// use freqdist_stats::numeric::Numeric;
///
/// assert_eq!(3_u8.to_f64(), 3.0);
/// assert_eq!((-2_i64).to_f64(), -2.0);
/// assert!(f64::NAN.to_f64().is_nan());
/// ```
pub trait Numeric {
    /// Returns the value as an `f64`.
    fn to_f64(&self) -> f64;
}

macro_rules! impl_numeric_lossless {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                fn to_f64(&self) -> f64 {
                    f64::from(*self)
                }
            }
        )*
    };
}

macro_rules! impl_numeric_lossy {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                #[expect(clippy::cast_precision_loss)]
                fn to_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_numeric_lossless!(i8, i16, i32, u8, u16, u32, f32, f64);
impl_numeric_lossy!(i64, i128, isize, u64, u128, usize);

impl<T> Numeric for &T
where
    T: Numeric + ?Sized,
{
    fn to_f64(&self) -> f64 {
        (**self).to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(0_i32.to_f64(), 0.0);
        assert_eq!(u32::MAX.to_f64(), 4_294_967_295.0);
        assert_eq!((-17_isize).to_f64(), -17.0);
    }

    #[test]
    fn test_floats_pass_through() {
        assert_eq!(1.5_f32.to_f64(), 1.5);
        assert!(f64::INFINITY.to_f64().is_infinite());
    }

    #[test]
    fn test_reference() {
        let value = 42_u16;
        assert_eq!((&value).to_f64(), 42.0);
    }
}
