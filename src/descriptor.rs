//! Type descriptors - pluggable arithmetic strategies for underlying values.
//!
//! A distinct type never decides how its underlying value is added, subtracted,
//! multiplied or divided. It asks the [`TypeDescriptor`] registered for the
//! value type through [`Described`] and wraps whatever comes back.
//!
//! The primitive numeric types are described by [`NumericDescriptor`], which
//! defers to the `std::ops` operators. Any other value type supplies its own
//! descriptor.
//!
//! # Examples
//!
//! ```rust
//! use nominal::{Described, TypeDescriptor};
//!
//! let descriptor = f64::descriptor();
//! assert_eq!(descriptor.append(3.0, 4.0), 7.0);
//! assert_eq!(descriptor.divide(9.0, 3.0), 3.0);
//! ```

use std::ops::{Add, Div, Mul, Sub};

/// A strategy supplying the four binary operations over a value type `T`.
///
/// Implementations are expected to be stateless; the crate obtains a fresh
/// descriptor through [`Described::descriptor`] whenever it needs one.
///
/// # Examples
///
/// ```rust
/// use nominal::TypeDescriptor;
///
/// struct Concatenate;
///
/// impl TypeDescriptor<String> for Concatenate {
///     fn append(&self, left: String, right: String) -> String {
///         left + &right
///     }
///     fn subtract(&self, left: String, right: String) -> String {
///         left.strip_suffix(right.as_str()).map_or(left.clone(), str::to_owned)
///     }
///     fn multiply(&self, left: String, right: String) -> String {
///         left.repeat(right.len())
///     }
///     fn divide(&self, left: String, _right: String) -> String {
///         left
///     }
/// }
///
/// assert_eq!(Concatenate.append("ab".into(), "cd".into()), "abcd");
/// ```
pub trait TypeDescriptor<T> {
    /// Combines two values additively.
    fn append(&self, left: T, right: T) -> T;

    /// Subtracts `right` from `left`.
    fn subtract(&self, left: T, right: T) -> T;

    /// Multiplies two values.
    fn multiply(&self, left: T, right: T) -> T;

    /// Divides `left` by `right`.
    fn divide(&self, left: T, right: T) -> T;
}

impl<T, D: TypeDescriptor<T> + ?Sized> TypeDescriptor<T> for &D {
    fn append(&self, left: T, right: T) -> T {
        (**self).append(left, right)
    }

    fn subtract(&self, left: T, right: T) -> T {
        (**self).subtract(left, right)
    }

    fn multiply(&self, left: T, right: T) -> T {
        (**self).multiply(left, right)
    }

    fn divide(&self, left: T, right: T) -> T {
        (**self).divide(left, right)
    }
}

/// Associates a value type with its default [`TypeDescriptor`].
///
/// This is the hook through which a distinct type finds the arithmetic for
/// its underlying value. A value type without a `Described` implementation
/// can still be wrapped; it just gets no arithmetic.
pub trait Described: Sized {
    /// The default descriptor for this value type.
    type Descriptor: TypeDescriptor<Self>;

    /// Returns the default descriptor for this value type.
    fn descriptor() -> Self::Descriptor;
}

/// The default descriptor for primitive numbers, delegating to `std::ops`.
///
/// Overflow and division by zero behave exactly as the corresponding
/// operator does for the primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NumericDescriptor;

impl<T> TypeDescriptor<T> for NumericDescriptor
where
    T: Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Div<Output = T>,
{
    #[inline]
    fn append(&self, left: T, right: T) -> T {
        left + right
    }

    #[inline]
    fn subtract(&self, left: T, right: T) -> T {
        left - right
    }

    #[inline]
    fn multiply(&self, left: T, right: T) -> T {
        left * right
    }

    #[inline]
    fn divide(&self, left: T, right: T) -> T {
        left / right
    }
}

macro_rules! impl_described_numeric {
    ($($numeric:ty),* $(,)?) => {
        $(
            impl Described for $numeric {
                type Descriptor = NumericDescriptor;

                #[inline]
                fn descriptor() -> Self::Descriptor {
                    NumericDescriptor
                }
            }
        )*
    };
}

impl_described_numeric!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);
