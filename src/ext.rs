//! Free-standing combinators over distinct values.

use num_traits::Zero;

use crate::descriptor::Described;
use crate::wrapper::Distinct;

#[cfg(feature = "dynamic")]
use crate::{erased::AnyDistinct, error::DistinctError};

/// Folds the single value of a distinct type into an accumulator.
///
/// # Examples
///
/// ```rust
/// use nominal::{Distinct, fold};
///
/// #[derive(Debug, Clone, Copy, Distinct)]
/// struct Meters(f64);
///
/// assert_eq!(fold(Meters(2.0), 1.0, |total, value| total + value), 3.0);
/// ```
pub fn fold<S, B, F>(value: S, init: B, function: F) -> B
where
    S: Distinct,
    F: FnOnce(B, S::Value) -> B,
{
    value.fold(init, function)
}

/// Sums values of one distinct type through the value type's descriptor.
///
/// An empty input sums to the value type's zero.
///
/// # Panics
///
/// Panics if `S` declares zero or more than one constructor, or if the
/// descriptor panics on overflow.
///
/// # Examples
///
/// ```rust
/// use nominal::{Distinct, sum};
///
/// #[derive(Debug, Clone, Copy, Distinct)]
/// struct Hours(f64);
///
/// assert_eq!(sum([Hours(1.5), Hours(2.0), Hours(0.5)]), Hours(4.0));
/// assert_eq!(sum(Vec::<Hours>::new()), Hours(0.0));
/// ```
pub fn sum<S, I>(values: I) -> S
where
    S: Distinct,
    S::Value: Described + Zero,
    I: IntoIterator<Item = S>,
{
    values
        .into_iter()
        .fold(S::rebuild(S::Value::zero()), |total, value| total.append(value))
}

/// Sums erased values, which must all share one subtype.
///
/// Returns `Ok(None)` for an empty input, since there is no subtype to build
/// a zero for.
///
/// # Errors
///
/// Returns [`DistinctError::MismatchedType`] at the first value whose subtype
/// differs from the first value's.
///
/// # Examples
///
/// ```rust
/// use nominal::{Distinct, sum_any};
///
/// #[derive(Debug, Clone, Copy, Distinct)]
/// struct Meters(f64);
///
/// #[derive(Debug, Clone, Copy, Distinct)]
/// struct Hours(f64);
///
/// let total = sum_any([Meters(1.0).erase(), Meters(2.0).erase()]).unwrap();
/// assert_eq!(total.map(|total| *total.value()), Some(3.0));
///
/// assert!(sum_any([Meters(1.0).erase(), Hours(2.0).erase()]).is_err());
/// ```
#[cfg(feature = "dynamic")]
pub fn sum_any<T, I>(values: I) -> Result<Option<AnyDistinct<T>>, DistinctError>
where
    T: Described + Send + Sync + 'static,
    I: IntoIterator<Item = AnyDistinct<T>>,
{
    values
        .into_iter()
        .try_fold(None, |accumulator: Option<AnyDistinct<T>>, value| match accumulator {
            None => Ok(Some(value)),
            Some(total) => total.try_append(value).map(Some),
        })
}
