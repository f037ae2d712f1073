//! Type-erased distinct values.
//!
//! [`AnyDistinct<T>`] is the common base abstraction over every distinct type
//! whose underlying value is `T`. It keeps the concrete subtype as a runtime
//! [`Subtype`] and checks it on every operation that combines two values:
//!
//! - equality is total: values of different subtypes are simply unequal
//! - ordering and arithmetic are partial: mixing subtypes is an error
//!
//! Operations that produce a new value cannot call the concrete constructor
//! directly, so they rebuild through the [`ConstructorRegistry`].
//!
//! # Examples
//!
//! ```rust
//! use nominal::{AnyDistinct, Distinct};
//!
//! #[derive(Debug, Clone, Copy, Distinct)]
//! struct Meters(f64);
//!
//! #[derive(Debug, Clone, Copy, Distinct)]
//! struct Hours(f64);
//!
//! let meters: AnyDistinct<f64> = Meters(3.0).erase();
//! let hours: AnyDistinct<f64> = Hours(3.0).erase();
//!
//! assert!(meters != hours);
//! assert!(meters.try_cmp_partial(&hours).is_err());
//!
//! let total = meters.try_append(Meters(4.0).erase()).unwrap();
//! assert_eq!(total.downcast::<Meters>().unwrap(), Meters(7.0));
//! ```

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use crate::descriptor::Described;
use crate::dispatch::Operation;
use crate::error::DistinctError;
use crate::registry::ConstructorRegistry;
use crate::subtype::Subtype;
use crate::wrapper::Distinct;

/// Object-safe view of a concrete [`Distinct`] type with value `T`.
trait ErasedDistinct<T>: Send + Sync {
    fn subtype(&self) -> Subtype;

    fn value(&self) -> &T;

    fn into_value(self: Box<Self>) -> T;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<S: Distinct> ErasedDistinct<S::Value> for S {
    fn subtype(&self) -> Subtype {
        <S as Distinct>::subtype()
    }

    fn value(&self) -> &S::Value {
        Distinct::value(self)
    }

    fn into_value(self: Box<Self>) -> S::Value {
        Distinct::into_value(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A distinct value whose concrete subtype is known only at runtime.
///
/// See the [module documentation](self) for the equality/ordering asymmetry.
/// `AnyDistinct` implements `PartialEq` but not `PartialOrd`:
/// use [`try_cmp_partial`](Self::try_cmp_partial) and friends, which report
/// [`DistinctError::MismatchedType`] instead of a silent answer.
pub struct AnyDistinct<T: 'static> {
    inner: Box<dyn ErasedDistinct<T>>,
}

impl<T: Send + Sync + 'static> AnyDistinct<T> {
    /// Erases a concrete distinct value.
    #[must_use]
    pub fn new<S>(value: S) -> Self
    where
        S: Distinct<Value = T>,
    {
        Self {
            inner: Box::new(value),
        }
    }

    /// Returns the runtime identity of the wrapped subtype.
    #[inline]
    #[must_use]
    pub fn subtype(&self) -> Subtype {
        self.inner.subtype()
    }

    /// Returns a reference to the underlying value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &T {
        self.inner.value()
    }

    /// Consumes the wrapper and returns the underlying value.
    #[must_use]
    pub fn into_value(self) -> T {
        self.inner.into_value()
    }

    /// Returns `true` if the wrapped subtype is `S`.
    #[must_use]
    pub fn is<S: Distinct>(&self) -> bool {
        self.subtype().is::<S>()
    }

    // =========================================================================
    // Downcasting
    // =========================================================================

    /// Recovers the concrete subtype.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the wrapped subtype is not `S`.
    pub fn downcast<S>(self) -> Result<S, DistinctError>
    where
        S: Distinct<Value = T>,
    {
        let found = self.subtype();
        self.inner
            .into_any()
            .downcast::<S>()
            .map(|concrete| *concrete)
            .map_err(|_| DistinctError::mismatched("downcast", &<S as Distinct>::subtype(), &found))
    }

    /// Borrows the concrete subtype.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the wrapped subtype is not `S`.
    pub fn downcast_ref<S>(&self) -> Result<&S, DistinctError>
    where
        S: Distinct<Value = T>,
    {
        self.inner.as_any().downcast_ref::<S>().ok_or_else(|| {
            DistinctError::mismatched("downcast", &<S as Distinct>::subtype(), &self.subtype())
        })
    }

    // =========================================================================
    // Equality and ordering
    // =========================================================================

    /// Compares with a possibly absent value for equality.
    ///
    /// An absent value is never equal; neither is a value of another subtype.
    #[must_use]
    pub fn equals_option(&self, other: Option<&Self>) -> bool
    where
        T: PartialEq,
    {
        other.is_some_and(|other| self == other)
    }

    fn ensure_same(&self, operation: &'static str, other: &Self) -> Result<(), DistinctError> {
        let (expected, found) = (self.subtype(), other.subtype());
        if expected == found {
            Ok(())
        } else {
            Err(DistinctError::mismatched(operation, &expected, &found))
        }
    }

    /// Orders two values of the same subtype by their underlying values.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the subtypes differ.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, DistinctError>
    where
        T: Ord,
    {
        self.ensure_same("compare", other)?;
        Ok(self.value().cmp(other.value()))
    }

    /// Partially orders two values of the same subtype.
    ///
    /// The inner `None` is the value type's own "incomparable" answer, such as
    /// a NaN float.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the subtypes differ.
    pub fn try_cmp_partial(&self, other: &Self) -> Result<Option<Ordering>, DistinctError>
    where
        T: PartialOrd,
    {
        self.ensure_same("compare", other)?;
        Ok(self.value().partial_cmp(other.value()))
    }

    /// Partially orders against a possibly absent value.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::ValueRequired`] if `other` is `None`, or
    /// [`DistinctError::MismatchedType`] if the subtypes differ.
    pub fn compare_option(&self, other: Option<&Self>) -> Result<Option<Ordering>, DistinctError>
    where
        T: PartialOrd,
    {
        let other = other.ok_or(DistinctError::ValueRequired {
            subtype: self.subtype().name(),
        })?;
        self.try_cmp_partial(other)
    }

    /// Returns whether `self < other`.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the subtypes differ.
    pub fn try_lt(&self, other: &Self) -> Result<bool, DistinctError>
    where
        T: PartialOrd,
    {
        Ok(matches!(self.try_cmp_partial(other)?, Some(Ordering::Less)))
    }

    /// Returns whether `self <= other`.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the subtypes differ.
    pub fn try_le(&self, other: &Self) -> Result<bool, DistinctError>
    where
        T: PartialOrd,
    {
        Ok(matches!(
            self.try_cmp_partial(other)?,
            Some(Ordering::Less | Ordering::Equal)
        ))
    }

    /// Returns whether `self > other`.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the subtypes differ.
    pub fn try_gt(&self, other: &Self) -> Result<bool, DistinctError>
    where
        T: PartialOrd,
    {
        Ok(matches!(self.try_cmp_partial(other)?, Some(Ordering::Greater)))
    }

    /// Returns whether `self >= other`.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the subtypes differ.
    pub fn try_ge(&self, other: &Self) -> Result<bool, DistinctError>
    where
        T: PartialOrd,
    {
        Ok(matches!(
            self.try_cmp_partial(other)?,
            Some(Ordering::Greater | Ordering::Equal)
        ))
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Applies `operation` to two values of the same subtype, rebuilding the
    /// result through `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the subtypes differ, or any
    /// error the registry raises while resolving the subtype's constructor.
    ///
    /// # Panics
    ///
    /// Panics raised by the descriptor, such as integer division by zero or
    /// overflow, and by the subtype's constructor propagate unchanged.
    pub fn try_combine_in(
        self,
        registry: &ConstructorRegistry,
        operation: Operation,
        other: Self,
    ) -> Result<Self, DistinctError>
    where
        T: Described,
    {
        self.ensure_same(operation.name(), &other)?;
        let subtype = self.subtype();
        let raw = operation.apply(self.into_value(), other.into_value());
        registry.build(subtype, raw)
    }

    /// Adds two values of the same subtype.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the subtypes differ.
    pub fn try_append(self, other: Self) -> Result<Self, DistinctError>
    where
        T: Described,
    {
        self.try_combine_in(ConstructorRegistry::global(), Operation::Append, other)
    }

    /// Subtracts a value of the same subtype.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the subtypes differ.
    pub fn try_subtract(self, other: Self) -> Result<Self, DistinctError>
    where
        T: Described,
    {
        self.try_combine_in(ConstructorRegistry::global(), Operation::Subtract, other)
    }

    /// Multiplies two values of the same subtype.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the subtypes differ.
    pub fn try_multiply(self, other: Self) -> Result<Self, DistinctError>
    where
        T: Described,
    {
        self.try_combine_in(ConstructorRegistry::global(), Operation::Multiply, other)
    }

    /// Divides by a value of the same subtype.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if the subtypes differ.
    ///
    /// # Panics
    ///
    /// Panics wherever the descriptor panics. [`NumericDescriptor`] divides
    /// integers with `/`, so an integer divisor of zero panics rather than
    /// returning an error.
    ///
    /// [`NumericDescriptor`]: crate::NumericDescriptor
    pub fn try_divide(self, other: Self) -> Result<Self, DistinctError>
    where
        T: Described,
    {
        self.try_combine_in(ConstructorRegistry::global(), Operation::Divide, other)
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Applies a value-preserving function, rebuilding the same subtype
    /// through `registry`.
    ///
    /// # Errors
    ///
    /// Returns any error the registry raises while resolving the subtype's
    /// constructor.
    pub fn map_in<F>(self, registry: &ConstructorRegistry, function: F) -> Result<Self, DistinctError>
    where
        F: FnOnce(T) -> T,
    {
        let subtype = self.subtype();
        registry.build(subtype, function(self.into_value()))
    }

    /// Applies a value-preserving function, rebuilding the same subtype
    /// through the global registry.
    ///
    /// # Errors
    ///
    /// Returns any error the registry raises while resolving the subtype's
    /// constructor.
    pub fn map<F>(self, function: F) -> Result<Self, DistinctError>
    where
        F: FnOnce(T) -> T,
    {
        self.map_in(ConstructorRegistry::global(), function)
    }

    /// Applies a function producing another erased value, which must be of
    /// the same subtype.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if `function` produced a
    /// value of a different subtype.
    pub fn try_bind<F>(self, function: F) -> Result<Self, DistinctError>
    where
        F: FnOnce(T) -> Self,
    {
        let expected = self.subtype();
        let bound = function(self.into_value());
        let found = bound.subtype();
        if expected == found {
            Ok(bound)
        } else {
            Err(DistinctError::mismatched("bind", &expected, &found))
        }
    }

    /// Applies a function producing another erased value of the same subtype.
    ///
    /// Unlike an ordinary monadic bind, switching subtypes is not a value the
    /// caller can recover from.
    ///
    /// # Panics
    ///
    /// Panics if `function` produced a value of a different subtype.
    #[must_use]
    pub fn bind<F>(self, function: F) -> Self
    where
        F: FnOnce(T) -> Self,
    {
        match self.try_bind(function) {
            Ok(bound) => bound,
            Err(error) => panic!("{error}"),
        }
    }

    /// Folds the single contained value into an accumulator.
    pub fn fold<B, F>(self, init: B, function: F) -> B
    where
        F: FnOnce(B, T) -> B,
    {
        function(init, self.into_value())
    }

    /// Returns `true` if the contained value satisfies the predicate.
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        predicate(self.value())
    }

    /// Returns `true` if every contained value satisfies the predicate.
    pub fn for_all<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        predicate(self.value())
    }

    /// Calls `function` on the contained value.
    pub fn for_each<F>(&self, function: F)
    where
        F: FnOnce(&T),
    {
        function(self.value());
    }

    /// Returns the number of contained values, which is always 1.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        1
    }
}

impl<T: PartialEq + Send + Sync + 'static> PartialEq for AnyDistinct<T> {
    fn eq(&self, other: &Self) -> bool {
        self.subtype() == other.subtype() && self.value() == other.value()
    }
}

impl<T: Eq + Send + Sync + 'static> Eq for AnyDistinct<T> {}

impl<T: fmt::Debug + Send + Sync + 'static> fmt::Debug for AnyDistinct<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AnyDistinct")
            .field("subtype", &self.subtype().name())
            .field("value", self.value())
            .finish()
    }
}

impl<T: fmt::Display + Send + Sync + 'static> fmt::Display for AnyDistinct<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}({})", self.subtype().name(), self.value())
    }
}

impl<S: Distinct> From<S> for AnyDistinct<S::Value> {
    fn from(value: S) -> Self {
        Self::new(value)
    }
}
