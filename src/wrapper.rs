//! The `Distinct` trait - nominally distinct types over a shared representation.
//!
//! A distinct type wraps exactly one underlying value and carries a unit or
//! meaning that the value type alone does not. `Meters(3.0)` and `Hours(3.0)`
//! both store an `f64`, but they are different Rust types, so every operation
//! on this trait that combines two values only accepts `Self`. Mixing two
//! subtypes is a compile error rather than a runtime check.
//!
//! Generic code that must forget the concrete type can [`erase`](Distinct::erase)
//! a value into an [`AnyDistinct`](crate::AnyDistinct), where the same
//! guarantees are enforced at runtime instead.
//!
//! # Examples
//!
//! ```rust
//! use nominal::Distinct;
//!
//! #[derive(Debug, Clone, Copy, Distinct)]
//! struct Meters(f64);
//!
//! let total = Meters(3.0) + Meters(4.0);
//! assert_eq!(total, Meters(7.0));
//! assert!(Meters(3.0) > Meters(2.0));
//! assert_eq!(total.to_string(), "Meters(7)");
//! ```
//!
//! Values of different subtypes cannot be combined:
//!
//! ```rust,compile_fail
//! use nominal::Distinct;
//!
//! #[derive(Debug, Clone, Copy, Distinct)]
//! struct Meters(f64);
//!
//! #[derive(Debug, Clone, Copy, Distinct)]
//! struct Hours(f64);
//!
//! let _ = Meters(3.0) + Hours(3.0);
//! ```
//!
//! ```rust,compile_fail
//! use nominal::Distinct;
//!
//! #[derive(Debug, Clone, Copy, Distinct)]
//! struct Meters(f64);
//!
//! #[derive(Debug, Clone, Copy, Distinct)]
//! struct Hours(f64);
//!
//! let _ = Meters(3.0) < Hours(3.0);
//! ```

use crate::descriptor::Described;
use crate::dispatch::Operation;
use crate::error::DistinctError;
use crate::subtype::Subtype;

#[cfg(feature = "dynamic")]
use crate::{erased::AnyDistinct, registry::ConstructorRegistry};

/// A single-argument constructor of the subtype `S`.
pub type Constructor<S> = fn(<S as Distinct>::Value) -> S;

/// A nominally distinct type wrapping a single underlying value.
///
/// Implement this by hand or with `#[derive(Distinct)]` on a single-field
/// tuple struct.
///
/// # Required Items
///
/// - `Value`: the underlying representation
/// - `NAME`: the name used in errors and in the `Name(value)` string form
/// - `from_value`: the constructor from a raw value
/// - `value` and `into_value`: access to the underlying value
///
/// # Examples
///
/// ```rust
/// use nominal::Distinct;
///
/// struct Hours(f64);
///
/// impl Distinct for Hours {
///     type Value = f64;
///     const NAME: &'static str = "Hours";
///
///     fn from_value(value: f64) -> Self {
///         Self(value)
///     }
///     fn value(&self) -> &f64 {
///         &self.0
///     }
///     fn into_value(self) -> f64 {
///         self.0
///     }
/// }
///
/// let doubled = Hours::from_value(1.5).map(|hours| hours * 2.0);
/// assert_eq!(*doubled.value(), 3.0);
/// assert!(Hours::from_option(None).is_err());
/// ```
pub trait Distinct: Sized + Send + Sync + 'static {
    /// The underlying value type.
    type Value: Send + Sync + 'static;

    /// The name of this subtype.
    const NAME: &'static str;

    /// Builds an instance from a raw value.
    fn from_value(value: Self::Value) -> Self;

    /// Returns a reference to the underlying value.
    fn value(&self) -> &Self::Value;

    /// Consumes the instance and returns the underlying value.
    fn into_value(self) -> Self::Value;

    /// Returns the single-argument constructors this subtype declares.
    ///
    /// The constructor registry requires exactly one. The default declares
    /// [`from_value`](Distinct::from_value) and nothing else; override it
    /// only to route generic construction through a different function.
    #[must_use]
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Self::from_value as Constructor<Self>]
    }

    /// Returns the runtime identity of this subtype.
    #[must_use]
    fn subtype() -> Subtype {
        Subtype::of::<Self>()
    }

    /// Builds an instance from a value that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::ValueRequired`] if `value` is `None`.
    fn from_option(value: Option<Self::Value>) -> Result<Self, DistinctError> {
        value
            .map(Self::from_value)
            .ok_or(DistinctError::ValueRequired { subtype: Self::NAME })
    }

    /// Builds an instance through the single declared constructor.
    ///
    /// Every transforming operation rewraps its result here, so a subtype
    /// that overrides [`constructors`](Distinct::constructors) gets the same
    /// instance from this trait and from its erased form. With the `dynamic`
    /// feature the constructor is resolved once and cached in the global
    /// constructor registry.
    ///
    /// # Panics
    ///
    /// Panics if this subtype declares zero or more than one constructor.
    #[must_use]
    fn rebuild(value: Self::Value) -> Self {
        #[cfg(feature = "dynamic")]
        let constructor = ConstructorRegistry::global().constructor::<Self>();
        #[cfg(not(feature = "dynamic"))]
        let constructor = single_constructor::<Self>();

        match constructor {
            Ok(constructor) => constructor(value),
            Err(error) => panic!("{error}"),
        }
    }

    /// Applies a value-preserving function and rewraps the result.
    ///
    /// # Panics
    ///
    /// Panics if this subtype declares zero or more than one constructor.
    #[must_use]
    fn map<F>(self, function: F) -> Self
    where
        F: FnOnce(Self::Value) -> Self::Value,
    {
        Self::rebuild(function(self.into_value()))
    }

    /// Applies a function producing another instance of the same subtype.
    ///
    /// The signature only admits `Self`, so binding into a different subtype
    /// is rejected by the compiler.
    #[must_use]
    fn bind<F>(self, function: F) -> Self
    where
        F: FnOnce(Self::Value) -> Self,
    {
        function(self.into_value())
    }

    /// Folds the single contained value into an accumulator.
    fn fold<B, F>(self, init: B, function: F) -> B
    where
        F: FnOnce(B, Self::Value) -> B,
    {
        function(init, self.into_value())
    }

    /// Returns `true` if the contained value satisfies the predicate.
    fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&Self::Value) -> bool,
    {
        predicate(self.value())
    }

    /// Returns `true` if every contained value satisfies the predicate.
    ///
    /// With exactly one value this agrees with [`exists`](Distinct::exists).
    fn for_all<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&Self::Value) -> bool,
    {
        predicate(self.value())
    }

    /// Calls `function` on the contained value.
    fn for_each<F>(&self, function: F)
    where
        F: FnOnce(&Self::Value),
    {
        function(self.value());
    }

    /// Returns the number of contained values, which is always 1.
    #[inline]
    fn count(&self) -> usize {
        1
    }

    /// Adds two instances through the value type's descriptor.
    #[must_use]
    fn append(self, other: Self) -> Self
    where
        Self::Value: Described,
    {
        self.combine(Operation::Append, other)
    }

    /// Subtracts `other` through the value type's descriptor.
    #[must_use]
    fn subtract(self, other: Self) -> Self
    where
        Self::Value: Described,
    {
        self.combine(Operation::Subtract, other)
    }

    /// Multiplies two instances through the value type's descriptor.
    #[must_use]
    fn multiply(self, other: Self) -> Self
    where
        Self::Value: Described,
    {
        self.combine(Operation::Multiply, other)
    }

    /// Divides by `other` through the value type's descriptor.
    ///
    /// # Panics
    ///
    /// Panics wherever the descriptor panics. [`NumericDescriptor`] divides
    /// integers with `/`, so an integer divisor of zero panics.
    ///
    /// [`NumericDescriptor`]: crate::NumericDescriptor
    #[must_use]
    fn divide(self, other: Self) -> Self
    where
        Self::Value: Described,
    {
        self.combine(Operation::Divide, other)
    }

    /// Applies `operation` to both underlying values and rewraps the result.
    ///
    /// # Panics
    ///
    /// Panics if this subtype declares zero or more than one constructor, or
    /// if the descriptor itself panics (integer division by zero or overflow
    /// with [`NumericDescriptor`]).
    ///
    /// [`NumericDescriptor`]: crate::NumericDescriptor
    #[must_use]
    fn combine(self, operation: Operation, other: Self) -> Self
    where
        Self::Value: Described,
    {
        Self::rebuild(operation.apply(self.into_value(), other.into_value()))
    }

    /// Forgets the concrete type, keeping its identity for runtime checks.
    #[cfg(feature = "dynamic")]
    #[must_use]
    fn erase(self) -> AnyDistinct<Self::Value> {
        AnyDistinct::new(self)
    }
}

/// Returns the one constructor `S` declares.
///
/// # Errors
///
/// Returns [`DistinctError::ConstructorShape`] if `S` declares zero or more
/// than one constructor.
pub(crate) fn single_constructor<S: Distinct>() -> Result<Constructor<S>, DistinctError> {
    match S::constructors().as_slice() {
        [constructor] => Ok(*constructor),
        declared => Err(DistinctError::ConstructorShape {
            subtype: S::NAME,
            found: declared.len(),
        }),
    }
}
