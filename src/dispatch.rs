//! Dispatch of arithmetic operators to type descriptors.
//!
//! [`Operation`] names one of the four binary operations and routes two raw
//! values to a [`TypeDescriptor`]. It is a pass-through layer: it never looks
//! at subtypes, so callers must check that both operands belong to the same
//! subtype before dispatching.

use std::fmt;

use crate::descriptor::{Described, TypeDescriptor};

/// One of the binary operations a [`TypeDescriptor`] supplies.
///
/// # Examples
///
/// ```rust
/// use nominal::Operation;
///
/// assert_eq!(Operation::Append.apply(3.0_f64, 4.0), 7.0);
/// assert_eq!(Operation::Divide.apply(9_i32, 2), 4);
/// assert_eq!(Operation::Subtract.to_string(), "subtract");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Additive combination.
    Append,
    /// Subtraction.
    Subtract,
    /// Multiplication.
    Multiply,
    /// Division.
    Divide,
}

impl Operation {
    /// All operations, in declaration order.
    pub const ALL: [Self; 4] = [Self::Append, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the lowercase name of the operation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Applies the operation using the default descriptor of `T`.
    #[inline]
    #[must_use]
    pub fn apply<T: Described>(self, left: T, right: T) -> T {
        self.apply_with(&T::descriptor(), left, right)
    }

    /// Applies the operation using an explicit descriptor.
    #[inline]
    #[must_use]
    pub fn apply_with<T, D>(self, descriptor: &D, left: T, right: T) -> T
    where
        D: TypeDescriptor<T> + ?Sized,
    {
        match self {
            Self::Append => descriptor.append(left, right),
            Self::Subtract => descriptor.subtract(left, right),
            Self::Multiply => descriptor.multiply(left, right),
            Self::Divide => descriptor.divide(left, right),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}
