//! Error types for distinct-type values.
//!
//! Every error here is a programming error rather than a transient condition:
//! the caller is expected to fix the program, so nothing in this crate retries.
//! Equality is the one operation that never reports an error; comparing two
//! values of different subtypes for equality simply yields `false`.

use thiserror::Error;

use crate::subtype::Subtype;

/// Represents errors raised by distinct-type values and the constructor registry.
///
/// # Examples
///
/// ```rust
/// use nominal::DistinctError;
///
/// let error = DistinctError::ValueRequired { subtype: "Meters" };
/// assert_eq!(format!("{error}"), "Meters: a value is required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistinctError {
    /// A subtype was constructed from an absent underlying value.
    #[error("{subtype}: a value is required")]
    ValueRequired {
        /// The name of the subtype being constructed.
        subtype: &'static str,
    },

    /// An operation combined or converted values of two different subtypes.
    #[error("{operation}: expected {expected}, found {found}")]
    MismatchedType {
        /// The name of the operation that was attempted.
        operation: &'static str,
        /// The subtype (or value type) the operation required.
        expected: &'static str,
        /// The subtype (or value type) that was supplied.
        found: &'static str,
    },

    /// A subtype declares zero or more than one single-argument constructor.
    #[error("{subtype}: expected exactly one single-argument constructor, found {found}")]
    ConstructorShape {
        /// The name of the offending subtype.
        subtype: &'static str,
        /// The number of constructors the subtype declares.
        found: usize,
    },
}

impl DistinctError {
    /// Builds a [`DistinctError::MismatchedType`] from two subtype identities.
    #[must_use]
    pub const fn mismatched(operation: &'static str, expected: &Subtype, found: &Subtype) -> Self {
        Self::MismatchedType {
            operation,
            expected: expected.name(),
            found: found.name(),
        }
    }

    /// Returns `true` if this is a [`DistinctError::MismatchedType`].
    #[must_use]
    pub const fn is_mismatched_type(&self) -> bool {
        matches!(self, Self::MismatchedType { .. })
    }
}
