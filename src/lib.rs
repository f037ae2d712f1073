//! # nominal
//!
//! Nominally distinct types over a shared representation.
//!
//! ## Overview
//!
//! A length in meters and a duration in hours may both be stored as `f64`,
//! yet adding one to the other is always a bug. This library lets you declare
//! as many such types as you need and gives each of them equality, ordering,
//! arithmetic and single-value combinators for free, while guaranteeing that
//! values of two different types are never silently mixed:
//!
//! - **Static surface**: [`Distinct`] and `#[derive(Distinct)]`. Mixing two
//!   subtypes does not compile.
//! - **Dynamic surface**: [`AnyDistinct`], the type-erased base abstraction.
//!   Mixing two subtypes is a [`DistinctError::MismatchedType`], except for
//!   equality, which simply answers `false`.
//! - **Constructor registry**: [`ConstructorRegistry`] rebuilds the right
//!   concrete type from a raw value when generic code only holds an
//!   [`AnyDistinct`].
//! - **Type descriptors**: [`TypeDescriptor`] and [`Described`] supply the
//!   arithmetic for an underlying value type.
//!
//! ## Feature Flags
//!
//! - `derive`: the `#[derive(Distinct)]` macro
//! - `dynamic`: [`AnyDistinct`], [`ConstructorRegistry`] and [`sum_any`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use nominal::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, Distinct)]
//! struct Meters(f64);
//!
//! #[derive(Debug, Clone, Copy, Distinct)]
//! struct Hours(f64);
//!
//! assert_eq!(Meters(3.0) + Meters(4.0), Meters(7.0));
//! assert!(Meters(3.0) > Meters(2.0));
//!
//! let meters = Meters(3.0).erase();
//! let hours = Hours(3.0).erase();
//! assert!(meters != hours);
//! assert!(meters.try_cmp_partial(&hours).unwrap_err().is_mismatched_type());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use nominal::prelude::*;
/// ```
pub mod prelude {
    pub use crate::descriptor::{Described, NumericDescriptor, TypeDescriptor};
    pub use crate::dispatch::Operation;
    pub use crate::error::DistinctError;
    pub use crate::ext::{fold, sum};
    pub use crate::subtype::Subtype;
    pub use crate::wrapper::{Constructor, Distinct};

    #[cfg(feature = "dynamic")]
    pub use crate::ext::sum_any;

    #[cfg(feature = "dynamic")]
    pub use crate::{erased::AnyDistinct, registry::ConstructorRegistry};

    #[cfg(feature = "derive")]
    pub use nominal_derive::Distinct;
}

mod descriptor;
mod dispatch;
mod error;
mod ext;
mod subtype;
mod wrapper;

#[cfg(feature = "dynamic")]
mod erased;

#[cfg(feature = "dynamic")]
mod registry;

pub use descriptor::{Described, NumericDescriptor, TypeDescriptor};
pub use dispatch::Operation;
pub use error::DistinctError;
pub use ext::{fold, sum};
pub use subtype::Subtype;
pub use wrapper::{Constructor, Distinct};

#[cfg(feature = "dynamic")]
pub use ext::sum_any;

#[cfg(feature = "dynamic")]
pub use erased::AnyDistinct;

#[cfg(feature = "dynamic")]
pub use registry::ConstructorRegistry;

#[cfg(feature = "derive")]
pub use nominal_derive::Distinct;
