//! Derive macro for nominal distinct types.
//!
//! This crate provides the procedural macro behind `#[derive(Distinct)]`.
//! Use it through the `nominal` crate, which re-exports it next to the
//! `Distinct` trait of the same name.
//!
//! # Example
//!
//! ```rust,ignore
//! use nominal::Distinct;
//!
//! #[derive(Debug, Clone, Copy, Distinct)]
//! struct Meters(f64);
//!
//! assert_eq!(Meters(3.0) + Meters(4.0), Meters(7.0));
//! assert_eq!(Meters(7.0).to_string(), "Meters(7)");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod distinct;

use proc_macro::TokenStream;

/// Derive macro declaring a nominal distinct type.
///
/// # Requirements
///
/// - The type must be a tuple struct with exactly one field, which becomes
///   the underlying value. That field is the type's only single-argument
///   constructor.
/// - The type must not be generic.
///
/// # Generated Code
///
/// For `struct Meters(f64);`, generates:
///
/// - `impl nominal::Distinct for Meters` with `Value = f64` and `NAME = "Meters"`
/// - `PartialEq` and `PartialOrd`, comparing the underlying values
/// - `Display`, formatting as `Meters(<value>)`
/// - `Add`, `Sub`, `Mul`, `Div` over `Meters`, dispatched through the value
///   type's descriptor
/// - `From<Meters> for f64`
///
/// Do not also derive `PartialEq` or `PartialOrd`; they are already provided.
///
/// # Attributes
///
/// Parts of the generated code can be switched off when the value type does
/// not support them:
///
/// ```rust,ignore
/// #[derive(Debug, Distinct)]
/// #[distinct(no_arithmetic, no_ordering, no_display)]
/// struct Tags(Vec<String>);
/// ```
///
/// - `no_arithmetic`: skip the operator implementations
/// - `no_ordering`: skip `PartialOrd`
/// - `no_display`: skip `Display`
#[proc_macro_derive(Distinct, attributes(distinct))]
pub fn derive_distinct(input: TokenStream) -> TokenStream {
    distinct::derive_distinct_impl(input)
}
