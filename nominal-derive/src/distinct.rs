//! Implementation of the `#[derive(Distinct)]` macro.
//!
//! This module validates that the input is a single-field tuple struct and
//! generates the `Distinct` implementation together with the comparison,
//! formatting and operator impls that come with it.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Ident, Type, parse_macro_input};

/// Main implementation of the Distinct derive macro.
pub fn derive_distinct_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(expand(&input).unwrap_or_else(syn::Error::into_compile_error))
}

/// Which optional parts of the expansion are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Options {
    arithmetic: bool,
    ordering: bool,
    display: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            arithmetic: true,
            ordering: true,
            display: true,
        }
    }
}

fn parse_options(input: &DeriveInput) -> syn::Result<Options> {
    let mut options = Options::default();

    for attribute in input.attrs.iter().filter(|attribute| attribute.path().is_ident("distinct")) {
        attribute.parse_nested_meta(|meta| {
            if meta.path.is_ident("no_arithmetic") {
                options.arithmetic = false;
            } else if meta.path.is_ident("no_ordering") {
                options.ordering = false;
            } else if meta.path.is_ident("no_display") {
                options.display = false;
            } else {
                return Err(meta.error(
                    "unsupported distinct attribute, expected one of: no_arithmetic, no_ordering, no_display",
                ));
            }
            Ok(())
        })?;
    }

    Ok(options)
}

/// Extracts the type of the single field, rejecting every other shape.
fn value_type(input: &DeriveInput) -> syn::Result<&Type> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data_struct) => &data_struct.fields,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Distinct can only be derived for tuple structs, not enums.",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Distinct cannot be derived for unions.",
            ));
        }
    };

    match fields {
        Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => Ok(&unnamed.unnamed[0].ty),
        Fields::Unnamed(unnamed) => Err(syn::Error::new_spanned(
            name,
            format!(
                "Distinct requires exactly one single-argument constructor, but this tuple struct has {} fields.",
                unnamed.unnamed.len()
            ),
        )),
        Fields::Named(_) => Err(syn::Error::new_spanned(
            name,
            "Distinct can only be derived for tuple structs with a single field, not structs with named fields.",
        )),
        Fields::Unit => Err(syn::Error::new_spanned(
            name,
            "Distinct cannot be derived for unit structs (structs with no fields).",
        )),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Distinct cannot be derived for generic types; declare one concrete type per unit.",
        ));
    }

    let value = value_type(input)?;
    let options = parse_options(input)?;

    let distinct_impl = generate_distinct(name, value);
    let equality_impl = generate_equality(name);
    let ordering_impl = options.ordering.then(|| generate_ordering(name));
    let display_impl = options.display.then(|| generate_display(name));
    let arithmetic_impls = options.arithmetic.then(|| generate_arithmetic(name));

    Ok(quote! {
        #distinct_impl
        #equality_impl
        #ordering_impl
        #display_impl
        #arithmetic_impls

        impl ::core::convert::From<#name> for #value {
            #[inline]
            fn from(distinct: #name) -> Self {
                distinct.0
            }
        }
    })
}

fn generate_distinct(name: &Ident, value: &Type) -> TokenStream2 {
    let name_literal = name.to_string();

    quote! {
        impl ::nominal::Distinct for #name {
            type Value = #value;
            const NAME: &'static str = #name_literal;

            #[inline]
            fn from_value(value: #value) -> Self {
                Self(value)
            }

            #[inline]
            fn value(&self) -> &#value {
                &self.0
            }

            #[inline]
            fn into_value(self) -> #value {
                self.0
            }
        }
    }
}

fn generate_equality(name: &Ident) -> TokenStream2 {
    quote! {
        impl ::core::cmp::PartialEq for #name {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }
    }
}

fn generate_ordering(name: &Ident) -> TokenStream2 {
    quote! {
        impl ::core::cmp::PartialOrd for #name {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> ::core::option::Option<::core::cmp::Ordering> {
                ::core::cmp::PartialOrd::partial_cmp(&self.0, &other.0)
            }
        }
    }
}

fn generate_display(name: &Ident) -> TokenStream2 {
    quote! {
        impl ::core::fmt::Display for #name {
            fn fmt(&self, formatter: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::write!(
                    formatter,
                    "{}({})",
                    <Self as ::nominal::Distinct>::NAME,
                    self.0
                )
            }
        }
    }
}

fn generate_arithmetic(name: &Ident) -> TokenStream2 {
    let operators = [
        ("Add", "add", "append"),
        ("Sub", "sub", "subtract"),
        ("Mul", "mul", "multiply"),
        ("Div", "div", "divide"),
    ]
    .into_iter()
    .map(|(operator, method, operation)| {
        let operator = format_ident!("{}", operator);
        let method = format_ident!("{}", method);
        let operation = format_ident!("{}", operation);

        quote! {
            impl ::core::ops::#operator for #name {
                type Output = Self;

                #[inline]
                fn #method(self, other: Self) -> Self {
                    ::nominal::Distinct::#operation(self, other)
                }
            }
        }
    });

    quote! { #(#operators)* }
}
