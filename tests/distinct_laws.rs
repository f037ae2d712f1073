//! Property-based tests for the static `Distinct` surface.
//!
//! - **Map Identity**: `a.map(|x| x) == a`
//! - **Map Composition**: `a.map(f).map(g) == a.map(|x| g(f(x)))`
//! - **Equality**: `a1 == a2` iff their values are equal
//! - **Ordering**: `a1.partial_cmp(&a2)` matches the values' ordering
//! - **Arithmetic**: operators agree with the value type's arithmetic

use nominal::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy, Distinct)]
struct Cents(i64);

#[derive(Debug, Clone, Distinct)]
#[distinct(no_arithmetic)]
struct Label(String);

fn small() -> impl Strategy<Value = i64> {
    -1_000_000_i64..1_000_000
}

// =============================================================================
// Combinator Laws
// =============================================================================

proptest! {
    /// Identity Law for map
    #[test]
    fn prop_map_identity_law(value in any::<i64>()) {
        prop_assert_eq!(Cents(value).map(|x| x), Cents(value));
    }

    /// Composition Law for map
    #[test]
    fn prop_map_composition_law(value in any::<i64>()) {
        let function1 = |n: i64| n.wrapping_add(1);
        let function2 = |n: i64| n.wrapping_mul(2);

        let left = Cents(value).map(function1).map(function2);
        let right = Cents(value).map(|x| function2(function1(x)));

        prop_assert_eq!(left, right);
    }

    /// Left identity for bind: wrapping then binding applies the function
    #[test]
    fn prop_bind_left_identity_law(value in any::<i64>()) {
        let function = |n: i64| Cents(n.wrapping_sub(7));
        prop_assert_eq!(Cents::from_value(value).bind(function), function(value));
    }

    /// Right identity for bind
    #[test]
    fn prop_bind_right_identity_law(value in any::<String>()) {
        let label = Label(value.clone());
        prop_assert_eq!(label.bind(Label::from_value), Label(value));
    }

    /// fold sees the single value exactly once
    #[test]
    fn prop_fold_single_value(value in any::<i64>(), init in any::<i64>()) {
        prop_assert_eq!(
            Cents(value).fold(init, i64::wrapping_add),
            init.wrapping_add(value)
        );
    }

    /// exists and for_all agree on a single value
    #[test]
    fn prop_exists_agrees_with_for_all(value in any::<i64>()) {
        let cents = Cents(value);
        prop_assert_eq!(
            cents.exists(|n| *n % 2 == 0),
            cents.for_all(|n| *n % 2 == 0)
        );
        prop_assert_eq!(cents.count(), 1);
    }
}

// =============================================================================
// Equality and Ordering
// =============================================================================

proptest! {
    /// Two values of one subtype are equal iff their values are equal
    #[test]
    fn prop_equality_matches_values(left in any::<i64>(), right in any::<i64>()) {
        prop_assert_eq!(Cents(left) == Cents(right), left == right);
    }

    /// Ordering matches the value's natural ordering
    #[test]
    fn prop_ordering_matches_values(left in any::<i64>(), right in any::<i64>()) {
        prop_assert_eq!(Cents(left).partial_cmp(&Cents(right)), Some(left.cmp(&right)));
    }

    /// Ordering over strings matches string ordering
    #[test]
    fn prop_string_ordering_matches_values(left in ".*", right in ".*") {
        prop_assert_eq!(
            Label(left.clone()).partial_cmp(&Label(right.clone())),
            left.partial_cmp(&right)
        );
    }

    /// A missing value is always rejected
    #[test]
    fn prop_from_option_matches_presence(value in any::<Option<i64>>()) {
        let built = Cents::from_option(value);
        match value {
            Some(value) => prop_assert_eq!(built, Ok(Cents(value))),
            None => prop_assert_eq!(built, Err(DistinctError::ValueRequired { subtype: "Cents" })),
        }
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

proptest! {
    /// Operators agree with the value type's arithmetic
    #[test]
    fn prop_operators_match_values(left in small(), right in small()) {
        prop_assert_eq!(Cents(left) + Cents(right), Cents(left + right));
        prop_assert_eq!(Cents(left) - Cents(right), Cents(left - right));
        prop_assert_eq!(Cents(left) * Cents(right), Cents(left * right));
    }

    /// Division agrees with the value type's division
    #[test]
    fn prop_division_matches_values(left in small(), right in small().prop_filter("nonzero", |n| *n != 0)) {
        prop_assert_eq!(Cents(left) / Cents(right), Cents(left / right));
    }

    /// append is commutative for an integer value type
    #[test]
    fn prop_append_commutative(left in small(), right in small()) {
        prop_assert_eq!(Cents(left).append(Cents(right)), Cents(right).append(Cents(left)));
    }

    /// sum agrees with summing the values
    #[test]
    fn prop_sum_matches_values(values in prop::collection::vec(small(), 0..20)) {
        let expected: i64 = values.iter().sum();
        prop_assert_eq!(sum(values.into_iter().map(Cents)), Cents(expected));
    }
}
