//! Constructor registry - rebuilding concrete subtypes from raw values.
//!
//! Generic code that only holds an [`AnyDistinct<T>`] cannot name the
//! concrete constructor of the value it started from. The registry bridges
//! that gap: given a [`Subtype`] and a raw `T`, it produces an instance of
//! the right concrete type.
//!
//! Entries are resolved lazily from [`Distinct::constructors`] the first time
//! a subtype is requested, and are never invalidated afterwards.
//!
//! # Concurrency
//!
//! The map sits behind a `parking_lot::RwLock`. Lookups take the read lock.
//! On a miss the constructor list is consulted without holding any lock, and
//! the result is inserted with `entry().or_insert_with`, so when two threads race
//! on the first use of a subtype both may resolve but exactly one entry wins.
//!
//! # Examples
//!
//! ```rust
//! use nominal::{ConstructorRegistry, Distinct};
//!
//! #[derive(Debug, Clone, Copy, Distinct)]
//! struct Meters(f64);
//!
//! let registry = ConstructorRegistry::new();
//! let built = registry.build(Meters::subtype(), 2.5).unwrap();
//! assert_eq!(built.downcast::<Meters>().unwrap(), Meters(2.5));
//! assert!(registry.contains(&Meters::subtype()));
//! ```

use std::any::{Any, TypeId, type_name};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::erased::AnyDistinct;
use crate::error::DistinctError;
use crate::subtype::Subtype;
use crate::wrapper::{Constructor, Distinct, single_constructor};

/// Process-wide registry shared by every erased operation that does not take
/// an explicit registry.
static GLOBAL_REGISTRY: LazyLock<ConstructorRegistry> = LazyLock::new(ConstructorRegistry::new);

struct Entry {
    subtype: Subtype,
    /// Holds a `Constructor<S>` for the subtype keyed by this entry.
    constructor: Box<dyn Any + Send + Sync>,
}

/// A cache from concrete subtype to its single-argument constructor.
///
/// Use [`ConstructorRegistry::global`] for the process-wide instance or
/// [`ConstructorRegistry::new`] for an isolated one.
#[derive(Default)]
pub struct ConstructorRegistry {
    entries: RwLock<FxHashMap<TypeId, Entry>>,
    resolutions: AtomicUsize,
}

impl ConstructorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry.
    ///
    /// The registry is created on first access and lives for the rest of the
    /// process.
    #[inline]
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_REGISTRY
    }

    /// Returns the constructor of `S`, resolving and caching it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::ConstructorShape`] if `S` declares zero or
    /// more than one constructor. Nothing is cached in that case.
    pub fn constructor<S: Distinct>(&self) -> Result<Constructor<S>, DistinctError> {
        let key = TypeId::of::<S>();

        if let Some(constructor) = self.cached::<S>(key) {
            tracing::trace!(subtype = S::NAME, "constructor cache hit");
            return Ok(constructor);
        }

        let resolved = Self::resolve::<S>()?;

        let mut entries = self.entries.write();
        let entry = entries.entry(key).or_insert_with(|| {
            tracing::debug!(subtype = S::NAME, "registered constructor");
            self.resolutions.fetch_add(1, Ordering::Relaxed);
            Entry {
                subtype: S::subtype(),
                constructor: Box::new(resolved),
            }
        });
        Self::typed::<S>(entry)
    }

    /// Builds an instance of `S` through its cached constructor.
    ///
    /// Panics raised by the constructor itself propagate unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::ConstructorShape`] if `S` declares zero or
    /// more than one constructor.
    pub fn construct<S: Distinct>(&self, value: S::Value) -> Result<S, DistinctError> {
        let constructor = self.constructor::<S>()?;
        Ok(constructor(value))
    }

    /// Builds an erased instance of `subtype` from a raw value.
    ///
    /// This is the path generic code takes when all it knows is the runtime
    /// identity of the subtype it started from.
    ///
    /// # Errors
    ///
    /// Returns [`DistinctError::MismatchedType`] if `T` is not the value type
    /// of `subtype`, or [`DistinctError::ConstructorShape`] if the subtype
    /// declares zero or more than one constructor.
    pub fn build<T>(&self, subtype: Subtype, value: T) -> Result<AnyDistinct<T>, DistinctError>
    where
        T: Send + Sync + 'static,
    {
        let mismatched = || DistinctError::MismatchedType {
            operation: "build",
            expected: subtype.value_name(),
            found: type_name::<T>(),
        };

        if subtype.value_id() != TypeId::of::<T>() {
            tracing::warn!(
                subtype = subtype.name(),
                expected = subtype.value_name(),
                found = type_name::<T>(),
                "raw value does not match subtype"
            );
            return Err(mismatched());
        }

        subtype
            .build_with(self, Box::new(value))?
            .downcast::<AnyDistinct<T>>()
            .map(|built| *built)
            .map_err(|_| mismatched())
    }

    /// Returns `true` if a constructor for `subtype` has been cached.
    #[must_use]
    pub fn contains(&self, subtype: &Subtype) -> bool {
        self.entries.read().contains_key(&subtype.id())
    }

    /// Returns the subtypes with a cached constructor, in no particular order.
    #[must_use]
    pub fn subtypes(&self) -> Vec<Subtype> {
        self.entries.read().values().map(|entry| entry.subtype).collect()
    }

    /// Returns the number of cached constructors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no constructor has been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns how many constructors were resolved and inserted into the
    /// cache.
    ///
    /// Cache hits never increment this counter, and neither does a thread
    /// that loses a first-use race, since its resolution is discarded.
    #[must_use]
    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    fn cached<S: Distinct>(&self, key: TypeId) -> Option<Constructor<S>> {
        self.entries
            .read()
            .get(&key)
            .and_then(|entry| Self::typed::<S>(entry).ok())
    }

    fn resolve<S: Distinct>() -> Result<Constructor<S>, DistinctError> {
        single_constructor::<S>().inspect_err(|error| {
            if let DistinctError::ConstructorShape { found, .. } = error {
                tracing::warn!(
                    subtype = S::NAME,
                    found = *found,
                    "subtype must declare exactly one constructor"
                );
            }
        })
    }

    fn typed<S: Distinct>(entry: &Entry) -> Result<Constructor<S>, DistinctError> {
        entry
            .constructor
            .downcast_ref::<Constructor<S>>()
            .copied()
            .ok_or_else(|| DistinctError::mismatched("constructor", &S::subtype(), &entry.subtype))
    }
}

impl std::fmt::Debug for ConstructorRegistry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ConstructorRegistry")
            .field("subtypes", &self.subtypes())
            .field("resolutions", &self.resolutions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[derive(Debug, PartialEq)]
    struct Meters(f64);

    impl Distinct for Meters {
        type Value = f64;
        const NAME: &'static str = "Meters";

        fn from_value(value: f64) -> Self {
            Self(value)
        }

        fn value(&self) -> &f64 {
            &self.0
        }

        fn into_value(self) -> f64 {
            self.0
        }
    }

    static TWICE_CONSULTED: AtomicUsize = AtomicUsize::new(0);

    /// Declares two constructors, which the registry cannot choose between.
    #[derive(Debug, PartialEq)]
    struct Twice(i32);

    impl Twice {
        fn negated(value: i32) -> Self {
            Self(-value)
        }
    }

    impl Distinct for Twice {
        type Value = i32;
        const NAME: &'static str = "Twice";

        fn from_value(value: i32) -> Self {
            Self(value)
        }

        fn value(&self) -> &i32 {
            &self.0
        }

        fn into_value(self) -> i32 {
            self.0
        }

        fn constructors() -> Vec<Constructor<Self>> {
            TWICE_CONSULTED.fetch_add(1, Ordering::SeqCst);
            vec![Self::from_value as Constructor<Self>, Self::negated]
        }
    }

    /// Declares no constructor at all.
    #[derive(Debug)]
    struct Never(i32);

    impl Distinct for Never {
        type Value = i32;
        const NAME: &'static str = "Never";

        fn from_value(value: i32) -> Self {
            Self(value)
        }

        fn value(&self) -> &i32 {
            &self.0
        }

        fn into_value(self) -> i32 {
            self.0
        }

        fn constructors() -> Vec<Constructor<Self>> {
            Vec::new()
        }
    }

    /// Routes generic construction through a clamping constructor.
    #[derive(Debug, PartialEq)]
    struct Percent(u8);

    impl Percent {
        fn clamped(value: u8) -> Self {
            Self(value.min(100))
        }
    }

    impl Distinct for Percent {
        type Value = u8;
        const NAME: &'static str = "Percent";

        fn from_value(value: u8) -> Self {
            Self(value)
        }

        fn value(&self) -> &u8 {
            &self.0
        }

        fn into_value(self) -> u8 {
            self.0
        }

        fn constructors() -> Vec<Constructor<Self>> {
            vec![Self::clamped as Constructor<Self>]
        }
    }

    #[fixture]
    fn registry() -> ConstructorRegistry {
        ConstructorRegistry::new()
    }

    #[rstest]
    fn new_registry_is_empty(registry: ConstructorRegistry) {
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.resolutions(), 0);
    }

    #[rstest]
    fn construct_resolves_once_then_hits_cache(registry: ConstructorRegistry) {
        assert_eq!(registry.construct::<Meters>(1.0), Ok(Meters(1.0)));
        assert_eq!(registry.construct::<Meters>(2.0), Ok(Meters(2.0)));
        assert_eq!(registry.construct::<Meters>(3.0), Ok(Meters(3.0)));
        assert_eq!(registry.resolutions(), 1);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&Meters::subtype()));
    }

    #[rstest]
    fn declared_constructor_is_used(registry: ConstructorRegistry) {
        assert_eq!(registry.construct::<Percent>(250), Ok(Percent(100)));
    }

    #[rstest]
    fn two_constructors_are_rejected(registry: ConstructorRegistry) {
        let before = TWICE_CONSULTED.load(Ordering::SeqCst);
        assert_eq!(
            registry.construct::<Twice>(1),
            Err(DistinctError::ConstructorShape {
                subtype: "Twice",
                found: 2,
            })
        );
        assert!(TWICE_CONSULTED.load(Ordering::SeqCst) > before);
        assert!(registry.is_empty());
        assert_eq!(registry.resolutions(), 0);
    }

    #[rstest]
    fn zero_constructors_are_rejected(registry: ConstructorRegistry) {
        let result = registry.build(Never::subtype(), 1);
        assert_eq!(
            result.map(AnyDistinct::into_value),
            Err(DistinctError::ConstructorShape {
                subtype: "Never",
                found: 0,
            })
        );
    }

    #[rstest]
    fn build_from_runtime_identity(registry: ConstructorRegistry) {
        let subtype = Meters::subtype();
        let built = registry.build(subtype, 4.0);
        assert_eq!(built.and_then(AnyDistinct::downcast::<Meters>), Ok(Meters(4.0)));
    }

    #[rstest]
    fn build_with_wrong_value_type_fails(registry: ConstructorRegistry) {
        let result = registry.build(Meters::subtype(), 4_i32);
        assert_eq!(
            result.map(AnyDistinct::into_value),
            Err(DistinctError::MismatchedType {
                operation: "build",
                expected: "f64",
                found: "i32",
            })
        );
        assert!(registry.is_empty());
    }

    #[rstest]
    fn subtypes_lists_cached_entries(registry: ConstructorRegistry) {
        let _ = registry.construct::<Meters>(1.0);
        let _ = registry.construct::<Percent>(1);
        let mut names: Vec<_> = registry.subtypes().iter().map(Subtype::name).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["Meters", "Percent"]);
    }

    #[rstest]
    fn global_is_shared() {
        assert!(std::ptr::eq(
            ConstructorRegistry::global(),
            ConstructorRegistry::global()
        ));
    }

    #[rstest]
    fn debug_lists_subtypes(registry: ConstructorRegistry) {
        let _ = registry.construct::<Meters>(1.0);
        let debug = format!("{registry:?}");
        assert!(debug.contains("Meters"));
        assert!(debug.contains("resolutions: 1"));
    }
}
