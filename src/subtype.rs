//! Runtime identity of a concrete distinct subtype.
//!
//! A [`Subtype`] is what generic code keeps when it no longer knows the
//! concrete type of a value. Two subtypes are equal exactly when they name the
//! same concrete Rust type; the underlying value type plays no part in it.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::wrapper::Distinct;

#[cfg(feature = "dynamic")]
use crate::{error::DistinctError, erased::AnyDistinct, registry::ConstructorRegistry};

/// Builds an erased instance of one concrete subtype from an erased raw value.
#[cfg(feature = "dynamic")]
pub(crate) type BuildFn =
    fn(&ConstructorRegistry, Box<dyn Any>) -> Result<Box<dyn Any>, DistinctError>;

/// The runtime identity of a concrete [`Distinct`] type.
///
/// # Examples
///
/// ```rust
/// use nominal::{Distinct, Subtype};
///
/// struct Meters(f64);
///
/// impl Distinct for Meters {
///     type Value = f64;
///     const NAME: &'static str = "Meters";
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
/// let subtype = Subtype::of::<Meters>();
/// assert_eq!(subtype.name(), "Meters");
/// assert!(subtype.is::<Meters>());
/// assert_eq!(subtype, Meters::subtype());
/// ```
#[derive(Clone, Copy)]
pub struct Subtype {
    id: TypeId,
    name: &'static str,
    value_id: TypeId,
    value_name: &'static str,
    #[cfg(feature = "dynamic")]
    build: BuildFn,
}

impl Subtype {
    /// Returns the identity of the concrete subtype `S`.
    #[must_use]
    pub fn of<S: Distinct>() -> Self {
        Self {
            id: TypeId::of::<S>(),
            name: S::NAME,
            value_id: TypeId::of::<S::Value>(),
            value_name: std::any::type_name::<S::Value>(),
            #[cfg(feature = "dynamic")]
            build: build_erased::<S>,
        }
    }

    /// Returns the [`TypeId`] of the concrete subtype.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the declared name of the concrete subtype.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`TypeId`] of the underlying value type.
    #[inline]
    #[must_use]
    pub const fn value_id(&self) -> TypeId {
        self.value_id
    }

    /// Returns the type name of the underlying value type.
    #[inline]
    #[must_use]
    pub const fn value_name(&self) -> &'static str {
        self.value_name
    }

    /// Returns `true` if this is the identity of `S`.
    #[inline]
    #[must_use]
    pub fn is<S: Distinct>(&self) -> bool {
        self.id == TypeId::of::<S>()
    }

    #[cfg(feature = "dynamic")]
    pub(crate) fn build_with(
        &self,
        registry: &ConstructorRegistry,
        raw: Box<dyn Any>,
    ) -> Result<Box<dyn Any>, DistinctError> {
        (self.build)(registry, raw)
    }
}

#[cfg(feature = "dynamic")]
fn build_erased<S: Distinct>(
    registry: &ConstructorRegistry,
    raw: Box<dyn Any>,
) -> Result<Box<dyn Any>, DistinctError> {
    let raw = raw
        .downcast::<S::Value>()
        .map_err(|_| DistinctError::MismatchedType {
            operation: "build",
            expected: std::any::type_name::<S::Value>(),
            found: "an erased value of another type",
        })?;
    let built = registry.construct::<S>(*raw)?;
    Ok(Box::new(AnyDistinct::new(built)))
}

impl PartialEq for Subtype {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Subtype {}

impl Hash for Subtype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Subtype {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Subtype")
            .field("name", &self.name)
            .field("value", &self.value_name)
            .finish()
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name)
    }
}
