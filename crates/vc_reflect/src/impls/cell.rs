//! Static storage for type information, used to implement
//! [`Typed`](crate::info::Typed) and [`TypePath`](crate::info::TypePath).
//!
//! - [`NonGenericTypeInfoCell`]: one [`TypeInfo`] behind a [`OnceLock`].
//! - [`GenericTypeInfoCell`] / [`GenericTypePathCell`]: a `static` inside a
//!   generic function is shared by every instantiation, so these cells keep
//!   one leaked value per [`TypeId`].

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::hash::{FixedHashState, HashMap};
use crate::info::TypeInfo;

mod sealed {
    pub trait TypedProperty: Send + Sync + 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for crate::info::TypeInfo {}
}

use sealed::TypedProperty;

/// Container for the [`TypeInfo`] of a non-generic type.
///
/// ```
/// use vc_reflect::impls::NonGenericTypeInfoCell;
/// use vc_reflect::info::{OpaqueInfo, TypeInfo};
///
/// static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
/// let info = CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<u8>()));
/// assert!(info.type_is::<u8>());
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

/// Container for per-type values of generic types.
pub struct GenericTypeCell<T: TypedProperty>(RwLock<HashMap<TypeId, &'static T>>);

/// See [`GenericTypeCell`].
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// See [`GenericTypeCell`].
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(HashMap::with_hasher(FixedHashState)))
    }

    /// Returns the value stored for `G`, creating it with `f` on first use.
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &'static T {
        let type_id = TypeId::of::<G>();

        let cached = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        if let Some(value) = cached {
            return value;
        }

        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *guard
            .entry(type_id)
            .or_insert_with(|| &*Box::leak(Box::new(f())))
    }
}

/// Joins string pieces, used to build generic type paths.
///
/// ```
/// assert_eq!(vc_reflect::impls::concat(&["Option<", "i32", ">"]), "Option<i32>");
/// ```
pub fn concat(pieces: &[&str]) -> String {
    pieces.concat()
}
