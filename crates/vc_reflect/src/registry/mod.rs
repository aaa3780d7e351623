//! Type registry for querying type information and capabilities at runtime.
//!
//! - [`TypeTrait`]: a capability of a type, stored type-erased.
//! - [`FromType`]: creates a [`TypeTrait`] from a concrete type.
//! - [`TypeMeta`]: a [`TypeInfo`] plus a [`TypeTrait`] table.
//! - [`GetTypeMeta`]: creates the [`TypeMeta`] of a type.
//! - [`TypeRegistry`]: storage of [`TypeMeta`]s, keyed by [`TypeId`].
//! - type traits:
//!     - [`TypeTraitDefault`]: [`Default`] construction;
//!     - [`TypeTraitFromStr`]: try-parse from text;
//!     - [`TypeTraitDisplay`]: conversion to text;
//!     - [`TypeTraitConvertible`]: conversion through a [`Scalar`];
//!     - [`TypeTraitConverter`]: a user supplied [`TypeConverter`].
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`TypeId`]: core::any::TypeId
//! [`Scalar`]: crate::scalar::Scalar

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::{BoxError, TypeConverter, TypeTraitConverter};
pub use traits::{TypeTraitConvertible, TypeTraitDefault, TypeTraitDisplay, TypeTraitFromStr};
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::{TypeRegistry, TypeRegistryArc};
pub use type_trait::TypeTrait;
