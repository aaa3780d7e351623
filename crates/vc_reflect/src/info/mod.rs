//! Compile-time type information, see [`Typed`] and [`TypeInfo`].

// -----------------------------------------------------------------------------
// Modules

mod accessor_info;
mod enum_info;
mod field_info;
mod opaque_info;
mod optional_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;
mod value_type;

// -----------------------------------------------------------------------------
// Exports

pub use accessor_info::{AccessorInfo, MethodInfo};
pub use enum_info::{EnumInfo, VariantInfo};
pub use field_info::{NamedField, Visibility};
pub use opaque_info::OpaqueInfo;
pub use optional_info::OptionalInfo;
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath};
pub use typed::{DynamicTyped, Typed};
pub use value_type::ValueType;
