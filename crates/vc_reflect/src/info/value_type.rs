use core::any::TypeId;
use core::fmt;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{GetTypeMeta, TypeRegistry};

/// The declared type of a value slot: a field, a method parameter or a
/// method return value.
///
/// Besides the [`Type`], it keeps the static [`TypeInfo`] accessor and the
/// registration function of the type, so a registry can pull in every type
/// a struct's members refer to.
#[derive(Copy, Clone)]
pub struct ValueType {
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
    register: fn(&mut TypeRegistry),
}

impl ValueType {
    /// Creates the value type of `T`.
    #[inline]
    pub fn of<T: Typed + GetTypeMeta>() -> Self {
        Self {
            ty: Type::of::<T>(),
            type_info: T::type_info,
            register: TypeRegistry::register::<T>,
        }
    }

    #[inline(always)]
    pub fn ty(&self) -> Type {
        self.ty
    }

    #[inline(always)]
    pub fn id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Registers the type, and its dependencies, into `registry`.
    #[inline]
    pub fn register(&self, registry: &mut TypeRegistry) {
        (self.register)(registry);
    }
}

impl PartialEq for ValueType {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

impl Eq for ValueType {}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.ty, f)
    }
}
