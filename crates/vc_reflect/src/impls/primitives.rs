use core::fmt;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, ReflectKind, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectCloneError, ReflectMut, ReflectOwned, ReflectRef};
use crate::registry::{FromType, GetTypeMeta, TypeMeta};
use crate::registry::{TypeTraitConvertible, TypeTraitDefault, TypeTraitDisplay, TypeTraitFromStr};

macro_rules! impl_reflect_opaque {
    (@one $ty:ty, $path:literal, $name:literal, [$($trait_data:ident),*]) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<$ty>()))
            }
        }

        impl Reflect for $ty {
            #[inline]
            fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> ReflectKind {
                ReflectKind::Opaque
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Opaque(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Opaque(self)
            }

            #[inline]
            fn reflect_owned(self: Box<Self>) -> ReflectOwned {
                ReflectOwned::Opaque(self)
            }

            #[inline]
            fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
                Ok(Box::new(self.clone()))
            }

            #[inline]
            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }

        impl GetTypeMeta for $ty {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<Self>();
                $( meta.insert_trait::<$trait_data>(FromType::<Self>::from_type()); )*
                meta
            }
        }
    };
    ($traits:tt => $($ty:ty : $path:literal, $name:literal);* $(;)?) => {
        $( impl_reflect_opaque!(@one $ty, $path, $name, $traits); )*
    };
}

impl_reflect_opaque!([TypeTraitDefault, TypeTraitFromStr, TypeTraitDisplay, TypeTraitConvertible] =>
    bool: "bool", "bool";
    char: "char", "char";
    i8: "i8", "i8";
    i16: "i16", "i16";
    i32: "i32", "i32";
    i64: "i64", "i64";
    i128: "i128", "i128";
    isize: "isize", "isize";
    u8: "u8", "u8";
    u16: "u16", "u16";
    u32: "u32", "u32";
    u64: "u64", "u64";
    u128: "u128", "u128";
    usize: "usize", "usize";
    f32: "f32", "f32";
    f64: "f64", "f64";
    String: "alloc::string::String", "String";
);

impl_reflect_opaque!([TypeTraitDefault] => (): "()", "()");

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath, Typed};
    use crate::registry::{TypeRegistry, TypeTraitConvertible, TypeTraitFromStr};

    #[test]
    fn primitive_paths() {
        assert_eq!(<u16 as TypePath>::type_path(), "u16");
        assert_eq!(<String as TypePath>::type_name(), "String");
        assert_eq!(<() as TypePath>::type_path(), "()");
        assert_eq!(<f64 as Typed>::type_info().kind(), ReflectKind::Opaque);
    }

    #[test]
    fn set_checks_type() {
        let mut value = 1_i32;
        assert!(value.set(Box::new(7_i32)).is_ok());
        assert_eq!(value, 7);

        let rejected = value.set(Box::new(7_i64)).unwrap_err();
        assert!(rejected.is::<i64>());
        assert_eq!(value, 7);
    }

    #[test]
    fn registered_traits() {
        let registry = TypeRegistry::new();
        let parse = registry
            .get_type_trait::<TypeTraitFromStr>(TypeId::of::<u8>())
            .unwrap();
        assert_eq!(parse.parse("42").unwrap().take::<u8>().unwrap(), 42);
        assert!(parse.parse("420").is_none());

        assert!(
            registry
                .get_type_trait::<TypeTraitConvertible>(TypeId::of::<()>())
                .is_none()
        );
    }
}
