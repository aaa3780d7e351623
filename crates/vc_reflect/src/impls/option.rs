use core::fmt;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{OptionalInfo, ReflectKind, TypeInfo, TypePath, Typed};
use crate::ops::{Optional, ReflectCloneError, ReflectMut, ReflectOwned, ReflectRef};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

impl<T: Reflect + Typed + GetTypeMeta> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionalInfo::new::<T>()))
    }
}

impl<T: Reflect + Typed + GetTypeMeta> Reflect for Option<T> {
    #[inline]
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Optional
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Optional(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Optional(self)
    }

    #[inline]
    fn reflect_owned(self: Box<Self>) -> ReflectOwned {
        ReflectOwned::Optional(self)
    }

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let Some(value) = self else {
            return Ok(Box::new(None::<T>));
        };
        let cloned = value
            .reflect_clone()?
            .take::<T>()
            .map_err(|_| ReflectCloneError::NotSupported {
                type_path: Self::type_path(),
            })?;
        Ok(Box::new(Some(cloned)))
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => f.debug_tuple("Some").field(&value.as_reflect()).finish(),
            None => f.write_str("None"),
        }
    }
}

impl<T: Reflect + Typed + GetTypeMeta> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn into_value(self: Box<Self>) -> Option<Box<dyn Reflect>> {
        (*self).map(|value| Box::new(value) as Box<dyn Reflect>)
    }
}

impl<T: Reflect + Typed + GetTypeMeta> GetTypeMeta for Option<T> {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        meta
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::ReflectRef;

    #[test]
    fn generic_paths_are_per_type() {
        assert_eq!(<Option<i32> as TypePath>::type_name(), "Option<i32>");
        assert_eq!(<Option<u8> as TypePath>::type_name(), "Option<u8>");
        assert_eq!(
            <Option<String> as TypePath>::type_path(),
            "core::option::Option<alloc::string::String>"
        );
        let info = <Option<u8> as Typed>::type_info().as_optional().unwrap();
        assert!(info.inner().ty().is::<u8>());
    }

    #[test]
    fn optional_view() {
        let value: Option<i32> = None;
        let ReflectRef::Optional(optional) = value.reflect_ref() else {
            panic!("expected an optional view");
        };
        assert!(optional.is_none());

        let cloned = Some(3_i32).reflect_clone().unwrap();
        assert_eq!(cloned.take::<Option<i32>>().unwrap(), Some(3));
        assert_eq!(format!("{:?}", Some(2_u8).as_reflect()), "Some(2)");
    }
}
