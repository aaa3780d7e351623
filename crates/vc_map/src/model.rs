//! The runtime type model consumed by the mapping engine.
//!
//! The engine never inspects types itself: it lists, reads and writes
//! members through a [`TypeModel`]. [`ReflectModel`] implements it on top of
//! a [`TypeRegistryArc`].

use core::any::TypeId;

use vc_reflect::Reflect;
use vc_reflect::info::{StructInfo, Type, TypeInfo};
use vc_reflect::ops::{InvokeError, ReflectCloneError};
use vc_reflect::registry::{TypeRegistryArc, TypeTraitDefault};

use crate::member::{Member, MemberHandle};
use crate::{AccessError, MapError};

// -----------------------------------------------------------------------------
// MemberValue

/// A value read from a member: borrowed from a field or produced by a getter.
#[derive(Debug)]
pub enum MemberValue<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Box<dyn Reflect>),
}

impl MemberValue<'_> {
    #[inline]
    pub fn as_reflect(&self) -> &dyn Reflect {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => value.as_ref(),
        }
    }

    /// Takes ownership, cloning a borrowed value.
    pub fn into_owned(self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        match self {
            Self::Borrowed(value) => value.reflect_clone(),
            Self::Owned(value) => Ok(value),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeModel

/// Member introspection needed by the mapping engine.
pub trait TypeModel: Send + Sync + 'static {
    /// Returns the static info of a known type.
    fn type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo>;

    /// Public fields and public getters of `ty`, indexed accessors excluded.
    fn readable_members(&self, ty: Type) -> Result<Vec<Member>, MapError>;

    /// Fields and setters of `ty`, indexed accessors excluded.
    ///
    /// Members with restricted write access are listed only if
    /// `include_restricted` is set.
    fn writable_members(&self, ty: Type, include_restricted: bool) -> Result<Vec<Member>, MapError>;

    /// Any member of `ty` named `name`, whatever its visibility.
    fn find_member(&self, ty: Type, name: &str) -> Result<Option<Member>, MapError>;

    fn read_member<'a>(
        &self,
        member: &Member,
        instance: &'a dyn Reflect,
    ) -> Result<MemberValue<'a>, AccessError>;

    fn write_member(
        &self,
        member: &Member,
        instance: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), AccessError>;

    /// Creates the default value of a type, `None` if it has none.
    fn instantiate_default(&self, type_id: TypeId) -> Option<Box<dyn Reflect>>;
}

// -----------------------------------------------------------------------------
// ReflectModel

/// [`TypeModel`] backed by `vc_reflect` type information.
///
/// Member lists come from [`StructInfo`], default instances from
/// [`TypeTraitDefault`]. Every type must be registered in the registry.
#[derive(Debug, Clone)]
pub struct ReflectModel {
    registry: TypeRegistryArc,
}

impl ReflectModel {
    #[inline]
    pub fn new(registry: TypeRegistryArc) -> Self {
        Self { registry }
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    fn struct_info(&self, ty: Type) -> Result<&'static StructInfo, MapError> {
        let info = self
            .type_info(ty.id())
            .ok_or(MapError::UnregisteredType { type_id: ty.id() })?;
        info.as_struct().map_err(|_| MapError::NotAStruct(ty.path()))
    }
}

fn check_receiver(member: &Member, instance: &dyn Reflect) -> Result<(), AccessError> {
    if instance.ty_id() == member.owner().id() {
        Ok(())
    } else {
        Err(AccessError::Receiver {
            expected: member.owner().path(),
            received: instance.reflect_type_path(),
        })
    }
}

impl TypeModel for ReflectModel {
    fn type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.registry.read().get_type_info(type_id)
    }

    fn readable_members(&self, ty: Type) -> Result<Vec<Member>, MapError> {
        let info = self.struct_info(ty)?;
        let fields = info
            .fields()
            .iter()
            .filter(|field| field.read_visibility().is_public())
            .map(|field| Member::field(ty, field.clone()));
        let accessors = info
            .accessors()
            .iter()
            .filter(|accessor| !accessor.is_indexed())
            .filter(|accessor| accessor.getter().is_some_and(|m| m.visibility().is_public()))
            .map(|accessor| Member::accessor(ty, accessor.clone()));
        Ok(fields.chain(accessors).collect())
    }

    fn writable_members(&self, ty: Type, include_restricted: bool) -> Result<Vec<Member>, MapError> {
        let info = self.struct_info(ty)?;
        let fields = info
            .fields()
            .iter()
            .filter(|field| include_restricted || field.write_visibility().is_public())
            .map(|field| Member::field(ty, field.clone()));
        let accessors = info
            .accessors()
            .iter()
            .filter(|accessor| !accessor.is_indexed())
            .filter(|accessor| {
                accessor
                    .setter()
                    .is_some_and(|m| include_restricted || m.visibility().is_public())
            })
            .map(|accessor| Member::accessor(ty, accessor.clone()));
        Ok(fields.chain(accessors).collect())
    }

    fn find_member(&self, ty: Type, name: &str) -> Result<Option<Member>, MapError> {
        let info = self.struct_info(ty)?;
        let field = info
            .field(name)
            .map(|field| Member::field(ty, field.clone()));
        Ok(field.or_else(|| {
            info.accessor(name)
                .map(|accessor| Member::accessor(ty, accessor.clone()))
        }))
    }

    fn read_member<'a>(
        &self,
        member: &Member,
        instance: &'a dyn Reflect,
    ) -> Result<MemberValue<'a>, AccessError> {
        check_receiver(member, instance)?;
        match member.handle() {
            MemberHandle::Field(field) => instance
                .reflect_ref()
                .as_struct()
                .and_then(|value| value.field(field.name()))
                .map(MemberValue::Borrowed)
                .ok_or(AccessError::MissingField {
                    ty: member.owner().path(),
                    field: field.name(),
                }),
            MemberHandle::Accessor(accessor) => {
                let getter = accessor.getter().ok_or(InvokeError::NotAGetter {
                    method: accessor.name(),
                })?;
                Ok(MemberValue::Owned(getter.invoke_get(instance, &[])?))
            }
        }
    }

    fn write_member(
        &self,
        member: &Member,
        instance: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), AccessError> {
        check_receiver(member, instance)?;
        match member.handle() {
            MemberHandle::Field(field) => {
                let missing = AccessError::MissingField {
                    ty: member.owner().path(),
                    field: field.name(),
                };
                let slot = instance
                    .reflect_mut()
                    .as_struct()
                    .and_then(|value| value.field_mut(field.name()))
                    .ok_or(missing)?;
                slot.set(value).map_err(|rejected| AccessError::FieldType {
                    field: field.name(),
                    expected: field.ty().path(),
                    received: rejected.reflect_type_path(),
                })
            }
            MemberHandle::Accessor(accessor) => {
                let setter = accessor.setter().ok_or(InvokeError::NotASetter {
                    method: accessor.name(),
                })?;
                Ok(setter.invoke_set(instance, vec![value])?)
            }
        }
    }

    fn instantiate_default(&self, type_id: TypeId) -> Option<Box<dyn Reflect>> {
        let default = self
            .registry
            .read()
            .get_type_trait::<TypeTraitDefault>(type_id)
            .cloned()?;
        Some(default.default())
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use vc_reflect::derive::Reflect;
    use vc_reflect::info::Type;
    use vc_reflect::registry::TypeRegistryArc;

    use super::{ReflectModel, TypeModel};
    use crate::member::MemberKind;
    use crate::{AccessError, MapError};

    #[derive(Reflect, Default)]
    #[reflect(default)]
    #[reflect(accessor(Nick, get = nick, set = set_nick))]
    #[reflect(indexed(Tag, get = tag))]
    struct Account {
        pub name: String,
        #[reflect(private_set)]
        pub id: u32,
        hidden: bool,
    }

    impl Account {
        fn nick(&self) -> String {
            format!("@{}", self.name)
        }

        fn set_nick(&mut self, nick: String) {
            self.name = nick.trim_start_matches('@').to_owned();
        }

        fn tag(&self, index: usize) -> String {
            format!("{}#{index}", self.name)
        }
    }

    fn model() -> ReflectModel {
        let registry = TypeRegistryArc::default();
        registry.register::<Account>();
        ReflectModel::new(registry)
    }

    fn names(members: &[crate::member::Member]) -> Vec<&'static str> {
        members.iter().map(|m| m.name()).collect()
    }

    #[test]
    fn member_lists() {
        let model = model();
        let ty = Type::of::<Account>();

        let readable = model.readable_members(ty).unwrap();
        assert_eq!(names(&readable), ["name", "id", "Nick"]);

        let writable = model.writable_members(ty, false).unwrap();
        assert_eq!(names(&writable), ["name", "Nick"]);

        let writable = model.writable_members(ty, true).unwrap();
        assert_eq!(names(&writable), ["name", "id", "hidden", "Nick"]);

        let tag = model.find_member(ty, "Tag").unwrap().unwrap();
        assert_eq!(tag.kind(), MemberKind::Accessor);
        assert!(tag.is_indexed());
    }

    #[test]
    fn unregistered_type() {
        let model = ReflectModel::new(TypeRegistryArc::default());
        let err = model.readable_members(Type::of::<Account>()).unwrap_err();
        assert!(matches!(err, MapError::UnregisteredType { .. }));

        let err = model.readable_members(Type::of::<u8>()).unwrap_err();
        assert!(matches!(err, MapError::NotAStruct("u8")));
    }

    #[test]
    fn read_and_write() {
        let model = model();
        let ty = Type::of::<Account>();
        let mut account = Account::default();

        let nick = model.find_member(ty, "Nick").unwrap().unwrap();
        model
            .write_member(&nick, &mut account, Box::new(String::from("@ann")))
            .unwrap();
        assert_eq!(account.name, "ann");

        let value = model.read_member(&nick, &account).unwrap();
        assert_eq!(value.as_reflect().downcast_ref::<String>().unwrap(), "@ann");

        let name = model.find_member(ty, "name").unwrap().unwrap();
        let err = model
            .write_member(&name, &mut account, Box::new(3_u8))
            .unwrap_err();
        assert!(matches!(err, AccessError::FieldType { expected: "alloc::string::String", .. }));

        let err = model.read_member(&name, &5_u8).unwrap_err();
        assert!(matches!(err, AccessError::Receiver { .. }));

        let created = model.instantiate_default(TypeId::of::<Account>()).unwrap();
        assert!(created.is::<Account>());
        assert!(model.instantiate_default(TypeId::of::<Option<Account>>()).is_none());
    }
}
