use crate::info::{AccessorInfo, NamedField, Type, TypePath, ValueType};

/// Type info of a struct with named fields.
///
/// Besides fields it lists [`AccessorInfo`]s, members implemented by a
/// getter/setter method pair.
///
/// ```
/// use vc_reflect::derive::Reflect;
/// use vc_reflect::info::Typed;
///
/// #[derive(Reflect)]
/// struct Point { pub x: f32, pub y: f32 }
///
/// let info = Point::type_info().as_struct().unwrap();
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.index_of("y"), Some(1));
/// assert!(info.field("z").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    accessors: Box<[AccessorInfo]>,
}

impl StructInfo {
    pub fn new<T: TypePath>(fields: impl IntoIterator<Item = NamedField>) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into_iter().collect(),
            accessors: Box::new([]),
        }
    }

    pub fn with_accessors(mut self, accessors: impl IntoIterator<Item = AccessorInfo>) -> Self {
        self.accessors = accessors.into_iter().collect();
        self
    }

    #[inline(always)]
    pub fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    #[inline]
    pub fn accessors(&self) -> &[AccessorInfo] {
        &self.accessors
    }

    pub fn accessor(&self, name: &str) -> Option<&AccessorInfo> {
        self.accessors.iter().find(|a| a.name() == name)
    }

    /// Every value type referenced by fields and accessors.
    pub fn dependencies(&self) -> impl Iterator<Item = &ValueType> {
        self.fields
            .iter()
            .map(NamedField::value_type)
            .chain(self.accessors.iter().flat_map(AccessorInfo::value_types))
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use crate::Reflect as _;
    use crate::derive::Reflect;
    use crate::info::{Typed, Visibility};
    use crate::ops::Struct;
    use crate::registry::TypeRegistry;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Company {
        pub name: String,
    }

    #[derive(Reflect, Default)]
    struct Person {
        pub name: String,
        #[reflect(private_set)]
        pub age: i32,
        id: u64,
        #[reflect(skip)]
        pub cache: Vec<u8>,
        pub company: Option<Company>,
    }

    #[derive(Reflect)]
    #[reflect(type_path = "app::Marker")]
    struct Marker;

    #[test]
    fn field_visibility() {
        let info = Person::type_info().as_struct().unwrap();
        assert_eq!(info.field_len(), 4);
        assert!(info.field("cache").is_none());

        let age = info.field("age").unwrap();
        assert_eq!(age.read_visibility(), Visibility::Public);
        assert_eq!(age.write_visibility(), Visibility::Restricted);

        let id = info.field("id").unwrap();
        assert_eq!(id.read_visibility(), Visibility::Restricted);
        assert_eq!(id.write_visibility(), Visibility::Restricted);
    }

    #[test]
    fn field_wise_clone() {
        let person = Person {
            name: "Ann".into(),
            age: 30,
            id: 7,
            cache: vec![1, 2],
            company: Some(Company { name: "Disney".into() }),
        };
        let cloned = person.reflect_clone().unwrap().take::<Person>().unwrap();
        assert_eq!(cloned.name, "Ann");
        assert_eq!(cloned.id, 7);
        assert!(cloned.cache.is_empty());
        assert_eq!(cloned.company, person.company);
        assert_eq!(person.field_at(3).unwrap().reflect_type_name(), "Option<Company>");
    }

    #[test]
    fn debug_and_paths() {
        let company = Company { name: "Disney".into() };
        assert_eq!(
            format!("{:?}", company.as_reflect()),
            "Company { name: \"Disney\" }"
        );
        assert_eq!(Marker::type_info().type_path(), "app::Marker");
        assert_eq!(Marker.field_len(), 0);
    }

    #[test]
    fn dependencies_are_registered() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Person>();
        assert!(registry.contains(TypeId::of::<Company>()));
        assert!(registry.contains(TypeId::of::<Option<Company>>()));
        assert!(registry.contains(TypeId::of::<u64>()));
        assert!(!registry.contains(TypeId::of::<Vec<u8>>()));
    }
}
