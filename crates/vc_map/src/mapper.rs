use core::any::TypeId;
use core::fmt;
use std::sync::Arc;

use vc_reflect::Reflect;
use vc_reflect::info::{OptionalInfo, ReflectKind, Type, ValueType};
use vc_reflect::ops::ReflectRef;
use vc_reflect::registry::{GetTypeMeta, TypeConverter, TypeRegistryArc, TypeTraitConverter};

use crate::cache::ConverterCache;
use crate::entry::MappingEntry;
use crate::member::strip_option;
use crate::model::{MemberValue, ReflectModel, TypeModel};
use crate::registry::MappingRegistry;
use crate::strategy::{StrategyKind, StrategyResolver};
use crate::{AccessError, MapError, MapOptions, MapperConfig, MappingSet};

// -----------------------------------------------------------------------------
// Helpers

/// The value behind an `Option`, or the value itself.
fn present(value: &dyn Reflect) -> Result<&dyn Reflect, MapError> {
    match value.reflect_ref() {
        ReflectRef::Optional(optional) => optional.value().ok_or(MapError::AbsentSource),
        _ => Ok(value),
    }
}

/// Unwraps an `Option` read from a member, `None` if it is empty.
fn unwrap_optional(value: MemberValue<'_>) -> Option<MemberValue<'_>> {
    match value {
        MemberValue::Borrowed(value) => match value.reflect_ref() {
            ReflectRef::Optional(optional) => optional.value().map(MemberValue::Borrowed),
            _ => Some(MemberValue::Borrowed(value)),
        },
        MemberValue::Owned(value) if value.reflect_kind() == ReflectKind::Optional => value
            .reflect_owned()
            .into_optional()?
            .into_value()
            .map(MemberValue::Owned),
        owned => Some(owned),
    }
}

fn optional_info(value_type: ValueType) -> Option<&'static OptionalInfo> {
    value_type.type_info().as_optional().ok()
}

// -----------------------------------------------------------------------------
// Mapper

/// Maps reflected values of one struct type onto another.
///
/// A `Mapper` owns the type registry, the cache of resolved
/// [`MappingSet`]s and the cache of custom converters. It is `Send + Sync`;
/// share one instance, for example in a `static LazyLock`, to configure
/// mappings once and reuse them.
///
/// ```
/// use vc_map::Mapper;
/// use vc_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct UserDto { pub name: String, pub age: i32 }
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct User { pub name: String, pub age: f64 }
///
/// let mapper = Mapper::new();
/// let user: User = mapper.map(&UserDto { name: "Ann".into(), age: 30 }).unwrap();
///
/// assert_eq!(user.name, "Ann");
/// assert_eq!(user.age, 30.0);
/// ```
pub struct Mapper {
    registry: TypeRegistryArc,
    model: Arc<dyn TypeModel>,
    mappings: MappingRegistry,
    converters: ConverterCache,
    config: MapperConfig,
}

impl Default for Mapper {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    /// Creates a mapper over a new registry and a [`ReflectModel`].
    pub fn with_config(config: MapperConfig) -> Self {
        let registry = TypeRegistryArc::default();
        let model = Arc::new(ReflectModel::new(registry.clone()));
        Self::with_model(registry, model, config)
    }

    /// Creates a mapper over a custom type model.
    ///
    /// `registry` still provides conversion capabilities and converters.
    pub fn with_model(
        registry: TypeRegistryArc,
        model: Arc<dyn TypeModel>,
        config: MapperConfig,
    ) -> Self {
        Self {
            registry,
            model,
            mappings: MappingRegistry::new(),
            converters: ConverterCache::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    #[inline]
    pub fn type_registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    #[inline]
    pub fn mappings(&self) -> &MappingRegistry {
        &self.mappings
    }

    #[inline]
    pub fn converters(&self) -> &ConverterCache {
        &self.converters
    }

    /// Registers `T` and the types it refers to.
    #[inline]
    pub fn register<T: GetTypeMeta>(&self) {
        self.registry.register::<T>();
    }

    /// Sets the custom converter producing values of `T`.
    ///
    /// Replaces a converter declared with `#[reflect(converter = ..)]`.
    pub fn register_converter<T: GetTypeMeta>(&self, converter: impl TypeConverter) {
        let type_id = TypeId::of::<T>();
        self.registry.register::<T>();
        self.registry
            .write()
            .insert_type_trait(type_id, TypeTraitConverter::new(converter));
        self.converters.remove(type_id);
    }

    /// Returns the mapping set of `S -> D`, discovering it on first use.
    pub fn resolve<S: GetTypeMeta, D: GetTypeMeta>(&self) -> Result<MappingSet, MapError> {
        self.resolve_with::<S, D>(self.config.options())
    }

    /// Like [`resolve`](Self::resolve), `options` apply if the set is created.
    pub fn resolve_with<S: GetTypeMeta, D: GetTypeMeta>(
        &self,
        options: MapOptions,
    ) -> Result<MappingSet, MapError> {
        self.register::<S>();
        self.register::<D>();
        self.resolve_types(Type::of::<S>(), Type::of::<D>(), options)
    }

    /// Resolves by [`Type`], both types must already be registered.
    pub fn resolve_types(
        &self,
        source: Type,
        dest: Type,
        options: MapOptions,
    ) -> Result<MappingSet, MapError> {
        self.mappings.get_or_try_insert(source.id(), dest.id(), || {
            MappingSet::discover(self.model.clone(), source, dest, options)
        })
    }

    /// Forgets the mapping set of `S -> D`, returns whether one existed.
    pub fn remove<S: 'static, D: 'static>(&self) -> bool {
        self.remove_types(TypeId::of::<S>(), TypeId::of::<D>())
    }

    pub fn remove_types(&self, source: TypeId, dest: TypeId) -> bool {
        self.mappings.remove(source, dest)
    }

    #[inline]
    fn resolver(&self) -> StrategyResolver<'_> {
        StrategyResolver::new(&self.registry, &self.converters)
    }

    /// The strategy a scalar entry currently converts with.
    pub fn strategy(&self, entry: &MappingEntry) -> StrategyKind {
        let (source, _) = strip_option(entry.source_type());
        let (dest, _) = strip_option(entry.dest_type());
        self.resolver().resolve(source, dest).kind()
    }

    /// Maps `source` onto a default constructed `D`.
    ///
    /// An empty `Option` source fails with [`MapError::AbsentSource`].
    pub fn map<S, D>(&self, source: &S) -> Result<D, MapError>
    where
        S: Reflect + GetTypeMeta,
        D: Reflect + GetTypeMeta,
    {
        self.register::<S>();
        self.register::<D>();
        self.map_dyn(source.as_reflect(), TypeId::of::<D>())?
            .take::<D>()
            .map_err(|rejected| MapError::TypeMismatch {
                expected: D::type_path(),
                received: rejected.reflect_type_path(),
            })
    }

    /// Maps `source` onto an existing `dest`.
    pub fn map_into<S, D>(&self, source: &S, dest: &mut D) -> Result<(), MapError>
    where
        S: Reflect + GetTypeMeta,
        D: Reflect + GetTypeMeta,
    {
        self.register::<S>();
        self.register::<D>();
        self.map_into_dyn(source.as_reflect(), dest.as_reflect_mut())
    }

    /// Maps a value onto a default constructed value of a registered type.
    pub fn map_dyn(&self, source: &dyn Reflect, dest: TypeId) -> Result<Box<dyn Reflect>, MapError> {
        let source = present(source)?;
        let dest_ty = self
            .model
            .type_info(dest)
            .ok_or(MapError::UnregisteredType { type_id: dest })?
            .ty();
        let set = self.resolve_types(
            source.reflect_type_info().ty(),
            dest_ty,
            self.config.options(),
        )?;

        let mut value = self
            .model
            .instantiate_default(dest)
            .ok_or(MapError::NoDefault(dest_ty.path()))?;
        self.apply(&set, source, value.as_mut(), 0)?;
        Ok(value)
    }

    pub fn map_into_dyn(&self, source: &dyn Reflect, dest: &mut dyn Reflect) -> Result<(), MapError> {
        let source = present(source)?;
        let set = self.resolve_types(
            source.reflect_type_info().ty(),
            dest.reflect_type_info().ty(),
            self.config.options(),
        )?;
        self.apply(&set, source, dest, 0)
    }

    /// Lazily maps a sequence, skipping `None` items.
    ///
    /// ```
    /// use vc_map::Mapper;
    /// use vc_reflect::derive::Reflect;
    ///
    /// #[derive(Reflect, Default)]
    /// #[reflect(default)]
    /// struct Row { pub id: u32 }
    ///
    /// #[derive(Reflect, Default)]
    /// #[reflect(default)]
    /// struct Item { pub id: u64 }
    ///
    /// let mapper = Mapper::new();
    /// let rows = [Some(Row { id: 1 }), None, Some(Row { id: 3 })];
    ///
    /// let ids: Vec<u64> = mapper
    ///     .map_iter::<Row, Item, _>(rows.iter().map(Option::as_ref))
    ///     .map(|item| item.unwrap().id)
    ///     .collect();
    /// assert_eq!(ids, [1, 3]);
    /// ```
    pub fn map_iter<'a, S, D, I>(&'a self, items: I) -> impl Iterator<Item = Result<D, MapError>>
    where
        S: Reflect + GetTypeMeta,
        D: Reflect + GetTypeMeta,
        I: IntoIterator,
        I::Item: Into<Option<&'a S>>,
    {
        items
            .into_iter()
            .filter_map(|item| -> Option<&'a S> { item.into() })
            .map(move |source| self.map::<S, D>(source))
    }

    fn apply(
        &self,
        set: &MappingSet,
        source: &dyn Reflect,
        dest: &mut dyn Reflect,
        depth: usize,
    ) -> Result<(), MapError> {
        if depth > self.config.max_depth {
            return Err(MapError::DepthExceeded(self.config.max_depth));
        }
        let resolver = self.resolver();
        for (entry, nested) in set.plan() {
            self.apply_entry(&resolver, &entry, nested.as_ref(), source, dest, depth)?;
        }
        Ok(())
    }

    fn apply_entry(
        &self,
        resolver: &StrategyResolver<'_>,
        entry: &MappingEntry,
        nested: Option<&MappingSet>,
        source: &dyn Reflect,
        dest: &mut dyn Reflect,
        depth: usize,
    ) -> Result<(), MapError> {
        let value = self
            .model
            .read_member(entry.source(), source)
            .map_err(|err| MapError::Access {
                member: entry.source().name(),
                source: err,
            })?;

        let (source_core, source_optional) = strip_option(entry.source_type());
        let dest_option = optional_info(entry.dest_type());
        let dest_core = dest_option.map_or(entry.dest_type(), |info| *info.inner());

        let value = if source_optional {
            unwrap_optional(value)
        } else {
            Some(value)
        };
        let Some(value) = value else {
            // An absent value only overwrites an optional destination.
            return match dest_option {
                Some(info) => self.write(entry, dest, info.none()),
                None => Ok(()),
            };
        };

        let converted = match nested {
            Some(nested) if entry.is_complex() => {
                let mut child = self
                    .model
                    .instantiate_default(dest_core.id())
                    .ok_or(MapError::NoDefault(dest_core.ty().path()))?;
                self.apply(nested, value.as_reflect(), child.as_mut(), depth + 1)?;
                Some(child)
            }
            _ => {
                let strategy = resolver.resolve(source_core, dest_core);
                if strategy.kind() == StrategyKind::None {
                    log::warn!(
                        "no conversion from `{}` to `{}`, member `{}` left untouched",
                        source_core.ty().path(),
                        dest_core.ty().path(),
                        entry.dest(),
                    );
                }
                strategy
                    .execute(value, dest_core.ty())
                    .map_err(|err| MapError::Conversion {
                        member: entry.dest().name(),
                        source: err,
                    })?
            }
        };

        let Some(converted) = converted else {
            return Ok(());
        };
        let converted = match dest_option {
            Some(info) => info.wrap(converted).map_err(|rejected| MapError::Access {
                member: entry.dest().name(),
                source: AccessError::FieldType {
                    field: entry.dest().name(),
                    expected: dest_core.ty().path(),
                    received: rejected.reflect_type_path(),
                },
            })?,
            None => converted,
        };
        self.write(entry, dest, converted)
    }

    fn write(
        &self,
        entry: &MappingEntry,
        dest: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), MapError> {
        self.model
            .write_member(entry.dest(), dest, value)
            .map_err(|err| MapError::Access {
                member: entry.dest().name(),
                source: err,
            })
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("registry", &self.registry)
            .field("mappings", &self.mappings)
            .field("converters", &self.converters)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use core::fmt;
    use core::num::ParseIntError;
    use core::str::FromStr;
    use std::sync::Arc;

    use vc_reflect::Reflect;
    use vc_reflect::derive::Reflect;
    use vc_reflect::info::{Type, TypeInfo};
    use vc_reflect::registry::{BoxError, TypeConverter, TypeRegistryArc};

    use super::Mapper;
    use crate::member::{Member, MemberKind};
    use crate::model::{MemberValue, ReflectModel, TypeModel};
    use crate::strategy::StrategyKind;
    use crate::{AccessError, MapError, MapOptions, MapperConfig};

    #[derive(Reflect, Default, Debug, Clone, PartialEq)]
    #[reflect(default)]
    struct PersonDto {
        pub name: String,
        pub age: i32,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct PersonModel {
        pub name: String,
        pub age: f64,
    }

    fn ann() -> PersonDto {
        PersonDto {
            name: String::from("Ann"),
            age: 30,
        }
    }

    #[test]
    fn resolve_is_idempotent() {
        let mapper = Mapper::new();
        let first = mapper.resolve::<PersonDto, PersonModel>().unwrap();
        let second = mapper.resolve::<PersonDto, PersonModel>().unwrap();
        assert!(first.ptr_eq(&second));

        assert!(mapper.remove::<PersonDto, PersonModel>());
        assert!(!mapper.remove::<PersonDto, PersonModel>());
        let third = mapper.resolve::<PersonDto, PersonModel>().unwrap();
        assert!(!first.ptr_eq(&third));
    }

    #[test]
    fn concurrent_resolve_creates_one_set() {
        let mapper = Mapper::new();
        let sets: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| mapper.resolve::<PersonDto, PersonModel>().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(sets.iter().all(|set| set.ptr_eq(&sets[0])));
        assert_eq!(mapper.mappings().len(), 1);
    }

    #[test]
    fn discovery_pairs_by_name() {
        let mapper = Mapper::new();
        let set = mapper.resolve::<PersonDto, PersonModel>().unwrap();
        assert_eq!(set.len(), 2);

        let names = set
            .entries()
            .iter()
            .map(|entry| (entry.source().name(), entry.dest().name()))
            .collect::<Vec<_>>();
        assert_eq!(names, [("name", "name"), ("age", "age")]);

        let name = set.find("name").unwrap().unwrap();
        assert_eq!(mapper.strategy(&name), StrategyKind::Direct);
        let age = set.find("age").unwrap().unwrap();
        assert_eq!(mapper.strategy(&age), StrategyKind::GenericConvertible);

        let model: PersonModel = mapper.map(&ann()).unwrap();
        assert_eq!(model.name, "Ann");
        assert_eq!(model.age, 30.0);
    }

    #[test]
    fn ignore_and_unignore() {
        let mapper = Mapper::new();
        let set = mapper.resolve::<PersonDto, PersonModel>().unwrap();

        set.ignore("age").unwrap();
        assert!(set.find("age").unwrap().unwrap().is_ignored());
        let model: PersonModel = mapper.map(&ann()).unwrap();
        assert_eq!(model.name, "Ann");
        assert_eq!(model.age, 0.0);

        set.unignore("age").unwrap();
        let model: PersonModel = mapper.map(&ann()).unwrap();
        assert_eq!(model.age, 30.0);
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Scores {
        pub best: Option<i32>,
        pub last: Option<i32>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct ScoreCard {
        pub best: i32,
        pub last: Option<i64>,
    }

    #[test]
    fn absent_values() {
        let mapper = Mapper::new();
        let mut card = ScoreCard {
            best: 7,
            last: Some(3),
        };

        let empty = Scores::default();
        mapper.map_into(&empty, &mut card).unwrap();
        assert_eq!(card.best, 7);
        assert_eq!(card.last, None);

        let full = Scores {
            best: Some(5),
            last: Some(9),
        };
        mapper.map_into(&full, &mut card).unwrap();
        assert_eq!(card, ScoreCard { best: 5, last: Some(9) });
    }

    #[test]
    fn absent_source() {
        let mapper = Mapper::new();
        let err = mapper
            .map::<Option<PersonDto>, PersonModel>(&None)
            .unwrap_err();
        assert!(matches!(err, MapError::AbsentSource));

        let model: PersonModel = mapper.map(&Some(ann())).unwrap();
        assert_eq!(model.name, "Ann");
    }

    #[derive(Reflect, Default, Debug, Clone, Copy, PartialEq)]
    #[reflect(default)]
    enum Gender {
        #[default]
        Male,
        Female,
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct ByName {
        pub gender: String,
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct ByCode {
        pub gender: i32,
    }

    #[derive(Reflect, Default, Debug)]
    #[reflect(default)]
    struct Profile {
        pub gender: Gender,
    }

    #[test]
    fn enum_conversions() {
        let mapper = Mapper::new();

        let by_name = ByName {
            gender: String::from("Male"),
        };
        let profile: Profile = mapper.map(&by_name).unwrap();
        assert_eq!(profile.gender, Gender::Male);

        let profile: Profile = mapper.map(&ByCode { gender: 1 }).unwrap();
        assert_eq!(profile.gender, Gender::Female);

        let unknown = ByName {
            gender: String::from("Other"),
        };
        let err = mapper.map::<_, Profile>(&unknown).unwrap_err();
        assert!(matches!(
            err,
            MapError::Conversion { member: "gender", ref source }
                if source.strategy == StrategyKind::EnumLike
        ));

        let err = mapper.map::<_, Profile>(&ByCode { gender: 7 }).unwrap_err();
        assert!(matches!(err, MapError::Conversion { .. }));
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Company {
        pub name: String,
    }

    #[derive(Reflect, Default, Debug)]
    #[reflect(default)]
    struct Employer {
        pub name: String,
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Person {
        pub name: String,
        pub company: Company,
    }

    #[derive(Reflect, Default, Debug)]
    #[reflect(default)]
    struct User {
        pub name: String,
        pub employer: Employer,
    }

    fn walt() -> Person {
        Person {
            name: String::from("Walt"),
            company: Company {
                name: String::from("Disney"),
            },
        }
    }

    #[test]
    fn complex_entries() {
        let mapper = Mapper::new();
        let set = mapper.resolve::<Person, User>().unwrap();
        assert_eq!(set.len(), 1);

        let nested = set.complex("company", "employer").unwrap();
        assert_eq!(nested.len(), 1);
        let entry = set.find("company").unwrap().unwrap();
        assert!(entry.is_complex());
        assert!(set.nested(entry.id()).unwrap().unwrap().ptr_eq(&nested));

        let user: User = mapper.map(&walt()).unwrap();
        assert_eq!(user.name, "Walt");
        assert_eq!(user.employer.name, "Disney");

        assert!(set.remove("company").unwrap());
        assert!(matches!(set.nested(entry.id()), Err(MapError::StaleEntry(_))));
        let user: User = mapper.map(&walt()).unwrap();
        assert_eq!(user.name, "Walt");
        assert_eq!(user.employer.name, "");
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let config = MapperConfig {
            max_depth: 0,
            ..MapperConfig::default()
        };
        let mapper = Mapper::with_config(config);
        let set = mapper.resolve::<Person, User>().unwrap();
        set.complex("company", "employer").unwrap();

        let err = mapper.map::<_, User>(&walt()).unwrap_err();
        assert!(matches!(err, MapError::DepthExceeded(0)));
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Look {
        pub eye_color: String,
    }

    #[derive(Reflect, Default)]
    #[reflect(default, accessor(SetEyeColor, set = set_eye_color))]
    struct Avatar {
        color: String,
    }

    impl Avatar {
        fn set_eye_color(&mut self, color: String) {
            self.color = color;
        }
    }

    #[test]
    fn setter_accessor() {
        let mapper = Mapper::new();
        let set = mapper.resolve::<Look, Avatar>().unwrap();
        assert!(set.is_empty());

        set.add("eye_color", "SetEyeColor").unwrap();
        let entry = set.find("SetEyeColor").unwrap().unwrap();
        assert_eq!(entry.dest().kind(), MemberKind::Accessor);

        let look = Look {
            eye_color: String::from("blue"),
        };
        let avatar: Avatar = mapper.map(&look).unwrap();
        assert_eq!(avatar.color, "blue");
    }

    #[derive(Reflect, Default)]
    #[reflect(default, accessor(ping, get = ping))]
    struct Pinger {}

    impl Pinger {
        fn ping(&self) {}
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Target {
        pub ping: String,
    }

    #[test]
    fn getter_without_value() {
        let mapper = Mapper::new();
        let err = mapper.resolve::<Pinger, Target>().unwrap_err();
        assert!(matches!(
            err,
            MapError::MalformedAccessor { name: "ping", .. }
        ));
        assert!(!mapper.mappings().contains(TypeId::of::<Pinger>(), TypeId::of::<Target>()));
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Tally {
        pub count: i64,
    }

    #[derive(Reflect, Default, Debug)]
    #[reflect(default)]
    struct Counter {
        pub count: i32,
    }

    struct Plus100;

    impl TypeConverter for Plus100 {
        fn can_convert_from(&self, source: Type) -> bool {
            source.is::<i64>()
        }

        fn convert_from(&self, value: &dyn Reflect) -> Result<Box<dyn Reflect>, BoxError> {
            let value = value.downcast_ref::<i64>().ok_or("expected i64")?;
            Ok(Box::new(i32::try_from(*value)? + 100))
        }
    }

    #[test]
    fn custom_converter_wins() {
        let mapper = Mapper::new();
        let set = mapper.resolve::<Tally, Counter>().unwrap();
        let entry = set.find("count").unwrap().unwrap();

        assert_eq!(mapper.strategy(&entry), StrategyKind::GenericConvertible);
        let counter: Counter = mapper.map(&Tally { count: 5 }).unwrap();
        assert_eq!(counter.count, 5);

        mapper.register_converter::<i32>(Plus100);
        assert_eq!(mapper.strategy(&entry), StrategyKind::CustomConverter);
        let counter: Counter = mapper.map(&Tally { count: 5 }).unwrap();
        assert_eq!(counter.count, 105);

        let err = mapper.map::<_, Counter>(&Tally { count: i64::MAX }).unwrap_err();
        assert!(matches!(
            err,
            MapError::Conversion { ref source, .. }
                if source.strategy == StrategyKind::CustomConverter
        ));
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Account {
        pub id: u32,
        pub owner: String,
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct AccountView {
        #[reflect(private_set)]
        pub id: u32,
        pub owner: String,
    }

    #[test]
    fn restricted_setters() {
        let account = Account {
            id: 9,
            owner: String::from("Ann"),
        };

        let mapper = Mapper::new();
        assert_eq!(mapper.resolve::<Account, AccountView>().unwrap().len(), 1);
        let view: AccountView = mapper.map(&account).unwrap();
        assert_eq!(view.id, 0);

        let mapper = Mapper::new();
        let set = mapper
            .resolve_with::<Account, AccountView>(MapOptions::USE_PRIVATE_SETTER)
            .unwrap();
        assert_eq!(set.len(), 2);
        let view: AccountView = mapper.map(&account).unwrap();
        assert_eq!(view.id, 9);
        assert_eq!(view.owner, "Ann");
    }

    #[derive(Reflect, Debug)]
    struct Bare {
        pub name: String,
    }

    #[test]
    fn instantiation_and_registration() {
        let mapper = Mapper::new();
        let err = mapper.map::<_, Bare>(&ann()).unwrap_err();
        assert!(matches!(err, MapError::NoDefault(_)));

        let err = mapper
            .map_dyn(&ann(), TypeId::of::<PersonModel>())
            .unwrap_err();
        assert!(matches!(err, MapError::UnregisteredType { .. }));

        mapper.register::<PersonDto>();
        mapper.register::<PersonModel>();
        let value = mapper.map_dyn(&ann(), TypeId::of::<PersonModel>()).unwrap();
        assert_eq!(value.take::<PersonModel>().unwrap().age, 30.0);
    }

    #[test]
    fn map_sequences() {
        let mapper = Mapper::new();
        let people = [ann(), PersonDto::default()];

        let models = mapper
            .map_iter::<PersonDto, PersonModel, _>(&people)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name, "Ann");

        let sparse = [None, Some(&people[0]), None];
        let models = mapper
            .map_iter::<PersonDto, PersonModel, _>(sparse)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(models.len(), 1);
    }

    #[derive(Default)]
    struct LabelConverter;

    impl TypeConverter for LabelConverter {
        fn can_convert_from(&self, source: Type) -> bool {
            source.is::<String>()
        }

        fn convert_from(&self, value: &dyn Reflect) -> Result<Box<dyn Reflect>, BoxError> {
            let text = value.downcast_ref::<String>().ok_or("expected String")?;
            Ok(Box::new(Label {
                text: format!("#{text}"),
            }))
        }
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default, converter = LabelConverter)]
    struct Label {
        pub text: String,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Seal {
        pub level: u32,
    }

    struct Sealed;

    impl TypeConverter for Sealed {
        fn can_convert_from(&self, _: Type) -> bool {
            false
        }

        fn convert_from(&self, _: &dyn Reflect) -> Result<Box<dyn Reflect>, BoxError> {
            Err("sealed".into())
        }
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Parcel {
        pub label: u8,
        pub seal: u8,
    }

    #[derive(Reflect, Default, Debug)]
    #[reflect(default)]
    struct Shelf {
        pub label: Label,
        pub seal: Seal,
    }

    #[test]
    fn converter_through_text() {
        let mapper = Mapper::new();
        mapper.register_converter::<Seal>(Sealed);
        let set = mapper.resolve::<Parcel, Shelf>().unwrap();
        for name in ["label", "seal"] {
            let entry = set.find(name).unwrap().unwrap();
            assert_eq!(mapper.strategy(&entry), StrategyKind::CustomConverter);
        }

        let mut shelf = Shelf {
            label: Label::default(),
            seal: Seal { level: 3 },
        };
        mapper
            .map_into(&Parcel { label: 5, seal: 1 }, &mut shelf)
            .unwrap();
        assert_eq!(shelf.label.text, "#5");
        assert_eq!(shelf.seal, Seal { level: 3 });
    }

    #[derive(Reflect, Default)]
    #[reflect(default, display)]
    struct Tag {
        pub text: String,
    }

    impl fmt::Display for Tag {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.text)
        }
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default, from_str)]
    struct Code {
        pub raw: u32,
    }

    impl FromStr for Code {
        type Err = ParseIntError;

        fn from_str(text: &str) -> Result<Self, Self::Err> {
            text.trim().parse().map(|raw| Code { raw })
        }
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Sticker {
        pub code: Tag,
    }

    #[derive(Reflect, Default, Debug)]
    #[reflect(default)]
    struct Badge {
        pub code: Code,
    }

    fn sticker(text: &str) -> Sticker {
        Sticker {
            code: Tag {
                text: text.to_owned(),
            },
        }
    }

    #[test]
    fn parse_from_text() {
        let mapper = Mapper::new();
        let set = mapper.resolve::<Sticker, Badge>().unwrap();
        let entry = set.find("code").unwrap().unwrap();
        assert_eq!(mapper.strategy(&entry), StrategyKind::StringParse);

        let mut badge = Badge {
            code: Code { raw: 7 },
        };
        mapper.map_into(&sticker("x"), &mut badge).unwrap();
        assert_eq!(badge.code, Code { raw: 7 });

        mapper.map_into(&sticker("42"), &mut badge).unwrap();
        assert_eq!(badge.code, Code { raw: 42 });
    }

    #[derive(Reflect, Default, Debug)]
    #[reflect(default)]
    struct Blank {}

    /// Hands out a `PersonDto` whatever default is asked for.
    struct SwappedDefaults(ReflectModel);

    impl TypeModel for SwappedDefaults {
        fn type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
            self.0.type_info(type_id)
        }

        fn readable_members(&self, ty: Type) -> Result<Vec<Member>, MapError> {
            self.0.readable_members(ty)
        }

        fn writable_members(&self, ty: Type, include_restricted: bool) -> Result<Vec<Member>, MapError> {
            self.0.writable_members(ty, include_restricted)
        }

        fn find_member(&self, ty: Type, name: &str) -> Result<Option<Member>, MapError> {
            self.0.find_member(ty, name)
        }

        fn read_member<'a>(
            &self,
            member: &Member,
            instance: &'a dyn Reflect,
        ) -> Result<MemberValue<'a>, AccessError> {
            self.0.read_member(member, instance)
        }

        fn write_member(
            &self,
            member: &Member,
            instance: &mut dyn Reflect,
            value: Box<dyn Reflect>,
        ) -> Result<(), AccessError> {
            self.0.write_member(member, instance, value)
        }

        fn instantiate_default(&self, _: TypeId) -> Option<Box<dyn Reflect>> {
            self.0.instantiate_default(TypeId::of::<PersonDto>())
        }
    }

    #[test]
    fn default_of_another_type() {
        let registry = TypeRegistryArc::default();
        let model = Arc::new(SwappedDefaults(ReflectModel::new(registry.clone())));
        let mapper = Mapper::with_model(registry, model, MapperConfig::default());

        let err = mapper.map::<_, Blank>(&ann()).unwrap_err();
        assert!(matches!(
            err,
            MapError::TypeMismatch { expected, received }
                if expected.ends_with("Blank") && received.ends_with("PersonDto")
        ));
    }
}
