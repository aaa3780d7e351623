use core::any::TypeId;
use core::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::hash::{FixedHashState, HashMap};
use crate::info::TypeInfo;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of [reflected] types.
///
/// Stores a [`TypeMeta`] per type, which gives access to the type's
/// [`TypeInfo`] and to its [type traits](TypeTrait) at runtime.
///
/// Types are [registered](Self::register) together with the types they
/// depend on, such as field types.
///
/// ```
/// # use core::any::TypeId;
/// # use vc_reflect::{derive::Reflect, registry::{TypeRegistry, TypeTraitDefault}};
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Foo {
///     pub name: Option<String>,
///     pub value: i32,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Foo>();
///
/// assert!(registry.contains(TypeId::of::<Foo>()));
/// assert!(registry.contains(TypeId::of::<Option<String>>()));
/// assert!(registry.get_type_trait::<TypeTraitDefault>(TypeId::of::<Foo>()).is_some());
/// ```
///
/// [reflected]: crate::Reflect
pub struct TypeRegistry {
    type_meta_table: HashMap<TypeId, TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty [`TypeRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: HashMap::with_hasher(FixedHashState),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Creates a registry with the primitive types registered.
    ///
    /// - `()` `bool` `char`
    /// - `i8 - i128` `isize`
    /// - `u8 - u128` `usize`
    /// - `f32` `f64`
    /// - `String`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry
    }

    /// Registers `T` and its dependencies, unless `T` is already present.
    ///
    /// Existing metadata is never overwritten, use
    /// [`insert_type_meta`](Self::insert_type_meta) for that.
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.type_meta_table.contains_key(&TypeId::of::<T>()) {
            return;
        }
        // Insert first, so that recursive types stop here.
        self.insert_type_meta(T::get_type_meta());
        T::register_dependencies(self);
    }

    /// Inserts or overwrites the metadata of a type, without dependencies.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        let ty = type_meta.ty();
        self.type_path_to_id.insert(ty.path(), ty.id());
        self.type_meta_table.insert(ty.id(), type_meta);
    }

    /// Creates the type trait `D` for `T` and stores it.
    ///
    /// `T` is registered first if needed.
    pub fn register_type_trait<T: GetTypeMeta, D: TypeTrait + FromType<T>>(&mut self) {
        self.register::<T>();
        self.insert_type_trait(TypeId::of::<T>(), D::from_type());
    }

    /// Stores a type trait for a registered type.
    ///
    /// Returns `false` if the type is not registered.
    pub fn insert_type_trait<D: TypeTrait>(&mut self, type_id: TypeId, data: D) -> bool {
        match self.type_meta_table.get_mut(&type_id) {
            Some(meta) => {
                meta.insert_trait(data);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains_key(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        self.type_meta_table.get_mut(&type_id)
    }

    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        self.type_path_to_id
            .get(type_path)
            .and_then(|id| self.type_meta_table.get(id))
    }

    #[inline]
    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        self.get(type_id).and_then(TypeMeta::get_trait::<T>)
    }

    #[inline]
    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A shared [`TypeRegistry`] behind a read-write lock.
///
/// Lock poisoning is ignored, the registry has no invariant a panic can break.
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `T`, taking the write lock only if it is missing.
    pub fn register<T: GetTypeMeta>(&self) {
        if !self.read().contains(TypeId::of::<T>()) {
            self.write().register::<T>();
        }
    }
}

impl fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.read().type_path_to_id.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::{TypeRegistry, TypeRegistryArc};
    use crate::registry::{TypeTraitDefault, TypeTraitDisplay};

    #[test]
    fn register_is_idempotent() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Option<u8>>();
        let len = registry.len();
        assert_eq!(len, 2);

        registry.register::<Option<u8>>();
        assert_eq!(registry.len(), len);
        assert!(registry.get_with_type_path("u8").is_some());
    }

    #[test]
    fn insert_type_trait_requires_registration() {
        let mut registry = TypeRegistry::empty();
        assert!(!registry.insert_type_trait(TypeId::of::<u8>(), 0_u32));

        registry.register_type_trait::<u8, TypeTraitDefault>();
        assert!(registry.get_type_trait::<TypeTraitDefault>(TypeId::of::<u8>()).is_some());
        assert!(registry.get_type_trait::<TypeTraitDisplay>(TypeId::of::<u8>()).is_some());
    }

    #[test]
    fn shared_registry() {
        let shared = TypeRegistryArc::default();
        shared.register::<Option<bool>>();
        assert!(shared.read().contains(TypeId::of::<bool>()));
        assert!(format!("{shared:?}").contains("bool"));
    }
}
