use core::any::TypeId;
use core::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use vc_reflect::hash::{FixedHashState, HashMap};
use vc_reflect::registry::{TypeConverter, TypeRegistryArc, TypeTraitConverter};

/// Custom converters by destination type.
///
/// The first lookup of a type asks the [`TypeRegistryArc`] for a
/// [`TypeTraitConverter`] and remembers the answer, including its absence.
/// [`remove`](Self::remove) forgets it so the registry is asked again.
pub struct ConverterCache {
    converters: RwLock<HashMap<TypeId, Option<Arc<dyn TypeConverter>>>>,
}

impl Default for ConverterCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterCache {
    pub const fn new() -> Self {
        Self {
            converters: RwLock::new(HashMap::with_hasher(FixedHashState)),
        }
    }

    /// Returns the converter producing values of `dest`, if any.
    pub fn get(&self, registry: &TypeRegistryArc, dest: TypeId) -> Option<Arc<dyn TypeConverter>> {
        if let Some(found) = self
            .converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&dest)
        {
            return found.clone();
        }

        let mut converters = self
            .converters
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(found) = converters.get(&dest) {
            return found.clone();
        }

        let found = registry
            .read()
            .get(dest)
            .and_then(|meta| {
                let converter = meta.get_trait::<TypeTraitConverter>()?;
                log::debug!("found custom converter for `{}`", meta.ty().path());
                Some(converter.converter().clone())
            });
        converters.insert(dest, found.clone());
        found
    }

    /// Forgets what is known about `dest`.
    pub fn remove(&self, dest: TypeId) -> bool {
        self.converters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&dest)
            .is_some()
    }

    pub fn clear(&self) {
        self.converters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for ConverterCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterCache")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use vc_reflect::Reflect;
    use vc_reflect::info::Type;
    use vc_reflect::registry::{BoxError, TypeConverter, TypeRegistryArc, TypeTraitConverter};

    use super::ConverterCache;

    struct Doubler;

    impl TypeConverter for Doubler {
        fn can_convert_from(&self, source: Type) -> bool {
            source.is::<i32>()
        }

        fn convert_from(&self, value: &dyn Reflect) -> Result<Box<dyn Reflect>, BoxError> {
            let value = value.downcast_ref::<i32>().ok_or("expected i32")?;
            Ok(Box::new(value * 2))
        }
    }

    #[test]
    fn remembers_absence_until_removed() {
        let registry = TypeRegistryArc::default();
        let cache = ConverterCache::new();
        let id = TypeId::of::<i32>();

        assert!(cache.get(&registry, id).is_none());
        assert_eq!(cache.len(), 1);

        registry
            .write()
            .insert_type_trait(id, TypeTraitConverter::new(Doubler));
        assert!(cache.get(&registry, id).is_none());

        assert!(cache.remove(id));
        let converter = cache.get(&registry, id).unwrap();
        let doubled = converter.convert_from(&21_i32).unwrap();
        assert_eq!(doubled.take::<i32>().unwrap(), 42);
    }
}
