use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use slotmap::{SecondaryMap, SlotMap};
use vc_reflect::info::{ReflectKind, Type, ValueType};

use crate::entry::{EntryId, EntryKey, MappingEntry, entry_types};
use crate::member::{Member, MemberSelector, strip_option};
use crate::model::TypeModel;
use crate::{MapError, MapOptions};

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Default)]
struct SetData {
    entries: SlotMap<EntryKey, MappingEntry>,
    order: Vec<EntryKey>,
    /// One nested set per complex entry.
    nested: SecondaryMap<EntryKey, MappingSet>,
}

impl SetData {
    fn insert(
        &mut self,
        set: u64,
        source: Member,
        dest: Member,
        types: (ValueType, ValueType),
        complex: bool,
    ) -> EntryKey {
        let key = self.entries.insert_with_key(|key| {
            MappingEntry::new(EntryId { set, key }, source, dest, types, complex)
        });
        self.order.push(key);
        key
    }

    fn remove(&mut self, keys: &[EntryKey]) {
        for &key in keys {
            self.entries.remove(key);
            self.nested.remove(key);
        }
        self.order.retain(|key| self.entries.contains_key(*key));
    }

    fn keys_where(&self, mut pred: impl FnMut(&MappingEntry) -> bool) -> Vec<EntryKey> {
        self.order
            .iter()
            .copied()
            .filter(|&key| self.entries.get(key).is_some_and(&mut pred))
            .collect()
    }
}

// -----------------------------------------------------------------------------
// MappingSet

/// The mapping rules between one source type and one destination type.
///
/// A `MappingSet` is a shared handle: clones, and every resolution of the
/// same type pair, see the same entries. Changes are visible to all holders
/// immediately. Concurrent structural changes are not ordered, callers that
/// need an order serialize them.
///
/// Entries are created by discovery (public members paired by exact name)
/// and then adjusted with [`add`](Self::add), [`complex`](Self::complex),
/// [`ignore`](Self::ignore), [`unignore`](Self::unignore) and
/// [`remove`](Self::remove). A selector given by name matches entries by
/// source member name first, then by destination member name.
#[derive(Clone)]
pub struct MappingSet {
    id: u64,
    source: Type,
    dest: Type,
    options: MapOptions,
    model: Arc<dyn TypeModel>,
    data: Arc<RwLock<SetData>>,
}

impl MappingSet {
    fn empty(model: Arc<dyn TypeModel>, source: Type, dest: Type, options: MapOptions) -> Self {
        Self {
            id: NEXT_SET_ID.fetch_add(1, Ordering::Relaxed),
            source,
            dest,
            options,
            model,
            data: Arc::default(),
        }
    }

    /// Creates the set of `source -> dest` with the discovered entries.
    pub(crate) fn discover(
        model: Arc<dyn TypeModel>,
        source: Type,
        dest: Type,
        options: MapOptions,
    ) -> Result<Self, MapError> {
        let set = Self::empty(model, source, dest, options);
        let readable = set.model.readable_members(source)?;
        let writable = set
            .model
            .writable_members(dest, options.contains(MapOptions::USE_PRIVATE_SETTER))?;

        let mut data = SetData::default();
        for source in readable {
            if let Some(dest) = writable.iter().find(|dest| dest.name() == source.name()) {
                let types = entry_types(&source, dest)?;
                data.insert(set.id, source, dest.clone(), types, false);
            }
        }
        log::debug!(
            "discovered mapping `{}` -> `{}` with {} entries",
            source.path(),
            dest.path(),
            data.order.len(),
        );

        *set.write() = data;
        Ok(set)
    }

    fn read(&self) -> RwLockReadGuard<'_, SetData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SetData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn owner_mismatch(&self, handle: String) -> MapError {
        MapError::OwnerMismatch {
            handle,
            source_ty: self.source.path(),
            dest_ty: self.dest.path(),
        }
    }

    /// Resolves a selector against the members of `ty`.
    fn member_of(&self, ty: Type, selector: MemberSelector) -> Result<Member, MapError> {
        match selector {
            MemberSelector::Name(name) => {
                if name.trim().is_empty() {
                    return Err(MapError::EmptyMemberName);
                }
                self.model
                    .find_member(ty, &name)?
                    .ok_or(MapError::MemberNotFound { ty: ty.path(), name })
            }
            MemberSelector::Member(member) if member.owner() == ty => Ok(member),
            MemberSelector::Member(member) => Err(self.owner_mismatch(member.to_string())),
        }
    }

    /// Keys of the entries a selector refers to, in entry order.
    fn matching(&self, data: &SetData, selector: &MemberSelector) -> Result<Vec<EntryKey>, MapError> {
        match selector {
            MemberSelector::Name(name) => {
                if name.trim().is_empty() {
                    return Err(MapError::EmptyMemberName);
                }
                let by_source = data.keys_where(|entry| entry.source().name() == name.as_str());
                if by_source.is_empty() {
                    Ok(data.keys_where(|entry| entry.dest().name() == name.as_str()))
                } else {
                    Ok(by_source)
                }
            }
            MemberSelector::Member(member) => {
                if member.owner() != self.source && member.owner() != self.dest {
                    return Err(self.owner_mismatch(member.to_string()));
                }
                Ok(data.keys_where(|entry| entry.source() == member || entry.dest() == member))
            }
        }
    }

    fn key_of(&self, data: &SetData, id: EntryId) -> Result<EntryKey, MapError> {
        if id.set != self.id {
            return Err(self.owner_mismatch(format!("{id:?}")));
        }
        if data.entries.contains_key(id.key) {
            Ok(id.key)
        } else {
            Err(MapError::StaleEntry(id))
        }
    }

    fn set_ignored(&self, selector: MemberSelector, ignored: bool) -> Result<(), MapError> {
        let mut data = self.write();
        let keys = self.matching(&data, &selector)?;
        if keys.is_empty() {
            return Err(MapError::MemberNotFound {
                ty: self.source.path(),
                name: selector.to_string(),
            });
        }
        for key in keys {
            if let Some(entry) = data.entries.get_mut(key) {
                entry.set_ignored(ignored);
            }
        }
        Ok(())
    }

    fn set_entry_ignored(&self, id: EntryId, ignored: bool) -> Result<(), MapError> {
        let mut data = self.write();
        let key = self.key_of(&data, id)?;
        if let Some(entry) = data.entries.get_mut(key) {
            entry.set_ignored(ignored);
        }
        Ok(())
    }

    /// Unique id of this set, shared by its clones.
    #[inline(always)]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline(always)]
    pub fn source_type(&self) -> Type {
        self.source
    }

    #[inline(always)]
    pub fn dest_type(&self) -> Type {
        self.dest
    }

    /// Options the set was discovered with, nested sets inherit them.
    #[inline(always)]
    pub fn options(&self) -> MapOptions {
        self.options
    }

    /// Returns `true` if both handles refer to the same set.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the entries, in insertion order.
    pub fn entries(&self) -> Vec<MappingEntry> {
        let data = self.read();
        data.order
            .iter()
            .filter_map(|&key| data.entries.get(key).cloned())
            .collect()
    }

    pub fn entry(&self, id: EntryId) -> Result<MappingEntry, MapError> {
        let data = self.read();
        let key = self.key_of(&data, id)?;
        Ok(data.entries[key].clone())
    }

    /// First entry the selector refers to.
    pub fn find(&self, selector: impl Into<MemberSelector>) -> Result<Option<MappingEntry>, MapError> {
        let data = self.read();
        let keys = self.matching(&data, &selector.into())?;
        Ok(keys.first().map(|&key| data.entries[key].clone()))
    }

    /// Adds an entry from a source member to a destination member.
    ///
    /// Entries writing the same destination member are replaced.
    pub fn add(
        &self,
        source: impl Into<MemberSelector>,
        dest: impl Into<MemberSelector>,
    ) -> Result<EntryId, MapError> {
        let source = self.member_of(self.source, source.into())?;
        let dest = self.member_of(self.dest, dest.into())?;
        let types = entry_types(&source, &dest)?;

        let mut data = self.write();
        let replaced = data.keys_where(|entry| entry.dest() == &dest);
        data.remove(&replaced);
        let key = data.insert(self.id, source, dest, types, false);
        Ok(EntryId { set: self.id, key })
    }

    /// Adds a complex entry, mapped through a nested set between the member
    /// types, and returns that nested set.
    ///
    /// Both member types must be structs, optionally wrapped in `Option`.
    /// The nested set is discovered like a top-level one.
    pub fn complex(
        &self,
        source: impl Into<MemberSelector>,
        dest: impl Into<MemberSelector>,
    ) -> Result<MappingSet, MapError> {
        let source = self.member_of(self.source, source.into())?;
        let dest = self.member_of(self.dest, dest.into())?;
        let types = entry_types(&source, &dest)?;

        let (source_core, _) = strip_option(types.0);
        let (dest_core, _) = strip_option(types.1);
        for core in [source_core, dest_core] {
            if core.type_info().kind() != ReflectKind::Struct {
                return Err(MapError::NotNestable {
                    ty: core.ty().path(),
                });
            }
        }

        let nested = Self::discover(
            self.model.clone(),
            source_core.ty(),
            dest_core.ty(),
            self.options,
        )?;

        let mut data = self.write();
        let replaced = data.keys_where(|entry| entry.dest() == &dest);
        data.remove(&replaced);
        let key = data.insert(self.id, source, dest, types, true);
        data.nested.insert(key, nested.clone());
        Ok(nested)
    }

    /// Ignores every entry the selector refers to.
    pub fn ignore(&self, selector: impl Into<MemberSelector>) -> Result<(), MapError> {
        self.set_ignored(selector.into(), true)
    }

    pub fn unignore(&self, selector: impl Into<MemberSelector>) -> Result<(), MapError> {
        self.set_ignored(selector.into(), false)
    }

    /// Removes every entry the selector refers to, with their nested sets.
    ///
    /// Returns `false` if nothing matched.
    pub fn remove(&self, selector: impl Into<MemberSelector>) -> Result<bool, MapError> {
        let mut data = self.write();
        let keys = self.matching(&data, &selector.into())?;
        data.remove(&keys);
        Ok(!keys.is_empty())
    }

    pub fn ignore_entry(&self, id: EntryId) -> Result<(), MapError> {
        self.set_entry_ignored(id, true)
    }

    pub fn unignore_entry(&self, id: EntryId) -> Result<(), MapError> {
        self.set_entry_ignored(id, false)
    }

    /// Removes an entry and returns it, its id becomes stale.
    pub fn remove_entry(&self, id: EntryId) -> Result<MappingEntry, MapError> {
        let mut data = self.write();
        let key = self.key_of(&data, id)?;
        let entry = data.entries[key].clone();
        data.remove(&[key]);
        Ok(entry)
    }

    /// The nested set of a complex entry.
    pub fn nested(&self, id: EntryId) -> Result<Option<MappingSet>, MapError> {
        let data = self.read();
        let key = self.key_of(&data, id)?;
        Ok(data.nested.get(key).cloned())
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut data = self.write();
        data.entries.clear();
        data.nested.clear();
        data.order.clear();
    }

    /// Non-ignored entries with their nested sets, taken under one lock.
    pub(crate) fn plan(&self) -> Vec<(MappingEntry, Option<MappingSet>)> {
        let data = self.read();
        data.order
            .iter()
            .filter_map(|&key| {
                let entry = data.entries.get(key)?;
                (!entry.is_ignored()).then(|| (entry.clone(), data.nested.get(key).cloned()))
            })
            .collect()
    }
}

impl fmt::Debug for MappingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self.entries().iter().map(ToString::to_string).collect();
        f.debug_struct("MappingSet")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("dest", &self.dest)
            .field("entries", &entries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use vc_reflect::derive::Reflect;
    use vc_reflect::info::{AccessorInfo, MethodInfo, Type, ValueType};

    use crate::member::Member;
    use crate::{MapError, Mapper};

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Order {
        pub id: u64,
        pub total: f64,
        pub note: String,
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Invoice {
        pub id: u64,
        pub amount: f64,
        pub note: String,
    }

    #[test]
    fn add_replaces_same_destination() {
        let mapper = Mapper::new();
        let set = mapper.resolve::<Order, Invoice>().unwrap();
        assert_eq!(set.len(), 2);

        let id = set.add("total", "amount").unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.entry(id).unwrap().source().name(), "total");

        set.add("id", "amount").unwrap();
        assert_eq!(set.len(), 3);
        assert!(matches!(set.entry(id), Err(MapError::StaleEntry(_))));
    }

    #[test]
    fn selectors() {
        let mapper = Mapper::new();
        let set = mapper.resolve::<Order, Invoice>().unwrap();

        assert!(matches!(set.add("", "id"), Err(MapError::EmptyMemberName)));
        assert!(matches!(
            set.add("missing", "id"),
            Err(MapError::MemberNotFound { .. })
        ));
        assert!(matches!(set.ignore("missing"), Err(MapError::MemberNotFound { .. })));
        assert!(!set.remove("missing").unwrap());

        let note = Member::of::<Order>("note").unwrap();
        assert!(set.find(&note).unwrap().is_some());
        set.ignore(note).unwrap();
        assert!(set.find("note").unwrap().unwrap().is_ignored());

        let foreign = Member::of::<Invoice>("amount").unwrap();
        assert!(matches!(
            set.add(foreign, "id"),
            Err(MapError::OwnerMismatch { .. })
        ));
    }

    #[test]
    fn entry_handles() {
        let mapper = Mapper::new();
        let set = mapper.resolve::<Order, Invoice>().unwrap();
        let other = mapper.resolve::<Invoice, Order>().unwrap();

        let id = set.find("id").unwrap().unwrap().id();
        assert!(matches!(other.ignore_entry(id), Err(MapError::OwnerMismatch { .. })));

        set.ignore_entry(id).unwrap();
        assert!(set.entry(id).unwrap().is_ignored());
        set.unignore_entry(id).unwrap();

        let removed = set.remove_entry(id).unwrap();
        assert_eq!(removed.dest().name(), "id");
        assert!(matches!(set.remove_entry(id), Err(MapError::StaleEntry(_))));

        set.clear();
        assert!(set.is_empty());
        assert!(mapper.resolve::<Order, Invoice>().unwrap().is_empty());
    }

    #[test]
    fn scalars_are_not_nestable() {
        let mapper = Mapper::new();
        let set = mapper.resolve::<Order, Invoice>().unwrap();
        assert!(matches!(
            set.complex("note", "note"),
            Err(MapError::NotNestable { .. })
        ));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn malformed_accessors() {
        let mapper = Mapper::new();
        let set = mapper.resolve::<Order, Invoice>().unwrap();
        let invoice = Type::of::<Invoice>();

        let touch = MethodInfo::dynamic_setter("touch", invoice, Vec::<ValueType>::new(), |_, _| Ok(()));
        let touch = Member::accessor(invoice, AccessorInfo::new("Touch").with_setter(touch));
        assert!(matches!(
            set.add("note", touch),
            Err(MapError::MalformedAccessor {
                name: "Touch",
                reason: "setter must take exactly one parameter",
                ..
            })
        ));

        let line = MethodInfo::indexed_setter::<Invoice, usize, String, _>("set_line", |_, _, _| {});
        let line = Member::accessor(invoice, AccessorInfo::new("Line").with_setter(line));
        assert!(matches!(
            set.add("note", line),
            Err(MapError::UnsupportedMember { name: "Line", .. })
        ));
        assert_eq!(set.len(), 2);
    }
}
