use core::fmt;

use slotmap::new_key_type;
use vc_reflect::info::ValueType;

use crate::MapError;
use crate::member::Member;

new_key_type! {
    /// Slot of an entry inside its mapping set.
    pub struct EntryKey;
}

/// Identity of a [`MappingEntry`].
///
/// Stays valid until the entry is removed, a removed entry's id is never
/// reused by its set.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId {
    pub(crate) set: u64,
    pub(crate) key: EntryKey,
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({}, {:?})", self.set, self.key)
    }
}

/// One correspondence between a source member and a destination member.
///
/// Entries are values: the copy returned by a [`MappingSet`] is a snapshot,
/// changes go through the set and the entry's [`id`](Self::id).
///
/// [`MappingSet`]: crate::MappingSet
#[derive(Debug, Clone)]
pub struct MappingEntry {
    id: EntryId,
    source: Member,
    dest: Member,
    source_type: ValueType,
    dest_type: ValueType,
    ignored: bool,
    complex: bool,
}

/// Declared types of a member pair, checked for use as an entry.
pub(crate) fn entry_types(source: &Member, dest: &Member) -> Result<(ValueType, ValueType), MapError> {
    Ok((source.checked_read_type()?, dest.checked_write_type()?))
}

impl MappingEntry {
    pub(crate) fn new(
        id: EntryId,
        source: Member,
        dest: Member,
        (source_type, dest_type): (ValueType, ValueType),
        complex: bool,
    ) -> Self {
        Self {
            id,
            source,
            dest,
            source_type,
            dest_type,
            ignored: false,
            complex,
        }
    }

    #[inline(always)]
    pub fn id(&self) -> EntryId {
        self.id
    }

    #[inline(always)]
    pub fn source(&self) -> &Member {
        &self.source
    }

    #[inline(always)]
    pub fn dest(&self) -> &Member {
        &self.dest
    }

    /// Declared type read from the source member.
    #[inline(always)]
    pub fn source_type(&self) -> ValueType {
        self.source_type
    }

    /// Declared type written to the destination member.
    #[inline(always)]
    pub fn dest_type(&self) -> ValueType {
        self.dest_type
    }

    #[inline(always)]
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// Complex entries are mapped through a nested mapping set.
    #[inline(always)]
    pub fn is_complex(&self) -> bool {
        self.complex
    }

    #[inline]
    pub(crate) fn set_ignored(&mut self, ignored: bool) {
        self.ignored = ignored;
    }
}

impl fmt::Display for MappingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.dest)?;
        if self.complex {
            f.write_str(" (complex)")?;
        }
        if self.ignored {
            f.write_str(" (ignored)")?;
        }
        Ok(())
    }
}
