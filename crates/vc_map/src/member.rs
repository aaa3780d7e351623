use core::fmt;

use vc_reflect::info::{AccessorInfo, NamedField, Type, TypeInfo, Typed, ValueType, Visibility};

use crate::MapError;

// -----------------------------------------------------------------------------
// Member

/// Whether a member is a data field or a getter/setter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Accessor,
}

/// The introspection handle behind a [`Member`].
#[derive(Debug, Clone)]
pub enum MemberHandle {
    Field(NamedField),
    Accessor(AccessorInfo),
}

/// A member of a reflected struct, as listed by a [`TypeModel`].
///
/// Two members are equal when they have the same owner, name and kind.
///
/// [`TypeModel`]: crate::model::TypeModel
#[derive(Debug, Clone)]
pub struct Member {
    owner: Type,
    handle: MemberHandle,
}

impl Member {
    #[inline]
    pub fn field(owner: Type, field: NamedField) -> Self {
        Self {
            owner,
            handle: MemberHandle::Field(field),
        }
    }

    #[inline]
    pub fn accessor(owner: Type, accessor: AccessorInfo) -> Self {
        Self {
            owner,
            handle: MemberHandle::Accessor(accessor),
        }
    }

    /// Looks up the field, or else the accessor, `name` of `T`.
    ///
    /// ```
    /// use vc_map::member::{Member, MemberKind};
    /// use vc_reflect::derive::Reflect;
    ///
    /// #[derive(Reflect)]
    /// struct User { pub name: String }
    ///
    /// let member = Member::of::<User>("name").unwrap();
    /// assert_eq!(member.kind(), MemberKind::Field);
    /// assert!(Member::of::<User>("age").is_none());
    /// ```
    pub fn of<T: Typed>(name: &str) -> Option<Self> {
        Self::find(T::type_info(), name)
    }

    pub(crate) fn find(info: &TypeInfo, name: &str) -> Option<Self> {
        let info = info.as_struct().ok()?;
        let owner = info.ty();
        info.field(name)
            .map(|field| Self::field(owner, field.clone()))
            .or_else(|| {
                info.accessor(name)
                    .map(|accessor| Self::accessor(owner, accessor.clone()))
            })
    }

    /// The type declaring this member.
    #[inline(always)]
    pub fn owner(&self) -> Type {
        self.owner
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match &self.handle {
            MemberHandle::Field(field) => field.name(),
            MemberHandle::Accessor(accessor) => accessor.name(),
        }
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        match self.handle {
            MemberHandle::Field(_) => MemberKind::Field,
            MemberHandle::Accessor(_) => MemberKind::Accessor,
        }
    }

    #[inline(always)]
    pub fn handle(&self) -> &MemberHandle {
        &self.handle
    }

    /// Declared type of the value read from this member.
    ///
    /// `None` for accessors without getter or with a getter returning nothing.
    pub fn read_type(&self) -> Option<ValueType> {
        match &self.handle {
            MemberHandle::Field(field) => Some(*field.value_type()),
            MemberHandle::Accessor(accessor) => accessor.getter()?.ret().copied(),
        }
    }

    /// Declared type of the value written to this member.
    ///
    /// For setters this is the last parameter.
    pub fn write_type(&self) -> Option<ValueType> {
        match &self.handle {
            MemberHandle::Field(field) => Some(*field.value_type()),
            MemberHandle::Accessor(accessor) => accessor.setter()?.params().last().copied(),
        }
    }

    pub fn is_indexed(&self) -> bool {
        match &self.handle {
            MemberHandle::Field(_) => false,
            MemberHandle::Accessor(accessor) => accessor.is_indexed(),
        }
    }

    /// Visibility of reading, `None` if the member cannot be read at all.
    pub fn read_visibility(&self) -> Option<Visibility> {
        match &self.handle {
            MemberHandle::Field(field) => Some(field.read_visibility()),
            MemberHandle::Accessor(accessor) => accessor.getter().map(|m| m.visibility()),
        }
    }

    /// Visibility of writing, `None` if the member cannot be written at all.
    pub fn write_visibility(&self) -> Option<Visibility> {
        match &self.handle {
            MemberHandle::Field(field) => Some(field.write_visibility()),
            MemberHandle::Accessor(accessor) => accessor.setter().map(|m| m.visibility()),
        }
    }

    fn malformed(&self, reason: &'static str) -> MapError {
        MapError::MalformedAccessor {
            ty: self.owner.path(),
            name: self.name(),
            reason,
        }
    }

    fn unsupported(&self) -> MapError {
        MapError::UnsupportedMember {
            ty: self.owner.path(),
            name: self.name(),
        }
    }

    /// Checks the member can be read from and returns its declared type.
    pub(crate) fn checked_read_type(&self) -> Result<ValueType, MapError> {
        let MemberHandle::Accessor(accessor) = &self.handle else {
            return self.read_type().ok_or_else(|| self.unsupported());
        };
        if accessor.is_indexed() {
            return Err(self.unsupported());
        }
        // Not indexed, so the getter takes no parameters.
        let getter = accessor
            .getter()
            .ok_or_else(|| self.malformed("has no getter"))?;
        getter
            .ret()
            .copied()
            .ok_or_else(|| self.malformed("getter returns nothing"))
    }

    /// Checks the member can be written to and returns its declared type.
    pub(crate) fn checked_write_type(&self) -> Result<ValueType, MapError> {
        let MemberHandle::Accessor(accessor) = &self.handle else {
            return self.write_type().ok_or_else(|| self.unsupported());
        };
        if accessor.is_indexed() {
            return Err(self.unsupported());
        }
        let setter = accessor
            .setter()
            .ok_or_else(|| self.malformed("has no setter"))?;
        match setter.params() {
            [value] => Ok(*value),
            _ => Err(self.malformed("setter must take exactly one parameter")),
        }
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.kind() == other.kind() && self.name() == other.name()
    }
}

impl Eq for Member {}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.owner.name(), self.name())
    }
}

/// Splits one `Option` layer off a value type.
///
/// Returns the inner type and whether a layer was removed.
pub(crate) fn strip_option(value_type: ValueType) -> (ValueType, bool) {
    match value_type.type_info() {
        TypeInfo::Optional(info) => (*info.inner(), true),
        _ => (value_type, false),
    }
}

// -----------------------------------------------------------------------------
// MemberSelector

/// Names a member in a mapping rule: by name or by [`Member`] handle.
///
/// ```
/// use vc_map::member::MemberSelector;
///
/// let selector = MemberSelector::from("company");
/// assert!(matches!(selector, MemberSelector::Name(ref name) if name == "company"));
/// ```
#[derive(Debug, Clone)]
pub enum MemberSelector {
    Name(String),
    Member(Member),
}

impl From<&str> for MemberSelector {
    #[inline]
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for MemberSelector {
    #[inline]
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Member> for MemberSelector {
    #[inline]
    fn from(member: Member) -> Self {
        Self::Member(member)
    }
}

impl From<&Member> for MemberSelector {
    #[inline]
    fn from(member: &Member) -> Self {
        Self::Member(member.clone())
    }
}

impl fmt::Display for MemberSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Member(member) => fmt::Display::fmt(member, f),
        }
    }
}
