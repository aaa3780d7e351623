use crate::info::{Type, ValueType};

/// Access level of a member operation.
///
/// Fields and accessor methods carry one for reading and one for writing.
/// Only [`Visibility::Public`] members take part in automatic discovery;
/// restricted ones can still be written when the caller opts in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Restricted,
}

impl Visibility {
    #[inline]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Type information of a named field.
///
/// ```
/// use vc_reflect::info::{NamedField, Visibility};
///
/// let field = NamedField::new::<String>("name")
///     .with_write_visibility(Visibility::Restricted);
///
/// assert_eq!(field.name(), "name");
/// assert!(field.ty().is::<String>());
/// assert!(field.read_visibility().is_public());
/// assert!(!field.write_visibility().is_public());
/// ```
#[derive(Debug, Clone)]
pub struct NamedField {
    name: &'static str,
    value_type: ValueType,
    read: Visibility,
    write: Visibility,
}

impl NamedField {
    /// Creates a public field of type `T`.
    #[inline]
    pub fn new<T: crate::info::Typed + crate::registry::GetTypeMeta>(name: &'static str) -> Self {
        Self {
            name,
            value_type: ValueType::of::<T>(),
            read: Visibility::Public,
            write: Visibility::Public,
        }
    }

    /// Sets both read and write visibility.
    #[inline]
    pub fn with_visibility(mut self, vis: Visibility) -> Self {
        self.read = vis;
        self.write = vis;
        self
    }

    #[inline]
    pub fn with_write_visibility(mut self, vis: Visibility) -> Self {
        self.write = vis;
        self
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline(always)]
    pub fn ty(&self) -> Type {
        self.value_type.ty()
    }

    #[inline(always)]
    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    #[inline(always)]
    pub fn read_visibility(&self) -> Visibility {
        self.read
    }

    #[inline(always)]
    pub fn write_visibility(&self) -> Visibility {
        self.write
    }
}
