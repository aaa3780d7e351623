use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{Enum, Optional, Struct};

macro_rules! impl_kind_fns {
    ($ty:ident $(<$lt:lifetime>)?, $( $kind:ident => $as_fn:ident : $target:ty ),* $(,)?) => {
        impl $(<$lt>)? $ty $(<$lt>)? {
            /// Returns the [`ReflectKind`] of the view.
            pub fn kind(&self) -> ReflectKind {
                match self {
                    $( Self::$kind(_) => ReflectKind::$kind, )*
                    Self::Opaque(_) => ReflectKind::Opaque,
                }
            }

            $(
                #[doc = concat!("Returns the inner value if this is a `", stringify!($kind), "` view.")]
                pub fn $as_fn(self) -> Option<$target> {
                    match self {
                        Self::$kind(value) => Some(value),
                        _ => None,
                    }
                }
            )*
        }
    };
}

/// An immutable kind specific view of a reflected value.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    Enum(&'a dyn Enum),
    Optional(&'a dyn Optional),
    Opaque(&'a dyn Reflect),
}

/// A mutable kind specific view of a reflected value.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    Enum(&'a mut dyn Enum),
    Optional(&'a mut dyn Optional),
    Opaque(&'a mut dyn Reflect),
}

/// An owned kind specific view of a reflected value.
pub enum ReflectOwned {
    Struct(Box<dyn Struct>),
    Enum(Box<dyn Enum>),
    Optional(Box<dyn Optional>),
    Opaque(Box<dyn Reflect>),
}

impl_kind_fns!(ReflectRef<'a>,
    Struct => as_struct: &'a dyn Struct,
    Enum => as_enum: &'a dyn Enum,
    Optional => as_optional: &'a dyn Optional,
);

impl_kind_fns!(ReflectMut<'a>,
    Struct => as_struct: &'a mut dyn Struct,
    Enum => as_enum: &'a mut dyn Enum,
    Optional => as_optional: &'a mut dyn Optional,
);

impl_kind_fns!(ReflectOwned,
    Struct => into_struct: Box<dyn Struct>,
    Enum => into_enum: Box<dyn Enum>,
    Optional => into_optional: Box<dyn Optional>,
);
