use core::any::TypeId;

use thiserror::Error;
use vc_reflect::ops::InvokeError;

use crate::convert::ConvertError;
use crate::entry::EntryId;

// -----------------------------------------------------------------------------
// AccessError

/// Failures of the type model while reading or writing a member.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccessError {
    #[error(transparent)]
    Invoke(#[from] InvokeError),

    #[error("instance of `{received}` used with a member of `{expected}`")]
    Receiver {
        expected: &'static str,
        received: &'static str,
    },

    #[error("`{ty}` has no reflected field `{field}`")]
    MissingField { ty: &'static str, field: &'static str },

    #[error("field `{field}` holds `{expected}`, received `{received}`")]
    FieldType {
        field: &'static str,
        expected: &'static str,
        received: &'static str,
    },
}

// -----------------------------------------------------------------------------
// MapError

/// Every error a mapping call or a mapping configuration can raise.
///
/// Configuration errors are raised by the call that supplies the bad input.
/// Mapping errors stop the current call, writes made before the failure
/// are kept.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MapError {
    #[error("member name must not be empty")]
    EmptyMemberName,

    #[error("`{ty}` has no member named `{name}`")]
    MemberNotFound { ty: &'static str, name: String },

    #[error("`{handle}` does not belong to the mapping `{source_ty}` -> `{dest_ty}`")]
    OwnerMismatch {
        handle: String,
        source_ty: &'static str,
        dest_ty: &'static str,
    },

    #[error("entry {0:?} has been removed")]
    StaleEntry(EntryId),

    #[error("member `{ty}::{name}` is indexed and cannot be mapped")]
    UnsupportedMember { ty: &'static str, name: &'static str },

    #[error("`{ty}` is not a struct and cannot be mapped as a nested object")]
    NotNestable { ty: &'static str },

    #[error("type {type_id:?} is not registered")]
    UnregisteredType { type_id: TypeId },

    #[error("`{0}` is not a struct")]
    NotAStruct(&'static str),

    #[error("accessor `{ty}::{name}` {reason}")]
    MalformedAccessor {
        ty: &'static str,
        name: &'static str,
        reason: &'static str,
    },

    #[error("cannot convert member `{member}`")]
    Conversion {
        member: &'static str,
        #[source]
        source: ConvertError,
    },

    #[error("`{0}` cannot be default constructed")]
    NoDefault(&'static str),

    #[error("expected a `{expected}`, the type model produced a `{received}`")]
    TypeMismatch {
        expected: &'static str,
        received: &'static str,
    },

    #[error("cannot access member `{member}`")]
    Access {
        member: &'static str,
        #[source]
        source: AccessError,
    },

    #[error("nested mapping exceeds the maximum depth of {0}")]
    DepthExceeded(usize),

    #[error("source value is absent")]
    AbsentSource,
}
