use thiserror::Error;

/// Error outcomes of [`Reflect::reflect_clone`](crate::Reflect::reflect_clone).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReflectCloneError {
    /// The type does not support clone.
    #[error("`reflect_clone` not supported for `{type_path}`")]
    NotSupported { type_path: &'static str },
    /// The clone of a field produced a value of another type.
    #[error("field `{type_path}::{field}` cannot be cloned")]
    FieldNotCloneable {
        type_path: &'static str,
        field: &'static str,
    },
}
