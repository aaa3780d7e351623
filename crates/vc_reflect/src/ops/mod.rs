//! Kind specific views of reflected values, and their errors.

// -----------------------------------------------------------------------------
// Modules

mod clone_error;
mod enum_ops;
mod invoke_error;
mod kind;
mod optional_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use clone_error::ReflectCloneError;
pub use enum_ops::Enum;
pub use invoke_error::InvokeError;
pub use kind::{ReflectMut, ReflectOwned, ReflectRef};
pub use optional_ops::Optional;
pub use struct_ops::{Struct, struct_debug};
