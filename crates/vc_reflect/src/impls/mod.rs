//! Reflection for foreign types and helpers shared by derived impls.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod option;
mod primitives;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeCell, GenericTypeInfoCell, GenericTypePathCell};
pub use cell::{NonGenericTypeInfoCell, concat};
