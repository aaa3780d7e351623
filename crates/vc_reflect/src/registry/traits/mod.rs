// -----------------------------------------------------------------------------
// Modules

mod convertible;
mod converter;
mod default;
mod display;
mod from_str;

// -----------------------------------------------------------------------------
// Exports

pub use convertible::TypeTraitConvertible;
pub use converter::{BoxError, TypeConverter, TypeTraitConverter};
pub use default::TypeTraitDefault;
pub use display::TypeTraitDisplay;
pub use from_str::TypeTraitFromStr;
