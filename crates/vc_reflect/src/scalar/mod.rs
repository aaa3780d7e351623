//! Universal coercion between primitive values.
//!
//! A [`Convertible`] type can turn itself into a [`Scalar`] and be built
//! back from any scalar. Conversions follow these rules:
//!
//! - integers are range checked, never truncated;
//! - floats convert to integers rounding half to even;
//! - `bool` is `1`/`0` as a number, and any non-zero number is `true`;
//! - text is trimmed and parsed, `bool` accepts `true`/`false` in any case;
//! - every value converts to text.
//!
//! ```
//! use vc_reflect::scalar::{Convertible, Scalar};
//!
//! assert_eq!(i32::from_scalar(Scalar::Float(2.5)).unwrap(), 2);
//! assert_eq!(i32::from_scalar(Scalar::Float(3.5)).unwrap(), 4);
//! assert_eq!(u8::from_scalar(Scalar::Str(" 42 ".into())).unwrap(), 42);
//! assert!(u8::from_scalar(Scalar::Int(300)).is_err());
//! assert_eq!(String::from_scalar(Scalar::Bool(true)).unwrap(), "true");
//! ```

// -----------------------------------------------------------------------------
// Modules

mod convertible;
mod enums;
mod error;
mod scalar;

// -----------------------------------------------------------------------------
// Exports

pub use convertible::Convertible;
pub use enums::enum_from_scalar;
pub use error::ScalarError;
pub use scalar::Scalar;
