//! Value conversion helpers shared by the strategies.

use core::fmt;

use thiserror::Error;
use vc_reflect::Reflect;
use vc_reflect::info::{EnumInfo, Type};
use vc_reflect::ops::ReflectRef;
use vc_reflect::registry::{BoxError, TypeTraitConvertible, TypeTraitDisplay};
use vc_reflect::scalar::{Scalar, ScalarError};

use crate::strategy::StrategyKind;

// -----------------------------------------------------------------------------
// ConvertError

/// A conversion strategy failed.
///
/// Whatever the strategy, the original failure is kept as the error
/// [`source`](core::error::Error::source).
#[derive(Debug, Error)]
#[error("cannot convert `{from}` to `{to}` with the {strategy} strategy")]
pub struct ConvertError {
    pub from: &'static str,
    pub to: &'static str,
    pub strategy: StrategyKind,
    #[source]
    pub cause: BoxError,
}

// -----------------------------------------------------------------------------
// Stringify

/// Renders values as text for the strategies that go through a string.
///
/// Uses the source type's [`TypeTraitDisplay`] if it has one, the variant
/// name for enums, and the reflected `Debug` output otherwise.
#[derive(Clone, Default)]
pub struct Stringify {
    display: Option<TypeTraitDisplay>,
}

impl Stringify {
    #[inline]
    pub fn new(display: Option<TypeTraitDisplay>) -> Self {
        Self { display }
    }

    pub fn render(&self, value: &dyn Reflect) -> String {
        if let Some(text) = self.display.as_ref().and_then(|d| d.to_string(value)) {
            return text;
        }
        match value.reflect_ref() {
            ReflectRef::Enum(value) => value.variant_name().to_owned(),
            _ => format!("{value:?}"),
        }
    }
}

impl fmt::Debug for Stringify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stringify")
            .field("display", &self.display.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Enum conversion

fn unknown_variant(info: &EnumInfo, value: impl ToString) -> ScalarError {
    ScalarError::InvalidFormat {
        value: value.to_string(),
        target: info.ty().path(),
    }
}

/// Selects a variant by name, ignoring ASCII case.
pub(crate) fn enum_from_text(info: &EnumInfo, text: &str) -> Result<Box<dyn Reflect>, ScalarError> {
    info.from_name_ignore_case(text)
        .ok_or_else(|| unknown_variant(info, text))
}

/// Selects a variant by discriminant, integers without a variant are rejected.
pub(crate) fn enum_from_integer(
    info: &EnumInfo,
    source: &TypeTraitConvertible,
    value: &dyn Reflect,
) -> Result<Box<dyn Reflect>, ScalarError> {
    let scalar = scalar_of(source, value)?;
    scalar
        .as_i128()
        .and_then(|discriminant| info.from_discriminant(discriminant))
        .ok_or_else(|| unknown_variant(info, &scalar))
}

/// Turns a source value into a scalar.
pub(crate) fn scalar_of(source: &TypeTraitConvertible, value: &dyn Reflect) -> Result<Scalar, ScalarError> {
    source
        .to_scalar(value)
        .ok_or_else(|| ScalarError::InvalidCast {
            from: value.reflect_type_path(),
            target: source.type_path(),
        })
}

/// Scalar conversion from `value` to `dest`.
///
/// An enum converted to text gives its variant name rather than its
/// discriminant.
pub(crate) fn change_type(
    source: &TypeTraitConvertible,
    target: Option<&TypeTraitConvertible>,
    value: &dyn Reflect,
    dest: Type,
) -> Result<Box<dyn Reflect>, ScalarError> {
    let scalar = match value.reflect_ref() {
        ReflectRef::Enum(value) if dest.is::<String>() => Scalar::Str(value.variant_name().to_owned()),
        _ => scalar_of(source, value)?,
    };
    let target = target.ok_or(ScalarError::InvalidCast {
        from: scalar.kind(),
        target: dest.path(),
    })?;
    target.from_scalar(scalar)
}
