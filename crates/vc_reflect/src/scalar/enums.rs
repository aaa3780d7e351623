use crate::Reflect;
use crate::info::Typed;
use crate::scalar::{Scalar, ScalarError};

/// Builds a variant of a reflected enum from a [`Scalar`].
///
/// Integers select the variant with that discriminant, text selects the
/// variant with that name ignoring ASCII case. Integers that match no
/// discriminant are rejected, the enum never holds an unnamed value.
///
/// Derived enums implement [`Convertible`](super::Convertible) with this.
///
/// ```
/// use vc_reflect::derive::Reflect;
/// use vc_reflect::scalar::{Scalar, enum_from_scalar};
///
/// #[derive(Reflect, Debug, PartialEq)]
/// enum Gender { Male, Female }
///
/// assert_eq!(enum_from_scalar::<Gender>(Scalar::UInt(1)), Ok(Gender::Female));
/// assert_eq!(enum_from_scalar::<Gender>(Scalar::Str("male".into())), Ok(Gender::Male));
/// assert!(enum_from_scalar::<Gender>(Scalar::Int(2)).is_err());
/// ```
pub fn enum_from_scalar<T: Typed + Reflect>(scalar: Scalar) -> Result<T, ScalarError> {
    let target = T::type_path();
    let invalid_cast = |scalar: &Scalar| ScalarError::InvalidCast {
        from: scalar.kind(),
        target,
    };

    let Ok(info) = T::type_info().as_enum() else {
        return Err(invalid_cast(&scalar));
    };

    let value = match &scalar {
        Scalar::Int(_) | Scalar::UInt(_) => scalar
            .as_i128()
            .and_then(|discriminant| info.from_discriminant(discriminant)),
        Scalar::Str(text) => info.from_name_ignore_case(text),
        _ => return Err(invalid_cast(&scalar)),
    };

    value
        .ok_or_else(|| ScalarError::InvalidFormat {
            value: scalar.to_string(),
            target,
        })?
        .take::<T>()
        .map_err(|_| invalid_cast(&scalar))
}
