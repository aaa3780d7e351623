use crate::scalar::{Scalar, ScalarError};

/// Types taking part in the universal [`Scalar`] coercion.
pub trait Convertible: Sized {
    fn to_scalar(&self) -> Scalar;

    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError>;
}

fn overflow(value: impl ToString, target: &'static str) -> ScalarError {
    ScalarError::Overflow {
        value: value.to_string(),
        target,
    }
}

fn invalid_cast(scalar: &Scalar, target: &'static str) -> ScalarError {
    ScalarError::InvalidCast {
        from: scalar.kind(),
        target,
    }
}

fn parse<T: core::str::FromStr>(text: &str, target: &'static str) -> Result<T, ScalarError> {
    text.trim().parse::<T>().map_err(|_| ScalarError::InvalidFormat {
        value: text.to_owned(),
        target,
    })
}

macro_rules! impl_integer {
    ($($ty:ident),* $(,)?) => {$(
        impl Convertible for $ty {
            fn to_scalar(&self) -> Scalar {
                if <$ty>::MIN == 0 {
                    Scalar::UInt(*self as u128)
                } else {
                    Scalar::Int(*self as i128)
                }
            }

            fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
                const TARGET: &str = stringify!($ty);
                match scalar {
                    Scalar::Int(value) => <$ty>::try_from(value).map_err(|_| overflow(value, TARGET)),
                    Scalar::UInt(value) => <$ty>::try_from(value).map_err(|_| overflow(value, TARGET)),
                    Scalar::Bool(value) => Ok(<$ty>::from(value)),
                    Scalar::Char(value) => <$ty>::try_from(u32::from(value))
                        .map_err(|_| overflow(u32::from(value), TARGET)),
                    Scalar::Float(value) => {
                        let rounded = value.round_ties_even();
                        // `i128::MAX as f64` rounds up to 2^127, hence the strict bound.
                        if rounded.is_finite()
                            && rounded >= i128::MIN as f64
                            && rounded < i128::MAX as f64
                        {
                            <$ty>::try_from(rounded as i128).map_err(|_| overflow(value, TARGET))
                        } else {
                            Err(overflow(value, TARGET))
                        }
                    }
                    Scalar::Str(text) => parse(&text, TARGET),
                }
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ident),* $(,)?) => {$(
        impl Convertible for $ty {
            fn to_scalar(&self) -> Scalar {
                Scalar::Float(f64::from(*self))
            }

            fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
                const TARGET: &str = stringify!($ty);
                match scalar {
                    Scalar::Int(value) => Ok(value as $ty),
                    Scalar::UInt(value) => Ok(value as $ty),
                    Scalar::Float(value) => Ok(value as $ty),
                    Scalar::Bool(value) => Ok(if value { 1.0 } else { 0.0 }),
                    Scalar::Str(text) => parse(&text, TARGET),
                    other @ Scalar::Char(_) => Err(invalid_cast(&other, TARGET)),
                }
            }
        }
    )*};
}

impl_float!(f32, f64);

impl Convertible for bool {
    fn to_scalar(&self) -> Scalar {
        Scalar::Bool(*self)
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::Bool(value) => Ok(value),
            Scalar::Int(value) => Ok(value != 0),
            Scalar::UInt(value) => Ok(value != 0),
            Scalar::Float(value) => Ok(value != 0.0),
            Scalar::Str(text) => {
                let trimmed = text.trim();
                if trimmed.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(ScalarError::InvalidFormat {
                        value: text,
                        target: "bool",
                    })
                }
            }
            other @ Scalar::Char(_) => Err(invalid_cast(&other, "bool")),
        }
    }
}

impl Convertible for char {
    fn to_scalar(&self) -> Scalar {
        Scalar::Char(*self)
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::Char(value) => Ok(value),
            Scalar::Int(value) => u32::try_from(value)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| overflow(value, "char")),
            Scalar::UInt(value) => u32::try_from(value)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| overflow(value, "char")),
            Scalar::Str(text) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(value), None) => Ok(value),
                    _ => Err(ScalarError::InvalidFormat {
                        value: text,
                        target: "char",
                    }),
                }
            }
            other => Err(invalid_cast(&other, "char")),
        }
    }
}

impl Convertible for String {
    fn to_scalar(&self) -> Scalar {
        Scalar::Str(self.clone())
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        Ok(match scalar {
            Scalar::Str(text) => text,
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Convertible;
    use crate::scalar::{Scalar, ScalarError};

    #[test]
    fn integer_ranges() {
        assert_eq!(i8::from_scalar(Scalar::Int(-128)), Ok(-128));
        assert!(matches!(
            i8::from_scalar(Scalar::Int(128)),
            Err(ScalarError::Overflow { .. })
        ));
        assert!(u32::from_scalar(Scalar::Int(-1)).is_err());
        assert_eq!(u64::from_scalar(Scalar::UInt(u64::MAX as u128)), Ok(u64::MAX));
        assert_eq!((-5_i16).to_scalar(), Scalar::Int(-5));
        assert_eq!(5_u16.to_scalar(), Scalar::UInt(5));
    }

    #[test]
    fn float_to_integer_rounds_half_even() {
        assert_eq!(i64::from_scalar(Scalar::Float(0.5)), Ok(0));
        assert_eq!(i64::from_scalar(Scalar::Float(1.5)), Ok(2));
        assert_eq!(i64::from_scalar(Scalar::Float(-2.5)), Ok(-2));
        assert!(u8::from_scalar(Scalar::Float(255.6)).is_err());
        assert!(i32::from_scalar(Scalar::Float(f64::NAN)).is_err());
    }

    #[test]
    fn text_conversions() {
        assert_eq!(f64::from_scalar(Scalar::Str("1.25".into())), Ok(1.25));
        assert!(matches!(
            i32::from_scalar(Scalar::Str("abc".into())),
            Err(ScalarError::InvalidFormat { .. })
        ));
        assert_eq!(bool::from_scalar(Scalar::Str("TRUE".into())), Ok(true));
        assert_eq!(char::from_scalar(Scalar::Str("x".into())), Ok('x'));
        assert!(char::from_scalar(Scalar::Str("xy".into())).is_err());
        assert_eq!(String::from_scalar(Scalar::Int(-3)), Ok("-3".to_owned()));
    }

    #[test]
    fn booleans_and_chars() {
        assert_eq!(u8::from_scalar(Scalar::Bool(true)), Ok(1));
        assert_eq!(f32::from_scalar(Scalar::Bool(false)), Ok(0.0));
        assert_eq!(bool::from_scalar(Scalar::Int(-7)), Ok(true));
        assert_eq!(u32::from_scalar(Scalar::Char('A')), Ok(65));
        assert!(matches!(
            f64::from_scalar(Scalar::Char('A')),
            Err(ScalarError::InvalidCast { .. })
        ));
    }
}
