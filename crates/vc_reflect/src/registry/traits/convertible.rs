use crate::Reflect;
use crate::info::{TypePath, Typed};
use crate::registry::FromType;
use crate::scalar::{Convertible, Scalar, ScalarError};

/// Provides conversion through [`Scalar`], the universal coercion between
/// numbers, booleans, characters and text.
///
/// ```
/// use vc_reflect::registry::{FromType, TypeTraitConvertible};
///
/// let from_i32 = <TypeTraitConvertible as FromType<i32>>::from_type();
/// let to_f64 = <TypeTraitConvertible as FromType<f64>>::from_type();
///
/// let scalar = from_i32.to_scalar(&30_i32).unwrap();
/// let value = to_f64.from_scalar(scalar).unwrap();
/// assert_eq!(value.take::<f64>().unwrap(), 30.0);
/// ```
#[derive(Clone)]
pub struct TypeTraitConvertible {
    type_path: fn() -> &'static str,
    to_scalar: fn(&dyn Reflect) -> Option<Scalar>,
    from_scalar: fn(Scalar) -> Result<Box<dyn Reflect>, ScalarError>,
}

impl TypeTraitConvertible {
    /// Converts `value` to a scalar, or returns `None` if it has another type.
    #[inline(always)]
    pub fn to_scalar(&self, value: &dyn Reflect) -> Option<Scalar> {
        (self.to_scalar)(value)
    }

    /// Builds a value of the type the trait was created for.
    #[inline(always)]
    pub fn from_scalar(&self, scalar: Scalar) -> Result<Box<dyn Reflect>, ScalarError> {
        (self.from_scalar)(scalar)
    }

    /// Path of the type the trait was created for.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        (self.type_path)()
    }
}

impl<T: Convertible + Typed + Reflect> FromType<T> for TypeTraitConvertible {
    fn from_type() -> Self {
        Self {
            type_path: <T as TypePath>::type_path,
            to_scalar: |value| value.downcast_ref::<T>().map(Convertible::to_scalar),
            from_scalar: |scalar| {
                T::from_scalar(scalar).map(|value| Box::new(value) as Box<dyn Reflect>)
            },
        }
    }
}
