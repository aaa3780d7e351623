use core::str::FromStr;

use crate::Reflect;
use crate::info::Typed;
use crate::registry::FromType;

/// Provides try-parse construction from text, built on [`FromStr`].
///
/// A parse failure yields `None`, the error itself is dropped.
///
/// ```
/// use vc_reflect::registry::{FromType, TypeTraitFromStr};
///
/// let parse = <TypeTraitFromStr as FromType<f32>>::from_type();
/// assert_eq!(parse.parse("2.5").unwrap().take::<f32>().unwrap(), 2.5);
/// assert!(parse.parse("two").is_none());
/// ```
#[derive(Clone)]
pub struct TypeTraitFromStr {
    func: fn(&str) -> Option<Box<dyn Reflect>>,
}

impl TypeTraitFromStr {
    #[inline(always)]
    pub fn parse(&self, text: &str) -> Option<Box<dyn Reflect>> {
        (self.func)(text)
    }
}

impl<T: FromStr + Typed + Reflect> FromType<T> for TypeTraitFromStr {
    fn from_type() -> Self {
        Self {
            func: |text| {
                text.parse::<T>()
                    .ok()
                    .map(|value| Box::new(value) as Box<dyn Reflect>)
            },
        }
    }
}
