use core::fmt::Display;

use crate::Reflect;
use crate::info::Typed;
use crate::registry::FromType;

/// Provides conversion to text, built on [`Display`].
#[derive(Clone)]
pub struct TypeTraitDisplay {
    func: fn(&dyn Reflect) -> Option<String>,
}

impl TypeTraitDisplay {
    /// Formats `value`, or returns `None` if it has another type.
    #[inline(always)]
    pub fn to_string(&self, value: &dyn Reflect) -> Option<String> {
        (self.func)(value)
    }
}

impl<T: Display + Typed + Reflect> FromType<T> for TypeTraitDisplay {
    fn from_type() -> Self {
        Self {
            func: |value| value.downcast_ref::<T>().map(ToString::to_string),
        }
    }
}
