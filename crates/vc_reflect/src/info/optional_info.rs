use crate::Reflect;
use crate::info::{Type, TypePath, Typed, ValueType};
use crate::registry::GetTypeMeta;

/// Type info of `Option<T>`.
///
/// ```
/// use vc_reflect::info::Typed;
///
/// let info = <Option<i32> as Typed>::type_info().as_optional().unwrap();
/// assert!(info.inner().ty().is::<i32>());
///
/// let some = info.wrap(Box::new(3_i32)).unwrap();
/// assert_eq!(some.take::<Option<i32>>().unwrap(), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct OptionalInfo {
    ty: Type,
    inner: ValueType,
    wrap: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
    none: fn() -> Box<dyn Reflect>,
}

impl OptionalInfo {
    pub fn new<T>() -> Self
    where
        T: Reflect + Typed + GetTypeMeta,
        Option<T>: TypePath,
    {
        Self {
            ty: Type::of::<Option<T>>(),
            inner: ValueType::of::<T>(),
            wrap: |value| {
                value
                    .take::<T>()
                    .map(|value| Box::new(Some(value)) as Box<dyn Reflect>)
            },
            none: || Box::new(None::<T>),
        }
    }

    #[inline(always)]
    pub fn ty(&self) -> Type {
        self.ty
    }

    #[inline(always)]
    pub fn inner(&self) -> &ValueType {
        &self.inner
    }

    /// Wraps a value of the inner type into `Some`.
    ///
    /// The value is handed back if it has another type.
    #[inline]
    pub fn wrap(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap)(value)
    }

    /// Creates a `None`.
    #[inline]
    pub fn none(&self) -> Box<dyn Reflect> {
        (self.none)()
    }
}
