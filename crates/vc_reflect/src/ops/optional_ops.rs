use crate::Reflect;

/// A reflected `Option<T>`.
///
/// ```
/// use vc_reflect::{Reflect, ops::Optional};
///
/// let value: Box<dyn Reflect> = Box::new(Some(5_i32));
/// let optional = value.reflect_owned().into_optional().unwrap();
///
/// let inner = optional.into_value().unwrap();
/// assert_eq!(inner.take::<i32>().unwrap(), 5);
/// ```
pub trait Optional: Reflect {
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    fn into_value(self: Box<Self>) -> Option<Box<dyn Reflect>>;

    #[inline]
    fn is_none(&self) -> bool {
        self.value().is_none()
    }
}
