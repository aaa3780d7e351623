use core::fmt;

use crate::Reflect;

/// A reflected struct with named fields.
///
/// ```
/// use vc_reflect::{Reflect, derive::Reflect, ops::Struct};
///
/// #[derive(Reflect)]
/// struct User { pub name: String, pub age: u32 }
///
/// let mut user = User { name: "Ann".into(), age: 30 };
///
/// assert_eq!(user.field_len(), 2);
/// assert_eq!(user.name_at(1), Some("age"));
///
/// user.field_mut("age").unwrap().set(Box::new(31_u32)).unwrap();
/// assert_eq!(user.age, 31);
/// ```
pub trait Struct: Reflect {
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn name_at(&self, index: usize) -> Option<&str>;

    fn field_len(&self) -> usize;
}

/// Debug formatter shared by derived structs.
pub fn struct_debug(value: &dyn Struct, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut builder = f.debug_struct(value.reflect_type_name());
    for index in 0..value.field_len() {
        if let (Some(name), Some(field)) = (value.name_at(index), value.field_at(index)) {
            builder.field(name, &field as &dyn fmt::Debug);
        }
    }
    builder.finish()
}
