use crate::info::{TypeInfo, TypePath};

/// A static accessor to compile-time type information.
///
/// Usually implemented by [`#[derive(Reflect)]`](crate::derive::Reflect),
/// which stores the [`TypeInfo`] in a [`NonGenericTypeInfoCell`].
///
/// ```
/// use vc_reflect::info::{Typed, ReflectKind};
///
/// let info = <Option<u8> as Typed>::type_info();
/// assert_eq!(info.kind(), ReflectKind::Optional);
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
pub trait Typed: TypePath {
    /// Returns the compile-time info for the underlying type.
    fn type_info() -> &'static TypeInfo;
}

/// Dynamic dispatch version of [`Typed`], implemented for every [`Typed`] type.
pub trait DynamicTyped {
    /// See [`Typed::type_info`].
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
