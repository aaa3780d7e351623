use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{ReflectCloneError, ReflectMut, ReflectOwned, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait of runtime reflection.
///
/// It gives type-erased access to a value: its type information, its
/// [kind](ReflectKind) specific view ([`Struct`], [`Enum`], [`Optional`])
/// and basic operations such as replacing or cloning it.
///
/// Use [`#[derive(Reflect)]`](crate::derive::Reflect) rather than
/// implementing it by hand.
///
/// ## Type identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` returns the id of the box.
/// Use [`Reflect::ty_id`] instead:
///
/// ```
/// # use core::any::TypeId;
/// # use vc_reflect::Reflect;
/// let x: Box<dyn Reflect> = Box::new(32_i32);
/// assert_eq!(x.ty_id(), TypeId::of::<i32>());
/// ```
///
/// ## Downcasting
///
/// ```
/// # use vc_reflect::Reflect;
/// let x: Box<dyn Reflect> = Box::new(String::from("hi"));
/// assert_eq!(x.downcast_ref::<String>().unwrap(), "hi");
/// assert_eq!(x.take::<String>().unwrap(), "hi");
/// ```
///
/// [`Struct`]: crate::ops::Struct
/// [`Enum`]: crate::ops::Enum
/// [`Optional`]: crate::ops::Optional
pub trait Reflect: DynamicTypePath + DynamicTyped + Send + Sync + Any {
    /// Casts this type to a reflected value.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable reflected value.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline(always)]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Replaces `self` with `value` if the types match.
    ///
    /// The value is handed back otherwise.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn reflect_kind(&self) -> ReflectKind;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    fn reflect_owned(self: Box<Self>) -> ReflectOwned;

    /// Clones the value into a new box of the same concrete type.
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError>;

    /// Debug formatter of the value.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }

    /// Downcasts the box, returning it unchanged on failure.
    pub fn downcast<T: Any>(self: Box<Self>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            any.downcast::<T>()
                .map_err(|_| unreachable!("type id was checked"))
        } else {
            Err(self)
        }
    }

    /// Downcasts the box and moves the value out of it.
    #[inline]
    pub fn take<T: Any>(self: Box<Self>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}
