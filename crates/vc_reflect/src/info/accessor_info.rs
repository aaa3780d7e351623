use core::any::TypeId;
use core::fmt;
use std::sync::Arc;

use crate::Reflect;
use crate::info::{Type, TypePath, Typed, ValueType, Visibility};
use crate::ops::InvokeError;
use crate::registry::GetTypeMeta;

type GetFn =
    dyn Fn(&dyn Reflect, &[&dyn Reflect]) -> Result<Box<dyn Reflect>, InvokeError> + Send + Sync;
type SetFn = dyn Fn(&mut dyn Reflect, Vec<Box<dyn Reflect>>) -> Result<(), InvokeError> + Send + Sync;

#[derive(Clone)]
enum Invoke {
    Get(Arc<GetFn>),
    Set(Arc<SetFn>),
}

// -----------------------------------------------------------------------------
// MethodInfo

/// A reflected method, used as one half of an [`AccessorInfo`].
///
/// A method is either a *getter* (takes `&self`) or a *setter* (takes
/// `&mut self`). The declared parameter list and return type are kept so
/// callers can check the shape before invoking it.
///
/// ```
/// use vc_reflect::{Reflect, derive::Reflect};
/// use vc_reflect::info::MethodInfo;
///
/// #[derive(Reflect)]
/// struct Counter { pub value: i32 }
///
/// let get = MethodInfo::getter::<Counter, _, _>("value", |c: &Counter| c.value);
/// let set = MethodInfo::setter::<Counter, _, _>("set_value", |c: &mut Counter, v: i32| c.value = v);
///
/// let mut counter = Counter { value: 1 };
/// set.invoke_set(&mut counter, vec![Box::new(5_i32)]).unwrap();
///
/// let value = get.invoke_get(&counter, &[]).unwrap();
/// assert_eq!(value.take::<i32>().unwrap(), 5);
/// assert!(set.ret().is_none());
/// assert_eq!(set.params().len(), 1);
/// ```
#[derive(Clone)]
pub struct MethodInfo {
    name: &'static str,
    owner: Type,
    params: Arc<[ValueType]>,
    ret: Option<ValueType>,
    vis: Visibility,
    invoke: Invoke,
}

fn receiver<'a, T: Reflect + TypePath>(
    method: &'static str,
    this: &'a dyn Reflect,
) -> Result<&'a T, InvokeError> {
    this.downcast_ref::<T>().ok_or(InvokeError::Receiver {
        method,
        expected: T::type_path(),
        received: this.reflect_type_path(),
    })
}

fn receiver_mut<'a, T: Reflect + TypePath>(
    method: &'static str,
    this: &'a mut dyn Reflect,
) -> Result<&'a mut T, InvokeError> {
    let received = this.reflect_type_path();
    this.downcast_mut::<T>().ok_or(InvokeError::Receiver {
        method,
        expected: T::type_path(),
        received,
    })
}

fn argument<T: Reflect + TypePath>(
    method: &'static str,
    value: Box<dyn Reflect>,
) -> Result<T, InvokeError> {
    value.take::<T>().map_err(|value| InvokeError::ArgumentType {
        method,
        expected: T::type_path(),
        received: value.reflect_type_path(),
    })
}

fn arity<const N: usize, A>(method: &'static str, args: Vec<A>) -> Result<[A; N], InvokeError> {
    let received = args.len();
    <[A; N]>::try_from(args).map_err(|_| InvokeError::ArgumentCount {
        method,
        expected: N,
        received,
    })
}

fn return_type<V: Typed + GetTypeMeta>() -> Option<ValueType> {
    if TypeId::of::<V>() == TypeId::of::<()>() {
        None
    } else {
        Some(ValueType::of::<V>())
    }
}

impl MethodInfo {
    /// Creates a getter taking no argument.
    ///
    /// A getter returning `()` is recorded without a return type.
    pub fn getter<T, V, F>(name: &'static str, func: F) -> Self
    where
        T: Reflect + TypePath,
        V: Reflect + Typed + GetTypeMeta,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        let call = move |this: &dyn Reflect,
                         args: &[&dyn Reflect]|
              -> Result<Box<dyn Reflect>, InvokeError> {
            let [] = arity::<0, _>(name, args.to_vec())?;
            Ok(Box::new(func(receiver::<T>(name, this)?)))
        };
        Self {
            name,
            owner: Type::of::<T>(),
            params: Arc::new([]),
            ret: return_type::<V>(),
            vis: Visibility::Public,
            invoke: Invoke::Get(Arc::new(call)),
        }
    }

    /// Creates a getter taking one index argument.
    pub fn indexed_getter<T, I, V, F>(name: &'static str, func: F) -> Self
    where
        T: Reflect + TypePath,
        I: Reflect + Typed + GetTypeMeta + Clone,
        V: Reflect + Typed + GetTypeMeta,
        F: Fn(&T, I) -> V + Send + Sync + 'static,
    {
        let call = move |this: &dyn Reflect,
                         args: &[&dyn Reflect]|
              -> Result<Box<dyn Reflect>, InvokeError> {
            let [index] = arity::<1, _>(name, args.to_vec())?;
            let index = index
                .downcast_ref::<I>()
                .cloned()
                .ok_or(InvokeError::ArgumentType {
                    method: name,
                    expected: I::type_path(),
                    received: index.reflect_type_path(),
                })?;
            Ok(Box::new(func(receiver::<T>(name, this)?, index)))
        };
        Self {
            name,
            owner: Type::of::<T>(),
            params: Arc::new([ValueType::of::<I>()]),
            ret: return_type::<V>(),
            vis: Visibility::Public,
            invoke: Invoke::Get(Arc::new(call)),
        }
    }

    /// Creates a setter taking the new value.
    pub fn setter<T, V, F>(name: &'static str, func: F) -> Self
    where
        T: Reflect + TypePath,
        V: Reflect + Typed + GetTypeMeta,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let call = move |this: &mut dyn Reflect,
                         args: Vec<Box<dyn Reflect>>|
              -> Result<(), InvokeError> {
            let [value] = arity::<1, _>(name, args)?;
            let value = argument::<V>(name, value)?;
            func(receiver_mut::<T>(name, this)?, value);
            Ok(())
        };
        Self {
            name,
            owner: Type::of::<T>(),
            params: Arc::new([ValueType::of::<V>()]),
            ret: None,
            vis: Visibility::Public,
            invoke: Invoke::Set(Arc::new(call)),
        }
    }

    /// Creates a setter taking an index and the new value.
    pub fn indexed_setter<T, I, V, F>(name: &'static str, func: F) -> Self
    where
        T: Reflect + TypePath,
        I: Reflect + Typed + GetTypeMeta,
        V: Reflect + Typed + GetTypeMeta,
        F: Fn(&mut T, I, V) + Send + Sync + 'static,
    {
        let call = move |this: &mut dyn Reflect,
                         args: Vec<Box<dyn Reflect>>|
              -> Result<(), InvokeError> {
            let [index, value] = arity::<2, _>(name, args)?;
            let index = argument::<I>(name, index)?;
            let value = argument::<V>(name, value)?;
            func(receiver_mut::<T>(name, this)?, index, value);
            Ok(())
        };
        Self {
            name,
            owner: Type::of::<T>(),
            params: Arc::new([ValueType::of::<I>(), ValueType::of::<V>()]),
            ret: None,
            vis: Visibility::Public,
            invoke: Invoke::Set(Arc::new(call)),
        }
    }

    /// Creates a getter from a type-erased function and an explicit signature.
    ///
    /// The signature is trusted as declared, which allows describing methods
    /// whose shape callers are expected to reject.
    pub fn dynamic_getter<F>(
        name: &'static str,
        owner: Type,
        params: impl Into<Arc<[ValueType]>>,
        ret: Option<ValueType>,
        func: F,
    ) -> Self
    where
        F: Fn(&dyn Reflect, &[&dyn Reflect]) -> Result<Box<dyn Reflect>, InvokeError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name,
            owner,
            params: params.into(),
            ret,
            vis: Visibility::Public,
            invoke: Invoke::Get(Arc::new(func)),
        }
    }

    /// Creates a setter from a type-erased function and an explicit signature.
    pub fn dynamic_setter<F>(
        name: &'static str,
        owner: Type,
        params: impl Into<Arc<[ValueType]>>,
        func: F,
    ) -> Self
    where
        F: Fn(&mut dyn Reflect, Vec<Box<dyn Reflect>>) -> Result<(), InvokeError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name,
            owner,
            params: params.into(),
            ret: None,
            vis: Visibility::Public,
            invoke: Invoke::Set(Arc::new(func)),
        }
    }

    #[inline]
    pub fn with_visibility(mut self, vis: Visibility) -> Self {
        self.vis = vis;
        self
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The type declaring this method.
    #[inline(always)]
    pub fn owner(&self) -> Type {
        self.owner
    }

    #[inline(always)]
    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    /// Returns `None` for methods that produce no value.
    #[inline(always)]
    pub fn ret(&self) -> Option<&ValueType> {
        self.ret.as_ref()
    }

    #[inline(always)]
    pub fn visibility(&self) -> Visibility {
        self.vis
    }

    #[inline]
    pub fn is_getter(&self) -> bool {
        matches!(self.invoke, Invoke::Get(_))
    }

    #[inline]
    pub fn is_setter(&self) -> bool {
        matches!(self.invoke, Invoke::Set(_))
    }

    /// Calls a getter on `this`.
    pub fn invoke_get(
        &self,
        this: &dyn Reflect,
        args: &[&dyn Reflect],
    ) -> Result<Box<dyn Reflect>, InvokeError> {
        match &self.invoke {
            Invoke::Get(func) => func(this, args),
            Invoke::Set(_) => Err(InvokeError::NotAGetter { method: self.name }),
        }
    }

    /// Calls a setter on `this`.
    pub fn invoke_set(
        &self,
        this: &mut dyn Reflect,
        args: Vec<Box<dyn Reflect>>,
    ) -> Result<(), InvokeError> {
        match &self.invoke {
            Invoke::Set(func) => func(this, args),
            Invoke::Get(_) => Err(InvokeError::NotASetter { method: self.name }),
        }
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("params", &self.params)
            .field("ret", &self.ret)
            .field("vis", &self.vis)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// AccessorInfo

/// A named member backed by methods instead of a field.
///
/// `#[reflect(accessor(EyeColor, get = eye_color, set = set_eye_color))]`
/// describes one on a derived struct. Either half may be missing.
///
/// An accessor whose getter takes arguments, or whose setter takes more
/// than the value, is *indexed*.
#[derive(Debug, Clone)]
pub struct AccessorInfo {
    name: &'static str,
    getter: Option<MethodInfo>,
    setter: Option<MethodInfo>,
}

impl AccessorInfo {
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            getter: None,
            setter: None,
        }
    }

    #[inline]
    pub fn with_getter(mut self, getter: MethodInfo) -> Self {
        self.getter = Some(getter);
        self
    }

    #[inline]
    pub fn with_setter(mut self, setter: MethodInfo) -> Self {
        self.setter = Some(setter);
        self
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline(always)]
    pub fn getter(&self) -> Option<&MethodInfo> {
        self.getter.as_ref()
    }

    #[inline(always)]
    pub fn setter(&self) -> Option<&MethodInfo> {
        self.setter.as_ref()
    }

    pub fn is_indexed(&self) -> bool {
        self.getter.as_ref().is_some_and(|m| !m.params().is_empty())
            || self.setter.as_ref().is_some_and(|m| m.params().len() > 1)
    }

    /// Every value type the accessor refers to.
    pub fn value_types(&self) -> impl Iterator<Item = &ValueType> {
        self.getter
            .iter()
            .chain(self.setter.iter())
            .flat_map(|m| m.params().iter().chain(m.ret()))
    }
}

#[cfg(test)]
mod tests {
    use crate::derive::Reflect;
    use crate::info::{Typed, Visibility};
    use crate::ops::InvokeError;

    #[derive(Reflect, Default)]
    #[reflect(default)]
    #[reflect(accessor(EyeColor, get = eye_color, set = set_eye_color))]
    #[reflect(accessor(Secret, set = set_secret, restricted))]
    #[reflect(indexed(Tag, get = tag_at, set = set_tag_at))]
    struct Person {
        eye_color: String,
        secret: u32,
        #[reflect(skip)]
        tags: [String; 2],
    }

    impl Person {
        fn eye_color(&self) -> String {
            self.eye_color.clone()
        }

        fn set_eye_color(&mut self, color: String) {
            self.eye_color = color;
        }

        fn set_secret(&mut self, value: u32) {
            self.secret = value;
        }

        fn tag_at(&self, index: usize) -> String {
            self.tags.get(index).cloned().unwrap_or_default()
        }

        fn set_tag_at(&mut self, index: usize, tag: String) {
            if let Some(slot) = self.tags.get_mut(index) {
                *slot = tag;
            }
        }
    }

    #[test]
    fn derived_accessors() {
        let info = Person::type_info().as_struct().unwrap();
        assert_eq!(info.accessors().len(), 3);

        let eye = info.accessor("EyeColor").unwrap();
        assert!(!eye.is_indexed());
        let getter = eye.getter().unwrap();
        assert!(getter.params().is_empty());
        assert_eq!(getter.ret().unwrap().ty().path(), "alloc::string::String");

        let secret = info.accessor("Secret").unwrap();
        assert!(secret.getter().is_none());
        assert_eq!(
            secret.setter().unwrap().visibility(),
            Visibility::Restricted
        );

        assert!(info.accessor("Tag").unwrap().is_indexed());
    }

    #[test]
    fn invoke_accessors() {
        let info = Person::type_info().as_struct().unwrap();
        let mut person = Person::default();

        let eye = info.accessor("EyeColor").unwrap();
        eye.setter()
            .unwrap()
            .invoke_set(&mut person, vec![Box::new(String::from("Blue"))])
            .unwrap();
        assert_eq!(person.eye_color, "Blue");

        let tag = info.accessor("Tag").unwrap();
        tag.setter()
            .unwrap()
            .invoke_set(&mut person, vec![Box::new(1_usize), Box::new(String::from("x"))])
            .unwrap();
        let value = tag.getter().unwrap().invoke_get(&person, &[&1_usize]).unwrap();
        assert_eq!(value.take::<String>().unwrap(), "x");
    }

    #[test]
    fn invoke_errors() {
        let info = Person::type_info().as_struct().unwrap();
        let eye = info.accessor("EyeColor").unwrap();
        let mut person = Person::default();

        let err = eye
            .setter()
            .unwrap()
            .invoke_set(&mut person, vec![Box::new(3_i32)])
            .unwrap_err();
        assert!(matches!(err, InvokeError::ArgumentType { .. }));

        let err = eye.setter().unwrap().invoke_set(&mut person, vec![]).unwrap_err();
        assert!(matches!(
            err,
            InvokeError::ArgumentCount { expected: 1, received: 0, .. }
        ));

        let err = eye.getter().unwrap().invoke_get(&5_u8, &[]).unwrap_err();
        assert!(matches!(err, InvokeError::Receiver { .. }));

        let err = eye.getter().unwrap().invoke_set(&mut person, vec![]).unwrap_err();
        assert!(matches!(err, InvokeError::NotASetter { .. }));
    }
}
