use crate::info::{Type, TypePath};

/// Type info of values without reflected structure, such as primitives.
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    #[inline]
    pub fn new<T: TypePath>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    #[inline(always)]
    pub fn ty(&self) -> Type {
        self.ty
    }
}
