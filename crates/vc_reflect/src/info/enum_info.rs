use crate::Reflect;
use crate::info::{Type, TypePath};

/// A unit variant and its discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantInfo {
    name: &'static str,
    discriminant: i128,
}

impl VariantInfo {
    #[inline]
    pub const fn new(name: &'static str, discriminant: i128) -> Self {
        Self { name, discriminant }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline(always)]
    pub const fn discriminant(&self) -> i128 {
        self.discriminant
    }
}

/// Type info of an enum whose variants carry no data.
///
/// Variants can be looked up by name or by discriminant and instantiated.
///
/// ```
/// use vc_reflect::derive::Reflect;
/// use vc_reflect::info::Typed;
///
/// #[derive(Reflect, Debug, PartialEq)]
/// enum Level { Low = 1, High = 10 }
///
/// let info = Level::type_info().as_enum().unwrap();
///
/// let high = info.from_discriminant(10).unwrap();
/// assert_eq!(high.take::<Level>().unwrap(), Level::High);
///
/// let low = info.from_name_ignore_case("LOW").unwrap();
/// assert_eq!(low.take::<Level>().unwrap(), Level::Low);
///
/// assert!(info.from_discriminant(2).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct EnumInfo {
    ty: Type,
    variants: Box<[VariantInfo]>,
    instantiate: fn(usize) -> Option<Box<dyn Reflect>>,
}

impl EnumInfo {
    /// `instantiate` builds the variant at the given index.
    pub fn new<T: TypePath>(
        variants: &[VariantInfo],
        instantiate: fn(usize) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            variants: variants.into(),
            instantiate,
        }
    }

    #[inline(always)]
    pub fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    pub fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    #[inline]
    pub fn variant_len(&self) -> usize {
        self.variants.len()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name == name)
    }

    pub fn index_of_ignore_case(&self, name: &str) -> Option<usize> {
        self.index_of(name).or_else(|| {
            self.variants
                .iter()
                .position(|v| v.name.eq_ignore_ascii_case(name))
        })
    }

    pub fn index_of_discriminant(&self, discriminant: i128) -> Option<usize> {
        self.variants
            .iter()
            .position(|v| v.discriminant == discriminant)
    }

    /// Creates the variant at `index`.
    #[inline]
    pub fn instantiate(&self, index: usize) -> Option<Box<dyn Reflect>> {
        (self.instantiate)(index)
    }

    pub fn from_discriminant(&self, discriminant: i128) -> Option<Box<dyn Reflect>> {
        self.index_of_discriminant(discriminant)
            .and_then(|index| self.instantiate(index))
    }

    pub fn from_name_ignore_case(&self, name: &str) -> Option<Box<dyn Reflect>> {
        self.index_of_ignore_case(name.trim())
            .and_then(|index| self.instantiate(index))
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::derive::Reflect;
    use crate::info::Typed;
    use crate::ops::Enum;
    use crate::registry::{FromType, TypeTraitConvertible};
    use crate::scalar::Scalar;

    #[derive(Reflect, Debug, PartialEq)]
    enum Delta {
        Down = -1,
        Flat,
        Up = 5,
        Further,
    }

    #[test]
    fn implicit_discriminants() {
        let info = Delta::type_info().as_enum().unwrap();
        let discriminants: Vec<_> = info.variants().iter().map(|v| v.discriminant()).collect();
        assert_eq!(discriminants, [-1, 0, 5, 6]);
        assert_eq!(Delta::Further.variant_index(), 3);
        assert_eq!(Delta::Up.variant_name(), "Up");
    }

    #[test]
    fn scalar_round_trip() {
        let convertible = <TypeTraitConvertible as FromType<Delta>>::from_type();
        assert_eq!(convertible.to_scalar(&Delta::Down), Some(Scalar::Int(-1)));

        let up = convertible.from_scalar(Scalar::Int(5)).unwrap();
        assert_eq!(up.take::<Delta>().unwrap(), Delta::Up);
        assert!(convertible.from_scalar(Scalar::Int(2)).is_err());
        assert!(convertible.from_scalar(Scalar::Bool(true)).is_err());
    }

    #[test]
    fn clone_and_debug() {
        let value = Delta::Flat.reflect_clone().unwrap();
        assert_eq!(format!("{value:?}"), "Flat");
        assert!(value.is::<Delta>());
    }
}
