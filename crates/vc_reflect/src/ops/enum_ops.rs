use crate::Reflect;

/// A reflected enum made of unit variants.
pub trait Enum: Reflect {
    fn variant_name(&self) -> &str;

    fn variant_index(&self) -> usize;

    fn discriminant(&self) -> i128;
}
