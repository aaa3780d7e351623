use std::sync::Arc;

use crate::Reflect;
use crate::info::Type;

/// A boxed error of any kind, returned by [`TypeConverter`]s.
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

/// A user supplied conversion into one destination type.
///
/// Converters are attached to their destination type as a
/// [`TypeTraitConverter`], through `#[reflect(converter = Path)]` or
/// [`TypeRegistry::insert_type_trait`].
///
/// A converter accepting text declares it by returning `true` from
/// `can_convert_from` for `String`.
///
/// ```
/// use vc_reflect::Reflect;
/// use vc_reflect::info::Type;
/// use vc_reflect::registry::{BoxError, TypeConverter};
///
/// struct Percent;
///
/// impl TypeConverter for Percent {
///     fn can_convert_from(&self, source: Type) -> bool {
///         source.is::<f64>()
///     }
///
///     fn convert_from(&self, value: &dyn Reflect) -> Result<Box<dyn Reflect>, BoxError> {
///         let ratio = value.downcast_ref::<f64>().ok_or("expected f64")?;
///         Ok(Box::new((ratio * 100.0).round() as u8))
///     }
/// }
///
/// let value = Percent.convert_from(&0.25_f64).unwrap();
/// assert_eq!(value.take::<u8>().unwrap(), 25);
/// assert!(Percent.convert_from_str("25").is_err());
/// ```
///
/// [`TypeRegistry::insert_type_trait`]: crate::registry::TypeRegistry::insert_type_trait
pub trait TypeConverter: Send + Sync + 'static {
    /// Returns `true` if values of `source` can be converted directly.
    fn can_convert_from(&self, source: Type) -> bool;

    fn convert_from(&self, value: &dyn Reflect) -> Result<Box<dyn Reflect>, BoxError>;

    /// Converts from text, only called when `String` is accepted.
    fn convert_from_str(&self, text: &str) -> Result<Box<dyn Reflect>, BoxError> {
        self.convert_from(&text.to_owned())
    }
}

/// A [`TypeConverter`] attached to its destination type.
#[derive(Clone)]
pub struct TypeTraitConverter {
    converter: Arc<dyn TypeConverter>,
}

impl TypeTraitConverter {
    #[inline]
    pub fn new(converter: impl TypeConverter) -> Self {
        Self {
            converter: Arc::new(converter),
        }
    }

    #[inline]
    pub fn converter(&self) -> &Arc<dyn TypeConverter> {
        &self.converter
    }
}
