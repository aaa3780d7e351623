//! Selection and execution of conversion strategies.

use core::any::TypeId;
use core::fmt;
use std::sync::Arc;

use vc_reflect::Reflect;
use vc_reflect::info::{EnumInfo, Type, TypeInfo, ValueType};
use vc_reflect::registry::{
    BoxError, TypeConverter, TypeRegistryArc, TypeTraitConvertible, TypeTraitDisplay,
    TypeTraitFromStr,
};

use crate::cache::ConverterCache;
use crate::convert::{self, ConvertError, Stringify};
use crate::model::MemberValue;

// -----------------------------------------------------------------------------
// StrategyKind

/// The plain discriminant of a [`Strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Direct,
    EnumLike,
    CustomConverter,
    GenericConvertible,
    StringParse,
    None,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Direct => "direct",
            Self::EnumLike => "enum",
            Self::CustomConverter => "custom converter",
            Self::GenericConvertible => "generic convertible",
            Self::StringParse => "string parse",
            Self::None => "none",
        })
    }
}

// -----------------------------------------------------------------------------
// Strategy

/// Where an enum conversion reads its input from.
#[derive(Clone)]
pub enum EnumSource {
    /// The variant name, as a `String`.
    Text,
    /// The discriminant, as an integer.
    Integer(TypeTraitConvertible),
}

impl fmt::Debug for EnumSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("Text"),
            Self::Integer(source) => f.debug_tuple("Integer").field(&source.type_path()).finish(),
        }
    }
}

/// How a source value becomes a destination value.
///
/// Each variant holds what it needs to run, taken out of the registry when
/// the strategy is resolved.
#[derive(Clone)]
pub enum Strategy {
    /// Same type, the value is moved or cloned.
    Direct,
    /// Text or integer into an enum.
    EnumLike {
        info: &'static EnumInfo,
        source: EnumSource,
    },
    /// The destination type's registered converter.
    CustomConverter {
        converter: Arc<dyn TypeConverter>,
        source: Type,
        text: Stringify,
    },
    /// Scalar coercion, see [`vc_reflect::scalar`].
    GenericConvertible {
        source: TypeTraitConvertible,
        target: Option<TypeTraitConvertible>,
    },
    /// The value rendered as text, then parsed by the destination type.
    StringParse {
        text: Stringify,
        parse: TypeTraitFromStr,
    },
    /// No way to convert, the destination is left untouched.
    None,
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Direct => StrategyKind::Direct,
            Self::EnumLike { .. } => StrategyKind::EnumLike,
            Self::CustomConverter { .. } => StrategyKind::CustomConverter,
            Self::GenericConvertible { .. } => StrategyKind::GenericConvertible,
            Self::StringParse { .. } => StrategyKind::StringParse,
            Self::None => StrategyKind::None,
        }
    }

    /// Converts `value` to `dest`.
    ///
    /// `Ok(None)` means no value was produced, which is not an error.
    pub fn execute(
        &self,
        value: MemberValue<'_>,
        dest: Type,
    ) -> Result<Option<Box<dyn Reflect>>, ConvertError> {
        let from = value.as_reflect().reflect_type_path();
        self.run(value, dest).map_err(|cause| ConvertError {
            from,
            to: dest.path(),
            strategy: self.kind(),
            cause,
        })
    }

    fn run(&self, value: MemberValue<'_>, dest: Type) -> Result<Option<Box<dyn Reflect>>, BoxError> {
        match self {
            Self::Direct => Ok(Some(value.into_owned()?)),
            Self::EnumLike { info, source } => {
                let value = value.as_reflect();
                let variant = match source {
                    EnumSource::Text => {
                        let text = value
                            .downcast_ref::<String>()
                            .ok_or("enum conversion from text expects a `String`")?;
                        convert::enum_from_text(info, text)?
                    }
                    EnumSource::Integer(source) => convert::enum_from_integer(info, source, value)?,
                };
                Ok(Some(variant))
            }
            Self::CustomConverter {
                converter,
                source,
                text,
            } => {
                let value = value.as_reflect();
                if converter.can_convert_from(*source) {
                    converter.convert_from(value).map(Some)
                } else if converter.can_convert_from(Type::of::<String>()) {
                    converter.convert_from_str(&text.render(value)).map(Some)
                } else {
                    Ok(None)
                }
            }
            Self::GenericConvertible { source, target } => {
                let converted =
                    convert::change_type(source, target.as_ref(), value.as_reflect(), dest)?;
                Ok(Some(converted))
            }
            Self::StringParse { text, parse } => Ok(parse.parse(&text.render(value.as_reflect()))),
            Self::None => Ok(None),
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnumLike { info, source } => f
                .debug_struct("EnumLike")
                .field("enum", &info.ty())
                .field("source", source)
                .finish(),
            Self::CustomConverter { source, .. } => f
                .debug_struct("CustomConverter")
                .field("source", source)
                .finish_non_exhaustive(),
            other => fmt::Debug::fmt(&other.kind(), f),
        }
    }
}

// -----------------------------------------------------------------------------
// StrategyResolver

const INTEGERS: [fn() -> TypeId; 12] = [
    TypeId::of::<i8>,
    TypeId::of::<i16>,
    TypeId::of::<i32>,
    TypeId::of::<i64>,
    TypeId::of::<i128>,
    TypeId::of::<isize>,
    TypeId::of::<u8>,
    TypeId::of::<u16>,
    TypeId::of::<u32>,
    TypeId::of::<u64>,
    TypeId::of::<u128>,
    TypeId::of::<usize>,
];

fn is_integer(type_id: TypeId) -> bool {
    INTEGERS.iter().any(|id| id() == type_id)
}

/// Picks the [`Strategy`] for a pair of value types.
///
/// The first matching rule wins:
///
/// 1. [`Direct`](Strategy::Direct): the types are the same;
/// 2. [`EnumLike`](Strategy::EnumLike): the destination is an enum and the
///    source is an integer or a `String`;
/// 3. [`CustomConverter`](Strategy::CustomConverter): the destination has a
///    custom converter;
/// 4. [`GenericConvertible`](Strategy::GenericConvertible): the source has
///    [`TypeTraitConvertible`];
/// 5. [`StringParse`](Strategy::StringParse): the destination has
///    [`TypeTraitFromStr`];
/// 6. [`None`](Strategy::None).
///
/// Callers strip `Option` layers before resolving.
pub struct StrategyResolver<'a> {
    registry: &'a TypeRegistryArc,
    converters: &'a ConverterCache,
}

impl<'a> StrategyResolver<'a> {
    #[inline]
    pub fn new(registry: &'a TypeRegistryArc, converters: &'a ConverterCache) -> Self {
        Self {
            registry,
            converters,
        }
    }

    pub fn resolve(&self, source: ValueType, dest: ValueType) -> Strategy {
        let strategy = self.select(source, dest);
        log::trace!(
            "`{}` -> `{}` uses the {} strategy",
            source.ty().path(),
            dest.ty().path(),
            strategy.kind(),
        );
        strategy
    }

    fn stringify(&self, source: TypeId) -> Stringify {
        let display = self
            .registry
            .read()
            .get_type_trait::<TypeTraitDisplay>(source)
            .cloned();
        Stringify::new(display)
    }

    fn select(&self, source: ValueType, dest: ValueType) -> Strategy {
        if source.id() == dest.id() {
            return Strategy::Direct;
        }

        if let TypeInfo::Enum(info) = dest.type_info() {
            if source.ty().is::<String>() {
                return Strategy::EnumLike {
                    info,
                    source: EnumSource::Text,
                };
            }
            if is_integer(source.id()) {
                let convertible = self
                    .registry
                    .read()
                    .get_type_trait::<TypeTraitConvertible>(source.id())
                    .cloned();
                if let Some(convertible) = convertible {
                    return Strategy::EnumLike {
                        info,
                        source: EnumSource::Integer(convertible),
                    };
                }
            }
        }

        if let Some(converter) = self.converters.get(self.registry, dest.id()) {
            return Strategy::CustomConverter {
                converter,
                source: source.ty(),
                text: self.stringify(source.id()),
            };
        }

        let registry = self.registry.read();
        if let Some(convertible) = registry.get_type_trait::<TypeTraitConvertible>(source.id()) {
            return Strategy::GenericConvertible {
                source: convertible.clone(),
                target: registry
                    .get_type_trait::<TypeTraitConvertible>(dest.id())
                    .cloned(),
            };
        }
        if let Some(parse) = registry.get_type_trait::<TypeTraitFromStr>(dest.id()) {
            let text = Stringify::new(registry.get_type_trait::<TypeTraitDisplay>(source.id()).cloned());
            return Strategy::StringParse {
                text,
                parse: parse.clone(),
            };
        }
        Strategy::None
    }
}

#[cfg(test)]
mod tests {
    use core::fmt;

    use vc_reflect::derive::Reflect;
    use vc_reflect::info::{Type, ValueType};
    use vc_reflect::registry::TypeRegistryArc;

    use super::{StrategyKind, StrategyResolver};
    use crate::cache::ConverterCache;
    use crate::model::MemberValue;

    #[derive(Reflect, Default, Clone, Copy)]
    #[reflect(default, display)]
    struct Point {
        pub x: i32,
        pub y: i32,
    }

    impl fmt::Display for Point {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{},{}", self.x, self.y)
        }
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Segment {
        pub from: Point,
        pub to: Point,
    }

    #[derive(Reflect, Default, Clone, Copy)]
    #[reflect(default)]
    enum Level {
        #[default]
        Low,
        High,
    }

    fn resolver_env() -> (TypeRegistryArc, ConverterCache) {
        let registry = TypeRegistryArc::default();
        registry.register::<Segment>();
        registry.register::<Level>();
        (registry, ConverterCache::new())
    }

    #[test]
    fn precedence() {
        let (registry, cache) = resolver_env();
        let resolver = StrategyResolver::new(&registry, &cache);
        let kind = |source: ValueType, dest: ValueType| resolver.resolve(source, dest).kind();

        let string = ValueType::of::<String>();
        assert_eq!(kind(string, string), StrategyKind::Direct);
        assert_eq!(kind(string, ValueType::of::<Level>()), StrategyKind::EnumLike);
        assert_eq!(kind(ValueType::of::<u8>(), ValueType::of::<Level>()), StrategyKind::EnumLike);
        assert_eq!(kind(ValueType::of::<f32>(), ValueType::of::<Level>()), StrategyKind::GenericConvertible);
        assert_eq!(kind(ValueType::of::<Level>(), string), StrategyKind::GenericConvertible);
        assert_eq!(kind(ValueType::of::<Point>(), string), StrategyKind::StringParse);
        assert_eq!(kind(ValueType::of::<Point>(), ValueType::of::<Segment>()), StrategyKind::None);
    }

    #[test]
    fn execution() {
        let (registry, cache) = resolver_env();
        let resolver = StrategyResolver::new(&registry, &cache);
        let string = Type::of::<String>();

        let point = Point { x: 1, y: 2 };
        let text = resolver
            .resolve(ValueType::of::<Point>(), ValueType::of::<String>())
            .execute(MemberValue::Borrowed(&point), string)
            .unwrap()
            .unwrap();
        assert_eq!(text.take::<String>().unwrap(), "1,2");

        let name = resolver
            .resolve(ValueType::of::<Level>(), ValueType::of::<String>())
            .execute(MemberValue::Owned(Box::new(Level::High)), string)
            .unwrap()
            .unwrap();
        assert_eq!(name.take::<String>().unwrap(), "High");

        let nothing = resolver
            .resolve(ValueType::of::<Point>(), ValueType::of::<Segment>())
            .execute(MemberValue::Borrowed(&point), Type::of::<Segment>())
            .unwrap();
        assert!(nothing.is_none());

        let err = resolver
            .resolve(ValueType::of::<i64>(), ValueType::of::<u8>())
            .execute(MemberValue::Owned(Box::new(300_i64)), Type::of::<u8>())
            .unwrap_err();
        assert_eq!(err.strategy, StrategyKind::GenericConvertible);
        assert_eq!((err.from, err.to), ("i64", "u8"));
    }
}
