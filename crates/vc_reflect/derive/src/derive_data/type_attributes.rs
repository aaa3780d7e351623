use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Ident, LitStr, Path};

use crate::REFLECT_ATTRIBUTE_NAME;

/// A method backed member declared with `accessor(..)` or `indexed(..)`.
pub(crate) struct AccessorAttribute {
    pub name: Ident,
    pub get: Option<Ident>,
    pub set: Option<Ident>,
    pub restricted: bool,
    pub indexed: bool,
}

impl AccessorAttribute {
    fn parse(meta: &ParseNestedMeta, indexed: bool) -> syn::Result<Self> {
        let mut name = None;
        let mut get = None;
        let mut set = None;
        let mut restricted = false;

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("get") {
                get = Some(inner.value()?.parse::<Ident>()?);
            } else if inner.path.is_ident("set") {
                set = Some(inner.value()?.parse::<Ident>()?);
            } else if inner.path.is_ident("restricted") {
                restricted = true;
            } else if name.is_none() && !inner.input.peek(syn::Token![=]) {
                name = Some(inner.path.require_ident()?.clone());
            } else {
                return Err(inner.error("expected `get = ..`, `set = ..` or `restricted`"));
            }
            Ok(())
        })?;

        let Some(name) = name else {
            return Err(meta.error("missing accessor name"));
        };
        if get.is_none() && set.is_none() {
            return Err(meta.error("an accessor needs `get` or `set`"));
        }
        if indexed && restricted {
            return Err(meta.error("`restricted` is not supported on indexed accessors"));
        }

        Ok(Self {
            name,
            get,
            set,
            restricted,
            indexed,
        })
    }
}

/// Attributes applied to the whole type, `#[reflect(...)]`.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub default: Option<Span>,
    pub clone: Option<Span>,
    pub display: Option<Span>,
    pub from_str: Option<Span>,
    pub converter: Option<Path>,
    pub type_path: Option<LitStr>,
    pub accessors: Vec<AccessorAttribute>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| out.parse_meta(&meta))?;
            }
        }
        Ok(out)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let span = meta.path.require_ident()?.span();

        let flag = |slot: &mut Option<Span>, name: &str| -> syn::Result<()> {
            if slot.replace(span).is_some() {
                return Err(meta.error(format_args!("duplicate `{name}`")));
            }
            Ok(())
        };

        if meta.path.is_ident("default") {
            flag(&mut self.default, "default")
        } else if meta.path.is_ident("clone") {
            flag(&mut self.clone, "clone")
        } else if meta.path.is_ident("display") {
            flag(&mut self.display, "display")
        } else if meta.path.is_ident("from_str") {
            flag(&mut self.from_str, "from_str")
        } else if meta.path.is_ident("converter") {
            let path = meta.value()?.parse::<Path>()?;
            if self.converter.replace(path).is_some() {
                return Err(meta.error("duplicate `converter`"));
            }
            Ok(())
        } else if meta.path.is_ident("type_path") {
            let lit = meta.value()?.parse::<LitStr>()?;
            if self.type_path.replace(lit).is_some() {
                return Err(meta.error("duplicate `type_path`"));
            }
            Ok(())
        } else if meta.path.is_ident("accessor") {
            self.push_accessor(AccessorAttribute::parse(meta, false)?, meta)
        } else if meta.path.is_ident("indexed") {
            self.push_accessor(AccessorAttribute::parse(meta, true)?, meta)
        } else {
            Err(meta.error("unknown reflect attribute"))
        }
    }

    fn push_accessor(
        &mut self,
        accessor: AccessorAttribute,
        meta: &ParseNestedMeta,
    ) -> syn::Result<()> {
        if self.accessors.iter().any(|a| a.name == accessor.name) {
            return Err(meta.error(format_args!("duplicate accessor `{}`", accessor.name)));
        }
        self.accessors.push(accessor);
        Ok(())
    }
}
