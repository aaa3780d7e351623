use syn::Attribute;

use crate::REFLECT_ATTRIBUTE_NAME;

/// Attributes applied to a field, `#[reflect(skip)]` or `#[reflect(private_set)]`.
#[derive(Default, Clone, Copy)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub private_set: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    out.skip = true;
                } else if meta.path.is_ident("private_set") {
                    out.private_set = true;
                } else {
                    return Err(meta.error("unknown field attribute, expected `skip` or `private_set`"));
                }
                Ok(())
            })?;
        }
        if out.skip && out.private_set {
            return Err(syn::Error::new_spanned(
                &attrs[0],
                "`private_set` has no effect on a skipped field",
            ));
        }
        Ok(out)
    }
}
