// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod type_attributes;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use type_attributes::{AccessorAttribute, TypeAttributes};

// -----------------------------------------------------------------------------
// Derive data

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Expr, Fields, Ident, Type, Visibility};

/// Data shared by every kind of derived type.
pub(crate) struct ReflectMeta<'a> {
    pub attrs: TypeAttributes,
    pub ident: &'a Ident,
    pub vc_reflect_path: syn::Path,
}

impl ReflectMeta<'_> {
    /// Expression of the reflected type path, a `&'static str`.
    pub fn type_path_expr(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(lit) => quote! { #lit },
            None => {
                let name = self.ident.to_string();
                quote! { ::core::concat!(::core::module_path!(), "::", #name) }
            }
        }
    }
}

pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
    pub is_pub: bool,
}

pub(crate) struct ReflectStruct<'a> {
    pub meta: ReflectMeta<'a>,
    /// All named fields, skipped ones included.
    pub fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    /// Fields visible through reflection, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| !field.attrs.skip)
    }
}

pub(crate) struct EnumVariant<'a> {
    pub ident: &'a Ident,
    pub discriminant: i128,
}

pub(crate) struct ReflectEnum<'a> {
    pub meta: ReflectMeta<'a>,
    pub variants: Vec<EnumVariant<'a>>,
}

pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Enum(ReflectEnum<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "`#[derive(Reflect)]` does not support generic types",
            ));
        }

        let meta = ReflectMeta {
            attrs: TypeAttributes::parse_attrs(&input.attrs)?,
            ident: &input.ident,
            vc_reflect_path: crate::path::vc_reflect(),
        };

        match &input.data {
            Data::Struct(data) => {
                let fields = match &data.fields {
                    Fields::Named(named) => named
                        .named
                        .iter()
                        .map(|field| {
                            Ok(StructField {
                                ident: field.ident.as_ref().ok_or_else(|| {
                                    syn::Error::new(field.span(), "expected a named field")
                                })?,
                                ty: &field.ty,
                                attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                                is_pub: matches!(field.vis, Visibility::Public(_)),
                            })
                        })
                        .collect::<syn::Result<Vec<_>>>()?,
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(unnamed) => {
                        return Err(syn::Error::new(
                            unnamed.span(),
                            "`#[derive(Reflect)]` does not support tuple structs",
                        ));
                    }
                };
                Ok(Self::Struct(ReflectStruct { meta, fields }))
            }
            Data::Enum(data) => {
                if !meta.attrs.accessors.is_empty() {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "accessors are only supported on structs",
                    ));
                }
                if data.variants.is_empty() {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "`#[derive(Reflect)]` needs at least one variant",
                    ));
                }
                let mut next = 0_i128;
                let mut variants = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    if !matches!(variant.fields, Fields::Unit) {
                        return Err(syn::Error::new(
                            variant.fields.span(),
                            "`#[derive(Reflect)]` only supports enums without variant data",
                        ));
                    }
                    let discriminant = match &variant.discriminant {
                        Some((_, expr)) => parse_discriminant(expr)?,
                        None => next,
                    };
                    next = discriminant.wrapping_add(1);
                    variants.push(EnumVariant {
                        ident: &variant.ident,
                        discriminant,
                    });
                }
                Ok(Self::Enum(ReflectEnum { meta, variants }))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span,
                "`#[derive(Reflect)]` does not support unions",
            )),
        }
    }
}

/// Reads an explicit discriminant, an integer literal with an optional `-`.
fn parse_discriminant(expr: &Expr) -> syn::Result<i128> {
    match expr {
        Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Int(lit),
            ..
        }) => lit.base10_parse::<i128>(),
        Expr::Unary(syn::ExprUnary {
            op: syn::UnOp::Neg(_),
            expr,
            ..
        }) => parse_discriminant(expr).map(|value| -value),
        Expr::Group(group) => parse_discriminant(&group.expr),
        Expr::Paren(paren) => parse_discriminant(&paren.expr),
        _ => Err(syn::Error::new_spanned(
            expr,
            "expected an integer literal discriminant",
        )),
    }
}
