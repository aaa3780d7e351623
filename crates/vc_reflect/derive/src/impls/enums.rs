use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};

use crate::derive_data::ReflectEnum;
use crate::path;

fn discriminant_literal(value: i128) -> TokenStream {
    let magnitude = Literal::u128_unsuffixed(value.unsigned_abs());
    if value < 0 {
        quote! { -#magnitude }
    } else {
        quote! { #magnitude }
    }
}

pub(crate) fn impl_typed(data: &ReflectEnum) -> TokenStream {
    let vc_reflect = &data.meta.vc_reflect_path;
    let reflect_ = path::reflect_(vc_reflect);
    let typed_ = path::typed_(vc_reflect);
    let type_info_ = path::type_info_(vc_reflect);
    let enum_info_ = path::enum_info_(vc_reflect);
    let variant_info_ = path::variant_info_(vc_reflect);
    let cell_ = path::non_generic_cell_(vc_reflect);
    let ident = data.meta.ident;

    let variants = data.variants.iter().map(|variant| {
        let name = variant.ident.to_string();
        let discriminant = discriminant_literal(variant.discriminant);
        quote! { #variant_info_::new(#name, #discriminant) }
    });
    let arms = data.variants.iter().enumerate().map(|(index, variant)| {
        let index = Literal::usize_unsuffixed(index);
        let variant = variant.ident;
        quote! {
            #index => ::core::option::Option::Some(
                ::std::boxed::Box::new(Self::#variant) as ::std::boxed::Box<dyn #reflect_>
            ),
        }
    });

    quote! {
        impl #typed_ for #ident {
            fn type_info() -> &'static #type_info_ {
                static CELL: #cell_ = #cell_::new();
                CELL.get_or_init(|| {
                    #type_info_::Enum(#enum_info_::new::<Self>(
                        &[#(#variants),*],
                        |index: usize| -> ::core::option::Option<::std::boxed::Box<dyn #reflect_>> {
                            match index {
                                #(#arms)*
                                _ => ::core::option::Option::None,
                            }
                        },
                    ))
                })
            }
        }
    }
}

pub(crate) fn impl_enum(data: &ReflectEnum) -> TokenStream {
    let enum_ = path::enum_(&data.meta.vc_reflect_path);
    let ident = data.meta.ident;

    let variants: Vec<_> = data.variants.iter().map(|variant| variant.ident).collect();
    let names: Vec<_> = variants.iter().map(ToString::to_string).collect();
    let indices = (0..variants.len()).map(Literal::usize_unsuffixed);
    let discriminants = data
        .variants
        .iter()
        .map(|variant| discriminant_literal(variant.discriminant));

    quote! {
        impl #enum_ for #ident {
            fn variant_name(&self) -> &str {
                match self {
                    #( Self::#variants => #names, )*
                }
            }

            fn variant_index(&self) -> usize {
                match self {
                    #( Self::#variants => #indices, )*
                }
            }

            fn discriminant(&self) -> i128 {
                match self {
                    #( Self::#variants => #discriminants, )*
                }
            }
        }
    }
}

pub(crate) fn impl_reflect(data: &ReflectEnum) -> TokenStream {
    let meta = &data.meta;
    let vc_reflect = &meta.vc_reflect_path;
    let reflect_ = path::reflect_(vc_reflect);
    let enum_ = path::enum_(vc_reflect);
    let clone_error_ = path::clone_error_(vc_reflect);
    let ident = meta.ident;
    let common = super::reflect_common(meta, &format_ident!("Enum"));

    let variants = data.variants.iter().map(|variant| variant.ident);

    quote! {
        impl #reflect_ for #ident {
            #common

            fn reflect_clone(
                &self,
            ) -> ::core::result::Result<::std::boxed::Box<dyn #reflect_>, #clone_error_> {
                let value = match self {
                    #( Self::#variants => Self::#variants, )*
                };
                ::core::result::Result::Ok(::std::boxed::Box::new(value))
            }

            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(#enum_::variant_name(self))
            }
        }
    }
}

pub(crate) fn impl_convertible(data: &ReflectEnum) -> TokenStream {
    let vc_reflect = &data.meta.vc_reflect_path;
    let convertible_ = path::convertible_(vc_reflect);
    let enum_ = path::enum_(vc_reflect);
    let scalar_ = path::scalar_(vc_reflect);
    let scalar_error_ = path::scalar_error_(vc_reflect);
    let enum_from_scalar_ = path::enum_from_scalar_(vc_reflect);
    let ident = data.meta.ident;

    quote! {
        impl #convertible_ for #ident {
            #[inline]
            fn to_scalar(&self) -> #scalar_ {
                #scalar_::Int(#enum_::discriminant(self))
            }

            #[inline]
            fn from_scalar(scalar: #scalar_) -> ::core::result::Result<Self, #scalar_error_> {
                #enum_from_scalar_::<Self>(scalar)
            }
        }
    }
}
