use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};

use crate::derive_data::{AccessorAttribute, ReflectMeta, ReflectStruct};
use crate::path;

fn impl_accessor(meta: &ReflectMeta, accessor: &AccessorAttribute) -> TokenStream {
    let vc_reflect = &meta.vc_reflect_path;
    let accessor_info_ = path::accessor_info_(vc_reflect);
    let method_info_ = path::method_info_(vc_reflect);
    let visibility_ = path::visibility_(vc_reflect);

    let name = accessor.name.to_string();

    let getter = accessor.get.as_ref().map(|get| {
        let method = get.to_string();
        let ctor = if accessor.indexed {
            quote! { #method_info_::indexed_getter::<Self, _, _, _> }
        } else {
            quote! { #method_info_::getter::<Self, _, _> }
        };
        quote! { .with_getter(#ctor(#method, Self::#get)) }
    });

    let setter = accessor.set.as_ref().map(|set| {
        let method = set.to_string();
        let ctor = if accessor.indexed {
            quote! { #method_info_::indexed_setter::<Self, _, _, _> }
        } else {
            quote! { #method_info_::setter::<Self, _, _> }
        };
        let vis = accessor
            .restricted
            .then(|| quote! { .with_visibility(#visibility_::Restricted) });
        quote! { .with_setter(#ctor(#method, Self::#set) #vis) }
    });

    quote! {
        #accessor_info_::new(#name) #getter #setter
    }
}

pub(crate) fn impl_typed(data: &ReflectStruct) -> TokenStream {
    let meta = &data.meta;
    let vc_reflect = &meta.vc_reflect_path;
    let typed_ = path::typed_(vc_reflect);
    let type_info_ = path::type_info_(vc_reflect);
    let struct_info_ = path::struct_info_(vc_reflect);
    let named_field_ = path::named_field_(vc_reflect);
    let accessor_info_ = path::accessor_info_(vc_reflect);
    let visibility_ = path::visibility_(vc_reflect);
    let cell_ = path::non_generic_cell_(vc_reflect);
    let ident = meta.ident;

    let fields = data.active_fields().map(|field| {
        let name = field.ident.to_string();
        let ty = field.ty;
        let vis = if !field.is_pub {
            Some(quote! { .with_visibility(#visibility_::Restricted) })
        } else if field.attrs.private_set {
            Some(quote! { .with_write_visibility(#visibility_::Restricted) })
        } else {
            None
        };
        quote! { #named_field_::new::<#ty>(#name) #vis }
    });
    let field_len = data.active_fields().count();

    let accessors = meta
        .attrs
        .accessors
        .iter()
        .map(|accessor| impl_accessor(meta, accessor));
    let accessor_len = meta.attrs.accessors.len();

    quote! {
        impl #typed_ for #ident {
            fn type_info() -> &'static #type_info_ {
                static CELL: #cell_ = #cell_::new();
                CELL.get_or_init(|| {
                    let fields: [#named_field_; #field_len] = [#(#fields),*];
                    let accessors: [#accessor_info_; #accessor_len] = [#(#accessors),*];
                    #type_info_::Struct(
                        #struct_info_::new::<Self>(fields).with_accessors(accessors),
                    )
                })
            }
        }
    }
}

pub(crate) fn impl_struct(data: &ReflectStruct) -> TokenStream {
    let vc_reflect = &data.meta.vc_reflect_path;
    let struct_ = path::struct_(vc_reflect);
    let reflect_ = path::reflect_(vc_reflect);
    let ident = data.meta.ident;

    let idents: Vec<_> = data.active_fields().map(|field| field.ident).collect();
    let names: Vec<_> = idents.iter().map(ToString::to_string).collect();
    let indices: Vec<_> = (0..idents.len()).map(Literal::usize_unsuffixed).collect();
    let field_len = idents.len();

    quote! {
        impl #struct_ for #ident {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn #reflect_> {
                match name {
                    #( #names => ::core::option::Option::Some(&self.#idents as &dyn #reflect_), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn #reflect_> {
                match name {
                    #( #names => ::core::option::Option::Some(&mut self.#idents as &mut dyn #reflect_), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #( #indices => ::core::option::Option::Some(&self.#idents as &dyn #reflect_), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #( #indices => ::core::option::Option::Some(&mut self.#idents as &mut dyn #reflect_), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn name_at(&self, index: usize) -> ::core::option::Option<&str> {
                match index {
                    #( #indices => ::core::option::Option::Some(#names), )*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }
        }
    }
}

pub(crate) fn impl_reflect(data: &ReflectStruct) -> TokenStream {
    let meta = &data.meta;
    let vc_reflect = &meta.vc_reflect_path;
    let reflect_ = path::reflect_(vc_reflect);
    let type_path_ = path::type_path_(vc_reflect);
    let clone_error_ = path::clone_error_(vc_reflect);
    let struct_debug_ = path::struct_debug_(vc_reflect);
    let ident = meta.ident;
    let common = super::reflect_common(meta, &format_ident!("Struct"));

    let clone_body = if meta.attrs.clone.is_some() {
        quote! {
            ::core::result::Result::Ok(::std::boxed::Box::new(::core::clone::Clone::clone(self)))
        }
    } else {
        let cloned = data.fields.iter().map(|field| {
            let field_ident = field.ident;
            if field.attrs.skip {
                return quote! { #field_ident: ::core::default::Default::default() };
            }
            let ty = field.ty;
            let name = field_ident.to_string();
            quote! {
                #field_ident: #reflect_::reflect_clone(&self.#field_ident)?
                    .take::<#ty>()
                    .map_err(|_| #clone_error_::FieldNotCloneable {
                        type_path: <Self as #type_path_>::type_path(),
                        field: #name,
                    })?
            }
        });
        quote! {
            ::core::result::Result::Ok(::std::boxed::Box::new(Self { #(#cloned),* }))
        }
    };

    quote! {
        impl #reflect_ for #ident {
            #common

            fn reflect_clone(
                &self,
            ) -> ::core::result::Result<::std::boxed::Box<dyn #reflect_>, #clone_error_> {
                #clone_body
            }

            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #struct_debug_(self, f)
            }
        }
    }
}
