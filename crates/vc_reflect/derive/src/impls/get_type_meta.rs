use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::ReflectMeta;
use crate::path;

/// `is_struct` adds the registration of field and accessor types.
pub(crate) fn impl_get_type_meta(meta: &ReflectMeta, is_struct: bool) -> TokenStream {
    let vc_reflect = &meta.vc_reflect_path;
    let get_type_meta_ = path::get_type_meta_(vc_reflect);
    let type_meta_ = path::type_meta_(vc_reflect);
    let type_registry_ = path::type_registry_(vc_reflect);
    let from_type_ = path::from_type_(vc_reflect);
    let typed_ = path::typed_(vc_reflect);
    let ident = meta.ident;

    let flagged = [
        (meta.attrs.default, path::trait_default_(vc_reflect)),
        (meta.attrs.display, path::trait_display_(vc_reflect)),
        (meta.attrs.from_str, path::trait_from_str_(vc_reflect)),
    ];
    let mut inserts: Vec<TokenStream> = flagged
        .into_iter()
        .filter_map(|(span, trait_)| {
            span.map(|span| {
                quote_spanned! { span =>
                    meta.insert_trait::<#trait_>(<#trait_ as #from_type_<Self>>::from_type());
                }
            })
        })
        .collect();

    if !is_struct {
        let trait_ = path::trait_convertible_(vc_reflect);
        inserts.push(quote! {
            meta.insert_trait::<#trait_>(<#trait_ as #from_type_<Self>>::from_type());
        });
    }

    if let Some(converter) = &meta.attrs.converter {
        let trait_ = path::trait_converter_(vc_reflect);
        inserts.push(quote! {
            meta.insert_trait(#trait_::new(<#converter as ::core::default::Default>::default()));
        });
    }

    let register_dependencies = is_struct.then(|| {
        quote! {
            fn register_dependencies(registry: &mut #type_registry_) {
                if let ::core::result::Result::Ok(info) = <Self as #typed_>::type_info().as_struct() {
                    for value_type in info.dependencies() {
                        value_type.register(registry);
                    }
                }
            }
        }
    });

    quote! {
        impl #get_type_meta_ for #ident {
            fn get_type_meta() -> #type_meta_ {
                let mut meta = #type_meta_::of::<Self>();
                #(#inserts)*
                meta
            }

            #register_dependencies
        }
    }
}
