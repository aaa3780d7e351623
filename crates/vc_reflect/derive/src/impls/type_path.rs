use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

pub(crate) fn impl_type_path(meta: &ReflectMeta) -> TokenStream {
    let type_path_ = crate::path::type_path_(&meta.vc_reflect_path);
    let ident = meta.ident;
    let name = ident.to_string();
    let path = meta.type_path_expr();

    // A custom path carries no reliable module.
    let module_path = match &meta.attrs.type_path {
        Some(_) => quote! { ::core::option::Option::None },
        None => quote! { ::core::option::Option::Some(::core::module_path!()) },
    };

    quote! {
        impl #type_path_ for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #path
            }

            #[inline]
            fn type_name() -> &'static str {
                #name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                #module_path
            }
        }
    }
}
