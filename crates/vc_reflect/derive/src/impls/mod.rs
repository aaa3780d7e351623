// -----------------------------------------------------------------------------
// Modules

mod enums;
mod get_type_meta;
mod structs;
mod type_path;

// -----------------------------------------------------------------------------
// Entry

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectDerive;

pub(crate) fn impl_reflect(derive: &ReflectDerive) -> TokenStream {
    match derive {
        ReflectDerive::Struct(data) => {
            let type_path = type_path::impl_type_path(&data.meta);
            let typed = structs::impl_typed(data);
            let struct_ = structs::impl_struct(data);
            let reflect = structs::impl_reflect(data);
            let get_type_meta = get_type_meta::impl_get_type_meta(&data.meta, true);
            quote! {
                #type_path
                #typed
                #struct_
                #reflect
                #get_type_meta
            }
        }
        ReflectDerive::Enum(data) => {
            let type_path = type_path::impl_type_path(&data.meta);
            let typed = enums::impl_typed(data);
            let enum_ = enums::impl_enum(data);
            let reflect = enums::impl_reflect(data);
            let convertible = enums::impl_convertible(data);
            let get_type_meta = get_type_meta::impl_get_type_meta(&data.meta, false);
            quote! {
                #type_path
                #typed
                #enum_
                #reflect
                #convertible
                #get_type_meta
            }
        }
    }
}

/// `Reflect` methods identical for every derived kind.
fn reflect_common(meta: &crate::derive_data::ReflectMeta, kind: &syn::Ident) -> TokenStream {
    let vc_reflect = &meta.vc_reflect_path;
    let reflect_ = crate::path::reflect_(vc_reflect);
    let reflect_kind_ = crate::path::reflect_kind_(vc_reflect);
    let reflect_ref_ = crate::path::reflect_ref_(vc_reflect);
    let reflect_mut_ = crate::path::reflect_mut_(vc_reflect);
    let reflect_owned_ = crate::path::reflect_owned_(vc_reflect);

    quote! {
        #[inline]
        fn set(
            &mut self,
            value: ::std::boxed::Box<dyn #reflect_>,
        ) -> ::core::result::Result<(), ::std::boxed::Box<dyn #reflect_>> {
            *self = value.take::<Self>()?;
            ::core::result::Result::Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> #reflect_kind_ {
            #reflect_kind_::#kind
        }

        #[inline]
        fn reflect_ref(&self) -> #reflect_ref_<'_> {
            #reflect_ref_::#kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
            #reflect_mut_::#kind(self)
        }

        #[inline]
        fn reflect_owned(self: ::std::boxed::Box<Self>) -> #reflect_owned_ {
            #reflect_owned_::#kind(self)
        }
    }
}
