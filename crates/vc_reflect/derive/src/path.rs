//! Paths of `vc_reflect` items used by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Path of the `vc_reflect` crate as seen from the invoking crate.
///
/// Reads the caller's `Cargo.toml`, so call it once per macro invocation.
pub(crate) fn vc_reflect() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.crate_path("vc_reflect"))
}

macro_rules! define_paths {
    ($($name:ident => $($segment:ident)::+;)*) => {$(
        #[inline(always)]
        pub(crate) fn $name(vc_reflect: &syn::Path) -> TokenStream {
            quote! { #vc_reflect::$($segment)::+ }
        }
    )*};
}

define_paths! {
    reflect_ => Reflect;
    type_path_ => info::TypePath;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    struct_info_ => info::StructInfo;
    enum_info_ => info::EnumInfo;
    variant_info_ => info::VariantInfo;
    named_field_ => info::NamedField;
    accessor_info_ => info::AccessorInfo;
    method_info_ => info::MethodInfo;
    visibility_ => info::Visibility;
    reflect_kind_ => info::ReflectKind;
    non_generic_cell_ => impls::NonGenericTypeInfoCell;
    struct_ => ops::Struct;
    enum_ => ops::Enum;
    struct_debug_ => ops::struct_debug;
    reflect_ref_ => ops::ReflectRef;
    reflect_mut_ => ops::ReflectMut;
    reflect_owned_ => ops::ReflectOwned;
    clone_error_ => ops::ReflectCloneError;
    get_type_meta_ => registry::GetTypeMeta;
    type_meta_ => registry::TypeMeta;
    type_registry_ => registry::TypeRegistry;
    from_type_ => registry::FromType;
    trait_default_ => registry::TypeTraitDefault;
    trait_display_ => registry::TypeTraitDisplay;
    trait_from_str_ => registry::TypeTraitFromStr;
    trait_convertible_ => registry::TypeTraitConvertible;
    trait_converter_ => registry::TypeTraitConverter;
    scalar_ => scalar::Scalar;
    scalar_error_ => scalar::ScalarError;
    convertible_ => scalar::Convertible;
    enum_from_scalar_ => scalar::enum_from_scalar;
}
