//! Derive macro of `vc_reflect`, see [`Reflect`].

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection derivation
///
/// `#[derive(Reflect)]` implements `TypePath`, `Typed`, `Reflect` and
/// `GetTypeMeta`, plus:
///
/// - `Struct` for structs with named fields (or unit structs);
/// - `Enum` and `Convertible` for enums whose variants carry no data.
///
/// Tuple structs, data-carrying variants and generic types are rejected.
///
/// ## Type attributes
///
/// ```rust, ignore
/// #[derive(Reflect, Default, Clone)]
/// #[reflect(default, clone, converter = MyConverter, type_path = "app::dto::User")]
/// #[reflect(accessor(EyeColor, get = eye_color, set = set_eye_color))]
/// #[reflect(accessor(Secret, set = set_secret, restricted))]
/// #[reflect(indexed(Item, get = item_at))]
/// struct User { /* ... */ }
/// ```
///
/// - `default`, `display`, `from_str`: the std trait is implemented, register
///   the matching type trait.
/// - `clone`: `reflect_clone` uses `Clone` instead of cloning field by field.
/// - `converter = Path`: register `Path::default()` as custom converter.
/// - `type_path = "..."`: override the reflected type path.
/// - `accessor(Name, get = method, set = method, restricted)`: a member backed
///   by methods, `restricted` marks the setter as non-public.
/// - `indexed(Name, get = method, set = method)`: same, with an index argument.
///
/// ## Field attributes
///
/// - `skip`: the field is not reflected. Field-wise `reflect_clone` fills it
///   with `Default::default()`.
/// - `private_set`: the field reads as public but writes as restricted.
///
/// Fields without `pub` are restricted for both reading and writing.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectDerive::from_input(&ast) {
        Ok(derive) => impls::impl_reflect(&derive).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
