#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::vc_reflect` paths, which must also resolve
// inside this crate (unit tests) and its doc tests.
extern crate self as vc_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod hash;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;
pub mod scalar;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use reflection::Reflect;
pub use vc_reflect_derive as derive;
