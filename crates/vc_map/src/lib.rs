#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod convert;
mod entry;
mod error;
mod mapper;
mod options;
mod registry;
mod set;

pub mod member;
pub mod model;
pub mod strategy;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use cache::ConverterCache;
pub use convert::{ConvertError, Stringify};
pub use entry::{EntryId, MappingEntry};
pub use error::{AccessError, MapError};
pub use mapper::Mapper;
pub use options::{MapOptions, MapperConfig};
pub use registry::MappingRegistry;
pub use set::MappingSet;
