#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_map as map;
pub use vc_reflect as reflect;

pub use vc_map::{MapError, MapOptions, Mapper, MapperConfig, MappingSet};
pub use vc_reflect::Reflect;
