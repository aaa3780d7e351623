use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Options applied when a mapping set is discovered.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MapOptions: u8 {
        /// Include destination members whose write access is restricted.
        const USE_PRIVATE_SETTER = 1 << 0;
    }
}

/// Settings of a [`Mapper`](crate::Mapper).
///
/// Missing keys take their default value, so a partial document is valid.
///
/// ```
/// use vc_map::{MapOptions, MapperConfig};
///
/// let config: MapperConfig = serde_json::from_str(r#"{ "use_private_setter": true }"#).unwrap();
/// assert_eq!(config.max_depth, 32);
/// assert_eq!(config.options(), MapOptions::USE_PRIVATE_SETTER);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Maximum nesting of complex entries followed by one mapping call.
    pub max_depth: usize,
    /// Default for [`MapOptions::USE_PRIVATE_SETTER`] when resolving.
    pub use_private_setter: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            use_private_setter: false,
        }
    }
}

impl MapperConfig {
    /// Options used by [`Mapper::resolve`](crate::Mapper::resolve).
    pub fn options(&self) -> MapOptions {
        let mut options = MapOptions::empty();
        options.set(MapOptions::USE_PRIVATE_SETTER, self.use_private_setter);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::{MapOptions, MapperConfig};

    #[test]
    fn load_from_ron() {
        let config: MapperConfig = ron::from_str("(max_depth: 4)").unwrap();
        assert_eq!(config.max_depth, 4);
        assert!(!config.use_private_setter);
        assert_eq!(config.options(), MapOptions::empty());
    }

    #[test]
    fn json_round_trip() {
        let config = MapperConfig {
            max_depth: 8,
            use_private_setter: true,
        };
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<MapperConfig>(&text).unwrap(), config);
    }
}
