//! Lowering configuration.

use serde::{Deserialize, Serialize};

/// Options that influence how schema types are lowered and named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoweringConfig {
    /// Drop config/state and list-wrapping containers from derived names.
    pub compress_paths: bool,
    /// Give every enumeration leaf its own type instead of sharing identical ones.
    pub skip_enum_dedup: bool,
    /// Seed enumeration names from the leaf name rather than the full path.
    pub shorten_enum_leaf_names: bool,
}

impl LoweringConfig {
    /// Creates a configuration with every option disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            compress_paths: false,
            skip_enum_dedup: false,
            shorten_enum_leaf_names: false,
        }
    }

    /// Enables or disables path compression.
    #[must_use]
    pub const fn compress_paths(mut self, enabled: bool) -> Self {
        self.compress_paths = enabled;
        self
    }

    /// Enables or disables per-leaf enumeration types.
    #[must_use]
    pub const fn skip_enum_dedup(mut self, enabled: bool) -> Self {
        self.skip_enum_dedup = enabled;
        self
    }

    /// Enables or disables leaf-name-only enumeration naming.
    #[must_use]
    pub const fn shorten_enum_leaf_names(mut self, enabled: bool) -> Self {
        self.shorten_enum_leaf_names = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_disabled() {
        assert_eq!(LoweringConfig::default(), LoweringConfig::new());
        assert!(!LoweringConfig::default().compress_paths);
    }

    #[test]
    fn test_builder() {
        let config = LoweringConfig::new()
            .compress_paths(true)
            .skip_enum_dedup(true);
        assert!(config.compress_paths);
        assert!(config.skip_enum_dedup);
        assert!(!config.shorten_enum_leaf_names);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let config: LoweringConfig =
            serde_json::from_str(r#"{"shorten_enum_leaf_names": true}"#).expect("parse");
        assert_eq!(config, LoweringConfig::new().shorten_enum_leaf_names(true));
    }
}
