//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use cavern_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing fields take their defaults; the result is validated before it
    /// is returned.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse and validate config TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = ConfigLoader::parse("creature_count = 4\nseed = 12\n").unwrap();

        assert_eq!(config.creature_count, 4);
        assert_eq!(config.seed, Some(12));
        assert_eq!(config.map_width, GameConfig::DEFAULT_MAP_WIDTH);
        assert_eq!(config.terrain.rules.born, vec![5, 6, 7, 8]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = ConfigLoader::parse("map_width = 10\n").unwrap_err();
        assert!(err.to_string().contains("smaller than screen"));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = ConfigLoader::parse("map_width = \"wide\"").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config TOML"));
    }
}
