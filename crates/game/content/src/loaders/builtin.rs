//! Content embedded in the crate at build time.

use cavern_core::{EntityCatalog, GameConfig};

use crate::loaders::{ConfigLoader, LoadResult, TemplateLoader};

pub const CONFIG_TOML: &str = include_str!("../../data/config.toml");
pub const TEMPLATES_RON: &str = include_str!("../../data/templates.ron");

/// Built-in game configuration.
pub fn config() -> LoadResult<GameConfig> {
    ConfigLoader::parse(CONFIG_TOML)
}

/// Built-in player and creature templates.
pub fn catalog() -> LoadResult<EntityCatalog> {
    TemplateLoader::parse(TEMPLATES_RON)
}

#[cfg(test)]
mod tests {
    use cavern_core::Behavior;

    use super::*;

    #[test]
    fn builtin_config_parses() {
        let config = config().unwrap();
        assert_eq!(config.map_width, 500);
        assert_eq!(config.screen_width, 80);
        assert_eq!(config.creature_count, 25);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn builtin_catalog_parses() {
        let catalog = catalog().unwrap();
        assert_eq!(catalog.player.glyph, '@');
        assert_eq!(catalog.player.behavior, Behavior::Player);
        assert!(catalog.creatures.contains("fungus"));
        assert!(catalog.creatures.contains("bat"));
        assert_eq!(catalog.creatures.template("bat").map(|t| t.speed), Some(200));
    }
}
