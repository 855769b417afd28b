//! Content factory for loading a complete content set.

use std::path::{Path, PathBuf};

use cavern_core::{EntityCatalog, GameConfig};

use crate::loaders::{ConfigLoader, LoadResult, TemplateLoader, builtin};

/// Where a factory reads its content from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Builtin,
    Directory(PathBuf),
}

/// Content factory that loads all game content from a data directory or
/// from the data embedded in this crate.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── templates.ron
/// ```
#[derive(Debug, Clone)]
pub struct ContentFactory {
    source: Source,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Directory(data_dir.into()),
        }
    }

    /// Factory serving the embedded content.
    pub fn builtin() -> Self {
        Self {
            source: Source::Builtin,
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        match &self.source {
            Source::Builtin => builtin::config(),
            Source::Directory(dir) => ConfigLoader::load(&dir.join("config.toml")),
        }
    }

    /// Load the player and creature templates from `templates.ron`.
    pub fn load_catalog(&self) -> LoadResult<EntityCatalog> {
        match &self.source {
            Source::Builtin => builtin::catalog(),
            Source::Directory(dir) => TemplateLoader::load(&dir.join("templates.ron")),
        }
    }

    /// Returns the data directory path, or `None` for built-in content.
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.source {
            Source::Builtin => None,
            Source::Directory(dir) => Some(dir.as_path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Some(Path::new("/tmp/data")));
        assert_eq!(ContentFactory::builtin().data_dir(), None);
    }

    #[test]
    fn loads_from_a_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "map_width = 120\nmap_height = 90\ncreature_count = 3\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("templates.ron"),
            r#"(creatures: [(name: "slime", glyph: 's', speed: 80, behavior: wanderer)])"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        let config = factory.load_config().unwrap();
        let catalog = factory.load_catalog().unwrap();

        assert_eq!(config.map_width, 120);
        assert_eq!(config.creature_count, 3);
        assert_eq!(catalog.creatures.names().collect::<Vec<_>>(), vec!["slime"]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();

        assert!(err.to_string().contains("templates.ron"));
    }
}
