//! Entity template loader.
//!
//! RON format:
//!
//! ```text
//! (
//!     player: (name: "player", glyph: '@', behavior: player),
//!     creatures: [
//!         (name: "bat", glyph: 'B', speed: 200, behavior: wanderer),
//!     ],
//! )
//! ```

use std::path::Path;

use anyhow::Context;
use cavern_core::{EntityCatalog, EntityTemplate};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// On-disk layout of `templates.ron`.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    #[serde(default = "EntityTemplate::player")]
    pub player: EntityTemplate,
    #[serde(default)]
    pub creatures: Vec<EntityTemplate>,
}

/// Loader for the entity catalog from RON files.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load the entity catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<EntityCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid templates {}", path.display()))
    }

    /// Parse template RON text into a catalog.
    ///
    /// Creature names must be unique and creatures may not use the player
    /// behavior; the catalog keeps exactly one human actor template.
    pub fn parse(content: &str) -> LoadResult<EntityCatalog> {
        let file: TemplatesFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse templates RON: {}", e))?;

        let mut catalog = EntityCatalog::new(file.player);
        for template in file.creatures {
            if template.behavior == cavern_core::Behavior::Player {
                anyhow::bail!("Creature '{}' cannot use the player behavior", template.name);
            }

            let name = template.name.clone();
            if catalog.creatures.define(name.clone(), template).is_some() {
                anyhow::bail!("Duplicate creature template '{}'", name);
            }
        }

        tracing::debug!(
            player = %catalog.player.name,
            creatures = catalog.creatures.len(),
            "loaded entity templates"
        );

        Ok(catalog)
    }
}
