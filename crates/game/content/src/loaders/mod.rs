//! Content loaders for reading game data from files.
//!
//! Each loader accepts either a path or the raw text, so the same parsing
//! backs directory content and the data embedded in this crate.

pub mod builtin;
pub mod config;
pub mod factory;
pub mod templates;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use templates::{TemplateLoader, TemplatesFile};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
