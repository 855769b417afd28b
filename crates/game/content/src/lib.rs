//! Data-driven content definitions and loaders.
//!
//! This crate houses the built-in game content and provides loaders for
//! RON/TOML data files:
//! - Game configuration (data-driven via TOML)
//! - Entity templates for the player and creature repository (data-driven via RON)
//!
//! All loaders use cavern-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, TemplateLoader, TemplatesFile, builtin};
