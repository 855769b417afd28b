//! Deterministic rules and data types for the cavern roguelike.
//!
//! `cavern-core` owns the world model (tiles, maps, entities), the terrain
//! generator, the speed-ordered turn engine and the screen state machine.
//! Rendering and input are reached only through [`screen::RenderSink`] and
//! [`screen::InputEvent`], so any front end can drive it.
//!
//! All position changes flow through [`Map::try_move`], and all turn dispatch
//! flows through [`engine::GameEngine`].
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod glyph;
pub mod map;
pub mod repository;
pub mod screen;
pub mod terrain;
pub mod tile;
pub mod types;
pub mod viewport;

pub use config::{ConfigError, GameConfig};
pub use engine::{
    EngineState, GameEngine, ScheduledTurn, Scheduler, TurnAction, TurnError, TurnRecord,
};
pub use entity::{
    Behavior, Entity, EntityCatalog, EntityRepository, EntityTemplate, NORMAL_SPEED,
    entity_repository,
};
pub use error::{ErrorSeverity, GameError};
pub use glyph::{Color, Glyph, NamedColor};
pub use map::{BlockReason, Map, MapError, MoveOutcome, TileGrid};
pub use repository::{Repository, RepositoryError};
pub use screen::{
    CellBuffer, InputEvent, Key, PlayScreen, RenderSink, Screen, ScreenContext,
    ScreenController, ScreenError, ScreenKind, WinScreen,
};
pub use terrain::{AutomatonRules, CellGrid, TerrainConfig};
pub use tile::Tile;
pub use types::{CardinalDirection, Dimensions, EntityId, Position, Tick};
pub use viewport::{Viewport, compute_origin};
