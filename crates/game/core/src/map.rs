//! Bounded tile grid, hosted entities and the movement gate.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::Scheduler;
use crate::entity::Entity;
use crate::error::{ErrorSeverity, GameError};
use crate::tile::Tile;
use crate::types::{Dimensions, EntityId, Position};

/// Random probes made before falling back to a full scan for free floor.
const RANDOM_PLACEMENT_ATTEMPTS: usize = 1024;

/// Errors raised while placing entities on a map.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("no empty floor cell available to place '{name}'")]
    NoFloorAvailable { name: String },

    #[error("cannot place '{name}' at {position}: cell is not empty floor")]
    SpawnBlocked { name: String, position: Position },

    #[error("map already hosts a human actor ({existing})")]
    DuplicatePlayer { existing: EntityId },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MapError::NoFloorAvailable { .. } => ErrorSeverity::Fatal,
            MapError::SpawnBlocked { .. } => ErrorSeverity::Recoverable,
            MapError::DuplicatePlayer { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MapError::NoFloorAvailable { .. } => "MAP_NO_FLOOR_AVAILABLE",
            MapError::SpawnBlocked { .. } => "MAP_SPAWN_BLOCKED",
            MapError::DuplicatePlayer { .. } => "MAP_DUPLICATE_PLAYER",
        }
    }
}

/// Row-major `width × height` grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    dimensions: Dimensions,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Grid with every cell set to [`Tile::Null`].
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Tile::Null)
    }

    pub fn filled(width: u32, height: u32, tile: Tile) -> Self {
        let dimensions = Dimensions::new(width, height);
        Self {
            dimensions,
            tiles: vec![tile; dimensions.area()],
        }
    }

    /// Parses rows of `#` (wall), `.` (floor) and anything else (null).
    ///
    /// Rows shorter than the longest one are padded with null tiles.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut grid = Self::new(width, height);

        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let tile = match ch {
                    '#' => Tile::Wall,
                    '.' => Tile::Floor,
                    _ => Tile::Null,
                };
                grid.set(Position::new(x as i32, y as i32), tile);
            }
        }

        grid
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions
            .contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    /// Tile at `position`, or [`Tile::Null`] outside the grid.
    pub fn get(&self, position: Position) -> Tile {
        self.index(position)
            .map(|index| self.tiles[index])
            .unwrap_or(Tile::Null)
    }

    /// Stores `tile` at `position`; writes outside the grid are ignored.
    pub fn set(&mut self, position: Position, tile: Tile) {
        if let Some(index) = self.index(position) {
            self.tiles[index] = tile;
        }
    }

    /// Iterates cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        let width = self.dimensions.width.max(1) as usize;
        self.tiles.iter().enumerate().map(move |(index, &tile)| {
            let position = Position::new((index % width) as i32, (index / width) as i32);
            (position, tile)
        })
    }
}

/// Why a move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockReason {
    /// Destination tile is not walkable (including out-of-range null tiles).
    Terrain,
    /// Another entity stands on the destination.
    Occupied(EntityId),
    /// The mover is not hosted by this map.
    UnknownEntity,
    /// The engine is not waiting for the mover's input.
    NotYourTurn,
}

/// Result of a movement attempt. Rejection is a normal outcome, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: Position, to: Position },
    Blocked(BlockReason),
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// Terrain plus the entities living on it.
///
/// The map owns its turn [`Scheduler`]; every hosted entity is scheduled and
/// removal unschedules it. At most one entity with the player behavior is
/// hosted at a time.
#[derive(Clone, Debug)]
pub struct Map {
    grid: TileGrid,
    entities: Vec<Entity>,
    next_id: u32,
    scheduler: Scheduler,
}

impl Map {
    /// Map with no entities. Mostly useful to stage a custom population.
    pub fn empty(grid: TileGrid) -> Self {
        Self {
            grid,
            entities: Vec::new(),
            next_id: 0,
            scheduler: Scheduler::new(),
        }
    }

    /// Wraps `grid` and places `player` on a random empty floor cell.
    pub fn new<R: Rng + ?Sized>(
        grid: TileGrid,
        player: Entity,
        rng: &mut R,
    ) -> Result<Self, MapError> {
        let mut map = Self::empty(grid);
        map.add_entity_at_random_position(player, rng)?;
        Ok(map)
    }

    /// Wraps `grid` and places `player` at its current position.
    pub fn with_spawn(grid: TileGrid, player: Entity) -> Result<Self, MapError> {
        let mut map = Self::empty(grid);
        map.add_entity(player)?;
        Ok(map)
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn contains(&self, position: Position) -> bool {
        self.grid.dimensions().contains(position)
    }

    /// Tile at `position`; [`Tile::Null`] for anything outside the map.
    pub fn tile(&self, position: Position) -> Tile {
        self.grid.get(position)
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Tile {
        self.tile(Position::new(x, y))
    }

    /// Hosted entities in the order they were added.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn entity_at(&self, position: Position) -> Option<&Entity> {
        self.entities.iter().find(|e| e.position() == position)
    }

    /// The human-controlled actor, if one is hosted.
    pub fn player(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.is_player())
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub(crate) fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// True when the cell is walkable and nobody stands on it.
    pub fn is_empty_floor(&self, position: Position) -> bool {
        self.tile(position).is_walkable() && self.entity_at(position).is_none()
    }

    /// A uniformly chosen empty floor cell, if the map has any.
    pub fn random_floor_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return None;
        }

        for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
            let candidate = Position::new(
                rng.gen_range(0..width) as i32,
                rng.gen_range(0..height) as i32,
            );
            if self.is_empty_floor(candidate) {
                return Some(candidate);
            }
        }

        let free: Vec<Position> = self
            .grid
            .iter()
            .map(|(position, _)| position)
            .filter(|&position| self.is_empty_floor(position))
            .collect();
        free.choose(rng).copied()
    }

    /// Hosts `entity` at its current position and schedules it.
    pub fn add_entity(&mut self, mut entity: Entity) -> Result<EntityId, MapError> {
        if let Some(existing) = self.player().filter(|_| entity.is_player()) {
            return Err(MapError::DuplicatePlayer {
                existing: existing.id(),
            });
        }

        if !self.is_empty_floor(entity.position()) {
            return Err(MapError::SpawnBlocked {
                name: entity.name().to_string(),
                position: entity.position(),
            });
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.assign_id(id);

        self.scheduler.schedule(id, entity.speed());
        tracing::debug!(
            entity = %id,
            name = entity.name(),
            position = %entity.position(),
            "spawned entity"
        );
        self.entities.push(entity);

        Ok(id)
    }

    /// Hosts `entity` on a random empty floor cell.
    pub fn add_entity_at_random_position<R: Rng + ?Sized>(
        &mut self,
        entity: Entity,
        rng: &mut R,
    ) -> Result<EntityId, MapError> {
        let position = self
            .random_floor_position(rng)
            .ok_or_else(|| MapError::NoFloorAvailable {
                name: entity.name().to_string(),
            })?;
        self.add_entity(entity.at(position))
    }

    /// Stops hosting and scheduling an entity.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id() == id)?;
        self.scheduler.unschedule(id);
        let entity = self.entities.remove(index);
        tracing::debug!(entity = %id, name = entity.name(), "removed entity");
        Some(entity)
    }

    /// The single gate for changing an entity's position.
    ///
    /// The move succeeds only if the destination tile is walkable and no other
    /// entity occupies it; otherwise nothing changes.
    pub fn try_move(&mut self, id: EntityId, destination: Position) -> MoveOutcome {
        let Some(index) = self.entities.iter().position(|e| e.id() == id) else {
            return MoveOutcome::Blocked(BlockReason::UnknownEntity);
        };

        if !self.tile(destination).is_walkable() {
            return MoveOutcome::Blocked(BlockReason::Terrain);
        }

        if let Some(other) = self
            .entities
            .iter()
            .find(|e| e.id() != id && e.position() == destination)
        {
            return MoveOutcome::Blocked(BlockReason::Occupied(other.id()));
        }

        let entity = &mut self.entities[index];
        let from = entity.position();
        entity.set_position(destination);

        MoveOutcome::Moved {
            from,
            to: destination,
        }
    }

    /// Relative form of [`Map::try_move`].
    pub fn try_move_by(&mut self, id: EntityId, dx: i32, dy: i32) -> MoveOutcome {
        match self.entity(id) {
            Some(entity) => {
                let destination = entity.position().offset(dx, dy);
                self.try_move(id, destination)
            }
            None => MoveOutcome::Blocked(BlockReason::UnknownEntity),
        }
    }
}
