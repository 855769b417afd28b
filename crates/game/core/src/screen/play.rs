use rand::SeedableRng;
use rand::rngs::StdRng;

use super::ScreenError;
use super::render::RenderSink;
use crate::config::GameConfig;
use crate::engine::{GameEngine, TurnError, TurnRecord};
use crate::entity::{Entity, EntityCatalog};
use crate::map::{BlockReason, Map, MoveOutcome};
use crate::terrain;
use crate::types::{Dimensions, EntityId, Position};
use crate::viewport::Viewport;

/// The exploration screen: a generated map, its population and the camera.
#[derive(Debug)]
pub struct PlayScreen {
    map: Map,
    rng: StdRng,
    player: EntityId,
    screen: Dimensions,
}

impl PlayScreen {
    /// Generates terrain, spawns the player and `creature_count` random creatures.
    ///
    /// The engine is not started; see [`PlayScreen::start`].
    pub fn new(
        config: &GameConfig,
        catalog: &EntityCatalog,
        seed: u64,
    ) -> Result<Self, ScreenError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let grid = terrain::generate(
            config.map_width,
            config.map_height,
            &config.terrain,
            &mut rng,
        );
        let map = Map::new(grid, catalog.create_player(), &mut rng)?;
        Self::populate(map, rng, catalog, config.creature_count, config.screen_dimensions())
    }

    /// Builds a play screen around an existing map that already hosts a player.
    pub fn from_map(map: Map, screen: Dimensions, seed: u64) -> Result<Self, ScreenError> {
        let player = map
            .player()
            .map(Entity::id)
            .ok_or(TurnError::NoHumanActor)?;

        Ok(Self {
            map,
            rng: StdRng::seed_from_u64(seed),
            player,
            screen,
        })
    }

    fn populate(
        mut map: Map,
        mut rng: StdRng,
        catalog: &EntityCatalog,
        creature_count: u32,
        screen: Dimensions,
    ) -> Result<Self, ScreenError> {
        for _ in 0..creature_count {
            let creature = catalog.creatures.create_random(&mut rng)?;
            map.add_entity_at_random_position(creature, &mut rng)?;
        }

        let player = map
            .player()
            .map(Entity::id)
            .ok_or(TurnError::NoHumanActor)?;

        Ok(Self {
            map,
            rng,
            player,
            screen,
        })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> Option<&Entity> {
        self.map.entity(self.player)
    }

    /// Camera focal point: the player's position.
    pub fn focus(&self) -> Position {
        self.player()
            .map(Entity::position)
            .unwrap_or(Position::ORIGIN)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::centered_on(self.focus(), self.map.dimensions(), self.screen)
    }

    /// True while the engine is locked on the player's turn.
    pub fn is_awaiting_input(&self) -> bool {
        let scheduler = self.map.scheduler();
        scheduler.has_started() && scheduler.is_locked()
    }

    /// Runs turns until the player's first turn.
    pub fn start(&mut self) -> Result<Vec<TurnRecord>, TurnError> {
        GameEngine::new(&mut self.map, &mut self.rng).start()
    }

    /// Input hook: attempts to step the player by `(dx, dy)`.
    ///
    /// Outside the player's turn nothing moves and the outcome is
    /// [`BlockReason::NotYourTurn`].
    pub fn move_player(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        if !self.is_awaiting_input() {
            return MoveOutcome::Blocked(BlockReason::NotYourTurn);
        }
        self.map.try_move_by(self.player, dx, dy)
    }

    /// Input hook: ends the player's turn and runs turns until the next one.
    pub fn unlock(&mut self) -> Result<Vec<TurnRecord>, TurnError> {
        GameEngine::new(&mut self.map, &mut self.rng).unlock()
    }

    /// Draws the visible tiles, then the visible entities on top.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        let viewport = self.viewport();

        for position in viewport.positions() {
            if let Some((x, y)) = viewport.to_screen(position) {
                sink.draw_cell(x, y, self.map.tile(position).glyph());
            }
        }

        for entity in self.map.entities() {
            if let Some((x, y)) = viewport.to_screen(entity.position()) {
                sink.draw_cell(x, y, entity.glyph());
            }
        }
    }
}
