//! Entities and the templates they are built from.

use crate::glyph::{Color, Glyph};
use crate::repository::Repository;
use crate::types::{EntityId, Position};

/// Speed of an ordinary actor. Twice this value acts twice as often.
pub const NORMAL_SPEED: u32 = 100;

/// What an entity does when the engine grants it a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Behavior {
    /// Human-controlled actor; its turn locks the engine until input arrives.
    Player,
    /// Takes one random cardinal step per turn.
    Wanderer,
    /// Spends its turn doing nothing.
    #[default]
    Stationary,
}

/// Declarative description of an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityTemplate {
    pub name: String,
    pub glyph: char,
    #[cfg_attr(feature = "serde", serde(default = "default_foreground"))]
    pub foreground: Color,
    #[cfg_attr(feature = "serde", serde(default = "default_background"))]
    pub background: Color,
    #[cfg_attr(feature = "serde", serde(default = "default_speed"))]
    pub speed: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: Behavior,
}

#[cfg(feature = "serde")]
fn default_foreground() -> Color {
    Color::WHITE
}

#[cfg(feature = "serde")]
fn default_background() -> Color {
    Color::BLACK
}

#[cfg(feature = "serde")]
fn default_speed() -> u32 {
    NORMAL_SPEED
}

impl EntityTemplate {
    pub fn new(name: impl Into<String>, glyph: char) -> Self {
        Self {
            name: name.into(),
            glyph,
            foreground: Color::WHITE,
            background: Color::BLACK,
            speed: NORMAL_SPEED,
            behavior: Behavior::Stationary,
        }
    }

    pub fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// The `@` player template used when no content overrides it.
    pub fn player() -> Self {
        Self::new("player", '@').with_behavior(Behavior::Player)
    }
}

/// Repository producing entities from templates.
pub type EntityRepository = Repository<EntityTemplate, Entity>;

/// Creates an empty entity repository with the standard constructor.
pub fn entity_repository(name: impl Into<String>) -> EntityRepository {
    Repository::new(name, Entity::from_template)
}

/// Entity templates available to a play session.
///
/// The player template is kept apart from the creature repository so that a
/// random creature draw can never produce a second human actor.
#[derive(Debug)]
pub struct EntityCatalog {
    pub player: EntityTemplate,
    pub creatures: EntityRepository,
}

impl EntityCatalog {
    pub fn new(player: EntityTemplate) -> Self {
        Self {
            player,
            creatures: entity_repository("creatures"),
        }
    }

    pub fn create_player(&self) -> Entity {
        Entity::from_template(&self.player)
    }
}

impl Default for EntityCatalog {
    fn default() -> Self {
        Self::new(EntityTemplate::player())
    }
}

/// Positioned actor hosted by a map.
///
/// The position is only ever changed by the map's movement gate; there is no
/// public setter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    id: EntityId,
    name: String,
    glyph: Glyph,
    position: Position,
    speed: u32,
    behavior: Behavior,
}

impl Entity {
    pub fn from_template(template: &EntityTemplate) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            name: template.name.clone(),
            glyph: Glyph::new(template.glyph, template.foreground, template.background),
            position: Position::ORIGIN,
            speed: template.speed,
            behavior: template.behavior,
        }
    }

    /// Places a not-yet-hosted entity. Used for designated spawn points.
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Name of the template this entity was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn glyph(&self) -> Glyph {
        self.glyph
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn is_player(&self) -> bool {
        self.behavior == Behavior::Player
    }

    pub(crate) fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_copies_template_fields() {
        let template = EntityTemplate::new("bat", 'B')
            .with_colors(Color::YELLOW, Color::BLACK)
            .with_speed(200)
            .with_behavior(Behavior::Wanderer);

        let entity = Entity::from_template(&template);

        assert_eq!(entity.name(), "bat");
        assert_eq!(entity.glyph(), Glyph::new('B', Color::YELLOW, Color::BLACK));
        assert_eq!(entity.speed(), 200);
        assert_eq!(entity.behavior(), Behavior::Wanderer);
        assert!(entity.id().is_unassigned());
        assert!(!entity.is_player());
    }

    #[test]
    fn catalog_builds_player_and_creatures() {
        let mut catalog = EntityCatalog::default();
        catalog
            .creatures
            .define("fungus", EntityTemplate::new("fungus", 'F'));

        assert!(catalog.create_player().is_player());
        assert_eq!(catalog.creatures.create("fungus").unwrap().name(), "fungus");
        assert!(catalog.creatures.create("player").is_err());
    }
}
