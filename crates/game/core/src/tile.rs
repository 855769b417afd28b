use crate::glyph::{Color, Glyph};

/// Immutable terrain variants stored in the map grid.
///
/// Tiles are plain `Copy` values; every cell of a grid refers to one of these
/// process-wide constants and nothing mutates them after generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Tile {
    /// Unexplored or out-of-range cell. Returned for every query outside the map.
    #[default]
    Null,
    Floor,
    Wall,
}

impl Tile {
    const NULL_GLYPH: Glyph = Glyph::plain(' ');
    const FLOOR_GLYPH: Glyph = Glyph::plain('.');
    const WALL_GLYPH: Glyph = Glyph::new('#', Color::GOLDENROD, Color::BLACK);

    pub const fn glyph(self) -> Glyph {
        match self {
            Tile::Null => Self::NULL_GLYPH,
            Tile::Floor => Self::FLOOR_GLYPH,
            Tile::Wall => Self::WALL_GLYPH,
        }
    }

    pub const fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn only_floor_is_walkable() {
        let walkable: Vec<Tile> = Tile::iter().filter(|t| t.is_walkable()).collect();
        assert_eq!(walkable, vec![Tile::Floor]);
    }

    #[test]
    fn wall_is_drawn_in_goldenrod() {
        let glyph = Tile::Wall.glyph();
        assert_eq!(glyph.ch, '#');
        assert_eq!(glyph.foreground, Color::GOLDENROD);
    }
}
