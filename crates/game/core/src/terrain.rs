//! Cellular-automaton terrain generation.
//!
//! Generation is a pure pipeline: a randomly seeded [`CellGrid`] is smoothed
//! for a fixed number of synchronous generations and then materialized once
//! into a [`TileGrid`]. Intermediate generations never allocate tiles.
//!
//! The smoothing rule counts the eight neighbours of each cell on a bounded
//! grid (cells past the edge count as dead):
//! - a dead cell is born when its count is listed in `born`
//! - a live cell survives when its count is listed in `survive`

use rand::Rng;

use crate::map::TileGrid;
use crate::tile::Tile;
use crate::types::{Dimensions, Position};

/// Neighbour-count thresholds for one automaton generation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutomatonRules {
    pub born: Vec<u8>,
    pub survive: Vec<u8>,
}

impl AutomatonRules {
    fn mask(counts: &[u8]) -> u16 {
        counts
            .iter()
            .filter(|&&count| count <= 8)
            .fold(0u16, |mask, &count| mask | (1 << count))
    }
}

impl Default for AutomatonRules {
    fn default() -> Self {
        Self {
            born: vec![5, 6, 7, 8],
            survive: vec![4, 5, 6, 7, 8],
        }
    }
}

/// Tunables for [`generate`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainConfig {
    /// Probability that a cell starts alive.
    pub fill_ratio: f64,
    /// Number of smoothing generations applied before materializing.
    pub iterations: u32,
    pub rules: AutomatonRules,
}

impl TerrainConfig {
    pub const DEFAULT_FILL_RATIO: f64 = 0.5;
    pub const DEFAULT_ITERATIONS: u32 = 3;
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            fill_ratio: Self::DEFAULT_FILL_RATIO,
            iterations: Self::DEFAULT_ITERATIONS,
            rules: AutomatonRules::default(),
        }
    }
}

/// One automaton generation: alive/dead flags in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    dimensions: Dimensions,
    alive: Vec<bool>,
}

impl CellGrid {
    /// All-dead grid.
    pub fn new(width: u32, height: u32) -> Self {
        let dimensions = Dimensions::new(width, height);
        Self {
            dimensions,
            alive: vec![false; dimensions.area()],
        }
    }

    /// Grid whose cells are independently alive with probability `probability`.
    pub fn randomize<R: Rng + ?Sized>(
        width: u32,
        height: u32,
        probability: f64,
        rng: &mut R,
    ) -> Self {
        let dimensions = Dimensions::new(width, height);
        let probability = probability.clamp(0.0, 1.0);
        let alive = (0..dimensions.area())
            .map(|_| rng.gen_bool(probability))
            .collect();

        Self { dimensions, alive }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.dimensions.width as usize + x as usize
    }

    pub fn is_alive(&self, position: Position) -> bool {
        self.dimensions.contains(position)
            && self.alive[self.index(position.x as u32, position.y as u32)]
    }

    pub fn set_alive(&mut self, position: Position, alive: bool) {
        if self.dimensions.contains(position) {
            let index = self.index(position.x as u32, position.y as u32);
            self.alive[index] = alive;
        }
    }

    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|&&alive| alive).count()
    }

    /// Number of live cells among the eight neighbours of `position`.
    pub fn alive_neighbors(&self, position: Position) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx, dy) != (0, 0) && self.is_alive(position.offset(dx, dy)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Computes the next generation without touching `self`.
    pub fn step(&self, rules: &AutomatonRules) -> CellGrid {
        let born = AutomatonRules::mask(&rules.born);
        let survive = AutomatonRules::mask(&rules.survive);
        let mut next = CellGrid::new(self.dimensions.width, self.dimensions.height);

        for y in 0..self.dimensions.height {
            for x in 0..self.dimensions.width {
                let position = Position::new(x as i32, y as i32);
                let neighbors = self.alive_neighbors(position);
                let mask = if self.alive[self.index(x, y)] {
                    survive
                } else {
                    born
                };
                let index = next.index(x, y);
                next.alive[index] = mask & (1 << neighbors) != 0;
            }
        }

        next
    }

    /// Converts the generation into terrain: live cells become floor, dead cells wall.
    pub fn materialize(&self) -> TileGrid {
        let mut grid = TileGrid::new(self.dimensions.width, self.dimensions.height);
        for y in 0..self.dimensions.height {
            for x in 0..self.dimensions.width {
                let tile = if self.alive[self.index(x, y)] {
                    Tile::Floor
                } else {
                    Tile::Wall
                };
                grid.set(Position::new(x as i32, y as i32), tile);
            }
        }
        grid
    }
}

/// Generates a `width × height` terrain grid.
pub fn generate<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    config: &TerrainConfig,
    rng: &mut R,
) -> TileGrid {
    let mut cells = CellGrid::randomize(width, height, config.fill_ratio, rng);
    for _ in 0..config.iterations {
        cells = cells.step(&config.rules);
    }

    let grid = cells.materialize();
    tracing::debug!(
        width,
        height,
        iterations = config.iterations,
        floor = cells.alive_count(),
        "generated terrain"
    );
    grid
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn generated_grid_has_no_null_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = generate(60, 40, &TerrainConfig::default(), &mut rng);

        assert_eq!(grid.dimensions(), Dimensions::new(60, 40));
        assert!(
            grid.iter()
                .all(|(_, tile)| matches!(tile, Tile::Floor | Tile::Wall))
        );
        assert!(grid.iter().any(|(_, tile)| tile == Tile::Floor));
        assert!(grid.iter().any(|(_, tile)| tile == Tile::Wall));
    }

    #[test]
    fn same_seed_gives_same_terrain() {
        let config = TerrainConfig::default();
        let a = generate(30, 30, &config, &mut StdRng::seed_from_u64(9));
        let b = generate(30, 30, &config, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_fill_ratio_yields_solid_rock() {
        let config = TerrainConfig {
            fill_ratio: 0.0,
            ..TerrainConfig::default()
        };
        let grid = generate(10, 10, &config, &mut StdRng::seed_from_u64(1));
        assert!(grid.iter().all(|(_, tile)| tile == Tile::Wall));
    }

    #[test]
    fn neighbors_past_the_edge_count_as_dead() {
        let mut cells = CellGrid::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                cells.set_alive(Position::new(x, y), true);
            }
        }

        assert_eq!(cells.alive_neighbors(Position::new(1, 1)), 8);
        assert_eq!(cells.alive_neighbors(Position::new(0, 0)), 3);
        assert_eq!(cells.alive_neighbors(Position::new(1, 0)), 5);
    }

    #[test]
    fn step_applies_birth_and_survival_thresholds() {
        // Full 3x3 block: corners have 3 neighbours (die), edges 5 and
        // the centre 8 (survive).
        let mut cells = CellGrid::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                cells.set_alive(Position::new(x, y), true);
            }
        }

        let next = cells.step(&AutomatonRules::default());

        assert!(!next.is_alive(Position::new(0, 0)));
        assert!(!next.is_alive(Position::new(2, 2)));
        assert!(next.is_alive(Position::new(1, 0)));
        assert!(next.is_alive(Position::new(1, 1)));
        // The source generation is untouched.
        assert!(cells.is_alive(Position::new(0, 0)));
    }

    #[test]
    fn dead_cell_is_born_with_five_live_neighbors() {
        let mut cells = CellGrid::new(3, 3);
        for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1)] {
            cells.set_alive(Position::new(x, y), true);
        }

        let next = cells.step(&AutomatonRules::default());
        assert!(next.is_alive(Position::new(1, 1)));
    }
}
