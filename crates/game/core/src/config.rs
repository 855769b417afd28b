use crate::error::{ErrorSeverity, GameError};
use crate::terrain::TerrainConfig;
use crate::types::Dimensions;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Seed for terrain and spawning. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub map_width: u32,
    pub map_height: u32,
    pub screen_width: u32,
    pub screen_height: u32,
    /// Creatures drawn at random from the creature repository on entry.
    pub creature_count: u32,
    pub terrain: TerrainConfig,
}

impl GameConfig {
    pub const DEFAULT_MAP_WIDTH: u32 = 500;
    pub const DEFAULT_MAP_HEIGHT: u32 = 500;
    pub const DEFAULT_SCREEN_WIDTH: u32 = 80;
    pub const DEFAULT_SCREEN_HEIGHT: u32 = 24;

    pub fn new() -> Self {
        Self {
            seed: None,
            map_width: Self::DEFAULT_MAP_WIDTH,
            map_height: Self::DEFAULT_MAP_HEIGHT,
            screen_width: Self::DEFAULT_SCREEN_WIDTH,
            screen_height: Self::DEFAULT_SCREEN_HEIGHT,
            creature_count: 0,
            terrain: TerrainConfig::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn map_dimensions(&self) -> Dimensions {
        Dimensions::new(self.map_width, self.map_height)
    }

    pub fn screen_dimensions(&self) -> Dimensions {
        Dimensions::new(self.screen_width, self.screen_height)
    }

    /// Checks the preconditions the viewport and generator rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.map_dimensions().fits(self.screen_dimensions()) {
            return Err(ConfigError::MapSmallerThanScreen {
                map: self.map_dimensions(),
                screen: self.screen_dimensions(),
            });
        }

        if !(0.0..=1.0).contains(&self.terrain.fill_ratio) {
            return Err(ConfigError::InvalidFillRatio(self.terrain.fill_ratio));
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration values that violate a precondition.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "map {}x{} is smaller than screen {}x{}",
        .map.width, .map.height, .screen.width, .screen.height
    )]
    MapSmallerThanScreen {
        map: Dimensions,
        screen: Dimensions,
    },

    #[error("terrain fill ratio {0} is outside [0, 1]")]
    InvalidFillRatio(f64),
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::MapSmallerThanScreen { .. } => "CONFIG_MAP_SMALLER_THAN_SCREEN",
            ConfigError::InvalidFillRatio(_) => "CONFIG_INVALID_FILL_RATIO",
        }
    }
}
