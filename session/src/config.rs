//! TOML game configuration.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use snake_core::{Difficulty, Direction, GrowthPolicy};
use snake_world::WorldConfig;
use thiserror::Error;

/// Failures raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read game config at {}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The contents are not a valid configuration.
    #[error("failed to parse game config toml contents")]
    Parse(#[from] toml::de::Error),
}

/// Complete description of a game session.
///
/// Every field is optional in the TOML source and defaults to the classic
/// 32x32 layout on medium difficulty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Play area dimensions.
    pub grid: GridConfig,
    /// Snake starting state.
    pub snake: SnakeConfig,
    /// Fruit settings.
    pub fruit: FruitConfig,
    /// Difficulty, which fixes the tick rate.
    pub difficulty: Difficulty,
    /// Whether eating lengthens the snake.
    pub growth: GrowthPolicy,
    /// Whether running into the body ends the game.
    pub self_collision: bool,
    /// Seed for deterministic fruit placement.
    pub seed: Option<u64>,
}

/// `[grid]` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        let world = WorldConfig::default();
        Self {
            width: world.width,
            height: world.height,
        }
    }
}

/// `[snake]` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnakeConfig {
    /// Column of the starting head cell.
    pub start_x: i32,
    /// Row of the starting head cell.
    pub start_y: i32,
    /// Starting number of nodes.
    pub initial_length: usize,
    /// Starting direction of travel.
    pub direction: Direction,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        let world = WorldConfig::default();
        Self {
            start_x: world.start_x,
            start_y: world.start_y,
            initial_length: world.initial_length,
            direction: world.direction,
        }
    }
}

/// `[fruit]` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FruitConfig {
    /// Points awarded per fruit.
    pub value: u32,
}

impl Default for FruitConfig {
    fn default() -> Self {
        Self {
            value: WorldConfig::default().fruit_value,
        }
    }
}

impl GameConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// World parameters described by this configuration.
    #[must_use]
    pub fn world_config(&self) -> WorldConfig {
        WorldConfig {
            width: self.grid.width,
            height: self.grid.height,
            start_x: self.snake.start_x,
            start_y: self.snake.start_y,
            initial_length: self.snake.initial_length,
            direction: self.snake.direction,
            fruit_value: self.fruit.value,
            difficulty: self.difficulty,
            self_collision: self.self_collision,
            seed: self.seed,
        }
    }

    /// Interval between movement ticks.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.difficulty.tick_interval()
    }
}
