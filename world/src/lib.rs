#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for the snake engine.

mod fruit;
mod grid;
mod score;
mod snake;

use std::sync::Arc;

use snake_core::{CellError, Command, Difficulty, Direction, Event, SetupError};
use tracing::debug;

pub use fruit::Fruit;
pub use grid::Grid;
pub use score::{Score, ScoreFilter, ScoreTable};
pub use snake::{MovementNode, Snake};

const DEFAULT_GRID_SIZE: i32 = 32;
const DEFAULT_START: i32 = 16;
const DEFAULT_INITIAL_LENGTH: usize = 5;
const DEFAULT_FRUIT_VALUE: u32 = 3;

/// Parameters used to set up a fresh world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Number of grid columns.
    pub width: i32,
    /// Number of grid rows.
    pub height: i32,
    /// Column of the snake's starting head cell.
    pub start_x: i32,
    /// Row of the snake's starting head cell.
    pub start_y: i32,
    /// Number of nodes the snake starts with.
    pub initial_length: usize,
    /// Direction the snake starts travelling in.
    pub direction: Direction,
    /// Points carried by the fruit.
    pub fruit_value: u32,
    /// Difficulty recorded on the score.
    pub difficulty: Difficulty,
    /// Whether running into its own body ends the game.
    pub self_collision: bool,
    /// Seed for the grid's random source. Entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            start_x: DEFAULT_START,
            start_y: DEFAULT_START,
            initial_length: DEFAULT_INITIAL_LENGTH,
            direction: Direction::Right,
            fruit_value: DEFAULT_FRUIT_VALUE,
            difficulty: Difficulty::default(),
            self_collision: false,
            seed: None,
        }
    }
}

/// Represents the authoritative state of one game session.
#[derive(Debug)]
pub struct World {
    grid: Arc<Grid>,
    snake: Snake,
    fruit: Fruit,
    score: Score,
    self_collision: bool,
    tick_index: u64,
}

impl World {
    /// Creates a world with the snake at its starting cell and the fruit on a
    /// random cell the snake does not occupy.
    pub fn new(config: &WorldConfig) -> Result<Self, SetupError> {
        let grid = match config.seed {
            Some(seed) => Grid::with_seed(config.width, config.height, seed)?,
            None => Grid::new(config.width, config.height)?,
        };
        let grid = Arc::new(grid);
        let start = grid.cell_at(config.start_x, config.start_y);
        let snake = Snake::new(
            Arc::clone(&grid),
            start,
            config.initial_length,
            config.direction,
        )?;
        let fruit = Fruit::excluding(Arc::clone(&grid), &snake.occupied_cells(), config.fruit_value);

        debug!(
            width = config.width,
            height = config.height,
            fruit = %fruit.occupied_cell(),
            "world created"
        );

        Ok(Self {
            grid,
            snake,
            fruit,
            score: Score::new(config.difficulty),
            self_collision: config.self_collision,
            tick_index: 0,
        })
    }

    /// Assembles a world from a snake and fruit that share a play area.
    pub fn from_parts(snake: Snake, fruit: Fruit, score: Score) -> Result<Self, CellError> {
        let grid = Arc::clone(snake.play_area());
        if fruit.play_area().id() != grid.id() {
            return Err(CellError::ForeignOwner {
                cell: fruit.occupied_cell(),
            });
        }

        Ok(Self {
            grid,
            snake,
            fruit,
            score,
            self_collision: false,
            tick_index: 0,
        })
    }

    /// Enables or disables ending the game when the snake runs into itself.
    #[must_use]
    pub fn with_self_collision(mut self, enabled: bool) -> Self {
        self.self_collision = enabled;
        self
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::BeforeMove {
                tick: world.tick_index,
            });
        }
        Command::SetMovementDirection { direction } => {
            let from = world.snake.movement_direction();
            if from != direction {
                world.snake.set_movement_direction(direction);
                out_events.push(Event::DirectionChanged {
                    from,
                    to: direction,
                });
            }
        }
        Command::MoveSnake => {
            let from = world.snake.head().cell();
            world.snake.move_forward();
            let head = world.snake.head();
            out_events.push(Event::SnakeAdvanced {
                from,
                to: head.cell(),
                direction: head.direction(),
            });
            out_events.push(Event::AfterMove {
                tick: world.tick_index,
            });

            if world.snake.is_out_of_bounds() {
                out_events.push(Event::OutOfBounds { head: head.cell() });
            } else if world.self_collision && world.snake.is_self_colliding() {
                out_events.push(Event::SelfCollision { head: head.cell() });
            }
        }
        Command::ResizeSnake { length } => {
            let from = world.snake.length();
            match world.snake.set_length(length) {
                Ok(()) if from != length => {
                    out_events.push(Event::SnakeResized { from, to: length });
                }
                Ok(()) => {}
                Err(reason) => out_events.push(Event::ResizeRejected {
                    requested: length,
                    reason,
                }),
            }
        }
        Command::ConsumeFruit => {
            if world.fruit.is_placed() {
                world.fruit.consume(&world.snake, out_events);
            }
        }
        Command::RelocateFruit => {
            let from = world.fruit.occupied_cell();
            let to = world.fruit.relocate(world.snake.occupied_cells());
            if to.is_valid() {
                out_events.push(Event::FruitRelocated { from, to });
            } else {
                out_events.push(Event::FruitPlacementExhausted);
            }
        }
        Command::AwardPoints { points } => {
            let total = world.score.add(points);
            out_events.push(Event::ScoreChanged {
                awarded: points,
                total,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::sync::Arc;

    use snake_core::PlayfieldSnapshot;

    use super::{Fruit, Grid, Score, Snake, World};

    /// Provides read-only access to the play area.
    #[must_use]
    pub fn grid(world: &World) -> &Arc<Grid> {
        &world.grid
    }

    /// Provides read-only access to the snake.
    #[must_use]
    pub fn snake(world: &World) -> &Snake {
        &world.snake
    }

    /// Provides read-only access to the fruit.
    #[must_use]
    pub fn fruit(world: &World) -> &Fruit {
        &world.fruit
    }

    /// Provides read-only access to the score accumulator.
    #[must_use]
    pub fn score(world: &World) -> &Score {
        &world.score
    }

    /// Number of ticks the world processed.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Reports whether the snake's head currently lies outside the play area.
    #[must_use]
    pub fn snake_out_of_bounds(world: &World) -> bool {
        world.snake.is_out_of_bounds()
    }

    /// Captures a self-consistent snapshot for systems and renderers.
    #[must_use]
    pub fn playfield(world: &World) -> PlayfieldSnapshot {
        PlayfieldSnapshot {
            width: world.grid.width(),
            height: world.grid.height(),
            snake: world.snake.occupied_cells(),
            direction: world.snake.movement_direction(),
            fruit: world.fruit.occupied_cell(),
            fruit_value: world.fruit.value(),
            score: world.score.value(),
            tick: world.tick_index,
        }
    }
}
