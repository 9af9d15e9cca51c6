#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The session submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event batches, read immutable
//! [`PlayfieldSnapshot`] values, and respond exclusively with new commands.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest snake the engine allows, measured in movement nodes.
pub const MIN_SNAKE_LENGTH: usize = 2;

static NEXT_GRID_ID: AtomicU64 = AtomicU64::new(1);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Reports that the external tick source fired once.
    Tick,
    /// Changes the direction the snake travels on its next move.
    SetMovementDirection {
        /// Direction that takes effect on the next [`Command::MoveSnake`].
        direction: Direction,
    },
    /// Advances the snake a single cell along its current movement direction.
    MoveSnake,
    /// Sets the snake's length, growing from or trimming its tail.
    ResizeSnake {
        /// Requested number of movement nodes.
        length: usize,
    },
    /// Lets the snake eat the fruit it currently shares a cell with.
    ConsumeFruit,
    /// Moves the fruit to a random cell not occupied by the snake.
    RelocateFruit,
    /// Adds points to the session's score accumulator.
    AwardPoints {
        /// Number of points to add.
        points: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Fired at the start of a movement tick, before any direction is applied.
    BeforeMove {
        /// One-based index of the tick that started.
        tick: u64,
    },
    /// Confirms that the snake's movement direction changed.
    DirectionChanged {
        /// Direction that was active before the change.
        from: Direction,
        /// Direction that will drive the next move.
        to: Direction,
    },
    /// Confirms that the snake's head advanced between two cells.
    SnakeAdvanced {
        /// Cell the head occupied before moving.
        from: Cell,
        /// Cell the head occupies after moving. Invalid when the grid was exited.
        to: Cell,
        /// Direction recorded on the new head node.
        direction: Direction,
    },
    /// Fired once the snake finished moving during a tick.
    AfterMove {
        /// Index of the tick that completed.
        tick: u64,
    },
    /// Announces that the snake's head left the play area.
    OutOfBounds {
        /// Head cell after the offending move.
        head: Cell,
    },
    /// Announces that the snake's head moved onto its own body.
    SelfCollision {
        /// Head cell shared with a body node.
        head: Cell,
    },
    /// Confirms that the fruit was eaten.
    FruitEaten {
        /// Cell the fruit occupied when it was eaten.
        cell: Cell,
        /// Point value carried by the fruit.
        value: u32,
        /// Head cell of the snake that ate the fruit.
        eater_head: Cell,
    },
    /// Confirms that the fruit moved to a new cell.
    FruitRelocated {
        /// Cell the fruit previously occupied.
        from: Cell,
        /// Cell the fruit occupies now.
        to: Cell,
    },
    /// Reports that every cell was excluded, leaving the fruit without a cell.
    FruitPlacementExhausted,
    /// Confirms that the snake's length changed.
    SnakeResized {
        /// Length before the change.
        from: usize,
        /// Length after the change.
        to: usize,
    },
    /// Reports that a resize request was rejected and the snake left untouched.
    ResizeRejected {
        /// Length that was requested.
        requested: usize,
        /// Specific reason the resize failed.
        reason: LengthError,
    },
    /// Confirms that the score accumulator changed.
    ScoreChanged {
        /// Points added by the triggering command.
        awarded: u32,
        /// Running total after the award.
        total: u32,
    },
}

impl Event {
    /// Reports whether the event ends gameplay.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::SelfCollision { .. })
    }
}

/// One of the two axes of the play area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal axis; columns grow to the right.
    X,
    /// Vertical axis; rows grow downwards.
    Y,
}

/// Orthogonal movement directions using a top-left origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in clockwise order starting from [`Direction::Up`].
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Increment applied along [`Direction::axis`] when moving this way.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Up | Self::Left => -1,
            Self::Right | Self::Down => 1,
        }
    }

    /// Axis whose coordinate changes when moving this way.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Y,
            Self::Right | Self::Left => Axis::X,
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn invert(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Direction a quarter turn clockwise from this one.
    #[must_use]
    pub const fn rotate_clockwise(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// Direction a quarter turn anticlockwise from this one.
    #[must_use]
    pub const fn rotate_anticlockwise(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Right => Self::Up,
            Self::Down => Self::Right,
            Self::Left => Self::Down,
        }
    }

    /// Rotates clockwise by `steps` quarter turns. Negative steps turn anticlockwise.
    #[must_use]
    pub fn rotate_clockwise_by(self, steps: i32) -> Self {
        let turns = steps.rem_euclid(4) as usize;
        Self::ALL[(self.index() + turns) % 4]
    }

    /// Rotates anticlockwise by `steps` quarter turns. Negative steps turn clockwise.
    #[must_use]
    pub fn rotate_anticlockwise_by(self, steps: i32) -> Self {
        let turns = steps.rem_euclid(4) as usize;
        Self::ALL[(self.index() + 4 - turns) % 4]
    }

    /// Column and row deltas produced by a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self.axis() {
            Axis::X => (self.sign(), 0),
            Axis::Y => (0, self.sign()),
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }
}

/// Identity of a grid instance, used to keep cells from different grids apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridId(u64);

impl GridId {
    /// Allocates an identifier that no other grid in the process shares.
    #[must_use]
    pub fn unique() -> Self {
        Self(NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Coordinate bound to the grid that produced it.
///
/// Equality compares the owning grid as well as both coordinates, so two cells
/// at the same position on different grids never match. [`Cell::INVALID`] has
/// no owner and negative coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    owner: Option<GridId>,
    x: i32,
    y: i32,
}

impl Cell {
    /// Sentinel returned for lookups outside a grid and exhausted placements.
    pub const INVALID: Cell = Cell {
        owner: None,
        x: -1,
        y: -1,
    };

    /// Creates a cell owned by the provided grid.
    ///
    /// The coordinates are not range checked; use the grid's `is_defined` to
    /// test membership.
    #[must_use]
    pub const fn new(owner: GridId, x: i32, y: i32) -> Self {
        Self {
            owner: Some(owner),
            x,
            y,
        }
    }

    /// Grid the cell belongs to, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<GridId> {
        self.owner
    }

    /// Zero-based column of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Coordinate along the provided axis.
    #[must_use]
    pub const fn axis_value(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Reports whether the cell has an owner and non-negative coordinates.
    ///
    /// Validity does not imply membership of the owning grid.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.owner.is_some() && self.x >= 0 && self.y >= 0
    }

    /// Reports whether the cell belongs to the grid with the provided identity.
    #[must_use]
    pub fn is_owned_by(&self, grid: GridId) -> bool {
        self.owner == Some(grid)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Gameplay difficulty, which fixes how often the snake moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Five moves per second.
    Easy,
    /// Thirteen moves per second.
    #[default]
    Medium,
    /// Nineteen moves per second.
    Hard,
}

impl Difficulty {
    /// Number of movement ticks per second.
    #[must_use]
    pub const fn updates_per_second(self) -> u32 {
        match self {
            Self::Easy => 5,
            Self::Medium => 13,
            Self::Hard => 19,
        }
    }

    /// Interval between movement ticks.
    #[must_use]
    pub const fn tick_interval(self) -> Duration {
        Duration::from_micros(1_000_000 / self.updates_per_second() as u64)
    }

    /// Lowercase label used in configuration files and score records.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// Whether eating fruit lengthens the snake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthPolicy {
    /// Eating only relocates the fruit and awards points.
    #[default]
    Disabled,
    /// Eating also grows the snake by the fruit's value.
    GrowByValue,
}

/// Read-only snapshot of the play area used by systems and renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayfieldSnapshot {
    /// Number of columns in the grid.
    pub width: i32,
    /// Number of rows in the grid.
    pub height: i32,
    /// Cells occupied by the snake, head first.
    pub snake: Vec<Cell>,
    /// Direction the snake will travel on its next move.
    pub direction: Direction,
    /// Cell occupied by the fruit. Invalid once placement is exhausted.
    pub fruit: Cell,
    /// Point value carried by the fruit.
    pub fruit_value: u32,
    /// Running score.
    pub score: u32,
    /// Number of ticks the world processed.
    pub tick: u64,
}

impl PlayfieldSnapshot {
    /// Cell occupied by the snake's head.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.snake.first().copied().unwrap_or(Cell::INVALID)
    }

    /// Reports whether any snake node occupies the provided cell.
    #[must_use]
    pub fn snake_occupies(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }
}

/// Reasons a grid cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width must be strictly positive.
    #[error("grid width must be positive, got {width}")]
    InvalidWidth {
        /// Width that failed validation.
        width: i32,
    },
    /// Height must be strictly positive.
    #[error("grid height must be positive, got {height}")]
    InvalidHeight {
        /// Height that failed validation.
        height: i32,
    },
    /// The cell store for these dimensions cannot be allocated.
    #[error("grid of {width}x{height} cells is too large")]
    TooLarge {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
}

/// Reasons a cell is rejected as a location on a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CellError {
    /// The cell has no owner or a negative coordinate.
    #[error("cell {cell} is not a valid cell")]
    Invalid {
        /// Rejected cell.
        cell: Cell,
    },
    /// The cell was produced by a different grid.
    #[error("cell {cell} is not owned by the play area")]
    ForeignOwner {
        /// Rejected cell.
        cell: Cell,
    },
    /// The cell lies outside the grid's defined range.
    #[error("cell {cell} lies outside the {width}x{height} play area")]
    OutOfRange {
        /// Rejected cell.
        cell: Cell,
        /// Width of the grid that rejected the cell.
        width: i32,
        /// Height of the grid that rejected the cell.
        height: i32,
    },
}

/// Reasons a snake length is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LengthError {
    /// The requested length is shorter than [`MIN_SNAKE_LENGTH`].
    #[error("snake length must not be below {minimum}, got {requested}")]
    BelowMinimum {
        /// Length that was requested.
        requested: usize,
        /// Shortest permitted length.
        minimum: usize,
    },
}

/// Reasons a snake cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SnakeError {
    /// The starting cell was rejected.
    #[error("invalid starting cell: {0}")]
    StartingCell(#[from] CellError),
    /// The initial length was rejected.
    #[error("invalid initial length: {0}")]
    InitialLength(#[from] LengthError),
}

/// Reasons a game world cannot be set up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    /// The play area dimensions were rejected.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The snake could not be constructed.
    #[error(transparent)]
    Snake(#[from] SnakeError),
    /// The fruit could not be placed.
    #[error("invalid fruit location: {0}")]
    Fruit(#[from] CellError),
}
