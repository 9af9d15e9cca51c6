//! Fixed-size play area that hands out cells bound to its identity.

use std::{
    collections::HashSet,
    fmt,
    ops::Range,
    sync::{Mutex, PoisonError},
};

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_core::{Axis, Cell, CellError, GridError, GridId};

/// Rectangular play area with an immutable backing store of cells.
///
/// Every grid carries its own random source, seeded once at construction,
/// which drives [`Grid::random_cell`].
pub struct Grid {
    id: GridId,
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    rng: Mutex<ChaCha8Rng>,
}

impl Grid {
    /// Creates a grid whose random source is seeded from system entropy.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        Self::build(width, height, ChaCha8Rng::from_entropy())
    }

    /// Creates a grid whose random source is seeded deterministically.
    pub fn with_seed(width: i32, height: i32, seed: u64) -> Result<Self, GridError> {
        Self::build(width, height, ChaCha8Rng::seed_from_u64(seed))
    }

    fn build(width: i32, height: i32, rng: ChaCha8Rng) -> Result<Self, GridError> {
        if width <= 0 {
            return Err(GridError::InvalidWidth { width });
        }
        if height <= 0 {
            return Err(GridError::InvalidHeight { height });
        }

        let too_large = GridError::TooLarge { width, height };
        let capacity = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(width, height)| width.checked_mul(height))
            .ok_or(too_large)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(capacity).map_err(|_| too_large)?;

        let id = GridId::unique();
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(id, x, y));
            }
        }

        Ok(Self {
            id,
            width,
            height,
            cells,
            rng: Mutex::new(rng),
        })
    }

    /// Identity shared by every cell this grid produces.
    #[must_use]
    pub const fn id(&self) -> GridId {
        self.id
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Half-open range of coordinates defined along the provided axis.
    #[must_use]
    pub const fn axis_range(&self, axis: Axis) -> Range<i32> {
        match axis {
            Axis::X => 0..self.width,
            Axis::Y => 0..self.height,
        }
    }

    /// Returns the cell at `(x, y)`, or [`Cell::INVALID`] outside the grid.
    ///
    /// Out-of-range lookups never panic so that callers can probe one cell
    /// beyond the edge.
    #[must_use]
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        self.index(x, y)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(Cell::INVALID)
    }

    /// Reports whether `(x, y)` lies within `[0, width) x [0, height)`.
    #[must_use]
    pub fn is_defined(&self, x: i32, y: i32) -> bool {
        self.axis_range(Axis::X).contains(&x) && self.axis_range(Axis::Y).contains(&y)
    }

    /// Reports whether the cell was produced by this grid and lies within it.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.is_owned_by(self.id) && self.is_defined(cell.x(), cell.y())
    }

    /// Checks that a cell may be occupied on this grid.
    pub fn validate(&self, cell: Cell) -> Result<Cell, CellError> {
        if !cell.is_valid() {
            return Err(CellError::Invalid { cell });
        }
        if !cell.is_owned_by(self.id) {
            return Err(CellError::ForeignOwner { cell });
        }
        if !self.is_defined(cell.x(), cell.y()) {
            return Err(CellError::OutOfRange {
                cell,
                width: self.width,
                height: self.height,
            });
        }
        Ok(cell)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Picks a cell uniformly from those not listed in `exclude`.
    ///
    /// Returns [`Cell::INVALID`] when every cell is excluded.
    pub fn random_cell<I>(&self, exclude: I) -> Cell
    where
        I: IntoIterator<Item = Cell>,
    {
        let excluded: HashSet<Cell> = exclude.into_iter().collect();
        let candidates: Vec<Cell> = self
            .cells
            .iter()
            .copied()
            .filter(|cell| !excluded.contains(cell))
            .collect();

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        candidates
            .choose(&mut *rng)
            .copied()
            .unwrap_or(Cell::INVALID)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_defined(x, y) {
            let row = usize::try_from(y).ok()?;
            let column = usize::try_from(x).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
