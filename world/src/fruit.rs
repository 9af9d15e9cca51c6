//! Single fruit occupying one cell of the play area.

use std::sync::Arc;

use snake_core::{Cell, CellError, Event};
use tracing::trace;

use crate::{Grid, Snake};

/// Edible fruit carrying a point value.
#[derive(Clone, Debug)]
pub struct Fruit {
    play_area: Arc<Grid>,
    location: Cell,
    value: u32,
}

impl Fruit {
    /// Places a fruit on an explicit cell of the play area.
    pub fn at(play_area: Arc<Grid>, location: Cell, value: u32) -> Result<Self, CellError> {
        let location = play_area.validate(location)?;
        Ok(Self {
            play_area,
            location,
            value,
        })
    }

    /// Places a fruit on a random cell that is not listed in `exclude`.
    #[must_use]
    pub fn excluding(play_area: Arc<Grid>, exclude: &[Cell], value: u32) -> Self {
        Self::excluding_iter(play_area, exclude.iter().copied(), value)
    }

    /// Places a fruit on a random cell that the iterator does not yield.
    #[must_use]
    pub fn excluding_iter<I>(play_area: Arc<Grid>, exclude: I, value: u32) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let location = play_area.random_cell(exclude);
        Self {
            play_area,
            location,
            value,
        }
    }

    /// Places a fruit on any random cell.
    #[must_use]
    pub fn random(play_area: Arc<Grid>, value: u32) -> Self {
        Self::excluding_iter(play_area, std::iter::empty(), value)
    }

    /// Grid the fruit belongs to.
    #[must_use]
    pub fn play_area(&self) -> &Arc<Grid> {
        &self.play_area
    }

    /// Cell the fruit occupies. Invalid once random placement ran out of cells.
    #[must_use]
    pub const fn occupied_cell(&self) -> Cell {
        self.location
    }

    /// Reports whether the fruit currently sits on a cell of the play area.
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.play_area.contains(self.location)
    }

    /// Moves the fruit to an explicit cell, rejecting cells it cannot occupy.
    pub fn set_occupied_cell(&mut self, location: Cell) -> Result<(), CellError> {
        self.location = self.play_area.validate(location)?;
        Ok(())
    }

    /// Points granted when the fruit is eaten.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Changes the points granted when the fruit is eaten.
    pub fn set_value(&mut self, value: u32) {
        self.value = value;
    }

    /// Moves the fruit to a random cell not listed in `exclude` and returns it.
    ///
    /// When every cell is excluded the fruit is left on [`Cell::INVALID`].
    pub fn relocate<I>(&mut self, exclude: I) -> Cell
    where
        I: IntoIterator<Item = Cell>,
    {
        self.location = self.play_area.random_cell(exclude);
        self.location
    }

    /// Reports that `eater` ate the fruit.
    ///
    /// The fruit neither moves nor awards points itself; listeners react to
    /// the emitted [`Event::FruitEaten`].
    pub fn consume(&self, eater: &Snake, out_events: &mut Vec<Event>) {
        trace!(cell = %self.location, value = self.value, "fruit consumed");
        out_events.push(Event::FruitEaten {
            cell: self.location,
            value: self.value,
            eater_head: eater.head().cell(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::Direction;

    #[test]
    fn explicit_placement_is_validated() {
        let grid = Arc::new(Grid::with_seed(4, 4, 5).expect("grid"));
        let beyond = Cell::new(grid.id(), 4, 0);
        assert!(matches!(
            Fruit::at(Arc::clone(&grid), beyond, 1),
            Err(CellError::OutOfRange { .. })
        ));
        assert!(matches!(
            Fruit::at(Arc::clone(&grid), Cell::INVALID, 1),
            Err(CellError::Invalid { .. })
        ));

        let fruit = Fruit::at(Arc::clone(&grid), grid.cell_at(1, 2), 4).expect("fruit");
        assert_eq!(fruit.occupied_cell(), grid.cell_at(1, 2));
        assert_eq!(fruit.value(), 4);
    }

    #[test]
    fn setter_keeps_previous_cell_on_failure() {
        let grid = Arc::new(Grid::with_seed(4, 4, 5).expect("grid"));
        let mut fruit = Fruit::at(Arc::clone(&grid), grid.cell_at(0, 0), 1).expect("fruit");
        assert!(fruit.set_occupied_cell(Cell::INVALID).is_err());
        assert_eq!(fruit.occupied_cell(), grid.cell_at(0, 0));
    }

    #[test]
    fn relocation_onto_a_full_grid_leaves_fruit_unplaced() {
        let grid = Arc::new(Grid::with_seed(2, 2, 5).expect("grid"));
        let mut fruit = Fruit::random(Arc::clone(&grid), 1);
        assert!(fruit.is_placed());

        let everything: Vec<Cell> = grid.cells().collect();
        assert_eq!(fruit.relocate(everything), Cell::INVALID);
        assert!(!fruit.is_placed());
    }

    #[test]
    fn consume_only_reports_the_meal() {
        let grid = Arc::new(Grid::with_seed(8, 8, 5).expect("grid"));
        let snake =
            Snake::new(Arc::clone(&grid), grid.cell_at(3, 3), 2, Direction::Up).expect("snake");
        let fruit = Fruit::at(Arc::clone(&grid), grid.cell_at(3, 3), 7).expect("fruit");

        let mut events = Vec::new();
        fruit.consume(&snake, &mut events);

        assert_eq!(
            events,
            vec![Event::FruitEaten {
                cell: grid.cell_at(3, 3),
                value: 7,
                eater_head: grid.cell_at(3, 3),
            }]
        );
        assert_eq!(fruit.occupied_cell(), grid.cell_at(3, 3));
        assert_eq!(snake.length(), 2);
    }
}
