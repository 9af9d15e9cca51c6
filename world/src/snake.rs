//! Segmented snake built from a history of movement nodes.

use std::{collections::VecDeque, sync::Arc};

use snake_core::{Axis, Cell, Direction, LengthError, SnakeError, MIN_SNAKE_LENGTH};

use crate::Grid;

/// Cell the snake entered together with the direction it was travelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MovementNode {
    cell: Cell,
    direction: Direction,
}

impl MovementNode {
    /// Records a visit to `cell` while travelling in `direction`.
    #[must_use]
    pub const fn new(cell: Cell, direction: Direction) -> Self {
        Self { cell, direction }
    }

    /// Cell that was moved to.
    #[must_use]
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Direction of travel when the cell was entered.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

/// Player-controlled snake.
///
/// Nodes are ordered head first. The snake never holds fewer than
/// [`MIN_SNAKE_LENGTH`] nodes.
#[derive(Clone, Debug)]
pub struct Snake {
    play_area: Arc<Grid>,
    history: VecDeque<MovementNode>,
    movement_direction: Direction,
}

impl Snake {
    /// Creates a snake whose head sits on `start`, with its body trailing away
    /// from `direction`.
    pub fn new(
        play_area: Arc<Grid>,
        start: Cell,
        initial_length: usize,
        direction: Direction,
    ) -> Result<Self, SnakeError> {
        let start = play_area.validate(start)?;
        check_length(initial_length)?;

        let mut history = VecDeque::with_capacity(initial_length);
        history.push_back(MovementNode::new(start, direction));
        let mut snake = Self {
            play_area,
            history,
            movement_direction: direction,
        };
        snake.extend_tail(initial_length - 1);
        Ok(snake)
    }

    /// Grid the snake moves on.
    #[must_use]
    pub fn play_area(&self) -> &Arc<Grid> {
        &self.play_area
    }

    /// Direction the next [`Snake::move_forward`] travels in.
    #[must_use]
    pub const fn movement_direction(&self) -> Direction {
        self.movement_direction
    }

    /// Changes the direction used by the next move.
    ///
    /// Existing nodes keep the direction they were created with.
    pub fn set_movement_direction(&mut self, direction: Direction) {
        self.movement_direction = direction;
    }

    /// Number of nodes in the snake.
    #[must_use]
    pub fn length(&self) -> usize {
        self.history.len()
    }

    /// Grows or shrinks the snake to exactly `length` nodes.
    ///
    /// Growth appends nodes behind the tail, continuing straight away from the
    /// tail's own recorded direction. Shrinking drops nodes from the tail. The
    /// snake is left untouched when `length` is below the minimum.
    pub fn set_length(&mut self, length: usize) -> Result<(), LengthError> {
        check_length(length)?;
        let current = self.length();
        if length > current {
            self.extend_tail(length - current);
        } else {
            self.history.truncate(length);
        }
        Ok(())
    }

    /// Front node of the snake.
    #[must_use]
    pub fn head(&self) -> MovementNode {
        self.history[0]
    }

    /// Last node of the snake's tail.
    #[must_use]
    pub fn end(&self) -> MovementNode {
        self.history[self.history.len() - 1]
    }

    /// Iterates the nodes from head to tail.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &MovementNode> + '_ {
        self.history.iter()
    }

    /// Snapshot of the occupied cells, head first.
    #[must_use]
    pub fn occupied_cells(&self) -> Vec<Cell> {
        self.history.iter().map(MovementNode::cell).collect()
    }

    /// Cell the head would enter on the next move.
    ///
    /// Returns [`Cell::INVALID`] when that step leaves the grid.
    #[must_use]
    pub fn next_head_cell(&self) -> Cell {
        let head = self.head().cell();
        let direction = self.movement_direction;
        let (x, y) = match direction.axis() {
            Axis::X => (head.x() + direction.sign(), head.y()),
            Axis::Y => (head.x(), head.y() + direction.sign()),
        };
        self.play_area.cell_at(x, y)
    }

    /// Advances the head one cell along the movement direction and drops the
    /// tail node, keeping the length unchanged.
    ///
    /// Leaving the grid is not corrected; check [`Snake::is_out_of_bounds`]
    /// afterwards.
    pub fn move_forward(&mut self) {
        let next = MovementNode::new(self.next_head_cell(), self.movement_direction);
        self.history.push_front(next);
        let _ = self.history.pop_back();
    }

    /// Reports whether the head lies outside the play area.
    #[must_use]
    pub fn is_out_of_bounds(&self) -> bool {
        !self.play_area.contains(self.head().cell())
    }

    /// Reports whether the head shares a cell with any other node.
    #[must_use]
    pub fn is_self_colliding(&self) -> bool {
        let head = self.head().cell();
        head.is_valid() && self.history.iter().skip(1).any(|node| node.cell == head)
    }

    fn extend_tail(&mut self, count: usize) {
        let tail = self.end();
        let direction = tail.direction();
        let increment = direction.invert().sign();
        for step in 1..=count {
            let offset = step as i32 * increment;
            let cell = match direction.axis() {
                Axis::X => self.play_area.cell_at(tail.cell.x() + offset, tail.cell.y()),
                Axis::Y => self.play_area.cell_at(tail.cell.x(), tail.cell.y() + offset),
            };
            self.history.push_back(MovementNode::new(cell, direction));
        }
    }
}

fn check_length(length: usize) -> Result<(), LengthError> {
    if length < MIN_SNAKE_LENGTH {
        return Err(LengthError::BelowMinimum {
            requested: length,
            minimum: MIN_SNAKE_LENGTH,
        });
    }
    Ok(())
}
