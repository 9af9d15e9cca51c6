#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Reacts to the snake reaching the fruit.

use snake_core::{Command, Event, GrowthPolicy, PlayfieldSnapshot};
use tracing::debug;

/// Pure system that detects meals and requests relocation and scoring.
#[derive(Debug, Default)]
pub struct FruitEatenHandler {
    growth: GrowthPolicy,
}

impl FruitEatenHandler {
    /// Creates a handler that applies the provided growth policy to meals.
    #[must_use]
    pub const fn new(growth: GrowthPolicy) -> Self {
        Self { growth }
    }

    /// Growth policy applied when fruit is eaten.
    #[must_use]
    pub const fn growth(&self) -> GrowthPolicy {
        self.growth
    }

    /// Requests consumption when the snake's head shares the fruit's cell.
    pub fn evaluate_state(&self, playfield: &PlayfieldSnapshot, out: &mut Vec<Command>) {
        let head = playfield.head();
        if head.is_valid() && head == playfield.fruit {
            out.push(Command::ConsumeFruit);
        }
    }

    /// Consumes world events and emits the commands that follow a meal.
    pub fn handle(
        &mut self,
        events: &[Event],
        playfield: &PlayfieldSnapshot,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::AfterMove { .. } => self.evaluate_state(playfield, out),
                Event::FruitEaten { cell, value, .. } => {
                    debug!(%cell, value, "fruit eaten");
                    if self.growth == GrowthPolicy::GrowByValue {
                        let length = playfield.snake.len().saturating_add(*value as usize);
                        out.push(Command::ResizeSnake { length });
                    }
                    out.push(Command::RelocateFruit);
                    out.push(Command::AwardPoints { points: *value });
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::{Cell, Direction, GridId};

    fn playfield(head: Cell, fruit: Cell) -> PlayfieldSnapshot {
        PlayfieldSnapshot {
            width: 8,
            height: 8,
            snake: vec![head, Cell::INVALID],
            direction: Direction::Right,
            fruit,
            fruit_value: 3,
            score: 0,
            tick: 1,
        }
    }

    #[test]
    fn head_on_fruit_requests_consumption() {
        let grid = GridId::unique();
        let handler = FruitEatenHandler::default();
        let mut commands = Vec::new();

        handler.evaluate_state(
            &playfield(Cell::new(grid, 1, 1), Cell::new(grid, 2, 1)),
            &mut commands,
        );
        assert!(commands.is_empty());

        handler.evaluate_state(
            &playfield(Cell::new(grid, 2, 1), Cell::new(grid, 2, 1)),
            &mut commands,
        );
        assert_eq!(commands, vec![Command::ConsumeFruit]);
    }

    #[test]
    fn unplaced_fruit_is_never_eaten() {
        let handler = FruitEatenHandler::default();
        let mut commands = Vec::new();
        handler.evaluate_state(&playfield(Cell::INVALID, Cell::INVALID), &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn meal_relocates_then_scores() {
        let grid = GridId::unique();
        let cell = Cell::new(grid, 2, 1);
        let meal = [Event::FruitEaten {
            cell,
            value: 3,
            eater_head: cell,
        }];

        let mut handler = FruitEatenHandler::new(GrowthPolicy::Disabled);
        let mut commands = Vec::new();
        handler.handle(&meal, &playfield(cell, cell), &mut commands);
        assert_eq!(
            commands,
            vec![Command::RelocateFruit, Command::AwardPoints { points: 3 }]
        );

        let mut handler = FruitEatenHandler::new(GrowthPolicy::GrowByValue);
        let mut commands = Vec::new();
        handler.handle(&meal, &playfield(cell, cell), &mut commands);
        assert_eq!(
            commands,
            vec![
                Command::ResizeSnake { length: 5 },
                Command::RelocateFruit,
                Command::AwardPoints { points: 3 },
            ]
        );
    }
}
