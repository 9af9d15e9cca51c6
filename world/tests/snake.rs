use std::sync::Arc;

use snake_core::{Cell, Direction};
use snake_world::{Grid, Snake};

fn grid() -> Arc<Grid> {
    Arc::new(Grid::with_seed(16, 16, 8).expect("grid"))
}

#[test]
fn construction_lays_out_every_node() {
    let grid = grid();
    for direction in Direction::ALL {
        for length in 2..=5 {
            let start = grid.cell_at(8, 8);
            let snake = Snake::new(Arc::clone(&grid), start, length, direction).expect("snake");

            assert_eq!(snake.length(), length);
            assert_eq!(snake.head().cell(), start);
            assert_eq!(snake.nodes().len(), length);
            assert!(snake.nodes().all(|node| node.direction() == direction));

            let (dx, dy) = direction.invert().offset();
            let end = snake.end().cell();
            let steps = (length - 1) as i32;
            assert_eq!((end.x(), end.y()), (8 + dx * steps, 8 + dy * steps));
        }
    }
}

#[test]
fn move_keeps_length_and_drops_the_tail() {
    let grid = grid();
    let mut snake =
        Snake::new(Arc::clone(&grid), grid.cell_at(8, 8), 4, Direction::Down).expect("snake");

    for direction in [Direction::Down, Direction::Left, Direction::Left, Direction::Up] {
        snake.set_movement_direction(direction);
        let expected_head = snake.next_head_cell();
        let old_tail = snake.end();

        snake.move_forward();

        assert_eq!(snake.length(), 4);
        assert_eq!(snake.head().cell(), expected_head);
        assert_eq!(snake.head().direction(), direction);
        assert!(!snake.nodes().any(|node| *node == old_tail));
    }
}

#[test]
fn growing_follows_the_tail_direction() {
    let grid = grid();
    let mut snake =
        Snake::new(Arc::clone(&grid), grid.cell_at(8, 8), 2, Direction::Right).expect("snake");
    snake.set_movement_direction(Direction::Down);
    snake.move_forward();
    snake.move_forward();

    // Tail was laid down while travelling down.
    snake.set_length(4).expect("grow");
    assert_eq!(
        snake.occupied_cells(),
        vec![
            grid.cell_at(8, 10),
            grid.cell_at(8, 9),
            grid.cell_at(8, 8),
            grid.cell_at(8, 7),
        ]
    );
}

#[test]
fn matching_grow_and_shrink_restore_the_snake() {
    let grid = grid();
    let mut snake =
        Snake::new(Arc::clone(&grid), grid.cell_at(8, 8), 3, Direction::Left).expect("snake");
    let head = snake.head();
    let end = snake.end();

    snake.set_length(7).expect("grow");
    assert_eq!(snake.length(), 7);
    snake.set_length(3).expect("shrink");

    assert_eq!(snake.head(), head);
    assert_eq!(snake.end(), end);
}

#[test]
fn occupied_cells_are_a_snapshot() {
    let grid = grid();
    let mut snake =
        Snake::new(Arc::clone(&grid), grid.cell_at(8, 8), 3, Direction::Up).expect("snake");
    let mut cells = snake.occupied_cells();
    cells.clear();
    snake.move_forward();
    assert_eq!(snake.occupied_cells().len(), 3);
    assert!(cells.is_empty());
}

#[test]
fn out_of_bounds_only_on_the_step_past_the_edge() {
    let grid = grid();
    let start = grid.cell_at(5, 5);
    for (direction, distance) in [
        (Direction::Up, 5),
        (Direction::Left, 5),
        (Direction::Right, 10),
        (Direction::Down, 10),
    ] {
        let mut snake = Snake::new(Arc::clone(&grid), start, 2, direction).expect("snake");
        for _ in 0..distance {
            snake.move_forward();
            assert!(!snake.is_out_of_bounds(), "left the grid early going {direction:?}");
        }
        snake.move_forward();
        assert!(snake.is_out_of_bounds());
        assert_eq!(snake.head().cell(), Cell::INVALID);
    }
}

#[test]
fn tail_beyond_the_edge_is_tolerated() {
    let grid = grid();
    let snake =
        Snake::new(Arc::clone(&grid), grid.cell_at(1, 0), 4, Direction::Right).expect("snake");
    assert_eq!(snake.end().cell(), Cell::INVALID);
    assert!(!snake.is_out_of_bounds());
}
