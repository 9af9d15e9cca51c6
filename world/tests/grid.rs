use std::{collections::HashMap, sync::Arc};

use snake_core::{Axis, Cell};
use snake_world::{Fruit, Grid};

const TRIALS: usize = 65_536;

#[test]
fn every_in_range_coordinate_is_defined() {
    for (width, height) in [(1, 1), (3, 7), (16, 16), (32, 5)] {
        let grid = Grid::with_seed(width, height, 4).expect("grid");
        assert_eq!(grid.cell_count(), (width * height) as usize);
        assert_eq!(grid.cells().len(), grid.cell_count());

        for y in grid.axis_range(Axis::Y) {
            for x in grid.axis_range(Axis::X) {
                assert!(grid.is_defined(x, y), "({x}, {y}) should be defined");
                assert!(grid.contains(grid.cell_at(x, y)));
            }
        }

        for x in -1..=width {
            assert!(!grid.is_defined(x, -1));
            assert!(!grid.is_defined(x, height));
        }
        for y in -1..=height {
            assert!(!grid.is_defined(-1, y));
            assert!(!grid.is_defined(width, y));
        }
    }
}

#[test]
fn cells_are_produced_in_row_major_order() {
    let grid = Grid::with_seed(3, 2, 4).expect("grid");
    let coordinates: Vec<(i32, i32)> = grid.cells().map(|cell| (cell.x(), cell.y())).collect();
    assert_eq!(
        coordinates,
        vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
    );
}

#[test]
fn relocation_is_uniform_over_remaining_cells() {
    let grid = Arc::new(Grid::with_seed(4, 4, 0x5eed).expect("grid"));
    let exclude = vec![
        grid.cell_at(0, 0),
        grid.cell_at(1, 1),
        grid.cell_at(2, 2),
        grid.cell_at(3, 3),
    ];
    let mut fruit = Fruit::excluding(Arc::clone(&grid), &exclude, 1);

    let mut frequencies: HashMap<Cell, usize> = HashMap::new();
    for _ in 0..TRIALS {
        let cell = fruit.relocate(exclude.iter().copied());
        assert!(!exclude.contains(&cell), "relocated onto excluded {cell}");
        *frequencies.entry(cell).or_default() += 1;
    }

    let candidates = grid.cell_count() - exclude.len();
    assert_eq!(frequencies.len(), candidates);

    let expected = TRIALS / candidates;
    let tolerance = expected / 10;
    for (cell, count) in frequencies {
        assert!(
            count.abs_diff(expected) <= tolerance,
            "{cell} chosen {count} times, expected about {expected}",
        );
    }
}
