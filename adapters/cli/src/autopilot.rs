//! Greedy steering that stands in for a keyboard.

use snake_core::{Direction, PlayfieldSnapshot};

/// Picks the safe direction that brings the head closest to the fruit.
///
/// Returns the current direction when no neighbouring cell is safe.
pub(crate) fn choose_direction(playfield: &PlayfieldSnapshot) -> Direction {
    let head = playfield.head();
    let current = playfield.direction;
    if !head.is_valid() {
        return current;
    }

    let target = playfield
        .fruit
        .is_valid()
        .then(|| (playfield.fruit.x(), playfield.fruit.y()));

    Direction::ALL
        .into_iter()
        .filter(|direction| *direction != current.invert())
        .filter_map(|direction| {
            let (dx, dy) = direction.offset();
            let next = (head.x() + dx, head.y() + dy);
            is_safe(playfield, next).then(|| (direction, distance(next, target)))
        })
        .min_by_key(|(direction, distance)| (*distance, *direction != current))
        .map_or(current, |(direction, _)| direction)
}

fn is_safe(playfield: &PlayfieldSnapshot, (x, y): (i32, i32)) -> bool {
    let inside = (0..playfield.width).contains(&x) && (0..playfield.height).contains(&y);
    // The tail cell frees up on the same move.
    let body = &playfield.snake[..playfield.snake.len().saturating_sub(1)];
    inside && !body.iter().any(|cell| cell.x() == x && cell.y() == y)
}

fn distance((x, y): (i32, i32), target: Option<(i32, i32)>) -> u32 {
    target.map_or(0, |(tx, ty)| x.abs_diff(tx) + y.abs_diff(ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::{Cell, GridId};

    fn playfield(snake: &[(i32, i32)], direction: Direction, fruit: (i32, i32)) -> PlayfieldSnapshot {
        let grid = GridId::unique();
        PlayfieldSnapshot {
            width: 8,
            height: 8,
            snake: snake.iter().map(|(x, y)| Cell::new(grid, *x, *y)).collect(),
            direction,
            fruit: Cell::new(grid, fruit.0, fruit.1),
            fruit_value: 1,
            score: 0,
            tick: 0,
        }
    }

    #[test]
    fn heads_for_the_fruit() {
        let field = playfield(&[(4, 4), (3, 4)], Direction::Right, (4, 1));
        assert_eq!(choose_direction(&field), Direction::Up);
    }

    #[test]
    fn keeps_going_when_already_aligned() {
        let field = playfield(&[(2, 4), (1, 4)], Direction::Right, (6, 4));
        assert_eq!(choose_direction(&field), Direction::Right);
    }

    #[test]
    fn never_reverses_into_the_body() {
        let field = playfield(&[(4, 4), (5, 4)], Direction::Left, (7, 4));
        assert_ne!(choose_direction(&field), Direction::Right);
    }

    #[test]
    fn turns_away_from_the_wall() {
        let field = playfield(&[(7, 0), (6, 0)], Direction::Right, (0, 0));
        assert_eq!(choose_direction(&field), Direction::Down);
    }
}
