use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    sync::Arc,
};

use snake_core::{Difficulty, Direction, GrowthPolicy, PlayfieldSnapshot};
use snake_session::{GameSession, ManualTicker};
use snake_world::{Fruit, Grid, Score, Snake, World};

const SEED: u64 = 0x0bad_5eed;

const SCRIPT: [(u64, Direction); 6] = [
    (3, Direction::Down),
    (7, Direction::Left),
    (12, Direction::Up),
    (15, Direction::Right),
    (20, Direction::Down),
    (24, Direction::Left),
];

#[test]
fn seeded_sessions_replay_identically() {
    let first = replay(GrowthPolicy::GrowByValue);
    let second = replay(GrowthPolicy::GrowByValue);

    assert_eq!(first.frames, second.frames, "replay diverged");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(!first.frames.is_empty());
}

#[test]
fn growth_policy_changes_the_replay() {
    let grown = replay(GrowthPolicy::GrowByValue);
    let plain = replay(GrowthPolicy::Disabled);

    let longest = |outcome: &ReplayOutcome| {
        outcome
            .frames
            .iter()
            .map(|frame| frame.snake.len())
            .max()
            .unwrap_or(0)
    };
    // The fruit starts two cells ahead, so both runs eat it on the second tick.
    assert_eq!(plain.frames[1].score, 3);
    assert_eq!(grown.frames[1].score, 3);
    assert_eq!(grown.frames[1].snake.len(), 8);

    assert_eq!(longest(&plain), 5);
    assert!(longest(&grown) >= 8);
    assert_ne!(grown.fingerprint(), plain.fingerprint());
}

fn replay(growth: GrowthPolicy) -> ReplayOutcome {
    let grid = Arc::new(Grid::with_seed(32, 32, SEED).expect("grid"));
    let snake =
        Snake::new(Arc::clone(&grid), grid.cell_at(8, 8), 5, Direction::Right).expect("snake");
    let fruit = Fruit::at(Arc::clone(&grid), grid.cell_at(10, 8), 3).expect("fruit");
    let world = World::from_parts(snake, fruit, Score::new(Difficulty::Medium)).expect("world");
    let mut session = GameSession::from_world(world, growth, ManualTicker::new());
    let mut frames = Vec::new();

    for tick in 0..200_u64 {
        for (at, direction) in SCRIPT {
            if at == tick {
                session.enqueue(direction);
            }
        }
        session.ticker_mut().fire(1);
        let _ = session.pump_ticks();
        frames.push(Frame::from(&session.playfield()));
        if session.is_game_over() {
            break;
        }
    }

    ReplayOutcome { frames }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Frame {
    snake: Vec<(i32, i32)>,
    fruit: (i32, i32),
    score: u32,
    tick: u64,
}

impl From<&PlayfieldSnapshot> for Frame {
    fn from(playfield: &PlayfieldSnapshot) -> Self {
        Self {
            snake: playfield
                .snake
                .iter()
                .map(|cell| (cell.x(), cell.y()))
                .collect(),
            fruit: (playfield.fruit.x(), playfield.fruit.y()),
            score: playfield.score,
            tick: playfield.tick,
        }
    }
}

#[derive(Debug)]
struct ReplayOutcome {
    frames: Vec<Frame>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.frames.hash(&mut hasher);
        hasher.finish()
    }
}
