#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Buffered direction input that drives one snake move per tick.

use std::collections::VecDeque;

use snake_core::{Command, Direction, Event};
use tracing::{debug, trace};

/// Pure system that turns queued direction input and tick events into
/// movement commands.
///
/// Directions queued during one tick drain one per tick in FIFO order. The
/// first direction queued on a later tick discards whatever was left over.
#[derive(Debug, Default)]
pub struct MovementControl {
    queue: VecDeque<Direction>,
    current_tick: u64,
    queued_tick: Option<u64>,
    halted: bool,
}

impl MovementControl {
    /// Creates a handler with an empty queue at tick zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers a direction for a future move.
    ///
    /// Ignored once the handler has halted.
    pub fn enqueue(&mut self, direction: Direction) {
        if self.halted {
            return;
        }

        if self.queued_tick != Some(self.current_tick) {
            if !self.queue.is_empty() {
                trace!(
                    stale = self.queue.len(),
                    tick = self.current_tick,
                    "dropping stale directions"
                );
            }
            self.queue.clear();
            self.queued_tick = Some(self.current_tick);
        }

        self.queue.push_back(direction);
        trace!(?direction, tick = self.current_tick, "direction queued");
    }

    /// Consumes world events and emits the commands for this tick.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if self.halted {
                return;
            }

            match event {
                Event::BeforeMove { .. } => self.advance(out),
                Event::OutOfBounds { head } | Event::SelfCollision { head } => {
                    debug!(%head, tick = self.current_tick, "movement halted");
                    self.halted = true;
                    self.queue.clear();
                }
                _ => {}
            }
        }
    }

    /// Number of ticks the handler has moved the snake.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Directions waiting to be applied.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Reports whether a terminal event stopped the handler.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    fn advance(&mut self, out: &mut Vec<Command>) {
        if let Some(direction) = self.queue.pop_front() {
            out.push(Command::SetMovementDirection { direction });
        }
        self.current_tick += 1;
        out.push(Command::MoveSnake);
    }
}
