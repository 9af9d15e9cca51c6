#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game session that wires the world, the systems, and a tick source together.
//!
//! The session is the single context that mutates the world. Renderers read
//! [`PlayfieldSnapshot`] values, which are always taken between ticks.

mod config;
mod input;
mod ticker;

use snake_core::{Command, Direction, Event, GrowthPolicy, PlayfieldSnapshot, SetupError};
use snake_system_fruit_eaten::FruitEatenHandler;
use snake_system_movement_control::MovementControl;
use snake_world::{self as world, query, Score, World};
use thiserror::Error;
use tracing::{debug, info, trace};

pub use config::{ConfigError, FruitConfig, GameConfig, GridConfig, SnakeConfig};
pub use input::{DirectionControls, FlagTransition, PollingFlag};
pub use ticker::{IntervalTicker, ManualTicker, TickSource, TickerError};

/// Failures raised while starting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The world could not be set up.
    #[error("failed to set up the world")]
    Setup(#[from] SetupError),
    /// The tick source could not be started.
    #[error("failed to start the tick source")]
    Ticker(#[from] TickerError),
}

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The snake is moving.
    Playing,
    /// A terminal event ended the game.
    GameOver,
    /// The session was disposed before the game ended.
    Disposed,
}

/// Running game driven by a [`TickSource`].
#[derive(Debug)]
pub struct GameSession<T: TickSource> {
    world: World,
    movement: MovementControl,
    fruit_eaten: FruitEatenHandler,
    ticker: T,
    phase: Phase,
}

impl GameSession<IntervalTicker> {
    /// Starts a session ticking in real time at the configured difficulty.
    pub fn start(config: &GameConfig) -> Result<Self, SessionError> {
        let ticker = IntervalTicker::start(config.tick_interval())?;
        Ok(Self::new(config, ticker)?)
    }
}

impl<T: TickSource> GameSession<T> {
    /// Creates a session from a configuration and an already running tick source.
    pub fn new(config: &GameConfig, ticker: T) -> Result<Self, SetupError> {
        let world = World::new(&config.world_config())?;
        info!(
            width = config.grid.width,
            height = config.grid.height,
            difficulty = config.difficulty.label(),
            growth = ?config.growth,
            "session started"
        );
        Ok(Self::from_world(world, config.growth, ticker))
    }

    /// Creates a session around an existing world.
    #[must_use]
    pub fn from_world(world: World, growth: GrowthPolicy, ticker: T) -> Self {
        Self {
            world,
            movement: MovementControl::new(),
            fruit_eaten: FruitEatenHandler::new(growth),
            ticker,
            phase: Phase::Playing,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Reports whether a terminal event ended the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Self-consistent snapshot for rendering.
    #[must_use]
    pub fn playfield(&self) -> PlayfieldSnapshot {
        query::playfield(&self.world)
    }

    /// Tick source driving the session.
    #[must_use]
    pub const fn ticker(&self) -> &T {
        &self.ticker
    }

    /// Mutable access to the tick source.
    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    /// Score once the game is over.
    #[must_use]
    pub fn final_score(&self) -> Option<&Score> {
        (self.phase == Phase::GameOver).then(|| query::score(&self.world))
    }

    /// Buffers a direction for an upcoming tick.
    pub fn enqueue(&mut self, direction: Direction) {
        if self.phase == Phase::Playing {
            debug!(?direction, "direction enqueued");
            self.movement.enqueue(direction);
        }
    }

    /// Polls the controls and enqueues every freshly pressed direction.
    pub fn poll_controls<P>(&mut self, controls: &mut DirectionControls<P>)
    where
        P: FnMut() -> bool,
    {
        let mut pressed = Vec::new();
        controls.poll(&mut pressed);
        for direction in pressed {
            self.enqueue(direction);
        }
    }

    /// Runs every tick the source fired since the last call.
    ///
    /// Returns the events produced, in order.
    pub fn pump_ticks(&mut self) -> Vec<Event> {
        self.pump_ticks_with(|_| {})
    }

    /// Runs every fired tick, calling `before_tick` ahead of each one so
    /// input can be chosen against the state that tick will move.
    pub fn pump_ticks_with<F>(&mut self, mut before_tick: F) -> Vec<Event>
    where
        F: FnMut(&mut Self),
    {
        let fired = self.ticker.poll_ticks();
        let mut events = Vec::new();
        for _ in 0..fired {
            if self.phase != Phase::Playing {
                break;
            }
            before_tick(self);
            events.extend(self.tick());
        }
        events
    }

    /// Runs a single tick regardless of the tick source.
    ///
    /// Does nothing once the game is over or the session was disposed.
    pub fn tick(&mut self) -> Vec<Event> {
        if self.phase != Phase::Playing {
            return Vec::new();
        }
        self.dispatch(Command::Tick)
    }

    /// Stops the tick source. Later ticks are ignored.
    pub fn dispose(&mut self) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Disposed;
        }
        self.ticker.stop();
    }

    fn dispatch(&mut self, command: Command) -> Vec<Event> {
        let mut log = Vec::new();
        let mut pending = vec![command];
        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                trace!(?command, "dispatching command");
                world::apply(&mut self.world, command, &mut events);
            }

            let playfield = query::playfield(&self.world);
            self.movement.handle(&events, &mut pending);
            self.fruit_eaten.handle(&events, &playfield, &mut pending);

            if let Some(event) = events.iter().find(|event| event.is_terminal()) {
                self.finish(event);
            }
            log.extend(events);
        }
        log
    }

    fn finish(&mut self, cause: &Event) {
        if self.phase != Phase::Playing {
            return;
        }
        self.phase = Phase::GameOver;
        self.ticker.stop();
        let score = query::score(&self.world);
        info!(
            score = score.value(),
            difficulty = score.difficulty().label(),
            ticks = query::tick_index(&self.world),
            ?cause,
            "game over"
        );
    }
}

impl<T: TickSource> Drop for GameSession<T> {
    fn drop(&mut self) {
        self.ticker.stop();
    }
}
