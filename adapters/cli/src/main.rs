#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a game of snake in the terminal.

mod autopilot;

use std::{cell::Cell, io, path::PathBuf, rc::Rc};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_core::{Difficulty, Direction, GrowthPolicy};
use snake_rendering::{FrameControl, Palette, Presentation, RenderingBackend, Scene, TextBackend};
use snake_session::{DirectionControls, GameConfig, GameSession};
use snake_world::{query, Score};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Plays snake in the terminal, steered by a greedy autopilot.
#[derive(Debug, Parser)]
#[command(name = "snake", version)]
struct CliArgs {
    /// TOML file describing the game.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured difficulty.
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,
    /// Overrides the grid width.
    #[arg(long)]
    width: Option<i32>,
    /// Overrides the grid height.
    #[arg(long)]
    height: Option<i32>,
    /// Overrides the growth policy.
    #[arg(long, value_enum)]
    growth: Option<GrowthArg>,
    /// Ends the game when the snake runs into itself.
    #[arg(long)]
    self_collision: bool,
    /// Seeds fruit placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
    /// Stops after this many ticks even if the snake is still alive.
    #[arg(long, default_value_t = 500)]
    max_ticks: u64,
    /// Name recorded on the final score.
    #[arg(long, default_value = "autopilot")]
    player: String,
    /// Colors frames with ANSI escape sequences.
    #[arg(long)]
    color: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GrowthArg {
    Disabled,
    GrowByValue,
}

impl From<GrowthArg> for GrowthPolicy {
    fn from(value: GrowthArg) -> Self {
        match value {
            GrowthArg::Disabled => Self::Disabled,
            GrowthArg::GrowByValue => Self::GrowByValue,
        }
    }
}

impl CliArgs {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty.into();
        }
        if let Some(width) = self.width {
            config.grid.width = width;
        }
        if let Some(height) = self.height {
            config.grid.height = height;
        }
        if self.width.is_some() || self.height.is_some() {
            config.snake.start_x = config.grid.width / 2;
            config.snake.start_y = config.grid.height / 2;
        }
        if let Some(growth) = self.growth {
            config.growth = growth.into();
        }
        if self.self_collision {
            config.self_collision = true;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

/// Entry point for the snake command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = args.game_config()?;
    let mut session = GameSession::start(&config).context("failed to start game session")?;

    let held: Rc<Cell<Option<Direction>>> = Rc::new(Cell::new(None));
    let mut controls = DirectionControls::new(|direction| {
        let held = Rc::clone(&held);
        move || held.get() == Some(direction)
    });

    let scene = Scene::from_playfield(&session.playfield());
    let presentation = Presentation::new(
        format!("snake ({})", config.difficulty.label()),
        Palette::default(),
        scene,
    );
    let stdout = io::stdout();
    TextBackend::new(stdout.lock())
        .with_frame_interval(config.tick_interval())
        .with_ansi_colors(args.color)
        .run(presentation, |_, scene| {
            let _ = session.pump_ticks_with(|session| {
                held.set(Some(autopilot::choose_direction(&session.playfield())));
                session.poll_controls(&mut controls);
            });

            let playfield = session.playfield();
            scene.update(&playfield);
            scene.game_over = session.is_game_over();
            if scene.game_over || playfield.tick >= args.max_ticks {
                FrameControl::Exit
            } else {
                FrameControl::Continue
            }
        })?;

    session.dispose();
    let mut score = session
        .final_score()
        .cloned()
        .unwrap_or_else(|| query::score(session.world()).clone());
    score.set_player_name(args.player.as_str());
    report(&score);
    Ok(())
}

fn report(score: &Score) {
    info!(
        player = score.player_name(),
        difficulty = score.difficulty().label(),
        score = score.value(),
        "final score"
    );
    println!(
        "final score: {} ({}, {})",
        score.value(),
        score.player_name(),
        score.difficulty().label()
    );
}
