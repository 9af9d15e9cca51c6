#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for snake adapters.

mod text;

use anyhow::Result as AnyResult;
use snake_core::PlayfieldSnapshot;
use std::{error::Error, fmt, time::Duration};

pub use text::{render_to_string, TextBackend};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the color channels back to bytes, ignoring alpha.
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        (
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        )
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Colors assigned to each kind of tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Unoccupied cells.
    pub empty: Color,
    /// Ring of cells just outside the play area.
    pub border: Color,
    /// Snake body nodes.
    pub snake_body: Color,
    /// Snake head node.
    pub snake_head: Color,
    /// The fruit.
    pub fruit: Color,
}

impl Palette {
    /// Color used to draw the provided tile.
    #[must_use]
    pub const fn color_of(&self, tile: Tile) -> Color {
        match tile {
            Tile::Empty => self.empty,
            Tile::Border => self.border,
            Tile::SnakeBody => self.snake_body,
            Tile::SnakeHead => self.snake_head,
            Tile::Fruit => self.fruit,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        let snake_body = Color::from_rgb_u8(46, 160, 67);
        Self {
            empty: Color::from_rgb_u8(40, 40, 48),
            border: Color::from_rgb_u8(128, 128, 128),
            snake_body,
            snake_head: snake_body.lighten(0.35),
            fruit: Color::from_rgb_u8(214, 48, 49),
        }
    }
}

/// Content of a single grid position as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Nothing occupies the cell.
    Empty,
    /// The position lies outside the play area.
    Border,
    /// A snake node other than the head.
    SnakeBody,
    /// The snake's head.
    SnakeHead,
    /// The fruit.
    Fruit,
}

/// Scene description of the play area and its inhabitants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Number of columns in the play area.
    pub width: i32,
    /// Number of rows in the play area.
    pub height: i32,
    /// Column and row of every snake node inside the play area, head first.
    pub snake: Vec<(i32, i32)>,
    /// Column and row of the fruit, if it is placed.
    pub fruit: Option<(i32, i32)>,
    /// Running score.
    pub score: u32,
    /// Number of ticks processed.
    pub tick: u64,
    /// Whether the game has ended.
    pub game_over: bool,
}

impl Scene {
    /// Creates an empty scene for a play area of the provided size.
    pub fn new(width: i32, height: i32) -> Result<Self, RenderingError> {
        if width <= 0 || height <= 0 {
            return Err(RenderingError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            snake: Vec::new(),
            fruit: None,
            score: 0,
            tick: 0,
            game_over: false,
        })
    }

    /// Creates a scene mirroring the provided snapshot.
    #[must_use]
    pub fn from_playfield(playfield: &PlayfieldSnapshot) -> Self {
        let mut scene = Self {
            width: playfield.width,
            height: playfield.height,
            snake: Vec::new(),
            fruit: None,
            score: 0,
            tick: 0,
            game_over: false,
        };
        scene.update(playfield);
        scene
    }

    /// Copies the latest snapshot into the scene.
    ///
    /// Cells that fall outside the play area are skipped.
    pub fn update(&mut self, playfield: &PlayfieldSnapshot) {
        self.width = playfield.width;
        self.height = playfield.height;
        self.snake.clear();
        self.snake.extend(
            playfield
                .snake
                .iter()
                .filter(|cell| cell.is_valid())
                .map(|cell| (cell.x(), cell.y())),
        );
        self.fruit = playfield
            .fruit
            .is_valid()
            .then(|| (playfield.fruit.x(), playfield.fruit.y()));
        self.score = playfield.score;
        self.tick = playfield.tick;
    }

    /// Reports whether `(x, y)` lies inside the play area.
    #[must_use]
    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Content of `(x, y)`. Positions outside the play area are border tiles.
    #[must_use]
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        if !self.is_inside(x, y) {
            return Tile::Border;
        }
        match self.snake.iter().position(|node| *node == (x, y)) {
            Some(0) => Tile::SnakeHead,
            Some(_) => Tile::SnakeBody,
            None if self.fruit == Some((x, y)) => Tile::Fruit,
            None => Tile::Empty,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown above the play area.
    pub title: String,
    /// Colors used for each tile kind.
    pub palette: Palette,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, palette: Palette, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            palette,
            scene,
        }
    }
}

/// Decision returned by the scene update callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Present this frame and stop.
    Exit,
}

/// Rendering backend capable of presenting snake scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update callback requests an exit.
    ///
    /// `update_scene` receives the time elapsed since the previous frame and
    /// refreshes the scene from the latest snapshot before it is drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) -> FrameControl;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// Both dimensions must be positive.
    InvalidDimensions {
        /// Provided width.
        width: i32,
        /// Provided height.
        height: i32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "scene dimensions must be positive (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::{Cell, Direction, GridId};

    fn playfield() -> PlayfieldSnapshot {
        let grid = GridId::unique();
        PlayfieldSnapshot {
            width: 4,
            height: 3,
            snake: vec![Cell::new(grid, 2, 1), Cell::new(grid, 1, 1), Cell::INVALID],
            direction: Direction::Right,
            fruit: Cell::new(grid, 3, 2),
            fruit_value: 3,
            score: 6,
            tick: 9,
        }
    }

    #[test]
    fn scene_rejects_empty_dimensions() {
        assert_eq!(
            Scene::new(0, 3),
            Err(RenderingError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(Scene::new(1, 1).is_ok());
    }

    #[test]
    fn snapshot_drops_cells_outside_the_play_area() {
        let scene = Scene::from_playfield(&playfield());
        assert_eq!(scene.snake, vec![(2, 1), (1, 1)]);
        assert_eq!(scene.fruit, Some((3, 2)));
        assert_eq!(scene.score, 6);
        assert_eq!(scene.tick, 9);
    }

    #[test]
    fn probing_beyond_the_edge_yields_border() {
        let scene = Scene::from_playfield(&playfield());
        assert_eq!(scene.tile_at(-1, 0), Tile::Border);
        assert_eq!(scene.tile_at(4, 0), Tile::Border);
        assert_eq!(scene.tile_at(0, 3), Tile::Border);
        assert_eq!(scene.tile_at(2, 1), Tile::SnakeHead);
        assert_eq!(scene.tile_at(1, 1), Tile::SnakeBody);
        assert_eq!(scene.tile_at(3, 2), Tile::Fruit);
        assert_eq!(scene.tile_at(0, 0), Tile::Empty);
    }

    #[test]
    fn lighten_moves_towards_white() {
        let base = Color::from_rgb_u8(10, 20, 30);
        assert_eq!(base.lighten(0.0).to_rgb_u8(), (10, 20, 30));
        assert_eq!(base.lighten(1.0).to_rgb_u8(), (255, 255, 255));
        assert_eq!(base.lighten(4.0), base.lighten(1.0));
        assert_eq!(
            Palette::default().color_of(Tile::SnakeHead),
            Palette::default().snake_body.lighten(0.35)
        );
    }
}
