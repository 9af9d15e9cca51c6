//! Plain-text backend that writes one frame per update.

use std::{
    fmt::Write as _,
    io::Write,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result as AnyResult};
use tracing::trace;

use crate::{FrameControl, Palette, Presentation, RenderingBackend, Scene, Tile};

/// Backend that prints frames as text to any writer.
#[derive(Debug)]
pub struct TextBackend<W> {
    writer: W,
    frame_interval: Duration,
    ansi_colors: bool,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend that writes frames back to back.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            frame_interval: Duration::ZERO,
            ansi_colors: false,
        }
    }

    /// Waits `frame_interval` between frames.
    #[must_use]
    pub const fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    /// Colors glyphs with 24-bit ANSI escape sequences.
    #[must_use]
    pub const fn with_ansi_colors(mut self, enabled: bool) -> Self {
        self.ansi_colors = enabled;
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn present(&mut self, presentation: &Presentation) -> AnyResult<()> {
        let palette = self.ansi_colors.then_some(&presentation.palette);
        let frame = render_to_string(&presentation.scene, palette);
        self.writer
            .write_all(frame.as_bytes())
            .context("failed to write frame")?;
        self.writer.flush().context("failed to flush frame")
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn run<F>(mut self, mut presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) -> FrameControl,
    {
        writeln!(self.writer, "{}", presentation.title).context("failed to write title")?;

        let mut last_frame = Instant::now();
        loop {
            let now = Instant::now();
            let control = update_scene(now - last_frame, &mut presentation.scene);
            last_frame = now;

            self.present(&presentation)?;
            trace!(tick = presentation.scene.tick, "frame presented");
            if control == FrameControl::Exit {
                return Ok(());
            }

            if !self.frame_interval.is_zero() {
                thread::sleep(self.frame_interval);
            }
        }
    }
}

/// Draws the scene, including a one-cell border around the play area, as text.
///
/// Glyphs are colored with `palette` when one is provided.
#[must_use]
pub fn render_to_string(scene: &Scene, palette: Option<&Palette>) -> String {
    let mut frame = String::new();
    for y in -1..=scene.height {
        for x in -1..=scene.width {
            let tile = scene.tile_at(x, y);
            match palette {
                Some(palette) => {
                    let (red, green, blue) = palette.color_of(tile).to_rgb_u8();
                    let _ = write!(
                        frame,
                        "\x1b[38;2;{red};{green};{blue}m{}\x1b[0m",
                        glyph(tile)
                    );
                }
                None => frame.push(glyph(tile)),
            }
        }
        frame.push('\n');
    }

    let _ = write!(frame, "score: {}  tick: {}", scene.score, scene.tick);
    if scene.game_over {
        frame.push_str("  game over");
    }
    frame.push('\n');
    frame
}

const fn glyph(tile: Tile) -> char {
    match tile {
        Tile::Empty => '.',
        Tile::Border => '#',
        Tile::SnakeBody => 'o',
        Tile::SnakeHead => '@',
        Tile::Fruit => '*',
    }
}
