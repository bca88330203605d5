use crate::framebuffer::{CHIP8_DISPLAY_HEIGHT, CHIP8_DISPLAY_WIDTH, PIXEL_OFF};
use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Display is the presentation surface the interpreter pushes frames to. It
/// should abstract the implementation details, so a variety of kinds of
/// screen would work.
pub trait Display {
    /// show a row-major framebuffer of 32-bit pixels; `pitch` is the number
    /// of bytes in one row
    fn update(&mut self, framebuffer: &[u32], pitch: usize) -> Result<(), io::Error>;
}

// width and height in pixels
struct Resolution(usize, usize);

impl Resolution {
    fn pixel_count(&self) -> usize {
        self.0 * self.1
    }

    fn pitch(&self) -> usize {
        self.0 * std::mem::size_of::<u32>()
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    /// make sure we're given exactly the right shape of data to draw
    fn check(&self, framebuffer: &[u32], pitch: usize) -> Result<(), io::Error> {
        if framebuffer.len() != self.pixel_count() || pitch != self.pitch() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "expected {} pixels with pitch {}, got {} with pitch {}",
                    self.pixel_count(),
                    self.pitch(),
                    framebuffer.len(),
                    pitch
                ),
            ));
        }
        Ok(())
    }

    /// canvas coordinates of every lit (or unlit) pixel; y runs downwards
    /// from 0 so the top row is at the top of the canvas
    fn points<'a>(
        &self,
        framebuffer: &'a [u32],
        lit: bool,
    ) -> impl std::iter::Iterator<Item = (f64, f64)> + 'a {
        let w = self.0;
        framebuffer
            .iter()
            .enumerate()
            .filter(move |(_, px)| (**px != PIXEL_OFF) == lit)
            .map(move |(i, _)| ((i % w) as f64, -1.0 * (i / w) as f64))
    }
}

/// monochrome display in a terminal, rendered using TUI and Crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
}

impl MonoTermDisplay {
    pub fn new(x: usize, y: usize) -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(x, y),
        })
    }

    /// the standard 64x32 screen
    pub fn chip8() -> Result<MonoTermDisplay, io::Error> {
        Self::new(CHIP8_DISPLAY_WIDTH, CHIP8_DISPLAY_HEIGHT)
    }
}

impl Drop for MonoTermDisplay {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
    }
}

impl Display for MonoTermDisplay {
    fn update(&mut self, framebuffer: &[u32], pitch: usize) -> Result<(), io::Error> {
        self.resolution.check(framebuffer, pitch)?;

        let unlit: Vec<_> = self.resolution.points(framebuffer, false).collect();
        let lit: Vec<_> = self.resolution.points(framebuffer, true).collect();
        let size = Rect::new(
            0,
            0,
            2 + self.resolution.0 as u16,
            2 + self.resolution.1 as u16,
        );
        let x_bounds = self.resolution.x_bounds();
        let y_bounds = self.resolution.y_bounds();

        // for now this assumes a 1:1 ratio between terminal, chip8 and the
        // internal TUI canvas
        self.terminal.draw(|f| {
            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(x_bounds)
                .y_bounds(y_bounds)
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &unlit,
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &lit,
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

/// useful for testing and for running without a terminal; remembers what it
/// was last shown
#[derive(Default)]
pub struct DummyDisplay {
    pub updates: usize,
    pub last_frame: Vec<u32>,
    pub last_pitch: usize,
}

impl DummyDisplay {
    pub fn new() -> DummyDisplay {
        DummyDisplay::default()
    }
}

impl Display for DummyDisplay {
    fn update(&mut self, framebuffer: &[u32], pitch: usize) -> Result<(), io::Error> {
        self.updates += 1;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(framebuffer);
        self.last_pitch = pitch;
        Ok(())
    }
}
