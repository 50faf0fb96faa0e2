use crate::board::{Grid, TileState};

pub const PIXEL_BITS: usize = 4;

pub type Color = [u8; PIXEL_BITS];

pub const BORDER_COLOR: Color = [0, 0, 0, 255];

/// How dark a cell is drawn, from `0.0` (white) to `1.0` (black).
pub trait Shade {
    fn intensity(&self) -> f32;
}

impl Shade for TileState {
    fn intensity(&self) -> f32 {
        match self {
            TileState::Alive => 1.0,
            TileState::Dead => 0.0,
        }
    }
}

impl Shade for f32 {
    fn intensity(&self) -> f32 {
        self.clamp(0.0, 1.0)
    }
}

/// One outlined square for the renderer, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawInstruction {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub fill: Color,
    pub border: Color,
}

pub fn grayscale(intensity: f32) -> Color {
    let brightness = 1.0 - intensity.clamp(0.0, 1.0);
    let level = (brightness * 255.0).round() as u8;
    [level, level, level, 255]
}

/// Draw instructions for every cell in row-major order, each `cell_side` pixels square.
pub fn paint<T>(grid: &Grid<T>, cell_side: u32) -> impl Iterator<Item = DrawInstruction>
where
    T: Shade,
{
    grid.enumerate_tiles().map(move |(pos, tile)| DrawInstruction {
        x: pos.x as u32 * cell_side,
        y: pos.y as u32 * cell_side,
        width: cell_side,
        height: cell_side,
        fill: grayscale(tile.intensity()),
        border: BORDER_COLOR,
    })
}

const TEXT_RAMP: [char; 9] = ['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Plain-text picture of the grid, one line per row, darker cells further along the ramp.
pub fn render_text<T>(grid: &Grid<T>) -> String
where
    T: Shade,
{
    let mut text = String::with_capacity((grid.width() + 1) * grid.height());

    for (pos, tile) in grid.enumerate_tiles() {
        let step = (tile.intensity() * (TEXT_RAMP.len() - 1) as f32).round() as usize;
        text.push(TEXT_RAMP[step.min(TEXT_RAMP.len() - 1)]);

        if pos.x + 1 == grid.width() {
            text.push('\n');
        }
    }

    text
}
