use itertools::Itertools;
use rand::Rng;

use crate::{
    error::GridError,
    pos::{Direction, Position},
};

pub const DEFAULT_WIDTH: usize = 15;
pub const DEFAULT_HEIGHT: usize = 10;

/// Row-major grid of tiles. Width and height are fixed for the lifetime of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    tiles: Vec<T>,
}

impl<T> Grid<T>
where
    T: Clone + Default,
{
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let tiles = vec![T::default(); width * height];
        Self::with_tiles(width, height, tiles)
    }

    /// Sets `count` distinct random tiles to `value`, leaving the rest untouched.
    pub fn scatter<R>(&mut self, count: usize, value: T, rng: &mut R) -> Result<(), GridError>
    where
        R: Rng + ?Sized,
    {
        if count > self.tiles.len() {
            return Err(GridError::TooManyCells {
                requested: count,
                available: self.tiles.len(),
            });
        }

        let mut available_positions = (0..self.width)
            .cartesian_product(0..self.height)
            .map(|(x, y)| Position { x, y })
            .collect_vec();

        for _ in 0..count {
            let chosen_index = rng.random_range(0..available_positions.len());
            let chosen_position = available_positions.swap_remove(chosen_index);

            let index = self.wrapping_index(chosen_position, 0, 0);
            self.tiles[index] = value.clone();
        }

        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        self.tiles.fill(value);
    }
}

impl<T> Grid<T> {
    pub fn with_tiles(width: usize, height: usize, tiles: Vec<T>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }

        let expected = width * height;
        if tiles.len() != expected {
            return Err(GridError::TileCountMismatch {
                width,
                height,
                expected,
                actual: tiles.len(),
            });
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[T] {
        &self.tiles
    }

    pub fn tile<P>(&self, pos: P) -> Option<&T>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.tiles.get(index)
    }

    pub fn tile_mut<P>(&mut self, pos: P) -> Option<&mut T>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.tiles.get_mut(index)
    }

    /// Like [`Grid::tile_mut`], but reports which position was out of range.
    pub fn checked_tile_mut<P>(&mut self, pos: P) -> Result<&mut T, GridError>
    where
        P: Into<Position>,
    {
        let pos = pos.into();
        let (width, height) = (self.width, self.height);

        self.tile_mut(pos).ok_or(GridError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width,
            height,
        })
    }

    /// Toroidal lookup, `pos` offset by `(dx, dy)` with wraparound on both axes.
    pub fn wrapping_tile<P>(&self, pos: P, dx: isize, dy: isize) -> &T
    where
        P: Into<Position>,
    {
        &self.tiles[self.wrapping_index(pos.into(), dx, dy)]
    }

    pub fn neighborhood<P>(&self, pos: P) -> Neighborhood<'_, T>
    where
        P: Into<Position>,
    {
        let pos = pos.into();
        let cells = Direction::ALL.map(|direction| {
            let [dx, dy] = direction.offset();
            self.wrapping_tile(pos, dx, dy)
        });

        Neighborhood { cells }
    }

    pub fn enumerate_tiles(&self) -> impl Iterator<Item = (Position, &T)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (self.index_to_pos(index), tile))
    }

    /// Builds a grid of the same dimensions from every tile of this one.
    pub fn map<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(Position, &T) -> U,
    {
        let tiles = self
            .enumerate_tiles()
            .map(|(pos, tile)| f(pos, tile))
            .collect();

        Grid {
            width: self.width,
            height: self.height,
            tiles,
        }
    }

    fn wrapping_index(&self, pos: Position, dx: isize, dy: isize) -> usize {
        let Position { x, y } = pos.wrapping_offset(dx, dy, self.width, self.height);
        x + y * self.width
    }

    fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let Position { x, y } = pos.into();

        if x >= self.width {
            return None;
        }

        if y >= self.height {
            return None;
        }

        Some(x + (y * self.width))
    }

    fn index_to_pos(&self, index: usize) -> Position {
        let y = index / self.width;
        let x = index % self.width;
        Position { x, y }
    }
}

/// The eight wrapped neighbors of a tile, ordered like [`Direction::ALL`].
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood<'a, T> {
    cells: [&'a T; 8],
}

impl<'a, T> Neighborhood<'a, T> {
    pub fn get(&self, direction: Direction) -> &'a T {
        self.cells[direction.index()]
    }

    pub fn count<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.cells.iter().filter(|cell| predicate(**cell)).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileState {
    Alive,

    #[default]
    Dead,
}

impl TileState {
    pub fn is_alive(self) -> bool {
        self == TileState::Alive
    }
}

/// Flips a cell between its "on" and "off" state, used when editing a grid by hand.
pub trait Toggle {
    fn toggled(&self) -> Self;
}

impl Toggle for TileState {
    fn toggled(&self) -> Self {
        match self {
            TileState::Alive => TileState::Dead,
            TileState::Dead => TileState::Alive,
        }
    }
}

impl Toggle for f32 {
    fn toggled(&self) -> Self {
        if *self > 0.5 { 0.0 } else { 1.0 }
    }
}
