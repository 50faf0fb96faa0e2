#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Moves by `(dx, dy)` on a `width` x `height` torus. The result is always inside the grid.
    pub fn wrapping_offset(self, dx: isize, dy: isize, width: usize, height: usize) -> Self {
        Self {
            x: wrap_axis(self.x, dx, width),
            y: wrap_axis(self.y, dy, height),
        }
    }
}

fn wrap_axis(coord: usize, offset: isize, len: usize) -> usize {
    let len = len as isize;
    // rem_euclid keeps negative offsets on the far edge instead of going below zero.
    (coord as isize % len + offset).rem_euclid(len) as usize
}

impl From<[usize; 2]> for Position {
    fn from(value: [usize; 2]) -> Self {
        Self {
            x: value[0],
            y: value[1],
        }
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Compass direction of a neighbor. North points towards row zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    pub fn offset(self) -> [isize; 2] {
        match self {
            Direction::NorthWest => [-1, -1],
            Direction::North => [0, -1],
            Direction::NorthEast => [1, -1],
            Direction::West => [-1, 0],
            Direction::East => [1, 0],
            Direction::SouthWest => [-1, 1],
            Direction::South => [0, 1],
            Direction::SouthEast => [1, 1],
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
