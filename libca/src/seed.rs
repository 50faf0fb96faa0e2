use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{board::Grid, error::GridError};

/// Hard-coded starting patterns, in `(x, y)` cells of the default 15x10 grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, EnumString, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Seed {
    /// Three cells on a rising diagonal.
    Diagonal,
    /// Starts small and expands into a stable-ish pattern.
    Cluster,
    Ring,
    /// Lightweight spaceship, travelling west.
    Lwss,
    Glider,
    Blinker,
}

impl Seed {
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            Seed::Diagonal => &[(5, 5), (6, 4), (7, 3)],
            Seed::Cluster => &[(4, 2), (5, 2), (6, 2), (5, 3), (6, 3), (7, 3), (7, 4)],
            Seed::Ring => &[
                (5, 1),
                (5, 2),
                (5, 3),
                (6, 1),
                (6, 3),
                (7, 1),
                (7, 2),
                (7, 3),
            ],
            Seed::Lwss => &[
                (6, 3),
                (9, 3),
                (5, 4),
                (5, 5),
                (9, 5),
                (5, 6),
                (6, 6),
                (7, 6),
                (8, 6),
            ],
            Seed::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
            Seed::Blinker => &[(6, 5), (7, 5), (8, 5)],
        }
    }

    /// Writes `live` into every seed cell. Cells that are not part of the seed are left as they are.
    pub fn place<T>(self, grid: &mut Grid<T>, live: T) -> Result<(), GridError>
    where
        T: Clone,
    {
        for pos in self.cells() {
            *grid.checked_tile_mut(*pos)? = live.clone();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::board::{DEFAULT_HEIGHT, DEFAULT_WIDTH, TileState};

    #[test]
    fn test_every_seed_fits_the_default_grid() {
        for seed in Seed::iter() {
            let mut grid = Grid::new(DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap();
            seed.place(&mut grid, TileState::Alive).unwrap();

            let alive = grid.tiles().iter().filter(|tile| tile.is_alive()).count();
            assert_eq!(alive, seed.cells().len(), "{seed} has duplicate cells");
        }
    }

    #[test]
    fn test_place_rejects_small_grid() {
        let mut grid = Grid::<f32>::new(4, 4).unwrap();

        assert_eq!(
            Seed::Diagonal.place(&mut grid, 1.0),
            Err(GridError::OutOfBounds {
                x: 5,
                y: 5,
                width: 4,
                height: 4
            })
        );
    }

    #[test]
    fn test_seed_names() {
        assert_eq!("lwss".parse::<Seed>(), Ok(Seed::Lwss));
        assert_eq!(Seed::Diagonal.to_string(), "diagonal");
        assert!("spaceship".parse::<Seed>().is_err());

        let seed: Seed = serde_json::from_str("\"glider\"").unwrap();
        assert_eq!(seed, Seed::Glider);
    }
}
