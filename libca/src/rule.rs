use std::fmt::Debug;

use crate::{
    board::{Grid, Neighborhood, TileState},
    pos::Direction,
};

/// A local update rule: the next state of a cell from its current state and its eight neighbors.
pub trait Rule: Debug {
    type Cell: Clone + Debug + PartialEq;

    fn next_state(
        &self,
        cell: &Self::Cell,
        neighbors: &Neighborhood<'_, Self::Cell>,
    ) -> Self::Cell;
}

/// Computes the whole next generation from a snapshot of `grid`. The input is never written to,
/// so every cell sees the previous generation of its neighbors.
pub fn next_generation<R>(rule: &R, grid: &Grid<R::Cell>) -> Grid<R::Cell>
where
    R: Rule,
{
    grid.map(|pos, cell| rule.next_state(cell, &grid.neighborhood(pos)))
}

/// Conway's Game of Life, B3/S23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifeRule;

impl LifeRule {
    pub const BIRTH: usize = 3;
    pub const SURVIVE: [usize; 2] = [2, 3];
}

impl Rule for LifeRule {
    type Cell = TileState;

    fn next_state(&self, cell: &TileState, neighbors: &Neighborhood<'_, TileState>) -> TileState {
        let alive_neighbor_count = neighbors.count(|neighbor| neighbor.is_alive());

        let alive = match cell {
            TileState::Alive => Self::SURVIVE.contains(&alive_neighbor_count),
            TileState::Dead => alive_neighbor_count == Self::BIRTH,
        };

        if alive {
            TileState::Alive
        } else {
            TileState::Dead
        }
    }
}

/// Continuous rule biased towards the north and east neighbors.
///
/// The north and east values are summed and pushed through a logistic curve centred on
/// [`SigmoidRule::MIDPOINT`]. A cell with exactly one strong neighbor (value above
/// [`SigmoidRule::STRONG_THRESHOLD`]) always becomes fully active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SigmoidRule;

impl SigmoidRule {
    pub const GAIN: f32 = 3.0;
    pub const MIDPOINT: f32 = 1.0;
    pub const STRONG_THRESHOLD: f32 = 0.5;

    const BIASED_DIRECTIONS: [Direction; 2] = [Direction::North, Direction::East];

    pub fn summarize(neighbors: &Neighborhood<'_, f32>) -> NeighborSummary {
        let sum_neighbors = Self::BIASED_DIRECTIONS
            .iter()
            .map(|direction| *neighbors.get(*direction))
            .sum::<f32>();

        let num_neighbors = neighbors.count(|value| *value > Self::STRONG_THRESHOLD);

        NeighborSummary {
            sum_neighbors,
            num_neighbors,
        }
    }

    pub fn value_for(summary: NeighborSummary) -> f32 {
        if summary.num_neighbors == 1 {
            return 1.0;
        }

        logistic(Self::GAIN * (summary.sum_neighbors - Self::MIDPOINT))
    }
}

impl Rule for SigmoidRule {
    type Cell = f32;

    fn next_state(&self, _cell: &f32, neighbors: &Neighborhood<'_, f32>) -> f32 {
        Self::value_for(Self::summarize(neighbors))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborSummary {
    /// Sum of the north and east neighbor values.
    pub sum_neighbors: f32,
    /// Neighbors, out of all eight, above the strong threshold.
    pub num_neighbors: usize,
}

pub fn logistic(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
