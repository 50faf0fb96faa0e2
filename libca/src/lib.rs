use board::Grid;
use error::GridError;
use rule::{Rule, next_generation};
use tracing::debug;

pub mod board;
pub mod error;
pub mod paint;
pub mod pos;
pub mod rule;
pub mod seed;
pub mod variant;

/// A grid together with the rule that advances it and the number of steps taken so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Automaton<R>
where
    R: Rule,
{
    grid: Grid<R::Cell>,
    rule: R,
    tick: u64,
}

impl<R> Automaton<R>
where
    R: Rule,
{
    pub fn new(grid: Grid<R::Cell>, rule: R) -> Self {
        Self {
            grid,
            rule,
            tick: 0,
        }
    }

    /// Advances one animation frame. The very first step only presents the seed, every later one
    /// replaces the grid with the next generation.
    pub fn step(&mut self) -> &Grid<R::Cell> {
        if self.tick == 0 {
            debug!(rule = ?self.rule, "presenting seed without updating");
        } else {
            self.grid = next_generation(&self.rule, &self.grid);
            debug!(tick = self.tick, rule = ?self.rule, "stepped");
        }

        self.tick += 1;
        &self.grid
    }

    /// Swaps in a new grid of the same size and starts counting ticks from zero again.
    pub fn reset(&mut self, grid: Grid<R::Cell>) -> Result<(), GridError> {
        if grid.width() != self.grid.width() || grid.height() != self.grid.height() {
            return Err(GridError::DimensionMismatch {
                expected_width: self.grid.width(),
                expected_height: self.grid.height(),
                width: grid.width(),
                height: grid.height(),
            });
        }

        debug!(rule = ?self.rule, previous_tick = self.tick, "reset");
        self.grid = grid;
        self.tick = 0;
        Ok(())
    }

    pub fn grid(&self) -> &Grid<R::Cell> {
        &self.grid
    }

    /// Direct access for hand edits. The dimensions stay fixed since [`Grid`] has no resize.
    pub fn grid_mut(&mut self) -> &mut Grid<R::Cell> {
        &mut self.grid
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}
