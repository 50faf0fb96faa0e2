use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

use crate::{
    Automaton,
    board::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Grid, TileState, Toggle},
    error::GridError,
    paint::{self, DrawInstruction},
    pos::Position,
    rule::{LifeRule, SigmoidRule},
    seed::Seed,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RuleKind {
    #[default]
    Sigmoid,
    Life,
}

impl RuleKind {
    pub fn default_seed(self) -> Seed {
        match self {
            RuleKind::Sigmoid => Seed::Diagonal,
            RuleKind::Life => Seed::Lwss,
        }
    }
}

/// Either automaton variant on the default 15x10 grid, so a driver can hold one without generics.
#[derive(Debug, Clone, PartialEq)]
pub enum Simulation {
    Sigmoid(Automaton<SigmoidRule>),
    Life(Automaton<LifeRule>),
}

impl Simulation {
    pub fn new(kind: RuleKind, seed: Seed) -> Result<Self, GridError> {
        debug!(%kind, %seed, "creating simulation");

        Ok(match kind {
            RuleKind::Sigmoid => {
                Simulation::Sigmoid(Automaton::new(seeded_grid(seed, 1.0)?, SigmoidRule))
            }
            RuleKind::Life => {
                Simulation::Life(Automaton::new(seeded_grid(seed, TileState::Alive)?, LifeRule))
            }
        })
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Simulation::Sigmoid(_) => RuleKind::Sigmoid,
            Simulation::Life(_) => RuleKind::Life,
        }
    }

    pub fn step(&mut self) {
        match self {
            Simulation::Sigmoid(automaton) => {
                automaton.step();
            }
            Simulation::Life(automaton) => {
                automaton.step();
            }
        }
    }

    /// Runs the first step of a fresh grid, which shows it without updating it.
    /// Does nothing once the tick has moved past 0.
    pub fn present(&mut self) {
        if self.tick() == 0 {
            self.step();
        }
    }

    pub fn tick(&self) -> u64 {
        match self {
            Simulation::Sigmoid(automaton) => automaton.tick(),
            Simulation::Life(automaton) => automaton.tick(),
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Simulation::Sigmoid(automaton) => automaton.grid().width(),
            Simulation::Life(automaton) => automaton.grid().width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Simulation::Sigmoid(automaton) => automaton.grid().height(),
            Simulation::Life(automaton) => automaton.grid().height(),
        }
    }

    pub fn paint(&self, cell_side: u32) -> Vec<DrawInstruction> {
        match self {
            Simulation::Sigmoid(automaton) => paint::paint(automaton.grid(), cell_side).collect(),
            Simulation::Life(automaton) => paint::paint(automaton.grid(), cell_side).collect(),
        }
    }

    pub fn render_text(&self) -> String {
        match self {
            Simulation::Sigmoid(automaton) => paint::render_text(automaton.grid()),
            Simulation::Life(automaton) => paint::render_text(automaton.grid()),
        }
    }

    /// Flips the cell at `pos`. Returns false if `pos` is outside the grid.
    pub fn toggle<P>(&mut self, pos: P) -> bool
    where
        P: Into<Position>,
    {
        fn toggle_tile<T: Toggle>(tile: Option<&mut T>) -> bool {
            match tile {
                Some(tile) => {
                    *tile = tile.toggled();
                    true
                }
                None => false,
            }
        }

        match self {
            Simulation::Sigmoid(automaton) => toggle_tile(automaton.grid_mut().tile_mut(pos)),
            Simulation::Life(automaton) => toggle_tile(automaton.grid_mut().tile_mut(pos)),
        }
    }

    /// Kills every cell without touching the tick counter.
    pub fn clear(&mut self) {
        match self {
            Simulation::Sigmoid(automaton) => automaton.grid_mut().fill(0.0),
            Simulation::Life(automaton) => automaton.grid_mut().fill(TileState::Dead),
        }
    }

    /// Replaces the grid with `seed` and resets the tick, so the next step presents the seed.
    pub fn reseed(&mut self, seed: Seed) -> Result<(), GridError> {
        debug!(kind = %self.kind(), %seed, "reseeding");

        match self {
            Simulation::Sigmoid(automaton) => automaton.reset(seeded_grid(seed, 1.0)?),
            Simulation::Life(automaton) => automaton.reset(seeded_grid(seed, TileState::Alive)?),
        }
    }

    /// Replaces the grid with `count` randomly placed live cells and resets the tick.
    pub fn randomize<R>(&mut self, count: usize, rng: &mut R) -> Result<(), GridError>
    where
        R: Rng + ?Sized,
    {
        debug!(kind = %self.kind(), count, "randomizing");

        match self {
            Simulation::Sigmoid(automaton) => {
                let mut grid = Grid::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)?;
                grid.scatter(count, 1.0, rng)?;
                automaton.reset(grid)
            }
            Simulation::Life(automaton) => {
                let mut grid = Grid::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)?;
                grid.scatter(count, TileState::Alive, rng)?;
                automaton.reset(grid)
            }
        }
    }
}

fn seeded_grid<T>(seed: Seed, live: T) -> Result<Grid<T>, GridError>
where
    T: Clone + Default,
{
    let mut grid = Grid::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)?;
    seed.place(&mut grid, live)?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn live_count(simulation: &Simulation) -> usize {
        match simulation {
            Simulation::Sigmoid(automaton) => automaton
                .grid()
                .tiles()
                .iter()
                .filter(|value| **value > 0.5)
                .count(),
            Simulation::Life(automaton) => automaton
                .grid()
                .tiles()
                .iter()
                .filter(|tile| tile.is_alive())
                .count(),
        }
    }

    #[test]
    fn test_rule_kind_names() {
        assert_eq!("life".parse::<RuleKind>(), Ok(RuleKind::Life));
        assert_eq!(RuleKind::Sigmoid.to_string(), "sigmoid");
        assert_eq!(RuleKind::default(), RuleKind::Sigmoid);
    }

    #[test]
    fn test_new_uses_default_grid() {
        let simulation = Simulation::new(RuleKind::Life, Seed::Lwss).unwrap();

        assert_eq!(simulation.kind(), RuleKind::Life);
        assert_eq!((simulation.width(), simulation.height()), (15, 10));
        assert_eq!(simulation.tick(), 0);
        assert_eq!(live_count(&simulation), 9);
    }

    #[test]
    fn test_first_step_keeps_seed_text() {
        let mut simulation = Simulation::new(RuleKind::Sigmoid, Seed::Diagonal).unwrap();
        let before = simulation.render_text();

        simulation.step();
        assert_eq!(simulation.render_text(), before);

        simulation.step();
        assert_ne!(simulation.render_text(), before);
        assert_eq!(simulation.tick(), 2);
    }

    #[test]
    fn test_toggle_inside_and_outside() {
        let mut simulation = Simulation::new(RuleKind::Life, Seed::Blinker).unwrap();

        assert!(simulation.toggle((0, 0)));
        assert_eq!(live_count(&simulation), 4);
        assert!(simulation.toggle((0, 0)));
        assert_eq!(live_count(&simulation), 3);

        assert!(!simulation.toggle((15, 0)));
    }

    #[test]
    fn test_clear_keeps_tick() {
        let mut simulation = Simulation::new(RuleKind::Sigmoid, Seed::Ring).unwrap();
        simulation.step();
        simulation.step();

        simulation.clear();

        assert_eq!(live_count(&simulation), 0);
        assert_eq!(simulation.tick(), 2);
    }

    #[test]
    fn test_reseed_resets_tick() {
        let mut simulation = Simulation::new(RuleKind::Life, Seed::Lwss).unwrap();
        simulation.step();
        simulation.step();

        simulation.reseed(Seed::Glider).unwrap();

        assert_eq!(simulation.tick(), 0);
        assert_eq!(live_count(&simulation), 5);
    }

    #[test]
    fn test_present_only_moves_past_tick_zero() {
        let mut simulation = Simulation::new(RuleKind::Life, Seed::Blinker).unwrap();
        let seeded = simulation.render_text();

        simulation.present();
        assert_eq!(simulation.tick(), 1);
        assert_eq!(simulation.render_text(), seeded);

        simulation.present();
        assert_eq!(simulation.tick(), 1);

        simulation.step();
        assert_eq!(simulation.tick(), 2);
        assert_ne!(simulation.render_text(), seeded);

        simulation.reseed(Seed::Blinker).unwrap();
        simulation.present();
        simulation.step();
        assert_ne!(simulation.render_text(), seeded);
    }

    #[test]
    fn test_randomize() {
        let mut simulation = Simulation::new(RuleKind::Sigmoid, Seed::Diagonal).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        simulation.randomize(30, &mut rng).unwrap();
        assert_eq!(live_count(&simulation), 30);

        assert!(simulation.randomize(151, &mut rng).is_err());
    }

    #[test]
    fn test_paint_covers_every_cell() {
        let simulation = Simulation::new(RuleKind::Life, Seed::Glider).unwrap();
        let instructions = simulation.paint(25);

        assert_eq!(instructions.len(), 150);

        let last = instructions.last().unwrap();
        assert_eq!((last.x, last.y), (14 * 25, 9 * 25));

        let black = instructions
            .iter()
            .filter(|draw| draw.fill == [0, 0, 0, 255])
            .count();
        assert_eq!(black, 5);
    }
}
