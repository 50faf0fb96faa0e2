use std::{fs, path::Path};

use anyhow::{ensure, Context};
use libca::{seed::Seed, variant::RuleKind};
use serde::{Deserialize, Serialize};

/// Largest accepted `cell_side`.
pub const MAX_CELL_SIDE: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub rule: RuleKind,

    /// Falls back to the rule's own default seed when absent.
    pub seed: Option<Seed>,

    /// Side of one cell on screen, in logical pixels.
    pub cell_side: u32,

    pub target_fps: u64,

    /// Time between generations while the animation is running.
    pub tick_interval_millis: u64,

    pub start_running: bool,

    pub title: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rule: RuleKind::default(),
            seed: None,
            cell_side: 25,
            target_fps: 30,
            tick_interval_millis: 100,
            start_running: false,
            title: "toroidal-ca".to_owned(),
        }
    }
}

impl ClientConfig {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        Self::from_json(&config_serialized)
    }

    pub fn from_json(config_serialized: &[u8]) -> anyhow::Result<Self> {
        let config: Self =
            serde_json::from_slice(config_serialized).context("Couldn't deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.cell_side > 0, "cell_side must be at least 1");
        ensure!(
            self.cell_side <= MAX_CELL_SIDE,
            "cell_side must be at most {MAX_CELL_SIDE}"
        );
        ensure!(self.target_fps > 0, "target_fps must be at least 1");
        ensure!(
            self.tick_interval_millis > 0,
            "tick_interval_millis must be at least 1"
        );
        Ok(())
    }

    pub fn seed(&self) -> Seed {
        self.seed.unwrap_or_else(|| self.rule.default_seed())
    }
}
