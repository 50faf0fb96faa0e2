use std::{env, io, time::Duration};

use anyhow::bail;
use config::ClientConfig;
use libca::{seed::Seed, variant::Simulation};
use ticker::Ticker;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod renderer;
mod ticker;

pub struct State {
    simulation: Simulation,
    ticker: Ticker,
    seed: Seed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Window,
    Headless,
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let mut args = env::args().skip(1);

    let mode = match args.next().as_deref() {
        None | Some("window") => Mode::Window,
        Some("headless") => Mode::Headless,
        Some(other) => bail!("Unknown mode {other:?}, expected \"window\" or \"headless\""),
    };

    let config = match args.next() {
        Some(config_path) if config_path != "-" => ClientConfig::load(config_path)?,
        _ => ClientConfig::default(),
    };
    config.validate()?;

    let seed = config.seed();
    let mut simulation = Simulation::new(config.rule, seed)?;

    simulation.present();

    info!(?mode, rule = %config.rule, %seed, "starting");

    match mode {
        Mode::Window => {
            let state = State {
                simulation,
                ticker: Ticker::new(
                    Duration::from_millis(config.tick_interval_millis),
                    config.start_running,
                ),
                seed,
            };

            renderer::run(state, &config)
        }
        Mode::Headless => cli::run_stdio(&mut simulation),
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}
