use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use libca::{
    seed::Seed,
    variant::{RuleKind, Simulation},
};
use tracing::info;

/// Outcome of one console command.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Grid(String),
    Exit,
}

/// Reads commands from `input` until it runs dry or `exit` is given, answering on `output`.
pub fn run_cli<R, W>(simulation: &mut Simulation, input: R, mut output: W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line_res in input.lines() {
        let line = line_res.context("Couldn't read command")?;
        let mut args = line.split_whitespace().peekable();

        if args.peek().is_none() {
            continue;
        }

        match handle_cmd(simulation, args) {
            Ok(Reply::Ok) => writeln!(output, "OK")?,
            Ok(Reply::Grid(text)) => write!(output, "{text}")?,
            Ok(Reply::Exit) => break,
            Err(e) => writeln!(output, "! {e:#}")?,
        }

        output.flush()?;
    }

    info!(tick = simulation.tick(), "console closed");
    Ok(())
}

pub fn run_stdio(simulation: &mut Simulation) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_cli(simulation, stdin.lock(), stdout.lock())
}

fn handle_cmd<'a, I>(simulation: &mut Simulation, mut args: I) -> anyhow::Result<Reply>
where
    I: Iterator<Item = &'a str>,
{
    match args.next().context("No command")? {
        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            for _ in 0..times {
                simulation.step();
            }
        }

        "show" => {
            return Ok(Reply::Grid(format!(
                "{} tick {}\n{}",
                simulation.kind(),
                simulation.tick(),
                simulation.render_text()
            )));
        }

        "clear" => {
            simulation.clear();
        }

        "seed" => {
            let seed = args
                .next()
                .context("missing seed name")?
                .parse::<Seed>()
                .context("unknown seed")?;

            simulation.reseed(seed)?;
            simulation.present();
        }

        "rule" => {
            let kind = args
                .next()
                .context("missing rule name")?
                .parse::<RuleKind>()
                .context("unknown rule")?;

            *simulation = Simulation::new(kind, kind.default_seed())?;
            simulation.present();
        }

        "random" => {
            let alive_count = args
                .next()
                .context("missing alive count")?
                .parse::<usize>()?;

            simulation.randomize(alive_count, &mut rand::rng())?;
            simulation.present();
        }

        "toggle" => {
            let x = args.next().context("missing x")?.parse::<usize>()?;
            let y = args.next().context("missing y")?.parse::<usize>()?;

            if !simulation.toggle((x, y)) {
                bail!("({x}, {y}) is outside the grid");
            }
        }

        "exit" => return Ok(Reply::Exit),

        _ => bail!("Unknown command"),
    }

    Ok(Reply::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(simulation: &mut Simulation, script: &str) -> String {
        let mut output = Vec::new();
        run_cli(simulation, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn life() -> Simulation {
        Simulation::new(RuleKind::Life, Seed::Blinker).unwrap()
    }

    #[test]
    fn test_step_defaults_to_one() {
        let mut simulation = life();

        assert_eq!(run(&mut simulation, "step\nstep 3\n"), "OK\nOK\n");
        assert_eq!(simulation.tick(), 4);
    }

    #[test]
    fn test_show_prints_grid() {
        let mut simulation = life();
        let output = run(&mut simulation, "show\n");

        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("life tick 0"));
        assert_eq!(lines.clone().count(), 10);
        assert_eq!(lines.nth(5), Some("......@@@......"));
    }

    #[test]
    fn test_seed_and_rule_switch() {
        let mut simulation = life();

        run(&mut simulation, "step 2\nseed glider\n");
        assert_eq!(simulation.tick(), 1);

        run(&mut simulation, "rule sigmoid\n");
        assert_eq!(simulation.kind(), RuleKind::Sigmoid);

        let mut expected = Simulation::new(RuleKind::Sigmoid, Seed::Diagonal).unwrap();
        expected.step();
        assert_eq!(simulation, expected);
    }

    #[test]
    fn test_step_after_reseed_advances() {
        let mut simulation = life();
        let seeded = run(&mut simulation, "seed blinker\nshow\n");
        let stepped = run(&mut simulation, "step\nshow\n");

        let grid = |output: &str| output.lines().skip(2).collect::<Vec<_>>().join("\n");
        assert_ne!(grid(&seeded), grid(&stepped));
        assert_eq!(stepped.lines().nth(6), Some(".......@......."));
    }

    #[test]
    fn test_seed_glider_then_four_steps_moves_diagonally() {
        let mut simulation = life();
        run(&mut simulation, "seed glider\nstep 4\n");

        let mut expected = Simulation::new(RuleKind::Life, Seed::Glider).unwrap();
        for _ in 0..5 {
            expected.step();
        }

        assert_eq!(simulation, expected);
        assert_eq!(simulation.tick(), 5);
    }

    #[test]
    fn test_random_presents_new_grid() {
        let mut simulation = life();
        run(&mut simulation, "step 3\nrandom 12\n");

        assert_eq!(simulation.tick(), 1);
    }

    #[test]
    fn test_errors_are_reported_and_loop_continues() {
        let mut simulation = life();
        let output = run(&mut simulation, "jump\nseed nope\ntoggle 20 1\nstep x\nstep\n");

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "! Unknown command");
        assert!(lines[1].starts_with("! unknown seed"));
        assert_eq!(lines[2], "! (20, 1) is outside the grid");
        assert!(lines[3].starts_with("! "));
        assert_eq!(lines[4], "OK");
    }

    #[test]
    fn test_exit_stops_reading() {
        let mut simulation = life();
        let output = run(&mut simulation, "exit\nstep\n");

        assert_eq!(output, "");
        assert_eq!(simulation.tick(), 0);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut simulation = life();
        assert_eq!(run(&mut simulation, "\n   \nclear\n"), "OK\n");
    }

    #[test]
    fn test_random_and_toggle() {
        let mut simulation = life();

        assert_eq!(run(&mut simulation, "random 12\ntoggle 0 0\n"), "OK\nOK\n");
        assert!(run(&mut simulation, "random 500\n").starts_with("! "));
    }
}
