use std::{
    fs::{self, OpenOptions},
    io::{self, Read, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use conway::{Grid, Pacing, RunConfig, Sim, Spinner, DEFAULT_PATTERN};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

#[derive(Parser, Debug)]
#[command(version, about = "conway's game of life in the terminal")]
struct Args {
    /// pattern file, `-` for stdin; the glider when omitted
    pattern: Option<PathBuf>,

    /// start from a random grid instead of a pattern
    #[arg(long, conflicts_with = "pattern")]
    random: bool,

    /// width of the random grid
    #[arg(long, default_value_t = 40)]
    width: i32,

    /// height of the random grid
    #[arg(long, default_value_t = 20)]
    height: i32,

    /// chance of a random cell being live
    #[arg(long, default_value_t = 0.3)]
    probability: f64,

    /// seed for the random grid
    #[arg(long)]
    seed: Option<u64>,

    /// number of turns to run, 0 or less runs until extinction
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    turns: i64,

    /// ms between turns
    #[arg(long, default_value_t = 500)]
    delay: u64,

    /// wait for enter between turns instead of sleeping
    #[arg(long)]
    prompt: bool,

    /// append frames to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// clear the terminal before each frame
    #[arg(long)]
    clear: bool,

    /// animate the wait between turns
    #[arg(long, conflicts_with = "prompt")]
    spinner: bool,
}

impl Args {
    fn pattern_from_stdin(&self) -> bool {
        self.pattern.as_ref().is_some_and(|path| path.as_os_str() == "-")
    }

    /// both would need stdin: the pattern until EOF, then a line per turn.
    fn validate(&self) -> Result<()> {
        ensure!(
            !(self.prompt && self.pattern_from_stdin()),
            "--prompt reads turns from stdin, it cannot be combined with a pattern from stdin"
        );
        Ok(())
    }

    fn config(&self) -> RunConfig {
        RunConfig {
            max_turns: self.turns,
            pacing: if self.prompt {
                Pacing::Interactive
            } else {
                Pacing::Delay(Duration::from_millis(self.delay))
            },
            clear: self.clear,
            spinner: self.spinner.then(Spinner::default),
            ..RunConfig::default()
        }
    }

    fn grid(&self) -> Result<Grid> {
        if self.random {
            let grid = match self.seed {
                Some(seed) => Grid::random_with(
                    &mut StdRng::seed_from_u64(seed),
                    self.width,
                    self.height,
                    self.probability,
                ),
                None => Grid::random(self.width, self.height, self.probability),
            };
            return grid.context("random grid came out empty");
        }

        let text = match &self.pattern {
            None => DEFAULT_PATTERN.to_string(),
            Some(_) if self.pattern_from_stdin() => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read pattern from stdin")?;
                text
            }
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read pattern {}", path.display()))?,
        };
        Grid::from_text(&text).context("pattern has no live cell")
    }

    fn output(&self) -> Result<Box<dyn Write>> {
        let Some(path) = &self.out else {
            return Ok(Box::new(io::stdout()));
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        Ok(Box::new(file))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    args.validate()?;

    let grid = args.grid()?;
    info!("starting with {} live cells", grid.live_count());

    let report = Sim::new(grid, &args.config(), args.output()?).run()?;
    info!("ran {} turns, halted: {:?}", report.turns, report.halt);
    Ok(())
}
