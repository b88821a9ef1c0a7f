use std::{
    io::{self, Write},
    thread,
    time::Duration,
};

use log::{debug, info};

use crate::{
    view::{write_frame, Glyphs, Prompt, Spinner},
    Grid,
};

/// How the driver waits between two generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    Delay(Duration),
    /// wait for the operator to press enter.
    Interactive,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// number of frames to render; zero or less runs until extinction.
    pub max_turns: i64,
    pub pacing: Pacing,
    pub glyphs: Glyphs,
    /// clear the terminal before each frame.
    pub clear: bool,
    /// animation shown on stdout during fixed delays.
    pub spinner: Option<Spinner>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_turns: 0,
            pacing: Pacing::Delay(Duration::from_millis(500)),
            glyphs: Glyphs::default(),
            clear: false,
            spinner: None,
        }
    }
}

impl RunConfig {
    pub fn pacer(&self) -> Box<dyn Pace> {
        match self.pacing {
            Pacing::Delay(duration) => Box::new(Delay::new(duration, self.spinner.clone())),
            Pacing::Interactive => Box::new(Prompt::stdin()),
        }
    }

    fn turn_limit(&self) -> Option<usize> {
        (self.max_turns > 0).then_some(self.max_turns as usize)
    }
}

/// Blocks between a rendered frame and the next transition.
pub trait Pace {
    fn pace(&mut self) -> io::Result<()>;
}

impl<P: Pace + ?Sized> Pace for Box<P> {
    fn pace(&mut self) -> io::Result<()> {
        (**self).pace()
    }
}

impl<P: Pace + ?Sized> Pace for &mut P {
    fn pace(&mut self) -> io::Result<()> {
        (**self).pace()
    }
}

/// Fixed sleep, optionally animated on `W`.
#[derive(Debug)]
pub struct Delay<W = io::Stdout> {
    duration: Duration,
    spinner: Option<Spinner>,
    /// lent to the spinner thread while it runs.
    out: Option<W>,
}

impl Delay {
    /// spinner, if any, drawn on stdout.
    pub fn new(duration: Duration, spinner: Option<Spinner>) -> Self {
        Self::with_writer(duration, spinner, io::stdout())
    }
}

impl<W> Delay<W>
where
    W: Write + Send + 'static,
{
    pub fn with_writer(duration: Duration, spinner: Option<Spinner>, out: W) -> Self {
        Self {
            duration,
            spinner,
            out: Some(out),
        }
    }

    /// `None` if a spinner failed and took the writer with it.
    pub fn into_writer(self) -> Option<W> {
        self.out
    }
}

impl<W> Pace for Delay<W>
where
    W: Write + Send + 'static,
{
    fn pace(&mut self) -> io::Result<()> {
        match (&self.spinner, self.out.take()) {
            (Some(spinner), Some(out)) => {
                let handle = spinner.spawn(out);
                thread::sleep(self.duration);
                self.out = Some(handle.stop()?);
            }
            (_, out) => {
                self.out = out;
                thread::sleep(self.duration);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// no live cell left.
    Extinct,
    TurnLimit,
}

#[derive(Debug)]
pub enum State {
    Running(Grid),
    Halted(Halt),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// frames rendered.
    pub turns: usize,
    pub halt: Halt,
}

/// Single-use driver: render, pace, advance, until extinction or the turn limit.
pub struct Sim<W, P> {
    state: State,
    turns: usize,
    turn_limit: Option<usize>,
    glyphs: Glyphs,
    clear: bool,
    out: W,
    pacer: P,
}

impl<W> Sim<W, Box<dyn Pace>>
where
    W: Write,
{
    pub fn new(grid: Grid, config: &RunConfig, out: W) -> Self {
        Self::with_pacer(grid, config, out, config.pacer())
    }
}

impl<W, P> Sim<W, P>
where
    W: Write,
    P: Pace,
{
    /// Driver using `pacer` instead of the one described by `config.pacing`.
    pub fn with_pacer(grid: Grid, config: &RunConfig, out: W, pacer: P) -> Self {
        Self {
            state: State::Running(grid),
            turns: 0,
            turn_limit: config.turn_limit(),
            glyphs: config.glyphs,
            clear: config.clear,
            out,
            pacer,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Runs one turn. Does nothing once halted.
    pub fn step(&mut self) -> io::Result<&State> {
        let State::Running(grid) = &self.state else {
            return Ok(&self.state);
        };

        write_frame(&mut self.out, grid, &self.glyphs, self.clear)?;
        self.turns += 1;
        self.pacer.pace()?;

        let (next, ok) = grid.next();
        debug!("turn {}: {} live cells", self.turns, next.live_count());

        self.state = match (ok, self.turn_limit) {
            (false, _) => State::Halted(Halt::Extinct),
            (true, Some(limit)) if self.turns >= limit => State::Halted(Halt::TurnLimit),
            (true, _) => State::Running(next),
        };
        if let State::Halted(halt) = &self.state {
            info!("halted after {} turns: {halt:?}", self.turns);
        }
        Ok(&self.state)
    }

    pub fn run(mut self) -> io::Result<Report> {
        loop {
            if let State::Halted(halt) = self.step()? {
                let halt = *halt;
                return Ok(Report {
                    turns: self.turns,
                    halt,
                });
            }
        }
    }
}
