//! Conway's game of life on an unbounded lattice.

pub use utils::{Bounds, Pos};
mod utils;

pub use grid::{Cell, EmptyGridError, Grid, TextFormat, DEFAULT_PATTERN};
pub mod grid;

pub use sim::{Delay, Halt, Pace, Pacing, Report, RunConfig, Sim, State};
pub mod sim;

pub use view::{write_frame, Glyphs, Prompt, Spinner, SpinnerHandle};
pub mod view;
