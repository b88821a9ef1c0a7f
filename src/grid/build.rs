use log::warn;
use rand::Rng;

use super::{Cell, EmptyGridError, Grid};
use crate::pos;

/// Glider, used when no pattern is supplied.
pub const DEFAULT_PATTERN: &str = ".....\n..x..\n...x.\n.xxx.\n.....";

/// Characters understood by [`Grid::from_text_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFormat {
    pub live: char,
    pub dead: char,
    /// skipped without taking up a column.
    pub comment: char,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            live: 'x',
            dead: '.',
            comment: '#',
        }
    }
}

const ROW_DELIMITERS: [char; 2] = ['\n', ';'];

/// Stripped from both ends of the pattern and of each row. Spaces stay, they
/// are columns.
const PADDING: [char; 4] = ['\n', '\r', '\t', ';'];

impl TextFormat {
    fn is_padding(&self, c: char) -> bool {
        PADDING.contains(&c) && c != self.live && c != self.dead
    }
}

/// Anything that reads as a live or dead value in a row-major array.
pub trait Liveness {
    fn is_live(&self) -> bool;
}

impl Liveness for bool {
    fn is_live(&self) -> bool {
        *self
    }
}

macro_rules! impl_liveness_for_ints {
    ($($t:ty),*) => {
        $(impl Liveness for $t {
            fn is_live(&self) -> bool {
                *self != 0
            }
        })*
    };
}

impl_liveness_for_ints!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Grid {
    /// Builds a grid from rows of values, `rows[y][x]`; rows may be ragged.
    pub fn from_rows<R, V>(rows: impl IntoIterator<Item = R>) -> Result<Self, EmptyGridError>
    where
        R: IntoIterator<Item = V>,
        V: Liveness,
    {
        let mut grid = Grid::empty();
        for (y, row) in rows.into_iter().enumerate() {
            for (x, value) in row.into_iter().enumerate() {
                grid.set(pos!(x as i32, y as i32), Cell::from(value.is_live()));
            }
        }
        grid.require_non_empty()
    }

    /// Parses a pattern with the default [`TextFormat`].
    pub fn from_text(text: &str) -> Result<Self, EmptyGridError> {
        Self::from_text_with(text, &TextFormat::default())
    }

    /// Parses a pattern whose rows are separated by newlines or semicolons.
    ///
    /// Live and dead markers are recorded explicitly, comment characters are
    /// dropped, and any other character leaves its column unrecorded.
    pub fn from_text_with(text: &str, format: &TextFormat) -> Result<Self, EmptyGridError> {
        let mut grid = Grid::empty();
        let is_padding = |c: char| format.is_padding(c);
        let rows = text.trim_matches(is_padding).split(|c: char| ROW_DELIMITERS.contains(&c));
        for (y, row) in rows.enumerate() {
            let mut x = 0;
            for c in row.trim_matches(is_padding).chars() {
                let pos = pos!(x, y as i32);
                match c {
                    c if c == format.comment => continue,
                    c if c == format.live => grid.set(pos, Cell::Alive),
                    c if c == format.dead => grid.set(pos, Cell::Dead),
                    _ => (),
                }
                x += 1;
            }
        }
        grid.require_non_empty()
    }

    /// Random `width` x `height` grid where each cell lives with probability `p`.
    pub fn random(width: i32, height: i32, p: f64) -> Result<Self, EmptyGridError> {
        Self::random_with(&mut rand::thread_rng(), width, height, p)
    }

    pub fn random_with(
        rng: &mut impl Rng,
        width: i32,
        height: i32,
        p: f64,
    ) -> Result<Self, EmptyGridError> {
        if width < 1 || height < 1 || p.is_nan() || p <= 0.0 {
            return Err(EmptyGridError);
        }
        if p > 1.0 {
            warn!("probability {p} is above 1, every cell will be live");
        }
        let p = p.min(1.0);

        let mut grid = Grid::empty();
        for y in 0..height {
            for x in 0..width {
                grid.set(pos!(x, y), Cell::from(rng.gen_bool(p)));
            }
        }
        grid.require_non_empty()
    }
}
