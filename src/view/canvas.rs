use std::fmt;

use crate::{pos, utils::Bounds, Pos};

/// Glyph buffer covering a rectangle of the lattice.
pub struct Canvas {
    origin: Pos,
    lines: Vec<Vec<char>>,
}

impl Canvas {
    pub fn covering(bounds: Bounds, background: char) -> Self {
        let lines = (0..bounds.height())
            .map(|_| vec![background; bounds.width()])
            .collect();
        Self {
            origin: bounds.min,
            lines,
        }
    }

    /// paints every position for which `f` returns a glyph.
    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        let origin = self.origin;
        for (ly, line) in self.lines.iter_mut().enumerate() {
            for (lx, slot) in line.iter_mut().enumerate() {
                if let Some(char) = f(origin + pos!(lx as i32, ly as i32)) {
                    *slot = char;
                }
            }
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            let line: String = line.iter().collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_relative_to_origin() {
        let bounds = Bounds {
            min: pos!(-1, -1),
            max: pos!(1, 0),
        };
        let mut canvas = Canvas::covering(bounds, '.');
        canvas.layer(|pos| (pos == pos!(-1, -1) || pos == pos!(1, 0)).then_some('#'));
        assert_eq!(canvas.to_string(), "#..\n..#\n");
    }
}
