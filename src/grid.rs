use std::collections::HashMap;

use metrohash::MetroBuildHasher;
use thiserror::Error;

use crate::{utils::Bounds, Pos};

pub use build::{Liveness, TextFormat, DEFAULT_PATTERN};
mod build;

/// State of a single lattice position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Conway's rule: 3 neighbors give life, 2 keep the current state, anything else kills.
    pub fn next(self, live_neighbors: usize) -> Cell {
        match live_neighbors {
            3 => Cell::Alive,
            2 => self,
            _ => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("grid must have at least one live cell")]
pub struct EmptyGridError;

/// One generation: every known position mapped to its explicit state.
///
/// Positions that were never recorded are dead. A grid handed out by a
/// constructor always holds at least one live cell, and it cannot be
/// changed afterwards:
///
/// ```compile_fail
/// let mut grid = conway::Grid::from_text("x").unwrap();
/// grid.set(conway::pos!(0, 0), conway::Cell::Dead);
/// ```
///
/// ```compile_fail
/// let grid = conway::Grid::default();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: HashMap<Pos, Cell, MetroBuildHasher>,
}

impl Grid {
    pub(crate) fn empty() -> Self {
        Self {
            cells: HashMap::default(),
        }
    }

    pub fn get(&self, pos: Pos) -> Cell {
        self.cells.get(&pos).copied().unwrap_or_default()
    }

    pub fn is_alive(&self, pos: Pos) -> bool {
        self.get(pos).is_alive()
    }

    /// live positions, sorted by row then column.
    pub fn actives(&self) -> Vec<Pos> {
        let mut actives: Vec<Pos> = self.live_positions().collect();
        actives.sort_by_key(|pos| (pos.y, pos.x));
        actives
    }

    pub fn live_count(&self) -> usize {
        self.live_positions().count()
    }

    /// number of positions with a recorded state, live or dead.
    pub fn known_count(&self) -> usize {
        self.cells.len()
    }

    /// smallest rectangle containing every live cell.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::covering(self.live_positions())
    }

    /// Records `cell` at `pos`. Mutators don't check that a live cell remains.
    pub(crate) fn set(&mut self, pos: Pos, cell: Cell) {
        self.cells.insert(pos, cell);
    }

    /// Records `cell` only where nothing is known yet.
    pub(crate) fn add_if_absent(&mut self, pos: Pos, cell: Cell) {
        self.cells.entry(pos).or_insert(cell);
    }

    #[allow(dead_code)]
    pub(crate) fn remove(&mut self, pos: Pos) {
        self.cells.remove(&pos);
    }

    pub fn live_neighbors(&self, pos: Pos) -> usize {
        pos.neighbors().filter(|n| self.is_alive(*n)).count()
    }

    /// Computes the following generation, evaluated entirely against `self`.
    ///
    /// The returned flag is false once no live cell remains, in which case the
    /// returned grid must not be used as a new starting point.
    pub fn next(&self) -> (Grid, bool) {
        let candidates = self.with_neighbors();
        let mut next = Grid::empty();
        for (pos, cell) in candidates.cells {
            next.set(pos, cell.next(self.live_neighbors(pos)));
        }
        let ok = next.live_count() > 0;
        (next, ok)
    }

    /// live cells with their state, plus every neighbor seeded as dead.
    fn with_neighbors(&self) -> Grid {
        let mut grid = Grid::empty();
        for pos in self.live_positions() {
            grid.set(pos, Cell::Alive);
            for neighbor in pos.neighbors() {
                grid.add_if_absent(neighbor, Cell::Dead);
            }
        }
        grid
    }

    fn live_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .filter_map(|(pos, cell)| cell.is_alive().then_some(*pos))
    }

    fn require_non_empty(self) -> Result<Self, EmptyGridError> {
        if self.live_count() == 0 {
            Err(EmptyGridError)
        } else {
            Ok(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos;

    fn grid(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(rows.iter().map(|row| row.iter().copied())).unwrap()
    }

    #[test]
    fn rule_for_every_neighbor_count() {
        for count in 0..=8 {
            let expected_from_dead = count == 3;
            let expected_from_alive = count == 2 || count == 3;
            assert_eq!(Cell::Dead.next(count).is_alive(), expected_from_dead, "dead with {count}");
            assert_eq!(Cell::Alive.next(count).is_alive(), expected_from_alive, "alive with {count}");
        }
    }

    #[test]
    fn rule_through_constructed_neighborhoods() {
        let center = pos!(0, 0);
        for count in 0..=8 {
            for center_alive in [false, true] {
                let mut g = Grid::empty();
                for neighbor in center.neighbors().take(count) {
                    g.set(neighbor, Cell::Alive);
                }
                g.set(center, Cell::from(center_alive));
                assert_eq!(g.live_neighbors(center), count);

                let (next, _) = g.next();
                let expected = match count {
                    3 => true,
                    2 => center_alive,
                    _ => false,
                };
                assert_eq!(next.is_alive(center), expected, "count {count}, alive {center_alive}");
            }
        }
    }

    #[test]
    fn live_neighbors_counts() {
        let g = grid(&[&[1, 0, 0, 0], &[1, 1, 1, 0], &[0, 0, 1, 1], &[0, 0, 0, 0]]);
        assert_eq!(g.live_neighbors(pos!(0, 0)), 2);
        assert_eq!(g.live_neighbors(pos!(2, 2)), 3);
    }

    #[test]
    fn candidates_are_live_cells_and_their_ring() {
        let g = grid(&[&[1, 0], &[0, 1]]);
        let candidates = g.with_neighbors();
        assert_eq!(candidates.known_count(), 14);
        assert_eq!(candidates.actives(), vec![pos!(0, 0), pos!(1, 1)]);
        assert_eq!(candidates.get(pos!(-1, -1)), Cell::Dead);
        assert!(candidates.cells.contains_key(&pos!(2, 2)));
        assert!(!candidates.cells.contains_key(&pos!(2, -1)));
    }

    #[test]
    fn blinker_oscillates() {
        let vertical = grid(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]]);
        let (horizontal, ok) = vertical.next();
        assert!(ok);
        assert_eq!(horizontal.actives(), vec![pos!(0, 1), pos!(1, 1), pos!(2, 1)]);

        let (back, ok) = horizontal.next();
        assert!(ok);
        assert_eq!(back.actives(), vertical.actives());
    }

    #[test]
    fn toad_phase() {
        let start = grid(&[&[0, 0, 0, 0], &[0, 1, 1, 1], &[1, 1, 1, 0], &[0, 0, 0, 0]]);
        let expected = grid(&[&[0, 0, 1, 0], &[1, 0, 0, 1], &[1, 0, 0, 1], &[0, 1, 0, 0]]);
        let (next, _) = start.next();
        assert_eq!(next.actives(), expected.actives());
    }

    #[test]
    fn block_is_still() {
        let mut g = grid(&[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]]);
        let block = g.actives();
        for _ in 0..5 {
            let (next, ok) = g.next();
            assert!(ok);
            assert_eq!(next.actives(), block);
            g = next;
        }
    }

    #[test]
    fn next_does_not_keep_distant_dead_cells() {
        let mut g = grid(&[&[1, 1], &[1, 1]]);
        g.set(pos!(40, 40), Cell::Dead);
        let (next, _) = g.next();
        assert!(!next.cells.contains_key(&pos!(40, 40)));
        assert_eq!(next.known_count(), 16);
    }

    #[test]
    fn blinker_on_the_lattice_edge() {
        let mut g = Grid::empty();
        for y in 0..3 {
            g.set(pos!(i32::MAX, y), Cell::Alive);
        }
        let (next, ok) = g.next();
        assert!(ok);
        assert_eq!(next.actives(), vec![pos!(i32::MAX - 1, 1), pos!(i32::MAX, 1)]);
        assert_eq!(next.bounds().unwrap().width(), 2);
    }

    #[test]
    fn lone_cell_dies() {
        let g = grid(&[&[1]]);
        let (next, ok) = g.next();
        assert!(!ok);
        assert_eq!(next.live_count(), 0);
        assert_eq!(next.bounds(), None);
    }

    #[test]
    fn add_if_absent_keeps_known_state() {
        let mut g = Grid::empty();
        g.set(pos!(1, 1), Cell::Alive);
        g.add_if_absent(pos!(1, 1), Cell::Dead);
        g.add_if_absent(pos!(2, 1), Cell::Dead);
        assert_eq!(g.get(pos!(1, 1)), Cell::Alive);
        assert_eq!(g.known_count(), 2);

        g.remove(pos!(1, 1));
        assert_eq!(g.get(pos!(1, 1)), Cell::Dead);
        assert_eq!(g.known_count(), 1);
    }

    #[test]
    fn bounds_include_negative_cells() {
        let mut g = grid(&[&[1, 0, 0, 0], &[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 1, 1, 0]]);
        g.set(pos!(-2, 0), Cell::Alive);
        let bounds = g.bounds().unwrap();
        assert_eq!(bounds.min, pos!(-2, 0));
        assert_eq!(bounds.max, pos!(2, 3));
    }
}
