use std::ops::{Add, Sub};

/// A position on the lattice, which spans the whole `i32` range on both axes.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        $crate::Pos { x: $x, y: $y }
    };
}

impl Pos {
    /// the surrounding positions, row by row, top left first. There are 8 of
    /// them except on the edges of the `i32` range.
    pub fn neighbors(self) -> impl Iterator<Item = Pos> {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| pos!(dx, dy)))
            .filter(|offset| *offset != pos!(0, 0))
            .filter_map(move |offset| self.checked_add(offset))
    }

    pub fn checked_add(self, rhs: Pos) -> Option<Pos> {
        Some(pos!(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?))
    }
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        pos!(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Inclusive rectangle spanning a set of positions.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Bounds {
    pub min: Pos,
    pub max: Pos,
}

impl Bounds {
    pub fn covering(positions: impl IntoIterator<Item = Pos>) -> Option<Self> {
        let mut positions = positions.into_iter();
        let first = positions.next()?;
        let bounds = positions.fold(Bounds { min: first, max: first }, |b, p| Bounds {
            min: pos!(b.min.x.min(p.x), b.min.y.min(p.y)),
            max: pos!(b.max.x.max(p.x), b.max.y.max(p.y)),
        });
        Some(bounds)
    }

    pub fn width(&self) -> usize {
        span(self.min.x, self.max.x)
    }

    pub fn height(&self) -> usize {
        span(self.min.y, self.max.y)
    }
}

fn span(min: i32, max: i32) -> usize {
    (i64::from(max) - i64::from(min)) as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_exclude_center() {
        let actual: Vec<_> = pos!(0, 2).neighbors().collect();
        let expected = vec![
            pos!(-1, 1),
            pos!(0, 1),
            pos!(1, 1),
            pos!(-1, 2),
            pos!(1, 2),
            pos!(-1, 3),
            pos!(0, 3),
            pos!(1, 3),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn bounds_track_negative_coordinates() {
        let bounds = Bounds::covering([pos!(0, 0), pos!(2, 3), pos!(-2, 0), pos!(1, -1)]).unwrap();
        assert_eq!(bounds.min, pos!(-2, -1));
        assert_eq!(bounds.max, pos!(2, 3));
        assert_eq!(bounds.width(), 5);
        assert_eq!(bounds.height(), 5);
    }

    #[test]
    fn neighbors_stop_at_the_edge() {
        let corner: Vec<_> = pos!(i32::MAX, i32::MIN).neighbors().collect();
        assert_eq!(corner, vec![pos!(i32::MAX - 1, i32::MIN), pos!(i32::MAX - 1, i32::MIN + 1), pos!(i32::MAX, i32::MIN + 1)]);
        assert_eq!(pos!(i32::MIN, 0).neighbors().count(), 5);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn bounds_spanning_the_whole_range() {
        let bounds = Bounds::covering([pos!(i32::MIN, 0), pos!(i32::MAX, 0)]).unwrap();
        assert_eq!(bounds.width(), 1 << 32);
        assert_eq!(bounds.height(), 1);
    }

    #[test]
    fn bounds_of_nothing() {
        assert_eq!(Bounds::covering(Vec::new()), None);
    }
}
