//! Coordinates and N×N grid geometry.

use alloc::vec::Vec;
use core::fmt;

/// A cell on the grid, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `n` cells along `orientation`, or `None` past `usize::MAX`.
    pub fn offset(self, orientation: Orientation, n: usize) -> Option<Self> {
        match orientation {
            Orientation::Horizontal => self.col.checked_add(n).map(|col| Self::new(self.row, col)),
            Orientation::Vertical => self.row.checked_add(n).map(|row| Self::new(row, self.col)),
        }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Column letter followed by the 1-based row, e.g. `B4`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.col < 26 && self.row < usize::MAX {
            write!(f, "{}{}", (b'A' + self.col as u8) as char, self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Orientation of a ship on the board, also used as a line axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Position of `c` along this axis.
    #[inline]
    pub fn along(self, c: Coordinate) -> usize {
        match self {
            Orientation::Horizontal => c.col,
            Orientation::Vertical => c.row,
        }
    }
}

/// Bounds and adjacency math for an N×N board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub const fn new(size: usize) -> Self {
        Self { size }
    }

    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub const fn in_bounds(&self, c: Coordinate) -> bool {
        c.row < self.size && c.col < self.size
    }

    /// Up, down, left and right neighbours that lie on the board.
    pub fn neighbors4(&self, c: Coordinate) -> Vec<Coordinate> {
        let mut out = Vec::with_capacity(4);
        if c.row > 0 {
            out.push(Coordinate::new(c.row - 1, c.col));
        }
        if c.row.saturating_add(1) < self.size {
            out.push(Coordinate::new(c.row + 1, c.col));
        }
        if c.col > 0 {
            out.push(Coordinate::new(c.row, c.col - 1));
        }
        if c.col.saturating_add(1) < self.size {
            out.push(Coordinate::new(c.row, c.col + 1));
        }
        out
    }

    /// The in-bounds cells just beyond both ends of a line of cells lying on
    /// `axis`. Callers pass collinear cells; the result is empty for an
    /// empty line.
    pub fn line_extension(&self, coords: &[Coordinate], axis: Orientation) -> Vec<Coordinate> {
        let mut out = Vec::with_capacity(2);
        let Some(first) = coords.iter().min_by_key(|c| axis.along(**c)).copied() else {
            return out;
        };
        let Some(last) = coords.iter().max_by_key(|c| axis.along(**c)).copied() else {
            return out;
        };
        let before = match axis {
            Orientation::Horizontal if first.col > 0 => Some(Coordinate::new(first.row, first.col - 1)),
            Orientation::Vertical if first.row > 0 => Some(Coordinate::new(first.row - 1, first.col)),
            _ => None,
        };
        if let Some(c) = before {
            out.push(c);
        }
        if let Some(after) = last.offset(axis, 1).filter(|c| self.in_bounds(*c)) {
            out.push(after);
        }
        out
    }

    /// Cells covered by a straight segment, or `None` if any would leave the board.
    pub fn segment(&self, origin: Coordinate, orientation: Orientation, len: usize) -> Option<Vec<Coordinate>> {
        if !self.in_bounds(origin) {
            return None;
        }
        (0..len)
            .map(|i| origin.offset(orientation, i).filter(|c| self.in_bounds(*c)))
            .collect()
    }

    /// A `height`×`width` block anchored at `origin`, clipped at the board edge.
    pub fn block(&self, origin: Coordinate, height: usize, width: usize) -> Vec<Coordinate> {
        let mut out = Vec::with_capacity(height * width);
        for r in origin.row..origin.row.saturating_add(height) {
            for c in origin.col..origin.col.saturating_add(width) {
                let cell = Coordinate::new(r, c);
                if self.in_bounds(cell) {
                    out.push(cell);
                }
            }
        }
        out
    }

    /// Every cell of a column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Coordinate> {
        let rows = if col < self.size { self.size } else { 0 };
        (0..rows).map(move |row| Coordinate::new(row, col))
    }

    /// Every cell on the board in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let n = self.size;
        (0..n * n).map(move |i| Coordinate::new(i / n, i % n))
    }
}
