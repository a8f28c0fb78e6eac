//! A runtime-sized bitboard over a single unsigned integer.
//!
//! The type is `no_std` friendly and avoids heap allocations. An `N×N` grid
//! is packed row-major into an unsigned integer `T`; `N` is chosen when the
//! board is created so one integer type serves every supported board size.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::core::grid::Coordinate;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitBoardError {
    /// Requested board size N*N exceeds capacity of `T::BITS`.
    #[error("SizeTooLarge: {n}x{n} board exceeds T::BITS={capacity}")]
    SizeTooLarge { n: usize, capacity: usize },
    /// Row or column index is out of bounds [0..N).
    #[error("IndexOutOfBounds: row={row}, col={col}")]
    IndexOutOfBounds { row: usize, col: usize },
}

/// An N×N bitboard stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
    size: usize,
}

/// Cell mask wide enough for every supported board size.
pub type CellMask = BitBoard<u128>;

impl<T> BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn capacity() -> usize {
        mem::size_of::<T>() * 8
    }

    #[inline]
    fn mask(size: usize) -> T {
        let cells = size * size;
        if cells == Self::capacity() {
            !T::zero()
        } else {
            (T::one() << cells) - T::one()
        }
    }

    /// Fallible constructor: returns `Err(SizeTooLarge)` if size*size > T::BITS.
    pub fn new(size: usize) -> Result<Self, BitBoardError> {
        let capacity = Self::capacity();
        if size * size > capacity {
            Err(BitBoardError::SizeTooLarge { n: size, capacity })
        } else {
            Ok(BitBoard {
                bits: T::zero(),
                size,
            })
        }
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of set bits (occupied cells).
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Gets the bit at `at`. Out-of-range cells read as unset.
    pub fn get(&self, at: Coordinate) -> bool {
        match self.index(at) {
            Ok(idx) => ((self.bits >> idx) & T::one()) != T::zero(),
            Err(_) => false,
        }
    }

    /// Sets the bit at `at`.
    pub fn set(&mut self, at: Coordinate) -> Result<(), BitBoardError> {
        let idx = self.index(at)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    /// Clears the bit at `at`.
    pub fn clear(&mut self, at: Coordinate) -> Result<(), BitBoardError> {
        let idx = self.index(at)?;
        self.bits = self.bits & !(T::one() << idx);
        Ok(())
    }

    /// Sets all board bits to `1`.
    #[inline]
    pub fn fill(&mut self) {
        self.bits = Self::mask(self.size);
    }

    #[inline]
    fn index(&self, at: Coordinate) -> Result<usize, BitBoardError> {
        if at.row >= self.size || at.col >= self.size {
            Err(BitBoardError::IndexOutOfBounds {
                row: at.row,
                col: at.col,
            })
        } else {
            Ok(at.row * self.size + at.col)
        }
    }

    /// Creates a bitboard from an iterator of cells.
    pub fn from_cells<I>(size: usize, cells: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut board = Self::new(size)?;
        for at in cells {
            board.set(at)?;
        }
        Ok(board)
    }

    /// Iterator over the set cells of the board in row-major order.
    #[inline]
    pub fn iter(&self) -> SetCells<'_, T> {
        SetCells {
            board: self,
            idx: 0,
        }
    }
}

impl<T> fmt::Debug for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}x{}>:", self.size, self.size)?;
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.get(Coordinate::new(r, c)) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the set cells of a bitboard.
#[derive(Clone, Copy)]
pub struct SetCells<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T>,
    idx: usize,
}

impl<T> Iterator for SetCells<'_, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coordinate;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let n = self.board.size;
        while self.idx < n * n {
            let idx = self.idx;
            self.idx += 1;
            if ((self.board.bits >> idx) & T::one()) != T::zero() {
                return Some(Coordinate::new(idx / n, idx % n));
            }
        }
        None
    }
}

/// Bitwise AND for combining two bitboards of the same size.
impl<T> BitAnd for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        debug_assert_eq!(self.size, rhs.size);
        BitBoard {
            bits: self.bits & rhs.bits,
            size: self.size,
        }
    }
}

/// Bitwise OR for combining two bitboards of the same size.
impl<T> BitOr for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        debug_assert_eq!(self.size, rhs.size);
        BitBoard {
            bits: self.bits | rhs.bits,
            size: self.size,
        }
    }
}

/// Bitwise NOT within board bounds.
impl<T> Not for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        BitBoard {
            bits: !self.bits & Self::mask(self.size),
            size: self.size,
        }
    }
}

impl<T> BitAndAssign for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits = self.bits & rhs.bits;
    }
}

impl<T> BitOrAssign for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}
