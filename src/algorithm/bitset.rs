use bitvec::prelude::*;
use std::fmt;

use crate::io::configuration::{EMPTY_CELL, FILLED_CELL};

/// Occupancy bitboard for a rectangular region
///
/// Cell `(x, y)` maps to bit `x + y * width`. Backed by a heap bit vector,
/// so boards of any area are supported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardBitset {
    bits: BitVec,
    width: usize,
    height: usize,
}

impl BoardBitset {
    /// Create a board with every cell free
    ///
    /// Returns `None` when `width * height` overflows or exceeds the
    /// largest bit vector that can be allocated.
    pub fn new(width: usize, height: usize) -> Option<Self> {
        let area = width
            .checked_mul(height)
            .filter(|&area| area <= BitSlice::<usize, Lsb0>::MAX_BITS)?;
        Some(Self {
            bits: bitvec![0; area],
            width,
            height,
        })
    }

    /// Board width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Board height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Bit index of `(x, y)`, or `None` outside the board
    pub const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(x + y * self.width)
        } else {
            None
        }
    }

    /// Test whether `(x, y)` is occupied
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .and_then(|index| self.bits.get(index).as_deref().copied())
            .unwrap_or(false)
    }

    /// Test whether any of the given bit indices is already occupied
    pub fn overlaps(&self, cells: impl IntoIterator<Item = usize>) -> bool {
        cells
            .into_iter()
            .any(|index| self.bits.get(index).as_deref() == Some(&true))
    }

    /// Mark the given bit indices occupied
    pub fn occupy(&mut self, cells: &[usize]) {
        for &index in cells {
            if index < self.bits.len() {
                self.bits.set(index, true);
            }
        }
    }

    /// Mark the given bit indices free again
    pub fn release(&mut self, cells: &[usize]) {
        for &index in cells {
            if index < self.bits.len() {
                self.bits.set(index, false);
            }
        }
    }

    /// Test if no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count occupied cells
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }
}

impl fmt::Display for BoardBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let row: String = (0..self.width)
                .map(|x| {
                    if self.contains(x, y) {
                        FILLED_CELL
                    } else {
                        EMPTY_CELL
                    }
                })
                .collect();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
