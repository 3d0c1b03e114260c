//! Backtracking bitboard solver for constrained polyomino packing
//!
//! Shapes are read as small `#`/`.` grids and expanded into their distinct
//! rotations and reflections. Each region asks whether a given number of
//! pieces of every shape fits on a rectangular board without overlap; the
//! solver answers by depth-first search over bitboard placements, bounded by
//! a per-region deadline.

#![forbid(unsafe_code)]

/// Bitboard packing search and batch region evaluation
pub mod algorithm;
/// Input parsing, command-line handling, progress and errors
pub mod io;
/// Shapes, orientations and regions
pub mod spatial;

pub use io::error::{PackingError, Result};
