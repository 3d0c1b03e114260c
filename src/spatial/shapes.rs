//! Polyomino shapes and their grid transformations
//!
//! A shape is stored as a boolean occupancy grid indexed by `(row, col)`.
//! Rotations and reflections produce new grids; the coordinate view used by
//! the packer lives in [`crate::spatial::orientation`].

use ndarray::{Array2, Axis};
use std::fmt;

use crate::io::configuration::{EMPTY_CELL, FILLED_CELL};
use crate::spatial::orientation::{Orientation, enumerate_orientations};

/// An immutable polyomino identified by its position in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    index: usize,
    grid: Array2<bool>,
}

impl Shape {
    /// Create a shape from an occupancy grid indexed by `(row, col)`
    pub const fn new(index: usize, grid: Array2<bool>) -> Self {
        Self { index, grid }
    }

    /// Build a shape from `#`/`.` rows
    ///
    /// Returns `None` when the rows are ragged or contain other characters.
    pub fn from_rows<S: AsRef<str>>(index: usize, rows: &[S]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());

        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            if row.chars().count() != width {
                return None;
            }
            for ch in row.chars() {
                match ch {
                    FILLED_CELL => cells.push(true),
                    EMPTY_CELL => cells.push(false),
                    _ => return None,
                }
            }
        }

        Array2::from_shape_vec((height, width), cells)
            .ok()
            .map(|grid| Self::new(index, grid))
    }

    /// Position of the shape in the input
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Occupancy grid indexed by `(row, col)`
    pub const fn grid(&self) -> &Array2<bool> {
        &self.grid
    }

    /// Number of filled cells
    pub fn size(&self) -> usize {
        self.grid.iter().filter(|&&filled| filled).count()
    }

    /// Filled cells as `(x, y)` pairs, x being the column and y the row
    pub fn coordinates(&self) -> Vec<(usize, usize)> {
        self.grid
            .indexed_iter()
            .filter(|&(_, &filled)| filled)
            .map(|((row, col), _)| (col, row))
            .collect()
    }

    /// Rotate a quarter turn clockwise
    #[must_use]
    pub fn rotated(&self) -> Self {
        // Transposing then reversing each row turns the grid clockwise
        let mut grid = self.grid.t().to_owned();
        grid.invert_axis(Axis(1));
        Self::new(self.index, grid)
    }

    /// Mirror each row left to right
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let mut grid = self.grid.clone();
        grid.invert_axis(Axis(1));
        Self::new(self.index, grid)
    }

    /// All distinct orientations of this shape
    pub fn orientations(&self) -> Vec<Orientation> {
        enumerate_orientations(self)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.index)?;
        for row in self.grid.rows() {
            let line: String = row
                .iter()
                .map(|&filled| if filled { FILLED_CELL } else { EMPTY_CELL })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Shapes of a puzzle together with their cached orientation sets
///
/// Orientations are derived once here and shared by every region solve.
#[derive(Debug, Clone, Default)]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
    orientations: Vec<Vec<Orientation>>,
    sizes: Vec<usize>,
}

impl ShapeCatalog {
    /// Derive orientations and sizes for every shape
    pub fn new(shapes: Vec<Shape>) -> Self {
        let orientations = shapes.iter().map(Shape::orientations).collect();
        let sizes = shapes.iter().map(Shape::size).collect();
        Self {
            shapes,
            orientations,
            sizes,
        }
    }

    /// Number of shapes in the catalog
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Test if the catalog holds no shapes
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in index order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Look up a shape by index
    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Cached orientations of a shape, empty for unknown indices
    pub fn orientations(&self, index: usize) -> &[Orientation] {
        self.orientations.get(index).map_or(&[][..], Vec::as_slice)
    }

    /// Filled cell count of a shape, if known
    pub fn size(&self, index: usize) -> Option<usize> {
        self.sizes.get(index).copied()
    }
}
