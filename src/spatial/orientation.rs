//! Canonical coordinate forms for polyomino orientations
//!
//! Every orientation is translated so that its minimum x and y are zero and
//! its cells are sorted. That canonical form doubles as the deduplication
//! key when enumerating the eight symmetries of a shape.

use std::collections::HashSet;

use crate::spatial::shapes::Shape;

/// One rotation/reflection variant of a shape in canonical coordinates
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Orientation {
    cells: Vec<(usize, usize)>,
    width: usize,
    height: usize,
}

impl Orientation {
    /// Build a canonical orientation from arbitrary `(x, y)` cells
    pub fn from_cells(cells: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let cells = normalize(cells);
        let width = cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
        let height = cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
        Self {
            cells,
            width,
            height,
        }
    }

    /// Sorted cells with minimum x and y at zero
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    /// Extent along x (one past the largest x)
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Extent along y (one past the largest y)
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Test if the orientation covers no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Translate cells so the minimum x and y are zero, then sort them
///
/// Applying this to an already normalized set returns it unchanged.
pub fn normalize(cells: impl IntoIterator<Item = (usize, usize)>) -> Vec<(usize, usize)> {
    let cells: Vec<(usize, usize)> = cells.into_iter().collect();
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);

    let mut normalized: Vec<(usize, usize)> = cells
        .into_iter()
        .map(|(x, y)| (x - min_x, y - min_y))
        .collect();
    normalized.sort_unstable();
    normalized.dedup();
    normalized
}

/// Enumerate the distinct orientations of a shape
///
/// Discovery order is: for each of the four clockwise rotations, the rotated
/// grid followed by its mirror image. Symmetric variants are dropped, so the
/// result holds between one and eight entries for any shape with a filled
/// cell and none for an empty shape.
pub fn enumerate_orientations(shape: &Shape) -> Vec<Orientation> {
    if shape.size() == 0 {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut orientations = Vec::new();
    let mut current = shape.clone();

    for _ in 0..4 {
        for variant in [current.clone(), current.mirrored()] {
            let orientation = Orientation::from_cells(variant.coordinates());
            if seen.insert(orientation.cells.clone()) {
                orientations.push(orientation);
            }
        }
        current = current.rotated();
    }

    orientations
}
