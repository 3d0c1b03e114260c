//! Rectangular target regions and their placement objectives

use std::fmt;

use crate::spatial::shapes::ShapeCatalog;

/// A rectangle together with the number of pieces of each shape it must hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Board width in cells
    pub width: usize,
    /// Board height in cells
    pub height: usize,
    /// Required placement count per shape index
    pub objective: Vec<usize>,
}

impl Region {
    /// Create a region from its dimensions and objective
    pub const fn new(width: usize, height: usize, objective: Vec<usize>) -> Self {
        Self {
            width,
            height,
            objective,
        }
    }

    /// Number of cells on the board, `None` if it overflows a `usize`
    pub const fn area(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Total pieces the objective asks for, saturating at `usize::MAX`
    pub fn piece_count(&self) -> usize {
        self.objective.iter().fold(0, |total, &count| total.saturating_add(count))
    }

    /// Cells covered once every required piece is placed
    ///
    /// Shapes missing from the catalog contribute nothing here; the
    /// feasibility check rejects them separately. Returns `None` when the
    /// total overflows a `usize`.
    pub fn required_cells(&self, catalog: &ShapeCatalog) -> Option<usize> {
        self.objective
            .iter()
            .enumerate()
            .try_fold(0_usize, |total, (index, &count)| {
                count
                    .checked_mul(catalog.size(index).unwrap_or(0))
                    .and_then(|cells| total.checked_add(cells))
            })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}:", self.width, self.height)?;
        for count in &self.objective {
            write!(f, " {count}")?;
        }
        Ok(())
    }
}
