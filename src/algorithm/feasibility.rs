use std::fmt;

use crate::spatial::{Region, ShapeCatalog};

/// Reason a region is rejected before any placement is tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasibility {
    /// Required pieces cover more cells than the board has
    AreaExceeded {
        /// Cells covered by all required pieces
        required: usize,
        /// Cells on the board
        available: usize,
    },
    /// A required shape index is not part of the catalog
    UnknownShape {
        /// Offending shape index
        shape: usize,
    },
    /// A required shape has no filled cell and so no orientation
    NoOrientations {
        /// Offending shape index
        shape: usize,
    },
    /// The board's cell count does not fit in a `usize`
    BoardTooLarge {
        /// Board width
        width: usize,
        /// Board height
        height: usize,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaExceeded {
                required,
                available,
            } => write!(f, "needs {required} cells but only {available} exist"),
            Self::UnknownShape { shape } => write!(f, "shape {shape} is not defined"),
            Self::NoOrientations { shape } => write!(f, "shape {shape} has no filled cells"),
            Self::BoardTooLarge { width, height } => {
                write!(f, "board {width}x{height} is too large")
            }
        }
    }
}

/// Cheap necessary conditions checked before searching a region
///
/// Shape checks come first so that an unknown shape is reported as such
/// rather than hidden behind an area count that ignores it.
///
/// # Errors
///
/// Returns the first [`Infeasibility`] found; the region then cannot be
/// solved and no search is needed.
pub fn check_region(region: &Region, catalog: &ShapeCatalog) -> Result<(), Infeasibility> {
    for (shape, &count) in region.objective.iter().enumerate() {
        if count == 0 {
            continue;
        }
        if catalog.shape(shape).is_none() {
            return Err(Infeasibility::UnknownShape { shape });
        }
        if catalog.orientations(shape).is_empty() {
            return Err(Infeasibility::NoOrientations { shape });
        }
    }

    let Some(available) = region.area() else {
        return Err(Infeasibility::BoardTooLarge {
            width: region.width,
            height: region.height,
        });
    };
    match region.required_cells(catalog) {
        Some(required) if required <= available => {}
        // An overflowing total is reported as `usize::MAX`
        required => {
            return Err(Infeasibility::AreaExceeded {
                required: required.unwrap_or(usize::MAX),
                available,
            });
        }
    }

    Ok(())
}
