//! Shapes, orientations and regions
//!
//! This module contains the puzzle data model:
//! - Polyomino shapes and their grid transformations
//! - Canonical orientation sets derived from shapes
//! - Target regions with per-shape objectives

/// Canonical orientation enumeration and normalization
pub mod orientation;
/// Rectangular regions with placement objectives
pub mod region;
/// Polyomino shapes and the shape catalog
pub mod shapes;

pub use orientation::Orientation;
pub use region::Region;
pub use shapes::{Shape, ShapeCatalog};
