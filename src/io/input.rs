//! Puzzle text parsing
//!
//! The input holds shape blocks followed by region lines:
//!
//! ```text
//! 0:
//! ###
//! ##.
//! ##.
//!
//! 12x5: 1 0 1 0 2 2
//! ```
//!
//! Shape blocks start with `N:` and end at a blank line or at the first
//! region line. Shape indices must count up from zero, and every region
//! must give one count per shape.

use std::path::Path;
use std::str::FromStr;

use crate::io::configuration::{EMPTY_CELL, FILLED_CELL};
use crate::io::error::{PackingError, Result, WithPath, parse_error};
use crate::spatial::{Region, Shape, ShapeCatalog};

/// Parsed puzzle: the shape catalog and the regions to evaluate
#[derive(Debug, Clone, Default)]
pub struct PuzzleInput {
    /// Shapes with cached orientations
    pub catalog: ShapeCatalog,
    /// Regions in input order
    pub regions: Vec<Region>,
}

impl FromStr for PuzzleInput {
    type Err = PackingError;

    fn from_str(text: &str) -> Result<Self> {
        parse_puzzle(text)
    }
}

/// Shape block being collected
struct PendingShape<'a> {
    index: usize,
    header_line: usize,
    header: &'a str,
    rows: Vec<&'a str>,
}

fn is_grid_row(line: &str) -> bool {
    line.starts_with([FILLED_CELL, EMPTY_CELL])
}

fn finish_shape(pending: Option<PendingShape<'_>>, shapes: &mut Vec<Shape>) -> Result<()> {
    let Some(pending) = pending else {
        return Ok(());
    };
    if pending.rows.is_empty() {
        return Err(parse_error(
            pending.header_line,
            pending.header,
            &format!("shape {} has no grid rows", pending.index),
        ));
    }
    let shape = Shape::from_rows(pending.index, &pending.rows).ok_or_else(|| {
        parse_error(
            pending.header_line,
            pending.header,
            &"grid rows must have equal length",
        )
    })?;
    shapes.push(shape);
    Ok(())
}

fn parse_shape_header(index: usize, line: &str, head: &str, rest: &str) -> Result<usize> {
    if !rest.trim().is_empty() {
        return Err(parse_error(
            index,
            line,
            &"expected '<index>:' with nothing after the colon",
        ));
    }
    head.trim().parse::<usize>().map_err(|err| {
        parse_error(
            index,
            line,
            &format!("invalid shape index '{}': {err}", head.trim()),
        )
    })
}

fn parse_dimension(index: usize, line: &str, value: &str, name: &str) -> Result<usize> {
    value.trim().parse::<usize>().map_err(|err| {
        parse_error(
            index,
            line,
            &format!("invalid region {name} '{}': {err}", value.trim()),
        )
    })
}

fn parse_region(
    index: usize,
    line: &str,
    head: &str,
    rest: &str,
    shape_count: usize,
) -> Result<Region> {
    let Some((width, height)) = head.split_once('x') else {
        return Err(parse_error(index, line, &"expected '<width>x<height>:'"));
    };
    let width = parse_dimension(index, line, width, "width")?;
    let height = parse_dimension(index, line, height, "height")?;
    if width.checked_mul(height).is_none() {
        return Err(parse_error(
            index,
            line,
            &format!("region {width}x{height} has too many cells"),
        ));
    }

    let objective = rest
        .split_whitespace()
        .map(|count| {
            count.parse::<usize>().map_err(|err| {
                parse_error(index, line, &format!("invalid shape count '{count}': {err}"))
            })
        })
        .collect::<Result<Vec<usize>>>()?;

    if objective.len() != shape_count {
        return Err(parse_error(
            index,
            line,
            &format!(
                "expected {shape_count} shape counts, found {}",
                objective.len()
            ),
        ));
    }

    Ok(Region::new(width, height, objective))
}

/// Parse puzzle text into shapes and regions
///
/// # Errors
///
/// Returns [`PackingError::Parse`] naming the first line that breaks the
/// input grammar
pub fn parse_puzzle(text: &str) -> Result<PuzzleInput> {
    let mut shapes: Vec<Shape> = Vec::new();
    let mut regions: Vec<Region> = Vec::new();
    let mut pending: Option<PendingShape<'_>> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();

        if line.is_empty() {
            finish_shape(pending.take(), &mut shapes)?;
            continue;
        }

        if is_grid_row(line) {
            let Some(shape) = pending.as_mut() else {
                return Err(parse_error(index, line, &"grid row outside a shape block"));
            };
            if let Some(bad) = line.chars().find(|&ch| ch != FILLED_CELL && ch != EMPTY_CELL) {
                return Err(parse_error(
                    index,
                    line,
                    &format!("unexpected character '{bad}' in grid row"),
                ));
            }
            if let Some(first) = shape.rows.first() {
                if first.chars().count() != line.chars().count() {
                    return Err(parse_error(
                        index,
                        line,
                        &format!(
                            "grid row has {} cells, expected {}",
                            line.chars().count(),
                            first.chars().count()
                        ),
                    ));
                }
            }
            shape.rows.push(line);
            continue;
        }

        let Some((head, rest)) = line.split_once(':') else {
            return Err(parse_error(
                index,
                line,
                &"expected a shape header, grid row or region line",
            ));
        };

        if head.contains('x') {
            finish_shape(pending.take(), &mut shapes)?;
            regions.push(parse_region(index, line, head, rest, shapes.len())?);
            continue;
        }

        let shape_index = parse_shape_header(index, line, head, rest)?;
        finish_shape(pending.take(), &mut shapes)?;
        if !regions.is_empty() {
            return Err(parse_error(
                index,
                line,
                &"shape blocks must come before region lines",
            ));
        }
        if shape_index != shapes.len() {
            return Err(parse_error(
                index,
                line,
                &format!(
                    "shape index {shape_index} out of sequence, expected {}",
                    shapes.len()
                ),
            ));
        }
        pending = Some(PendingShape {
            index: shape_index,
            header_line: index,
            header: line,
            rows: Vec::new(),
        });
    }

    finish_shape(pending, &mut shapes)?;

    Ok(PuzzleInput {
        catalog: ShapeCatalog::new(shapes),
        regions,
    })
}

/// Read and parse a puzzle file
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents fail to parse
pub fn load_puzzle(path: &Path) -> Result<PuzzleInput> {
    let text = std::fs::read_to_string(path).with_path(path, "read")?;
    parse_puzzle(&text)
}
