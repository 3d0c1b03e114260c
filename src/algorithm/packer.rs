//! Backtracking bitboard search for a region's placement objective
//!
//! The search repeatedly picks the lowest shape index whose placed count is
//! still short of its objective, then tries that shape's candidate
//! placements in a fixed order: orientation, then row offset, then column
//! offset. Placements overlapping the board are skipped. A region counts as
//! solved once every placed count equals its objective; uncovered cells are
//! allowed.
//!
//! The search runs on an explicit frame stack rather than recursion. Each
//! frame generates its shape's placements lazily from a cursor, so nothing
//! proportional to the board size is built up front. The board and the
//! placed counts are owned by the search and restored on every backtrack,
//! and the optional deadline is polled every [`DEADLINE_CHECK_INTERVAL`]
//! candidates examined.

use std::time::{Duration, Instant};

use crate::algorithm::bitset::BoardBitset;
use crate::algorithm::feasibility::{Infeasibility, check_region};
use crate::io::configuration::{DEADLINE_CHECK_INTERVAL, DEFAULT_MAX_DEPTH};
use crate::spatial::{Orientation, Region, ShapeCatalog};

/// Bounds applied to a single search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of pieces on the board at once
    pub max_depth: usize,
    /// Instant after which the search gives up
    pub deadline: Option<Instant>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl SearchLimits {
    /// Limits with the given depth bound and no deadline
    pub const fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            deadline: None,
        }
    }

    /// Give up once `deadline` has passed
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Give up once `budget` has elapsed from now
    #[must_use]
    pub fn with_budget(self, budget: Duration) -> Self {
        match Instant::now().checked_add(budget) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Test if the deadline has passed
    pub fn expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// An orientation of a shape translated onto the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Index of the placed shape
    pub shape: usize,
    /// Index into the shape's orientation list
    pub orientation: usize,
    /// Column offset of the orientation's origin
    pub dx: usize,
    /// Row offset of the orientation's origin
    pub dy: usize,
    cells: Box<[usize]>,
}

impl Placement {
    /// Occupied bit indices, `x + y * width` for each cell
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }
}

/// An in-bounds offset for one orientation, not yet turned into a placement
#[derive(Debug, Clone, Copy)]
struct Slot<'a> {
    orientation_index: usize,
    orientation: &'a Orientation,
    dx: usize,
    dy: usize,
    width: usize,
}

impl<'a> Slot<'a> {
    fn cells(self) -> impl Iterator<Item = usize> + 'a {
        let Self {
            orientation,
            dx,
            dy,
            width,
            ..
        } = self;
        orientation
            .cells()
            .iter()
            .map(move |&(x, y)| (x + dx) + (y + dy) * width)
    }

    fn into_placement(self, shape: usize) -> Placement {
        Placement {
            shape,
            orientation: self.orientation_index,
            dx: self.dx,
            dy: self.dy,
            cells: self.cells().collect(),
        }
    }
}

/// Lazily generated in-bounds placements of one shape on a board
///
/// Ordered by orientation, then `dy` ascending, then `dx` ascending. Only
/// the cursor is stored, so a search level costs the same on any board size.
#[derive(Debug, Clone)]
pub struct Placements<'a> {
    shape: usize,
    orientations: &'a [Orientation],
    width: usize,
    height: usize,
    orientation: usize,
    dx: usize,
    dy: usize,
}

impl<'a> Placements<'a> {
    /// Placements of `shape` using the given orientations on a `width` x `height` board
    pub const fn new(
        shape: usize,
        orientations: &'a [Orientation],
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            shape,
            orientations,
            width,
            height,
            orientation: 0,
            dx: 0,
            dy: 0,
        }
    }

    /// Index of the shape being placed
    pub const fn shape(&self) -> usize {
        self.shape
    }

    fn next_slot(&mut self) -> Option<Slot<'a>> {
        loop {
            let orientation = self.orientations.get(self.orientation)?;
            let row_fits = self.dy + orientation.height() <= self.height;

            if !orientation.is_empty() && row_fits && self.dx + orientation.width() <= self.width
            {
                let slot = Slot {
                    orientation_index: self.orientation,
                    orientation,
                    dx: self.dx,
                    dy: self.dy,
                    width: self.width,
                };
                self.dx += 1;
                return Some(slot);
            }

            if !orientation.is_empty() && row_fits && self.dx > 0 {
                self.dx = 0;
                self.dy += 1;
            } else {
                self.orientation += 1;
                self.dx = 0;
                self.dy = 0;
            }
        }
    }
}

impl Iterator for Placements<'_> {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        let shape = self.shape;
        self.next_slot().map(|slot| slot.into_placement(shape))
    }
}

/// Placements of a successful search and the board they produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Placements in the order they were made
    pub placements: Vec<Placement>,
    /// Final board state
    pub board: BoardBitset,
}

/// Result of searching one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The objective was met
    Solved(Solution),
    /// Every candidate within the depth bound was tried without success
    Exhausted,
    /// The deadline passed before the search finished
    TimedOut,
    /// The region was rejected before searching
    Infeasible(Infeasibility),
}

impl SearchOutcome {
    /// Test if the objective was met
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

/// Outcome of a search together with the work it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// How the search ended
    pub outcome: SearchOutcome,
    /// Number of placements made, backtracked ones included
    pub nodes: u64,
}

impl SearchReport {
    const fn new(outcome: SearchOutcome, nodes: u64) -> Self {
        Self { outcome, nodes }
    }
}

/// One level of the explicit search stack
#[derive(Debug, Clone)]
struct Frame<'a> {
    candidates: Placements<'a>,
    active: Option<Placement>,
}

impl<'a> Frame<'a> {
    const fn new(candidates: Placements<'a>) -> Self {
        Self {
            candidates,
            active: None,
        }
    }
}

/// First shape index whose placed count differs from its objective
fn next_target(placed: &[usize], objective: &[usize]) -> Option<usize> {
    placed
        .iter()
        .zip(objective)
        .position(|(current, wanted)| current != wanted)
}

/// Packing search for a single region against a shape catalog
pub struct Packer<'a> {
    region: &'a Region,
    catalog: &'a ShapeCatalog,
}

impl<'a> Packer<'a> {
    /// Prepare a search for `region` using orientations from `catalog`
    pub const fn new(region: &'a Region, catalog: &'a ShapeCatalog) -> Self {
        Self { region, catalog }
    }

    /// Candidate placements for a shape on this region's board
    pub fn placements(&self, shape: usize) -> Placements<'a> {
        Placements::new(
            shape,
            self.catalog.orientations(shape),
            self.region.width,
            self.region.height,
        )
    }

    /// Run the feasibility check, then the backtracking search
    pub fn solve(&self, limits: &SearchLimits) -> SearchReport {
        if let Err(reason) = check_region(self.region, self.catalog) {
            return SearchReport::new(SearchOutcome::Infeasible(reason), 0);
        }
        let Some(board) = BoardBitset::new(self.region.width, self.region.height) else {
            let reason = Infeasibility::BoardTooLarge {
                width: self.region.width,
                height: self.region.height,
            };
            return SearchReport::new(SearchOutcome::Infeasible(reason), 0);
        };

        self.search(board, limits)
    }

    fn search(&self, mut board: BoardBitset, limits: &SearchLimits) -> SearchReport {
        let objective = self.region.objective.as_slice();
        let mut placed = vec![0_usize; objective.len()];

        let Some(first) = next_target(&placed, objective) else {
            let solution = Solution {
                placements: Vec::new(),
                board,
            };
            return SearchReport::new(SearchOutcome::Solved(solution), 0);
        };
        if limits.max_depth == 0 {
            return SearchReport::new(SearchOutcome::Exhausted, 0);
        }

        let mut stack = vec![Frame::new(self.placements(first))];
        let mut nodes: u64 = 0;
        let mut steps: u64 = 0;

        while let Some(frame) = stack.last_mut() {
            let shape = frame.candidates.shape();

            // Undo this level's previous choice before trying the next one
            if let Some(active) = frame.active.take() {
                board.release(active.cells());
                if let Some(count) = placed.get_mut(shape) {
                    *count = count.saturating_sub(1);
                }
            }

            let mut choice = None;
            while let Some(slot) = frame.candidates.next_slot() {
                steps += 1;
                if steps % DEADLINE_CHECK_INTERVAL == 0 && limits.expired() {
                    return SearchReport::new(SearchOutcome::TimedOut, nodes);
                }
                if !board.overlaps(slot.cells()) {
                    choice = Some(slot.into_placement(shape));
                    break;
                }
            }

            let Some(placement) = choice else {
                stack.pop();
                continue;
            };

            nodes += 1;
            board.occupy(placement.cells());
            if let Some(count) = placed.get_mut(shape) {
                *count += 1;
            }
            frame.active = Some(placement);

            match next_target(&placed, objective) {
                None => {
                    let placements = stack
                        .iter_mut()
                        .filter_map(|level| level.active.take())
                        .collect();
                    let solution = Solution { placements, board };
                    return SearchReport::new(SearchOutcome::Solved(solution), nodes);
                }
                Some(next) if stack.len() < limits.max_depth => {
                    stack.push(Frame::new(self.placements(next)));
                }
                Some(_) => {}
            }
        }

        SearchReport::new(SearchOutcome::Exhausted, nodes)
    }
}

/// Decide whether `objective` pieces fit on a `width` x `height` board
///
/// Uses the default depth bound and no deadline.
pub fn solve(width: usize, height: usize, catalog: &ShapeCatalog, objective: &[usize]) -> bool {
    let region = Region::new(width, height, objective.to_vec());
    Packer::new(&region, catalog)
        .solve(&SearchLimits::default())
        .outcome
        .is_solved()
}
