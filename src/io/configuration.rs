//! Solver constants and runtime configuration defaults

// Input grammar
/// Character marking a filled polyomino cell
pub const FILLED_CELL: char = '#';
/// Character marking an empty polyomino cell
pub const EMPTY_CELL: char = '.';

// Search limits
/// Default wall-clock budget per region, in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 5.0;

/// Default bound on the number of simultaneously placed pieces
pub const DEFAULT_MAX_DEPTH: usize = 1000;

// Reading the clock on every candidate dominates small searches
/// Number of candidate placements examined between deadline checks
pub const DEADLINE_CHECK_INTERVAL: u64 = 1024;

// Progress bar display settings
/// Width of the region progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

/// Default worker count (0 lets rayon pick one worker per core)
pub const DEFAULT_JOBS: usize = 0;
