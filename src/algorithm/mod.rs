/// Bitboard occupancy tracking for regions
pub mod bitset;
/// Batch region evaluation with per-region deadlines
pub mod evaluator;
/// Pre-search rejection of impossible regions
pub mod feasibility;
/// Backtracking placement search
pub mod packer;
