/// Command-line interface and batch orchestration
pub mod cli;
/// Solver constants and defaults
pub mod configuration;
/// Error types and helpers
pub mod error;
/// Puzzle text parsing into shapes and regions
pub mod input;
/// Region progress display
pub mod progress;
