//! Command-line interface for counting solvable regions in a puzzle file

use crate::algorithm::evaluator::{EvaluationSummary, EvaluatorConfig, RegionEvaluator};
use crate::io::configuration::{DEFAULT_JOBS, DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT_SECS};
use crate::io::error::{Result, invalid_parameter};
use crate::io::input::load_puzzle;
use crate::io::progress::RegionProgress;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "polypack")]
#[command(
    author,
    version,
    about = "Count the regions of a polyomino packing puzzle that can hold their pieces"
)]
/// Command-line arguments for the packing solver
pub struct Cli {
    /// Puzzle file with shape blocks and region lines
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Per-region search budget in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: f64,

    /// Search every region to completion
    #[arg(long, conflicts_with = "timeout")]
    pub no_timeout: bool,

    /// Maximum number of pieces placed at once during a search
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Worker threads (0 uses one per core)
    #[arg(short, long, default_value_t = DEFAULT_JOBS)]
    pub jobs: usize,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Per-region budget, `None` when disabled
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is negative, not finite or too large
    pub fn timeout(&self) -> Result<Option<Duration>> {
        if self.no_timeout {
            return Ok(None);
        }
        Duration::try_from_secs_f64(self.timeout)
            .map(Some)
            .map_err(|err| invalid_parameter("timeout", &self.timeout, &err))
    }

    /// Build the evaluator configuration from the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout or depth bound is invalid
    pub fn evaluator_config(&self) -> Result<EvaluatorConfig> {
        if self.max_depth == 0 {
            return Err(invalid_parameter(
                "max_depth",
                &self.max_depth,
                &"must be at least 1",
            ));
        }
        Ok(EvaluatorConfig {
            timeout: self.timeout()?,
            max_depth: self.max_depth,
            jobs: self.jobs,
        })
    }
}

/// Loads a puzzle, evaluates its regions and reports the outcome
pub struct PuzzleRunner {
    cli: Cli,
}

impl PuzzleRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Evaluate the puzzle and return the per-region reports
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid, the input cannot be
    /// read or parsed, or the worker pool cannot be started
    // Allow print for the closing report
    #[allow(clippy::print_stderr)]
    pub fn run(&self) -> Result<EvaluationSummary> {
        let config = self.cli.evaluator_config()?;
        let puzzle = load_puzzle(&self.cli.input)?;

        info!(
            "loaded {} shapes and {} regions from {}",
            puzzle.catalog.len(),
            puzzle.regions.len(),
            self.cli.input.display()
        );

        let progress = if self.cli.should_show_progress() {
            eprintln!(
                "Found {} shapes and {} regions to check",
                puzzle.catalog.len(),
                puzzle.regions.len()
            );
            RegionProgress::new(puzzle.regions.len())
        } else {
            RegionProgress::hidden()
        };

        let evaluator = RegionEvaluator::new(&puzzle.catalog, config);
        let summary = evaluator.evaluate(&puzzle.regions, |report| progress.record(report))?;
        progress.finish();

        if self.cli.should_show_progress() {
            eprintln!("Completed in {:.1} seconds", summary.elapsed.as_secs_f64());
            eprintln!(
                "Average time per region: {:.3} seconds",
                summary.average_time().as_secs_f64()
            );
            if summary.timed_out_count() > 0 {
                eprintln!(
                    "Regions abandoned at the deadline: {}",
                    summary.timed_out_count()
                );
            }
            eprintln!(
                "Total solvable regions: {}/{}",
                summary.solvable_count(),
                summary.total()
            );
        }

        Ok(summary)
    }
}
