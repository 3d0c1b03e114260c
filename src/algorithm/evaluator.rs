//! Region evaluation across a puzzle with per-region time budgets
//!
//! Each region gets its own packer, board and deadline, so a slow or
//! abandoned search never leaks state into another region. Regions run on a
//! rayon pool and reports come back in input order.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info};
use rayon::prelude::*;

use crate::algorithm::feasibility::Infeasibility;
use crate::algorithm::packer::{Packer, SearchLimits, SearchOutcome};
use crate::io::configuration::{DEFAULT_JOBS, DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT_SECS};
use crate::io::error::{PackingError, Result};
use crate::spatial::{Region, ShapeCatalog};

/// Evaluation parameters shared by every region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatorConfig {
    /// Wall-clock budget per region; `None` searches to completion
    pub timeout: Option<Duration>,
    /// Maximum number of pieces on the board at once
    pub max_depth: usize,
    /// Worker threads, 0 for one per core
    pub jobs: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS)),
            max_depth: DEFAULT_MAX_DEPTH,
            jobs: DEFAULT_JOBS,
        }
    }
}

/// Classification of a single region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// A placement meeting the objective was found
    Solvable,
    /// The search finished without meeting the objective
    NotSolvable,
    /// The budget ran out; counted as not solvable
    TimedOut,
    /// Rejected by the feasibility check; counted as not solvable
    Infeasible(Infeasibility),
}

impl Verdict {
    /// Test if the region counts towards the solvable total
    pub const fn is_solvable(&self) -> bool {
        matches!(self, Self::Solvable)
    }
}

impl From<&SearchOutcome> for Verdict {
    fn from(outcome: &SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Solved(_) => Self::Solvable,
            SearchOutcome::Exhausted => Self::NotSolvable,
            SearchOutcome::TimedOut => Self::TimedOut,
            SearchOutcome::Infeasible(reason) => Self::Infeasible(*reason),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solvable => write!(f, "SOLVABLE"),
            Self::NotSolvable => write!(f, "NOT solvable"),
            Self::TimedOut => write!(f, "NOT solvable (timed out)"),
            Self::Infeasible(reason) => write!(f, "NOT solvable ({reason})"),
        }
    }
}

/// Verdict and timing for one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionReport {
    /// 0-based position of the region in the input
    pub index: usize,
    /// Board width
    pub width: usize,
    /// Board height
    pub height: usize,
    /// Classification of the region
    pub verdict: Verdict,
    /// Wall-clock time spent on the region
    pub elapsed: Duration,
    /// Placements tried by the search
    pub nodes: u64,
}

impl fmt::Display for RegionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region {}: {} ({}x{}, {:.2}s)",
            self.index + 1,
            self.verdict,
            self.width,
            self.height,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Reports for a whole puzzle
#[derive(Debug, Clone, Default)]
pub struct EvaluationSummary {
    /// Per-region reports in input order
    pub reports: Vec<RegionReport>,
    /// Wall-clock time for the whole batch
    pub elapsed: Duration,
}

impl EvaluationSummary {
    /// Number of regions classified as solvable
    pub fn solvable_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.verdict.is_solvable())
            .count()
    }

    /// Number of regions evaluated
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Number of regions abandoned at the deadline
    pub fn timed_out_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.verdict == Verdict::TimedOut)
            .count()
    }

    /// Mean batch time per region, zero for an empty batch
    pub fn average_time(&self) -> Duration {
        u32::try_from(self.total())
            .ok()
            .filter(|&total| total > 0)
            .map_or(Duration::ZERO, |total| self.elapsed / total)
    }
}

/// Drives the packer over every region of a puzzle
pub struct RegionEvaluator<'a> {
    catalog: &'a ShapeCatalog,
    config: EvaluatorConfig,
}

impl<'a> RegionEvaluator<'a> {
    /// Create an evaluator for regions built from `catalog`'s shapes
    pub const fn new(catalog: &'a ShapeCatalog, config: EvaluatorConfig) -> Self {
        Self { catalog, config }
    }

    /// Evaluation parameters in use
    pub const fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Search one region within the configured budget
    pub fn evaluate_region(&self, index: usize, region: &Region) -> RegionReport {
        let start = Instant::now();
        let mut limits = SearchLimits::new(self.config.max_depth);
        if let Some(timeout) = self.config.timeout {
            limits = limits.with_budget(timeout);
        }

        let report = Packer::new(region, self.catalog).solve(&limits);
        let verdict = Verdict::from(&report.outcome);
        let elapsed = start.elapsed();

        debug!(
            "region {} ({region}, {} pieces): {verdict} after {} placements in {elapsed:?}",
            index + 1,
            region.piece_count(),
            report.nodes
        );
        if let SearchOutcome::Solved(solution) = &report.outcome {
            debug!(
                "region {} covers {} of its cells",
                index + 1,
                solution.board.count()
            );
        }

        RegionReport {
            index,
            width: region.width,
            height: region.height,
            verdict,
            elapsed,
            nodes: report.nodes,
        }
    }

    /// Evaluate every region, calling `on_report` as each one finishes
    ///
    /// `on_report` may be called from several worker threads and in any
    /// order; the returned reports are in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be created
    pub fn evaluate<F>(&self, regions: &[Region], on_report: F) -> Result<EvaluationSummary>
    where
        F: Fn(&RegionReport) + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
            .map_err(|source| PackingError::ThreadPool {
                jobs: self.config.jobs,
                source,
            })?;

        let start = Instant::now();
        let reports: Vec<RegionReport> = pool.install(|| {
            regions
                .par_iter()
                .enumerate()
                .map(|(index, region)| {
                    let report = self.evaluate_region(index, region);
                    on_report(&report);
                    report
                })
                .collect()
        });

        let summary = EvaluationSummary {
            reports,
            elapsed: start.elapsed(),
        };

        info!(
            "{}/{} regions solvable ({} timed out) in {:?}",
            summary.solvable_count(),
            summary.total(),
            summary.timed_out_count(),
            summary.elapsed
        );

        Ok(summary)
    }

    /// Count solvable regions without progress reporting
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be created
    pub fn count_solvable(&self, regions: &[Region]) -> Result<usize> {
        Ok(self.evaluate(regions, |_| {})?.solvable_count())
    }
}
