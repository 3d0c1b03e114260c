//! Region progress display with per-region verdict lines

use crate::algorithm::evaluator::RegionReport;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

static REGION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Regions: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
});

/// Progress bar over a batch of regions
///
/// Safe to share between worker threads; every finished region prints its
/// verdict above the bar and advances it by one.
pub struct RegionProgress {
    bar: ProgressBar,
    solvable: AtomicUsize,
}

impl RegionProgress {
    /// Create a visible progress bar for `total` regions
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(REGION_STYLE.clone());
        Self::with_bar(bar)
    }

    /// Create a progress tracker that draws nothing
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            solvable: AtomicUsize::new(0),
        }
    }

    /// Record a finished region
    pub fn record(&self, report: &RegionReport) {
        if report.verdict.is_solvable() {
            self.solvable.fetch_add(1, Ordering::Relaxed);
        }
        self.bar.println(report.to_string());
        self.bar.set_message(format!("{} solvable", self.solvable()));
        self.bar.inc(1);
    }

    /// Regions recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Solvable regions recorded so far
    pub fn solvable(&self) -> usize {
        self.solvable.load(Ordering::Relaxed)
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        debug!(
            "progress closed after {} regions, {} solvable",
            self.position(),
            self.solvable()
        );
        self.bar.finish_and_clear();
    }
}
