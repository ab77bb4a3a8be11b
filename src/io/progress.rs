//! Terminal progress display for the stage sequence

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar advanced once per pipeline stage
///
/// A hidden bar accepts every call and draws nothing, so the driver never
/// needs to know whether progress is shown.
pub struct StageProgress {
    bar: ProgressBar,
}

impl StageProgress {
    /// Create a visible progress bar over `stage_count` stages
    pub fn new(stage_count: usize) -> Self {
        let bar = ProgressBar::new(stage_count as u64);
        bar.set_style(STAGE_STYLE.clone());
        Self { bar }
    }

    /// Create a progress tracker that never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Announce the stage that is about to run
    pub fn begin(&self, stage: &str) {
        self.bar.set_message(stage.to_string());
    }

    /// Mark the current stage as done
    pub fn complete(&self) {
        self.bar.inc(1);
    }

    /// Mark a stage as skipped; it still counts towards the total
    pub fn skip(&self, stage: &str) {
        self.bar.set_message(format!("{stage} (skipped)"));
        self.bar.inc(1);
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

