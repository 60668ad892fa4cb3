//! Console spinner tracking the current pipeline stage

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(120);

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} [{elapsed_precise}] {prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
});

/// Shows which stage of the pipeline is running
///
/// A hidden instance does the same bookkeeping without drawing, so callers
/// never branch on quiet mode.
pub struct StageProgress {
    bar: ProgressBar,
    completed: usize,
}

impl Default for StageProgress {
    fn default() -> Self {
        Self::hidden()
    }
}

impl StageProgress {
    /// Create a spinner drawing to the terminal
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(STAGE_STYLE.clone());
        bar.enable_steady_tick(TICK_INTERVAL);
        Self { bar, completed: 0 }
    }

    /// Create a spinner that never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            completed: 0,
        }
    }

    /// Select the visible or hidden variant
    pub fn for_terminal(quiet: bool) -> Self {
        if quiet { Self::hidden() } else { Self::new() }
    }

    /// Announce the start of a stage
    pub fn start_stage(&mut self, stage: &str) {
        self.bar.set_prefix(format!("[{}]", self.completed + 1));
        self.bar.set_message(stage.to_string());
    }

    /// Mark the current stage as done
    pub fn complete_stage(&mut self) {
        self.completed += 1;
    }

    /// Number of stages completed so far
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Clear the spinner from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
