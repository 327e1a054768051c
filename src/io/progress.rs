//! Stage progress bars for source loading and cell matching

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display for the stages of one mosaic run
///
/// Each stage gets its own bar stacked under the previous ones. Bars are
/// plain handles, so worker threads can tick them concurrently.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    stage_bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>8}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

impl ProgressManager {
    /// Create a progress manager drawing to stderr
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Create a progress manager that tracks stages without drawing anything
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(target),
            stage_bars: Vec::new(),
        }
    }

    /// Add a bar for a new stage of `length` steps and return a handle to it
    pub fn start_stage(&mut self, label: &'static str, length: usize) -> ProgressBar {
        let bar = self.multi_progress.add(ProgressBar::new(length as u64));
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(label);
        self.stage_bars.push(bar.clone());
        bar
    }

    /// Mark a stage as complete with a closing message
    pub fn finish_stage(bar: &ProgressBar, message: String) {
        bar.finish_with_message(message);
    }

    /// Number of stages started so far
    pub const fn stage_count(&self) -> usize {
        self.stage_bars.len()
    }

    /// Finish any stages left open and clear the display
    pub fn finish(&self) {
        for bar in &self.stage_bars {
            if !bar.is_finished() {
                bar.finish();
            }
        }
        let _ = self.multi_progress.clear();
    }
}
