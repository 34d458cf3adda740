//! Progress display for per-shape discretization work

use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_MIN_SHAPES};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static SHAPE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} shapes"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar advancing once per processed shape
pub struct ShapeProgress {
    bar: ProgressBar,
}

impl ShapeProgress {
    /// Create a bar for a batch of shapes labelled with a file name
    pub fn new(shape_count: usize, label: &str) -> Self {
        let bar = ProgressBar::new(shape_count as u64);
        bar.set_style(SHAPE_STYLE.clone());
        bar.set_message(label.to_string());
        Self { bar }
    }

    /// Create a bar only when it is worth showing
    ///
    /// Quiet runs and batches smaller than the display threshold get none.
    pub fn for_batch(shape_count: usize, label: &str, quiet: bool) -> Option<Self> {
        (!quiet && shape_count >= PROGRESS_MIN_SHAPES).then(|| Self::new(shape_count, label))
    }

    /// Record one processed shape
    pub fn advance(&self) {
        self.bar.inc(1);
    }

    /// Number of shapes recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar with the number of distinct cells found
    pub fn finish(&self, cell_count: usize) {
        self.bar
            .finish_with_message(format!("✓ {cell_count} slots"));
    }
}
