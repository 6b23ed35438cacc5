// Copyright (c) 2025-2026 the sigma-index contributors
// SPDX-License-Identifier: Apache-2.0

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

/// Default number of files between progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 500;

/// Whether `processed` files is a point at which progress gets logged.
///
/// An interval of zero disables progress lines.
pub const fn is_checkpoint(processed: usize, interval: usize) -> bool {
    interval > 0 && processed > 0 && processed % interval == 0
}

/// Progress through the rule files of a corpus.
///
/// Draws a bar on interactive terminals and logs a line every `interval`
/// files either way, so piped and CI output still shows progress.
pub struct ScanProgress {
    bar: ProgressBar,
    total: usize,
    interval: usize,
}

impl ScanProgress {
    #[must_use]
    pub fn new(total: usize, interval: usize, quiet: bool) -> Self {
        let bar = if quiet || !Term::stderr().is_term() {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
            bar.set_style(Self::style());
            bar
        };

        Self {
            bar,
            total,
            interval,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} Normalizing rules... {msg}")
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to parse progress bar template: {e}");
                ProgressStyle::default_bar()
            })
            .progress_chars("#>-")
    }

    /// Record that `processed` files (1-based) are done, the last being `name`.
    pub fn advance(&self, processed: usize, name: &str) {
        self.bar.set_position(u64::try_from(processed).unwrap_or(u64::MAX));
        self.bar.set_message(name.to_string());

        if is_checkpoint(processed, self.interval) {
            self.bar
                .suspend(|| tracing::info!("Processed {}/{} files...", processed, self.total));
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl std::fmt::Debug for ScanProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanProgress")
            .field("total", &self.total)
            .field("interval", &self.interval)
            .field("hidden", &self.bar.is_hidden())
            .finish()
    }
}
