//! Progress bar implementation for CLI operations.
//!
//! Trimmed down from the archive tool's multi-entry progress display to
//! the single-bar case this tool needs: one spinner spanning the whole
//! encrypt/decrypt call.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for CLI operations.
pub struct CliProgress {
    bar: ProgressBar,
    quiet: bool,
}

impl CliProgress {
    /// Creates a new progress display. `message` is shown beside the spinner.
    pub fn new(message: &str, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap(),
            );
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            pb
        };
        bar.set_message(message.to_string());
        Self { bar, quiet }
    }

    /// Finishes the progress display with a success message.
    pub fn finish(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.bar.finish_with_message(message.to_string());
    }

    /// Clears the progress display without printing a final message
    /// (used on failure, so the error is the last thing printed).
    pub fn abandon(&self) {
        self.bar.finish_and_clear();
    }
}
