//! Progress reporting for the merge stages

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner that follows the pipeline from stage to stage
#[derive(Debug)]
pub struct ProgressReporter {
    pub stage_pb: Option<ProgressBar>,
    show_progress: bool,
    start_time: std::time::Instant,
}

impl ProgressReporter {
    /// Create a reporter that shows a spinner on the terminal
    pub fn new_for_merge() -> Self {
        Self {
            stage_pb: None,
            show_progress: true,
            start_time: std::time::Instant::now(),
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            stage_pb: None,
            show_progress: false,
            start_time: std::time::Instant::now(),
        }
    }

    /// Move the spinner to a new stage
    pub fn stage(&mut self, message: &str) {
        if !self.show_progress {
            return;
        }
        match &self.stage_pb {
            Some(pb) => pb.set_message(message.to_string()),
            None => self.stage_pb = Some(create_spinner(message)),
        }
    }

    /// Stop the spinner, leaving `message` and the elapsed time behind
    pub fn finish(&mut self, message: &str) {
        if let Some(pb) = self.stage_pb.take() {
            pb.finish_with_message(format!(
                "{} ({:.2?})",
                message,
                self.start_time.elapsed()
            ));
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Leave nothing behind when a stage fails
        if let Some(pb) = self.stage_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
