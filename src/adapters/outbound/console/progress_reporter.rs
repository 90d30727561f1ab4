use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;
use std::time::Duration;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with stdout output.
/// The number of packages is not known up front, so an indicatif spinner
/// with a running count is shown instead of a bar.
pub struct StderrProgressReporter {
    spinner: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
        }
    }

    fn get_or_create_spinner(&self) -> ProgressBar {
        let mut slot = self.spinner.borrow_mut();
        if let Some(spinner) = slot.as_ref() {
            return spinner.clone();
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("   {spinner:.green} {pos} packages resolved - {msg}")
        {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        *slot = Some(spinner.clone());
        spinner
    }

    fn finish_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_tick(&self, resolved: usize, current: &str) {
        let spinner = self.get_or_create_spinner();
        spinner.set_position(resolved as u64);
        spinner.set_message(current.to_string());
    }

    fn report_error(&self, message: &str) {
        self.finish_spinner();
        eprintln!("{}", message.yellow());
    }

    fn report_completion(&self, message: &str) {
        self.finish_spinner();
        eprintln!("{}", message.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_creation() {
        let reporter = StderrProgressReporter::new();
        // Can't easily test stderr output, but verify it doesn't panic
        reporter.report("Test message");
        reporter.report_tick(1, "Contoso.Core");
        reporter.report_tick(2, "Contoso.Web");
        reporter.report_error("Test warning");
        reporter.report_completion("Test completion");
    }

    #[test]
    fn test_spinner_is_recreated_after_completion() {
        let reporter = StderrProgressReporter::default();
        reporter.report_tick(1, "A");
        reporter.report_completion("done");
        assert!(reporter.spinner.borrow().is_none());

        reporter.report_tick(1, "B");
        assert!(reporter.spinner.borrow().is_some());
        reporter.report_completion("done");
    }
}
