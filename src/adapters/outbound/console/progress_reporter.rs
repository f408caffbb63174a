use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream};
use std::cell::RefCell;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Writes status lines tagged `[INFO]`, `[WARNING]`/`[ERROR]` and
/// `[SUCCESS]` to stderr, colored only when stderr is a terminal. Step
/// progress uses an indicatif bar that is cleared before any other line.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut pb_option = self.progress_bar.borrow_mut();
        if let Some(pb) = pb_option.as_ref() {
            pb.set_length(total as u64);
            return pb.clone();
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} - {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        *pb_option = Some(pb.clone());
        pb
    }

    fn clear_progress_bar(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }

    fn is_warning(message: &str) -> bool {
        message.starts_with("Warning") || message.starts_with("⚠")
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.clear_progress_bar();
        eprintln!(
            "{} {}",
            "[INFO]".if_supports_color(Stream::Stderr, |t| t.cyan()),
            message
        );
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        self.clear_progress_bar();
        if Self::is_warning(message) {
            eprintln!(
                "{} {}",
                "[WARNING]".if_supports_color(Stream::Stderr, |t| t.yellow()),
                message
            );
        } else {
            eprintln!(
                "{} {}",
                "[ERROR]".if_supports_color(Stream::Stderr, |t| t.red()),
                message
            );
        }
    }

    fn report_completion(&self, message: &str) {
        self.clear_progress_bar();
        eprintln!();
        eprintln!(
            "{} {}",
            "[SUCCESS]".if_supports_color(Stream::Stderr, |t| t.green()),
            message
        );
    }
}
