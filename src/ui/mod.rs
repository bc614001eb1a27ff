//! Console output for the long-running phases.
//!
//! The `Ui` trait decouples the pipeline from its output: `ConsoleUi` prints
//! phase headers and drives an indicatif progress bar, `SilentUi` swallows
//! everything for tests and non-interactive callers.

use indicatif::{ProgressBar, ProgressStyle};

/// Pipeline phases shown as section headers
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Checking,
    Downloading,
    Extracting,
    Parsing,
    Merging,
    Exporting,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Checking => write!(f, "Checking for updates"),
            Phase::Downloading => write!(f, "Downloading SDE"),
            Phase::Extracting => write!(f, "Extracting files"),
            Phase::Parsing => write!(f, "Parsing universe"),
            Phase::Merging => write!(f, "Merging overlays"),
            Phase::Exporting => write!(f, "Exporting to SQLite"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Trait for UI implementations - allows both console and silent/test modes
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn clear_progress(&mut self);
    fn log(&mut self, message: impl Into<String>);
}

/// Console implementation: phase headers and logs on stdout, progress via
/// indicatif.
#[derive(Default)]
pub struct ConsoleUi {
    bar: Option<ProgressBar>,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self::default()
    }

    fn bar_for(&mut self, total: u64) -> &ProgressBar {
        if self.bar.as_ref().map_or(true, |b| b.length() != Some(total)) {
            self.clear_progress();
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{msg:30} [{bar:40.cyan/blue}] {pos}/{len}")
                    .unwrap()
                    .progress_chars("=>-"),
            );
            self.bar = Some(bar);
        }
        self.bar.as_ref().unwrap()
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        self.clear_progress();
        println!("\n{}...", phase);
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        let bar = self.bar_for(total);
        bar.set_message(label.into());
        bar.set_position(current);
    }

    fn clear_progress(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        match &self.bar {
            Some(bar) => bar.println(message),
            None => println!("{}", message),
        }
    }
}

/// Silent UI implementation for testing and non-interactive use
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn clear_progress(&mut self) {}
    fn log(&mut self, _message: impl Into<String>) {}
}
