//! Result presenter boundary
//!
//! The core hands the presenter one value: the elapsed milliseconds
//! (None renders as the `--` placeholder). Sharing, screenshots and
//! modal chrome are the presenter's business, never the core's.

use crate::types::ReactionSession;
use std::sync::{Arc, Mutex};

/// Display surface for results and session errors
pub trait ResultPresenter {
    /// Show a finished session's reaction time; None means no score
    /// (timeout or false start) and renders as a placeholder
    fn show_result(&mut self, elapsed_ms: Option<u64>);

    /// Surface a session-fatal error message
    fn show_error(&mut self, message: &str);

    /// Clear whatever is on screen (retry pressed)
    fn clear(&mut self);
}

/// Prints results in the terminal
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    no_color: bool,
}

impl TerminalPresenter {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }
}

impl ResultPresenter for TerminalPresenter {
    fn show_result(&mut self, elapsed_ms: Option<u64>) {
        let formatted = ReactionSession::format_elapsed(elapsed_ms);
        if self.no_color {
            println!("  REACTION TIME: {}", formatted);
        } else {
            println!("\x1b[1m\x1b[32m  REACTION TIME: {}\x1b[0m", formatted);
        }
    }

    fn show_error(&mut self, message: &str) {
        if self.no_color {
            eprintln!("  ERROR: {}", message);
        } else {
            eprintln!("\x1b[31m  ERROR: {}\x1b[0m", message);
        }
    }

    fn clear(&mut self) {}
}

/// Everything a recording presenter has been told, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Result(Option<u64>),
    Error(String),
    Cleared,
}

/// Shared view of a recording presenter's event log
pub type PresenterLog = Arc<Mutex<Vec<PresenterEvent>>>;

/// Captures presenter calls for assertions
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    log: PresenterLog,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that stays valid after the presenter is boxed
    pub fn log_handle(&self) -> PresenterLog {
        Arc::clone(&self.log)
    }

    fn record(&self, event: PresenterEvent) {
        self.log.lock().expect("presenter log poisoned").push(event);
    }
}

impl ResultPresenter for RecordingPresenter {
    fn show_result(&mut self, elapsed_ms: Option<u64>) {
        self.record(PresenterEvent::Result(elapsed_ms));
    }

    fn show_error(&mut self, message: &str) {
        self.record(PresenterEvent::Error(message.to_string()));
    }

    fn clear(&mut self) {
        self.record(PresenterEvent::Cleared);
    }
}
