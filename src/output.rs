// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Captured output lines, shared with the `Output` that records them.
pub type OutputLog = Arc<Mutex<Vec<String>>>;

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
    log: Option<OutputLog>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
            log: None,
        }
    }

    /// An output that records lines instead of printing them, for callers
    /// that need to inspect what the user would have seen.
    pub fn recorded(mode: OutputMode) -> (Self, OutputLog) {
        let log: OutputLog = Arc::new(Mutex::new(Vec::new()));
        let output = Self {
            mode,
            start_time: None,
            log: Some(Arc::clone(&log)),
        };
        (output, log)
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    fn elapsed_secs(&self) -> Option<f64> {
        self.start_time.map(|t| t.elapsed().as_secs_f64())
    }

    fn out(&self, line: String) {
        match &self.log {
            Some(log) => log.lock().expect("output log lock").push(line),
            None => println!("{line}"),
        }
    }

    fn err(&self, line: String) {
        match &self.log {
            Some(log) => log.lock().expect("output log lock").push(line),
            None => eprintln!("{line}"),
        }
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            self.out(message.to_string());
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => self.err(format!("Warning: {message}")),
            OutputMode::Json => self.emit_json("warning", message),
        }
    }

    /// Print a success message with timing when a timer is running.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => match self.elapsed_secs() {
                Some(elapsed) => self.out(format!("{message} ({elapsed:.1}s)")),
                None => self.out(message.to_string()),
            },
            OutputMode::Quiet => self.out(message.to_string()),
            OutputMode::Json => self.emit_json("success", message),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => self.err(format!("Error: {message}")),
            OutputMode::Json => self.emit_json("error", message),
        }
    }

    fn emit_json(&self, event: &str, message: &str) {
        let event = JsonEvent {
            event,
            message,
            duration_secs: self.elapsed_secs(),
        };
        if let Ok(json) = serde_json::to_string(&event) {
            self.out(json);
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
