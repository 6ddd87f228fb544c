//! Verbosity-controlled rendering of errors.
//!
//! The process-wide verbosity level decides how much detail [`error_str`]
//! includes: the one-line form, the causal chain, or the captured call
//! stack. The level is read fresh on every render, so changing it mid-
//! process changes the output of errors constructed earlier.
//!
//! The level is a single atomic cell with an explicit get/set API rather
//! than ambient state scattered through call sites. It is expected to be
//! set once at startup (or by an admin/test hook); readers always observe
//! some previously-written value.

use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::status::StatusError;

/// How much detail goes into an error's textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// `error {code}: {message}` only. The default.
    Info,
    /// Adds the causal chain.
    Verbose,
    /// Adds the captured call stack.
    Debug,
    /// Full detail. Distinguished from `Debug` only by the verbosity of the
    /// underlying stack capture, not by the renderer.
    Trace,
}

/// Failure to parse a verbosity level from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown verbosity level: {0}")]
pub struct ParseVerbosityError(String);

impl Verbosity {
    /// Returns the level as a static lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Info => "info",
            Verbosity::Verbose => "verbose",
            Verbosity::Debug => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

impl std::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verbosity {
    type Err = ParseVerbosityError;

    /// Case-insensitive; intended for wiring the level from configuration
    /// or an environment variable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Verbosity::Info),
            "verbose" => Ok(Verbosity::Verbose),
            "debug" => Ok(Verbosity::Debug),
            "trace" => Ok(Verbosity::Trace),
            _ => Err(ParseVerbosityError(s.to_string())),
        }
    }
}

static VERBOSITY: AtomicU8 = AtomicU8::new(Verbosity::Info as u8);

/// Set the process-wide verbosity level.
///
/// Takes effect for every subsequent render, including errors constructed
/// before the call. Test suites that assert on rendered output must save
/// and restore the level around their assertions.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// The current process-wide verbosity level.
pub fn verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Info,
        1 => Verbosity::Verbose,
        2 => Verbosity::Debug,
        _ => Verbosity::Trace,
    }
}

/// Render the textual form of an error at the current verbosity level.
///
/// Pure function of (current level, the error's code/message/cause/stack);
/// nothing is cached into the error, so the same value renders differently
/// after the level changes.
pub fn error_str(err: &dyn StatusError) -> String {
    let level = verbosity();
    let mut out = format!("error {}: {}", err.code(), err.message());

    if level >= Verbosity::Verbose {
        if let Some(cause) = StatusError::cause(err) {
            let rendered = cause.to_string();
            if !rendered.is_empty() {
                out.push_str("\ncause: ");
                out.push_str(&rendered);
            }
        }
    }

    if level >= Verbosity::Debug {
        let stack = err.stack();
        if !stack.is_empty() {
            out.push_str("\nstack:\n");
            out.push_str(&stack.to_string());
        }
    }

    out
}
