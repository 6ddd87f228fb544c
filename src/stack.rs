//! Call-stack capture attached to every error at construction time.

use std::backtrace::Backtrace;
use std::fmt;
use std::sync::Arc;

/// An immutable capture of the call stack.
///
/// A `Stack` is taken once when an error is constructed and never changes
/// afterwards. Cloning is cheap; the underlying capture is shared.
///
/// The captured frames only appear in textual output when the process-wide
/// verbosity is [`Debug`](crate::Verbosity::Debug) or higher, so the capture
/// is forced regardless of `RUST_BACKTRACE`.
#[derive(Clone, Default)]
pub struct Stack(Option<Arc<Backtrace>>);

impl Stack {
    /// Capture the current call stack.
    pub fn capture() -> Self {
        Stack(Some(Arc::new(Backtrace::force_capture())))
    }

    /// A stack with no captured frames.
    pub fn empty() -> Self {
        Stack(None)
    }

    /// Whether this stack holds a capture.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(trace) => write!(f, "{trace}"),
            None => Ok(()),
        }
    }
}

// The frame list is noise in Debug output; only record presence.
impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Stack(empty)")
        } else {
            f.write_str("Stack(captured)")
        }
    }
}
