//! Test helper utilities for statuserr tests
//!
//! This module provides reusable fixtures shared across test modules:
//! a save/restore guard for the process-wide verbosity level and a few
//! foreign-error stand-ins with known capabilities.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - fixtures are used across different test files
#![allow(dead_code)]

use std::fmt;
use std::sync::Arc;

use crate::kind::ErrorKind;
use crate::render::{set_verbosity, verbosity, Verbosity};
use crate::stack::Stack;
use crate::status::StatusError;

/// All seventeen kinds, for table-driven assertions.
pub const ALL_KINDS: [ErrorKind; 17] = [
    ErrorKind::Aborted,
    ErrorKind::AlreadyExists,
    ErrorKind::Canceled,
    ErrorKind::Cancelled,
    ErrorKind::DataLoss,
    ErrorKind::DeadlineExceeded,
    ErrorKind::FailedPrecondition,
    ErrorKind::Internal,
    ErrorKind::InvalidArgument,
    ErrorKind::NotFound,
    ErrorKind::NotImplemented,
    ErrorKind::OutOfRange,
    ErrorKind::PermissionDenied,
    ErrorKind::ResourceExhausted,
    ErrorKind::Unauthenticated,
    ErrorKind::Unavailable,
    ErrorKind::Unknown,
];

/// RAII guard that sets the process-wide verbosity and restores the
/// previous level on drop.
///
/// The verbosity cell is shared mutable state across concurrently running
/// tests, so every test that touches it must also be `#[serial]`.
pub struct VerbosityGuard {
    previous: Verbosity,
}

impl VerbosityGuard {
    pub fn set(level: Verbosity) -> Self {
        let previous = verbosity();
        set_verbosity(level);
        VerbosityGuard { previous }
    }
}

impl Drop for VerbosityGuard {
    fn drop(&mut self) {
        set_verbosity(self.previous);
    }
}

/// A foreign error with no special capabilities at all.
#[derive(Debug)]
pub struct PlainError(pub &'static str);

impl fmt::Display for PlainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for PlainError {}

/// A foreign error implementing the full capability contract with its own
/// code, used to exercise delegation and the renderer without depending on
/// any taxonomy kind.
#[derive(Debug)]
pub struct FooError {
    pub message: String,
    pub cause: Option<crate::Cause>,
    pub stack: Stack,
}

impl FooError {
    pub fn new(message: impl Into<String>) -> Self {
        FooError {
            message: message.into(),
            cause: None,
            stack: Stack::capture(),
        }
    }

    pub fn with_cause<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FooError {
            message: message.into(),
            cause: Some(Arc::new(cause)),
            stack: Stack::capture(),
        }
    }
}

impl fmt::Display for FooError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::error_str(self))
    }
}

impl std::error::Error for FooError {}

impl StatusError for FooError {
    fn code(&self) -> u16 {
        999
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn cause(&self) -> Option<crate::Cause> {
        self.cause.clone()
    }

    fn stack(&self) -> Stack {
        self.stack.clone()
    }
}

/// A foreign error whose only capability is `is_temporary() == true`.
#[derive(Debug)]
pub struct TemporaryError;

impl fmt::Display for TemporaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("temporary upstream hiccup")
    }
}

impl std::error::Error for TemporaryError {}

impl StatusError for TemporaryError {
    fn is_temporary(&self) -> bool {
        true
    }
}
