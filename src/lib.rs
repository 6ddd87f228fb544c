//! # statuserr
//!
//! Typed service-error taxonomy with HTTP and gRPC status mappings, causal
//! chains, stack capture, and verbosity-controlled rendering.
//!
//! ## Key Features
//!
//! - **Fixed taxonomy**: seventeen error kinds, each with a constant HTTP
//!   status code and canonical RPC status code
//! - **Retry signals**: `is_timeout()` / `is_temporary()` classification
//!   flags for callers' retry logic
//! - **Causal chains**: every error can carry zero, one, or many underlying
//!   errors in a concurrency-safe aggregate
//! - **Server-safe messages**: kinds that represent server-side failures
//!   never serialize caller-supplied detail
//! - **Passthrough**: normalize any foreign error into the taxonomy
//!
//! ## Example
//!
//! ```rust
//! use statuserr::{passthrough, Error, ErrorKind};
//!
//! // Construct directly...
//! let err = Error::not_found(format!("no profile for user '{}'", "u-17"));
//! assert_eq!(err.code(), 404);
//!
//! // ...or normalize whatever an external dependency returned.
//! let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out");
//! let err = passthrough("calling profile service", io_err);
//! assert_eq!(err.kind(), ErrorKind::DeadlineExceeded);
//! assert!(err.is_retryable());
//!
//! // The RPC form is one call away.
//! let status: tonic::Status = err.into();
//! assert_eq!(status.code(), tonic::Code::DeadlineExceeded);
//! ```
//!
//! ## Rendering
//!
//! The textual form of every error is gated by a process-wide
//! [`Verbosity`] level, read fresh on each render: `Info` prints the
//! one-liner, `Verbose` adds the causal chain, `Debug` and `Trace` add the
//! captured call stack. See [`set_verbosity`].

pub mod classify;
pub mod error;
pub mod errors;
pub mod kind;
pub mod render;
pub mod stack;
pub mod status;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use classify::passthrough;
pub use error::Error;
pub use errors::Errors;
pub use kind::{http_code_for, ErrorKind};
pub use render::{error_str, set_verbosity, verbosity, ParseVerbosityError, Verbosity};
pub use stack::Stack;
pub use status::{BoxedStatusError, Cause, StatusError};
