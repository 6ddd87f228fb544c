//! The error record shared by every kind in the taxonomy.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use tonic::Status;

use crate::classify;
use crate::errors::Errors;
use crate::kind::ErrorKind;
use crate::logging::log_trace;
use crate::render;
use crate::stack::Stack;
use crate::status::{Cause, StatusError};

/// A classified service error.
///
/// Every error is an immutable record of (kind, message, causal chain,
/// captured call stack). The kind fixes the HTTP code, the RPC code, the
/// `timeout`/`temporary` flags, and the message policy; the same record
/// type serves all seventeen kinds.
///
/// # Example
///
/// ```rust
/// use statuserr::{Error, ErrorKind};
///
/// let err = Error::not_found("no user with id 42");
///
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.code(), 404);
/// assert_eq!(err.server_message(), "NOT FOUND. no user with id 42");
/// assert!(!err.is_retryable());
/// ```
///
/// Fixed-message kinds keep the caller text out of anything a client sees:
///
/// ```rust
/// use statuserr::Error;
///
/// let err = Error::internal("join on shard 7 returned no rows");
///
/// // Serialized and RPC forms carry only the generic text.
/// assert_eq!(err.server_message(), "INTERNAL ERROR.");
/// // The full form, for logs, keeps the detail.
/// assert_eq!(err.message(), "INTERNAL ERROR. join on shard 7 returned no rows");
/// ```
#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    log_message: String,
    cause: Option<Errors>,
    stack: Stack,
}

impl Error {
    /// Create a new error of the given kind.
    ///
    /// The caller text is folded into the server-safe message or routed to
    /// the log-only field according to the kind's message policy, and the
    /// call stack is captured here.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let (message, log_message) = kind.apply_policy(message.into());
        log_trace!(kind = %kind, code = kind.http_code(), "constructed service error");
        Error {
            kind,
            message,
            log_message,
            cause: None,
            stack: Stack::capture(),
        }
    }

    pub(crate) fn from_classified(
        kind: ErrorKind,
        message: impl Into<String>,
        cause: Cause,
    ) -> Self {
        let mut err = Error::new(kind, message);
        err.cause = Some(Errors::from_causes([cause]));
        err
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the HTTP status code associated with this error.
    pub fn code(&self) -> u16 {
        self.kind.http_code()
    }

    /// Get the full human-readable message, including log-only detail.
    ///
    /// This is the form for logs and diagnostics; use
    /// [`server_message`](Self::server_message) for anything a client sees.
    pub fn message(&self) -> String {
        if self.log_message.is_empty() {
            self.message.clone()
        } else {
            format!("{} {}", self.message, self.log_message)
        }
    }

    /// Get the server-safe message used for serialization and RPC.
    pub fn server_message(&self) -> &str {
        &self.message
    }

    /// Get the causal errors associated with this error, if any.
    pub fn cause(&self) -> Option<&Errors> {
        self.cause.as_ref()
    }

    /// Get the call stack captured at construction.
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Whether this error is the result of a timeout.
    pub fn is_timeout(&self) -> bool {
        self.kind.is_timeout()
    }

    /// Whether this error is potentially recoverable.
    pub fn is_temporary(&self) -> bool {
        self.kind.is_temporary()
    }

    /// Whether a caller's retry logic should consider another attempt.
    pub fn is_retryable(&self) -> bool {
        self.is_timeout() || self.is_temporary()
    }

    /// The RPC status carrying this error's code and server-safe message.
    pub fn grpc_status(&self) -> Status {
        Status::new(self.kind.rpc_code(), self.message.clone())
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    /// Attach an underlying error as a cause.
    ///
    /// Repeated calls accumulate causes in order; they are held in a shared
    /// [`Errors`] aggregate.
    pub fn with_cause<E>(mut self, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.attach(Arc::new(err));
        self
    }

    /// Append an additional cause to this error in place.
    pub fn append<E>(&mut self, err: E)
    where
        E: StdError + Send + Sync + 'static,
    {
        self.attach(Arc::new(err));
    }

    fn attach(&mut self, cause: Cause) {
        match &self.cause {
            Some(errs) => errs.append(Some(cause)),
            None => self.cause = Some(Errors::from_causes([cause])),
        }
    }

    // =========================================================================
    // Per-kind constructors
    // =========================================================================

    /// The operation was aborted by a concurrency conflict (HTTP 409).
    pub fn aborted(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Aborted, message)
    }

    /// The entity already exists (HTTP 409).
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyExists, message)
    }

    /// The caller canceled the operation (HTTP 499).
    pub fn canceled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Canceled, message)
    }

    /// [`canceled`](Self::canceled), alternate spelling.
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cancelled, message)
    }

    /// Unrecoverable data loss or corruption (HTTP 500).
    pub fn data_loss(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataLoss, message)
    }

    /// The operation expired before completion (HTTP 504).
    pub fn deadline_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DeadlineExceeded, message)
    }

    /// The system is not in a state required for the operation (HTTP 400).
    pub fn failed_precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FailedPrecondition, message)
    }

    /// A broken invariant in the underlying system (HTTP 500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// A malformed argument from the client (HTTP 400).
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// The requested entity was not found (HTTP 404).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// The operation is not implemented by this service (HTTP 501).
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotImplemented, message)
    }

    /// The operation was attempted past the valid range (HTTP 400).
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutOfRange, message)
    }

    /// The caller lacks permission for the operation (HTTP 403).
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionDenied, message)
    }

    /// A quota or system resource is exhausted (HTTP 429).
    pub fn resource_exhausted(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResourceExhausted, message)
    }

    /// The request lacks valid credentials (HTTP 401).
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// The service is temporarily unavailable (HTTP 503).
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }

    /// A generic, possibly recoverable server-side error (HTTP 500).
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    /// Normalize a foreign error into the taxonomy.
    ///
    /// See [`passthrough`](crate::passthrough) for the decision table.
    pub fn passthrough<E>(message: impl Into<String>, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        classify::passthrough(message, err)
    }
}

// =============================================================================
// Display - verbosity-gated, see crate::render
// =============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::error_str(self))
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_ref()
            .map(|errs| errs as &(dyn StdError + 'static))
    }
}

// =============================================================================
// Shared capability contract
// =============================================================================

impl StatusError for Error {
    fn code(&self) -> u16 {
        Error::code(self)
    }

    fn message(&self) -> String {
        Error::message(self)
    }

    fn cause(&self) -> Option<Cause> {
        self.cause.clone().map(|errs| Arc::new(errs) as Cause)
    }

    fn stack(&self) -> Stack {
        self.stack.clone()
    }

    fn is_timeout(&self) -> bool {
        self.kind.is_timeout()
    }

    fn is_temporary(&self) -> bool {
        self.kind.is_temporary()
    }

    fn grpc_status(&self) -> Option<Status> {
        Some(Error::grpc_status(self))
    }
}

// =============================================================================
// Wire form (be careful not to leak log-only detail!)
// =============================================================================

/// The serialized shape: only the code and the server-safe message.
/// Cause, stack, and log-only text never cross the wire.
#[derive(Serialize)]
struct Wire<'a> {
    error_code: u16,
    error_message: &'a str,
}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Wire {
            error_code: self.code(),
            error_message: self.server_message(),
        }
        .serialize(serializer)
    }
}

// =============================================================================
// RPC status conversions
// =============================================================================

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        err.grpc_status()
    }
}

impl From<Status> for Error {
    fn from(status: Status) -> Self {
        let message = status.message().to_string();
        classify::passthrough(message, status)
    }
}
