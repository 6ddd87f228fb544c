//! The fixed taxonomy of error kinds.
//!
//! Every kind carries a constant HTTP status code, a canonical RPC status
//! code, `timeout`/`temporary` classification flags, and a message policy.
//! The constants never change after construction and are not configurable
//! at runtime.

use std::fmt;

use tonic::Code;

/// The kind of service error that occurred.
///
/// Kinds map one-to-one onto the canonical RPC error space; `Canceled` and
/// `Cancelled` are the two accepted spellings of the same RPC code.
///
/// # Message policy
///
/// Kinds fall into two groups, fixed at design time:
///
/// - **Embedding** kinds put the caller-supplied text directly into the
///   server-safe message after a fixed prefix (e.g. `"NOT FOUND. no such
///   user"`). The caller text is serialized and sent over RPC.
/// - **Fixed-message** kinds (DataLoss, DeadlineExceeded, Internal,
///   Unavailable, Canceled, Cancelled) expose only a generic constant to
///   clients; the caller text is kept in a log-only field that is never
///   serialized. These are server-side failures where detail could leak
///   sensitive information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The operation was aborted, typically due to a concurrency issue such
    /// as a sequencer check failure or transaction abort.
    ///
    /// A litmus test for choosing between the conflict-flavored kinds:
    ///
    /// - use `Unavailable` if the client can retry just the failing call;
    /// - use `Aborted` if the client should retry at a higher level, e.g.
    ///   restarting a read-modify-write sequence;
    /// - use `FailedPrecondition` if the client should not retry until the
    ///   system state has been explicitly fixed.
    ///
    /// HTTP 409, RPC `Aborted`.
    Aborted,

    /// An attempt to create an entity that already exists.
    ///
    /// HTTP 409, RPC `AlreadyExists`.
    AlreadyExists,

    /// The operation was canceled, typically by the caller.
    ///
    /// HTTP 499, RPC `Cancelled`. Counts as a timeout for retry purposes.
    Canceled,

    /// Alternate spelling of [`Canceled`](ErrorKind::Canceled); identical
    /// semantics, British message text.
    Cancelled,

    /// Unrecoverable data loss or corruption.
    ///
    /// HTTP 500, RPC `DataLoss`. The client is never told specifics.
    DataLoss,

    /// The operation expired before completion.
    ///
    /// HTTP 504, RPC `DeadlineExceeded`. Counts as a timeout.
    DeadlineExceeded,

    /// The system is not in a state required for the operation, and the
    /// client should not retry until it has fixed that state, e.g. an
    /// `rmdir` on a non-empty directory.
    ///
    /// HTTP 400, RPC `FailedPrecondition`.
    FailedPrecondition,

    /// An invariant expected by the underlying system was broken.
    ///
    /// Use `Unknown` instead for generic server-side errors that may be
    /// recoverable; `Internal` is reserved for the unrecoverable ones, so
    /// its `temporary` flag is false.
    ///
    /// HTTP 500, RPC `Internal`.
    Internal,

    /// The client supplied a malformed argument, regardless of system state.
    ///
    /// HTTP 400, RPC `InvalidArgument`.
    InvalidArgument,

    /// The requested entity was not found.
    ///
    /// HTTP 404, RPC `NotFound`.
    NotFound,

    /// The operation is not implemented or not supported by this service.
    ///
    /// HTTP 501, RPC `Unimplemented`.
    NotImplemented,

    /// The operation was attempted past the valid range, e.g. a seek beyond
    /// end of file. Unlike `InvalidArgument`, this depends on system state.
    ///
    /// HTTP 400, RPC `OutOfRange`.
    OutOfRange,

    /// The caller is authenticated but lacks permission for the operation.
    ///
    /// HTTP 403, RPC `PermissionDenied`.
    PermissionDenied,

    /// A per-user quota or a system-wide resource has been exhausted.
    ///
    /// HTTP 429, RPC `ResourceExhausted`. Temporary: back off and retry.
    ResourceExhausted,

    /// The request lacks valid authentication credentials.
    ///
    /// HTTP 401, RPC `Unauthenticated`.
    Unauthenticated,

    /// The service is currently unavailable, most likely transient
    /// overloading or maintenance.
    ///
    /// HTTP 503, RPC `Unavailable`. Temporary: retry with backoff.
    Unavailable,

    /// A generic server-side error that may be recoverable.
    ///
    /// HTTP 500, RPC `Unknown`. Temporary, unlike `Internal`.
    Unknown,
}

/// How the caller-supplied text folds into a kind's messages.
pub(crate) enum MessagePolicy {
    /// Server-safe message = prefix + caller text.
    Embed(&'static str),
    /// Server-safe message is a constant; caller text is log-only.
    Fixed(&'static str),
}

impl ErrorKind {
    /// The HTTP status code fixed for this kind.
    pub fn http_code(&self) -> u16 {
        match self {
            ErrorKind::Aborted => 409,
            ErrorKind::AlreadyExists => 409,
            ErrorKind::Canceled | ErrorKind::Cancelled => 499,
            ErrorKind::DataLoss => 500,
            ErrorKind::DeadlineExceeded => 504,
            ErrorKind::FailedPrecondition => 400,
            ErrorKind::Internal => 500,
            ErrorKind::InvalidArgument => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::NotImplemented => 501,
            ErrorKind::OutOfRange => 400,
            ErrorKind::PermissionDenied => 403,
            ErrorKind::ResourceExhausted => 429,
            ErrorKind::Unauthenticated => 401,
            ErrorKind::Unavailable => 503,
            ErrorKind::Unknown => 500,
        }
    }

    /// The canonical RPC status code fixed for this kind.
    pub fn rpc_code(&self) -> Code {
        match self {
            ErrorKind::Aborted => Code::Aborted,
            ErrorKind::AlreadyExists => Code::AlreadyExists,
            ErrorKind::Canceled | ErrorKind::Cancelled => Code::Cancelled,
            ErrorKind::DataLoss => Code::DataLoss,
            ErrorKind::DeadlineExceeded => Code::DeadlineExceeded,
            ErrorKind::FailedPrecondition => Code::FailedPrecondition,
            ErrorKind::Internal => Code::Internal,
            ErrorKind::InvalidArgument => Code::InvalidArgument,
            ErrorKind::NotFound => Code::NotFound,
            ErrorKind::NotImplemented => Code::Unimplemented,
            ErrorKind::OutOfRange => Code::OutOfRange,
            ErrorKind::PermissionDenied => Code::PermissionDenied,
            ErrorKind::ResourceExhausted => Code::ResourceExhausted,
            ErrorKind::Unauthenticated => Code::Unauthenticated,
            ErrorKind::Unavailable => Code::Unavailable,
            ErrorKind::Unknown => Code::Unknown,
        }
    }

    /// Whether errors of this kind are the result of a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ErrorKind::Canceled | ErrorKind::Cancelled | ErrorKind::DeadlineExceeded
        )
    }

    /// Whether errors of this kind are potentially recoverable.
    pub fn is_temporary(&self) -> bool {
        matches!(
            self,
            ErrorKind::ResourceExhausted | ErrorKind::Unavailable | ErrorKind::Unknown
        )
    }

    pub(crate) fn message_policy(&self) -> MessagePolicy {
        match self {
            ErrorKind::Aborted => MessagePolicy::Embed("ABORTED."),
            ErrorKind::AlreadyExists => MessagePolicy::Embed("ALREADY EXISTS."),
            ErrorKind::Canceled => {
                MessagePolicy::Fixed("CANCELED. Request canceled by the client.")
            }
            ErrorKind::Cancelled => {
                MessagePolicy::Fixed("CANCELLED. Request cancelled by the client.")
            }
            ErrorKind::DataLoss => {
                MessagePolicy::Fixed("DATA LOSS. Unrecoverable data loss or data corruption.")
            }
            ErrorKind::DeadlineExceeded => {
                MessagePolicy::Fixed("DEADLINE EXCEEDED. Server timeout.")
            }
            ErrorKind::FailedPrecondition => MessagePolicy::Embed("FAILED PRECONDITION."),
            ErrorKind::Internal => MessagePolicy::Fixed("INTERNAL ERROR."),
            ErrorKind::InvalidArgument => MessagePolicy::Embed("INVALID ARGUMENT."),
            ErrorKind::NotFound => MessagePolicy::Embed("NOT FOUND."),
            ErrorKind::NotImplemented => MessagePolicy::Embed("NOT IMPLEMENTED."),
            ErrorKind::OutOfRange => MessagePolicy::Embed("OUT OF RANGE."),
            ErrorKind::PermissionDenied => MessagePolicy::Embed("PERMISSION DENIED."),
            ErrorKind::ResourceExhausted => MessagePolicy::Embed("RESOURCE EXHAUSTED."),
            ErrorKind::Unauthenticated => MessagePolicy::Embed("UNAUTHENTICATED."),
            ErrorKind::Unavailable => MessagePolicy::Fixed(
                "UNAVAILABLE. Unable to handle the request due to a temporary overloading \
                 or maintenance.",
            ),
            ErrorKind::Unknown => MessagePolicy::Embed("UNKNOWN ERROR."),
        }
    }

    /// Split the caller-supplied text into (server-safe message, log-only
    /// message) according to this kind's policy.
    pub(crate) fn apply_policy(&self, text: String) -> (String, String) {
        match self.message_policy() {
            MessagePolicy::Embed(prefix) => (format!("{prefix} {text}"), String::new()),
            MessagePolicy::Fixed(fixed) => (fixed.to_string(), text),
        }
    }

    /// Returns the kind as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Aborted => "Aborted",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::Canceled => "Canceled",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::DataLoss => "DataLoss",
            ErrorKind::DeadlineExceeded => "DeadlineExceeded",
            ErrorKind::FailedPrecondition => "FailedPrecondition",
            ErrorKind::Internal => "Internal",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::NotImplemented => "NotImplemented",
            ErrorKind::OutOfRange => "OutOfRange",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::ResourceExhausted => "ResourceExhausted",
            ErrorKind::Unauthenticated => "Unauthenticated",
            ErrorKind::Unavailable => "Unavailable",
            ErrorKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a canonical RPC status code to its HTTP status code.
///
/// Codes outside the 16-entry table (including `Ok`) map to 500, matching
/// the cause aggregate's treatment of unclassifiable errors.
pub fn http_code_for(code: Code) -> u16 {
    match code {
        Code::Aborted => 409,
        Code::AlreadyExists => 409,
        Code::Cancelled => 499,
        Code::DataLoss => 500,
        Code::DeadlineExceeded => 504,
        Code::FailedPrecondition => 400,
        Code::Internal => 500,
        Code::InvalidArgument => 400,
        Code::NotFound => 404,
        Code::OutOfRange => 400,
        Code::PermissionDenied => 403,
        Code::ResourceExhausted => 429,
        Code::Unauthenticated => 401,
        Code::Unavailable => 503,
        Code::Unimplemented => 501,
        Code::Unknown => 500,
        _ => 500,
    }
}
