//! Normalization of foreign errors into the taxonomy.
//!
//! [`passthrough`] inspects which capabilities an arbitrary error exposes
//! and reclassifies it as the best-matching [`ErrorKind`]. Probing is
//! explicit pattern matching by downcast: the recognized carriers are this
//! crate's own [`Error`]/[`Errors`], a type-erased
//! [`BoxedStatusError`], a [`tonic::Status`], and a [`std::io::Error`]
//! whose kind is `TimedOut` (the platform's deadline sentinel). Only the
//! immediate value is probed; wrapper layers are not unwrapped.

use std::error::Error as StdError;
use std::sync::Arc;

use tonic::Code;

use crate::error::Error;
use crate::errors::Errors;
use crate::kind::ErrorKind;
use crate::logging::log_debug;
use crate::stack::Stack;
use crate::status::{BoxedStatusError, Cause, StatusError};

/// View the error through the shared capability contract, when it is one
/// of the types that implement it.
fn as_status<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a dyn StatusError> {
    if let Some(e) = err.downcast_ref::<Error>() {
        return Some(e);
    }
    if let Some(e) = err.downcast_ref::<Errors>() {
        return Some(e);
    }
    if let Some(e) = err.downcast_ref::<BoxedStatusError>() {
        return Some(e);
    }
    None
}

pub(crate) fn http_code_of(err: &(dyn StdError + 'static)) -> Option<u16> {
    as_status(err).map(StatusError::code)
}

pub(crate) fn message_of(err: &(dyn StdError + 'static)) -> Option<String> {
    as_status(err).map(StatusError::message)
}

pub(crate) fn cause_of(err: &(dyn StdError + 'static)) -> Option<Cause> {
    as_status(err).and_then(StatusError::cause)
}

pub(crate) fn stack_of(err: &(dyn StdError + 'static)) -> Stack {
    as_status(err).map(StatusError::stack).unwrap_or_default()
}

pub(crate) fn grpc_status_of(err: &(dyn StdError + 'static)) -> Option<tonic::Status> {
    if let Some(status) = err.downcast_ref::<tonic::Status>() {
        return Some(status.clone());
    }
    as_status(err).and_then(StatusError::grpc_status)
}

pub(crate) fn is_timeout(err: &(dyn StdError + 'static)) -> bool {
    if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
        return io_err.kind() == std::io::ErrorKind::TimedOut;
    }
    as_status(err).is_some_and(StatusError::is_timeout)
}

pub(crate) fn is_temporary(err: &(dyn StdError + 'static)) -> bool {
    as_status(err).is_some_and(StatusError::is_temporary)
}

/// The fixed decision table. Ties break in the listed order: canceled
/// beats timeout beats unavailable beats unknown beats internal.
pub(crate) fn classify(err: &(dyn StdError + 'static)) -> ErrorKind {
    let rpc_code = grpc_status_of(err).map(|status| status.code());

    if rpc_code == Some(Code::Cancelled) {
        return ErrorKind::Canceled;
    }
    if rpc_code == Some(Code::DeadlineExceeded) || is_timeout(err) {
        return ErrorKind::DeadlineExceeded;
    }
    if rpc_code == Some(Code::Unavailable) {
        return ErrorKind::Unavailable;
    }
    if rpc_code == Some(Code::Unknown) || is_temporary(err) {
        return ErrorKind::Unknown;
    }
    ErrorKind::Internal
}

/// Handle an error from an external dependency.
///
/// If the error reports cancellation, a timeout, unavailability, or a
/// temporary condition, it is passed through as the corresponding kind
/// from this taxonomy; otherwise an [`Internal`](ErrorKind::Internal)
/// error with the provided message is returned. The foreign error always
/// becomes the sole cause of the produced [`Error`].
///
/// This function is total: classification itself never fails.
///
/// # Example
///
/// ```
/// use statuserr::{passthrough, ErrorKind};
///
/// let timed_out = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
/// let err = passthrough("fetching profile", timed_out);
///
/// assert_eq!(err.kind(), ErrorKind::DeadlineExceeded);
/// assert!(err.is_timeout());
/// ```
pub fn passthrough<E>(message: impl Into<String>, err: E) -> Error
where
    E: StdError + Send + Sync + 'static,
{
    let cause: Cause = Arc::new(err);
    let kind = classify(cause.as_ref());
    log_debug!(kind = %kind, "normalized foreign error into the taxonomy");
    Error::from_classified(kind, message, cause)
}
