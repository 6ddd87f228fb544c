//! The cause aggregate: an ordered container of underlying errors.
//!
//! [`Errors`] holds zero, one, or many causal errors and itself satisfies
//! the full [`StatusError`] capability set. An aggregate of exactly one
//! element is transparent: every accessor delegates to that element. An
//! aggregate of several synthesizes a numbered multi-error report.
//!
//! Aggregates are handles: cloning shares the same element sequence, and
//! all operations are safe under concurrent use (e.g. parallel subtasks
//! appending their failures to one shared accumulator).

use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tonic::{Code, Status};

use crate::classify;
use crate::kind::http_code_for;
use crate::stack::Stack;
use crate::status::{Cause, StatusError};

/// An ordered, concurrency-safe container of underlying errors.
///
/// Element order is insertion order and is significant: it drives the
/// `#N:` numbering of the multi-error report.
///
/// # Example
///
/// ```
/// use statuserr::Errors;
///
/// let errs = Errors::new();
/// errs.push(std::io::Error::other("foo"));
/// errs.push(std::io::Error::other("bar"));
///
/// assert_eq!(errs.len(), 2);
/// assert_eq!(errs.to_string(), "MULTIPLE ERRORS.\n#1: foo\n#2: bar");
/// assert_eq!(errs.code(), 500);
/// ```
#[derive(Clone, Default)]
pub struct Errors {
    inner: Arc<RwLock<Vec<Cause>>>,
}

/// Length after the defensive collapse: a sole element that is itself an
/// empty aggregate counts as nothing (guards against double-wrapping).
fn effective_len(elems: &[Cause]) -> usize {
    if elems.len() == 1 {
        if let Some(nested) = elems[0].downcast_ref::<Errors>() {
            if nested.is_empty() {
                return 0;
            }
        }
    }
    elems.len()
}

impl Errors {
    /// An empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// An aggregate seeded with the given causes, in order.
    pub fn from_causes(causes: impl IntoIterator<Item = Cause>) -> Self {
        Errors {
            inner: Arc::new(RwLock::new(causes.into_iter().collect())),
        }
    }

    // Poisoning only happens if a panic unwound mid-mutation; the element
    // list is still structurally valid, so keep serving it.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Cause>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Cause>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a cause at the tail. A `None` is a no-op.
    pub fn append(&self, err: Option<Cause>) {
        let Some(err) = err else { return };
        self.write().push(err);
    }

    /// Wrap any error value and append it at the tail.
    pub fn push<E>(&self, err: E)
    where
        E: StdError + Send + Sync + 'static,
    {
        self.append(Some(Arc::new(err)));
    }

    /// Remove and return the tail element, or `None` when empty.
    pub fn pop(&self) -> Option<Cause> {
        let mut elems = self.write();
        if effective_len(&elems) == 0 {
            return None;
        }
        elems.pop()
    }

    /// Remove and return the head element, or `None` when empty.
    pub fn shift(&self) -> Option<Cause> {
        let mut elems = self.write();
        if effective_len(&elems) == 0 {
            return None;
        }
        Some(elems.remove(0))
    }

    /// The number of held causes.
    pub fn len(&self) -> usize {
        effective_len(&self.read())
    }

    /// Whether the aggregate holds no causes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The rendered report: `""` when empty, the sole element's own text
    /// for one cause, a numbered `MULTIPLE ERRORS.` report otherwise.
    fn render(&self) -> String {
        let elems = self.read();
        match effective_len(&elems) {
            0 => String::new(),
            1 => elems[0].to_string(),
            _ => {
                let numbered: Vec<String> = elems
                    .iter()
                    .enumerate()
                    .map(|(i, err)| format!("#{}: {}", i + 1, err))
                    .collect();
                format!("MULTIPLE ERRORS.\n{}", numbered.join("\n"))
            }
        }
    }

    /// The HTTP status code for this aggregate.
    ///
    /// 200 when empty (no error); a sole element's own code, or its RPC
    /// code mapped through the fixed table; 500 for several causes or an
    /// unclassifiable single one.
    pub fn code(&self) -> u16 {
        let elems = self.read();
        match effective_len(&elems) {
            0 => 200,
            1 => {
                let elem = elems[0].as_ref();
                if let Some(code) = classify::http_code_of(elem) {
                    code
                } else if let Some(status) = classify::grpc_status_of(elem) {
                    http_code_for(status.code())
                } else {
                    500
                }
            }
            _ => 500,
        }
    }

    /// The message for this aggregate: delegated for one cause, the
    /// `MULTIPLE ERRORS.` marker for several.
    pub fn message(&self) -> String {
        let elems = self.read();
        match effective_len(&elems) {
            0 => String::new(),
            1 => classify::message_of(elems[0].as_ref())
                .unwrap_or_else(|| elems[0].to_string()),
            _ => "MULTIPLE ERRORS.".to_string(),
        }
    }

    /// The causal chain below this aggregate.
    ///
    /// An aggregate of one wraps transparently: this returns the element's
    /// own nested cause, not the element. With several causes the aggregate
    /// itself *is* the cause.
    pub fn cause(&self) -> Option<Cause> {
        let elems = self.read();
        match effective_len(&elems) {
            0 => None,
            1 => classify::cause_of(elems[0].as_ref()),
            _ => {
                drop(elems);
                Some(Arc::new(self.clone()))
            }
        }
    }

    /// The sole element's captured stack, or an empty stack.
    pub fn stack(&self) -> Stack {
        let elems = self.read();
        if effective_len(&elems) == 1 {
            return classify::stack_of(elems[0].as_ref());
        }
        Stack::empty()
    }

    /// Whether the head element reports a timeout.
    pub fn is_timeout(&self) -> bool {
        let elems = self.read();
        elems
            .first()
            .is_some_and(|err| classify::is_timeout(err.as_ref()))
    }

    /// Whether the head element reports itself potentially recoverable.
    pub fn is_temporary(&self) -> bool {
        let elems = self.read();
        elems
            .first()
            .is_some_and(|err| classify::is_temporary(err.as_ref()))
    }

    /// The RPC status for this aggregate.
    ///
    /// `None` when empty; delegated when the sole element exposes one;
    /// otherwise a synthesized `Unknown` status carrying the rendered
    /// report.
    pub fn grpc_status(&self) -> Option<Status> {
        let elems = self.read();
        match effective_len(&elems) {
            0 => None,
            1 => {
                if let Some(status) = classify::grpc_status_of(elems[0].as_ref()) {
                    return Some(status);
                }
                drop(elems);
                Some(Status::new(Code::Unknown, self.render()))
            }
            _ => {
                drop(elems);
                Some(Status::new(Code::Unknown, self.render()))
            }
        }
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Errors")
            .field("len", &self.len())
            .field("report", &self.render())
            .finish()
    }
}

impl StdError for Errors {}

impl StatusError for Errors {
    fn code(&self) -> u16 {
        Errors::code(self)
    }

    fn message(&self) -> String {
        Errors::message(self)
    }

    fn cause(&self) -> Option<Cause> {
        Errors::cause(self)
    }

    fn stack(&self) -> Stack {
        Errors::stack(self)
    }

    fn is_timeout(&self) -> bool {
        Errors::is_timeout(self)
    }

    fn is_temporary(&self) -> bool {
        Errors::is_temporary(self)
    }

    fn grpc_status(&self) -> Option<Status> {
        Errors::grpc_status(self)
    }
}
