//! crates/report/src/handler.rs
//! The per-thread stack of errors currently being handled.
//!
//! Code that catches an error registers it for the duration of its handling
//! block; reports built without an explicit error describe the innermost
//! registered one. Registration is strictly thread-local.

use std::cell::RefCell;
use std::marker::PhantomData;

use crate::captured::CapturedError;
use crate::error::ReportError;

thread_local! {
    static ACTIVE: RefCell<Vec<CapturedError>> = const { RefCell::new(Vec::new()) };
}

/// Registration of an error being handled; unregisters it on drop.
///
/// Scopes nest and must be dropped in reverse order of creation, which the
/// borrow of a local guard guarantees in ordinary code.
#[must_use = "the error is unregistered as soon as the scope is dropped"]
#[derive(Debug)]
pub struct HandlerScope {
    _not_send: PhantomData<*const ()>,
}

impl Drop for HandlerScope {
    fn drop(&mut self) {
        let _ = ACTIVE.try_with(|active| {
            if let Ok(mut active) = active.try_borrow_mut() {
                active.pop();
            }
        });
    }
}

/// Registers `error` as being handled on this thread.
///
/// ```
/// use report::{CapturedError, current, enter};
///
/// let err = "x".parse::<i8>().unwrap_err();
/// {
///     let _scope = enter(CapturedError::from_error(&err));
///     assert_eq!(current().map(|e| e.kind().to_owned()).as_deref(), Some("ParseIntError"));
/// }
/// assert!(current().is_none());
/// ```
pub fn enter(error: CapturedError) -> HandlerScope {
    ACTIVE.with(|active| active.borrow_mut().push(error));
    HandlerScope {
        _not_send: PhantomData,
    }
}

/// Runs `f` with `error` registered as being handled.
pub fn handling<R>(error: CapturedError, f: impl FnOnce() -> R) -> R {
    let _scope = enter(error);
    f()
}

/// The innermost error being handled on this thread.
#[must_use]
pub fn current() -> Option<CapturedError> {
    try_current().ok().flatten()
}

/// Number of errors registered on this thread.
#[must_use]
pub fn depth() -> usize {
    ACTIVE
        .try_with(|active| active.try_borrow().map_or(0, |active| active.len()))
        .unwrap_or(0)
}

pub(crate) fn try_current() -> Result<Option<CapturedError>, ReportError> {
    ACTIVE
        .try_with(|active| {
            active
                .try_borrow()
                .map(|active| active.last().cloned())
                .map_err(|err| ReportError::HandlerUnavailable(err.to_string()))
        })
        .map_err(|err| ReportError::HandlerUnavailable(err.to_string()))?
}
