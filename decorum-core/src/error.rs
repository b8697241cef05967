//! Error types for Decorum.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`DecorumError`] - Top-level error type for all Decorum operations
//! - [`RegistrationError`] - Errors raised to callers of `register`
//! - [`ContextError`] - Errors raised to a listener misusing its registration context
//! - [`ListenerFault`] - A failure raised from inside a listener during dispatch
//! - [`DispatchError`] - Errors that prevent a dispatch cycle from running

use crate::{listener::ListenerId, subject::SubjectType};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Decorum operations.
#[derive(Error, Debug)]
pub enum DecorumError {
    /// A listener could not be registered.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// A registration context was misused.
    #[error("context error: {0}")]
    Context(#[from] ContextError),

    /// A dispatch cycle could not run.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A listener faulted.
    #[error(transparent)]
    Fault(#[from] ListenerFault),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors returned synchronously from listener registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The listener has no usable identity.
    #[error("listener name must not be empty")]
    InvalidListener,

    /// The event was sealed by a dispatch before this registration.
    #[error("listener `{0}` registered after the event was sealed")]
    LateRegistration(String),
}

/// Errors raised to a listener that misuses its registration context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// The dispatch that created the context has already finalized.
    #[error("registration context for subject `{0}` is no longer active")]
    Stale(SubjectType),

    /// A decorator with the same identity was already appended in this dispatch.
    #[error("decorator `{0}` was already appended in this dispatch")]
    DuplicateDecorator(String),
}

/// Errors that prevent a dispatch cycle from running at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The base renderer's decorator list was already finalized by an earlier dispatch.
    #[error("decorators for subject `{0}` were already finalized")]
    AlreadyFinalized(SubjectType),
}

/// What went wrong inside a faulting listener.
#[derive(Error, Debug)]
pub enum FaultKind {
    /// The listener returned an error.
    #[error(transparent)]
    Error(BoxError),

    /// The listener panicked.
    #[error("listener panicked: {0}")]
    Panic(String),

    /// A decorator the listener appended panicked while being attached.
    #[error("decorator `{decorator}` panicked while attaching: {message}")]
    AttachPanic {
        /// The decorator's id.
        decorator: String,
        /// The panic message.
        message: String,
    },
}

/// A fault raised during dispatch by a listener's callback, or by a decorator
/// it appended when that decorator was attached.
#[derive(Error, Debug)]
#[error("listener `{listener}` faulted while decorating `{subject}`: {kind}")]
pub struct ListenerFault {
    /// The listener that faulted.
    pub listener: ListenerId,
    /// The subject being dispatched.
    pub subject: SubjectType,
    /// The underlying failure.
    #[source]
    pub kind: FaultKind,
}

impl ListenerFault {
    /// Returns `true` if the fault was a panic rather than a returned error.
    pub fn is_panic(&self) -> bool {
        matches!(self.kind, FaultKind::Panic(_) | FaultKind::AttachPanic { .. })
    }
}

// Convenience conversions
impl From<BoxError> for DecorumError {
    fn from(err: BoxError) -> Self {
        DecorumError::Custom(err)
    }
}

impl From<BoxError> for FaultKind {
    fn from(err: BoxError) -> Self {
        FaultKind::Error(err)
    }
}
