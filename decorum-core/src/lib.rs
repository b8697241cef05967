//! # decorum-core
//!
//! Core contracts for the Decorum feature-decorator registration framework.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! extensions that only contribute listeners and decorators and don't need
//! the full `decorum-std` implementation.
//!
//! # Contracts
//!
//! Decorum lets many independent extensions attach visual add-ons to a base
//! renderer while the host is constructing it. The pieces, leaves first:
//!
//! ## [`Decorator`]
//!
//! One visual add-on (an armor layer, a cape, an overlay). Opaque to the
//! registry beyond its identity, [`Decorator::applies`] and [`Decorator::attach`].
//!
//! ## [`SubjectType`] and [`Capabilities`]
//!
//! The host's type tag for the subject being rendered, and the structural
//! capability set of its base renderer. Listeners match on these.
//!
//! ## [`Registration`]
//!
//! The write-only context a listener appends decorators through. Bound to a
//! single [`BaseRenderer`] for a single dispatch.
//!
//! ## [`FeatureListener`]
//!
//! An extension's callback. Invoked once per constructed base renderer, in
//! registration order, by the event in `decorum-std`.
//!
//! # Error Types
//!
//! - [`DecorumError`] - Top-level error type
//! - [`RegistrationError`] - Listener registration errors
//! - [`ContextError`] - Registration context misuse
//! - [`ListenerFault`] - A listener failure caught during dispatch

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod capability;
mod decorator;
mod error;
mod listener;
mod registration;
mod renderer;
mod subject;

// Re-exports
pub use capability::Capabilities;
pub use decorator::{Decorator, DecoratorList};
pub use error::{
    BoxError, ContextError, DecorumError, DispatchError, FaultKind, ListenerFault,
    RegistrationError,
};
pub use listener::{FeatureListener, FnListener, ListenerId};
pub use registration::{DecoratorSink, Registration, RegistrationHandle};
pub use renderer::{AsAny, BaseRenderer};
pub use subject::SubjectType;
