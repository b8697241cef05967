//! # Feature listeners
//!
//! A listener is one extension's callback into renderer construction. It is
//! invoked once per base renderer the host builds, inspects the subject and
//! renderer, and appends any decorators that apply.
//!
//! Every listener sees every subject; the registry does no filtering on its
//! behalf. Wrap a listener in one of the combinators from `decorum-std` to
//! scope it to a subject type or capability set.

use crate::{
    error::BoxError, registration::Registration, renderer::BaseRenderer, subject::SubjectType,
};
use std::{fmt, sync::Arc};

/// An extension callback that contributes decorators to base renderers.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `FeatureListener` for context `{C}`",
    label = "missing `FeatureListener` implementation",
    note = "Listeners must implement `register_features`, or be registered with `register_fn`."
)]
pub trait FeatureListener<C>: Send + Sync + 'static {
    /// Called once for each base renderer being constructed.
    ///
    /// Returning an error marks this listener as faulted for this dispatch;
    /// any decorators it appended are discarded and remaining listeners still run.
    fn register_features(
        &self,
        subject: &SubjectType,
        renderer: &dyn BaseRenderer,
        registration: &mut Registration<'_>,
        context: &C,
    ) -> Result<(), BoxError>;

    /// Identity reported in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<C, L: FeatureListener<C> + ?Sized> FeatureListener<C> for Box<L> {
    fn register_features(
        &self,
        subject: &SubjectType,
        renderer: &dyn BaseRenderer,
        registration: &mut Registration<'_>,
        context: &C,
    ) -> Result<(), BoxError> {
        (**self).register_features(subject, renderer, registration, context)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Adapts a plain function or closure into a [`FeatureListener`].
pub struct FnListener<F> {
    func: F,
}

impl<F> FnListener<F> {
    /// Wrap a function.
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<C, F> FeatureListener<C> for FnListener<F>
where
    F: Fn(&SubjectType, &dyn BaseRenderer, &mut Registration<'_>, &C) -> Result<(), BoxError>
        + Send
        + Sync
        + 'static,
{
    fn register_features(
        &self,
        subject: &SubjectType,
        renderer: &dyn BaseRenderer,
        registration: &mut Registration<'_>,
        context: &C,
    ) -> Result<(), BoxError> {
        (self.func)(subject, renderer, registration, context)
    }

    fn name(&self) -> &str {
        std::any::type_name::<F>()
    }
}

/// The identity of a registered listener: its position and name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ListenerId {
    index: usize,
    name: Arc<str>,
}

impl ListenerId {
    /// Create an identity.
    pub fn new(index: usize, name: impl AsRef<str>) -> Self {
        Self {
            index,
            name: Arc::from(name.as_ref()),
        }
    }

    /// Position in registration (and invocation) order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The listener's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerId")
            .field("index", &self.index)
            .field("name", &&*self.name)
            .finish()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.index)
    }
}
