//! Filtering listeners for scoped decorator registration.

use decorum_core::{
    BaseRenderer, BoxError, Capabilities, FeatureListener, Registration, SubjectType,
};
use std::collections::HashSet;

/// Runs the inner listener only for the given subject types.
///
/// # Example
///
/// ```rust,ignore
/// // Zombie and husk renderers get the torn-cloth overlay.
/// event.register(ForSubject::new(["zombie", "husk"], TornClothListener))?;
/// ```
pub struct ForSubject<L> {
    subjects: HashSet<SubjectType>,
    inner: L,
}

impl<L> ForSubject<L> {
    /// Create a new `ForSubject` filter.
    pub fn new<I, S>(subjects: I, inner: L) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SubjectType>,
    {
        Self {
            subjects: subjects.into_iter().map(Into::into).collect(),
            inner,
        }
    }
}

impl<C, L: FeatureListener<C>> FeatureListener<C> for ForSubject<L> {
    fn register_features(
        &self,
        subject: &SubjectType,
        renderer: &dyn BaseRenderer,
        registration: &mut Registration<'_>,
        context: &C,
    ) -> Result<(), BoxError> {
        if self.subjects.contains(subject) {
            self.inner
                .register_features(subject, renderer, registration, context)
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Runs the inner listener only for renderers supporting every required capability.
///
/// # Example
///
/// ```rust,ignore
/// event.register(WithCapabilities::new(Capabilities::BIPED | Capabilities::HEAD, HatListener))?;
/// ```
pub struct WithCapabilities<L> {
    required: Capabilities,
    inner: L,
}

impl<L> WithCapabilities<L> {
    /// Create a new `WithCapabilities` filter.
    pub fn new(required: Capabilities, inner: L) -> Self {
        Self { required, inner }
    }
}

impl<C, L: FeatureListener<C>> FeatureListener<C> for WithCapabilities<L> {
    fn register_features(
        &self,
        subject: &SubjectType,
        renderer: &dyn BaseRenderer,
        registration: &mut Registration<'_>,
        context: &C,
    ) -> Result<(), BoxError> {
        if renderer.supports(self.required) {
            self.inner
                .register_features(subject, renderer, registration, context)
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Runs the inner listener only when a predicate over subject and renderer holds.
///
/// # Example
///
/// ```rust,ignore
/// // Only the concrete player renderer gets the ears.
/// let ears = When::new(
///     |_, renderer: &dyn BaseRenderer| renderer.is::<PlayerRenderer>(),
///     EarsListener,
/// );
/// ```
pub struct When<F, L> {
    condition: F,
    inner: L,
}

impl<F, L> When<F, L> {
    /// Create a new `When` filter.
    pub fn new(condition: F, inner: L) -> Self {
        Self { condition, inner }
    }
}

impl<C, F, L> FeatureListener<C> for When<F, L>
where
    F: Fn(&SubjectType, &dyn BaseRenderer) -> bool + Send + Sync + 'static,
    L: FeatureListener<C>,
{
    fn register_features(
        &self,
        subject: &SubjectType,
        renderer: &dyn BaseRenderer,
        registration: &mut Registration<'_>,
        context: &C,
    ) -> Result<(), BoxError> {
        if (self.condition)(subject, renderer) {
            self.inner
                .register_features(subject, renderer, registration, context)
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
