//! The feature-registration event.
//!
//! A [`FeatureEvent`] is the extension point: an ordered, append-only list of
//! listeners that the host fans out to every time it constructs a base
//! renderer. Registration happens during startup; the first dispatch seals
//! the event and later registrations are rejected.

use crate::{
    config::EventConfig,
    dispatcher::{DispatchCycle, DispatchReport},
    reporters::{FaultReporter, TracingReporter},
};
use decorum_core::{
    BaseRenderer, BoxError, DispatchError, FeatureListener, FnListener, ListenerId, Registration,
    RegistrationError, SubjectType,
};
use std::{
    fmt,
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{AtomicBool, Ordering},
    },
};

/// A registered listener together with its identity.
pub struct ListenerEntry<C: 'static> {
    id: ListenerId,
    listener: Box<dyn FeatureListener<C>>,
}

impl<C: 'static> ListenerEntry<C> {
    /// The listener's identity.
    pub fn id(&self) -> &ListenerId {
        &self.id
    }

    /// The listener itself.
    pub fn listener(&self) -> &dyn FeatureListener<C> {
        &*self.listener
    }
}

/// An ordered, sealable multicast of [`FeatureListener`]s.
///
/// `C` is the host's construction context, passed through to listeners
/// unmodified.
///
/// # Example
/// ```ignore
/// let event = FeatureEvent::<RenderContext>::new();
/// event.register_fn_named("capes", |subject, renderer, registration, _ctx| {
///     if renderer.supports(Capabilities::BIPED) {
///         registration.append(CapeDecorator::default())?;
///     }
///     Ok(())
/// })?;
///
/// // Later, once per constructed renderer:
/// let report = event.dispatch("player", &mut player_renderer, &ctx)?;
/// ```
pub struct FeatureEvent<C: 'static> {
    listeners: RwLock<Vec<Arc<ListenerEntry<C>>>>,
    sealed: AtomicBool,
    config: EventConfig,
    reporter: Arc<dyn FaultReporter>,
}

impl<C: 'static> FeatureEvent<C> {
    /// Create an empty event with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EventConfig::new())
    }

    /// Create an empty event with the given configuration.
    pub fn with_config(config: EventConfig) -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            sealed: AtomicBool::new(false),
            config,
            reporter: Arc::new(TracingReporter),
        }
    }

    /// Replace the fault reporter.
    pub fn with_reporter<R: FaultReporter>(mut self, reporter: R) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    /// The event's configuration.
    pub fn config(&self) -> &EventConfig {
        &self.config
    }

    /// Register a listener under its own [`name`](FeatureListener::name).
    pub fn register<L: FeatureListener<C>>(&self, listener: L) -> Result<ListenerId, RegistrationError> {
        let name = listener.name().to_owned();
        self.insert(name, Box::new(listener))
    }

    /// Register a listener under an explicit name.
    ///
    /// Fails with [`RegistrationError::InvalidListener`] if the name is blank.
    pub fn register_named<L: FeatureListener<C>>(
        &self,
        name: impl Into<String>,
        listener: L,
    ) -> Result<ListenerId, RegistrationError> {
        self.insert(name.into(), Box::new(listener))
    }

    /// Register a plain function or closure.
    pub fn register_fn<F>(&self, func: F) -> Result<ListenerId, RegistrationError>
    where
        F: Fn(&SubjectType, &dyn BaseRenderer, &mut Registration<'_>, &C) -> Result<(), BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.register(FnListener::new(func))
    }

    /// Register a plain function or closure under an explicit name.
    pub fn register_fn_named<F>(
        &self,
        name: impl Into<String>,
        func: F,
    ) -> Result<ListenerId, RegistrationError>
    where
        F: Fn(&SubjectType, &dyn BaseRenderer, &mut Registration<'_>, &C) -> Result<(), BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.register_named(name, FnListener::new(func))
    }

    fn insert(
        &self,
        name: String,
        listener: Box<dyn FeatureListener<C>>,
    ) -> Result<ListenerId, RegistrationError> {
        if name.trim().is_empty() {
            tracing::warn!("rejected feature listener with an empty name");
            return Err(RegistrationError::InvalidListener);
        }

        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        // Checked under the write lock so a registration cannot slip past a concurrent seal.
        if self.sealed.load(Ordering::Acquire) {
            tracing::warn!(listener = %name, "feature listener registered after the event was sealed");
            return Err(RegistrationError::LateRegistration(name));
        }

        let id = ListenerId::new(listeners.len(), name);
        tracing::debug!(listener = %id, "registered feature listener");
        listeners.push(Arc::new(ListenerEntry {
            id: id.clone(),
            listener,
        }));
        Ok(id)
    }

    /// Seal the event. Later registrations fail with [`RegistrationError::LateRegistration`].
    ///
    /// Dispatching seals the event implicitly unless
    /// [`EventConfig::seal_on_dispatch`] is off.
    pub fn seal(&self) {
        let listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        if !self.sealed.swap(true, Ordering::AcqRel) {
            tracing::debug!(listeners = listeners.len(), "feature event sealed");
        }
    }

    /// Returns `true` once the event is sealed.
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identities of the registered listeners, in invocation order.
    pub fn listener_ids(&self) -> Vec<ListenerId> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|entry| entry.id.clone())
            .collect()
    }

    /// A point-in-time copy of the listener list, so no lock is held while listeners run.
    fn snapshot(&self) -> Vec<Arc<ListenerEntry<C>>> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Prepare a dispatch cycle for one freshly constructed base renderer.
    ///
    /// Seals the event (per configuration). The cycle does nothing until
    /// [`DispatchCycle::run`] is called.
    pub fn begin<'a>(
        &'a self,
        subject: impl Into<SubjectType>,
        renderer: &'a mut dyn BaseRenderer,
        context: &'a C,
    ) -> DispatchCycle<'a, C> {
        if self.config.seal_on_dispatch {
            self.seal();
        }
        DispatchCycle::new(
            self.snapshot(),
            subject.into(),
            renderer,
            context,
            self.config,
            &*self.reporter,
        )
    }

    /// Invoke every listener for one freshly constructed base renderer and
    /// install the resulting decorators on it.
    ///
    /// Listener faults are reported and collected in the returned report;
    /// they never abort the dispatch. Fails only if the renderer's decorators
    /// were already finalized by an earlier dispatch.
    pub fn dispatch(
        &self,
        subject: impl Into<SubjectType>,
        renderer: &mut dyn BaseRenderer,
        context: &C,
    ) -> Result<DispatchReport, DispatchError> {
        self.begin(subject, renderer, context).run()
    }
}

impl<C: 'static> Default for FeatureEvent<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> fmt::Debug for FeatureEvent<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureEvent")
            .field("listeners", &self.listener_ids())
            .field("sealed", &self.is_sealed())
            .field("config", &self.config)
            .finish()
    }
}
