//! One dispatch cycle per base renderer.
//!
//! A [`DispatchCycle`] walks `Idle → Dispatching → Finalized` exactly once.
//! While dispatching, every listener gets a fresh [`Registration`] bound to
//! the renderer and to its own slot of a per-dispatch sink; the slot closes
//! when the listener returns. On finalization the held decorators are
//! attached and installed on the renderer in one step, and the renderer's
//! decorator list is sealed for good.

use crate::{config::EventConfig, event::ListenerEntry, reporters::FaultReporter};
use decorum_core::{
    BaseRenderer, Decorator, DecoratorSink, DispatchError, FaultKind, ListenerFault, ListenerId,
    Registration, SubjectType,
};
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

/// Where a [`DispatchCycle`] is in its one-shot lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Created, no listener invoked yet.
    Idle,
    /// Listeners are being invoked.
    Dispatching,
    /// Decorators installed; terminal.
    Finalized,
}

/// Outcome of a finalized dispatch.
#[derive(Debug)]
pub struct DispatchReport {
    /// The subject that was dispatched.
    pub subject: SubjectType,
    /// Number of listeners invoked.
    pub invoked: usize,
    /// Number of decorators installed on the renderer.
    pub attached: usize,
    /// Faults caught from listeners, in invocation order.
    pub faults: Vec<ListenerFault>,
}

impl DispatchReport {
    /// Returns `true` if no listener faulted.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }

    /// Identities of the listeners that faulted.
    pub fn faulted_listeners(&self) -> impl Iterator<Item = &ListenerId> {
        self.faults.iter().map(|fault| &fault.listener)
    }
}

/// A single fan-out of the registered listeners for one base renderer.
///
/// Obtained from [`FeatureEvent::begin`](crate::FeatureEvent::begin).
pub struct DispatchCycle<'a, C: 'static> {
    state: DispatchState,
    listeners: Vec<Arc<ListenerEntry<C>>>,
    subject: SubjectType,
    renderer: &'a mut dyn BaseRenderer,
    context: &'a C,
    config: EventConfig,
    reporter: &'a dyn FaultReporter,
}

impl<'a, C: 'static> DispatchCycle<'a, C> {
    pub(crate) fn new(
        listeners: Vec<Arc<ListenerEntry<C>>>,
        subject: SubjectType,
        renderer: &'a mut dyn BaseRenderer,
        context: &'a C,
        config: EventConfig,
        reporter: &'a dyn FaultReporter,
    ) -> Self {
        Self {
            state: DispatchState::Idle,
            listeners,
            subject,
            renderer,
            context,
            config,
            reporter,
        }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// The subject this cycle dispatches.
    pub fn subject(&self) -> &SubjectType {
        &self.subject
    }

    /// Invoke every listener in registration order, then attach and install
    /// the collected decorators.
    ///
    /// Fails with [`DispatchError::AlreadyFinalized`] if this cycle already
    /// ran or the renderer was finalized by an earlier dispatch; no listener
    /// is invoked in that case.
    pub fn run(&mut self) -> Result<DispatchReport, DispatchError> {
        let span = tracing::debug_span!(
            "feature_dispatch",
            subject = %self.subject,
            listeners = self.listeners.len()
        );
        let _enter = span.enter();

        if self.state != DispatchState::Idle || self.renderer.decorators().is_finalized() {
            tracing::warn!("decorators already finalized; skipping dispatch");
            return Err(DispatchError::AlreadyFinalized(self.subject.clone()));
        }

        self.state = DispatchState::Dispatching;
        let sink = DecoratorSink::new(self.subject.clone(), self.config.reject_duplicates);
        let mut faults = Vec::new();

        let renderer: &dyn BaseRenderer = &*self.renderer;
        for (slot, entry) in self.listeners.iter().enumerate() {
            sink.open(slot);
            let mut registration = Registration::new(&self.subject, renderer, sink.clone(), slot);
            tracing::trace!(listener = %entry.id(), "invoking feature listener");

            let outcome = invoke(
                entry,
                &self.subject,
                renderer,
                &mut registration,
                self.context,
                self.config.catch_panics,
            );
            sink.release(slot);

            if let Err(kind) = outcome {
                let discarded = sink.rollback(slot);
                let fault = ListenerFault {
                    listener: entry.id().clone(),
                    subject: self.subject.clone(),
                    kind,
                };
                tracing::trace!(listener = %entry.id(), discarded, "discarded decorators of faulted listener");
                self.reporter.report(&fault);
                faults.push(fault);
            }
        }

        let listeners = &self.listeners;
        let subject = &self.subject;
        let reporter = self.reporter;
        let catch_panics = self.config.catch_panics;
        let attached = sink.finalize(&mut *self.renderer, |slot, decorator, renderer| {
            let Err(message) = attach(decorator, renderer, catch_panics) else {
                return true;
            };
            let fault = ListenerFault {
                listener: listeners[slot].id().clone(),
                subject: subject.clone(),
                kind: FaultKind::AttachPanic {
                    decorator: decorator.id().to_owned(),
                    message,
                },
            };
            tracing::trace!(decorator = decorator.id(), "dropped decorator that panicked on attach");
            reporter.report(&fault);
            faults.push(fault);
            false
        });
        self.state = DispatchState::Finalized;

        tracing::debug!(attached, faults = faults.len(), "feature dispatch finalized");
        Ok(DispatchReport {
            subject: self.subject.clone(),
            invoked: self.listeners.len(),
            attached,
            faults,
        })
    }
}

fn invoke<C: 'static>(
    entry: &ListenerEntry<C>,
    subject: &SubjectType,
    renderer: &dyn BaseRenderer,
    registration: &mut Registration<'_>,
    context: &C,
    catch_panics: bool,
) -> Result<(), FaultKind> {
    let mut call = || {
        entry
            .listener()
            .register_features(subject, renderer, registration, context)
    };

    if !catch_panics {
        return call().map_err(FaultKind::Error);
    }
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result.map_err(FaultKind::Error),
        Err(payload) => Err(FaultKind::Panic(panic_message(payload.as_ref()))),
    }
}

fn attach(
    decorator: &mut dyn Decorator,
    renderer: &dyn BaseRenderer,
    catch_panics: bool,
) -> Result<(), String> {
    if !catch_panics {
        decorator.attach(renderer);
        return Ok(());
    }
    panic::catch_unwind(AssertUnwindSafe(|| decorator.attach(renderer)))
        .map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("non-string panic payload")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        FeatureEvent,
        testing::{FailingListener, RecordingListener, TestRenderer},
    };

    #[test]
    fn test_cycle_state_transitions() {
        let event = FeatureEvent::<()>::new();
        event
            .register_named("hat", RecordingListener::new().appending("hat"))
            .unwrap();

        let mut renderer = TestRenderer::biped();
        let mut cycle = event.begin("biped", &mut renderer, &());
        assert_eq!(cycle.state(), DispatchState::Idle);

        let report = cycle.run().unwrap();
        assert_eq!(cycle.state(), DispatchState::Finalized);
        assert_eq!(report.attached, 1);

        assert_eq!(
            cycle.run().unwrap_err(),
            DispatchError::AlreadyFinalized("biped".into())
        );
    }

    #[test]
    fn test_second_dispatch_on_same_renderer_rejected() {
        let listener = RecordingListener::new().appending("hat");
        let event = FeatureEvent::<()>::new();
        event.register_named("hat", listener.clone()).unwrap();

        let mut renderer = TestRenderer::biped();
        event.dispatch("biped", &mut renderer, &()).unwrap();
        let err = event.dispatch("biped", &mut renderer, &()).unwrap_err();

        assert_eq!(err, DispatchError::AlreadyFinalized("biped".into()));
        assert_eq!(listener.call_count(), 1);
        assert_eq!(renderer.decorator_ids(), vec!["hat"]);
    }

    #[test]
    fn test_faulting_listener_appends_are_rolled_back() {
        let event = FeatureEvent::<()>::new();
        event
            .register_named("half_done", FailingListener::after_appending("orphan"))
            .unwrap();
        event
            .register_named("after", RecordingListener::new().appending("kept"))
            .unwrap();

        let mut renderer = TestRenderer::biped();
        let report = event.dispatch("biped", &mut renderer, &()).unwrap();

        assert_eq!(renderer.decorator_ids(), vec!["kept"]);
        assert_eq!(report.faults.len(), 1);
        assert_eq!(report.faulted_listeners().next().unwrap().name(), "half_done");
    }

    #[test]
    fn test_panic_message_is_captured() {
        let event = FeatureEvent::<()>::new();
        event
            .register_fn_named("panicky", |_, _, _, _: &()| panic!("texture atlas missing"))
            .unwrap();

        let mut renderer = TestRenderer::biped();
        let report = event.dispatch("biped", &mut renderer, &()).unwrap();

        assert!(report.faults[0].is_panic());
        assert_eq!(
            report.faults[0].kind.to_string(),
            "listener panicked: texture atlas missing"
        );
    }

    #[test]
    fn test_decorators_attached_to_renderer() {
        let event = FeatureEvent::<()>::new();
        event
            .register_named("pair", RecordingListener::new().appending("a").appending("b"))
            .unwrap();

        let mut renderer = TestRenderer::biped();
        event.dispatch("biped", &mut renderer, &()).unwrap();

        assert_eq!(renderer.attached_count(), 2);
    }
}
