//! # Registration context
//!
//! A [`Registration`] is lent to each listener for the duration of its
//! callback. It is bound to exactly one base renderer and is write-only: a
//! listener can append decorators but can never observe what other listeners
//! appended, so listener behavior cannot depend on registration order.
//!
//! Appended decorators go into a per-dispatch [`DecoratorSink`] owned by the
//! dispatcher. They reach the renderer only when the dispatch finalizes.

use crate::{
    decorator::Decorator, error::ContextError, renderer::BaseRenderer, subject::SubjectType,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct Pending {
    slot: usize,
    decorator: Box<dyn Decorator>,
}

struct SinkState {
    /// `None` once the owning dispatch has finalized.
    pending: Option<Vec<Pending>>,
    /// The listener slot currently allowed to append.
    open: Option<usize>,
    reject_duplicates: bool,
}

/// Dispatcher-side storage for the decorators appended during one dispatch.
///
/// Every listener appends through its own slot, and a slot only accepts
/// decorators while [`open`](Self::open). Listeners never see this type;
/// they append through [`Registration`] or a [`RegistrationHandle`].
#[derive(Clone)]
pub struct DecoratorSink {
    subject: SubjectType,
    state: Arc<Mutex<SinkState>>,
}

impl DecoratorSink {
    /// Create an open sink for one dispatch of `subject`.
    pub fn new(subject: SubjectType, reject_duplicates: bool) -> Self {
        Self {
            subject,
            state: Arc::new(Mutex::new(SinkState {
                pending: Some(Vec::new()),
                open: None,
                reject_duplicates,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SinkState> {
        // The lock is never held across listener code, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, slot: usize, decorator: Box<dyn Decorator>) -> Result<(), ContextError> {
        let mut state = self.lock();
        if state.open != Some(slot) {
            return Err(ContextError::Stale(self.subject.clone()));
        }
        let reject_duplicates = state.reject_duplicates;
        let Some(pending) = state.pending.as_mut() else {
            return Err(ContextError::Stale(self.subject.clone()));
        };
        if reject_duplicates && pending.iter().any(|p| p.decorator.id() == decorator.id()) {
            return Err(ContextError::DuplicateDecorator(decorator.id().to_owned()));
        }
        pending.push(Pending { slot, decorator });
        Ok(())
    }

    fn accepts(&self, slot: usize) -> bool {
        let state = self.lock();
        state.pending.is_some() && state.open == Some(slot)
    }

    /// Let `slot` append until [`release`](Self::release). Closes any other slot.
    pub fn open(&self, slot: usize) {
        let mut state = self.lock();
        if state.pending.is_some() {
            state.open = Some(slot);
        }
    }

    /// Stop `slot` from appending. Handles issued for it go stale.
    pub fn release(&self, slot: usize) {
        let mut state = self.lock();
        if state.open == Some(slot) {
            state.open = None;
        }
    }

    /// Discards every decorator appended through `slot`. Returns how many.
    pub fn rollback(&self, slot: usize) -> usize {
        let mut state = self.lock();
        let Some(pending) = state.pending.as_mut() else {
            return 0;
        };
        let before = pending.len();
        pending.retain(|p| p.slot != slot);
        before - pending.len()
    }

    /// Number of decorators held so far.
    pub fn len(&self) -> usize {
        self.lock().pending.as_ref().map_or(0, Vec::len)
    }

    /// Returns `true` if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Closes the sink, attaches the held decorators in append order and
    /// installs them on `renderer`, sealing its decorator list.
    ///
    /// `attach` runs once per decorator with the slot that appended it and
    /// returns whether to keep it. Every later append, through any handle,
    /// fails with [`ContextError::Stale`]. Returns the number installed.
    ///
    /// A renderer that is already finalized keeps its list; the held
    /// decorators are dropped without being attached.
    pub fn finalize<F>(&self, renderer: &mut dyn BaseRenderer, mut attach: F) -> usize
    where
        F: FnMut(usize, &mut dyn Decorator, &dyn BaseRenderer) -> bool,
    {
        let pending = {
            let mut state = self.lock();
            state.open = None;
            state.pending.take().unwrap_or_default()
        };
        if renderer.decorators().is_finalized() {
            return 0;
        }

        let mut kept = Vec::with_capacity(pending.len());
        for Pending { slot, mut decorator } in pending {
            if attach(slot, &mut *decorator, &*renderer) {
                kept.push(decorator);
            }
        }
        let installed = kept.len();
        renderer.decorators_mut().install(kept);
        installed
    }

    /// Returns `true` once [`finalize`](Self::finalize) has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().pending.is_none()
    }
}

/// The write-only context a listener uses to add decorators to one base renderer.
pub struct Registration<'a> {
    subject: &'a SubjectType,
    renderer: &'a dyn BaseRenderer,
    sink: DecoratorSink,
    slot: usize,
}

impl<'a> Registration<'a> {
    /// Bind a context to a renderer and to `slot` of its dispatch's sink.
    pub fn new(
        subject: &'a SubjectType,
        renderer: &'a dyn BaseRenderer,
        sink: DecoratorSink,
        slot: usize,
    ) -> Self {
        Self {
            subject,
            renderer,
            sink,
            slot,
        }
    }

    /// The subject type being decorated.
    pub fn subject_type(&self) -> &SubjectType {
        self.subject
    }

    /// The base renderer this context appends to.
    pub fn renderer(&self) -> &dyn BaseRenderer {
        self.renderer
    }

    /// Appends a decorator to the renderer, after any appended before it.
    ///
    /// No applicability check is made; the listener is trusted to have matched
    /// the renderer already.
    pub fn append<D: Decorator>(&mut self, decorator: D) -> Result<(), ContextError> {
        self.append_boxed(Box::new(decorator))
    }

    /// Appends an already boxed decorator.
    pub fn append_boxed(&mut self, decorator: Box<dyn Decorator>) -> Result<(), ContextError> {
        self.sink.push(self.slot, decorator)
    }

    /// Appends the decorator only if it [applies](Decorator::applies) to this renderer.
    ///
    /// Returns whether it was appended.
    pub fn append_if_applicable<D: Decorator>(&mut self, decorator: D) -> Result<bool, ContextError> {
        if !decorator.applies(self.renderer) {
            return Ok(false);
        }
        self.append(decorator)?;
        Ok(true)
    }

    /// A detached handle that can append on this context's behalf.
    ///
    /// The handle outlives the borrow but not the listener's callback: once
    /// the callback returns, appending through it fails with
    /// [`ContextError::Stale`]. If the listener faults, whatever the handle
    /// appended is discarded with the rest of its contribution.
    pub fn handle(&self) -> RegistrationHandle {
        RegistrationHandle {
            sink: self.sink.clone(),
            slot: self.slot,
        }
    }
}

/// An owned, thread-safe way to append while a listener's callback is running.
#[derive(Clone)]
pub struct RegistrationHandle {
    sink: DecoratorSink,
    slot: usize,
}

impl RegistrationHandle {
    /// The subject type of the dispatch this handle appends to.
    pub fn subject_type(&self) -> &SubjectType {
        &self.sink.subject
    }

    /// Appends a decorator, failing with [`ContextError::Stale`] once the
    /// issuing callback has returned.
    pub fn append<D: Decorator>(&self, decorator: D) -> Result<(), ContextError> {
        self.sink.push(self.slot, Box::new(decorator))
    }

    /// Returns `true` while the issuing callback still accepts decorators.
    pub fn is_active(&self) -> bool {
        self.sink.accepts(self.slot)
    }
}
