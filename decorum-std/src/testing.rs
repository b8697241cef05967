//! Testing utilities for Decorum.
//!
//! This module provides stand-ins for the host-owned pieces so listeners and
//! events can be exercised without a real engine.
//!
//! # Features
//!
//! - [`TestRenderer`]: A base renderer with a configurable capability set
//! - [`TagDecorator`]: A decorator identified by a string tag
//! - [`RecordingListener`]: A listener that records subjects and appends tags
//! - [`FailingListener`]: A listener that errors or panics on purpose
//! - [`CallJournal`]: A shared log for asserting cross-listener invocation order

use decorum_core::{
    BaseRenderer, BoxError, Capabilities, Decorator, DecoratorList, FeatureListener,
    Registration, SubjectType,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Renderer
// ============================================================================

/// A base renderer with a fixed capability set.
#[derive(Debug, Default)]
pub struct TestRenderer {
    capabilities: Capabilities,
    decorators: DecoratorList,
    attach_calls: AtomicUsize,
}

impl TestRenderer {
    /// A renderer with the given capabilities.
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            ..Self::default()
        }
    }

    /// A humanoid renderer (biped, head, arms, held items, armor slots).
    pub fn biped() -> Self {
        Self::with_capabilities(Capabilities::HUMANOID)
    }

    /// A four-legged renderer with a head.
    pub fn quadruped() -> Self {
        Self::with_capabilities(Capabilities::QUADRUPED | Capabilities::HEAD)
    }

    /// The ids of the installed decorators, in order.
    pub fn decorator_ids(&self) -> Vec<String> {
        self.decorators.iter().map(|d| d.id().to_owned()).collect()
    }

    /// How many [`TagDecorator`]s were attached to this renderer.
    pub fn attached_count(&self) -> usize {
        self.attach_calls.load(Ordering::SeqCst)
    }
}

impl BaseRenderer for TestRenderer {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn decorators(&self) -> &DecoratorList {
        &self.decorators
    }

    fn decorators_mut(&mut self) -> &mut DecoratorList {
        &mut self.decorators
    }
}

// ============================================================================
// Tag Decorator
// ============================================================================

/// A decorator identified by a tag, optionally requiring capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDecorator {
    tag: String,
    requires: Capabilities,
    attached: bool,
}

impl TagDecorator {
    /// A decorator that applies to every renderer.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            requires: Capabilities::empty(),
            attached: false,
        }
    }

    /// Require capabilities for [`Decorator::applies`].
    pub fn requiring(mut self, requires: Capabilities) -> Self {
        self.requires = requires;
        self
    }

    /// Whether [`Decorator::attach`] has run.
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Decorator for TagDecorator {
    fn id(&self) -> &str {
        &self.tag
    }

    fn applies(&self, renderer: &dyn BaseRenderer) -> bool {
        renderer.supports(self.requires)
    }

    fn attach(&mut self, renderer: &dyn BaseRenderer) {
        self.attached = true;
        if let Some(test_renderer) = renderer.downcast_ref::<TestRenderer>() {
            test_renderer.attach_calls.fetch_add(1, Ordering::SeqCst);
        }
    }
}

// ============================================================================
// Call Journal
// ============================================================================

/// A shared, ordered log of listener invocations.
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallJournal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    /// A copy of the entries, in record order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records every subject it sees and appends fixed tags.
///
/// Clones share their record of subjects.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::new().appending("cape");
/// event.register(recorder.clone())?;
///
/// event.dispatch("biped", &mut renderer, &ctx)?;
/// assert_eq!(recorder.call_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingListener {
    subjects: Arc<Mutex<Vec<SubjectType>>>,
    tags: Vec<String>,
    journal: Option<(CallJournal, String)>,
}

impl RecordingListener {
    /// A listener that only records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also append a [`TagDecorator`] with this tag on every call.
    pub fn appending(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Also write `label` to `journal` on every call.
    pub fn journaled(mut self, journal: &CallJournal, label: impl Into<String>) -> Self {
        self.journal = Some((journal.clone(), label.into()));
        self
    }

    /// The subjects seen so far.
    pub fn subjects(&self) -> Vec<SubjectType> {
        self.subjects.lock().unwrap().clone()
    }

    /// How many times the listener ran.
    pub fn call_count(&self) -> usize {
        self.subjects.lock().unwrap().len()
    }
}

impl<C> FeatureListener<C> for RecordingListener {
    fn register_features(
        &self,
        subject: &SubjectType,
        _renderer: &dyn BaseRenderer,
        registration: &mut Registration<'_>,
        _context: &C,
    ) -> Result<(), BoxError> {
        self.subjects.lock().unwrap().push(subject.clone());
        if let Some((journal, label)) = &self.journal {
            journal.record(label.clone());
        }
        for tag in &self.tags {
            registration.append(TagDecorator::new(tag.clone()))?;
        }
        Ok(())
    }
}

// ============================================================================
// Failing Listener
// ============================================================================

/// A listener that always faults, optionally after appending a decorator.
#[derive(Debug, Clone)]
pub struct FailingListener {
    message: String,
    append_first: Option<String>,
    panics: bool,
    calls: Arc<AtomicUsize>,
}

impl FailingListener {
    /// Fails with `message` before appending anything.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            append_first: None,
            panics: false,
            calls: Arc::default(),
        }
    }

    /// Appends a [`TagDecorator`] with `tag`, then fails.
    pub fn after_appending(tag: impl Into<String>) -> Self {
        Self {
            append_first: Some(tag.into()),
            ..Self::new("failed after appending")
        }
    }

    /// Panics with `message` instead of returning an error.
    pub fn panicking(message: impl Into<String>) -> Self {
        Self {
            panics: true,
            ..Self::new(message)
        }
    }

    /// How many times the listener ran.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<C> FeatureListener<C> for FailingListener {
    fn register_features(
        &self,
        _subject: &SubjectType,
        _renderer: &dyn BaseRenderer,
        registration: &mut Registration<'_>,
        _context: &C,
    ) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(tag) = &self.append_first {
            registration.append(TagDecorator::new(tag.clone()))?;
        }
        if self.panics {
            panic!("{}", self.message);
        }
        Err(self.message.clone().into())
    }
}
