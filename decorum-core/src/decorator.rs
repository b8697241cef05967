//! # Decorators
//!
//! A decorator is one visual add-on (an armor layer, a cape, an accessory
//! overlay) contributed to a base renderer. The registry treats decorators as
//! opaque: beyond an identity it only relies on [`Decorator::applies`] and
//! [`Decorator::attach`].
//!
//! Decorators are owned. A listener creates one, moves it into a
//! [`Registration`](crate::Registration), and from finalization onward it
//! belongs to the renderer's [`DecoratorList`].

use crate::renderer::BaseRenderer;
use std::fmt;

/// A composable add-on renderer.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Decorator`",
    label = "missing `Decorator` implementation",
    note = "Decorators must implement `applies` and `attach`."
)]
pub trait Decorator: Send + Sync + 'static {
    /// Identity used in diagnostics and by the optional duplicate check.
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Whether this decorator can be used with the given base renderer.
    fn applies(&self, renderer: &dyn BaseRenderer) -> bool;

    /// Binds the decorator to the base renderer it now belongs to.
    ///
    /// Called exactly once, when the dispatch that appended it finalizes.
    fn attach(&mut self, renderer: &dyn BaseRenderer);
}

impl fmt::Debug for dyn Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Decorator").field(&self.id()).finish()
    }
}

/// The finalized, ordered decorators of one base renderer.
///
/// Hosts embed one of these in each base renderer and expose it through
/// [`BaseRenderer::decorators`]. It stays empty while listeners run and is
/// filled and sealed in a single step when the dispatch finalizes.
#[derive(Debug, Default)]
pub struct DecoratorList {
    entries: Vec<Box<dyn Decorator>>,
    finalized: bool,
}

impl DecoratorList {
    /// Create an empty, unfinalized list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached decorators.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no decorators are attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` once a dispatch has finalized this list.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Iterate over the decorators in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Decorator> {
        self.entries.iter().map(|d| &**d)
    }

    /// Mutable iteration, for hosts driving per-frame decorator state.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn Decorator + 'static)> {
        self.entries.iter_mut().map(|d| &mut **d)
    }

    /// The identities of the attached decorators, in order.
    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|d| d.id()).collect()
    }

    /// Installs the decorators collected by a dispatch and seals the list.
    ///
    /// Only reachable through [`DecoratorSink::finalize`](crate::DecoratorSink::finalize).
    pub(crate) fn install(&mut self, decorators: impl IntoIterator<Item = Box<dyn Decorator>>) {
        debug_assert!(!self.finalized, "decorator list installed twice");
        self.entries.extend(decorators);
        self.finalized = true;
    }
}
