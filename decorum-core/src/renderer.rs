//! # Base renderers
//!
//! The base renderer is host-owned: the host builds it, draws with it, and
//! drops it. Decorum only borrows it for the duration of one dispatch.
//!
//! Listeners decide applicability through [`BaseRenderer::capabilities`] or,
//! when they need the concrete type, through
//! [`downcast_ref`](trait.BaseRenderer.html#method.downcast_ref) on
//! `dyn BaseRenderer`.

use crate::{capability::Capabilities, decorator::DecoratorList};
use std::any::Any;

/// Upcast helper so `dyn BaseRenderer` can be downcast to its concrete type.
///
/// Implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A host-owned renderer that decorators attach to.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `BaseRenderer`",
    label = "missing `BaseRenderer` implementation",
    note = "Base renderers must expose their `DecoratorList`."
)]
pub trait BaseRenderer: AsAny + Send + Sync + 'static {
    /// Structural features of the renderer's model.
    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    /// The renderer's decorators.
    fn decorators(&self) -> &DecoratorList;

    /// Mutable access to the renderer's decorators.
    ///
    /// The dispatcher uses this to install decorators at finalization.
    fn decorators_mut(&mut self) -> &mut DecoratorList;
}

impl dyn BaseRenderer {
    /// Returns `true` if the concrete renderer type is `T`.
    pub fn is<T: BaseRenderer>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcast to the concrete renderer type.
    pub fn downcast_ref<T: BaseRenderer>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns `true` if the renderer supports every capability in `required`.
    pub fn supports(&self, required: Capabilities) -> bool {
        self.capabilities().contains(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct PlayerRenderer {
        decorators: DecoratorList,
    }

    impl BaseRenderer for PlayerRenderer {
        fn capabilities(&self) -> Capabilities {
            Capabilities::HUMANOID
        }

        fn decorators(&self) -> &DecoratorList {
            &self.decorators
        }

        fn decorators_mut(&mut self) -> &mut DecoratorList {
            &mut self.decorators
        }
    }

    #[derive(Default)]
    struct SlimeRenderer {
        decorators: DecoratorList,
    }

    impl BaseRenderer for SlimeRenderer {
        fn decorators(&self) -> &DecoratorList {
            &self.decorators
        }

        fn decorators_mut(&mut self) -> &mut DecoratorList {
            &mut self.decorators
        }
    }

    #[test]
    fn test_downcast_to_concrete_renderer() {
        let player = PlayerRenderer::default();
        let renderer: &dyn BaseRenderer = &player;

        assert!(renderer.is::<PlayerRenderer>());
        assert!(renderer.downcast_ref::<PlayerRenderer>().is_some());
        assert!(renderer.downcast_ref::<SlimeRenderer>().is_none());
    }

    #[test]
    fn test_capability_check() {
        let player = PlayerRenderer::default();
        let slime = SlimeRenderer::default();

        assert!((&player as &dyn BaseRenderer).supports(Capabilities::BIPED));
        assert!(!(&slime as &dyn BaseRenderer).supports(Capabilities::BIPED));
        assert!((&slime as &dyn BaseRenderer).supports(Capabilities::empty()));
    }
}
