#![allow(dead_code)]

use decorum::{
    BaseRenderer, BoxError, Capabilities, Decorator, DecoratorList, Registration, SubjectType,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Host Types
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct RenderContext {
    pub texture_pack: String,
}

impl RenderContext {
    pub fn new(texture_pack: &str) -> Self {
        Self {
            texture_pack: texture_pack.to_string(),
        }
    }
}

#[derive(Default)]
pub struct PlayerRenderer {
    pub decorators: DecoratorList,
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
pub struct SpiderRenderer {
    pub decorators: DecoratorList,
}

impl BaseRenderer for SpiderRenderer {
    fn capabilities(&self) -> Capabilities {
        Capabilities::HEAD
    }

    fn decorators(&self) -> &DecoratorList {
        &self.decorators
    }

    fn decorators_mut(&mut self) -> &mut DecoratorList {
        &mut self.decorators
    }
}

pub fn ids(renderer: &dyn BaseRenderer) -> Vec<String> {
    renderer
        .decorators()
        .iter()
        .map(|d| d.id().to_string())
        .collect()
}

// ============================================================================
// Decorators
// ============================================================================

pub struct Named {
    pub name: String,
    pub texture: Option<String>,
}

impl Named {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            texture: None,
        }
    }
}

impl Decorator for Named {
    fn id(&self) -> &str {
        &self.name
    }

    fn applies(&self, _renderer: &dyn BaseRenderer) -> bool {
        true
    }

    fn attach(&mut self, _renderer: &dyn BaseRenderer) {}
}

pub struct Cape;

impl Decorator for Cape {
    fn id(&self) -> &str {
        "cape"
    }

    fn applies(&self, renderer: &dyn BaseRenderer) -> bool {
        renderer.supports(Capabilities::BIPED)
    }

    fn attach(&mut self, renderer: &dyn BaseRenderer) {
        assert!(renderer.is::<PlayerRenderer>());
    }
}

// ============================================================================
// Listeners
// ============================================================================

/// Appends `tag` and logs `label` into a shared order log.
pub fn ordered(
    label: &'static str,
    appends: usize,
    order: Arc<Mutex<Vec<&'static str>>>,
) -> impl Fn(&SubjectType, &dyn BaseRenderer, &mut Registration<'_>, &RenderContext) -> Result<(), BoxError>
+ Send
+ Sync
+ 'static {
    move |_subject, _renderer, registration, _ctx| {
        order.lock().unwrap().push(label);
        for i in 0..appends {
            registration.append(Named::new(&format!("{label}{i}")))?;
        }
        Ok(())
    }
}
