//! Process-wide events declared with `feature_event!`.

use decorum::{EventConfig, RegistrationError, testing::{RecordingListener, TestRenderer}};

mod common;
use common::RenderContext;

decorum::feature_event!(
    /// Decorations for entity renderers.
    static ENTITY_FEATURES: RenderContext
);
decorum::feature_event!(static STRICT_FEATURES: RenderContext = EventConfig::new().with_reject_duplicates(true));

#[test]
fn test_global_event_lifecycle() {
    let capes = RecordingListener::new().appending("cape");
    ENTITY_FEATURES.register_named("capes", capes.clone()).unwrap();

    let mut renderer = TestRenderer::biped();
    ENTITY_FEATURES
        .dispatch("player", &mut renderer, &RenderContext::default())
        .unwrap();

    assert_eq!(renderer.decorator_ids(), vec!["cape"]);
    assert!(ENTITY_FEATURES.is_sealed());
    assert_eq!(
        ENTITY_FEATURES
            .register_named("late", RecordingListener::new())
            .unwrap_err(),
        RegistrationError::LateRegistration("late".into())
    );
}

#[test]
fn test_global_event_with_config() {
    assert!(STRICT_FEATURES.config().reject_duplicates);
    assert!(STRICT_FEATURES.is_empty());
}
