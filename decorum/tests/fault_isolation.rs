//! A faulting listener must not break the other listeners or the renderer.

use decorum::{
    BaseRenderer, ContextError, Decorator, EventConfig, FeatureEvent, FaultKind,
    RegistrationHandle,
    reporters::CollectingReporter,
    testing::{FailingListener, RecordingListener},
};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

mod common;
use common::{Named, PlayerRenderer, RenderContext, ids};

#[test]
fn test_fault_does_not_stop_later_listeners() {
    let reporter = CollectingReporter::new();
    let event = FeatureEvent::<RenderContext>::new().with_reporter(reporter.clone());

    let before = RecordingListener::new().appending("before");
    let broken = FailingListener::new("model layer missing");
    let after = RecordingListener::new().appending("after");
    event.register_named("before", before.clone()).unwrap();
    event.register_named("broken", broken.clone()).unwrap();
    event.register_named("after", after.clone()).unwrap();

    let mut renderer = PlayerRenderer::default();
    let report = event
        .dispatch("player", &mut renderer, &RenderContext::default())
        .unwrap();

    assert_eq!(broken.call_count(), 1);
    assert_eq!(after.call_count(), 1, "Listener after the fault should still run");
    assert_eq!(ids(&renderer), vec!["before", "after"]);

    let records = reporter.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].listener.name(), "broken");
    assert_eq!(records[0].listener.index(), 1);
    assert_eq!(records[0].message, "model layer missing");
    assert_eq!(report.faults.len(), 1);
}

#[test]
fn test_panicking_listener_is_contained() {
    let reporter = CollectingReporter::new();
    let event = FeatureEvent::<RenderContext>::new().with_reporter(reporter.clone());
    event
        .register_named("panics", FailingListener::panicking("index out of range"))
        .unwrap();
    event
        .register_named("fine", RecordingListener::new().appending("fine"))
        .unwrap();

    let mut renderer = PlayerRenderer::default();
    let report = event
        .dispatch("player", &mut renderer, &RenderContext::default())
        .unwrap();

    assert_eq!(ids(&renderer), vec!["fine"]);
    assert!(report.faults[0].is_panic());
    assert!(reporter.records()[0].panicked);
}

#[test]
fn test_duplicate_decorator_surfaces_as_fault() {
    let event = FeatureEvent::<RenderContext>::with_config(
        EventConfig::new().with_reject_duplicates(true),
    );
    event
        .register_named("first", RecordingListener::new().appending("horns"))
        .unwrap();
    event
        .register_named("second", RecordingListener::new().appending("horns"))
        .unwrap();

    let mut renderer = PlayerRenderer::default();
    let report = event
        .dispatch("player", &mut renderer, &RenderContext::default())
        .unwrap();

    assert_eq!(ids(&renderer), vec!["horns"]);
    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].listener.name(), "second");
    match &report.faults[0].kind {
        FaultKind::Error(err) => assert_eq!(
            err.to_string(),
            "decorator `horns` was already appended in this dispatch"
        ),
        other => panic!("unexpected fault: {other}"),
    }
}

#[test]
fn test_duplicates_allowed_by_default() {
    let event = FeatureEvent::<RenderContext>::new();
    event
        .register_fn_named("twice", |_, _, registration, _| {
            registration.append(Named::new("glint"))?;
            registration.append(Named::new("glint"))?;
            Ok(())
        })
        .unwrap();

    let mut renderer = PlayerRenderer::default();
    event
        .dispatch("player", &mut renderer, &RenderContext::default())
        .unwrap();

    assert_eq!(ids(&renderer), vec!["glint", "glint"]);
}

#[test]
fn test_stale_handle_after_dispatch() {
    let kept: Arc<Mutex<Option<RegistrationHandle>>> = Arc::default();
    let slot = kept.clone();
    let event = FeatureEvent::<RenderContext>::new();
    event
        .register_fn_named("leaky", move |_, _, registration, _| {
            let handle = registration.handle();
            handle.append(Named::new("via_handle"))?;
            *slot.lock().unwrap() = Some(handle);
            Ok(())
        })
        .unwrap();

    let mut renderer = PlayerRenderer::default();
    event
        .dispatch("player", &mut renderer, &RenderContext::default())
        .unwrap();
    assert_eq!(ids(&renderer), vec!["via_handle"]);

    let handle = kept.lock().unwrap().take().unwrap();
    assert!(!handle.is_active());
    let err = handle.append(Named::new("too_late")).unwrap_err();
    assert_eq!(err, ContextError::Stale("player".into()));
    assert_eq!(ids(&renderer), vec!["via_handle"]);
}

/// Panics when attached to a renderer.
struct Brittle;

impl Decorator for Brittle {
    fn id(&self) -> &str {
        "brittle"
    }

    fn applies(&self, _renderer: &dyn BaseRenderer) -> bool {
        true
    }

    fn attach(&mut self, _renderer: &dyn BaseRenderer) {
        panic!("bone `cape_anchor` missing");
    }
}

#[test]
fn test_panicking_attach_drops_only_that_decorator() {
    let reporter = CollectingReporter::new();
    let event = FeatureEvent::<RenderContext>::new().with_reporter(reporter.clone());
    event
        .register_fn_named("good", |_, _, registration, _| {
            registration.append(Named::new("good"))?;
            Ok(())
        })
        .unwrap();
    event
        .register_fn_named("bad", |_, _, registration, _| {
            registration.append(Brittle)?;
            registration.append(Named::new("sound"))?;
            Ok(())
        })
        .unwrap();

    let mut renderer = PlayerRenderer::default();
    let report = event
        .dispatch("player", &mut renderer, &RenderContext::default())
        .unwrap();

    assert_eq!(ids(&renderer), vec!["good", "sound"]);
    assert!(renderer.decorators.is_finalized());
    assert_eq!(report.attached, 2);

    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].listener.name(), "bad");
    match &report.faults[0].kind {
        FaultKind::AttachPanic { decorator, message } => {
            assert_eq!(decorator, "brittle");
            assert_eq!(message, "bone `cape_anchor` missing");
        }
        other => panic!("unexpected fault: {other}"),
    }
    assert!(reporter.records()[0].panicked);
}

#[test]
fn test_handle_of_faulted_listener_cannot_append() {
    let leaked: Arc<Mutex<Option<RegistrationHandle>>> = Arc::default();
    let worker: Arc<Mutex<Option<JoinHandle<()>>>> = Arc::default();
    let smuggle_rejected = Arc::new(AtomicBool::new(false));

    let event = FeatureEvent::<RenderContext>::new();
    {
        let leaked = leaked.clone();
        let worker = worker.clone();
        event
            .register_fn_named("c", move |_, _, registration, _| {
                let handle = registration.handle();
                *leaked.lock().unwrap() = Some(handle.clone());
                *worker.lock().unwrap() = Some(thread::spawn(move || {
                    let _ = handle.append(Named::new("from_faulted_c"));
                }));
                Err("c gave up".into())
            })
            .unwrap();
    }
    {
        let smuggle_rejected = smuggle_rejected.clone();
        event
            .register_fn_named("d", move |_, _, registration, _| {
                if let Some(worker) = worker.lock().unwrap().take() {
                    worker.join().unwrap();
                }
                if let Some(handle) = leaked.lock().unwrap().as_ref() {
                    let rejected = matches!(
                        handle.append(Named::new("smuggled")),
                        Err(ContextError::Stale(_))
                    );
                    smuggle_rejected.store(rejected, Ordering::SeqCst);
                }
                registration.append(Named::new("Z"))?;
                Ok(())
            })
            .unwrap();
    }

    let mut renderer = PlayerRenderer::default();
    let report = event
        .dispatch("player", &mut renderer, &RenderContext::default())
        .unwrap();

    assert_eq!(report.faults.len(), 1);
    assert_eq!(ids(&renderer), vec!["Z"]);
    assert!(smuggle_rejected.load(Ordering::SeqCst));
}
