//! A failed static install must keep failing instead of reporting success.

#![cfg(feature = "inventory")]

use decorum::{ListenerId, RegistrationError, StaticListener, testing::RecordingListener};

decorum::feature_event!(static EVENT: ());

fn install_first() -> Result<ListenerId, RegistrationError> {
    EVENT.register_named("a_first", RecordingListener::new())
}

fn install_blank() -> Result<ListenerId, RegistrationError> {
    EVENT.register_named(" ", RecordingListener::new())
}

fn install_last() -> Result<ListenerId, RegistrationError> {
    EVENT.register_named("z_last", RecordingListener::new())
}

decorum::inventory::submit! { StaticListener::new("a_first", install_first) }
decorum::inventory::submit! { StaticListener::new("m_blank", install_blank) }
decorum::inventory::submit! { StaticListener::new("z_last", install_last) }

#[test]
fn test_failed_install_keeps_reporting_its_error() {
    let err = decorum::install_static_listeners().unwrap_err();
    assert_eq!(err, RegistrationError::InvalidListener);

    let again = decorum::install_static_listeners().unwrap_err();
    assert_eq!(again, RegistrationError::InvalidListener);

    let names: Vec<String> = EVENT
        .listener_ids()
        .iter()
        .map(|id| id.name().to_owned())
        .collect();
    assert_eq!(names, vec!["a_first"]);
}
