//! Link-time listener submission.
//!
//! Extensions that cannot call `register` from an explicit init function can
//! submit a [`StaticListener`] with `inventory`. The host installs every
//! submission once at startup with [`install_static_listeners`], before the
//! first dispatch.
//!
//! Link order is not stable, so submissions are installed sorted by name.

use decorum_core::{ListenerId, RegistrationError};
use std::sync::{Mutex, PoisonError};

/// A listener submitted at link time.
///
/// Usually generated by the `#[feature_listener]` attribute.
pub struct StaticListener {
    name: &'static str,
    install: fn() -> Result<ListenerId, RegistrationError>,
}

impl StaticListener {
    /// Create a submission. `install` registers the listener with its event.
    pub const fn new(
        name: &'static str,
        install: fn() -> Result<ListenerId, RegistrationError>,
    ) -> Self {
        Self { name, install }
    }

    /// The submission's name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

inventory::collect!(StaticListener);

static OUTCOME: Mutex<Option<Result<(), RegistrationError>>> = Mutex::new(None);

/// Install every submitted [`StaticListener`], in name order.
///
/// Stops at the first registration error. Only the first call installs
/// anything: after a successful install later calls return an empty list,
/// after a failed one they return the same error again.
pub fn install_static_listeners() -> Result<Vec<ListenerId>, RegistrationError> {
    let mut outcome = OUTCOME.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(previous) = outcome.as_ref() {
        tracing::debug!(ok = previous.is_ok(), "static feature listeners already installed");
        return previous.clone().map(|()| Vec::new());
    }

    let mut submissions: Vec<&StaticListener> = inventory::iter::<StaticListener>.into_iter().collect();
    submissions.sort_by_key(|submission| submission.name);

    let installed = submissions
        .into_iter()
        .map(|submission| {
            (submission.install)().inspect_err(|err| {
                tracing::warn!(listener = submission.name, error = %err, "static feature listener failed to install");
            })
        })
        .collect::<Result<Vec<_>, _>>();
    *outcome = Some(installed.as_ref().map(|_| ()).map_err(RegistrationError::clone));

    let ids = installed?;
    tracing::debug!(count = ids.len(), "installed static feature listeners");
    Ok(ids)
}
