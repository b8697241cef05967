//! Event configuration.

/// Behavior switches for a [`FeatureEvent`](crate::FeatureEvent).
///
/// # Example
/// ```ignore
/// let event = FeatureEvent::<RenderContext>::with_config(
///     EventConfig::new().with_reject_duplicates(true),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventConfig {
    /// Reject a second decorator with the same id within one dispatch.
    pub reject_duplicates: bool,
    /// Capture listener panics as faults instead of unwinding through the host.
    pub catch_panics: bool,
    /// Seal the event on the first dispatch so later registrations fail.
    pub seal_on_dispatch: bool,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EventConfig {
    /// Default configuration: duplicates allowed, panics caught, sealing on.
    pub const fn new() -> Self {
        Self {
            reject_duplicates: false,
            catch_panics: true,
            seal_on_dispatch: true,
        }
    }

    /// Set duplicate rejection.
    pub const fn with_reject_duplicates(mut self, reject: bool) -> Self {
        self.reject_duplicates = reject;
        self
    }

    /// Set panic capture.
    pub const fn with_catch_panics(mut self, catch: bool) -> Self {
        self.catch_panics = catch;
        self
    }

    /// Set sealing on first dispatch.
    ///
    /// Turn this off only when the host's load order already guarantees
    /// registration finishes before rendering starts.
    pub const fn with_seal_on_dispatch(mut self, seal: bool) -> Self {
        self.seal_on_dispatch = seal;
        self
    }
}
