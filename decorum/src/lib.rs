//! # decorum - Feature-Decorator Registration Events
//!
//! `decorum` is the extension point that lets independent extensions attach
//! visual "feature" decorators (armor layers, capes, overlays) to the base
//! renderers a host engine builds. Listeners are registered once at startup;
//! the host dispatches once per constructed base renderer; the renderer ends
//! up with the ordered decorators every listener contributed.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use decorum::prelude::*;
//!
//! decorum::feature_event!(pub static FEATURES: RenderContext);
//!
//! // Startup: extensions register.
//! FEATURES.register_fn_named("capes", |subject, renderer, registration, _ctx| {
//!     if renderer.supports(Capabilities::BIPED) {
//!         registration.append(Cape::default())?;
//!     }
//!     Ok(())
//! })?;
//!
//! // Renderer construction: the host dispatches, then draws with the decorators.
//! let report = FEATURES.dispatch("player", &mut player_renderer, &ctx)?;
//! for fault in &report.faults {
//!     show_extension_error(fault);
//! }
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use decorum_core::{
    // Renderer contracts
    AsAny,
    BaseRenderer,
    // Error types
    BoxError,
    Capabilities,
    ContextError,
    // Decorators
    Decorator,
    DecoratorList,
    DecoratorSink,
    DecorumError,
    DispatchError,
    FaultKind,
    // Listener
    FeatureListener,
    FnListener,
    ListenerFault,
    ListenerId,
    // Registration
    Registration,
    RegistrationError,
    RegistrationHandle,
    SubjectType,
};

pub use decorum_std::{
    DispatchCycle, DispatchReport, DispatchState, EventConfig, FeatureEvent, ListenerEntry,
};

/// Fault reporters.
pub mod reporters {
    pub use decorum_std::reporters::{
        CollectingReporter, FaultRecord, FaultReporter, TracingReporter,
    };
}

/// Standard listener combinators.
pub mod listeners {
    pub use decorum_std::listeners::{ForSubject, When, WithCapabilities};
}

/// Testing utilities.
pub mod testing {
    pub use decorum_std::testing::{
        CallJournal, FailingListener, RecordingListener, TagDecorator, TestRenderer,
    };
}

#[cfg(feature = "inventory")]
pub use decorum_std::static_listeners::{StaticListener, install_static_listeners};

#[cfg(feature = "inventory")]
pub use inventory;

#[cfg(feature = "macros")]
pub use decorum_macros::feature_listener;

/// Declares a process-wide [`FeatureEvent`] as a lazily initialized static.
///
/// ```rust,ignore
/// decorum::feature_event!(pub static FEATURES: RenderContext);
/// decorum::feature_event!(static STRICT: RenderContext = EventConfig::new().with_reject_duplicates(true));
/// ```
#[macro_export]
macro_rules! feature_event {
    ($(#[$meta:meta])* $vis:vis static $name:ident : $ctx:ty) => {
        $(#[$meta])*
        $vis static $name: ::std::sync::LazyLock<$crate::FeatureEvent<$ctx>> =
            ::std::sync::LazyLock::new($crate::FeatureEvent::new);
    };
    ($(#[$meta:meta])* $vis:vis static $name:ident : $ctx:ty = $config:expr) => {
        $(#[$meta])*
        $vis static $name: ::std::sync::LazyLock<$crate::FeatureEvent<$ctx>> =
            ::std::sync::LazyLock::new(|| $crate::FeatureEvent::with_config($config));
    };
}

/// Prelude module - common imports for Decorum.
///
/// # Usage
///
/// ```rust,ignore
/// use decorum::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BaseRenderer, BoxError, Capabilities, ContextError, Decorator, DecoratorList,
        DispatchReport, EventConfig, FeatureEvent, FeatureListener, Registration, SubjectType,
        listeners::{ForSubject, When, WithCapabilities},
    };
}
