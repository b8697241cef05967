//! Fault reporting.
//!
//! A faulting listener never aborts a dispatch. Its fault is handed to the
//! event's [`FaultReporter`], which forwards it to the host's diagnostic
//! channel, and collected in the [`DispatchReport`](crate::DispatchReport).

mod collecting;
mod logging;

pub use collecting::{CollectingReporter, FaultRecord};
pub use logging::TracingReporter;

use decorum_core::ListenerFault;

/// Receives listener faults as they are caught.
pub trait FaultReporter: Send + Sync + 'static {
    /// Report one caught fault.
    fn report(&self, fault: &ListenerFault);
}

impl<F> FaultReporter for F
where
    F: Fn(&ListenerFault) + Send + Sync + 'static,
{
    fn report(&self, fault: &ListenerFault) {
        self(fault)
    }
}
