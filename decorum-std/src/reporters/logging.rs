//! Tracing-backed fault reporter.

use super::FaultReporter;
use decorum_core::ListenerFault;

/// Reports faults as `tracing` error events.
///
/// This is the default reporter of every [`FeatureEvent`](crate::FeatureEvent).
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl FaultReporter for TracingReporter {
    fn report(&self, fault: &ListenerFault) {
        tracing::error!(
            listener = %fault.listener,
            subject = %fault.subject,
            panicked = fault.is_panic(),
            error = %fault.kind,
            "feature listener faulted; continuing dispatch"
        );
    }
}
