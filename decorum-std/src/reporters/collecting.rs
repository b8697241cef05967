//! In-memory fault reporter.

use super::FaultReporter;
use decorum_core::{ListenerFault, ListenerId, SubjectType};
use std::sync::{Arc, Mutex, PoisonError};

/// A caught fault, detached from its error source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultRecord {
    /// The listener that faulted.
    pub listener: ListenerId,
    /// The subject being dispatched.
    pub subject: SubjectType,
    /// The rendered error message.
    pub message: String,
    /// Whether the listener panicked.
    pub panicked: bool,
}

impl From<&ListenerFault> for FaultRecord {
    fn from(fault: &ListenerFault) -> Self {
        Self {
            listener: fault.listener.clone(),
            subject: fault.subject.clone(),
            message: fault.kind.to_string(),
            panicked: fault.is_panic(),
        }
    }
}

/// Collects fault records in memory and forwards them to an inner reporter.
///
/// Clones share the same record buffer, so hosts can keep one clone to show
/// extension errors in their own UI.
pub struct CollectingReporter<R = super::TracingReporter> {
    records: Arc<Mutex<Vec<FaultRecord>>>,
    inner: Option<Arc<R>>,
}

impl<R> Clone for CollectingReporter<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            inner: self.inner.clone(),
        }
    }
}

impl CollectingReporter {
    /// Create a reporter that only collects.
    pub fn new() -> Self {
        Self {
            records: Arc::default(),
            inner: None,
        }
    }
}

impl Default for CollectingReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: FaultReporter> CollectingReporter<R> {
    /// Create a reporter that collects and also forwards to `inner`.
    pub fn forwarding(inner: R) -> Self {
        Self {
            records: Arc::default(),
            inner: Some(Arc::new(inner)),
        }
    }

    /// A copy of the collected records.
    pub fn records(&self) -> Vec<FaultRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of collected records.
    pub fn count(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Remove all collected records.
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<R: FaultReporter> FaultReporter for CollectingReporter<R> {
    fn report(&self, fault: &ListenerFault) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(FaultRecord::from(fault));
        if let Some(inner) = &self.inner {
            inner.report(fault);
        }
    }
}
