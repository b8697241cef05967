//! # decorum-std
//!
//! Standard implementations for the Decorum feature-decorator registration framework.
//!
//! This crate provides:
//! - **Event**: [`FeatureEvent`], the ordered, sealable listener registry
//! - **Dispatch**: [`DispatchCycle`] and [`DispatchReport`]
//! - **Reporters**: [`TracingReporter`], [`CollectingReporter`]
//! - **Listeners**: [`ForSubject`], [`WithCapabilities`], [`When`]
//! - **Static listeners** (feature `inventory`): link-time submission

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use decorum_core;

// Modules
pub mod config;
pub mod dispatcher;
pub mod event;
pub mod listeners;
pub mod reporters;
#[cfg(feature = "inventory")]
pub mod static_listeners;
pub mod testing;

pub use config::EventConfig;
pub use dispatcher::{DispatchCycle, DispatchReport, DispatchState};
pub use event::{FeatureEvent, ListenerEntry};
pub use listeners::{ForSubject, When, WithCapabilities};
pub use reporters::{CollectingReporter, FaultRecord, FaultReporter, TracingReporter};

#[cfg(feature = "inventory")]
pub use inventory;
