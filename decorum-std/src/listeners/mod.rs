//! Standard listener combinators.
//!
//! The event invokes every listener for every subject. These wrappers put the
//! applicability check in front of a listener so it only runs when the
//! subject or renderer matches.

mod filter;

pub use filter::{ForSubject, When, WithCapabilities};
