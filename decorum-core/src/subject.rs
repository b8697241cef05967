//! Subject descriptors.
//!
//! A [`SubjectType`] is the host-supplied tag naming the family of base
//! renderers being constructed (analogous to an entity type). Together with a
//! renderer's [`Capabilities`](crate::Capabilities) it is everything a listener
//! needs to decide whether its decorators apply.

use std::{borrow::Borrow, fmt, sync::Arc};

/// The type tag of a subject whose base renderer is being decorated.
///
/// Cheap to clone; compares by tag contents.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectType(Arc<str>);

impl SubjectType {
    /// Create a subject type from a tag.
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(Arc::from(tag.as_ref()))
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this subject carries the given tag.
    pub fn is(&self, tag: &str) -> bool {
        &*self.0 == tag
    }
}

impl fmt::Debug for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SubjectType").field(&&*self.0).finish()
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for SubjectType {
    fn from(tag: String) -> Self {
        Self(Arc::from(tag))
    }
}

impl AsRef<str> for SubjectType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SubjectType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SubjectType {
    fn eq(&self, other: &str) -> bool {
        self.is(other)
    }
}

impl PartialEq<&str> for SubjectType {
    fn eq(&self, other: &&str) -> bool {
        self.is(other)
    }
}
