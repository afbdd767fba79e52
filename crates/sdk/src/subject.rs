//! Subject identity types
//!
//! Subjects live in named collections (`user`, `group`, ...). The core never
//! interprets these values; backends produce them and callers read them.

use std::fmt;

/// Reference to a subject that may or may not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectRef {
    collection: String,
    identifier: String,
}

impl SubjectRef {
    /// Create a reference to `identifier` inside `collection`
    pub fn new(collection: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            identifier: identifier.into(),
        }
    }

    /// Collection type the subject belongs to (e.g. "group")
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Identifier within the collection
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.collection, self.identifier)
    }
}

/// A subject that is currently loaded in memory
///
/// Equality and hashing only consider the reference, so two snapshots of the
/// same subject collapse to one map key.
#[derive(Debug, Clone)]
pub struct Subject {
    reference: SubjectRef,
    friendly_name: Option<String>,
}

impl Subject {
    /// Create a loaded subject snapshot
    pub fn new(reference: SubjectRef) -> Self {
        Self {
            reference,
            friendly_name: None,
        }
    }

    /// Attach a display name (e.g. the last known player name)
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// The subject's reference
    pub fn reference(&self) -> &SubjectRef {
        &self.reference
    }

    /// Display name, if the backend knows one
    pub fn friendly_name(&self) -> Option<&str> {
        self.friendly_name.as_deref()
    }
}

impl PartialEq for Subject {
    fn eq(&self, other: &Self) -> bool {
        self.reference == other.reference
    }
}

impl Eq for Subject {}

impl std::hash::Hash for Subject {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.reference.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_subject_ref_display() {
        let subject = SubjectRef::new("group", "admin");
        assert_eq!(subject.to_string(), "group:admin");
        assert_eq!(subject.collection(), "group");
        assert_eq!(subject.identifier(), "admin");
    }

    #[test]
    fn test_subject_identity_ignores_name() {
        let a = Subject::new(SubjectRef::new("user", "1234")).with_friendly_name("zml");
        let b = Subject::new(SubjectRef::new("user", "1234"));
        assert_eq!(a, b);

        let mut map = HashMap::new();
        map.insert(a, true);
        map.insert(b, false);
        assert_eq!(map.len(), 1);
    }
}
