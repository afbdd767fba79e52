//! Owner identity for registered permissions

use std::fmt;

/// Opaque identity of the component that registered something
///
/// Attached to permission descriptions for display only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerRef {
    id: String,
    version: Option<String>,
}

impl OwnerRef {
    /// Create an owner from its identifier (e.g. a plugin id)
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: None,
        }
    }

    /// Attach a version string
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Owner identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Owner version, if known
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} v{}", self.id, version),
            None => f.write_str(&self.id),
        }
    }
}
