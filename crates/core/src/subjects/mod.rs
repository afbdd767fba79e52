//! Subject collections and permission holder resolution
//!
//! The core does not store subjects. Backends expose them through two narrow
//! traits:
//!
//! - [`CollectionLoader`] - loads (possibly from I/O) a named collection and
//!   hands out collections that are already in memory
//! - [`SubjectCollection`] - answers "who holds this permission" either for
//!   every subject (async) or only for loaded subjects (sync)
//!
//! [`SubjectResolver`] composes the two so a permission id can be turned into
//! a `subject -> bool` map.
//!
//! # Architecture
//!
//! ```text
//! PermissionDescription ──► SubjectResolver ──► CollectionLoader
//!                                 │                   │ load_collection("group")
//!                                 │                   ▼
//!                                 └──────────► SubjectCollection
//!                                              all_with_permission(id)
//! ```

mod resolver;
#[cfg(test)]
pub(crate) mod testing;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use permhub_sdk::{Subject, SubjectRef};

pub use resolver::SubjectResolver;

/// Errors raised by subject collection backends
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    /// The backend could not load the requested collection
    #[error("Failed to load subject collection '{collection}': {reason}")]
    LoadFailed { collection: String, reason: String },

    /// The collection was loaded but the permission query failed
    #[error("Failed to query '{collection}' for '{permission}': {reason}")]
    QueryFailed {
        collection: String,
        permission: String,
        reason: String,
    },
}

/// Result type for subject queries
pub type SubjectResult<T> = Result<T, SubjectError>;

/// A named set of subjects that can be searched for permission holders
#[async_trait]
pub trait SubjectCollection: Send + Sync {
    /// Collection identifier (e.g. "user", "group")
    fn identifier(&self) -> &str;

    /// Find every subject (loaded or not) with an explicit value for `permission`
    async fn all_with_permission(&self, permission: &str)
        -> SubjectResult<HashMap<SubjectRef, bool>>;

    /// Find loaded subjects with an explicit value for `permission`
    fn loaded_with_permission(&self, permission: &str) -> HashMap<Subject, bool>;
}

/// Source of subject collections
#[async_trait]
pub trait CollectionLoader: Send + Sync {
    /// Load the collection of the given type, performing I/O if needed
    async fn load_collection(&self, collection_type: &str)
        -> SubjectResult<Arc<dyn SubjectCollection>>;

    /// Get a collection only if it is already loaded
    fn collection(&self, identifier: &str) -> Option<Arc<dyn SubjectCollection>>;
}
