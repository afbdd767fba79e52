//! In-memory collaborators for tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use permhub_sdk::{Subject, SubjectRef};

use super::{CollectionLoader, SubjectCollection, SubjectError, SubjectResult};

/// Collection backed by a fixed `permission -> subject -> value` table
pub(crate) struct MockCollection {
    identifier: String,
    values: HashMap<String, HashMap<String, bool>>,
    fail_queries: bool,
    queries: AtomicUsize,
}

impl MockCollection {
    pub(crate) fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            values: HashMap::new(),
            fail_queries: false,
            queries: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_holder(mut self, subject: &str, permission: &str, value: bool) -> Self {
        self.values
            .entry(permission.to_string())
            .or_default()
            .insert(subject.to_string(), value);
        self
    }

    pub(crate) fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    fn holders(&self, permission: &str) -> impl Iterator<Item = (SubjectRef, bool)> + '_ {
        self.values
            .get(permission)
            .into_iter()
            .flatten()
            .map(|(subject, value)| (SubjectRef::new(&self.identifier, subject), *value))
    }
}

#[async_trait]
impl SubjectCollection for MockCollection {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    async fn all_with_permission(
        &self,
        permission: &str,
    ) -> SubjectResult<HashMap<SubjectRef, bool>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_queries {
            return Err(SubjectError::QueryFailed {
                collection: self.identifier.clone(),
                permission: permission.to_string(),
                reason: "backend offline".to_string(),
            });
        }
        Ok(self.holders(permission).collect())
    }

    fn loaded_with_permission(&self, permission: &str) -> HashMap<Subject, bool> {
        self.holders(permission)
            .map(|(reference, value)| (Subject::new(reference), value))
            .collect()
    }
}

/// Loader over a fixed set of [`MockCollection`]s
#[derive(Default)]
pub(crate) struct MockLoader {
    collections: HashMap<String, Arc<MockCollection>>,
    loaded: HashSet<String>,
    failing: HashSet<String>,
    hanging: HashSet<String>,
    loads: AtomicUsize,
}

impl MockLoader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_collection(mut self, collection: MockCollection) -> Self {
        self.collections
            .insert(collection.identifier.clone(), Arc::new(collection));
        self
    }

    pub(crate) fn mark_loaded(mut self, identifier: &str) -> Self {
        self.loaded.insert(identifier.to_string());
        self
    }

    pub(crate) fn failing_load(mut self, identifier: &str) -> Self {
        self.failing.insert(identifier.to_string());
        self
    }

    pub(crate) fn hanging_load(mut self, identifier: &str) -> Self {
        self.hanging.insert(identifier.to_string());
        self
    }

    pub(crate) fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub(crate) fn query_count(&self, identifier: &str) -> usize {
        self.collections
            .get(identifier)
            .map(|c| c.queries.load(Ordering::SeqCst))
            .unwrap_or(0)
    }
}

#[async_trait]
impl CollectionLoader for MockLoader {
    async fn load_collection(
        &self,
        collection_type: &str,
    ) -> SubjectResult<Arc<dyn SubjectCollection>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.hanging.contains(collection_type) {
            std::future::pending::<()>().await;
        }
        if self.failing.contains(collection_type) {
            return Err(SubjectError::LoadFailed {
                collection: collection_type.to_string(),
                reason: "storage unavailable".to_string(),
            });
        }
        match self.collections.get(collection_type) {
            Some(collection) => Ok(collection.clone() as Arc<dyn SubjectCollection>),
            None => Err(SubjectError::LoadFailed {
                collection: collection_type.to_string(),
                reason: "unknown collection".to_string(),
            }),
        }
    }

    fn collection(&self, identifier: &str) -> Option<Arc<dyn SubjectCollection>> {
        if !self.loaded.contains(identifier) {
            return None;
        }
        self.collections
            .get(identifier)
            .map(|c| c.clone() as Arc<dyn SubjectCollection>)
    }
}
