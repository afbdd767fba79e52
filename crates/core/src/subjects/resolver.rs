//! Permission holder resolution across subject collections

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use permhub_sdk::{Subject, SubjectRef};
use futures::future::try_join_all;

use super::{CollectionLoader, SubjectCollection, SubjectError, SubjectResult};

/// Resolves which subjects hold a permission
///
/// Cheap to clone; every clone shares the same loader.
#[derive(Clone)]
pub struct SubjectResolver {
    loader: Arc<dyn CollectionLoader>,
}

impl SubjectResolver {
    /// Create a resolver backed by `loader`
    pub fn new(loader: Arc<dyn CollectionLoader>) -> Self {
        Self { loader }
    }

    /// Load `collection_type`, then query it for holders of `permission`
    ///
    /// The query only starts once the load has completed. If the load fails
    /// the error is returned as-is and the collection is never queried;
    /// dropping the returned future before the load finishes has the same
    /// effect.
    pub async fn find_assigned(
        &self,
        permission: &str,
        collection_type: &str,
    ) -> SubjectResult<HashMap<SubjectRef, bool>> {
        let collection = self.loader.load_collection(collection_type).await?;
        tracing::trace!(
            "Querying '{}' for holders of '{}'",
            collection.identifier(),
            permission
        );
        collection.all_with_permission(permission).await
    }

    /// Query an already-loaded collection for holders of `permission`
    ///
    /// Returns an empty map when the collection is not loaded.
    pub fn assigned(&self, permission: &str, collection_identifier: &str) -> HashMap<Subject, bool> {
        self.loader
            .collection(collection_identifier)
            .map(|collection| collection.loaded_with_permission(permission))
            .unwrap_or_default()
    }

    /// Resolve holders of `permission` in several collections concurrently
    ///
    /// Each distinct collection type is resolved once. The lookups are polled
    /// together on the caller's executor; nothing is spawned. The first
    /// failure is returned and the remaining lookups are dropped.
    pub async fn find_assigned_across(
        &self,
        permission: &str,
        collection_types: &[&str],
    ) -> SubjectResult<HashMap<String, HashMap<SubjectRef, bool>>> {
        let unique: BTreeSet<&str> = collection_types.iter().copied().collect();

        let lookups = unique.into_iter().map(move |collection_type| async move {
            let holders = self.find_assigned(permission, collection_type).await?;
            Ok::<_, SubjectError>((collection_type.to_string(), holders))
        });

        Ok(try_join_all(lookups).await?.into_iter().collect())
    }
}

impl fmt::Debug for SubjectResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjectResolver").finish_non_exhaustive()
    }
}
