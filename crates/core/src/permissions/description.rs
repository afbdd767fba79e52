//! Registered permission descriptions

use std::collections::HashMap;

use permhub_sdk::{OwnerRef, Subject, SubjectRef};

use crate::subjects::{SubjectResolver, SubjectResult};

/// Immutable description of a permission node
///
/// Created by [`DescriptionBuilder::register`](super::DescriptionBuilder::register).
/// Holds a handle to the registry's resolver so it can answer "who holds
/// this permission" on its own.
#[derive(Debug, Clone)]
pub struct PermissionDescription {
    id: String,
    description: Option<String>,
    owner: Option<OwnerRef>,
    resolver: SubjectResolver,
}

impl PermissionDescription {
    pub(crate) fn new(
        id: String,
        description: Option<String>,
        owner: Option<OwnerRef>,
        resolver: SubjectResolver,
    ) -> Self {
        Self {
            id,
            description,
            owner,
            resolver,
        }
    }

    /// Permission id (e.g. "server.kick")
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human readable description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Component that registered this permission, `None` for system permissions
    pub fn owner(&self) -> Option<&OwnerRef> {
        self.owner.as_ref()
    }

    /// Find every subject of `collection_type` with a value for this permission
    ///
    /// Loads the collection first. Fails if either the load or the query
    /// fails; the query is never started without a loaded collection.
    pub async fn find_assigned_subjects(
        &self,
        collection_type: &str,
    ) -> SubjectResult<HashMap<SubjectRef, bool>> {
        self.resolver.find_assigned(&self.id, collection_type).await
    }

    /// Same as [`find_assigned_subjects`](Self::find_assigned_subjects) over
    /// several collection types at once
    pub async fn find_assigned_subjects_across(
        &self,
        collection_types: &[&str],
    ) -> SubjectResult<HashMap<String, HashMap<SubjectRef, bool>>> {
        self.resolver
            .find_assigned_across(&self.id, collection_types)
            .await
    }

    /// Loaded subjects of `collection_identifier` with a value for this permission
    ///
    /// Empty if the collection is not loaded.
    pub fn assigned_subjects(&self, collection_identifier: &str) -> HashMap<Subject, bool> {
        self.resolver.assigned(&self.id, collection_identifier)
    }
}
