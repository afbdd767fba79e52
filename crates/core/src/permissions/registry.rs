//! Permission registry - storage for descriptions and rank assignments
//!
//! The registry is an owned service object. It is mutated through `&mut`
//! only, so callers that share it across threads wrap it themselves.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use permhub_sdk::OwnerRef;

use super::builder::DescriptionBuilder;
use super::description::PermissionDescription;
use super::types::{RankAssignment, RankTable, RankTemplateSink};
use crate::subjects::{CollectionLoader, SubjectResolver};

/// Registered permission descriptions keyed by id, plus their rank assignments
pub struct PermissionRegistry {
    /// Shared with every registered description
    resolver: SubjectResolver,

    /// Description id -> description
    descriptions: HashMap<String, PermissionDescription>,

    /// Description id -> rank template -> power
    rank_assignments: HashMap<String, RankTable>,

    /// Rank templates that exist system-wide
    defined_ranks: HashSet<String>,

    /// Where assignments are applied once their template exists
    sink: Option<Box<dyn RankTemplateSink>>,
}

impl PermissionRegistry {
    /// Create an empty registry resolving subjects through `loader`
    pub fn new(loader: Arc<dyn CollectionLoader>) -> Self {
        Self {
            resolver: SubjectResolver::new(loader),
            descriptions: HashMap::new(),
            rank_assignments: HashMap::new(),
            defined_ranks: HashSet::new(),
            sink: None,
        }
    }

    /// Resolver handed to registered descriptions
    pub fn resolver(&self) -> &SubjectResolver {
        &self.resolver
    }

    // ========================================================================
    // Mutation APIs
    // ========================================================================

    /// Start building a description owned by `owner`
    ///
    /// # Arguments
    /// * `owner` - Registering component, `None` for system permissions
    ///
    /// # Example
    /// ```ignore
    /// let kick = registry
    ///     .builder(Some(OwnerRef::new("moderation")))
    ///     .id("moderation.kick")?
    ///     .description("Kick a player")?
    ///     .assign("moderator", true)
    ///     .register()?;
    /// ```
    pub fn builder(&mut self, owner: Option<OwnerRef>) -> DescriptionBuilder<'_> {
        DescriptionBuilder::new(self, owner)
    }

    /// Install the receiver for rank assignments
    ///
    /// Assignments for templates that are already defined are not replayed;
    /// call [`define_rank`](Self::define_rank) again to re-apply them.
    ///
    /// # Arguments
    /// * `sink` - Receiver called once per applied (template, permission, power)
    pub fn set_rank_sink(&mut self, sink: impl RankTemplateSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Store a description and merge its rank assignments
    ///
    /// A description with the same id is replaced. Assignments merge into the
    /// existing table for that id, overwriting per template. Assignments for
    /// templates that are already defined are applied right away.
    ///
    /// # Arguments
    /// * `description` - The description to store, keyed by its id
    /// * `ranks` - Rank template -> power assignments for this permission
    pub fn register(&mut self, description: PermissionDescription, ranks: RankTable) {
        let id = description.id().to_string();

        if self.descriptions.insert(id.clone(), description).is_some() {
            tracing::warn!("Permission '{}' registered again, replacing description", id);
        } else {
            tracing::debug!("Registered permission: {}", id);
        }

        if ranks.is_empty() {
            return;
        }

        if let Some(sink) = self.sink.as_mut() {
            for (template, power) in ranks.iter() {
                if self.defined_ranks.contains(template) {
                    sink.apply(template, &id, *power);
                }
            }
        }

        self.rank_assignments
            .entry(id)
            .or_default()
            .extend(ranks);
    }

    /// Mark `template` as defined and apply every assignment recorded for it
    ///
    /// # Arguments
    /// * `template` - Rank template id (e.g. "moderator")
    ///
    /// # Returns
    /// The number of assignments applied, `0` if no sink is installed
    pub fn define_rank(&mut self, template: &str) -> usize {
        self.defined_ranks.insert(template.to_string());

        let assignments = self.assignments_for_template(template);
        if let Some(sink) = self.sink.as_mut() {
            for assignment in &assignments {
                sink.apply(&assignment.template, &assignment.permission, assignment.power);
            }
            tracing::debug!(
                "Applied {} permission(s) to rank template '{}'",
                assignments.len(),
                template
            );
            assignments.len()
        } else {
            tracing::debug!("Rank template '{}' defined without a rank sink", template);
            0
        }
    }

    // ========================================================================
    // Query APIs
    // ========================================================================

    /// Check if `template` has been defined
    pub fn is_rank_defined(&self, template: &str) -> bool {
        self.defined_ranks.contains(template)
    }

    /// Get a description by id
    pub fn description(&self, id: &str) -> Option<&PermissionDescription> {
        self.descriptions.get(id)
    }

    /// Iterate over all registered descriptions
    pub fn descriptions(&self) -> impl Iterator<Item = &PermissionDescription> {
        self.descriptions.values()
    }

    /// Rank assignments registered for a permission
    ///
    /// # Arguments
    /// * `permission` - The permission id
    ///
    /// # Returns
    /// Template -> power, empty if the permission has no assignments
    pub fn rank_assignments(&self, permission: &str) -> RankTable {
        self.rank_assignments
            .get(permission)
            .cloned()
            .unwrap_or_default()
    }

    /// Every assignment targeting `template`, sorted by permission id
    pub fn assignments_for_template(&self, template: &str) -> Vec<RankAssignment> {
        let mut assignments: Vec<RankAssignment> = self
            .rank_assignments
            .iter()
            .filter_map(|(permission, ranks)| {
                ranks
                    .get(template)
                    .map(|power| RankAssignment::new(permission.as_str(), template, *power))
            })
            .collect();
        assignments.sort_by(|a, b| a.permission.cmp(&b.permission));
        assignments
    }

    /// Get the number of registered descriptions
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    /// Check if no descriptions are registered
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}
