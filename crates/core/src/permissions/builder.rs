//! Builder for permission descriptions

use permhub_sdk::OwnerRef;

use super::description::PermissionDescription;
use super::registry::PermissionRegistry;
use super::types::{power_for, RankTable};
use super::{PermissionError, PermissionResult};

/// Validates and registers a [`PermissionDescription`]
///
/// `id` and `description` are required. Rank assignments are optional and
/// only reach the registry when [`register`](Self::register) is called,
/// which consumes the builder.
///
/// # Example
///
/// ```ignore
/// let kick = registry
///     .builder(Some(OwnerRef::new("moderation")))
///     .id("moderation.kick")?
///     .description("Kick a player from the server")?
///     .assign("moderator", true)
///     .assign_power("admin", 10)
///     .register()?;
/// ```
#[must_use = "a builder does nothing until `register` is called"]
pub struct DescriptionBuilder<'r> {
    registry: &'r mut PermissionRegistry,
    owner: Option<OwnerRef>,
    id: Option<String>,
    description: Option<String>,
    ranks: RankTable,
}

impl<'r> DescriptionBuilder<'r> {
    pub(crate) fn new(registry: &'r mut PermissionRegistry, owner: Option<OwnerRef>) -> Self {
        Self {
            registry,
            owner,
            id: None,
            description: None,
            ranks: RankTable::new(),
        }
    }

    /// Set the permission id (last call wins)
    ///
    /// Fails with [`PermissionError::InvalidArgument`] for an empty id.
    pub fn id(mut self, id: impl Into<String>) -> PermissionResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PermissionError::InvalidArgument("id"));
        }
        self.id = Some(id);
        Ok(self)
    }

    /// Set the human readable description
    ///
    /// Fails with [`PermissionError::InvalidArgument`] for an empty description.
    pub fn description(mut self, description: impl Into<String>) -> PermissionResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(PermissionError::InvalidArgument("description"));
        }
        self.description = Some(description);
        Ok(self)
    }

    /// Grant (`true`, power 1) or deny (`false`, power -1) on a rank template
    pub fn assign(self, template: impl Into<String>, granted: bool) -> Self {
        self.assign_power(template, power_for(granted))
    }

    /// Record `power` for a rank template, replacing any earlier value
    pub fn assign_power(mut self, template: impl Into<String>, power: i32) -> Self {
        self.ranks.insert(template.into(), power);
        self
    }

    /// Power currently pending for `template`
    pub fn pending_power(&self, template: &str) -> Option<i32> {
        self.ranks.get(template).copied()
    }

    /// Build the description and register it with its rank assignments
    ///
    /// Fails with [`PermissionError::IllegalState`] if `id` or `description`
    /// were never set.
    pub fn register(self) -> PermissionResult<PermissionDescription> {
        let id = self.id.ok_or(PermissionError::IllegalState("id"))?;
        let description = self
            .description
            .ok_or(PermissionError::IllegalState("description"))?;

        let registered = PermissionDescription::new(
            id,
            Some(description),
            self.owner,
            self.registry.resolver().clone(),
        );
        self.registry.register(registered.clone(), self.ranks);
        Ok(registered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subjects::testing::MockLoader;
    use std::sync::Arc;

    fn registry() -> PermissionRegistry {
        PermissionRegistry::new(Arc::new(MockLoader::new()))
    }

    #[test]
    fn test_register_requires_id() {
        let mut registry = registry();
        let err = registry
            .builder(None)
            .description("Kick players")
            .unwrap()
            .register()
            .unwrap_err();

        assert_eq!(err, PermissionError::IllegalState("id"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_requires_description() {
        let mut registry = registry();
        let err = registry
            .builder(None)
            .id("server.kick")
            .unwrap()
            .register()
            .unwrap_err();

        assert_eq!(err, PermissionError::IllegalState("description"));
        assert!(registry.description("server.kick").is_none());
    }

    #[test]
    fn test_register_returns_description() {
        let mut registry = registry();
        let owner = OwnerRef::new("moderation").with_version("1.2.0");

        let registered = registry
            .builder(Some(owner.clone()))
            .id("server.ban")
            .unwrap()
            .id("server.kick")
            .unwrap()
            .description("Kick players")
            .unwrap()
            .register()
            .unwrap();

        assert_eq!(registered.id(), "server.kick");
        assert_eq!(registered.description(), Some("Kick players"));
        assert_eq!(registered.owner(), Some(&owner));
        assert!(registry.description("server.kick").is_some());
        assert!(registry.description("server.ban").is_none());
    }

    #[test]
    fn test_empty_values_rejected() {
        let mut registry = registry();
        assert_eq!(
            registry.builder(None).id("").err(),
            Some(PermissionError::InvalidArgument("id"))
        );
        assert_eq!(
            registry.builder(None).description("  ").err(),
            Some(PermissionError::InvalidArgument("description"))
        );
    }

    #[test]
    fn test_assign_last_write_wins() {
        let mut registry = registry();
        let builder = registry
            .builder(None)
            .id("server.kick")
            .unwrap()
            .description("Kick players")
            .unwrap()
            .assign("moderator", true)
            .assign("moderator", false);
        assert_eq!(builder.pending_power("moderator"), Some(-1));

        builder.register().unwrap();

        let ranks = registry.rank_assignments("server.kick");
        assert_eq!(ranks.get("moderator"), Some(&-1));
    }

    #[test]
    fn test_assign_does_not_touch_registry() {
        let mut registry = registry();
        let builder = registry
            .builder(None)
            .id("server.kick")
            .unwrap()
            .assign_power("admin", 10);
        assert_eq!(builder.pending_power("admin"), Some(10));
        drop(builder);

        assert!(registry.rank_assignments("server.kick").is_empty());
        assert!(registry.assignments_for_template("admin").is_empty());
    }
}
