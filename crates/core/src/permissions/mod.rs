//! Permission descriptions for permhub
//!
//! Components describe the permissions they check by registering a
//! [`PermissionDescription`]: an id, a human readable description, the
//! owning component and a set of rank templates the permission should be
//! auto-assigned to. The registry does not decide who holds a permission;
//! it asks subject collections through the [`SubjectResolver`](crate::subjects::SubjectResolver).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   PermissionRegistry                      │
//! │   id → PermissionDescription     id → template → power    │
//! └──────────────────────────────────────────────────────────┘
//!        ▲ register()                    │ define_rank()
//!        │                               ▼
//!  ┌─────┴──────────────┐        ┌──────────────────┐
//!  │ DescriptionBuilder │        │ RankTemplateSink │
//!  │ (consumed)         │        │ (host ranks)     │
//!  └────────────────────┘        └──────────────────┘
//! ```
//!
//! # Rank Assignments
//!
//! Each assignment carries a signed power: positive grants, negative
//! denies. `assign(template, true)` records `1` and `assign(template, false)`
//! records `-1`. A template holds one power per permission; the last write
//! wins. Assignments are applied to the [`RankTemplateSink`] whenever their
//! template is defined, whether that happens before or after registration.
//!
//! # Usage
//!
//! ```ignore
//! use permhub_core::permissions::PermissionRegistry;
//! use permhub_core::sdk::OwnerRef;
//!
//! let mut registry = PermissionRegistry::new(loader);
//! let kick = registry
//!     .builder(Some(OwnerRef::new("moderation")))
//!     .id("moderation.kick")?
//!     .description("Kick a player from the server")?
//!     .assign("moderator", true)
//!     .register()?;
//!
//! // Who can kick, among all groups?
//! let holders = kick.find_assigned_subjects("group").await?;
//! ```

mod builder;
mod description;
mod registry;
mod types;

pub use builder::DescriptionBuilder;
pub use description::PermissionDescription;
pub use registry::PermissionRegistry;
pub use types::{power_for, RankAssignment, RankTable, RankTemplateSink, DENY_POWER, GRANT_POWER};

/// Errors raised while building permission descriptions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    /// A required value was empty
    #[error("Invalid argument: {0} must not be empty")]
    InvalidArgument(&'static str),

    /// `register` was called before a required field was set
    #[error("Cannot register permission: {0} was never set")]
    IllegalState(&'static str),
}

/// Result type for permission description operations
pub type PermissionResult<T> = Result<T, PermissionError>;
