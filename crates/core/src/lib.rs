//! permhub - Permission Core
//!
//! This crate contains the permission descriptor registry, subject
//! resolution and command gating for a server-side permission service.
//!
//! # Re-exports
//!
//! This crate re-exports the SDK crate for convenience:
//! - [`sdk`] - Subject and owner identity types

pub use permhub_sdk as sdk;

pub mod commands;
pub mod config;
pub mod logging;
pub mod permissions;
pub mod service;
pub mod subjects;

// Re-export commonly used items
pub use commands::{
    check_permission, ArgKey, ArgumentStore, CallbackController, CommandError, CommandKey,
    CommandManager, CommandResult, CommandSpec, Commander,
};
pub use config::{ConfigError, ConfigResult, CoreConfig};
pub use permissions::{
    DescriptionBuilder, PermissionDescription, PermissionError, PermissionRegistry,
    PermissionResult, RankAssignment, RankTemplateSink,
};
pub use service::PermissionService;
pub use subjects::{
    CollectionLoader, SubjectCollection, SubjectError, SubjectResolver, SubjectResult,
};

// Re-export identity types
pub use sdk::{OwnerRef, Subject, SubjectRef};
