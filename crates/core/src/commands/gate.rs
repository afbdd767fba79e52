//! Permission gate for privileged command paths

use permhub_sdk::SubjectRef;

use super::CommandError;

/// Whoever is running a command
///
/// Implemented by the host for players, the server console, RCON clients...
pub trait Commander {
    /// Display name of the caller
    fn name(&self) -> &str;

    /// Subject backing this caller, if any (the console has none)
    fn subject(&self) -> Option<&SubjectRef> {
        None
    }

    /// Check if the caller holds `permission`
    fn has_permission(&self, permission: &str) -> bool;

    /// Send a message back to the caller
    fn reply(&self, message: &str);
}

/// Fail with [`CommandError::PermissionDenied`] unless `commander` holds `permission`
///
/// Every command path that mutates state calls this before doing so.
pub fn check_permission(commander: &dyn Commander, permission: &str) -> Result<(), CommandError> {
    if commander.has_permission(permission) {
        return Ok(());
    }

    tracing::debug!("{} denied permission '{}'", commander.name(), permission);
    Err(CommandError::PermissionDenied {
        permission: permission.to_string(),
        message: format!(
            "You don't have permission to do that. Required: {}",
            permission
        ),
    })
}
