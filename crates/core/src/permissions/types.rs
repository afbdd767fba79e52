//! Permission types and constants
//!
//! This module defines the rank assignment types shared by the builder and
//! the registry.

use std::collections::BTreeMap;

/// Power recorded for `assign(template, true)`
pub const GRANT_POWER: i32 = 1;

/// Power recorded for `assign(template, false)`
pub const DENY_POWER: i32 = -1;

/// Pending or registered rank assignments for one permission
///
/// Key: rank template id, value: power. One power per template.
pub type RankTable = BTreeMap<String, i32>;

/// Map a grant flag onto a power value
pub fn power_for(granted: bool) -> i32 {
    if granted {
        GRANT_POWER
    } else {
        DENY_POWER
    }
}

/// A permission auto-assigned to a rank template with a signed weight
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RankAssignment {
    /// Permission id
    pub permission: String,
    /// Rank template id (e.g. "admin", "default")
    pub template: String,
    /// Positive grants, negative denies
    pub power: i32,
}

impl RankAssignment {
    /// Create an assignment
    pub fn new(permission: impl Into<String>, template: impl Into<String>, power: i32) -> Self {
        Self {
            permission: permission.into(),
            template: template.into(),
            power,
        }
    }

    /// Check if this assignment grants the permission
    pub fn grants(&self) -> bool {
        self.power > 0
    }

    /// Check if this assignment denies the permission
    pub fn denies(&self) -> bool {
        self.power < 0
    }
}

/// Receiver of rank assignments once their template exists
///
/// Implemented by the host's rank storage. `apply` may be called more than
/// once for the same triple; implementations should treat it as a set.
pub trait RankTemplateSink: Send + Sync {
    /// Set `permission` to `power` on the rank created from `template`
    fn apply(&mut self, template: &str, permission: &str, power: i32);
}
