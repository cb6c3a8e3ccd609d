//! Configuration for the RBAC engine

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// RBAC engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RbacConfig {
    /// How long a carried authorization context stays fresh before a
    /// caller must refresh it
    pub context_ttl_seconds: u64,

    /// Whether tenant-less (global) roles and menus resolve for every
    /// tenant's users. When false, only grants owned by the user's own
    /// tenant resolve.
    pub global_grants_visible: bool,

    /// Whether a level-1 menu with no resolved children and no attached
    /// features is dropped from the tree. Kept by default.
    pub prune_empty_groups: bool,

    /// Emit audit log records for exclusions (tenant mismatch,
    /// malformed hierarchy) and denied requirements
    pub enable_audit_logging: bool,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            context_ttl_seconds: 300, // 5 minutes
            global_grants_visible: true,
            prune_empty_groups: false,
            enable_audit_logging: true,
        }
    }
}

impl RbacConfig {
    /// Context freshness window as a [`Duration`]
    pub fn context_ttl(&self) -> Duration {
        Duration::from_secs(self.context_ttl_seconds)
    }
}
