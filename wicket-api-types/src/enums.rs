//! Unified enums shared across the store, the engine, and the wire

use serde::{Deserialize, Serialize};

use crate::ids::TenantId;

/// Position of a menu in the two-level hierarchy.
///
/// Serializes as the numeric level (`1` or `2`) the wire format and the
/// store both use. Any other number is rejected at the boundary, so a
/// level outside {1, 2} can never reach the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MenuLevel {
    /// Level 1: a navigation group that may carry children
    Group,
    /// Level 2: a leaf node, never nested further
    Leaf,
}

impl MenuLevel {
    /// Numeric level as carried on the wire
    pub fn as_u8(self) -> u8 {
        match self {
            MenuLevel::Group => 1,
            MenuLevel::Leaf => 2,
        }
    }
}

impl TryFrom<u8> for MenuLevel {
    type Error = InvalidMenuLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MenuLevel::Group),
            2 => Ok(MenuLevel::Leaf),
            other => Err(InvalidMenuLevel(other)),
        }
    }
}

impl From<MenuLevel> for u8 {
    fn from(level: MenuLevel) -> Self {
        level.as_u8()
    }
}

/// Rejected menu level value
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("menu level must be 1 or 2, got {0}")]
pub struct InvalidMenuLevel(pub u8);

/// The tenant scope a resolution runs under.
///
/// Derived from the user's own tenant reference: a user attached to a
/// tenant resolves under that tenant, a tenant-less user resolves under
/// the platform scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TenantScope {
    /// Platform-level resolution; only tenant-less grants are admitted
    Platform,
    /// Resolution restricted to one tenant (plus global grants, per policy)
    Tenant(TenantId),
}

impl TenantScope {
    /// Scope for an entity's optional tenant reference
    pub fn from_owner(tenant_id: Option<TenantId>) -> Self {
        match tenant_id {
            Some(id) => TenantScope::Tenant(id),
            None => TenantScope::Platform,
        }
    }

    /// Whether a grant owned by `owner` is admitted under this scope.
    ///
    /// A tenant-owned grant is admitted only when the scope is that exact
    /// tenant. A tenant-less (global) grant is admitted when
    /// `global_grants_visible` allows it; under the platform scope global
    /// grants are always admitted, since they are the only grants a
    /// platform user can hold.
    pub fn admits(&self, owner: Option<TenantId>, global_grants_visible: bool) -> bool {
        match (self, owner) {
            (TenantScope::Tenant(scope), Some(owner)) => *scope == owner,
            (TenantScope::Platform, Some(_)) => false,
            (TenantScope::Platform, None) => true,
            (TenantScope::Tenant(_), None) => global_grants_visible,
        }
    }

    /// Tenant id when scoped to a tenant
    pub fn tenant_id(&self) -> Option<TenantId> {
        match self {
            TenantScope::Tenant(id) => Some(*id),
            TenantScope::Platform => None,
        }
    }
}
