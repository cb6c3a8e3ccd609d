//! Entity records handed across the store contracts
//!
//! These are the unified representations of the RBAC entities; the store
//! returns them and the resolution engine consumes them. Every entity
//! carries an independent active flag and soft-delete marker: a row that
//! fails either check must never influence a resolution, no matter which
//! assignments still reference it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{MenuLevel, TenantScope};
use crate::ids::{FeatureId, MenuId, RoleId, TenantId, UserId};

/// Tenant record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: TenantId,
    /// Unique tenant code, e.g. "ACME"
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<UserId>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<UserId>,
}

impl Tenant {
    /// Create a new active tenant
    pub fn new(id: TenantId, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            description: None,
            is_active: true,
            created_at: Utc::now(),
            created_by: None,
            updated_at: None,
            updated_by: None,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
        }
    }

    /// Active and not soft-deleted
    pub fn is_visible(&self) -> bool {
        self.is_active && !self.is_deleted
    }
}

/// User record
///
/// A user belongs to at most one tenant; `tenant_id = None` marks a
/// platform-level user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub tenant_id: Option<TenantId>,
    /// Unique, compared case-insensitively
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<UserId>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<UserId>,
}

impl User {
    /// Create a new active user
    pub fn new(
        id: UserId,
        tenant_id: Option<TenantId>,
        email: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            email: email.into(),
            full_name: full_name.into(),
            is_active: true,
            created_at: Utc::now(),
            created_by: None,
            updated_at: None,
            updated_by: None,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
        }
    }

    /// Active and not soft-deleted
    pub fn is_visible(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    /// The tenant scope this user resolves under
    pub fn scope(&self) -> TenantScope {
        TenantScope::from_owner(self.tenant_id)
    }
}

/// Role record
///
/// `tenant_id = None` marks a global role, assignable across tenants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: RoleId,
    pub tenant_id: Option<TenantId>,
    /// Stable role code, e.g. "ADMIN"
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub is_system: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<UserId>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<UserId>,
}

impl Role {
    /// Create a new active role scoped to a tenant (or global when `None`)
    pub fn new(
        id: RoleId,
        tenant_id: Option<TenantId>,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            code: code.into(),
            name: name.into(),
            description: None,
            is_system: false,
            is_active: true,
            created_at: Utc::now(),
            created_by: None,
            updated_at: None,
            updated_by: None,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
        }
    }

    /// Active and not soft-deleted
    pub fn is_visible(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    /// Tenant-less roles are global
    pub fn is_global(&self) -> bool {
        self.tenant_id.is_none()
    }
}

/// Feature record: an atomic permission token
///
/// Features are leaf capabilities and never hierarchical.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: FeatureId,
    /// Unique permission token, e.g. "USER_EDIT"
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    /// Grouping label, e.g. "USER"
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<UserId>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<UserId>,
}

impl Feature {
    /// Create a new active feature
    pub fn new(id: FeatureId, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            description: None,
            category: None,
            is_active: true,
            created_at: Utc::now(),
            created_by: None,
            updated_at: None,
            updated_by: None,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
        }
    }

    /// Active and not soft-deleted
    pub fn is_visible(&self) -> bool {
        self.is_active && !self.is_deleted
    }
}

/// Menu record
///
/// Menus form a strict two-level hierarchy: a `Group` (level 1) has no
/// parent, a `Leaf` (level 2) must reference a `Group` in the same tenant
/// scope. `feature_ids` declares which features are relevant to this
/// node; that set is intersected with the user's resolved features during
/// resolution, it is not itself a grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: MenuId,
    pub tenant_id: Option<TenantId>,
    pub parent_id: Option<MenuId>,
    pub name: String,
    /// Navigable path, e.g. "/users"
    pub path: Option<String>,
    /// Icon token for the UI
    pub icon: Option<String>,
    /// Ascending sort order; lower renders first
    pub sort_order: i32,
    pub level: MenuLevel,
    /// Features declared relevant to this node
    pub feature_ids: Vec<FeatureId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<UserId>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<UserId>,
}

impl Menu {
    /// Create a new active level-1 group menu
    pub fn group(id: MenuId, tenant_id: Option<TenantId>, name: impl Into<String>) -> Self {
        Self::with_level(id, tenant_id, None, name, MenuLevel::Group)
    }

    /// Create a new active level-2 leaf menu under `parent_id`
    pub fn leaf(
        id: MenuId,
        tenant_id: Option<TenantId>,
        parent_id: MenuId,
        name: impl Into<String>,
    ) -> Self {
        Self::with_level(id, tenant_id, Some(parent_id), name, MenuLevel::Leaf)
    }

    fn with_level(
        id: MenuId,
        tenant_id: Option<TenantId>,
        parent_id: Option<MenuId>,
        name: impl Into<String>,
        level: MenuLevel,
    ) -> Self {
        Self {
            id,
            tenant_id,
            parent_id,
            name: name.into(),
            path: None,
            icon: None,
            sort_order: 0,
            level,
            feature_ids: Vec::new(),
            is_active: true,
            created_at: Utc::now(),
            created_by: None,
            updated_at: None,
            updated_by: None,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
        }
    }

    /// Active and not soft-deleted
    pub fn is_visible(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    /// Level-1 menus are the only hierarchy roots
    pub fn is_root(&self) -> bool {
        self.level == MenuLevel::Group
    }
}

/// User-to-role assignment row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub user_id: UserId,
    pub role_id: RoleId,
    pub assigned_at: DateTime<Utc>,
    pub assigned_by: Option<UserId>,
}

impl UserRole {
    /// Create a new assignment stamped now
    pub fn new(user_id: UserId, role_id: RoleId, assigned_by: Option<UserId>) -> Self {
        Self {
            user_id,
            role_id,
            assigned_at: Utc::now(),
            assigned_by,
        }
    }
}

/// Role-to-feature grant row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleFeature {
    pub role_id: RoleId,
    pub feature_id: FeatureId,
    pub granted_at: DateTime<Utc>,
    pub granted_by: Option<UserId>,
}

impl RoleFeature {
    /// Create a new grant stamped now
    pub fn new(role_id: RoleId, feature_id: FeatureId, granted_by: Option<UserId>) -> Self {
        Self {
            role_id,
            feature_id,
            granted_at: Utc::now(),
            granted_by,
        }
    }
}

/// Role-to-menu grant row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleMenu {
    pub role_id: RoleId,
    pub menu_id: MenuId,
    pub granted_at: DateTime<Utc>,
    pub granted_by: Option<UserId>,
}

impl RoleMenu {
    /// Create a new grant stamped now
    pub fn new(role_id: RoleId, menu_id: MenuId, granted_by: Option<UserId>) -> Self {
        Self {
            role_id,
            menu_id,
            granted_at: Utc::now(),
            granted_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_requires_both_flags() {
        let mut role = Role::new(RoleId(1), None, "ADMIN", "Administrator");
        assert!(role.is_visible());

        role.is_active = false;
        assert!(!role.is_visible());

        role.is_active = true;
        role.is_deleted = true;
        assert!(!role.is_visible());
    }

    #[test]
    fn test_user_scope_follows_tenant() {
        let platform = User::new(UserId(1), None, "ops@example.com", "Ops");
        assert_eq!(platform.scope(), TenantScope::Platform);

        let tenanted = User::new(UserId(2), Some(TenantId(7)), "a@example.com", "A");
        assert_eq!(tenanted.scope(), TenantScope::Tenant(TenantId(7)));
    }

    #[test]
    fn test_menu_constructors_set_hierarchy_fields() {
        let group = Menu::group(MenuId(1), Some(TenantId(1)), "User Management");
        assert!(group.is_root());
        assert_eq!(group.parent_id, None);

        let leaf = Menu::leaf(MenuId(2), Some(TenantId(1)), MenuId(1), "User List");
        assert!(!leaf.is_root());
        assert_eq!(leaf.parent_id, Some(MenuId(1)));
        assert_eq!(leaf.level, MenuLevel::Leaf);
    }

    #[test]
    fn test_global_role() {
        assert!(Role::new(RoleId(1), None, "AUDITOR", "Auditor").is_global());
        assert!(!Role::new(RoleId(2), Some(TenantId(1)), "ADMIN", "Admin").is_global());
    }
}
