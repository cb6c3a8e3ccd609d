//! Authorization context and menu tree wire shapes
//!
//! The [`AuthorizationContext`] is the resolved {roles, permissions,
//! menus} bundle for one user at one point in time. It is what the login
//! response serializes, what the carrier caches, and what every
//! permission check evaluates against. The membership predicates on it
//! are the single Decision API implementation consumed by server route
//! guards and UI gates alike; only the server-side evaluation is
//! authoritative for access control.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::MenuLevel;
use crate::ids::{MenuId, TenantId, UserId};

/// Feature attached to a menu node, as carried on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuFeature {
    pub code: String,
    pub name: String,
    pub category: Option<String>,
}

/// One node of the resolved two-level menu tree.
///
/// `children` is `Some` (possibly empty) for a level-1 group and `None`
/// for a level-2 leaf: absence, not an empty collection, signals that a
/// node cannot nest further. Serialization omits the field entirely for
/// leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub id: MenuId,
    pub name: String,
    pub path: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub level: MenuLevel,
    /// Features resolved for this node; never inherited up or down
    pub features: Vec<MenuFeature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuNode>>,
}

impl MenuNode {
    /// Feature codes attached to this node
    pub fn feature_codes(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.code.as_str())
    }
}

/// The resolved authorization bundle for one user at one point in time.
///
/// `permissions` is derived from the menu tree (union of every node's
/// attached feature codes) and is never independently settable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationContext {
    pub user_id: UserId,
    pub tenant_id: Option<TenantId>,
    /// Role codes, ordered by role name (ties broken by id)
    pub roles: Vec<String>,
    /// Flattened feature codes, duplicates collapsed
    pub permissions: Vec<String>,
    /// Ordered two-level menu tree
    pub menus: Vec<MenuNode>,
    pub resolved_at: DateTime<Utc>,
}

impl AuthorizationContext {
    /// Context granting nothing; a valid state, not an error
    pub fn empty(user_id: UserId, tenant_id: Option<TenantId>) -> Self {
        Self {
            user_id,
            tenant_id,
            roles: Vec::new(),
            permissions: Vec::new(),
            menus: Vec::new(),
            resolved_at: Utc::now(),
        }
    }

    /// No roles, permissions, or menus resolved
    pub fn grants_nothing(&self) -> bool {
        self.roles.is_empty() && self.permissions.is_empty() && self.menus.is_empty()
    }

    /// Membership test for one permission code
    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.iter().any(|p| p == code)
    }

    /// True iff at least one code is held. Empty input is `false`
    /// (existential quantification over nothing).
    pub fn has_any_permission<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        codes.iter().any(|c| self.has_permission(c.as_ref()))
    }

    /// True iff every code is held. Empty input is vacuously `true`.
    pub fn has_all_permissions<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        codes.iter().all(|c| self.has_permission(c.as_ref()))
    }

    /// Membership test for one role code
    pub fn has_role(&self, code: &str) -> bool {
        self.roles.iter().any(|r| r == code)
    }

    /// True iff at least one role code is held; empty input is `false`
    pub fn has_any_role<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        codes.iter().any(|c| self.has_role(c.as_ref()))
    }

    /// True iff every role code is held; empty input is vacuously `true`
    pub fn has_all_roles<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        codes.iter().all(|c| self.has_role(c.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with(permissions: &[&str], roles: &[&str]) -> AuthorizationContext {
        AuthorizationContext {
            user_id: UserId(1),
            tenant_id: Some(TenantId(1)),
            roles: roles.iter().map(|s| s.to_string()).collect(),
            permissions: permissions.iter().map(|s| s.to_string()).collect(),
            menus: Vec::new(),
            resolved_at: Utc::now(),
        }
    }

    #[test]
    fn test_membership_predicates() {
        let ctx = context_with(&["A"], &["ADMIN"]);

        assert!(ctx.has_permission("A"));
        assert!(!ctx.has_permission("B"));
        assert!(ctx.has_role("ADMIN"));
        assert!(!ctx.has_role("USER"));
    }

    #[test]
    fn test_any_all_quantification() {
        let ctx = context_with(&["A"], &[]);

        assert!(ctx.has_any_permission(&["A", "B"]));
        assert!(!ctx.has_all_permissions(&["A", "B"]));
        assert!(ctx.has_all_permissions(&["A"]));
    }

    #[test]
    fn test_empty_inputs() {
        let ctx = context_with(&["A"], &["ADMIN"]);
        let none: [&str; 0] = [];

        // hasAll([]) is vacuously true, hasAny([]) is false
        assert!(ctx.has_all_permissions(&none));
        assert!(!ctx.has_any_permission(&none));
        assert!(ctx.has_all_roles(&none));
        assert!(!ctx.has_any_role(&none));
    }

    #[test]
    fn test_empty_context_grants_nothing() {
        let ctx = AuthorizationContext::empty(UserId(1), None);
        assert!(ctx.grants_nothing());
        assert!(!ctx.has_permission("A"));
    }

    #[test]
    fn test_leaf_children_field_omitted_on_wire() {
        let leaf = MenuNode {
            id: MenuId(2),
            name: "User List".into(),
            path: Some("/users".into()),
            icon: None,
            sort_order: 1,
            level: MenuLevel::Leaf,
            features: vec![MenuFeature {
                code: "USER_VIEW".into(),
                name: "View users".into(),
                category: Some("USER".into()),
            }],
            children: None,
        };

        let json = serde_json::to_value(&leaf).unwrap();
        assert!(json.get("children").is_none());
        assert_eq!(json["level"], 2);

        let group = MenuNode {
            id: MenuId(1),
            name: "User Management".into(),
            path: None,
            icon: None,
            sort_order: 1,
            level: MenuLevel::Group,
            features: Vec::new(),
            children: Some(vec![leaf]),
        };

        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["level"], 1);
        assert_eq!(json["children"].as_array().unwrap().len(), 1);
    }
}
