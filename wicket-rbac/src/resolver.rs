//! RBAC resolution engine
//!
//! Turns the raw relational assignments (user→roles, role→features,
//! role→menus) into the authorization context returned at login.
//! Resolution is a stateless, read-only, idempotent computation over the
//! entity store for a single user at a single point in time; it can run
//! concurrently for any number of users without coordination.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use wicket_api_types::{
    AuthorizationContext, Feature, FeatureId, Menu, MenuFeature, MenuId, MenuNode, Role, RoleId,
    TenantScope, User, UserId,
};
use wicket_interfaces::EntityStore;

use crate::config::RbacConfig;
use crate::error::{RbacError, RbacResult};
use crate::tree::MenuTreeBuilder;

/// The resolution engine
///
/// Holds the store it reads through and the policy configuration; owns
/// no mutable state of its own.
#[derive(Clone)]
pub struct RbacResolver {
    store: Arc<dyn EntityStore>,
    config: RbacConfig,
}

impl RbacResolver {
    /// Create a resolver over a store with explicit configuration
    pub fn new(store: Arc<dyn EntityStore>, config: RbacConfig) -> Self {
        Self { store, config }
    }

    /// Create a resolver with the default configuration
    pub fn with_defaults(store: Arc<dyn EntityStore>) -> Self {
        Self::new(store, RbacConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &RbacConfig {
        &self.config
    }

    /// Resolve the authorization context for a user.
    ///
    /// A missing, soft-deleted, or inactive user is a hard
    /// [`RbacError::UserNotFound`]. A user with zero resolvable roles is
    /// NOT an error: the call succeeds with a context granting nothing,
    /// which callers must treat as "authenticated but without
    /// application access".
    pub async fn resolve(&self, user_id: UserId) -> RbacResult<AuthorizationContext> {
        let user = self
            .store
            .users()
            .find_by_id(user_id)
            .await?
            .filter(User::is_visible)
            .ok_or(RbacError::UserNotFound { user_id })?;
        let scope = user.scope();

        let roles = self.resolve_roles(&user, scope).await?;
        if roles.is_empty() {
            debug!(user_id = %user_id, "user holds no resolvable roles");
            return Ok(AuthorizationContext::empty(user.id, user.tenant_id));
        }
        let role_ids: Vec<RoleId> = roles.iter().map(|r| r.id).collect();

        let menus = self.resolve_menus(&role_ids, scope).await?;
        let features = self.resolve_features(&role_ids).await?;

        // A feature attaches to a menu node only when the menu declares
        // it AND some resolved role grants it; declared order is kept.
        let granted: HashMap<FeatureId, &Feature> =
            features.iter().map(|f| (f.id, f)).collect();
        let features_by_menu: HashMap<MenuId, Vec<MenuFeature>> = menus
            .iter()
            .map(|menu| {
                let attached = menu
                    .feature_ids
                    .iter()
                    .filter_map(|fid| granted.get(fid))
                    .map(|f| MenuFeature {
                        code: f.code.clone(),
                        name: f.name.clone(),
                        category: f.category.clone(),
                    })
                    .collect();
                (menu.id, attached)
            })
            .collect();

        let tree = MenuTreeBuilder::new()
            .with_pruning(self.config.prune_empty_groups)
            .with_audit(self.config.enable_audit_logging)
            .build(menus, &features_by_menu);

        let permissions = flatten_permissions(&tree);
        let roles = ordered_role_codes(roles);

        debug!(
            user_id = %user_id,
            roles = roles.len(),
            permissions = permissions.len(),
            menus = tree.len(),
            "authorization context resolved"
        );

        Ok(AuthorizationContext {
            user_id: user.id,
            tenant_id: user.tenant_id,
            roles,
            permissions,
            menus: tree,
            resolved_at: Utc::now(),
        })
    }

    /// Roles assigned to the user. Visibility and tenant scope are
    /// checked again here even though the store excludes at lookup
    /// time. Out-of-scope assignments are excluded silently and
    /// logged for audit; they are never an error.
    async fn resolve_roles(&self, user: &User, scope: TenantScope) -> RbacResult<Vec<Role>> {
        let candidates = self.store.roles().roles_for_user(user.id, scope).await?;

        let mut roles = Vec::with_capacity(candidates.len());
        for role in candidates {
            if !role.is_visible() {
                continue;
            }
            if !scope.admits(role.tenant_id, self.config.global_grants_visible) {
                if self.config.enable_audit_logging {
                    warn!(
                        user_id = %user.id,
                        role_id = %role.id,
                        role_tenant = ?role.tenant_id,
                        "role excluded: outside tenant scope"
                    );
                }
                continue;
            }
            roles.push(role);
        }
        Ok(roles)
    }

    /// Menus reachable through the resolved roles, with the same
    /// re-filtering as roles
    async fn resolve_menus(&self, role_ids: &[RoleId], scope: TenantScope) -> RbacResult<Vec<Menu>> {
        let candidates = self.store.menus().menus_for_roles(role_ids, scope).await?;

        let mut menus = Vec::with_capacity(candidates.len());
        for menu in candidates {
            if !menu.is_visible() {
                continue;
            }
            if !scope.admits(menu.tenant_id, self.config.global_grants_visible) {
                if self.config.enable_audit_logging {
                    warn!(
                        menu_id = %menu.id,
                        menu_tenant = ?menu.tenant_id,
                        "menu excluded: outside tenant scope"
                    );
                }
                continue;
            }
            menus.push(menu);
        }
        Ok(menus)
    }

    /// Visible features granted through the resolved roles
    async fn resolve_features(&self, role_ids: &[RoleId]) -> RbacResult<Vec<Feature>> {
        let candidates = self.store.features().features_for_roles(role_ids).await?;
        Ok(candidates.into_iter().filter(Feature::is_visible).collect())
    }
}

/// Union of attached feature codes across every node of the built tree,
/// both levels, duplicates collapsed; order is first appearance.
fn flatten_permissions(tree: &[MenuNode]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut codes = Vec::new();
    let mut collect = |node: &MenuNode| {
        for code in node.feature_codes() {
            if seen.insert(code.to_string()) {
                codes.push(code.to_string());
            }
        }
    };
    for root in tree {
        collect(root);
        if let Some(children) = &root.children {
            for child in children {
                collect(child);
            }
        }
    }
    codes
}

/// Role codes ordered by role name, ties broken by id
fn ordered_role_codes(mut roles: Vec<Role>) -> Vec<String> {
    roles.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    roles.into_iter().map(|r| r.code).collect()
}
