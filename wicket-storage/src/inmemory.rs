//! In-memory entity store
//!
//! All state lives behind a single `parking_lot::RwLock`; reads take the
//! shared lock, administrative mutations take the exclusive lock, so a
//! concurrent resolution observes either the old or the new assignment
//! state, never a mix.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::info;

use wicket_api_types::{
    Feature, FeatureId, Menu, MenuId, Role, RoleFeature, RoleId, RoleMenu, Tenant, TenantId,
    TenantScope, User, UserId, UserRole,
};
use wicket_interfaces::{
    EntityStore, FeatureStore, MenuStore, Repository, RoleStore, StoreResult, UserStore,
};

#[derive(Debug, Default)]
struct StoreState {
    tenants: HashMap<TenantId, Tenant>,
    users: HashMap<UserId, User>,
    roles: HashMap<RoleId, Role>,
    features: HashMap<FeatureId, Feature>,
    menus: HashMap<MenuId, Menu>,
    user_roles: Vec<UserRole>,
    role_features: Vec<RoleFeature>,
    role_menus: Vec<RoleMenu>,
}

/// In-memory [`EntityStore`] implementation
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ---- administrative CRUD (external collaborator surface) ----

    /// Insert or replace a tenant
    pub fn put_tenant(&self, tenant: Tenant) {
        self.state.write().tenants.insert(tenant.id, tenant);
    }

    /// Insert or replace a user
    pub fn put_user(&self, user: User) {
        self.state.write().users.insert(user.id, user);
    }

    /// Insert or replace a role
    pub fn put_role(&self, role: Role) {
        self.state.write().roles.insert(role.id, role);
    }

    /// Insert or replace a feature
    pub fn put_feature(&self, feature: Feature) {
        self.state.write().features.insert(feature.id, feature);
    }

    /// Insert or replace a menu
    pub fn put_menu(&self, menu: Menu) {
        self.state.write().menus.insert(menu.id, menu);
    }

    /// Replace the roles assigned to a user with the given set
    pub fn set_user_roles(&self, user_id: UserId, role_ids: &[RoleId], assigned_by: Option<UserId>) {
        let mut state = self.state.write();
        state.user_roles.retain(|ur| ur.user_id != user_id);
        state
            .user_roles
            .extend(role_ids.iter().map(|&rid| UserRole::new(user_id, rid, assigned_by)));
        info!(user_id = %user_id, roles = ?role_ids, "replaced user role assignments");
    }

    /// Replace the menus granted to a role with the given set
    pub fn set_role_menus(&self, role_id: RoleId, menu_ids: &[MenuId], granted_by: Option<UserId>) {
        let mut state = self.state.write();
        state.role_menus.retain(|rm| rm.role_id != role_id);
        state
            .role_menus
            .extend(menu_ids.iter().map(|&mid| RoleMenu::new(role_id, mid, granted_by)));
        info!(role_id = %role_id, menus = ?menu_ids, "replaced role menu grants");
    }

    /// Replace the features granted to a role with the given set
    pub fn set_role_features(
        &self,
        role_id: RoleId,
        feature_ids: &[FeatureId],
        granted_by: Option<UserId>,
    ) {
        let mut state = self.state.write();
        state.role_features.retain(|rf| rf.role_id != role_id);
        state
            .role_features
            .extend(feature_ids.iter().map(|&fid| RoleFeature::new(role_id, fid, granted_by)));
        info!(role_id = %role_id, features = ?feature_ids, "replaced role feature grants");
    }

    /// Soft-delete a user; assignment rows are left untouched
    pub fn soft_delete_user(&self, id: UserId, deleted_by: Option<UserId>) {
        if let Some(user) = self.state.write().users.get_mut(&id) {
            user.is_deleted = true;
            user.deleted_at = Some(Utc::now());
            user.deleted_by = deleted_by;
            info!(user_id = %id, "user soft-deleted");
        }
    }

    /// Soft-delete a role; assignment rows are left untouched
    pub fn soft_delete_role(&self, id: RoleId, deleted_by: Option<UserId>) {
        if let Some(role) = self.state.write().roles.get_mut(&id) {
            role.is_deleted = true;
            role.deleted_at = Some(Utc::now());
            role.deleted_by = deleted_by;
            info!(role_id = %id, "role soft-deleted");
        }
    }

    /// Soft-delete a feature; grant rows are left untouched
    pub fn soft_delete_feature(&self, id: FeatureId, deleted_by: Option<UserId>) {
        if let Some(feature) = self.state.write().features.get_mut(&id) {
            feature.is_deleted = true;
            feature.deleted_at = Some(Utc::now());
            feature.deleted_by = deleted_by;
            info!(feature_id = %id, "feature soft-deleted");
        }
    }

    /// Soft-delete a menu. Does not cascade to children: an orphaned
    /// level-2 menu falls out of resolution via the hierarchy rules.
    pub fn soft_delete_menu(&self, id: MenuId, deleted_by: Option<UserId>) {
        if let Some(menu) = self.state.write().menus.get_mut(&id) {
            menu.is_deleted = true;
            menu.deleted_at = Some(Utc::now());
            menu.deleted_by = deleted_by;
            info!(menu_id = %id, "menu soft-deleted");
        }
    }

    /// Toggle a user's active flag
    pub fn set_user_active(&self, id: UserId, is_active: bool) {
        if let Some(user) = self.state.write().users.get_mut(&id) {
            user.is_active = is_active;
        }
    }

    /// Toggle a role's active flag
    pub fn set_role_active(&self, id: RoleId, is_active: bool) {
        if let Some(role) = self.state.write().roles.get_mut(&id) {
            role.is_active = is_active;
        }
    }

    /// Tenant point lookup (administrative; visibility not applied)
    pub fn tenant(&self, id: TenantId) -> Option<Tenant> {
        self.state.read().tenants.get(&id).cloned()
    }
}

#[async_trait]
impl Repository for InMemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let state = self.state.read();
        Ok(state.users.get(&id).filter(|u| u.is_visible()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state.read();
        Ok(state
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.is_visible())
            .cloned())
    }
}

#[async_trait]
impl RoleStore for InMemoryStore {
    async fn roles_for_user(&self, user_id: UserId, scope: TenantScope) -> StoreResult<Vec<Role>> {
        let state = self.state.read();
        let assigned: HashSet<RoleId> = state
            .user_roles
            .iter()
            .filter(|ur| ur.user_id == user_id)
            .map(|ur| ur.role_id)
            .collect();

        let mut roles: Vec<Role> = assigned
            .iter()
            .filter_map(|rid| state.roles.get(rid))
            .filter(|r| r.is_visible() && scope.admits(r.tenant_id, true))
            .cloned()
            .collect();
        roles.sort_by_key(|r| r.id);
        Ok(roles)
    }
}

#[async_trait]
impl MenuStore for InMemoryStore {
    async fn menus_for_roles(
        &self,
        role_ids: &[RoleId],
        scope: TenantScope,
    ) -> StoreResult<Vec<Menu>> {
        let state = self.state.read();
        let wanted: HashSet<RoleId> = role_ids.iter().copied().collect();
        let granted: HashSet<MenuId> = state
            .role_menus
            .iter()
            .filter(|rm| wanted.contains(&rm.role_id))
            .map(|rm| rm.menu_id)
            .collect();

        let mut menus: Vec<Menu> = granted
            .iter()
            .filter_map(|mid| state.menus.get(mid))
            .filter(|m| m.is_visible() && scope.admits(m.tenant_id, true))
            .cloned()
            .collect();
        menus.sort_by_key(|m| (m.sort_order, m.id));
        Ok(menus)
    }
}

#[async_trait]
impl FeatureStore for InMemoryStore {
    async fn features_for_roles(&self, role_ids: &[RoleId]) -> StoreResult<Vec<Feature>> {
        let state = self.state.read();
        let wanted: HashSet<RoleId> = role_ids.iter().copied().collect();
        let granted: HashSet<FeatureId> = state
            .role_features
            .iter()
            .filter(|rf| wanted.contains(&rf.role_id))
            .map(|rf| rf.feature_id)
            .collect();

        let mut features: Vec<Feature> = granted
            .iter()
            .filter_map(|fid| state.features.get(fid))
            .filter(|f| f.is_visible())
            .cloned()
            .collect();
        features.sort_by_key(|f| f.id);
        Ok(features)
    }

    async fn find_by_id(&self, id: FeatureId) -> StoreResult<Option<Feature>> {
        let state = self.state.read();
        Ok(state.features.get(&id).filter(|f| f.is_visible()).cloned())
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    fn users(&self) -> &dyn UserStore {
        self
    }

    fn roles(&self) -> &dyn RoleStore {
        self
    }

    fn menus(&self) -> &dyn MenuStore {
        self
    }

    fn features(&self) -> &dyn FeatureStore {
        self
    }

    async fn health_check(&self) -> StoreResult<()> {
        Repository::health_check(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{FeatureBuilder, MenuBuilder, RoleBuilder, UserBuilder};

    fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.put_user(
            UserBuilder::new()
                .with_id(1)
                .with_tenant(Some(TenantId(1)))
                .with_email("alice@example.com")
                .build(),
        );
        store.put_role(RoleBuilder::new().with_id(10).with_tenant(Some(TenantId(1))).build());
        store.put_role(
            RoleBuilder::new()
                .with_id(11)
                .with_tenant(Some(TenantId(2)))
                .with_code("OTHER")
                .build(),
        );
        store.set_user_roles(UserId(1), &[RoleId(10), RoleId(11)], None);
        store
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_insensitive() {
        let store = seeded();
        let user = store.users().find_by_email("ALICE@Example.COM").await.unwrap();
        assert_eq!(user.unwrap().id, UserId(1));
    }

    #[tokio::test]
    async fn test_soft_deleted_user_disappears_from_lookups() {
        let store = seeded();
        store.soft_delete_user(UserId(1), None);

        assert!(store.users().find_by_id(UserId(1)).await.unwrap().is_none());
        assert!(store
            .users()
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_roles_for_user_applies_tenant_scope() {
        let store = seeded();
        let roles = store
            .roles()
            .roles_for_user(UserId(1), TenantScope::Tenant(TenantId(1)))
            .await
            .unwrap();

        // Role 11 belongs to tenant 2 and is excluded at lookup time
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].id, RoleId(10));
    }

    #[tokio::test]
    async fn test_set_user_roles_replaces_wholesale() {
        let store = seeded();
        store.set_user_roles(UserId(1), &[RoleId(10)], Some(UserId(99)));
        store.set_user_roles(UserId(1), &[], None);

        let roles = store
            .roles()
            .roles_for_user(UserId(1), TenantScope::Tenant(TenantId(1)))
            .await
            .unwrap();
        assert!(roles.is_empty());
    }

    #[tokio::test]
    async fn test_menus_for_roles_dedups_and_sorts() {
        let store = seeded();
        store.put_menu(
            MenuBuilder::group()
                .with_id(1)
                .with_tenant(Some(TenantId(1)))
                .with_sort_order(20)
                .build(),
        );
        store.put_menu(
            MenuBuilder::group()
                .with_id(2)
                .with_tenant(Some(TenantId(1)))
                .with_sort_order(10)
                .build(),
        );
        store.put_role(RoleBuilder::new().with_id(12).with_tenant(Some(TenantId(1))).build());
        store.set_role_menus(RoleId(10), &[MenuId(1), MenuId(2)], None);
        store.set_role_menus(RoleId(12), &[MenuId(1)], None);

        let menus = store
            .menus()
            .menus_for_roles(&[RoleId(10), RoleId(12)], TenantScope::Tenant(TenantId(1)))
            .await
            .unwrap();

        let ids: Vec<MenuId> = menus.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![MenuId(2), MenuId(1)]);
    }

    #[tokio::test]
    async fn test_inactive_feature_excluded_from_grants() {
        let store = seeded();
        store.put_feature(FeatureBuilder::new().with_id(100).with_code("USER_VIEW").build());
        store.put_feature(
            FeatureBuilder::new()
                .with_id(101)
                .with_code("USER_EDIT")
                .inactive()
                .build(),
        );
        store.set_role_features(RoleId(10), &[FeatureId(100), FeatureId(101)], None);

        let features = store.features().features_for_roles(&[RoleId(10)]).await.unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].code, "USER_VIEW");
    }
}
