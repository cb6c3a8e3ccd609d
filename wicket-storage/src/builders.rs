//! Builder pattern utilities for creating test entities
//!
//! Convenient builders for seeding the in-memory store in tests. Every
//! builder starts from a visible (active, not deleted) entity with
//! plausible defaults; call the `with_*` methods to vary the fields a
//! test cares about.

use wicket_api_types::{
    Feature, FeatureId, Menu, MenuId, Role, RoleId, Tenant, TenantId, User, UserId,
};

/// Builder for test tenants
pub struct TenantBuilder {
    tenant: Tenant,
}

impl TenantBuilder {
    pub fn new() -> Self {
        Self {
            tenant: Tenant::new(TenantId(1), "ACME", "Acme Corp"),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.tenant.id = TenantId(id);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.tenant.code = code.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.tenant.name = name.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.tenant.is_active = false;
        self
    }

    pub fn build(self) -> Tenant {
        self.tenant
    }
}

impl Default for TenantBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for test users
pub struct UserBuilder {
    user: User,
}

impl UserBuilder {
    pub fn new() -> Self {
        Self {
            user: User::new(UserId(1), None, "user@example.com", "Test User"),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.user.id = UserId(id);
        self
    }

    pub fn with_tenant(mut self, tenant_id: Option<TenantId>) -> Self {
        self.user.tenant_id = tenant_id;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.user.email = email.into();
        self
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.user.full_name = full_name.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.user.is_active = false;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.user.is_deleted = true;
        self
    }

    pub fn build(self) -> User {
        self.user
    }
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for test roles
pub struct RoleBuilder {
    role: Role,
}

impl RoleBuilder {
    pub fn new() -> Self {
        Self {
            role: Role::new(RoleId(1), None, "ADMIN", "Administrator"),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.role.id = RoleId(id);
        self
    }

    pub fn with_tenant(mut self, tenant_id: Option<TenantId>) -> Self {
        self.role.tenant_id = tenant_id;
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.role.code = code.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.role.name = name.into();
        self
    }

    pub fn system(mut self) -> Self {
        self.role.is_system = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.role.is_active = false;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.role.is_deleted = true;
        self
    }

    pub fn build(self) -> Role {
        self.role
    }
}

impl Default for RoleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for test features
pub struct FeatureBuilder {
    feature: Feature,
}

impl FeatureBuilder {
    pub fn new() -> Self {
        Self {
            feature: Feature::new(FeatureId(1), "USER_VIEW", "View users"),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.feature.id = FeatureId(id);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.feature.code = code.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.feature.name = name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.feature.category = Some(category.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.feature.is_active = false;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.feature.is_deleted = true;
        self
    }

    pub fn build(self) -> Feature {
        self.feature
    }
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for test menus
pub struct MenuBuilder {
    menu: Menu,
}

impl MenuBuilder {
    /// Start from a level-1 group menu
    pub fn group() -> Self {
        Self {
            menu: Menu::group(MenuId(1), None, "Group"),
        }
    }

    /// Start from a level-2 leaf menu under `parent_id`
    pub fn leaf(parent_id: i64) -> Self {
        Self {
            menu: Menu::leaf(MenuId(2), None, MenuId(parent_id), "Leaf"),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.menu.id = MenuId(id);
        self
    }

    pub fn with_tenant(mut self, tenant_id: Option<TenantId>) -> Self {
        self.menu.tenant_id = tenant_id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.menu.name = name.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.menu.path = Some(path.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.menu.icon = Some(icon.into());
        self
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.menu.sort_order = sort_order;
        self
    }

    pub fn with_features(mut self, feature_ids: impl IntoIterator<Item = i64>) -> Self {
        self.menu.feature_ids = feature_ids.into_iter().map(FeatureId).collect();
        self
    }

    pub fn with_parent(mut self, parent_id: Option<MenuId>) -> Self {
        self.menu.parent_id = parent_id;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.menu.is_active = false;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.menu.is_deleted = true;
        self
    }

    pub fn build(self) -> Menu {
        self.menu
    }
}
