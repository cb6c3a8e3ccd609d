//! End-to-end resolution tests over the in-memory store
//!
//! Seeds the store the way an administrator would (entities, then
//! wholesale assignment replacement) and asserts on the full resolved
//! context, including the serialized wire shape.

use std::sync::Arc;

use wicket_api_types::{FeatureId, MenuId, RoleId, TenantId, UserId};
use wicket_rbac::{RbacConfig, RbacResolver};
use wicket_storage::builders::{FeatureBuilder, MenuBuilder, RoleBuilder, TenantBuilder, UserBuilder};
use wicket_storage::InMemoryStore;

/// Store seeded with the canonical admin scenario: user U1 in tenant T1
/// holds ADMIN, which grants the "User Management" group (features
/// USER_VIEW + USER_EDIT) and its "User List" child (USER_VIEW).
fn admin_scenario() -> InMemoryStore {
    let store = InMemoryStore::new();

    store.put_tenant(TenantBuilder::new().with_id(1).with_code("T1").build());
    store.put_user(
        UserBuilder::new()
            .with_id(1)
            .with_tenant(Some(TenantId(1)))
            .with_email("u1@example.com")
            .with_full_name("User One")
            .build(),
    );
    store.put_role(
        RoleBuilder::new()
            .with_id(10)
            .with_tenant(Some(TenantId(1)))
            .with_code("ADMIN")
            .with_name("Administrator")
            .build(),
    );
    store.put_feature(
        FeatureBuilder::new()
            .with_id(100)
            .with_code("USER_VIEW")
            .with_name("View users")
            .with_category("USER")
            .build(),
    );
    store.put_feature(
        FeatureBuilder::new()
            .with_id(101)
            .with_code("USER_EDIT")
            .with_name("Edit users")
            .with_category("USER")
            .build(),
    );
    store.put_menu(
        MenuBuilder::group()
            .with_id(1)
            .with_tenant(Some(TenantId(1)))
            .with_name("User Management")
            .with_path("/users")
            .with_icon("users")
            .with_sort_order(1)
            .with_features([100, 101])
            .build(),
    );
    store.put_menu(
        MenuBuilder::leaf(1)
            .with_id(2)
            .with_tenant(Some(TenantId(1)))
            .with_name("User List")
            .with_path("/users/list")
            .with_sort_order(1)
            .with_features([100])
            .build(),
    );

    store.set_user_roles(UserId(1), &[RoleId(10)], None);
    store.set_role_features(RoleId(10), &[FeatureId(100), FeatureId(101)], None);
    store.set_role_menus(RoleId(10), &[MenuId(1), MenuId(2)], None);

    store
}

fn resolver(store: &InMemoryStore) -> RbacResolver {
    RbacResolver::with_defaults(Arc::new(store.clone()))
}

#[tokio::test]
async fn admin_scenario_resolves_full_context() {
    let store = admin_scenario();
    let ctx = resolver(&store).resolve(UserId(1)).await.unwrap();

    assert_eq!(ctx.roles, vec!["ADMIN"]);
    assert_eq!(ctx.permissions, vec!["USER_VIEW", "USER_EDIT"]);

    assert_eq!(ctx.menus.len(), 1);
    let root = &ctx.menus[0];
    assert_eq!(root.name, "User Management");
    assert_eq!(root.level.as_u8(), 1);
    let root_codes: Vec<&str> = root.feature_codes().collect();
    assert_eq!(root_codes, vec!["USER_VIEW", "USER_EDIT"]);

    let children = root.children.as_ref().unwrap();
    assert_eq!(children.len(), 1);
    let child = &children[0];
    assert_eq!(child.name, "User List");
    assert_eq!(child.level.as_u8(), 2);
    assert!(child.children.is_none());
    let child_codes: Vec<&str> = child.feature_codes().collect();
    assert_eq!(child_codes, vec!["USER_VIEW"]);
}

#[tokio::test]
async fn wire_shape_matches_transport_contract() {
    let store = admin_scenario();
    let ctx = resolver(&store).resolve(UserId(1)).await.unwrap();

    let wire = serde_json::to_value(&ctx).unwrap();

    assert_eq!(wire["roles"], serde_json::json!(["ADMIN"]));
    assert_eq!(
        wire["permissions"],
        serde_json::json!(["USER_VIEW", "USER_EDIT"])
    );

    let root = &wire["menus"][0];
    assert_eq!(root["name"], "User Management");
    assert_eq!(root["level"], 1);
    assert_eq!(root["sortOrder"], 1);
    assert_eq!(root["path"], "/users");
    assert_eq!(root["icon"], "users");
    assert_eq!(root["features"][0]["code"], "USER_VIEW");
    assert_eq!(root["features"][0]["category"], "USER");

    let child = &root["children"][0];
    assert_eq!(child["level"], 2);
    // Leaves carry no children field at all
    assert!(child.get("children").is_none());
}

#[tokio::test]
async fn soft_deleting_any_endpoint_removes_its_effect() {
    // Soft-deleted role: everything granted through it disappears
    let store = admin_scenario();
    store.soft_delete_role(RoleId(10), None);
    let ctx = resolver(&store).resolve(UserId(1)).await.unwrap();
    assert!(ctx.grants_nothing());

    // Soft-deleted feature: drops out of menu attachment and permissions
    let store = admin_scenario();
    store.soft_delete_feature(FeatureId(101), None);
    let ctx = resolver(&store).resolve(UserId(1)).await.unwrap();
    assert_eq!(ctx.permissions, vec!["USER_VIEW"]);

    // Soft-deleted group menu: the child becomes an orphan and is
    // excluded too (no cascade in the store, exclusion in the engine)
    let store = admin_scenario();
    store.soft_delete_menu(MenuId(1), None);
    let ctx = resolver(&store).resolve(UserId(1)).await.unwrap();
    assert!(ctx.menus.is_empty());
    assert!(ctx.permissions.is_empty());
}

#[tokio::test]
async fn tenant_isolation_survives_direct_assignment_manipulation() {
    let store = admin_scenario();
    store.put_tenant(TenantBuilder::new().with_id(2).with_code("T2").build());
    store.put_user(
        UserBuilder::new()
            .with_id(2)
            .with_tenant(Some(TenantId(2)))
            .with_email("u2@example.com")
            .build(),
    );
    // Assign tenant-1's ADMIN role to the tenant-2 user directly
    store.set_user_roles(UserId(2), &[RoleId(10)], None);

    let ctx = resolver(&store).resolve(UserId(2)).await.unwrap();
    assert!(ctx.grants_nothing());
}

#[tokio::test]
async fn resolution_is_idempotent_without_intervening_changes() {
    let store = admin_scenario();
    let resolver = resolver(&store);

    let first = resolver.resolve(UserId(1)).await.unwrap();
    let second = resolver.resolve(UserId(1)).await.unwrap();

    assert_eq!(first.roles, second.roles);
    assert_eq!(first.permissions, second.permissions);
    assert_eq!(first.menus, second.menus);
}

#[tokio::test]
async fn unassigning_roles_empties_the_context() {
    let store = admin_scenario();
    store.set_user_roles(UserId(1), &[], None);

    let ctx = resolver(&store).resolve(UserId(1)).await.unwrap();
    assert!(ctx.grants_nothing());
}

#[tokio::test]
async fn global_role_spans_tenants() {
    let store = admin_scenario();
    store.put_role(
        RoleBuilder::new()
            .with_id(30)
            .with_tenant(None)
            .with_code("SUPPORT")
            .with_name("Support")
            .build(),
    );
    store.put_menu(
        MenuBuilder::group()
            .with_id(5)
            .with_tenant(None)
            .with_name("Support Desk")
            .with_sort_order(9)
            .build(),
    );
    store.set_user_roles(UserId(1), &[RoleId(10), RoleId(30)], None);
    store.set_role_menus(RoleId(30), &[MenuId(5)], None);

    let ctx = resolver(&store).resolve(UserId(1)).await.unwrap();
    // "Administrator" < "Support" by role name
    assert_eq!(ctx.roles, vec!["ADMIN", "SUPPORT"]);
    assert!(ctx.menus.iter().any(|m| m.name == "Support Desk"));

    // The same deployment can opt out of global grants entirely
    let strict = RbacResolver::new(
        Arc::new(store.clone()),
        RbacConfig {
            global_grants_visible: false,
            ..RbacConfig::default()
        },
    );
    let ctx = strict.resolve(UserId(1)).await.unwrap();
    assert_eq!(ctx.roles, vec!["ADMIN"]);
    assert!(ctx.menus.iter().all(|m| m.name != "Support Desk"));
}

#[tokio::test]
async fn prune_empty_groups_policy_is_explicit() {
    let store = admin_scenario();
    // A group with no declared features and no resolved children
    store.put_menu(
        MenuBuilder::group()
            .with_id(7)
            .with_tenant(Some(TenantId(1)))
            .with_name("Reports")
            .with_sort_order(50)
            .build(),
    );
    store.set_role_menus(RoleId(10), &[MenuId(1), MenuId(2), MenuId(7)], None);

    let kept = resolver(&store).resolve(UserId(1)).await.unwrap();
    assert_eq!(kept.menus.len(), 2);

    let pruning = RbacResolver::new(
        Arc::new(store.clone()),
        RbacConfig {
            prune_empty_groups: true,
            ..RbacConfig::default()
        },
    );
    let pruned = pruning.resolve(UserId(1)).await.unwrap();
    assert_eq!(pruned.menus.len(), 1);
    assert_eq!(pruned.menus[0].name, "User Management");
}
