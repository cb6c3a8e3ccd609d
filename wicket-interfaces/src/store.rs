//! Entity store repository traits
//!
//! Lookup contracts: point lookups return `Ok(None)` for rows that are
//! absent, soft-deleted, or inactive; set lookups return only visible
//! rows and take the tenant scope as a parameter rather than leaving
//! scoping to the caller. Connectivity and timeout failures surface as
//! [`StoreError`]; the engine propagates them as a resolution failure,
//! never as a partial result.

use async_trait::async_trait;

use wicket_api_types::{Feature, Menu, Role, TenantScope, User};
use wicket_api_types::{FeatureId, RoleId, UserId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Common store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Query timed out: {message}")]
    Timeout { message: String },

    #[error("Constraint violation: {message}")]
    Constraint { message: String },

    #[error("Internal store error: {message}")]
    Internal { message: String },
}

impl StoreError {
    /// Not-found for a typed entity id
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Connectivity failure
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Base repository trait with health check capability
#[async_trait]
pub trait Repository: Send + Sync {
    /// Check that the repository can serve requests
    async fn health_check(&self) -> StoreResult<()>;
}

/// User lookups
#[async_trait]
pub trait UserStore: Repository {
    /// Point lookup by id; `None` when absent, soft-deleted, or inactive
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Point lookup by email, compared case-insensitively; same
    /// visibility contract as [`find_by_id`](UserStore::find_by_id)
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
}

/// Role lookups
#[async_trait]
pub trait RoleStore: Repository {
    /// Visible roles assigned to the user, restricted to roles owned by
    /// the scope's tenant or tenant-less (global) roles
    async fn roles_for_user(&self, user_id: UserId, scope: TenantScope) -> StoreResult<Vec<Role>>;
}

/// Menu lookups
#[async_trait]
pub trait MenuStore: Repository {
    /// Visible menus granted to any of the roles, restricted to the
    /// scope's tenant or tenant-less menus; each menu appears once even
    /// when granted through several roles
    async fn menus_for_roles(
        &self,
        role_ids: &[RoleId],
        scope: TenantScope,
    ) -> StoreResult<Vec<Menu>>;
}

/// Feature lookups
#[async_trait]
pub trait FeatureStore: Repository {
    /// Visible features granted to any of the roles; each feature
    /// appears once
    async fn features_for_roles(&self, role_ids: &[RoleId]) -> StoreResult<Vec<Feature>>;

    /// Point lookup by id; `None` when absent, soft-deleted, or inactive
    async fn find_by_id(&self, id: FeatureId) -> StoreResult<Option<Feature>>;
}

/// Factory trait bundling the store facets the engine consumes
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// User lookups
    fn users(&self) -> &dyn UserStore;

    /// Role lookups
    fn roles(&self) -> &dyn RoleStore;

    /// Menu lookups
    fn menus(&self) -> &dyn MenuStore;

    /// Feature lookups
    fn features(&self) -> &dyn FeatureStore;

    /// Check health of the underlying store
    async fn health_check(&self) -> StoreResult<()>;
}
