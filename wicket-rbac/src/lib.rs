//! Multi-tenant RBAC resolution engine for Wicket
//!
//! This crate turns raw relational assignments (user→roles,
//! role→features, role→menus) into the authorization context returned
//! at login and re-derived for permission checks thereafter:
//! - Resolution engine with soft-delete visibility and tenant isolation
//! - Two-level menu tree building with deterministic ordering
//! - Authoritative server-side permission checking
//! - Time-boxed context carrier with explicit refresh and invalidation

pub mod config;
pub mod context;
pub mod decision;
pub mod error;
pub mod middleware;
pub mod resolver;
pub mod tree;

pub use config::RbacConfig;
pub use context::{decode_context, encode_context, ContextCarrier};
pub use decision::PermissionChecker;
pub use error::{RbacError, RbacResult};
pub use middleware::{AuthResponse, RbacMiddleware, RequiredAccess};
pub use resolver::RbacResolver;
pub use tree::MenuTreeBuilder;

/// Re-export commonly used types
pub use wicket_api_types::{AuthorizationContext, MenuFeature, MenuNode, Requirement};
