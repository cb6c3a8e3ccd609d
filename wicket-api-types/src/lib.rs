//! Unified types for the Wicket RBAC layer
//!
//! This crate provides the type definitions shared by every layer of the
//! workspace: entity records handed over the store contracts, the wire
//! shapes returned at login, and the access-decision primitives evaluated
//! by server route guards and UI permission gates alike. Keeping the
//! decision primitives here means both sides link the exact same code.

pub mod context;
pub mod domain;
pub mod enums;
pub mod ids;
pub mod requirement;

// Re-export main types for convenience
pub use context::{AuthorizationContext, MenuFeature, MenuNode};
pub use domain::{Feature, Menu, Role, RoleFeature, RoleMenu, Tenant, User, UserRole};
pub use enums::{MenuLevel, TenantScope};
pub use ids::{FeatureId, MenuId, RoleId, TenantId, UserId};
pub use requirement::Requirement;
