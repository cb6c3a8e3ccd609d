//! Error types for RBAC operations

use thiserror::Error;

use wicket_api_types::UserId;
use wicket_interfaces::StoreError;

/// Result type for RBAC operations
pub type RbacResult<T> = Result<T, RbacError>;

/// RBAC-specific errors
#[derive(Error, Debug)]
pub enum RbacError {
    /// Identity does not resolve to an active, non-deleted user. Fatal
    /// to the resolution call; surfaced as an authentication failure.
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: UserId },

    /// A requirement was evaluated and not met
    #[error("Permission denied: requires {requirement}")]
    PermissionDenied { requirement: String },

    /// Store operation failed; the caller must treat this as "cannot
    /// authenticate right now", never as an empty grant
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Envelope encoding/decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RbacError {
    /// Create a new permission denied error for a requirement
    pub fn permission_denied(requirement: impl std::fmt::Display) -> Self {
        Self::PermissionDenied {
            requirement: requirement.to_string(),
        }
    }

    /// Create a new invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this is the authentication-failure case
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound { .. })
    }

    /// Check if this is a permission denied error
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}
