//! Server-side permission checking
//!
//! The evaluation itself lives in `wicket-api-types` so UI gates run the
//! identical algorithm; this module wraps it for the authoritative
//! server path, turning a failed requirement into a typed denial and an
//! audit record. Checks are pure and synchronous: they never touch the
//! store and cannot block.

use tracing::debug;

use wicket_api_types::{AuthorizationContext, Requirement};

use crate::config::RbacConfig;
use crate::error::{RbacError, RbacResult};

/// Permission checker for validating user actions
#[derive(Debug, Clone)]
pub struct PermissionChecker {
    audit: bool,
}

impl PermissionChecker {
    /// Create a checker with audit logging on
    pub fn new() -> Self {
        Self { audit: true }
    }

    /// Create a checker honoring the configured audit policy
    pub fn from_config(config: &RbacConfig) -> Self {
        Self {
            audit: config.enable_audit_logging,
        }
    }

    /// Evaluate a requirement against the context's permission set
    pub fn check_permissions(&self, context: &AuthorizationContext, req: &Requirement) -> bool {
        let allowed = req.allowed_by_permissions(context);
        if !allowed && self.audit {
            debug!(user_id = %context.user_id, requirement = %req, "permission check denied");
        }
        allowed
    }

    /// Evaluate a requirement against the context's role set
    pub fn check_roles(&self, context: &AuthorizationContext, req: &Requirement) -> bool {
        let allowed = req.allowed_by_roles(context);
        if !allowed && self.audit {
            debug!(user_id = %context.user_id, requirement = %req, "role check denied");
        }
        allowed
    }

    /// Like [`check_permissions`](Self::check_permissions) but a denial
    /// becomes [`RbacError::PermissionDenied`]
    pub fn require_permissions(
        &self,
        context: &AuthorizationContext,
        req: &Requirement,
    ) -> RbacResult<()> {
        if self.check_permissions(context, req) {
            Ok(())
        } else {
            Err(RbacError::permission_denied(req))
        }
    }

    /// Like [`check_roles`](Self::check_roles) but a denial becomes
    /// [`RbacError::PermissionDenied`]
    pub fn require_roles(
        &self,
        context: &AuthorizationContext,
        req: &Requirement,
    ) -> RbacResult<()> {
        if self.check_roles(context, req) {
            Ok(())
        } else {
            Err(RbacError::permission_denied(req))
        }
    }
}

impl Default for PermissionChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wicket_api_types::UserId;

    fn context_with(permissions: &[&str], roles: &[&str]) -> AuthorizationContext {
        AuthorizationContext {
            user_id: UserId(1),
            tenant_id: None,
            roles: roles.iter().map(|s| s.to_string()).collect(),
            permissions: permissions.iter().map(|s| s.to_string()).collect(),
            menus: Vec::new(),
            resolved_at: Utc::now(),
        }
    }

    #[test]
    fn test_single_permission_check() {
        let checker = PermissionChecker::new();
        let ctx = context_with(&["USER_VIEW"], &[]);

        assert!(checker.check_permissions(&ctx, &Requirement::single("USER_VIEW")));
        assert!(!checker.check_permissions(&ctx, &Requirement::single("USER_EDIT")));
    }

    #[test]
    fn test_quantified_checks_match_reference_behavior() {
        let checker = PermissionChecker::new();
        let ctx = context_with(&["A"], &[]);

        assert!(checker.check_permissions(&ctx, &Requirement::any_of(["A", "B"])));
        assert!(!checker.check_permissions(&ctx, &Requirement::all_of(["A", "B"])));
        assert!(checker.check_permissions(&ctx, &Requirement::all_of(Vec::<String>::new())));
        assert!(!checker.check_permissions(&ctx, &Requirement::any_of(Vec::<String>::new())));
    }

    #[test]
    fn test_role_checks_use_role_set() {
        let checker = PermissionChecker::new();
        let ctx = context_with(&["USER_VIEW"], &["ADMIN"]);

        assert!(checker.check_roles(&ctx, &Requirement::single("ADMIN")));
        // Permission codes are not roles
        assert!(!checker.check_roles(&ctx, &Requirement::single("USER_VIEW")));
    }

    #[test]
    fn test_require_produces_typed_denial() {
        let checker = PermissionChecker::new();
        let ctx = context_with(&[], &[]);

        let err = checker
            .require_permissions(&ctx, &Requirement::single("USER_EDIT"))
            .unwrap_err();
        assert!(err.is_permission_denied());

        checker
            .require_permissions(&ctx, &Requirement::all_of(Vec::<String>::new()))
            .unwrap();
    }
}
