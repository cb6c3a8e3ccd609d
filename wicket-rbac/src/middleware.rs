//! HTTP middleware for RBAC authorization
//!
//! Route guards read the authenticated context and the route's declared
//! requirement out of request extensions: the authentication layer
//! upstream inserts the `AuthorizationContext`, route registration
//! inserts a `RequiredAccess`. A request without a context is
//! unauthorized; a context that fails the requirement is forbidden.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use wicket_api_types::{AuthorizationContext, Requirement};

use crate::decision::PermissionChecker;

/// RBAC middleware state
#[derive(Clone)]
pub struct RbacMiddleware {
    checker: PermissionChecker,
}

impl RbacMiddleware {
    /// Create new RBAC middleware around a checker
    pub fn new(checker: PermissionChecker) -> Self {
        Self { checker }
    }

    /// Middleware function for route-level authorization
    pub async fn authorize_request(
        State(middleware): State<Arc<RbacMiddleware>>,
        request: Request<Body>,
        next: Next,
    ) -> Result<Response, StatusCode> {
        let context = request
            .extensions()
            .get::<Arc<AuthorizationContext>>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let required = request.extensions().get::<RequiredAccess>().cloned();

        if let Some(required) = required {
            if !middleware.allows(&context, &required) {
                return Err(StatusCode::FORBIDDEN);
            }
        }

        Ok(next.run(request).await)
    }

    fn allows(&self, context: &AuthorizationContext, required: &RequiredAccess) -> bool {
        if let Some(req) = &required.permissions {
            if !self.checker.check_permissions(context, req) {
                return false;
            }
        }
        if let Some(req) = &required.roles {
            if !self.checker.check_roles(context, req) {
                return false;
            }
        }
        true
    }
}

/// Access requirement attached to a route
#[derive(Debug, Clone, Default)]
pub struct RequiredAccess {
    pub permissions: Option<Requirement>,
    pub roles: Option<Requirement>,
}

impl RequiredAccess {
    /// Require a permission expression
    pub fn permissions(req: Requirement) -> Self {
        Self {
            permissions: Some(req),
            roles: None,
        }
    }

    /// Require a role expression
    pub fn roles(req: Requirement) -> Self {
        Self {
            permissions: None,
            roles: Some(req),
        }
    }

    /// Require both a permission and a role expression
    pub fn both(permissions: Requirement, roles: Requirement) -> Self {
        Self {
            permissions: Some(permissions),
            roles: Some(roles),
        }
    }
}

/// Response helpers for authorization errors
pub struct AuthResponse;

impl AuthResponse {
    /// Create unauthorized response
    pub fn unauthorized() -> Response<Body> {
        Self::json(
            StatusCode::UNAUTHORIZED,
            r#"{"error":"Unauthorized","message":"Authentication required"}"#.to_string(),
        )
    }

    /// Create forbidden response
    pub fn forbidden() -> Response<Body> {
        Self::json(
            StatusCode::FORBIDDEN,
            r#"{"error":"Forbidden","message":"Insufficient permissions"}"#.to_string(),
        )
    }

    /// Create forbidden response with custom message
    pub fn forbidden_with_message(message: &str) -> Response<Body> {
        Self::json(
            StatusCode::FORBIDDEN,
            format!(
                r#"{{"error":"Forbidden","message":"{}"}}"#,
                message.replace('"', "\\\"")
            ),
        )
    }

    fn json(status: StatusCode, body: String) -> Response<Body> {
        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .expect("static response construction cannot fail")
    }
}
