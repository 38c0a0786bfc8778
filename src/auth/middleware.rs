//! Access guard: bearer-token authentication and role gating

use crate::{auth::jwt::{Claims, JwtService}, error::AppError, models::user::Role};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated identity, reconstructed from the token claim and attached
/// to the request extensions. Never re-fetched from storage.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl AuthContext {
    fn from_claims(claims: Claims) -> Result<Self, AppError> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        })
    }
}

// Extractor so handlers can take the identity directly. Rejects with 401
// when the authentication layer did not run first.
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Role gate: an authenticated identity holding the admin role.
///
/// Only valid downstream of the authentication layer. A recognized
/// identity without the role is refused with 403, never 401; a missing
/// identity (guard ordering violated) is also 403.
#[derive(Debug, Clone)]
pub struct AdminContext(pub AuthContext);

impl<S> FromRequestParts<S> for AdminContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Forbidden)?;

        if ctx.role != Role::Admin {
            tracing::warn!(
                user_id = ctx.user_id,
                role = %ctx.role,
                "Admin access denied"
            );
            return Err(AppError::Forbidden);
        }

        Ok(AdminContext(ctx))
    }
}

/// Extract the bearer token from the Authorization header.
///
/// A missing header or a wrong scheme fails here, before any
/// verification is attempted.
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| {
            if s.starts_with("Bearer ") {
                Some(s[7..].to_string())
            } else {
                None
            }
        })
        .ok_or(AppError::Unauthorized)
}

/// Authentication middleware: verify the bearer token and attach the
/// decoded identity to the request extensions
pub async fn jwt_auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers())?;

    let claims = jwt_service.verify_token(&token)?;

    let auth_context = AuthContext::from_claims(claims)?;
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
