use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use escola_core::AppError;
use escola_models::Admin;

/// Header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// The token sent with a request: `x-access-token` first, then a bearer
/// `Authorization` header.
pub fn access_token(headers: &HeaderMap) -> Option<&str> {
    let from_header = headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty());

    from_header.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
    })
}

/// The administrator admitted by [`require_admin`](crate::middleware::role::require_admin).
#[derive(Debug, Clone)]
pub struct AdminUser(pub Admin);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(anyhow!("Acesso negado")))
    }
}
