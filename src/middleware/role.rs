//! Access gate for administrator routes.

use anyhow::anyhow;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use escola_auth::verify_token;
use escola_core::AppError;
use tracing::{debug, warn};

use crate::metrics::track_access_denied;
use crate::middleware::auth::{AdminUser, access_token};
use crate::state::AppState;

const ACCESS_DENIED: &str = "Acesso negado";
const NOT_AN_ADMIN: &str = "O usuário não é um ADM";

fn reject(message: &'static str, reason: &'static str) -> AppError {
    debug!(reason, "Access denied");
    track_access_denied(reason);
    AppError::unauthorized(anyhow!(message))
}

/// Admits the request only when its token belongs to an administrator with
/// permission level 2. The permission is read from the store, not the token.
///
/// - no token, or a bad or expired one: 401 `Acesso negado`
/// - token for an account that cannot be loaded: 401 `O usuário não é um ADM`
/// - account with any other permission level: 401 `Acesso negado`
///
/// The loaded administrator is attached to the request as [`AdminUser`].
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = access_token(req.headers())
            .ok_or_else(|| reject(ACCESS_DENIED, "missing_token"))?;
        verify_token(token, &state.jwt_config)
            .map_err(|_| reject(ACCESS_DENIED, "invalid_token"))?
    };

    let admin_id = claims
        .admin_id()
        .ok_or_else(|| reject(NOT_AN_ADMIN, "unknown_admin"))?;

    let admin = match state.store.find_admin(admin_id).await {
        Ok(Some(admin)) => admin,
        Ok(None) => return Err(reject(NOT_AN_ADMIN, "unknown_admin")),
        Err(err) => {
            warn!(error = %err, %admin_id, "Administrator lookup failed");
            return Err(reject(NOT_AN_ADMIN, "lookup_failed"));
        }
    };

    if !admin.is_admin() {
        return Err(reject(ACCESS_DENIED, "insufficient_permission"));
    }

    req.extensions_mut().insert(AdminUser(admin));
    Ok(next.run(req).await)
}
