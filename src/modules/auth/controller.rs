use axum::{Json, extract::State};
use escola_core::{AppError, ErrorResponse};
use escola_models::{LoginRequest, LoginResponse};
use tracing::instrument;

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Login and receive the token for the `x-access-token` header
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(state.store.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(response))
}
