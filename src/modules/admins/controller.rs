use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use escola_core::{AppError, ErrorResponse};
use escola_models::{
    AdminCredentialsDto, AdminListResponse, AdminResponse, DEFAULT_PERMISSION, DeleteRecordDto,
    EchoIdResponse, MessageResponse, UpdateAdminDto, admins::AdminListData,
};
use tracing::instrument;

use crate::middleware::auth::AdminUser;
use crate::modules::admins::service::AdminService;
use crate::modules::shared::delete_response;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/criarAdmin",
    responses(
        (status = 200, description = "Administrator creation page", body = MessageResponse),
        (status = 401, description = "Not an administrator", body = ErrorResponse)
    ),
    security(
        ("access_token" = [])
    ),
    tag = "Admins"
)]
pub async fn create_admin_page(_admin: AdminUser) -> Json<MessageResponse> {
    Json(MessageResponse::new("Página Criar Admin"))
}

#[utoipa::path(
    post,
    path = "/criarAdmin",
    request_body = AdminCredentialsDto,
    responses(
        (status = 200, description = "Administrator created with the default permission", body = AdminResponse),
        (status = 400, description = "Validation failed or e-mail taken", body = ErrorResponse),
        (status = 401, description = "Not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("access_token" = [])
    ),
    tag = "Admins"
)]
#[instrument(skip(state, admin, dto), fields(by = %admin.0.id))]
pub async fn create_admin(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<AdminCredentialsDto>,
) -> Result<Json<AdminResponse>, AppError> {
    let created = AdminService::create(state.store.as_ref(), dto, DEFAULT_PERMISSION).await?;

    Ok(Json(AdminResponse {
        msg: "Admin criado com sucesso.".to_string(),
        dados: created,
    }))
}

#[utoipa::path(
    get,
    path = "/buscarAdmin",
    responses(
        (status = 200, description = "All administrators", body = AdminListResponse),
        (status = 401, description = "Not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("access_token" = [])
    ),
    tag = "Admins"
)]
#[instrument(skip(state, admin), fields(by = %admin.0.id))]
pub async fn list_admins(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<AdminListResponse>, AppError> {
    let admins = AdminService::list(state.store.as_ref()).await?;

    Ok(Json(AdminListResponse {
        msg: "Lista de Admins:".to_string(),
        dados: AdminListData { admins },
    }))
}

#[utoipa::path(
    get,
    path = "/editarDadosAdmin/{id}",
    params(
        ("id" = String, Path, description = "Administrator ID")
    ),
    responses(
        (status = 200, description = "The id taken from the URL", body = EchoIdResponse),
        (status = 401, description = "Not an administrator", body = ErrorResponse)
    ),
    security(
        ("access_token" = [])
    ),
    tag = "Admins"
)]
pub async fn admin_id_from_url(_admin: AdminUser, Path(id): Path<String>) -> Json<EchoIdResponse> {
    Json(EchoIdResponse {
        msg: "Pegar ID do Admin pela URL".to_string(),
        id,
    })
}

#[utoipa::path(
    put,
    path = "/editarDadosAdmin",
    request_body = UpdateAdminDto,
    responses(
        (status = 200, description = "Administrator updated", body = AdminResponse),
        (status = 400, description = "Validation failed, unknown administrator or e-mail taken", body = ErrorResponse),
        (status = 401, description = "Not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("access_token" = [])
    ),
    tag = "Admins"
)]
#[instrument(skip(state, admin, dto), fields(by = %admin.0.id, id = ?dto.id))]
pub async fn update_admin(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<UpdateAdminDto>,
) -> Result<Json<AdminResponse>, AppError> {
    let updated = AdminService::update(state.store.as_ref(), dto).await?;

    Ok(Json(AdminResponse {
        msg: "Dados alterados com sucesso".to_string(),
        dados: updated,
    }))
}

#[utoipa::path(
    delete,
    path = "/deletarAdmin",
    request_body = DeleteRecordDto,
    responses(
        (status = 200, description = "Administrator deleted, or the failure message in lenient mode", body = MessageResponse),
        (status = 400, description = "Malformed id (strict mode)", body = MessageResponse),
        (status = 401, description = "Not an administrator", body = ErrorResponse),
        (status = 500, description = "Store failure (strict mode)", body = MessageResponse)
    ),
    security(
        ("access_token" = [])
    ),
    tag = "Admins"
)]
#[instrument(skip(state, admin, payload), fields(by = %admin.0.id))]
pub async fn delete_admin(
    State(state): State<AppState>,
    admin: AdminUser,
    payload: Result<ValidatedJson<DeleteRecordDto>, AppError>,
) -> Response {
    let result = match payload {
        Ok(ValidatedJson(dto)) => {
            AdminService::delete(state.store.as_ref(), dto.id.as_deref()).await
        }
        Err(rejection) => Err(rejection),
    };

    delete_response(
        result,
        &state.api_config,
        "Admin deletado com sucesso",
        "Falha ao deletar admin, tente novamente mais tarde!",
    )
}
