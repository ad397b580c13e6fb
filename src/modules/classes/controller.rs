use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use escola_core::{AppError, ErrorResponse};
use escola_models::{
    ClassCreatedResponse, ClassDto, ClassListResponse, ClassUpdatedResponse, DeleteRecordDto,
    EchoIdResponse, MessageResponse, UpdateClassDto,
    classes::{ClassCreatedData, ClassListData, ClassUpdatedData},
};
use tracing::instrument;

use crate::modules::classes::service::ClassService;
use crate::modules::shared::delete_response;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/criarTurma",
    responses(
        (status = 200, description = "Class creation page", body = MessageResponse)
    ),
    tag = "Classes"
)]
pub async fn create_class_page() -> Json<MessageResponse> {
    Json(MessageResponse::new("Página para Criar Turma"))
}

#[utoipa::path(
    post,
    path = "/criarTurma",
    request_body = ClassDto,
    responses(
        (status = 200, description = "Class created; `id` is the teacher's", body = ClassCreatedResponse),
        (status = 400, description = "Validation failed, unknown teacher or duplicate name", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn create_class(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ClassDto>,
) -> Result<Json<ClassCreatedResponse>, AppError> {
    let (class, teacher) = ClassService::create(state.store.as_ref(), dto).await?;

    Ok(Json(ClassCreatedResponse {
        msg: "Turma criada com sucesso".to_string(),
        dados: ClassCreatedData {
            id: teacher.id,
            nome: class.name,
            professor: teacher.first_name,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/buscarTurma",
    responses(
        (status = 200, description = "All classes", body = ClassListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn list_classes(
    State(state): State<AppState>,
) -> Result<Json<ClassListResponse>, AppError> {
    let classes = ClassService::list(state.store.as_ref()).await?;

    Ok(Json(ClassListResponse {
        msg: "Lista de Turmas:".to_string(),
        dados: ClassListData { classes },
    }))
}

#[utoipa::path(
    get,
    path = "/editarDadosTurma/{id}",
    params(
        ("id" = String, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "The id taken from the URL", body = EchoIdResponse)
    ),
    tag = "Classes"
)]
pub async fn class_id_from_url(Path(id): Path<String>) -> Json<EchoIdResponse> {
    Json(EchoIdResponse {
        msg: "Pegar ID da Turma pela URL".to_string(),
        id,
    })
}

#[utoipa::path(
    put,
    path = "/editarDadosTurma",
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Class renamed or reassigned", body = ClassUpdatedResponse),
        (status = 400, description = "Validation failed, unknown class or teacher, or duplicate name", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state, dto), fields(id = ?dto.id))]
pub async fn update_class(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<Json<ClassUpdatedResponse>, AppError> {
    let (class, teacher) = ClassService::update(state.store.as_ref(), dto).await?;

    Ok(Json(ClassUpdatedResponse {
        msg: "Dados alterados com sucesso".to_string(),
        dados: ClassUpdatedData {
            class_name: class.name,
            teacher_name: teacher.first_name,
            teacher_id: teacher.id,
        },
    }))
}

#[utoipa::path(
    delete,
    path = "/deletarTurma",
    request_body = DeleteRecordDto,
    responses(
        (status = 200, description = "Class deleted, or the failure message in lenient mode", body = MessageResponse),
        (status = 400, description = "Malformed id (strict mode)", body = MessageResponse),
        (status = 500, description = "Store failure (strict mode)", body = MessageResponse)
    ),
    tag = "Classes"
)]
#[instrument(skip(state, payload))]
pub async fn delete_class(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<DeleteRecordDto>, AppError>,
) -> Response {
    let result = match payload {
        Ok(ValidatedJson(dto)) => {
            ClassService::delete(state.store.as_ref(), dto.id.as_deref()).await
        }
        Err(rejection) => Err(rejection),
    };

    delete_response(
        result,
        &state.api_config,
        "Turma deletada com sucesso",
        "Falha ao deletar turma, tente novamente mais tarde!",
    )
}
