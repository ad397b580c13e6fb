use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use escola_core::{AppError, ErrorResponse};
use escola_models::{
    CreatePersonDto, DeleteRecordDto, EchoIdResponse, MessageResponse, PersonKind,
    PersonListResponse, PersonResponse, UpdatePersonDto, people::TeacherListData,
};
use tracing::instrument;

use crate::modules::people::service::PersonService;
use crate::modules::shared::delete_response;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/criarProfessor",
    responses(
        (status = 200, description = "Teacher creation page", body = MessageResponse)
    ),
    tag = "Teachers"
)]
pub async fn create_teacher_page() -> Json<MessageResponse> {
    Json(MessageResponse::new("Página Criar Professor"))
}

#[utoipa::path(
    post,
    path = "/criarProfessor",
    request_body = CreatePersonDto,
    responses(
        (status = 200, description = "Teacher created", body = PersonResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn create_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePersonDto>,
) -> Result<Json<PersonResponse>, AppError> {
    let teacher = PersonService::create(state.store.as_ref(), PersonKind::Teacher, dto).await?;

    Ok(Json(PersonResponse {
        msg: "Professor criado com sucesso.".to_string(),
        dados: teacher,
    }))
}

#[utoipa::path(
    get,
    path = "/buscarProfessor",
    responses(
        (status = 200, description = "All teachers", body = PersonListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn list_teachers(
    State(state): State<AppState>,
) -> Result<Json<PersonListResponse>, AppError> {
    let teachers = PersonService::list(state.store.as_ref(), PersonKind::Teacher).await?;

    Ok(Json(PersonListResponse {
        msg: "Lista de professores:".to_string(),
        dados: TeacherListData { teachers },
    }))
}

#[utoipa::path(
    get,
    path = "/editarDadosProfessor/{id}",
    params(
        ("id" = String, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "The id taken from the URL", body = EchoIdResponse)
    ),
    tag = "Teachers"
)]
pub async fn teacher_id_from_url(Path(id): Path<String>) -> Json<EchoIdResponse> {
    Json(EchoIdResponse {
        msg: "Pegar ID do Professor pela URL".to_string(),
        id,
    })
}

#[utoipa::path(
    put,
    path = "/editarDadosProfessor",
    request_body = UpdatePersonDto,
    responses(
        (status = 200, description = "Teacher updated", body = PersonResponse),
        (status = 400, description = "Validation failed or unknown teacher", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto), fields(id = ?dto.id))]
pub async fn update_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<UpdatePersonDto>,
) -> Result<Json<PersonResponse>, AppError> {
    let teacher = PersonService::update(state.store.as_ref(), PersonKind::Teacher, dto).await?;

    Ok(Json(PersonResponse {
        msg: "Dados alterados com sucesso".to_string(),
        dados: teacher,
    }))
}

#[utoipa::path(
    delete,
    path = "/deletarProfessor",
    request_body = DeleteRecordDto,
    responses(
        (status = 200, description = "Teacher deleted, or the failure message in lenient mode", body = MessageResponse),
        (status = 400, description = "Malformed id (strict mode)", body = MessageResponse),
        (status = 500, description = "Store failure (strict mode)", body = MessageResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, payload))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<DeleteRecordDto>, AppError>,
) -> Response {
    let result = match payload {
        Ok(ValidatedJson(dto)) => {
            PersonService::delete(state.store.as_ref(), PersonKind::Teacher, dto.id.as_deref())
                .await
        }
        Err(rejection) => Err(rejection),
    };

    delete_response(
        result,
        &state.api_config,
        "Professor deletado com sucesso",
        "Falha ao deletar professor, tente novamente mais tarde!",
    )
}
