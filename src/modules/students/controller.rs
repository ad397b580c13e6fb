use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use escola_core::{AppError, ErrorResponse};
use escola_models::{
    CreatePersonDto, DeleteRecordDto, EchoIdResponse, MessageResponse, PersonKind,
    PersonResponse, StudentListResponse, UpdatePersonDto, people::StudentListData,
};
use tracing::instrument;

use crate::modules::people::service::PersonService;
use crate::modules::shared::delete_response;
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/criarAluno",
    responses(
        (status = 200, description = "Student creation page", body = MessageResponse)
    ),
    tag = "Students"
)]
pub async fn create_student_page() -> Json<MessageResponse> {
    Json(MessageResponse::new("Página para criar aluno"))
}

#[utoipa::path(
    post,
    path = "/criarAluno",
    request_body = CreatePersonDto,
    responses(
        (status = 200, description = "Student created", body = PersonResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePersonDto>,
) -> Result<Json<PersonResponse>, AppError> {
    let student = PersonService::create(state.store.as_ref(), PersonKind::Student, dto).await?;

    Ok(Json(PersonResponse {
        msg: "Aluno criado com sucesso.".to_string(),
        dados: student,
    }))
}

#[utoipa::path(
    get,
    path = "/buscarAlunos",
    responses(
        (status = 200, description = "Students with their enrollment and class, newest first", body = StudentListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<StudentListResponse>, AppError> {
    let students = StudentService::list_with_classes(state.store.as_ref()).await?;

    Ok(Json(StudentListResponse {
        msg: "Lista de alunos:".to_string(),
        dados: StudentListData { students },
    }))
}

#[utoipa::path(
    get,
    path = "/editarDadosAluno/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "The id taken from the URL", body = EchoIdResponse)
    ),
    tag = "Students"
)]
pub async fn student_id_from_url(Path(id): Path<String>) -> Json<EchoIdResponse> {
    Json(EchoIdResponse {
        msg: "Pegar ID do Aluno pela URL".to_string(),
        id,
    })
}

#[utoipa::path(
    put,
    path = "/editarDadosAluno",
    request_body = UpdatePersonDto,
    responses(
        (status = 200, description = "Student updated", body = PersonResponse),
        (status = 400, description = "Validation failed or unknown student", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto), fields(id = ?dto.id))]
pub async fn update_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<UpdatePersonDto>,
) -> Result<Json<PersonResponse>, AppError> {
    let student = PersonService::update(state.store.as_ref(), PersonKind::Student, dto).await?;

    Ok(Json(PersonResponse {
        msg: "Dados alterados com sucesso".to_string(),
        dados: student,
    }))
}

#[utoipa::path(
    delete,
    path = "/deletarAluno",
    request_body = DeleteRecordDto,
    responses(
        (status = 200, description = "Student deleted, or the failure message in lenient mode", body = MessageResponse),
        (status = 400, description = "Malformed id (strict mode)", body = MessageResponse),
        (status = 500, description = "Store failure (strict mode)", body = MessageResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, payload))]
pub async fn delete_student(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<DeleteRecordDto>, AppError>,
) -> Response {
    // Unreadable bodies are delete failures like any other.
    let result = match payload {
        Ok(ValidatedJson(dto)) => {
            PersonService::delete(state.store.as_ref(), PersonKind::Student, dto.id.as_deref())
                .await
        }
        Err(rejection) => Err(rejection),
    };

    delete_response(
        result,
        &state.api_config,
        "Aluno deletado com sucesso",
        "Falha ao deletar aluno, tente novamente mais tarde!",
    )
}
