use axum::{Json, extract::State};
use escola_core::{AppError, ErrorResponse};
use escola_models::{EnrollStudentDto, EnrollmentResponse, MessageResponse};
use tracing::instrument;

use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/inserirAluno",
    responses(
        (status = 200, description = "Enrollment page", body = MessageResponse)
    ),
    tag = "Enrollments"
)]
pub async fn enroll_student_page() -> Json<MessageResponse> {
    Json(MessageResponse::new("Página para inserir alunos em uma turma"))
}

#[utoipa::path(
    post,
    path = "/inserirAluno",
    request_body = EnrollStudentDto,
    responses(
        (status = 200, description = "Student enrolled and report card opened", body = EnrollmentResponse),
        (status = 400, description = "Validation failed, unknown student or class, or already enrolled", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn enroll_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<EnrollStudentDto>,
) -> Result<Json<EnrollmentResponse>, AppError> {
    let response = EnrollmentService::enroll(state.store.as_ref(), dto).await?;
    Ok(Json(response))
}
