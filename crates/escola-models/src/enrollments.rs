//! Enrollment ("aluno_turma") and report card ("boletim") models.
//!
//! A student is enrolled in at most one class, and its report card is created
//! in the same unit of work as the enrollment.

use chrono::{DateTime, Utc};
use escola_core::serde::deserialize_optional_trimmed;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Enrollment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "alunoId")]
    pub student_id: Uuid,
    #[serde(rename = "turmaId")]
    pub class_id: Uuid,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

/// An empty report card.
#[derive(Serialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct ReportCard {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "alunoId")]
    pub student_id: Uuid,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

/// Payload of `POST /inserirAluno`. Both values are names, not ids.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct EnrollStudentDto {
    #[serde(
        default,
        rename = "nomeAluno",
        deserialize_with = "deserialize_optional_trimmed"
    )]
    #[validate(
        required(message = "Informar o aluno é obrigatório"),
        length(min = 1, message = "Informar o aluno é obrigatório")
    )]
    pub student_name: Option<String>,

    #[serde(
        default,
        rename = "nomeTurma",
        deserialize_with = "deserialize_optional_trimmed"
    )]
    #[validate(
        required(message = "Informar a turma é obrigatório"),
        length(min = 1, message = "Informar a turma é obrigatório")
    )]
    pub class_name: Option<String>,
}

/// Body of a successful `POST /inserirAluno`.
#[derive(Serialize, Debug, ToSchema)]
pub struct EnrollmentResponse {
    pub msg: String,
    #[serde(rename = "nomeAluno")]
    pub student_name: String,
    #[serde(rename = "alunoId")]
    pub student_id: Uuid,
    #[serde(rename = "nomeTurma")]
    pub class_name: String,
    #[serde(rename = "turmaId")]
    pub class_id: Uuid,
    #[serde(rename = "matriculaId")]
    pub enrollment_id: Uuid,
    #[serde(rename = "boletimId")]
    pub report_card_id: Uuid,
}
