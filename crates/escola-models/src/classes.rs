//! Class ("turma") models and DTOs.

use chrono::{DateTime, Utc};
use escola_core::serde::deserialize_optional_trimmed;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A class and the teacher responsible for it.
#[derive(Serialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Class {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    /// Teacher id
    #[serde(rename = "professor")]
    pub teacher_id: Uuid,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub teacher_id: Uuid,
}

/// Payload of `POST /criarTurma`. `professor` is the teacher's first name.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct ClassDto {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        required(message = "O nome da turma é obrigatório"),
        length(min = 1, message = "O nome da turma é obrigatório")
    )]
    pub nome: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        required(message = "O nome do professor é obrigatório"),
        length(min = 1, message = "O nome do professor é obrigatório")
    )]
    pub professor: Option<String>,
}

/// Payload of `PUT /editarDadosTurma`.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateClassDto {
    #[serde(
        default,
        alias = "turmaId",
        deserialize_with = "deserialize_optional_trimmed"
    )]
    pub id: Option<String>,

    #[serde(flatten)]
    #[validate(nested)]
    pub class: ClassDto,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ClassCreatedData {
    /// Teacher id
    pub id: Uuid,
    pub nome: String,
    pub professor: String,
}

/// Body of a successful `POST /criarTurma`.
#[derive(Serialize, Debug, ToSchema)]
pub struct ClassCreatedResponse {
    pub msg: String,
    pub dados: ClassCreatedData,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ClassUpdatedData {
    #[serde(rename = "nomeTurma")]
    pub class_name: String,
    #[serde(rename = "nomeProfessor")]
    pub teacher_name: String,
    #[serde(rename = "professorID")]
    pub teacher_id: Uuid,
}

/// Body of a successful `PUT /editarDadosTurma`.
#[derive(Serialize, Debug, ToSchema)]
pub struct ClassUpdatedResponse {
    pub msg: String,
    pub dados: ClassUpdatedData,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ClassListData {
    #[serde(rename = "dadosTurma")]
    pub classes: Vec<Class>,
}

/// Body of `GET /buscarTurma`.
#[derive(Serialize, Debug, ToSchema)]
pub struct ClassListResponse {
    pub msg: String,
    pub dados: ClassListData,
}
