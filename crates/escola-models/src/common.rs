//! Bodies shared by every entity.

use escola_core::serde::deserialize_optional_trimmed;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A response carrying only a message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Echo of an id taken from the URL.
#[derive(Debug, Serialize, ToSchema)]
pub struct EchoIdResponse {
    pub msg: String,
    #[serde(rename = "ID")]
    pub id: String,
}

/// Body of every `DELETE /deletar*` route.
///
/// The id key depends on the entity (`alunoId`, `professorId`, `adminId`,
/// `turmaId`); all of them land here.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct DeleteRecordDto {
    #[serde(
        default,
        alias = "alunoId",
        alias = "professorId",
        alias = "adminId",
        alias = "turmaId",
        deserialize_with = "deserialize_optional_trimmed"
    )]
    pub id: Option<String>,
}

/// Cross-field rule for `senha1`/`senha2` pairs. Missing values are left to
/// the `required` rules.
pub(crate) fn confirm_password(
    senha1: Option<&str>,
    senha2: Option<&str>,
) -> Result<(), ValidationError> {
    match (senha1, senha2) {
        (Some(first), Some(second)) if first != second => Err(ValidationError::new("must_match")
            .with_message("As senhas devem ser iguais".into())),
        _ => Ok(()),
    }
}

/// Parses a record id sent by a client. Absent or malformed ids yield `None`.
pub fn parse_record_id(raw: Option<&str>) -> Option<Uuid> {
    raw.and_then(|value| Uuid::parse_str(value.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_password() {
        assert!(confirm_password(Some("segredo123"), Some("segredo123")).is_ok());
        assert!(confirm_password(Some("segredo123"), None).is_ok());
        assert!(confirm_password(None, Some("segredo123")).is_ok());

        let error = confirm_password(Some("segredo123"), Some("segredo321")).unwrap_err();
        assert_eq!(error.message.as_deref(), Some("As senhas devem ser iguais"));
    }

    #[test]
    fn test_delete_dto_accepts_entity_keys() {
        let id = Uuid::new_v4();
        for key in ["alunoId", "professorId", "adminId", "turmaId", "id"] {
            let body = format!(r#"{{"{}": "{}"}}"#, key, id);
            let dto: DeleteRecordDto = serde_json::from_str(&body).unwrap();
            assert_eq!(parse_record_id(dto.id.as_deref()), Some(id));
        }
    }

    #[test]
    fn test_delete_dto_empty_body() {
        let dto: DeleteRecordDto = serde_json::from_str("{}").unwrap();
        assert!(dto.id.is_none());
    }

    #[test]
    fn test_parse_record_id_rejects_garbage() {
        assert!(parse_record_id(Some("123")).is_none());
        assert!(parse_record_id(None).is_none());
    }

    #[test]
    fn test_echo_serializes_uppercase_id() {
        let echo = EchoIdResponse {
            msg: "ok".to_string(),
            id: "abc".to_string(),
        };
        let json = serde_json::to_value(echo).unwrap();
        assert_eq!(json["ID"], "abc");
    }
}
