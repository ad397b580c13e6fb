//! Administrator models, credentials and login DTOs.

use chrono::{DateTime, Utc};
use escola_core::serde::deserialize_optional_trimmed;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::confirm_password;

/// Permission level that grants access to administrator routes.
pub const ADMIN_PERMISSION: i32 = 2;

/// Permission level given to accounts created without one.
pub const DEFAULT_PERMISSION: i32 = 1;

/// An administrator account.
#[derive(Serialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Admin {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    #[serde(rename = "permissao")]
    pub permission: i32,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn is_admin(&self) -> bool {
        self.permission == ADMIN_PERMISSION
    }
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password_hash: String,
    pub permission: i32,
}

/// Payload of `POST /criarAdmin`.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
#[validate(schema(
    function = "validate_admin_passwords",
    skip_on_field_errors = false
))]
pub struct AdminCredentialsDto {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        required(message = "O e-mail é obrigatório"),
        email(message = "O e-mail informado não é válido")
    )]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        required(message = "A senha é obrigatória"),
        length(min = 8, message = "A senha deve conter no mínimo 8 caracteres")
    )]
    pub senha1: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(required(message = "A senha é obrigatória"))]
    pub senha2: Option<String>,
}

fn validate_admin_passwords(dto: &AdminCredentialsDto) -> Result<(), ValidationError> {
    confirm_password(dto.senha1.as_deref(), dto.senha2.as_deref())
}

/// Payload of `PUT /editarDadosAdmin`. The password is replaced too.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateAdminDto {
    #[serde(
        default,
        alias = "adminId",
        deserialize_with = "deserialize_optional_trimmed"
    )]
    pub id: Option<String>,

    #[serde(flatten)]
    #[validate(nested)]
    pub credentials: AdminCredentialsDto,
}

/// `{msg, dados}` carrying one administrator.
#[derive(Serialize, Debug, ToSchema)]
pub struct AdminResponse {
    pub msg: String,
    pub dados: Admin,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct AdminListData {
    #[serde(rename = "dadosAdmin")]
    pub admins: Vec<Admin>,
}

/// Body of `GET /buscarAdmin`.
#[derive(Serialize, Debug, ToSchema)]
pub struct AdminListResponse {
    pub msg: String,
    pub dados: AdminListData,
}

/// Payload of `POST /login`.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        required(message = "O e-mail é obrigatório"),
        email(message = "O e-mail informado não é válido")
    )]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(required(message = "A senha é obrigatória"))]
    pub senha: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct LoginResponse {
    pub msg: String,
    /// Send back in the `x-access-token` header
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_admin_permission() {
        let mut admin = Admin {
            id: Uuid::new_v4(),
            email: "root@escola.com".to_string(),
            password_hash: "hash".to_string(),
            permission: DEFAULT_PERMISSION,
            created_at: Utc::now(),
        };
        assert!(!admin.is_admin());

        admin.permission = ADMIN_PERMISSION;
        assert!(admin.is_admin());

        let json = serde_json::to_value(&admin).unwrap();
        assert_eq!(json["permissao"], 2);
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_credentials_validation() {
        let dto: AdminCredentialsDto = serde_json::from_value(json!({
            "email": "root@escola.com",
            "senha1": "segredo123",
            "senha2": "segredo123"
        }))
        .unwrap();
        assert!(dto.validate().is_ok());

        let mismatch: AdminCredentialsDto = serde_json::from_value(json!({
            "email": "root@escola.com",
            "senha1": "segredo123",
            "senha2": "segredo321"
        }))
        .unwrap();
        let errors = mismatch.validate().unwrap_err();
        assert_eq!(
            escola_core::errors::validation_messages(&errors),
            vec!["As senhas devem ser iguais"]
        );
    }

    #[test]
    fn test_update_dto_reads_admin_id() {
        let dto: UpdateAdminDto = serde_json::from_value(json!({
            "adminId": "abc",
            "email": "root@escola.com",
            "senha1": "segredo123",
            "senha2": "segredo123"
        }))
        .unwrap();
        assert_eq!(dto.id.as_deref(), Some("abc"));
        assert_eq!(dto.credentials.email.as_deref(), Some("root@escola.com"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let dto: LoginRequest = serde_json::from_str("{}").unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("senha"));
    }
}
