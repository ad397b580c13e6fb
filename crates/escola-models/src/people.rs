//! Student and teacher models and DTOs.
//!
//! Students ("alunos") and teachers ("professores") share one record shape and
//! one validation schema, so both are modelled by [`Person`] and told apart by
//! [`PersonKind`].

use std::sync::LazyLock;

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use escola_core::AppError;
use escola_core::serde::{
    deserialize_optional_non_blank, deserialize_optional_string_or_number,
    deserialize_optional_trimmed,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::classes::Class;
use crate::common::confirm_password;
use crate::enrollments::Enrollment;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((\+[1-9]{1,4}[ \-]*)|(\([0-9]{2,3}\)[ \-]*)|([0-9]{2,4})[ \-]*)*?[0-9]{3,4}?[ \-]*[0-9]{3,4}?$")
        .expect("phone pattern is valid")
});

/// Which collection a [`Person`] lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PersonKind {
    Student,
    Teacher,
}

impl PersonKind {
    /// Table holding this kind of person.
    pub fn table(self) -> &'static str {
        match self {
            PersonKind::Student => "students",
            PersonKind::Teacher => "teachers",
        }
    }

    /// Capitalized Portuguese label used in response messages.
    pub fn label(self) -> &'static str {
        match self {
            PersonKind::Student => "Aluno",
            PersonKind::Teacher => "Professor",
        }
    }

    /// Lowercase Portuguese label used in error messages.
    pub fn noun(self) -> &'static str {
        match self {
            PersonKind::Student => "aluno",
            PersonKind::Teacher => "professor",
        }
    }

    /// Metric label.
    pub fn as_str(self) -> &'static str {
        match self {
            PersonKind::Student => "student",
            PersonKind::Teacher => "teacher",
        }
    }
}

/// A student or teacher.
#[derive(Serialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "sobrenome")]
    pub last_name: String,
    #[serde(rename = "telefone")]
    pub phone: i64,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "numEndereco", skip_serializing_if = "Option::is_none")]
    pub street_number: Option<i32>,
    #[serde(rename = "dataNasc")]
    pub birth_date: NaiveDate,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

/// Fields written when a person is created.
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub phone: i64,
    pub address: String,
    pub street_number: Option<i32>,
    pub birth_date: NaiveDate,
    pub email: String,
    pub password_hash: String,
}

/// Editable fields, overwritten as a whole on update.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonChanges {
    pub first_name: String,
    pub last_name: String,
    pub phone: i64,
    pub address: String,
    pub street_number: Option<i32>,
    pub birth_date: NaiveDate,
    pub email: String,
}

impl Person {
    /// Builds the record a store persists for `new`.
    pub fn from_new(id: Uuid, new: NewPerson, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            phone: new.phone,
            address: new.address,
            street_number: new.street_number,
            birth_date: new.birth_date,
            email: new.email,
            password_hash: new.password_hash,
            created_at,
        }
    }

    pub fn apply(&mut self, changes: PersonChanges) {
        self.first_name = changes.first_name;
        self.last_name = changes.last_name;
        self.phone = changes.phone;
        self.address = changes.address;
        self.street_number = changes.street_number;
        self.birth_date = changes.birth_date;
        self.email = changes.email;
    }
}

/// Profile fields shared by the create and update payloads.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct PersonProfileDto {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        required(message = "O nome é obrigatório"),
        length(min = 1, message = "O nome é obrigatório")
    )]
    pub nome: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        required(message = "O sobrenome é obrigatório"),
        length(min = 1, message = "O sobrenome é obrigatório")
    )]
    pub sobrenome: Option<String>,

    /// Phone number, as text or number
    #[serde(default, deserialize_with = "deserialize_optional_string_or_number")]
    #[validate(
        required(message = "O telefone é obrigatório"),
        custom(function = "validate_phone")
    )]
    #[schema(value_type = String, example = "11987654321")]
    pub telefone: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        required(message = "O endereço é obrigatório"),
        length(min = 1, message = "O endereço é obrigatório")
    )]
    pub endereco: Option<String>,

    #[serde(
        default,
        rename = "numEndereco",
        deserialize_with = "deserialize_optional_non_blank"
    )]
    #[validate(custom(function = "validate_street_number"))]
    #[schema(value_type = Option<i32>)]
    pub num_endereco: Option<String>,

    /// Birth date, `YYYY-MM-DD` or RFC 3339
    #[serde(
        default,
        rename = "dataNasc",
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    #[validate(
        required(message = "A data de nascimento é obrigatória"),
        custom(function = "validate_birth_date")
    )]
    #[schema(value_type = String, format = Date, example = "2008-03-14")]
    pub data_nasc: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        required(message = "O e-mail é obrigatório"),
        email(message = "O e-mail informado não é válido")
    )]
    pub email: Option<String>,
}

/// Payload of `POST /criarAluno` and `POST /criarProfessor`.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
#[validate(schema(
    function = "validate_person_passwords",
    skip_on_field_errors = false
))]
pub struct CreatePersonDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: PersonProfileDto,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        required(message = "A senha é obrigatória"),
        length(min = 8, message = "A senha deve conter no mínimo 8 caracteres")
    )]
    pub senha1: Option<String>,

    /// Must repeat `senha1`
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(required(message = "A senha é obrigatória"))]
    pub senha2: Option<String>,
}

/// Payload of `PUT /editarDadosAluno` and `PUT /editarDadosProfessor`.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdatePersonDto {
    /// Record id, sent as `alunoId` or `professorId`
    #[serde(
        default,
        alias = "alunoId",
        alias = "professorId",
        deserialize_with = "deserialize_optional_trimmed"
    )]
    pub id: Option<String>,

    #[serde(flatten)]
    #[validate(nested)]
    pub profile: PersonProfileDto,
}

impl CreatePersonDto {
    /// The plaintext password, once validated.
    pub fn password(&self) -> Result<&str, AppError> {
        self.senha1
            .as_deref()
            .ok_or_else(|| AppError::bad_request(anyhow!("A senha é obrigatória")))
    }

    pub fn into_new_person(self, password_hash: String) -> Result<NewPerson, AppError> {
        let changes = PersonChanges::try_from(self.profile)?;
        Ok(NewPerson {
            first_name: changes.first_name,
            last_name: changes.last_name,
            phone: changes.phone,
            address: changes.address,
            street_number: changes.street_number,
            birth_date: changes.birth_date,
            email: changes.email,
            password_hash,
        })
    }
}

impl TryFrom<PersonProfileDto> for PersonChanges {
    type Error = AppError;

    /// Converts a validated profile. Fails with the field message when a
    /// required value is missing or unparseable.
    fn try_from(dto: PersonProfileDto) -> Result<Self, Self::Error> {
        fn required(value: Option<String>, msg: &str) -> Result<String, AppError> {
            value.ok_or_else(|| AppError::bad_request(anyhow!("{}", msg)))
        }

        let phone = dto
            .telefone
            .as_deref()
            .and_then(phone_to_number)
            .ok_or_else(|| AppError::bad_request(anyhow!("O número informado não é válido")))?;
        let birth_date = dto
            .data_nasc
            .as_deref()
            .and_then(parse_birth_date)
            .ok_or_else(|| {
                AppError::bad_request(anyhow!("A data de nascimento é obrigatória"))
            })?;
        let street_number = match dto.num_endereco.as_deref() {
            Some(raw) => Some(parse_street_number(raw).ok_or_else(|| {
                AppError::bad_request(anyhow!("O número do endereço deve ser numérico"))
            })?),
            None => None,
        };

        Ok(Self {
            first_name: required(dto.nome, "O nome é obrigatório")?,
            last_name: required(dto.sobrenome, "O sobrenome é obrigatório")?,
            phone,
            address: required(dto.endereco, "O endereço é obrigatório")?,
            street_number,
            birth_date,
            email: required(dto.email, "O e-mail é obrigatório")?,
        })
    }
}

fn validate_person_passwords(dto: &CreatePersonDto) -> Result<(), ValidationError> {
    confirm_password(dto.senha1.as_deref(), dto.senha2.as_deref())
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if length < 11 {
        return Err(invalid("phone_length", "Número informado é muito curto"));
    }
    if length > 12 {
        return Err(invalid("phone_length", "O número informado é muito longo"));
    }
    if !PHONE_PATTERN.is_match(value) || phone_to_number(value).is_none() {
        return Err(invalid("phone", "O número informado não é válido"));
    }
    Ok(())
}

fn validate_street_number(value: &str) -> Result<(), ValidationError> {
    match parse_street_number(value) {
        Some(_) => Ok(()),
        None => Err(invalid(
            "street_number",
            "O número do endereço deve ser numérico",
        )),
    }
}

fn validate_birth_date(value: &str) -> Result<(), ValidationError> {
    match parse_birth_date(value) {
        Some(_) => Ok(()),
        None => Err(invalid("date", "É necessário que seja uma data")),
    }
}

/// The phone as a number built from its digits.
pub fn phone_to_number(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY` and RFC 3339 timestamps.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

fn parse_street_number(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    raw.parse::<i32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|n| n.fract() == 0.0 && n.abs() <= i32::MAX as f64)
            .map(|n| n as i32)
    })
}

/// `{msg, dados}` carrying one person.
#[derive(Serialize, Debug, ToSchema)]
pub struct PersonResponse {
    pub msg: String,
    pub dados: Person,
}

/// A student with its enrollment and class, if any.
#[derive(Serialize, Debug, ToSchema)]
pub struct StudentWithClass {
    #[serde(rename = "infoPessoal")]
    pub info: Person,
    #[serde(rename = "dadosAlunoTurma")]
    pub enrollment: Option<Enrollment>,
    #[serde(rename = "nomeTurma")]
    pub class: Option<Class>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct StudentListData {
    #[serde(rename = "todosAlunos")]
    pub students: Vec<StudentWithClass>,
}

/// Body of `GET /buscarAlunos`.
#[derive(Serialize, Debug, ToSchema)]
pub struct StudentListResponse {
    pub msg: String,
    pub dados: StudentListData,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct TeacherListData {
    #[serde(rename = "dadosProfessor")]
    pub teachers: Vec<Person>,
}

/// Body of `GET /buscarProfessor`.
#[derive(Serialize, Debug, ToSchema)]
pub struct PersonListResponse {
    pub msg: String,
    pub dados: TeacherListData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use escola_core::errors::validation_messages;
    use serde_json::json;

    fn valid_body() -> serde_json::Value {
        json!({
            "nome": "  Ana ",
            "sobrenome": "Souza",
            "telefone": "11987654321",
            "endereco": "Rua das Flores",
            "numEndereco": 42,
            "dataNasc": "2008-03-14",
            "email": "ana@escola.com",
            "senha1": "segredo123",
            "senha2": "segredo123"
        })
    }

    fn messages(dto: &impl Validate) -> Vec<String> {
        match dto.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => validation_messages(&errors),
        }
    }

    #[test]
    fn test_valid_create_payload() {
        let dto: CreatePersonDto = serde_json::from_value(valid_body()).unwrap();
        assert!(dto.validate().is_ok());

        let person = dto.into_new_person("hash".to_string()).unwrap();
        assert_eq!(person.first_name, "Ana");
        assert_eq!(person.phone, 11987654321);
        assert_eq!(person.street_number, Some(42));
        assert_eq!(person.birth_date, NaiveDate::from_ymd_opt(2008, 3, 14).unwrap());
    }

    #[test]
    fn test_numeric_phone_and_string_street_number() {
        let mut body = valid_body();
        body["telefone"] = json!(11987654321_i64);
        body["numEndereco"] = json!("15");
        let dto: CreatePersonDto = serde_json::from_value(body).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.profile.num_endereco.as_deref(), Some("15"));
    }

    #[test]
    fn test_missing_fields_report_every_message() {
        let dto: CreatePersonDto = serde_json::from_str("{}").unwrap();
        let messages = messages(&dto);
        for expected in [
            "O nome é obrigatório",
            "O sobrenome é obrigatório",
            "O telefone é obrigatório",
            "O endereço é obrigatório",
            "A data de nascimento é obrigatória",
            "O e-mail é obrigatório",
            "A senha é obrigatória",
        ] {
            assert!(messages.iter().any(|m| m == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_password_mismatch() {
        let mut body = valid_body();
        body["senha2"] = json!("outrasenha");
        let dto: CreatePersonDto = serde_json::from_value(body).unwrap();
        assert_eq!(messages(&dto), vec!["As senhas devem ser iguais"]);
    }

    #[test]
    fn test_password_mismatch_reported_with_other_errors() {
        let mut body = valid_body();
        body["nome"] = json!("");
        body["senha2"] = json!("outrasenha");
        let dto: CreatePersonDto = serde_json::from_value(body).unwrap();
        let messages = messages(&dto);
        assert!(messages.iter().any(|m| m == "O nome é obrigatório"));
        assert!(messages.iter().any(|m| m == "As senhas devem ser iguais"));
    }

    #[test]
    fn test_missing_confirmation_is_only_required() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("senha2");
        let dto: CreatePersonDto = serde_json::from_value(body).unwrap();
        assert_eq!(messages(&dto), vec!["A senha é obrigatória"]);
    }

    #[test]
    fn test_short_password() {
        let mut body = valid_body();
        body["senha1"] = json!("curta");
        body["senha2"] = json!("curta");
        let dto: CreatePersonDto = serde_json::from_value(body).unwrap();
        assert_eq!(
            messages(&dto),
            vec!["A senha deve conter no mínimo 8 caracteres"]
        );
    }

    #[test]
    fn test_phone_rules() {
        assert!(validate_phone("11987654321").is_ok());
        assert!(validate_phone("119876543210").is_ok());

        let short = validate_phone("1198765").unwrap_err();
        assert_eq!(short.message.unwrap(), "Número informado é muito curto");

        let long = validate_phone("1198765432100").unwrap_err();
        assert_eq!(long.message.unwrap(), "O número informado é muito longo");

        let invalid = validate_phone("abcdefghijk").unwrap_err();
        assert_eq!(invalid.message.unwrap(), "O número informado não é válido");
    }

    #[test]
    fn test_invalid_date_and_email() {
        let mut body = valid_body();
        body["dataNasc"] = json!("ontem");
        body["email"] = json!("not-an-email");
        let dto: CreatePersonDto = serde_json::from_value(body).unwrap();
        assert_eq!(
            messages(&dto),
            vec!["É necessário que seja uma data", "O e-mail informado não é válido"]
        );
    }

    #[test]
    fn test_birth_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2008, 3, 14);
        assert_eq!(parse_birth_date("2008-03-14"), expected);
        assert_eq!(parse_birth_date("14/03/2008"), expected);
        assert_eq!(parse_birth_date("2008-03-14T10:00:00Z"), expected);
        assert_eq!(parse_birth_date("march"), None);
    }

    #[test]
    fn test_non_numeric_street_number() {
        let mut body = valid_body();
        body["numEndereco"] = json!("sem número");
        let dto: CreatePersonDto = serde_json::from_value(body).unwrap();
        assert_eq!(messages(&dto), vec!["O número do endereço deve ser numérico"]);
    }

    #[test]
    fn test_update_dto_reads_entity_id_keys() {
        let mut body = valid_body();
        body["alunoId"] = json!("abc");
        let dto: UpdatePersonDto = serde_json::from_value(body).unwrap();
        assert_eq!(dto.id.as_deref(), Some("abc"));
        assert!(dto.validate().is_ok());

        let changes = PersonChanges::try_from(dto.profile).unwrap();
        assert_eq!(changes.email, "ana@escola.com");
    }

    #[test]
    fn test_person_hides_password_hash() {
        let person = Person::from_new(
            Uuid::new_v4(),
            NewPerson {
                first_name: "Ana".into(),
                last_name: "Souza".into(),
                phone: 11987654321,
                address: "Rua".into(),
                street_number: None,
                birth_date: NaiveDate::from_ymd_opt(2008, 3, 14).unwrap(),
                email: "ana@escola.com".into(),
                password_hash: "$2b$10$secret".into(),
            },
            Utc::now(),
        );
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["nome"], "Ana");
        assert_eq!(json["dataNasc"], "2008-03-14");
        assert!(json.get("_id").is_some());
        assert!(json.get("numEndereco").is_none());
        assert!(!json.to_string().contains("secret"));
    }
}
