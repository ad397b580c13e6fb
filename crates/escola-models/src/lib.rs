//! # Escola Models
//!
//! Domain models and DTOs for the Escola API.
//!
//! Records serialize with the field names the school front end expects
//! (`_id`, `nome`, `dataNasc`, ...) while the Rust side and the database use
//! English names. Password hashes are never serialized.
//!
//! # Modules
//!
//! - [`admins`]: Administrator accounts, credentials and login
//! - [`classes`]: Classes ("turmas") and their teacher
//! - [`common`]: Message, echo and delete bodies shared by every entity
//! - [`enrollments`]: Enrollments and report cards
//! - [`people`]: Students and teachers, which share one shape
//!
//! # Example
//!
//! ```ignore
//! use escola_models::people::{CreatePersonDto, PersonKind};
//! use validator::Validate;
//!
//! let dto: CreatePersonDto = serde_json::from_value(body)?;
//! dto.validate()?;
//! let new_student = dto.into_new_person(hash)?;
//! ```

pub mod admins;
pub mod classes;
pub mod common;
pub mod enrollments;
pub mod people;

// Re-export commonly used types at crate root for convenience
pub use admins::{
    ADMIN_PERMISSION, Admin, AdminCredentialsDto, AdminListResponse, AdminResponse,
    DEFAULT_PERMISSION, LoginRequest, LoginResponse, NewAdmin, UpdateAdminDto,
};

pub use classes::{
    Class, ClassCreatedResponse, ClassDto, ClassListResponse, ClassUpdatedResponse, NewClass,
    UpdateClassDto,
};

pub use common::{DeleteRecordDto, EchoIdResponse, MessageResponse, parse_record_id};

pub use enrollments::{EnrollStudentDto, Enrollment, EnrollmentResponse, ReportCard};

pub use people::{
    CreatePersonDto, NewPerson, Person, PersonChanges, PersonKind, PersonListResponse,
    PersonProfileDto, PersonResponse, StudentListResponse, StudentWithClass, UpdatePersonDto,
};
