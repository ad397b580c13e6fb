//! # Escola DB
//!
//! Persistence layer for the Escola API.
//!
//! Everything the handlers read or write goes through the [`Store`] trait.
//! There are two drivers:
//!
//! - [`PostgresStore`]: PostgreSQL through a SQLx pool, schema managed by the
//!   embedded migrations in `migrations/`
//! - [`MemoryStore`]: process-local tables behind one lock, for development
//!   and tests
//!
//! The persistent records are:
//!
//!  Table          | Record                                      | Uniqueness
//! ---|---|---
//!  `students`     | [`Person`]                                  | none
//!  `teachers`     | [`Person`]                                  | none
//!  `admins`       | [`Admin`]                                   | `email`
//!  `classes`      | [`Class`]                                   | `name`
//!  `enrollments`  | [`Enrollment`]                              | `student_id`
//!  `report_cards` | [`ReportCard`]                              | `student_id`
//!
//! References between tables are plain ids. Deleting a student, teacher or
//! class leaves the records pointing at it untouched.
//!
//! # Example
//!
//! ```ignore
//! use escola_config::DatabaseConfig;
//! use escola_db::init_store;
//!
//! let store = init_store(&DatabaseConfig::from_env()).await?;
//! let classes = store.list_classes().await?;
//! ```

pub mod error;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use escola_config::{DatabaseConfig, DatabaseDriver};
use escola_models::{
    Admin, Class, Enrollment, NewAdmin, NewClass, NewPerson, Person, PersonChanges, PersonKind,
    ReportCard,
};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// The persistence trait. It contains every read and write the API performs.
///
/// Lists are ordered oldest first. Name lookups return the oldest match.
/// Deletes report how many records were removed; removing an unknown id is
/// not an error.
#[async_trait]
pub trait Store: Send + Sync {
    fn driver(&self) -> DatabaseDriver;

    // Students and teachers

    async fn insert_person(&self, kind: PersonKind, new: NewPerson) -> Result<Person, StoreError>;

    async fn list_people(&self, kind: PersonKind) -> Result<Vec<Person>, StoreError>;

    async fn find_person(&self, kind: PersonKind, id: Uuid) -> Result<Option<Person>, StoreError>;

    /// Looks a person up by first name.
    async fn find_person_by_name(
        &self,
        kind: PersonKind,
        name: &str,
    ) -> Result<Option<Person>, StoreError>;

    /// Overwrites the editable fields. `None` when the id is unknown.
    async fn update_person(
        &self,
        kind: PersonKind,
        id: Uuid,
        changes: PersonChanges,
    ) -> Result<Option<Person>, StoreError>;

    async fn delete_person(&self, kind: PersonKind, id: Uuid) -> Result<u64, StoreError>;

    // Administrators

    /// # Errors
    ///
    /// [`StoreError::Duplicate`] when the e-mail is taken.
    async fn insert_admin(&self, new: NewAdmin) -> Result<Admin, StoreError>;

    async fn list_admins(&self) -> Result<Vec<Admin>, StoreError>;

    async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>, StoreError>;

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError>;

    /// Replaces e-mail and password hash. `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// [`StoreError::Duplicate`] when the e-mail belongs to another account.
    async fn update_admin(
        &self,
        id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Admin>, StoreError>;

    async fn delete_admin(&self, id: Uuid) -> Result<u64, StoreError>;

    // Classes

    /// # Errors
    ///
    /// [`StoreError::Duplicate`] when a class with the same name exists.
    async fn insert_class(&self, new: NewClass) -> Result<Class, StoreError>;

    async fn list_classes(&self) -> Result<Vec<Class>, StoreError>;

    async fn find_class(&self, id: Uuid) -> Result<Option<Class>, StoreError>;

    async fn find_class_by_name(&self, name: &str) -> Result<Option<Class>, StoreError>;

    /// Renames the class and reassigns its teacher. `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// [`StoreError::Duplicate`] when another class already has the name.
    async fn update_class(&self, id: Uuid, changes: NewClass) -> Result<Option<Class>, StoreError>;

    async fn delete_class(&self, id: Uuid) -> Result<u64, StoreError>;

    // Enrollments

    /// Enrolls the student and creates its report card as one unit of work.
    ///
    /// # Errors
    ///
    /// [`StoreError::AlreadyEnrolled`] when the student has an enrollment;
    /// nothing is written in that case.
    async fn enroll(
        &self,
        student_id: Uuid,
        class_id: Uuid,
    ) -> Result<(Enrollment, ReportCard), StoreError>;

    async fn find_enrollment_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Option<Enrollment>, StoreError>;

    async fn list_enrollments(&self) -> Result<Vec<Enrollment>, StoreError>;

    async fn list_report_cards(&self) -> Result<Vec<ReportCard>, StoreError>;
}

/// Builds the store selected by `config`.
///
/// For PostgreSQL this connects the pool and, unless disabled, applies the
/// embedded migrations.
///
/// # Errors
///
/// Fails when the driver needs a URL that is not configured, when the
/// connection cannot be established, or when a migration fails.
pub async fn init_store(config: &DatabaseConfig) -> Result<Arc<dyn Store>, StoreError> {
    match config.driver {
        DatabaseDriver::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        DatabaseDriver::Postgres => {
            let url = config.url.as_deref().ok_or_else(|| {
                StoreError::Configuration(
                    "DATABASE_URL must be set for the postgres driver".to_string(),
                )
            })?;
            let store = PostgresStore::connect(url, config.max_connections).await?;
            if config.run_migrations {
                store.migrate().await?;
            }
            tracing::info!(max_connections = config.max_connections, "Connected to PostgreSQL");
            Ok(Arc::new(store))
        }
    }
}
