//! PostgreSQL driver.
//!
//! Queries are built at runtime with `query_as` so the crate compiles without a
//! reachable database. Uniqueness is enforced by the indexes created in the
//! migrations, and enrollment runs in a transaction.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use escola_config::DatabaseDriver;
use escola_models::{
    Admin, Class, Enrollment, NewAdmin, NewClass, NewPerson, Person, PersonChanges, PersonKind,
    ReportCard,
};

use crate::{Store, StoreError};

const PERSON_COLUMNS: &str = "id, first_name, last_name, phone, address, street_number, \
                              birth_date, email, password_hash, created_at";
const ADMIN_COLUMNS: &str = "id, email, password_hash, permission, created_at";
const CLASS_COLUMNS: &str = "id, name, teacher_id, created_at";
const ENROLLMENT_COLUMNS: &str = "id, student_id, class_id, created_at";
const REPORT_CARD_COLUMNS: &str = "id, student_id, created_at";

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connects a pool to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the connection fails.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migration`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl Store for PostgresStore {
    fn driver(&self) -> DatabaseDriver {
        DatabaseDriver::Postgres
    }

    async fn insert_person(&self, kind: PersonKind, new: NewPerson) -> Result<Person, StoreError> {
        let sql = format!(
            "INSERT INTO {} (first_name, last_name, phone, address, street_number, birth_date, \
             email, password_hash) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            kind.table(),
            PERSON_COLUMNS
        );
        let person = sqlx::query_as::<_, Person>(&sql)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .bind(new.phone)
            .bind(&new.address)
            .bind(new.street_number)
            .bind(new.birth_date)
            .bind(&new.email)
            .bind(&new.password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(person)
    }

    async fn list_people(&self, kind: PersonKind) -> Result<Vec<Person>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at ASC, id ASC",
            PERSON_COLUMNS,
            kind.table()
        );
        Ok(sqlx::query_as::<_, Person>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_person(&self, kind: PersonKind, id: Uuid) -> Result<Option<Person>, StoreError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", PERSON_COLUMNS, kind.table());
        Ok(sqlx::query_as::<_, Person>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_person_by_name(
        &self,
        kind: PersonKind,
        name: &str,
    ) -> Result<Option<Person>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE first_name = $1 ORDER BY created_at ASC, id ASC LIMIT 1",
            PERSON_COLUMNS,
            kind.table()
        );
        Ok(sqlx::query_as::<_, Person>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_person(
        &self,
        kind: PersonKind,
        id: Uuid,
        changes: PersonChanges,
    ) -> Result<Option<Person>, StoreError> {
        let sql = format!(
            "UPDATE {} SET first_name = $2, last_name = $3, phone = $4, address = $5, \
             street_number = $6, birth_date = $7, email = $8 WHERE id = $1 RETURNING {}",
            kind.table(),
            PERSON_COLUMNS
        );
        Ok(sqlx::query_as::<_, Person>(&sql)
            .bind(id)
            .bind(&changes.first_name)
            .bind(&changes.last_name)
            .bind(changes.phone)
            .bind(&changes.address)
            .bind(changes.street_number)
            .bind(changes.birth_date)
            .bind(&changes.email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_person(&self, kind: PersonKind, id: Uuid) -> Result<u64, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn insert_admin(&self, new: NewAdmin) -> Result<Admin, StoreError> {
        let sql = format!(
            "INSERT INTO admins (email, password_hash, permission) VALUES ($1, $2, $3) \
             RETURNING {}",
            ADMIN_COLUMNS
        );
        sqlx::query_as::<_, Admin>(&sql)
            .bind(&new.email)
            .bind(&new.password_hash)
            .bind(new.permission)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::from_insert(e, "admin", "email", &new.email))
    }

    async fn list_admins(&self) -> Result<Vec<Admin>, StoreError> {
        let sql = format!("SELECT {} FROM admins ORDER BY created_at ASC, id ASC", ADMIN_COLUMNS);
        Ok(sqlx::query_as::<_, Admin>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
        let sql = format!("SELECT {} FROM admins WHERE id = $1", ADMIN_COLUMNS);
        Ok(sqlx::query_as::<_, Admin>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        let sql = format!("SELECT {} FROM admins WHERE email = $1", ADMIN_COLUMNS);
        Ok(sqlx::query_as::<_, Admin>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_admin(
        &self,
        id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Admin>, StoreError> {
        let sql = format!(
            "UPDATE admins SET email = $2, password_hash = $3 WHERE id = $1 RETURNING {}",
            ADMIN_COLUMNS
        );
        sqlx::query_as::<_, Admin>(&sql)
            .bind(id)
            .bind(email)
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_insert(e, "admin", "email", email))
    }

    async fn delete_admin(&self, id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_class(&self, new: NewClass) -> Result<Class, StoreError> {
        let sql = format!(
            "INSERT INTO classes (name, teacher_id) VALUES ($1, $2) RETURNING {}",
            CLASS_COLUMNS
        );
        sqlx::query_as::<_, Class>(&sql)
            .bind(&new.name)
            .bind(new.teacher_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::from_insert(e, "class", "name", &new.name))
    }

    async fn list_classes(&self) -> Result<Vec<Class>, StoreError> {
        let sql = format!("SELECT {} FROM classes ORDER BY created_at ASC, id ASC", CLASS_COLUMNS);
        Ok(sqlx::query_as::<_, Class>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_class(&self, id: Uuid) -> Result<Option<Class>, StoreError> {
        let sql = format!("SELECT {} FROM classes WHERE id = $1", CLASS_COLUMNS);
        Ok(sqlx::query_as::<_, Class>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_class_by_name(&self, name: &str) -> Result<Option<Class>, StoreError> {
        let sql = format!("SELECT {} FROM classes WHERE name = $1", CLASS_COLUMNS);
        Ok(sqlx::query_as::<_, Class>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_class(&self, id: Uuid, changes: NewClass) -> Result<Option<Class>, StoreError> {
        let sql = format!(
            "UPDATE classes SET name = $2, teacher_id = $3 WHERE id = $1 RETURNING {}",
            CLASS_COLUMNS
        );
        sqlx::query_as::<_, Class>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(changes.teacher_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_insert(e, "class", "name", &changes.name))
    }

    async fn delete_class(&self, id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn enroll(
        &self,
        student_id: Uuid,
        class_id: Uuid,
    ) -> Result<(Enrollment, ReportCard), StoreError> {
        let mut tx = self.pool.begin().await?;

        let insert_enrollment = format!(
            "INSERT INTO enrollments (student_id, class_id) VALUES ($1, $2) \
             ON CONFLICT (student_id) DO NOTHING RETURNING {}",
            ENROLLMENT_COLUMNS
        );
        let inserted = sqlx::query_as::<_, Enrollment>(&insert_enrollment)
            .bind(student_id)
            .bind(class_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(enrollment) = inserted else {
            let (existing,): (Uuid,) =
                sqlx::query_as("SELECT class_id FROM enrollments WHERE student_id = $1")
                    .bind(student_id)
                    .fetch_one(&mut *tx)
                    .await?;
            tx.rollback().await?;
            return Err(StoreError::AlreadyEnrolled { class_id: existing });
        };

        let insert_report_card = format!(
            "INSERT INTO report_cards (student_id) VALUES ($1) RETURNING {}",
            REPORT_CARD_COLUMNS
        );
        let report_card = sqlx::query_as::<_, ReportCard>(&insert_report_card)
            .bind(student_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((enrollment, report_card))
    }

    async fn find_enrollment_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Option<Enrollment>, StoreError> {
        let sql = format!(
            "SELECT {} FROM enrollments WHERE student_id = $1",
            ENROLLMENT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Enrollment>(&sql)
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_enrollments(&self) -> Result<Vec<Enrollment>, StoreError> {
        let sql = format!(
            "SELECT {} FROM enrollments ORDER BY created_at ASC, id ASC",
            ENROLLMENT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Enrollment>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn list_report_cards(&self) -> Result<Vec<ReportCard>, StoreError> {
        let sql = format!(
            "SELECT {} FROM report_cards ORDER BY created_at ASC, id ASC",
            REPORT_CARD_COLUMNS
        );
        Ok(sqlx::query_as::<_, ReportCard>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }
}
