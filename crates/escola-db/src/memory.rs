//! In-process store.
//!
//! All tables sit behind a single [`RwLock`], so every check-then-insert runs
//! under one write guard and concurrent requests cannot interleave inside it.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use escola_config::DatabaseDriver;
use escola_models::{
    Admin, Class, Enrollment, NewAdmin, NewClass, NewPerson, Person, PersonChanges, PersonKind,
    ReportCard,
};

use crate::{Store, StoreError};

#[derive(Default)]
struct Tables {
    students: Vec<Person>,
    teachers: Vec<Person>,
    admins: Vec<Admin>,
    classes: Vec<Class>,
    enrollments: Vec<Enrollment>,
    report_cards: Vec<ReportCard>,
}

impl Tables {
    fn people(&self, kind: PersonKind) -> &Vec<Person> {
        match kind {
            PersonKind::Student => &self.students,
            PersonKind::Teacher => &self.teachers,
        }
    }

    fn people_mut(&mut self, kind: PersonKind) -> &mut Vec<Person> {
        match kind {
            PersonKind::Student => &mut self.students,
            PersonKind::Teacher => &mut self.teachers,
        }
    }
}

/// Rows are kept in insertion order, which is also creation order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn remove_where<T>(rows: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> u64 {
    let before = rows.len();
    rows.retain(|row| !pred(row));
    (before - rows.len()) as u64
}

#[async_trait]
impl Store for MemoryStore {
    fn driver(&self) -> DatabaseDriver {
        DatabaseDriver::Memory
    }

    async fn insert_person(&self, kind: PersonKind, new: NewPerson) -> Result<Person, StoreError> {
        let person = Person::from_new(Uuid::new_v4(), new, Utc::now());
        let mut tables = self.tables.write().await;
        tables.people_mut(kind).push(person.clone());
        Ok(person)
    }

    async fn list_people(&self, kind: PersonKind) -> Result<Vec<Person>, StoreError> {
        Ok(self.tables.read().await.people(kind).clone())
    }

    async fn find_person(&self, kind: PersonKind, id: Uuid) -> Result<Option<Person>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.people(kind).iter().find(|p| p.id == id).cloned())
    }

    async fn find_person_by_name(
        &self,
        kind: PersonKind,
        name: &str,
    ) -> Result<Option<Person>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .people(kind)
            .iter()
            .find(|p| p.first_name == name)
            .cloned())
    }

    async fn update_person(
        &self,
        kind: PersonKind,
        id: Uuid,
        changes: PersonChanges,
    ) -> Result<Option<Person>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(person) = tables.people_mut(kind).iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        person.apply(changes);
        Ok(Some(person.clone()))
    }

    async fn delete_person(&self, kind: PersonKind, id: Uuid) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(remove_where(tables.people_mut(kind), |p| p.id == id))
    }

    async fn insert_admin(&self, new: NewAdmin) -> Result<Admin, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.admins.iter().any(|a| a.email == new.email) {
            return Err(StoreError::Duplicate {
                entity: "admin",
                field: "email",
                value: new.email,
            });
        }

        let admin = Admin {
            id: Uuid::new_v4(),
            email: new.email,
            password_hash: new.password_hash,
            permission: new.permission,
            created_at: Utc::now(),
        };
        tables.admins.push(admin.clone());
        Ok(admin)
    }

    async fn list_admins(&self) -> Result<Vec<Admin>, StoreError> {
        Ok(self.tables.read().await.admins.clone())
    }

    async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.admins.iter().find(|a| a.id == id).cloned())
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.admins.iter().find(|a| a.email == email).cloned())
    }

    async fn update_admin(
        &self,
        id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Admin>, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.admins.iter().any(|a| a.email == email && a.id != id) {
            return Err(StoreError::Duplicate {
                entity: "admin",
                field: "email",
                value: email.to_string(),
            });
        }

        let Some(admin) = tables.admins.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        admin.email = email.to_string();
        admin.password_hash = password_hash.to_string();
        Ok(Some(admin.clone()))
    }

    async fn delete_admin(&self, id: Uuid) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(remove_where(&mut tables.admins, |a| a.id == id))
    }

    async fn insert_class(&self, new: NewClass) -> Result<Class, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.classes.iter().any(|c| c.name == new.name) {
            return Err(StoreError::Duplicate {
                entity: "class",
                field: "name",
                value: new.name,
            });
        }

        let class = Class {
            id: Uuid::new_v4(),
            name: new.name,
            teacher_id: new.teacher_id,
            created_at: Utc::now(),
        };
        tables.classes.push(class.clone());
        Ok(class)
    }

    async fn list_classes(&self) -> Result<Vec<Class>, StoreError> {
        Ok(self.tables.read().await.classes.clone())
    }

    async fn find_class(&self, id: Uuid) -> Result<Option<Class>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.classes.iter().find(|c| c.id == id).cloned())
    }

    async fn find_class_by_name(&self, name: &str) -> Result<Option<Class>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.classes.iter().find(|c| c.name == name).cloned())
    }

    async fn update_class(&self, id: Uuid, changes: NewClass) -> Result<Option<Class>, StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .classes
            .iter()
            .any(|c| c.name == changes.name && c.id != id)
        {
            return Err(StoreError::Duplicate {
                entity: "class",
                field: "name",
                value: changes.name,
            });
        }

        let Some(class) = tables.classes.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        class.name = changes.name;
        class.teacher_id = changes.teacher_id;
        Ok(Some(class.clone()))
    }

    async fn delete_class(&self, id: Uuid) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(remove_where(&mut tables.classes, |c| c.id == id))
    }

    async fn enroll(
        &self,
        student_id: Uuid,
        class_id: Uuid,
    ) -> Result<(Enrollment, ReportCard), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables
            .enrollments
            .iter()
            .find(|e| e.student_id == student_id)
        {
            return Err(StoreError::AlreadyEnrolled {
                class_id: existing.class_id,
            });
        }

        let now = Utc::now();
        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            student_id,
            class_id,
            created_at: now,
        };
        let report_card = ReportCard {
            id: Uuid::new_v4(),
            student_id,
            created_at: now,
        };
        tables.enrollments.push(enrollment.clone());
        tables.report_cards.push(report_card.clone());
        Ok((enrollment, report_card))
    }

    async fn find_enrollment_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Option<Enrollment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrollments
            .iter()
            .find(|e| e.student_id == student_id)
            .cloned())
    }

    async fn list_enrollments(&self) -> Result<Vec<Enrollment>, StoreError> {
        Ok(self.tables.read().await.enrollments.clone())
    }

    async fn list_report_cards(&self) -> Result<Vec<ReportCard>, StoreError> {
        Ok(self.tables.read().await.report_cards.clone())
    }
}
