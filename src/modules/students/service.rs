use std::collections::HashMap;

use escola_core::AppError;
use escola_db::Store;
use escola_models::{Class, Enrollment, PersonKind, StudentWithClass};
use tracing::instrument;
use uuid::Uuid;

pub struct StudentService;

impl StudentService {
    /// Every student, newest first, with its enrollment and class.
    ///
    /// Students without an enrollment, or whose class has been deleted, get
    /// `None` for the missing parts.
    #[instrument(skip(store))]
    pub async fn list_with_classes(store: &dyn Store) -> Result<Vec<StudentWithClass>, AppError> {
        let students = store.list_people(PersonKind::Student).await?;

        let mut enrollments: HashMap<Uuid, Enrollment> = store
            .list_enrollments()
            .await?
            .into_iter()
            .map(|enrollment| (enrollment.student_id, enrollment))
            .collect();
        let classes: HashMap<Uuid, Class> = store
            .list_classes()
            .await?
            .into_iter()
            .map(|class| (class.id, class))
            .collect();

        let joined = students
            .into_iter()
            .rev()
            .map(|info| {
                let enrollment = enrollments.remove(&info.id);
                let class = enrollment
                    .as_ref()
                    .and_then(|enrollment| classes.get(&enrollment.class_id).cloned());
                StudentWithClass {
                    info,
                    enrollment,
                    class,
                }
            })
            .collect();

        Ok(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use escola_db::MemoryStore;
    use escola_models::{NewClass, NewPerson};

    fn student(name: &str) -> NewPerson {
        NewPerson {
            first_name: name.to_string(),
            last_name: "Lima".to_string(),
            phone: 11987654321,
            address: "Rua A".to_string(),
            street_number: None,
            birth_date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            email: format!("{}@escola.com", name.to_lowercase()),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_lists_newest_first_with_class() {
        let store = MemoryStore::new();
        let first = store
            .insert_person(PersonKind::Student, student("Bia"))
            .await
            .unwrap();
        let second = store
            .insert_person(PersonKind::Student, student("Caio"))
            .await
            .unwrap();
        let class = store
            .insert_class(NewClass {
                name: "Turma A".to_string(),
                teacher_id: Uuid::new_v4(),
            })
            .await
            .unwrap();
        store.enroll(first.id, class.id).await.unwrap();

        let listed = StudentService::list_with_classes(&store).await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].info.id, second.id);
        assert!(listed[0].enrollment.is_none());
        assert!(listed[0].class.is_none());
        assert_eq!(listed[1].info.id, first.id);
        assert_eq!(listed[1].class.as_ref().map(|c| c.id), Some(class.id));
    }

    #[tokio::test]
    async fn test_deleted_class_leaves_enrollment() {
        let store = MemoryStore::new();
        let bia = store
            .insert_person(PersonKind::Student, student("Bia"))
            .await
            .unwrap();
        let class = store
            .insert_class(NewClass {
                name: "Turma B".to_string(),
                teacher_id: Uuid::new_v4(),
            })
            .await
            .unwrap();
        store.enroll(bia.id, class.id).await.unwrap();
        store.delete_class(class.id).await.unwrap();

        let listed = StudentService::list_with_classes(&store).await.unwrap();

        assert!(listed[0].enrollment.is_some());
        assert!(listed[0].class.is_none());
    }
}
