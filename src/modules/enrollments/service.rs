use anyhow::anyhow;
use escola_core::AppError;
use escola_db::{Store, StoreError};
use escola_models::{EnrollStudentDto, EnrollmentResponse, PersonKind};
use tracing::{info, instrument, warn};

use crate::metrics::track_enrollment;

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enrolls the named student in the named class and opens its report card.
    ///
    /// A student belongs to at most one class. Unknown names and repeated
    /// enrollments fail with 400 and write nothing.
    #[instrument(skip(store, dto), fields(student = ?dto.student_name, class = ?dto.class_name))]
    pub async fn enroll(
        store: &dyn Store,
        dto: EnrollStudentDto,
    ) -> Result<EnrollmentResponse, AppError> {
        let student_name = dto
            .student_name
            .ok_or_else(|| AppError::bad_request(anyhow!("Informar o aluno é obrigatório")))?;
        let class_name = dto
            .class_name
            .ok_or_else(|| AppError::bad_request(anyhow!("Informar a turma é obrigatório")))?;

        let Some(student) = store
            .find_person_by_name(PersonKind::Student, &student_name)
            .await?
        else {
            track_enrollment("unknown_student");
            return Err(AppError::bad_request(anyhow!(
                "O aluno informado não está cadastrado"
            )));
        };

        let Some(class) = store.find_class_by_name(&class_name).await? else {
            track_enrollment("unknown_class");
            return Err(AppError::bad_request(anyhow!(
                "A turma informada não está cadastrada"
            )));
        };

        let (enrollment, report_card) = match store.enroll(student.id, class.id).await {
            Ok(written) => written,
            Err(StoreError::AlreadyEnrolled { class_id }) => {
                track_enrollment("already_enrolled");
                let current = match store.find_class(class_id).await {
                    Ok(Some(current)) => current.name,
                    Ok(None) => class_id.to_string(),
                    Err(err) => {
                        warn!(error = %err, %class_id, "Could not load the current class");
                        class_id.to_string()
                    }
                };
                return Err(AppError::bad_request(anyhow!(
                    "O aluno já está cadastrado na turma: {}",
                    current
                )));
            }
            Err(err) => return Err(err.into()),
        };

        track_enrollment("enrolled");
        info!(
            student_id = %student.id,
            class_id = %class.id,
            enrollment_id = %enrollment.id,
            "Student enrolled"
        );

        Ok(EnrollmentResponse {
            msg: "Aluno inserido com sucesso".to_string(),
            student_name: student.first_name,
            student_id: student.id,
            class_name: class.name,
            class_id: class.id,
            enrollment_id: enrollment.id,
            report_card_id: report_card.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use escola_db::MemoryStore;
    use escola_models::{NewClass, NewPerson};
    use uuid::Uuid;

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_person(
                PersonKind::Student,
                NewPerson {
                    first_name: "Bia".to_string(),
                    last_name: "Lima".to_string(),
                    phone: 11987654321,
                    address: "Rua A".to_string(),
                    street_number: None,
                    birth_date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
                    email: "bia@escola.com".to_string(),
                    password_hash: "hash".to_string(),
                },
            )
            .await
            .unwrap();
        for name in ["Turma A", "Turma B"] {
            store
                .insert_class(NewClass {
                    name: name.to_string(),
                    teacher_id: Uuid::new_v4(),
                })
                .await
                .unwrap();
        }
        store
    }

    fn dto(student: &str, class: &str) -> EnrollStudentDto {
        EnrollStudentDto {
            student_name: Some(student.to_string()),
            class_name: Some(class.to_string()),
        }
    }

    #[tokio::test]
    async fn test_enroll_creates_enrollment_and_report_card() {
        let store = seeded_store().await;

        let response = EnrollmentService::enroll(&store, dto("Bia", "Turma A"))
            .await
            .unwrap();

        let enrollments = store.list_enrollments().await.unwrap();
        let report_cards = store.list_report_cards().await.unwrap();
        assert_eq!(enrollments.len(), 1);
        assert_eq!(report_cards.len(), 1);
        assert_eq!(enrollments[0].id, response.enrollment_id);
        assert_eq!(report_cards[0].id, response.report_card_id);
        assert_eq!(report_cards[0].student_id, response.student_id);
    }

    #[tokio::test]
    async fn test_second_enrollment_names_current_class() {
        let store = seeded_store().await;
        EnrollmentService::enroll(&store, dto("Bia", "Turma A"))
            .await
            .unwrap();

        let err = EnrollmentService::enroll(&store, dto("Bia", "Turma B"))
            .await
            .unwrap_err();

        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(
            err.error.to_string(),
            "O aluno já está cadastrado na turma: Turma A"
        );
        assert_eq!(store.list_enrollments().await.unwrap().len(), 1);
        assert_eq!(store.list_report_cards().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_names_write_nothing() {
        let store = seeded_store().await;

        let err = EnrollmentService::enroll(&store, dto("Caio", "Turma A"))
            .await
            .unwrap_err();
        assert_eq!(err.error.to_string(), "O aluno informado não está cadastrado");

        let err = EnrollmentService::enroll(&store, dto("Bia", "Turma Z"))
            .await
            .unwrap_err();
        assert_eq!(err.error.to_string(), "A turma informada não está cadastrada");

        assert!(store.list_enrollments().await.unwrap().is_empty());
        assert!(store.list_report_cards().await.unwrap().is_empty());
    }
}
