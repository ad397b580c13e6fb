//! Fills a store with fake teachers, students, classes and enrollments.
//!
//! Records go through the same services as the HTTP handlers, so they are
//! validated and hashed exactly like real ones.

use std::time::Instant;

use escola_core::AppError;
use escola_db::Store;
use escola_models::{ClassDto, CreatePersonDto, EnrollStudentDto, PersonKind, PersonProfileDto};
use fake::Fake;
use fake::faker::address::en::StreetName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use tracing::{info, warn};
use validator::Validate;

use crate::modules::classes::service::ClassService;
use crate::modules::enrollments::service::EnrollmentService;
use crate::modules::people::service::PersonService;

/// Password given to every seeded person.
pub const SEED_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Copy)]
pub struct SeedCounts {
    pub teachers: usize,
    pub students: usize,
    pub classes: usize,
}

impl Default for SeedCounts {
    fn default() -> Self {
        Self {
            teachers: 3,
            students: 20,
            classes: 3,
        }
    }
}

/// What a seeding run actually wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub teachers: usize,
    pub students: usize,
    pub classes: usize,
    pub enrollments: usize,
}

fn fake_person() -> CreatePersonDto {
    let birth_date = format!(
        "{}-{:02}-{:02}",
        (1970..2015).fake::<i32>(),
        (1..=12).fake::<u32>(),
        (1..=28).fake::<u32>()
    );

    CreatePersonDto {
        profile: PersonProfileDto {
            nome: Some(FirstName().fake()),
            sobrenome: Some(LastName().fake()),
            telefone: Some(format!("11{:09}", (100_000_000..999_999_999).fake::<u64>())),
            endereco: Some(StreetName().fake()),
            num_endereco: Some((1..2000).fake::<u32>().to_string()),
            data_nasc: Some(birth_date),
            email: Some(SafeEmail().fake()),
        },
        senha1: Some(SEED_PASSWORD.to_string()),
        senha2: Some(SEED_PASSWORD.to_string()),
    }
}

/// Class names `Turma A`, `Turma B`, ... then `Turma 27`, `Turma 28`, ...
fn class_name(index: usize) -> String {
    match u8::try_from(index).ok().filter(|i| *i < 26) {
        Some(i) => format!("Turma {}", char::from(b'A' + i)),
        None => format!("Turma {}", index + 1),
    }
}

/// Seeds the store. Students are spread over the classes round-robin and
/// classes over the teachers.
///
/// Name collisions are expected with fake data: a class whose name exists,
/// or a student whose name resolves to someone already enrolled, is skipped.
///
/// # Errors
///
/// Fails on the first store error.
pub async fn seed(store: &dyn Store, counts: SeedCounts) -> Result<SeedSummary, AppError> {
    let start = Instant::now();
    let mut summary = SeedSummary::default();

    let mut teacher_names = Vec::with_capacity(counts.teachers);
    for _ in 0..counts.teachers {
        let dto = fake_person();
        dto.validate()?;
        let teacher = PersonService::create(store, PersonKind::Teacher, dto).await?;
        teacher_names.push(teacher.first_name);
        summary.teachers += 1;
    }

    let mut class_names = Vec::with_capacity(counts.classes);
    if !teacher_names.is_empty() {
        for index in 0..counts.classes {
            let dto = ClassDto {
                nome: Some(class_name(index)),
                professor: Some(teacher_names[index % teacher_names.len()].clone()),
            };
            match ClassService::create(store, dto).await {
                Ok((class, _)) => {
                    class_names.push(class.name);
                    summary.classes += 1;
                }
                Err(err) if err.status.is_client_error() => {
                    warn!(error = %err, "Skipping class");
                }
                Err(err) => return Err(err),
            }
        }
    }

    for index in 0..counts.students {
        let dto = fake_person();
        dto.validate()?;
        let student = PersonService::create(store, PersonKind::Student, dto).await?;
        summary.students += 1;

        if class_names.is_empty() {
            continue;
        }
        let enrollment = EnrollStudentDto {
            student_name: Some(student.first_name),
            class_name: Some(class_names[index % class_names.len()].clone()),
        };
        match EnrollmentService::enroll(store, enrollment).await {
            Ok(_) => summary.enrollments += 1,
            Err(err) if err.status.is_client_error() => {
                warn!(error = %err, "Skipping enrollment");
            }
            Err(err) => return Err(err),
        }
    }

    info!(?summary, elapsed = ?start.elapsed(), "Seeding finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use escola_db::MemoryStore;

    #[test]
    fn test_fake_person_is_valid() {
        for _ in 0..20 {
            assert!(fake_person().validate().is_ok());
        }
    }

    #[test]
    fn test_class_names() {
        assert_eq!(class_name(0), "Turma A");
        assert_eq!(class_name(25), "Turma Z");
        assert_eq!(class_name(26), "Turma 27");
    }

    #[tokio::test]
    async fn test_seed_fills_store() {
        let store = MemoryStore::new();
        let counts = SeedCounts {
            teachers: 2,
            students: 5,
            classes: 2,
        };

        let summary = seed(&store, counts).await.unwrap();

        assert_eq!(summary.teachers, 2);
        assert_eq!(summary.students, 5);
        assert_eq!(summary.classes, 2);
        assert!(summary.enrollments >= 1);
        assert_eq!(
            store.list_enrollments().await.unwrap().len(),
            summary.enrollments
        );
        assert_eq!(
            store.list_report_cards().await.unwrap().len(),
            summary.enrollments
        );
    }
}
