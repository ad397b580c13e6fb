use anyhow::anyhow;
use escola_core::AppError;
use escola_db::{Store, StoreError};
use escola_models::{
    Class, ClassDto, NewClass, Person, PersonKind, UpdateClassDto, parse_record_id,
};
use tracing::{info, instrument};

use crate::metrics::{track_record_created, track_record_deleted};

pub struct ClassService;

fn not_registered() -> AppError {
    AppError::bad_request(anyhow!("A turma informada não está cadastrada"))
}

fn duplicate_name(err: StoreError) -> AppError {
    match err {
        StoreError::Duplicate { value, .. } => {
            AppError::bad_request(anyhow!("A turma {} já existe", value))
        }
        other => other.into(),
    }
}

/// Validated class name plus the teacher it names.
async fn resolve(store: &dyn Store, dto: ClassDto) -> Result<(String, Person), AppError> {
    let name = dto
        .nome
        .ok_or_else(|| AppError::bad_request(anyhow!("O nome da turma é obrigatório")))?;
    let teacher_name = dto
        .professor
        .ok_or_else(|| AppError::bad_request(anyhow!("O nome do professor é obrigatório")))?;

    let teacher = store
        .find_person_by_name(PersonKind::Teacher, &teacher_name)
        .await?
        .ok_or_else(|| {
            AppError::bad_request(anyhow!("O professor selecionado não está cadastrado"))
        })?;

    Ok((name, teacher))
}

impl ClassService {
    /// Creates the class under the teacher named in `dto`. Returns the class
    /// and its teacher.
    #[instrument(skip(store, dto), fields(name = ?dto.nome))]
    pub async fn create(store: &dyn Store, dto: ClassDto) -> Result<(Class, Person), AppError> {
        let (name, teacher) = resolve(store, dto).await?;

        let class = store
            .insert_class(NewClass {
                name,
                teacher_id: teacher.id,
            })
            .await
            .map_err(duplicate_name)?;

        track_record_created("class");
        info!(id = %class.id, teacher_id = %teacher.id, "Class created");
        Ok((class, teacher))
    }

    #[instrument(skip(store))]
    pub async fn list(store: &dyn Store) -> Result<Vec<Class>, AppError> {
        Ok(store.list_classes().await?)
    }

    /// Renames the class and reassigns it to the teacher named in `dto`.
    #[instrument(skip(store, dto), fields(id = ?dto.id))]
    pub async fn update(
        store: &dyn Store,
        dto: UpdateClassDto,
    ) -> Result<(Class, Person), AppError> {
        let id = parse_record_id(dto.id.as_deref()).ok_or_else(not_registered)?;
        let (name, teacher) = resolve(store, dto.class).await?;

        let class = store
            .update_class(
                id,
                NewClass {
                    name,
                    teacher_id: teacher.id,
                },
            )
            .await
            .map_err(duplicate_name)?
            .ok_or_else(not_registered)?;

        Ok((class, teacher))
    }

    /// Enrollments pointing at the class are left as they are.
    #[instrument(skip(store))]
    pub async fn delete(store: &dyn Store, raw_id: Option<&str>) -> Result<u64, AppError> {
        let id = parse_record_id(raw_id)
            .ok_or_else(|| AppError::bad_request(anyhow!("Identificador inválido")))?;

        let removed = store.delete_class(id).await?;
        track_record_deleted("class", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use escola_db::MemoryStore;
    use escola_models::NewPerson;

    async fn store_with_teacher(name: &str) -> (MemoryStore, Person) {
        let store = MemoryStore::new();
        let teacher = store
            .insert_person(
                PersonKind::Teacher,
                NewPerson {
                    first_name: name.to_string(),
                    last_name: "Souza".to_string(),
                    phone: 11987654321,
                    address: "Rua B".to_string(),
                    street_number: Some(10),
                    birth_date: NaiveDate::from_ymd_opt(1980, 5, 2).unwrap(),
                    email: "ana@escola.com".to_string(),
                    password_hash: "hash".to_string(),
                },
            )
            .await
            .unwrap();
        (store, teacher)
    }

    fn class_dto(name: &str, teacher: &str) -> ClassDto {
        ClassDto {
            nome: Some(name.to_string()),
            professor: Some(teacher.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_resolves_teacher() {
        let (store, teacher) = store_with_teacher("Ana").await;

        let (class, resolved) = ClassService::create(&store, class_dto("Turma A", "Ana"))
            .await
            .unwrap();

        assert_eq!(class.teacher_id, teacher.id);
        assert_eq!(resolved.id, teacher.id);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_teacher() {
        let (store, _) = store_with_teacher("Ana").await;

        let err = ClassService::create(&store, class_dto("Turma A", "Bruno"))
            .await
            .unwrap_err();

        assert_eq!(
            err.error.to_string(),
            "O professor selecionado não está cadastrado"
        );
        assert!(store.list_classes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let (store, _) = store_with_teacher("Ana").await;
        ClassService::create(&store, class_dto("Turma A", "Ana"))
            .await
            .unwrap();

        let err = ClassService::create(&store, class_dto("Turma A", "Ana"))
            .await
            .unwrap_err();

        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.error.to_string(), "A turma Turma A já existe");
    }

    #[tokio::test]
    async fn test_update_unknown_class() {
        let (store, _) = store_with_teacher("Ana").await;

        let err = ClassService::update(
            &store,
            UpdateClassDto {
                id: Some("not-an-id".to_string()),
                class: class_dto("Turma Z", "Ana"),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.error.to_string(), "A turma informada não está cadastrada");
    }
}
