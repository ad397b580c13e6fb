use anyhow::anyhow;
use escola_core::{AppError, hash_password};
use escola_db::Store;
use escola_models::{
    CreatePersonDto, Person, PersonChanges, PersonKind, UpdatePersonDto, parse_record_id,
};
use tracing::{info, instrument};

use crate::metrics::{track_record_created, track_record_deleted};

pub struct PersonService;

/// `O aluno informado não está cadastrado` / `O professor informado ...`
pub fn not_registered(kind: PersonKind) -> AppError {
    AppError::bad_request(anyhow!("O {} informado não está cadastrado", kind.noun()))
}

impl PersonService {
    #[instrument(skip(store, dto), fields(kind = kind.as_str()))]
    pub async fn create(
        store: &dyn Store,
        kind: PersonKind,
        dto: CreatePersonDto,
    ) -> Result<Person, AppError> {
        let password_hash = hash_password(dto.password()?)?;
        let new = dto.into_new_person(password_hash)?;

        let person = store.insert_person(kind, new).await?;

        track_record_created(kind.as_str());
        info!(id = %person.id, "Person created");
        Ok(person)
    }

    #[instrument(skip(store), fields(kind = kind.as_str()))]
    pub async fn list(store: &dyn Store, kind: PersonKind) -> Result<Vec<Person>, AppError> {
        Ok(store.list_people(kind).await?)
    }

    /// Overwrites every editable field of the record named by `dto.id`.
    #[instrument(skip(store, dto), fields(kind = kind.as_str(), id = ?dto.id))]
    pub async fn update(
        store: &dyn Store,
        kind: PersonKind,
        dto: UpdatePersonDto,
    ) -> Result<Person, AppError> {
        let id = parse_record_id(dto.id.as_deref()).ok_or_else(|| not_registered(kind))?;
        let changes = PersonChanges::try_from(dto.profile)?;

        store
            .update_person(kind, id, changes)
            .await?
            .ok_or_else(|| not_registered(kind))
    }

    /// Removes the record. Returns how many records were removed, which is
    /// zero for an unknown id.
    #[instrument(skip(store), fields(kind = kind.as_str()))]
    pub async fn delete(
        store: &dyn Store,
        kind: PersonKind,
        raw_id: Option<&str>,
    ) -> Result<u64, AppError> {
        let id = parse_record_id(raw_id)
            .ok_or_else(|| AppError::bad_request(anyhow!("Identificador inválido")))?;

        let removed = store.delete_person(kind, id).await?;
        track_record_deleted(kind.as_str(), removed);
        Ok(removed)
    }
}
