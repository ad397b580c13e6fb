use anyhow::anyhow;
use escola_core::{AppError, hash_password};
use escola_db::{Store, StoreError};
use escola_models::{Admin, AdminCredentialsDto, NewAdmin, UpdateAdminDto, parse_record_id};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::metrics::{track_record_created, track_record_deleted};

pub struct AdminService;

fn not_registered() -> AppError {
    AppError::bad_request(anyhow!("O admin informado não está cadastrado"))
}

fn duplicate_email(err: StoreError) -> AppError {
    match err {
        StoreError::Duplicate { value, .. } => {
            AppError::bad_request(anyhow!("O e-mail {} já está cadastrado", value))
        }
        other => other.into(),
    }
}

/// E-mail and plaintext password of validated credentials.
fn credentials(dto: AdminCredentialsDto) -> Result<(String, String), AppError> {
    let email = dto
        .email
        .ok_or_else(|| AppError::bad_request(anyhow!("O e-mail é obrigatório")))?;
    let password = dto
        .senha1
        .ok_or_else(|| AppError::bad_request(anyhow!("A senha é obrigatória")))?;
    Ok((email, password))
}

impl AdminService {
    #[instrument(skip(store, dto))]
    pub async fn create(
        store: &dyn Store,
        dto: AdminCredentialsDto,
        permission: i32,
    ) -> Result<Admin, AppError> {
        let (email, password) = credentials(dto)?;
        Self::create_account(store, &email, &password, permission).await
    }

    /// Creates an account from raw credentials. Shared with the CLI.
    #[instrument(skip(store, password))]
    pub async fn create_account(
        store: &dyn Store,
        email: &str,
        password: &str,
        permission: i32,
    ) -> Result<Admin, AppError> {
        let password_hash = hash_password(password)?;

        let admin = store
            .insert_admin(NewAdmin {
                email: email.to_string(),
                password_hash,
                permission,
            })
            .await
            .map_err(duplicate_email)?;

        track_record_created("admin");
        info!(id = %admin.id, permission, "Administrator created");
        Ok(admin)
    }

    #[instrument(skip(store))]
    pub async fn list(store: &dyn Store) -> Result<Vec<Admin>, AppError> {
        Ok(store.list_admins().await?)
    }

    /// Replaces the e-mail and re-hashes the new password.
    #[instrument(skip(store, dto), fields(id = ?dto.id))]
    pub async fn update(store: &dyn Store, dto: UpdateAdminDto) -> Result<Admin, AppError> {
        let id = parse_record_id(dto.id.as_deref()).ok_or_else(not_registered)?;
        let (email, password) = credentials(dto.credentials)?;
        let password_hash = hash_password(&password)?;

        store
            .update_admin(id, &email, &password_hash)
            .await
            .map_err(duplicate_email)?
            .ok_or_else(not_registered)
    }

    #[instrument(skip(store))]
    pub async fn delete(store: &dyn Store, raw_id: Option<&str>) -> Result<u64, AppError> {
        let id: Uuid = parse_record_id(raw_id)
            .ok_or_else(|| AppError::bad_request(anyhow!("Identificador inválido")))?;

        let removed = store.delete_admin(id).await?;
        track_record_deleted("admin", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escola_core::verify_password;
    use escola_db::MemoryStore;
    use escola_models::DEFAULT_PERMISSION;

    fn credentials_dto(email: &str, password: &str) -> AdminCredentialsDto {
        AdminCredentialsDto {
            email: Some(email.to_string()),
            senha1: Some(password.to_string()),
            senha2: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let store = MemoryStore::new();
        let admin = AdminService::create(
            &store,
            credentials_dto("root@escola.com", "password123"),
            DEFAULT_PERMISSION,
        )
        .await
        .unwrap();

        assert_eq!(admin.permission, DEFAULT_PERMISSION);
        assert_ne!(admin.password_hash, "password123");
        assert!(verify_password("password123", &admin.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_message() {
        let store = MemoryStore::new();
        AdminService::create_account(&store, "root@escola.com", "password123", 2)
            .await
            .unwrap();

        let err = AdminService::create_account(&store, "root@escola.com", "password456", 2)
            .await
            .unwrap_err();

        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(
            err.error.to_string(),
            "O e-mail root@escola.com já está cadastrado"
        );
    }

    #[tokio::test]
    async fn test_update_unknown_admin() {
        let store = MemoryStore::new();
        let dto = UpdateAdminDto {
            id: Some(Uuid::new_v4().to_string()),
            credentials: credentials_dto("novo@escola.com", "password123"),
        };

        let err = AdminService::update(&store, dto).await.unwrap_err();
        assert_eq!(err.error.to_string(), "O admin informado não está cadastrado");
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let store = MemoryStore::new();
        let admin = AdminService::create_account(&store, "root@escola.com", "password123", 2)
            .await
            .unwrap();

        let updated = AdminService::update(
            &store,
            UpdateAdminDto {
                id: Some(admin.id.to_string()),
                credentials: credentials_dto("novo@escola.com", "newpassword1"),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.email, "novo@escola.com");
        assert_eq!(updated.permission, 2);
        assert!(verify_password("newpassword1", &updated.password_hash).unwrap());
    }
}
