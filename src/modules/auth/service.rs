use anyhow::anyhow;
use escola_auth::create_access_token;
use escola_config::JwtConfig;
use escola_core::{AppError, verify_password};
use escola_db::Store;
use escola_models::{LoginRequest, LoginResponse};
use tracing::{info, instrument};

use crate::metrics::track_login;

pub struct AuthService;

fn invalid_credentials() -> AppError {
    track_login(false);
    AppError::unauthorized(anyhow!("E-mail ou senha inválidos"))
}

impl AuthService {
    /// Issues an access token for an administrator account.
    ///
    /// Any account can log in. Whether the token opens the administrator
    /// routes is decided by the gate from the account's current permission.
    #[instrument(skip(store, dto, jwt_config), fields(email = ?dto.email))]
    pub async fn login(
        store: &dyn Store,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let (Some(email), Some(password)) = (dto.email, dto.senha) else {
            return Err(invalid_credentials());
        };

        let admin = store
            .find_admin_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&password, &admin.password_hash)? {
            return Err(invalid_credentials());
        }

        let token = create_access_token(admin.id, jwt_config)?;

        track_login(true);
        info!(admin_id = %admin.id, "Administrator logged in");

        Ok(LoginResponse {
            msg: "Login realizado com sucesso".to_string(),
            token,
        })
    }
}
