use std::fmt;
use std::sync::Arc;

use escola_config::{ApiConfig, CorsConfig, DatabaseConfig, JwtConfig};
use escola_db::{Store, StoreError, init_store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub api_config: ApiConfig,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.driver())
            .field("cors_config", &self.cors_config)
            .field("api_config", &self.api_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_config: JwtConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config: CorsConfig::default(),
            api_config: ApiConfig::default(),
        }
    }
}

pub async fn init_app_state() -> Result<AppState, StoreError> {
    Ok(AppState {
        store: init_store(&DatabaseConfig::from_env()).await?,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        api_config: ApiConfig::from_env(),
    })
}
