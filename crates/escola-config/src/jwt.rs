use std::env;

use crate::env::parsed_or;

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET is not set, using the development default");
            DEFAULT_SECRET.to_string()
        });

        Self {
            secret,
            access_token_expiry: parsed_or("JWT_ACCESS_EXPIRY", 3600), // 1 hour
        }
    }
}
