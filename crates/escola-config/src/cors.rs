//! Cross-origin settings for browser clients.
//!
//! | variable | default |
//! |---|---|
//! | `ALLOWED_ORIGINS` | `http://localhost:3000,http://localhost:5173` |
//! | `CORS_ALLOWED_HEADERS` | `x-access-token,authorization,content-type,accept` |
//! | `CORS_ALLOW_CREDENTIALS` | `true` |

use std::env;

use crate::env::flag_or;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Request headers browsers may send. `x-access-token` carries the
/// administrator token.
const DEFAULT_HEADERS: &str = "x-access-token,authorization,content-type,accept";

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    /// Lowercase header names.
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: split_list(DEFAULT_ORIGINS),
            allowed_headers: split_list(DEFAULT_HEADERS),
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins =
            env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string());
        let allowed_headers =
            env::var("CORS_ALLOWED_HEADERS").unwrap_or_else(|_| DEFAULT_HEADERS.to_string());

        Self {
            allowed_origins: split_list(&allowed_origins),
            allowed_headers: split_list(&allowed_headers.to_lowercase()),
            allow_credentials: flag_or("CORS_ALLOW_CREDENTIALS", true),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
