//! # Escola Config
//!
//! Configuration types for the Escola API.
//!
//! Every structure is loaded from environment variables with sensible defaults:
//!
//! - [`api`]: Behavior switches for the HTTP surface
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: Storage driver selection and connection settings
//! - [`jwt`]: JWT signing secret and token lifetime
//! - [`server`]: Listen address
//!
//! # Example
//!
//! ```ignore
//! use escola_config::{DatabaseConfig, JwtConfig};
//!
//! let database = DatabaseConfig::from_env();
//! let jwt = JwtConfig::from_env();
//! ```

pub mod api;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

mod env;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use cors::CorsConfig;
pub use database::{DatabaseConfig, DatabaseDriver};
pub use jwt::JwtConfig;
pub use server::ServerConfig;
