//! # Escola Auth
//!
//! Authentication types and JWT utilities for the Escola API.
//!
//! - [`claims`]: The claim set carried by administrator tokens
//! - [`jwt`]: Token creation and verification
//!
//! Tokens are HS256-signed with the secret from [`escola_config::JwtConfig`] and
//! travel in the `x-access-token` header.
//!
//! # Example
//!
//! ```ignore
//! use escola_auth::{create_access_token, verify_token};
//! use escola_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(admin_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.admin_id()?, admin_id);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
