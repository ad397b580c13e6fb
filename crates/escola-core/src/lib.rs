//! # Escola Core
//!
//! Core types, errors, and utilities for the Escola API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Lenient deserializers for form-style JSON payloads
//!
//! # Example
//!
//! ```ignore
//! use escola_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//!
//! let error = AppError::bad_request(anyhow::anyhow!("A turma informada não está cadastrada"));
//! ```

pub mod errors;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorMessage, ErrorResponse};
pub use password::{hash_password, verify_password};
