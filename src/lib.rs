//! # Escola API
//!
//! A REST API for running a school, built with Axum and PostgreSQL: students,
//! teachers, administrators, classes ("turmas") and enrollments.
//!
//! ## Overview
//!
//! - **Students and teachers**: create, list, update and delete records that
//!   share one validated profile schema
//! - **Classes**: each class belongs to a teacher, resolved by name
//! - **Enrollments**: a student joins at most one class; enrolling also opens
//!   the student's report card
//! - **Administrators**: accounts behind a token gate that requires
//!   permission level 2
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── bin/cli.rs        # escola-cli: create-admin, migrate, seed
//! ├── cli/              # Functions behind the CLI commands
//! ├── middleware/       # Token extraction and the administrator gate
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Administrator login
//! │   ├── students/    # Students, listed with their class
//! │   ├── teachers/    # Teachers
//! │   ├── people/      # Service shared by students and teachers
//! │   ├── admins/      # Administrator accounts (gated)
//! │   ├── classes/     # Classes
//! │   └── enrollments/ # Enrolling students in classes
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Tracing setup and request logging
//! ├── metrics.rs        # Prometheus metrics
//! ├── router.rs         # Route table and layers
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! Each feature module has a `controller.rs` (HTTP handlers), a `service.rs`
//! (business logic) and a `router.rs`. Records and DTOs live in
//! [`escola_models`]; persistence goes through the [`escola_db::Store`] trait.
//!
//! ## Authentication
//!
//! Administrator routes read a JWT from the `x-access-token` header
//! (`Authorization: Bearer` is accepted too). The token names an account; the
//! account's permission is loaded from the store on every request.
//!
//! ```bash
//! curl -X POST http://localhost:3000/login \
//!   -H "Content-Type: application/json" \
//!   -d '{"email": "admin@escola.com", "senha": "password123"}'
//!
//! curl http://localhost:3000/buscarAdmin -H "x-access-token: <token>"
//! ```
//!
//! ## Errors
//!
//! Every error has the body `{"error": true, "msg": ...}`, where `msg` is a
//! string, or the list of field messages when validation fails.
//!
//! ## Configuration
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATABASE_DRIVER` | `postgres` or `memory` | `postgres` |
//! | `DATABASE_URL` | PostgreSQL connection string | Required for `postgres` |
//! | `JWT_SECRET` | Token signing secret | Development value |
//! | `JWT_ACCESS_EXPIRY` | Token lifetime in seconds | `3600` |
//! | `APP_HOST` / `APP_PORT` | Listen address | `0.0.0.0:3000` |
//! | `LENIENT_DELETE_ERRORS` | Answer failed deletes with 200 | `true` |
//! | `METRICS_ENABLED` | Serve `/metrics` | `true` |
//! | `LOG_LEVEL` / `LOG_DIR` | Log level and JSON log directory | `info` / unset |

pub mod cli;
pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use escola_auth;
pub use escola_config;
pub use escola_core;
pub use escola_db;
pub use escola_models;
