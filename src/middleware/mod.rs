//! Middleware and extractors for administrator-only routes.
//!
//! # Modules
//!
//! - [`auth`]: Token extraction and the [`auth::AdminUser`] extractor
//! - [`role`]: The [`role::require_admin`] gate
//!
//! # Flow
//!
//! 1. Client sends the token issued by `POST /login` in the `x-access-token`
//!    header (`Authorization: Bearer <token>` is accepted too)
//! 2. `require_admin` verifies it, loads the administrator and checks the
//!    permission level
//! 3. The handler runs and may take [`auth::AdminUser`] to see who called it
//!
//! # Example
//!
//! ```ignore
//! use axum::middleware;
//! use crate::middleware::role::require_admin;
//!
//! let admin_routes = init_admins_router()
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

pub mod auth;
pub mod role;
