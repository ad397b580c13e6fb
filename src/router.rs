use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::role::require_admin;
use crate::modules::admins::init_admins_router;
use crate::modules::auth::init_auth_router;
use crate::modules::classes::init_classes_router;
use crate::modules::enrollments::init_enrollments_router;
use crate::modules::students::init_students_router;
use crate::modules::teachers::init_teachers_router;
use crate::state::AppState;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::{Json, Router, middleware, routing::get};
use escola_config::CorsConfig;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(init_auth_router())
        .merge(init_students_router())
        .merge(init_teachers_router())
        .merge(init_classes_router())
        .merge(init_enrollments_router())
        .merge(
            init_admins_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        )
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

/// Entries that are not valid origins or header names are skipped.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|name| name.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(headers)
        .allow_credentials(config.allow_credentials)
}
