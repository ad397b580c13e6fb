use crate::modules::admins::controller::{
    admin_id_from_url, create_admin, create_admin_page, delete_admin, list_admins, update_admin,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, put},
};

/// Administrator routes. The caller layers
/// [`require_admin`](crate::middleware::role::require_admin) over them.
pub fn init_admins_router() -> Router<AppState> {
    Router::new()
        .route("/criarAdmin", get(create_admin_page).post(create_admin))
        .route("/buscarAdmin", get(list_admins))
        .route("/editarDadosAdmin", put(update_admin))
        .route("/editarDadosAdmin/{id}", get(admin_id_from_url))
        .route("/deletarAdmin", delete(delete_admin))
}
