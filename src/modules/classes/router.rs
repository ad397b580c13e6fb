use crate::modules::classes::controller::{
    class_id_from_url, create_class, create_class_page, delete_class, list_classes, update_class,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, put},
};

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/criarTurma", get(create_class_page).post(create_class))
        .route("/buscarTurma", get(list_classes))
        .route("/editarDadosTurma", put(update_class))
        .route("/editarDadosTurma/{id}", get(class_id_from_url))
        .route("/deletarTurma", delete(delete_class))
}
