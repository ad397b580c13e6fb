use crate::modules::teachers::controller::{
    create_teacher, create_teacher_page, delete_teacher, list_teachers, teacher_id_from_url,
    update_teacher,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, put},
};

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/criarProfessor", get(create_teacher_page).post(create_teacher))
        .route("/buscarProfessor", get(list_teachers))
        .route("/editarDadosProfessor", put(update_teacher))
        .route("/editarDadosProfessor/{id}", get(teacher_id_from_url))
        .route("/deletarProfessor", delete(delete_teacher))
}
