use crate::modules::students::controller::{
    create_student, create_student_page, delete_student, list_students, student_id_from_url,
    update_student,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, put},
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/criarAluno", get(create_student_page).post(create_student))
        .route("/buscarAlunos", get(list_students))
        .route("/editarDadosAluno", put(update_student))
        .route("/editarDadosAluno/{id}", get(student_id_from_url))
        .route("/deletarAluno", delete(delete_student))
}
