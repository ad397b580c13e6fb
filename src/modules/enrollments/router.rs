use crate::modules::enrollments::controller::{enroll_student, enroll_student_page};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new().route("/inserirAluno", get(enroll_student_page).post(enroll_student))
}
