pub mod admins;
pub mod auth;
pub mod classes;
pub mod enrollments;
pub mod people;
pub mod shared;
pub mod students;
pub mod teachers;
