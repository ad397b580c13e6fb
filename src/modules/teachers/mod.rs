pub mod controller;
pub mod router;

pub use router::init_teachers_router;
