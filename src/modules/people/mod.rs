//! Operations shared by students and teachers, which have the same record
//! shape and validation schema.

pub mod service;
