//! Domain aggregates exposed by the course service layer.

pub mod course;
pub mod types;
