//! Database models and configuration shared across the course service.

pub mod config;
pub mod course;
