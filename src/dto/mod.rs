//! DTOs exchanged between the transport adapter and the endpoint layer.

pub mod course;
pub mod response;
