pub mod course;
pub mod errors;

pub use errors::{ErrorKind, ServiceError, ServiceResult};
