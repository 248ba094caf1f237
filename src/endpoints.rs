//! Endpoint layer: one strongly typed controller per course operation.
//!
//! Each controller invokes the [`CourseService`], wraps successful results in
//! an [`ApiResponse`] and classifies failures into an [`Outcome`] that the
//! transport maps to a status code.

use thiserror::Error;
use validator::Validate;

use crate::domain::course::Course;
use crate::dto::course::{CreateRequest, DeleteRequest, Filters, GetRequest, UpdateRequest};
use crate::dto::response::{ApiResponse, ErrorResponse};
use crate::repository::{CourseReader, CourseWriter};
use crate::services::course::CourseService;
use crate::services::{ErrorKind, ServiceError};

/// Classified result of an endpoint call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Created,
    BadRequest,
    NotFound,
    InternalError,
}

impl Outcome {
    pub fn status_code(self) -> u16 {
        match self {
            Outcome::Ok => 200,
            Outcome::Created => 201,
            Outcome::BadRequest => 400,
            Outcome::NotFound => 404,
            Outcome::InternalError => 500,
        }
    }
}

impl From<ErrorKind> for Outcome {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => Outcome::NotFound,
            ErrorKind::Parse | ErrorKind::Validation | ErrorKind::Decode => Outcome::BadRequest,
            ErrorKind::Config | ErrorKind::Persistence => Outcome::InternalError,
        }
    }
}

/// Successful endpoint response.
#[derive(Debug)]
pub struct Response<T> {
    pub outcome: Outcome,
    pub body: ApiResponse<T>,
}

/// Failed endpoint response. Only the error's message reaches the client.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EndpointError {
    pub outcome: Outcome,
    pub message: String,
}

impl EndpointError {
    pub fn body(&self) -> ErrorResponse {
        ErrorResponse::new(self.message.clone())
    }
}

impl From<ServiceError> for EndpointError {
    fn from(err: ServiceError) -> Self {
        let outcome = Outcome::from(err.kind());
        if outcome == Outcome::InternalError {
            log::error!("Request failed: {err}");
        }
        Self {
            outcome,
            message: err.to_string(),
        }
    }
}

pub type EndpointResult<T> = Result<Response<T>, EndpointError>;

fn ok<T>(message: &str, data: T) -> EndpointResult<T> {
    Ok(Response {
        outcome: Outcome::Ok,
        body: ApiResponse::new(message, data, None),
    })
}

fn validated<T: Validate>(request: &T) -> Result<(), EndpointError> {
    request
        .validate()
        .map_err(|err| ServiceError::Validation(err.to_string()).into())
}

/// The five course controllers bound to one service instance.
#[derive(Clone)]
pub struct Endpoints<R> {
    service: CourseService<R>,
}

impl<R> Endpoints<R>
where
    R: CourseReader + CourseWriter,
{
    pub fn new(service: CourseService<R>) -> Self {
        Self { service }
    }

    pub fn create(&self, request: CreateRequest) -> EndpointResult<Course> {
        validated(&request)?;
        let course =
            self.service
                .create(&request.name, &request.start_date, &request.end_date)?;
        Ok(Response {
            outcome: Outcome::Created,
            body: ApiResponse::new("Course created successfully", course, None),
        })
    }

    pub fn get(&self, request: Filters) -> EndpointResult<Vec<Course>> {
        validated(&request)?;
        let page = request.page.unwrap_or_default();
        let limit = request.limit.unwrap_or_default();
        let (courses, meta) = self.service.get_all(&request, page, limit)?;
        Ok(Response {
            outcome: Outcome::Ok,
            body: ApiResponse::new("courses fetched successfully", courses, Some(meta)),
        })
    }

    pub fn get_by_id(&self, request: GetRequest) -> EndpointResult<Course> {
        let course = self.service.get_by_id(&request.id)?;
        ok("course fetched successfully", course)
    }

    /// `id` comes from the request path and overrides any id in `request`.
    pub fn update(&self, id: &str, request: UpdateRequest) -> EndpointResult<Course> {
        validated(&request)?;
        let course = self.service.update(id, &request)?;
        ok("course updated successfully", course)
    }

    pub fn delete(&self, request: DeleteRequest) -> EndpointResult<String> {
        let id = self.service.delete(&request.id)?;
        ok("course deleted successfully", id.into_inner())
    }
}
