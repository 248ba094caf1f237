//! Actix transport adapter for the course endpoints.

use actix_cors::Cors;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, error, web};
use serde::Serialize;

use crate::dto::response::ErrorResponse;
use crate::endpoints::{EndpointError, EndpointResult, Outcome};
use crate::services::ServiceError;

pub mod courses;

/// Registers the course routes together with JSON-shaped decode error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(courses::create_course)
        .service(courses::list_courses)
        .service(courses::get_course)
        .service(courses::update_course)
        .service(courses::delete_course);
}

/// Wildcard-origin CORS policy. Pre-flight requests are answered here and
/// never reach a handler.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS", "HEAD"])
        .allowed_headers(vec![
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CACHE_CONTROL,
            header::CONTENT_TYPE,
        ])
        .max_age(3600)
}

fn status(outcome: Outcome) -> StatusCode {
    StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn error_response(err: &EndpointError) -> HttpResponse {
    HttpResponse::build(status(err.outcome)).json(err.body())
}

/// Encodes an endpoint result, or the failure of the blocking task that ran it.
pub fn respond<T: Serialize>(
    result: Result<EndpointResult<T>, error::BlockingError>,
) -> HttpResponse {
    match result {
        Ok(Ok(response)) => HttpResponse::build(status(response.outcome)).json(response.body),
        Ok(Err(err)) => error_response(&err),
        Err(err) => {
            log::error!("Blocking task failed: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse::new("internal server error"))
        }
    }
}

fn decode_error<E>(err: E) -> error::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let response = error_response(&EndpointError::from(ServiceError::Decode(err.to_string())));
    error::InternalError::from_response(err, response).into()
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    decode_error(err)
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> error::Error {
    decode_error(err)
}

fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> error::Error {
    decode_error(err)
}
