//! Routes for the `/courses` resource.

use actix_web::{Responder, delete, get, patch, post, web};
use serde::Deserialize;

use crate::dto::course::{CreateRequest, DeleteRequest, Filters, GetRequest, UpdateRequest};
use crate::endpoints::Endpoints;
use crate::repository::DieselRepository;
use crate::routes::respond;

pub type CourseEndpoints = Endpoints<DieselRepository>;

/// Raw query string of `GET /courses`.
///
/// Blank values count as absent and unparsable `limit`/`page` fall back to the
/// configured defaults.
#[derive(Debug, Default, Deserialize)]
pub struct CourseQueryParams {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl From<CourseQueryParams> for Filters {
    fn from(params: CourseQueryParams) -> Self {
        let text = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let number = |value: Option<String>| value.and_then(|v| v.trim().parse::<i64>().ok());

        Filters {
            name: text(params.name),
            start_date: text(params.start_date),
            end_date: text(params.end_date),
            limit: number(params.limit),
            page: number(params.page),
        }
    }
}

#[post("/courses")]
pub async fn create_course(
    endpoints: web::Data<CourseEndpoints>,
    web::Json(request): web::Json<CreateRequest>,
) -> impl Responder {
    respond(web::block(move || endpoints.create(request)).await)
}

#[get("/courses")]
pub async fn list_courses(
    endpoints: web::Data<CourseEndpoints>,
    params: web::Query<CourseQueryParams>,
) -> impl Responder {
    let filters = Filters::from(params.into_inner());
    respond(web::block(move || endpoints.get(filters)).await)
}

#[get("/courses/{id}")]
pub async fn get_course(
    endpoints: web::Data<CourseEndpoints>,
    id: web::Path<String>,
) -> impl Responder {
    let request = GetRequest {
        id: id.into_inner(),
    };
    respond(web::block(move || endpoints.get_by_id(request)).await)
}

#[patch("/courses/{id}")]
pub async fn update_course(
    endpoints: web::Data<CourseEndpoints>,
    id: web::Path<String>,
    web::Json(request): web::Json<UpdateRequest>,
) -> impl Responder {
    let id = id.into_inner();
    respond(web::block(move || endpoints.update(&id, request)).await)
}

#[delete("/courses/{id}")]
pub async fn delete_course(
    endpoints: web::Data<CourseEndpoints>,
    id: web::Path<String>,
) -> impl Responder {
    let request = DeleteRequest {
        id: id.into_inner(),
    };
    respond(web::block(move || endpoints.delete(request)).await)
}
