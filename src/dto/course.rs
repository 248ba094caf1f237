//! Request DTOs accepted by the course endpoints.

use serde::Deserialize;
use validator::Validate;

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Body of `POST /courses`.
pub struct CreateRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Body of `PATCH /courses/{id}`. Absent fields are left untouched.
pub struct UpdateRequest {
    /// Ignored: the id from the request path is authoritative.
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Validate)]
/// Query of `GET /courses`.
///
/// `limit` and `page` values of zero or below fall back to their defaults.
pub struct Filters {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[validate(range(max = 100))]
    pub limit: Option<i64>,
    #[validate(range(max = 1_000_000))]
    pub page: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetRequest {
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: String,
}
