use chrono::NaiveDate;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::course::{Course, NewCourse, UpdateCourse};
use crate::domain::types::CourseId;
use crate::repository::errors::RepositoryResult;

pub mod course;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Row-selection predicates for course list and count queries.
///
/// Pagination is deliberately not part of the query: offset and limit are
/// passed separately to [`CourseReader::list_courses`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseListQuery {
    /// Substring match on the course name.
    pub name: Option<String>,
    /// Courses starting on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Courses ending on or before this date.
    pub end_date: Option<NaiveDate>,
}

impl CourseListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn starting_from(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn ending_by(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }
}

#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait CourseReader {
    fn get_course_by_id(&self, id: &CourseId) -> RepositoryResult<Option<Course>>;
    fn list_courses(
        &self,
        query: &CourseListQuery,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<Vec<Course>>;
    fn count_courses(&self, query: &CourseListQuery) -> RepositoryResult<usize>;
}

pub trait CourseWriter {
    fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course>;
    /// Applies the `Some` fields of `updates`. Fails with `NotFound` when no row matched.
    fn update_course(&self, id: &CourseId, updates: &UpdateCourse) -> RepositoryResult<()>;
    /// Fails with `NotFound` when no row matched.
    fn delete_course(&self, id: &CourseId) -> RepositoryResult<()>;
}
