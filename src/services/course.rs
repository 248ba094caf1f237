//! Course business rules: date parsing, required-field validation, partial
//! updates and paginated listing on top of the persistence port.

use chrono::NaiveDate;

use crate::domain::course::{Course, NewCourse, UpdateCourse};
use crate::domain::types::{CourseId, CourseName, parse_course_date};
use crate::dto::course::{Filters, UpdateRequest};
use crate::pagination::{Metadata, Paginator};
use crate::repository::errors::RepositoryError;
use crate::repository::{CourseListQuery, CourseReader, CourseWriter};
use crate::services::{ServiceError, ServiceResult};

/// Domain service for courses, bound to a repository and the pagination
/// settings it was configured with.
#[derive(Clone)]
pub struct CourseService<R> {
    repo: R,
    paginator: Paginator,
}

impl<R> CourseService<R>
where
    R: CourseReader + CourseWriter,
{
    pub fn new(repo: R, paginator: Paginator) -> Self {
        Self { repo, paginator }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validates the input and persists a new course.
    pub fn create(&self, name: &str, start_date: &str, end_date: &str) -> ServiceResult<Course> {
        let start_date = parse_required_date(start_date)?;
        let end_date = parse_required_date(end_date)?;
        let name = CourseName::new(name).ok();

        let (name, start_date, end_date) = match (name, start_date, end_date) {
            (Some(name), Some(start_date), Some(end_date)) => (name, start_date, end_date),
            (name, start_date, end_date) => {
                let missing: Vec<&str> = [
                    ("name", name.is_none()),
                    ("start_date", start_date.is_none()),
                    ("end_date", end_date.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                return Err(ServiceError::Validation(format!(
                    "missing required fields: {}",
                    missing.join(", ")
                )));
            }
        };

        let new_course = NewCourse::new(name, start_date, end_date)?;

        self.repo.create_course(&new_course).map_err(|err| {
            log::error!("Failed to create course: {err}");
            ServiceError::from(err)
        })
    }

    /// Returns one page of courses matching `filters` together with its metadata.
    ///
    /// Zero matches is not an error.
    pub fn get_all(
        &self,
        filters: &Filters,
        page: i64,
        limit: i64,
    ) -> ServiceResult<(Vec<Course>, Metadata)> {
        let query = list_query(filters)?;

        let total = match self.repo.count_courses(&query) {
            Ok(total) => total,
            Err(RepositoryError::NotFound) => 0,
            Err(err) => {
                log::error!("Failed to count courses: {err}");
                return Err(err.into());
            }
        };

        let meta = self.paginator.metadata(total, limit, page);

        let courses = match self.repo.list_courses(&query, meta.offset(), meta.limit()) {
            Ok(courses) => courses,
            Err(RepositoryError::NotFound) => Vec::new(),
            Err(err) => {
                log::error!("Failed to list courses: {err}");
                return Err(err.into());
            }
        };

        Ok((courses, meta))
    }

    pub fn get_by_id(&self, id: &str) -> ServiceResult<Course> {
        let id = course_id(id)?;
        self.repo
            .get_course_by_id(&id)
            .map_err(not_found_or(&id))?
            .ok_or_else(|| ServiceError::not_found(id.as_str()))
    }

    /// Applies the supplied fields of `patch` to the course with `id` and
    /// returns the stored record as re-read after the write.
    ///
    /// `patch.id` is ignored.
    pub fn update(&self, id: &str, patch: &UpdateRequest) -> ServiceResult<Course> {
        let id = course_id(id)?;

        let updates = UpdateCourse {
            name: patch.name.as_deref().map(CourseName::new).transpose()?,
            start_date: patch
                .start_date
                .as_deref()
                .map(parse_date_logged)
                .transpose()?,
            end_date: patch
                .end_date
                .as_deref()
                .map(parse_date_logged)
                .transpose()?,
        };

        if updates.touches_dates() {
            let current = self.get_by_id(id.as_str())?;
            updates.validate_against(&current)?;
        }

        self.repo
            .update_course(&id, &updates)
            .map_err(not_found_or(&id))?;

        // The write is already committed here; a failed re-read is reported
        // as-is and the caller has to query again.
        match self.repo.get_course_by_id(&id) {
            Ok(Some(course)) => Ok(course),
            Ok(None) => {
                log::error!("Course {id} vanished after update");
                Err(ServiceError::not_found(id.into_inner()))
            }
            Err(err) => {
                log::error!("Failed to re-read course {id} after update: {err}");
                Err(err.into())
            }
        }
    }

    /// Deletes the course and echoes its id back.
    pub fn delete(&self, id: &str) -> ServiceResult<CourseId> {
        let id = course_id(id)?;
        self.repo
            .delete_course(&id)
            .map_err(not_found_or(&id))?;
        Ok(id)
    }

    /// Number of courses matching `filters`; `limit` and `page` are ignored.
    pub fn count(&self, filters: &Filters) -> ServiceResult<usize> {
        let query = list_query(filters)?;
        match self.repo.count_courses(&query) {
            Ok(total) => Ok(total),
            Err(RepositoryError::NotFound) => Ok(0),
            Err(err) => {
                log::error!("Failed to count courses: {err}");
                Err(err.into())
            }
        }
    }
}

/// Ids that cannot exist in storage are reported as not found.
fn course_id(id: &str) -> ServiceResult<CourseId> {
    CourseId::new(id).map_err(|_| ServiceError::not_found(id))
}

fn not_found_or(id: &CourseId) -> impl FnOnce(RepositoryError) -> ServiceError + '_ {
    move |err| match err {
        RepositoryError::NotFound => ServiceError::not_found(id.as_str()),
        other => {
            log::error!("Persistence failure for course {id}: {other}");
            ServiceError::from(other)
        }
    }
}

fn parse_date_logged(value: &str) -> ServiceResult<NaiveDate> {
    parse_course_date(value).map_err(|err| {
        log::warn!("{err}");
        ServiceError::from(err)
    })
}

/// Blank input counts as missing; anything else must parse.
fn parse_required_date(value: &str) -> ServiceResult<Option<NaiveDate>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_date_logged(value).map(Some)
}

/// Normalizes list filters into repository predicates. Blank values are
/// treated as absent, pagination hints are dropped.
fn list_query(filters: &Filters) -> ServiceResult<CourseListQuery> {
    let present = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let mut query = CourseListQuery::new();
    if let Some(name) = present(&filters.name) {
        query = query.name(name);
    }
    if let Some(start_date) = present(&filters.start_date) {
        query = query.starting_from(parse_date_logged(&start_date)?);
    }
    if let Some(end_date) = present(&filters.end_date) {
        query = query.ending_by(parse_date_logged(&end_date)?);
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::{Duration, NaiveDateTime};

    use super::*;
    use crate::repository::errors::RepositoryResult;
    use crate::services::ErrorKind;

    /// In-memory course store with a deterministic clock.
    #[derive(Default)]
    struct MemoryRepo {
        courses: RefCell<Vec<Course>>,
        ticks: Cell<i64>,
        fail_reads: Cell<bool>,
    }

    impl MemoryRepo {
        fn now(&self) -> NaiveDateTime {
            let tick = self.ticks.get() + 1;
            self.ticks.set(tick);
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                + Duration::seconds(tick)
        }

        fn matches(query: &CourseListQuery, course: &Course) -> bool {
            query
                .name
                .as_ref()
                .is_none_or(|name| course.name.contains(name.as_str()))
                && query.start_date.is_none_or(|date| course.start_date >= date)
                && query.end_date.is_none_or(|date| course.end_date <= date)
        }
    }

    impl CourseReader for MemoryRepo {
        fn get_course_by_id(&self, id: &CourseId) -> RepositoryResult<Option<Course>> {
            if self.fail_reads.get() {
                return Err(RepositoryError::ConnectionError("pool exhausted".into()));
            }
            Ok(self.courses.borrow().iter().find(|c| &c.id == id).cloned())
        }

        fn list_courses(
            &self,
            query: &CourseListQuery,
            offset: usize,
            limit: usize,
        ) -> RepositoryResult<Vec<Course>> {
            let mut matching: Vec<Course> = self
                .courses
                .borrow()
                .iter()
                .filter(|c| Self::matches(query, c))
                .cloned()
                .collect();
            matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(matching.into_iter().skip(offset).take(limit).collect())
        }

        fn count_courses(&self, query: &CourseListQuery) -> RepositoryResult<usize> {
            Ok(self
                .courses
                .borrow()
                .iter()
                .filter(|c| Self::matches(query, c))
                .count())
        }
    }

    impl CourseWriter for MemoryRepo {
        fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course> {
            let now = self.now();
            let course = Course {
                id: CourseId::generate(),
                name: new_course.name.clone(),
                start_date: new_course.start_date,
                end_date: new_course.end_date,
                created_at: now,
                updated_at: now,
            };
            self.courses.borrow_mut().push(course.clone());
            Ok(course)
        }

        fn update_course(&self, id: &CourseId, updates: &UpdateCourse) -> RepositoryResult<()> {
            let now = self.now();
            let mut courses = self.courses.borrow_mut();
            let course = courses
                .iter_mut()
                .find(|c| &c.id == id)
                .ok_or(RepositoryError::NotFound)?;
            if let Some(name) = &updates.name {
                course.name = name.clone();
            }
            if let Some(start_date) = updates.start_date {
                course.start_date = start_date;
            }
            if let Some(end_date) = updates.end_date {
                course.end_date = end_date;
            }
            course.updated_at = now;
            Ok(())
        }

        fn delete_course(&self, id: &CourseId) -> RepositoryResult<()> {
            let mut courses = self.courses.borrow_mut();
            let before = courses.len();
            courses.retain(|c| &c.id != id);
            if courses.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }
    }

    fn service() -> CourseService<MemoryRepo> {
        CourseService::new(MemoryRepo::default(), Paginator::new(10).unwrap())
    }

    fn date(value: &str) -> NaiveDate {
        parse_course_date(value).unwrap()
    }

    fn patch_name(name: &str) -> UpdateRequest {
        UpdateRequest {
            name: Some(name.to_string()),
            ..UpdateRequest::default()
        }
    }

    #[test]
    fn create_returns_submitted_fields_with_new_id() {
        let service = service();

        let course = service
            .create("Algebra", "2024-01-01", "2024-02-01")
            .unwrap();

        assert!(!course.id.is_empty());
        assert_eq!(course.name.as_str(), "Algebra");
        assert_eq!(course.start_date, date("2024-01-01"));
        assert_eq!(course.end_date, date("2024-02-01"));
    }

    #[test]
    fn create_rejects_malformed_date_as_parse_error() {
        let err = service()
            .create("Algebra", "2024-31-01", "2024-02-01")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn create_reports_every_missing_field() {
        let err = service().create("  ", "", "2024-02-01").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "validation error: missing required fields: name, start_date"
        );
    }

    #[test]
    fn create_rejects_start_after_end() {
        let err = service()
            .create("Algebra", "2024-03-01", "2024-02-01")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn get_by_id_round_trips_created_course() {
        let service = service();
        let created = service
            .create("Algebra", "2024-01-01", "2024-02-01")
            .unwrap();

        let fetched = service.get_by_id(created.id.as_str()).unwrap();

        assert_eq!(fetched, created);
    }

    #[test]
    fn get_by_id_unknown_is_not_found() {
        let err = service().get_by_id("missing").unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { ref id } if id == "missing"));
    }

    #[test]
    fn update_name_only_keeps_dates() {
        let service = service();
        let created = service
            .create("Algebra", "2024-01-01", "2024-02-01")
            .unwrap();

        let updated = service
            .update(created.id.as_str(), &patch_name("Algebra II"))
            .unwrap();

        assert_eq!(updated.name.as_str(), "Algebra II");
        assert_eq!(updated.start_date, created.start_date);
        assert_eq!(updated.end_date, created.end_date);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn update_ignores_patch_id() {
        let service = service();
        let first = service.create("First", "2024-01-01", "2024-02-01").unwrap();
        let second = service
            .create("Second", "2024-01-01", "2024-02-01")
            .unwrap();

        let patch = UpdateRequest {
            id: Some(second.id.to_string()),
            ..patch_name("Renamed")
        };
        service.update(first.id.as_str(), &patch).unwrap();

        assert_eq!(service.get_by_id(first.id.as_str()).unwrap().name.as_str(), "Renamed");
        assert_eq!(service.get_by_id(second.id.as_str()).unwrap().name.as_str(), "Second");
    }

    #[test]
    fn update_rejects_dates_that_invert_interval() {
        let service = service();
        let created = service
            .create("Algebra", "2024-01-01", "2024-02-01")
            .unwrap();

        let patch = UpdateRequest {
            end_date: Some("2023-12-31".to_string()),
            ..UpdateRequest::default()
        };
        let err = service.update(created.id.as_str(), &patch).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        let stored = service.get_by_id(created.id.as_str()).unwrap();
        assert_eq!(stored.end_date, created.end_date);
    }

    #[test]
    fn update_rejects_blank_name() {
        let service = service();
        let created = service
            .create("Algebra", "2024-01-01", "2024-02-01")
            .unwrap();

        let err = service
            .update(created.id.as_str(), &patch_name(" "))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn update_unknown_is_not_found() {
        let err = service()
            .update("missing", &patch_name("Nope"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn update_surfaces_failed_re_read() {
        let service = service();
        let created = service
            .create("Algebra", "2024-01-01", "2024-02-01")
            .unwrap();
        service.repository().fail_reads.set(true);

        let err = service
            .update(created.id.as_str(), &patch_name("Algebra II"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Persistence);
        service.repository().fail_reads.set(false);
        let stored = service.get_by_id(created.id.as_str()).unwrap();
        assert_eq!(stored.name.as_str(), "Algebra II");
    }

    #[test]
    fn delete_returns_id_then_not_found() {
        let service = service();
        let created = service
            .create("Algebra", "2024-01-01", "2024-02-01")
            .unwrap();

        let deleted = service.delete(created.id.as_str()).unwrap();
        assert_eq!(deleted, created.id);

        let err = service.delete(created.id.as_str()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = service.get_by_id(created.id.as_str()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn get_all_pages_newest_first() {
        let service = service();
        let names = ["c1", "c2", "c3", "c4", "c5"];
        for name in names {
            service.create(name, "2024-01-01", "2024-02-01").unwrap();
        }

        let (courses, meta) = service.get_all(&Filters::default(), 2, 2).unwrap();

        assert_eq!(meta.total, 5);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.page, 2);
        let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["c3", "c2"]);
    }

    #[test]
    fn get_all_defaults_page_and_limit() {
        let service = service();
        for i in 0..12 {
            service
                .create(&format!("Course {i}"), "2024-01-01", "2024-02-01")
                .unwrap();
        }

        let (courses, meta) = service.get_all(&Filters::default(), 0, 0).unwrap();

        assert_eq!(meta.limit, 10);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(courses.len(), 10);
    }

    #[test]
    fn get_all_applies_filters_and_ignores_pagination_in_count() {
        let service = service();
        service.create("Algebra", "2024-01-01", "2024-02-01").unwrap();
        service.create("Linear Algebra", "2024-03-01", "2024-04-01").unwrap();
        service.create("History", "2024-03-01", "2024-04-01").unwrap();

        let filters = Filters {
            name: Some("Algebra".to_string()),
            start_date: Some("2024-02-15".to_string()),
            limit: Some(1),
            page: Some(5),
            ..Filters::default()
        };
        let (courses, meta) = service.get_all(&filters, 1, 1).unwrap();

        assert_eq!(meta.total, 1);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name.as_str(), "Linear Algebra");
        assert_eq!(service.count(&filters).unwrap(), 1);
    }

    #[test]
    fn get_all_with_no_matches_is_empty_not_error() {
        let service = service();
        service.create("Algebra", "2024-01-01", "2024-02-01").unwrap();

        let filters = Filters {
            name: Some("Chemistry".to_string()),
            ..Filters::default()
        };
        let (courses, meta) = service.get_all(&filters, 1, 5).unwrap();

        assert!(courses.is_empty());
        assert_eq!(meta.total, 0);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn get_all_rejects_malformed_filter_date() {
        let filters = Filters {
            end_date: Some("02/01/2024".to_string()),
            ..Filters::default()
        };
        let err = service().get_all(&filters, 1, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn blank_filters_are_ignored() {
        let filters = Filters {
            name: Some("   ".to_string()),
            start_date: Some(String::new()),
            ..Filters::default()
        };
        assert_eq!(list_query(&filters).unwrap(), CourseListQuery::new());
    }
}
