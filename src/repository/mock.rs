//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::course::{Course, NewCourse, UpdateCourse};
use crate::domain::types::CourseId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CourseListQuery, CourseReader, CourseWriter};

mock! {
    pub CourseRepository {}

    impl CourseReader for CourseRepository {
        fn get_course_by_id(&self, id: &CourseId) -> RepositoryResult<Option<Course>>;
        fn list_courses(
            &self,
            query: &CourseListQuery,
            offset: usize,
            limit: usize,
        ) -> RepositoryResult<Vec<Course>>;
        fn count_courses(&self, query: &CourseListQuery) -> RepositoryResult<usize>;
    }

    impl CourseWriter for CourseRepository {
        fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course>;
        fn update_course(&self, id: &CourseId, updates: &UpdateCourse) -> RepositoryResult<()>;
        fn delete_course(&self, id: &CourseId) -> RepositoryResult<()>;
    }
}
