use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::course::{Course, NewCourse, UpdateCourse};
use crate::domain::types::CourseId;
use crate::models::course::{
    Course as DbCourse, NewCourse as DbNewCourse, UpdateCourse as DbUpdateCourse,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CourseListQuery, CourseReader, CourseWriter, DieselRepository};
use crate::schema::courses;

/// Boxed `courses` query with the list predicates applied.
fn filtered_courses(query: &CourseListQuery) -> courses::BoxedQuery<'static, Sqlite> {
    let mut items = courses::table.into_boxed::<Sqlite>();

    if let Some(name) = &query.name {
        let pattern = format!("%{}%", escape_like(name));
        items = items.filter(courses::name.like(pattern).escape('\\'));
    }
    if let Some(start_date) = query.start_date {
        items = items.filter(courses::start_date.ge(start_date));
    }
    if let Some(end_date) = query.end_date {
        items = items.filter(courses::end_date.le(end_date));
    }

    items
}

/// Escapes `LIKE` wildcards so the user's text matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl CourseReader for DieselRepository {
    fn get_course_by_id(&self, id: &CourseId) -> RepositoryResult<Option<Course>> {
        let mut conn = self.conn()?;

        let course = courses::table
            .find(id.as_str())
            .select(DbCourse::as_select())
            .first::<DbCourse>(&mut conn)
            .optional()?;

        Ok(course.map(Course::try_from).transpose()?)
    }

    fn list_courses(
        &self,
        query: &CourseListQuery,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<Vec<Course>> {
        let mut conn = self.conn()?;

        filtered_courses(query)
            .order((courses::created_at.desc(), courses::id.desc()))
            .offset(to_i64(offset))
            .limit(to_i64(limit))
            .select(DbCourse::as_select())
            .load::<DbCourse>(&mut conn)?
            .into_iter()
            .map(|course| Course::try_from(course).map_err(RepositoryError::from))
            .collect()
    }

    fn count_courses(&self, query: &CourseListQuery) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let total = filtered_courses(query)
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(usize::try_from(total).unwrap_or_default())
    }
}

impl CourseWriter for DieselRepository {
    fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course> {
        let mut conn = self.conn()?;

        let id = CourseId::generate();
        let now = Utc::now().naive_utc();
        let insertable = DbNewCourse {
            id: id.as_str(),
            name: new_course.name.as_str(),
            start_date: new_course.start_date,
            end_date: new_course.end_date,
            created_at: now,
            updated_at: now,
        };

        let created = diesel::insert_into(courses::table)
            .values(&insertable)
            .returning(DbCourse::as_returning())
            .get_result::<DbCourse>(&mut conn)?;

        log::info!("Course {id} created");

        Ok(created.try_into()?)
    }

    fn update_course(&self, id: &CourseId, updates: &UpdateCourse) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let changes = DbUpdateCourse::from_domain(updates, Utc::now().naive_utc());
        let affected = diesel::update(courses::table.find(id.as_str()))
            .set(&changes)
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn delete_course(&self, id: &CourseId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(courses::table.find(id.as_str())).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
