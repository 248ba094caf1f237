use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::course::{Course as DomainCourse, UpdateCourse as DomainUpdateCourse};
use crate::domain::types::{CourseId, CourseName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::courses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::course::Course`].
pub struct Course {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::courses)]
/// Insertable form of [`Course`].
pub struct NewCourse<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::courses)]
/// Data used when patching a [`Course`] record. `None` columns are skipped.
pub struct UpdateCourse<'a> {
    pub name: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Course> for DomainCourse {
    type Error = TypeConstraintError;

    fn try_from(course: Course) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CourseId::new(course.id)?,
            name: CourseName::new(course.name)?,
            start_date: course.start_date,
            end_date: course.end_date,
            created_at: course.created_at,
            updated_at: course.updated_at,
        })
    }
}

impl<'a> UpdateCourse<'a> {
    pub fn from_domain(updates: &'a DomainUpdateCourse, updated_at: NaiveDateTime) -> Self {
        Self {
            name: updates.name.as_ref().map(|name| name.as_str()),
            start_date: updates.start_date,
            end_date: updates.end_date,
            updated_at,
        }
    }
}
