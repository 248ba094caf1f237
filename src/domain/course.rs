use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CourseId, CourseName, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub name: CourseName,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Validated payload for inserting a course. Identity and timestamps are
/// assigned by the persistence layer.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCourse {
    pub name: CourseName,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewCourse {
    /// Builds a new course, rejecting a start date that falls after the end date.
    pub fn new(
        name: CourseName,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, TypeConstraintError> {
        ensure_date_order(start_date, end_date)?;
        Ok(Self {
            name,
            start_date,
            end_date,
        })
    }
}

/// Partial update. `None` fields keep their stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateCourse {
    pub name: Option<CourseName>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl UpdateCourse {
    pub fn touches_dates(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Checks the date ordering that would result from applying this patch to
    /// `current`.
    pub fn validate_against(&self, current: &Course) -> Result<(), TypeConstraintError> {
        let start_date = self.start_date.unwrap_or(current.start_date);
        let end_date = self.end_date.unwrap_or(current.end_date);
        ensure_date_order(start_date, end_date)
    }
}

fn ensure_date_order(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), TypeConstraintError> {
    if start_date > end_date {
        return Err(TypeConstraintError::InvalidValue(format!(
            "start_date {start_date} is after end_date {end_date}"
        )));
    }
    Ok(())
}
