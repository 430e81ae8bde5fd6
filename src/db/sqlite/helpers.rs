//! Shared helper functions for SQLite repositories.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::db::{DbError, DbResult, Teacher, TeacherId};

/// Scalar teacher columns, qualified with the `t` alias.
pub const TEACHER_COLUMNS: &str =
    "t.TeacherId, t.TeacherFName, t.TeacherLName, t.EmployeeNumber, t.HireDate, t.Salary";

/// Map a row carrying `TEACHER_COLUMNS` to a teacher with no courses.
///
/// A column that does not decode (e.g. a `HireDate` written by another tool
/// in a different format) is a database error.
pub fn teacher_from_row(row: &SqliteRow) -> DbResult<Teacher> {
    Ok(Teacher {
        id: row.try_get("TeacherId").map_err(database_error)?,
        first_name: row.try_get("TeacherFName").map_err(database_error)?,
        last_name: row.try_get("TeacherLName").map_err(database_error)?,
        employee_number: row.try_get("EmployeeNumber").map_err(database_error)?,
        hire_date: row
            .try_get::<NaiveDate, _>("HireDate")
            .map_err(database_error)?,
        salary: row.try_get("Salary").map_err(database_error)?,
        course_names: vec![],
    })
}

/// Fold teacher rows (optionally joined to `courses`) into one teacher per
/// `TeacherId`, ordered by id.
///
/// The first row seen for an id seeds the scalar fields; every row with a
/// non-null `CourseName` appends that name, keeping row order.
pub fn fold_teacher_rows(rows: &[SqliteRow]) -> DbResult<Vec<Teacher>> {
    let mut teachers: BTreeMap<TeacherId, Teacher> = BTreeMap::new();

    for row in rows {
        let id: TeacherId = row.try_get("TeacherId").map_err(database_error)?;
        let teacher = match teachers.entry(id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(teacher_from_row(row)?),
        };

        if let Some(course) = row
            .try_get::<Option<String>, _>("CourseName")
            .map_err(database_error)?
        {
            teacher.course_names.push(course);
        }
    }

    Ok(teachers.into_values().collect())
}

/// Wrap any SQLx failure as a generic database error.
pub fn database_error(e: sqlx::Error) -> DbError {
    DbError::Database {
        message: e.to_string(),
    }
}

/// Map a failed INSERT/UPDATE on `teachers`.
///
/// The UNIQUE constraint on `EmployeeNumber` is the backstop for two writers
/// passing the existence check at the same time, so it reports the same
/// error as the check itself.
pub fn write_error(e: sqlx::Error, employee_number: &str) -> DbError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DbError::duplicate_employee_number(employee_number)
        }
        _ => database_error(e),
    }
}
