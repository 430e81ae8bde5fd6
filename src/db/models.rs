//! Domain models for the school database.
//!
//! These models are storage-agnostic. Field names on the wire follow the
//! column names of the `teachers` table (`teacherFName`, `hireDate`, ...).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{DbError, DbResult};

/// Database-assigned primary key of a teacher row.
pub type TeacherId = i64;

/// A school staff member and the names of the courses they teach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(rename = "teacherId")]
    pub id: TeacherId,
    #[serde(rename = "teacherFName")]
    pub first_name: String,
    #[serde(rename = "teacherLName")]
    pub last_name: String,
    #[serde(rename = "employeeNumber")]
    pub employee_number: String,
    #[serde(rename = "hireDate")]
    pub hire_date: NaiveDate,
    /// Kept as text to match the `Salary` column; always a validated amount.
    pub salary: String,
    /// Only populated by queries that join `courses`.
    #[serde(rename = "courseNames", default)]
    pub course_names: Vec<String>,
}

/// Unvalidated teacher data as submitted by a client (JSON body or form).
///
/// Every field is optional so that a missing value can be reported by name
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherDraft {
    pub id: Option<TeacherId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub employee_number: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<String>,
}

/// Teacher columns that passed validation and are ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherFields {
    pub first_name: String,
    pub last_name: String,
    pub employee_number: String,
    pub hire_date: NaiveDate,
    pub salary: String,
}

impl TeacherFields {
    pub fn into_teacher(self, id: TeacherId) -> Teacher {
        Teacher {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            employee_number: self.employee_number,
            hire_date: self.hire_date,
            salary: self.salary,
            course_names: vec![],
        }
    }
}

impl TeacherDraft {
    /// Check required fields in a fixed order and return the first failure.
    ///
    /// Text fields are trimmed; a field that is only whitespace counts as
    /// missing.
    pub fn validate(&self) -> DbResult<TeacherFields> {
        let first_name = required(&self.first_name).ok_or_else(|| {
            DbError::validation("teacherFName", "Teacher first name is required.")
        })?;
        let last_name = required(&self.last_name).ok_or_else(|| {
            DbError::validation("teacherLName", "Teacher last name is required.")
        })?;
        let hire_date = self
            .hire_date
            .filter(|date| !is_zero_date(*date))
            .ok_or_else(|| DbError::validation("hireDate", "A valid hire date is required."))?;
        let salary = required(&self.salary)
            .ok_or_else(|| DbError::validation("salary", "Salary is required."))?;
        if !is_valid_salary(&salary) {
            return Err(DbError::validation(
                "salary",
                "Salary must be a non-negative amount.",
            ));
        }
        let employee_number = required(&self.employee_number)
            .ok_or_else(|| DbError::validation("employeeNumber", "Employee number is required."))?;

        Ok(TeacherFields {
            first_name,
            last_name,
            employee_number,
            hire_date,
            salary,
        })
    }
}

impl From<&Teacher> for TeacherDraft {
    fn from(t: &Teacher) -> Self {
        Self {
            id: Some(t.id),
            first_name: Some(t.first_name.clone()),
            last_name: Some(t.last_name.clone()),
            employee_number: Some(t.employee_number.clone()),
            hire_date: Some(t.hire_date),
            salary: Some(t.salary.clone()),
        }
    }
}

fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `0001-01-01` is what clients send when no date was picked.
pub fn is_zero_date(date: NaiveDate) -> bool {
    date.year() == 1 && date.ordinal() == 1
}

/// Accepts unsigned decimal amounts with at most two fractional digits,
/// e.g. `50000`, `50000.5`, `50000.00`.
pub fn is_valid_salary(salary: &str) -> bool {
    let (whole, fraction) = match salary.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (salary, None),
    };

    let whole_ok = !whole.is_empty() && whole.chars().all(|c| c.is_ascii_digit());
    let fraction_ok = fraction
        .is_none_or(|f| (1..=2).contains(&f.len()) && f.chars().all(|c| c.is_ascii_digit()));

    whole_ok && fraction_ok
}

/// Filter options for listing teachers.
#[derive(Debug, Clone, Default)]
pub struct TeacherQuery {
    /// Inclusive lower bound on hire date. Ignored unless `end` is also set.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound on hire date. Ignored unless `start` is also set.
    pub end: Option<NaiveDate>,
    /// Join `courses` and fill `course_names`. Off by default, in which case
    /// every listed teacher has an empty course list.
    pub with_courses: bool,
}

impl TeacherQuery {
    /// Hire-date range, only when both bounds are present.
    pub fn hire_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }
}
