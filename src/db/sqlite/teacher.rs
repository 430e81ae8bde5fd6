//! SQLite TeacherRepository implementation.

use sqlx::SqlitePool;
use tracing::{debug, info};

use super::helpers::{TEACHER_COLUMNS, database_error, fold_teacher_rows, write_error};
use crate::db::{
    DbError, DbResult, Teacher, TeacherDraft, TeacherId, TeacherQuery, TeacherRepository,
};

/// SQLx-backed teacher repository.
pub struct SqliteTeacherRepository {
    pub(crate) pool: SqlitePool,
}

impl TeacherRepository for SqliteTeacherRepository {
    async fn list(&self, query: &TeacherQuery) -> DbResult<Vec<Teacher>> {
        let (select, order) = if query.with_courses {
            (
                format!(
                    "SELECT {}, c.CourseName FROM teachers t \
                     LEFT JOIN courses c ON c.TeacherId = t.TeacherId",
                    TEACHER_COLUMNS
                ),
                "ORDER BY t.TeacherId, c.CourseId",
            )
        } else {
            (
                format!(
                    "SELECT {}, NULL AS CourseName FROM teachers t",
                    TEACHER_COLUMNS
                ),
                "ORDER BY t.TeacherId",
            )
        };

        let range = query.hire_range();
        let where_clause = if range.is_some() {
            "WHERE t.HireDate BETWEEN ? AND ?"
        } else {
            ""
        };

        let sql = format!("{} {} {}", select, where_clause, order);

        let mut sql_query = sqlx::query(&sql);
        if let Some((start, end)) = range {
            sql_query = sql_query.bind(start).bind(end);
        }

        let rows = sql_query
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        let teachers = fold_teacher_rows(&rows)?;
        debug!(
            count = teachers.len(),
            with_courses = query.with_courses,
            "Listed teachers"
        );
        Ok(teachers)
    }

    async fn get(&self, id: TeacherId) -> DbResult<Teacher> {
        let sql = format!(
            "SELECT {}, c.CourseName FROM teachers t \
             LEFT JOIN courses c ON c.TeacherId = t.TeacherId \
             WHERE t.TeacherId = ? ORDER BY c.CourseId",
            TEACHER_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        fold_teacher_rows(&rows)?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::teacher_not_found(id))
    }

    async fn courses(&self, id: TeacherId) -> DbResult<Vec<String>> {
        sqlx::query_scalar("SELECT CourseName FROM courses WHERE TeacherId = ? ORDER BY CourseId")
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)
    }

    async fn create(&self, draft: &TeacherDraft) -> DbResult<Teacher> {
        let fields = draft.validate()?;

        let existing: Option<TeacherId> =
            sqlx::query_scalar("SELECT TeacherId FROM teachers WHERE EmployeeNumber = ?")
                .bind(&fields.employee_number)
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

        if existing.is_some() {
            return Err(DbError::duplicate_employee_number(&fields.employee_number));
        }

        let result = sqlx::query(
            "INSERT INTO teachers (TeacherFName, TeacherLName, EmployeeNumber, HireDate, Salary) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.employee_number)
        .bind(fields.hire_date)
        .bind(&fields.salary)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &fields.employee_number))?;

        let id = result.last_insert_rowid();
        info!(teacher_id = id, employee_number = %fields.employee_number, "Teacher created");

        Ok(fields.into_teacher(id))
    }

    async fn update(&self, id: TeacherId, draft: &TeacherDraft) -> DbResult<()> {
        if draft.id != Some(id) {
            return Err(DbError::validation(
                "teacherId",
                "Invalid teacher data or mismatched ID.",
            ));
        }
        let fields = draft.validate()?;

        let result = sqlx::query(
            "UPDATE teachers SET TeacherFName = ?, TeacherLName = ?, EmployeeNumber = ?, \
             HireDate = ?, Salary = ? WHERE TeacherId = ?",
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.employee_number)
        .bind(fields.hire_date)
        .bind(&fields.salary)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &fields.employee_number))?;

        if result.rows_affected() == 0 {
            return Err(DbError::teacher_not_found(id));
        }

        info!(teacher_id = id, "Teacher updated");
        Ok(())
    }

    async fn delete(&self, id: TeacherId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM teachers WHERE TeacherId = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::teacher_not_found(id));
        }

        info!(teacher_id = id, "Teacher deleted");
        Ok(())
    }
}
