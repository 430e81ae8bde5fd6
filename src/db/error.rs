//! Database error types.
//!
//! One taxonomy for every data-access failure. The HTTP layer maps these
//! variants to status codes in a single place.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("{entity_type} not found: id {id}")]
    #[diagnostic(code(school::db::not_found))]
    NotFound { entity_type: String, id: i64 },

    #[error("{message}")]
    #[diagnostic(code(school::db::already_exists))]
    AlreadyExists { message: String },

    #[error("{message}")]
    #[diagnostic(code(school::db::validation_error))]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(school::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(
        code(school::db::migration_error),
        help("Check that the database file is writable and not from a newer release")
    )]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(
        code(school::db::connection_error),
        help("Check the --db path or the SCHOOL_DB_PATH environment variable")
    )]
    Connection { message: String },
}

impl DbError {
    pub(crate) fn teacher_not_found(id: i64) -> Self {
        DbError::NotFound {
            entity_type: "Teacher".to_string(),
            id,
        }
    }

    pub(crate) fn validation(field: &str, message: &str) -> Self {
        DbError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn duplicate_employee_number(employee_number: &str) -> Self {
        DbError::AlreadyExists {
            message: format!(
                "Teacher with employee number {} already exists.",
                employee_number
            ),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
