//! Teacher management handlers (`/api/teacher/...`).

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::db::{Database, DbError, Teacher, TeacherDraft, TeacherId, TeacherQuery, TeacherRepository};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Teacher response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    /// Database-assigned identifier
    #[serde(rename = "teacherId")]
    #[schema(example = 7)]
    pub teacher_id: TeacherId,
    /// First name
    #[serde(rename = "teacherFName")]
    #[schema(example = "Ana")]
    pub first_name: String,
    /// Last name
    #[serde(rename = "teacherLName")]
    #[schema(example = "Lee")]
    pub last_name: String,
    /// Employee number (unique)
    #[serde(rename = "employeeNumber")]
    #[schema(example = "E100")]
    pub employee_number: String,
    /// Hire date
    #[serde(rename = "hireDate")]
    #[schema(example = "2020-01-10")]
    pub hire_date: NaiveDate,
    /// Salary amount as text
    #[schema(example = "50000")]
    pub salary: String,
    /// Names of the courses taught, in course order
    #[serde(rename = "courseNames")]
    #[schema(example = json!(["Web Application Development"]))]
    pub course_names: Vec<String>,
}

impl From<Teacher> for TeacherResponse {
    fn from(t: Teacher) -> Self {
        Self {
            teacher_id: t.id,
            first_name: t.first_name,
            last_name: t.last_name,
            employee_number: t.employee_number,
            hire_date: t.hire_date,
            salary: t.salary,
            course_names: t.course_names,
        }
    }
}

/// Add/update teacher request DTO
///
/// Every field is optional on the wire so a missing one is reported by name.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TeacherRequest {
    /// Must equal the path id on update; ignored on add
    #[serde(rename = "teacherId", default)]
    #[schema(example = 7)]
    pub teacher_id: Option<TeacherId>,
    #[serde(rename = "teacherFName", default)]
    #[schema(example = "Ana")]
    pub first_name: Option<String>,
    #[serde(rename = "teacherLName", default)]
    #[schema(example = "Lee")]
    pub last_name: Option<String>,
    #[serde(rename = "employeeNumber", default)]
    #[schema(example = "E100")]
    pub employee_number: Option<String>,
    /// `YYYY-MM-DD`; a trailing time component is accepted and dropped.
    /// Anything unparseable is reported as a missing hire date.
    #[serde(
        rename = "hireDate",
        default,
        deserialize_with = "crate::serde_utils::lenient_date"
    )]
    #[schema(value_type = Option<String>, format = Date, example = "2020-01-10")]
    pub hire_date: Option<NaiveDate>,
    /// String or number
    #[serde(default, deserialize_with = "crate::serde_utils::optional_amount")]
    #[schema(value_type = Option<String>, example = "50000")]
    pub salary: Option<String>,
}

impl From<TeacherRequest> for TeacherDraft {
    fn from(req: TeacherRequest) -> Self {
        Self {
            id: req.teacher_id,
            first_name: req.first_name,
            last_name: req.last_name,
            employee_number: req.employee_number,
            hire_date: req.hire_date,
            salary: req.salary,
        }
    }
}

/// Outcome of a write operation
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Teacher added successfully.")]
    pub message: String,
    /// Teacher the operation applied to
    #[serde(rename = "teacherId")]
    #[schema(example = 7)]
    pub teacher_id: TeacherId,
}

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Teacher first name is required.")]
    pub error: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListTeachersQuery {
    /// Inclusive lower hire-date bound (only applied together with `end`)
    #[serde(default, deserialize_with = "crate::serde_utils::optional_date")]
    #[param(value_type = Option<String>, format = Date, example = "2015-01-01")]
    pub start: Option<NaiveDate>,
    /// Inclusive upper hire-date bound (only applied together with `start`)
    #[serde(default, deserialize_with = "crate::serde_utils::optional_date")]
    #[param(value_type = Option<String>, format = Date, example = "2020-12-31")]
    pub end: Option<NaiveDate>,
    /// Also fill `courseNames` (off by default)
    #[param(example = true)]
    pub courses: Option<bool>,
}

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Map a database error to the response every teacher endpoint uses.
///
/// Not-found is 404; everything a client can cause (validation, duplicate
/// employee number) and every storage failure is 400 with the message.
/// Only a schema problem is a server error.
pub fn error_response(e: DbError) -> HandlerError {
    let status = match &e {
        DbError::NotFound { .. } => StatusCode::NOT_FOUND,
        DbError::Migration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DbError::Validation { .. }
        | DbError::AlreadyExists { .. }
        | DbError::Database { .. }
        | DbError::Connection { .. } => StatusCode::BAD_REQUEST,
    };

    if status != StatusCode::NOT_FOUND {
        warn!(status = status.as_u16(), error = %e, "Teacher request failed");
    }

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// Unwrap a JSON body, turning a rejection (malformed JSON, wrong field
/// type, missing content type) into the same 400 error body as validation.
fn request_body(
    payload: Result<Json<TeacherRequest>, JsonRejection>,
) -> Result<TeacherRequest, HandlerError> {
    payload.map(|Json(req)| req).map_err(|rejection| {
        let error = rejection.body_text();
        warn!(status = rejection.status().as_u16(), error = %error, "Rejected teacher request body");
        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// List teachers
///
/// Returns all teachers, or those hired between `start` and `end` inclusive
/// when both are given. Course names are only filled with `courses=true`.
#[utoipa::path(
    get,
    path = "/api/teacher/GetAll",
    tag = "teachers",
    params(ListTeachersQuery),
    responses(
        (status = 200, description = "List of teachers", body = Vec<TeacherResponse>),
        (status = 400, description = "Database error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_teachers<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<ListTeachersQuery>,
) -> Result<Json<Vec<TeacherResponse>>, HandlerError> {
    let db_query = TeacherQuery {
        start: query.start,
        end: query.end,
        with_courses: query.courses.unwrap_or(false),
    };

    let teachers = state
        .db()
        .teachers()
        .list(&db_query)
        .await
        .map_err(error_response)?;

    Ok(Json(
        teachers.into_iter().map(TeacherResponse::from).collect(),
    ))
}

/// Get a teacher by ID
///
/// Returns a single teacher with the names of the courses they teach
#[utoipa::path(
    get,
    path = "/api/teacher/GetById/{id}",
    tag = "teachers",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher found", body = TeacherResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_teacher<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<TeacherId>,
) -> Result<Json<TeacherResponse>, HandlerError> {
    let teacher = state
        .db()
        .teachers()
        .get(id)
        .await
        .map_err(error_response)?;

    Ok(Json(TeacherResponse::from(teacher)))
}

/// List a teacher's courses
///
/// Returns course names; empty when the teacher has none or does not exist
#[utoipa::path(
    get,
    path = "/api/teacher/GetCourses/{id}",
    tag = "teachers",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Course names", body = Vec<String>),
        (status = 400, description = "Database error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_teacher_courses<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<TeacherId>,
) -> Result<Json<Vec<String>>, HandlerError> {
    let courses = state
        .db()
        .teachers()
        .courses(id)
        .await
        .map_err(error_response)?;

    Ok(Json(courses))
}

/// Add a teacher
///
/// Validates required fields and employee-number uniqueness, then inserts
#[utoipa::path(
    post,
    path = "/api/teacher/Add",
    tag = "teachers",
    request_body = TeacherRequest,
    responses(
        (status = 200, description = "Teacher added", body = MessageResponse),
        (status = 400, description = "Missing field, duplicate employee number or database error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn add_teacher<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<TeacherRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, HandlerError> {
    let draft = TeacherDraft::from(request_body(payload)?);

    let teacher = state
        .db()
        .teachers()
        .create(&draft)
        .await
        .map_err(error_response)?;

    Ok(Json(MessageResponse {
        message: "Teacher added successfully.".to_string(),
        teacher_id: teacher.id,
    }))
}

/// Update a teacher
///
/// Overwrites every column; the body's `teacherId` must match the path
#[utoipa::path(
    put,
    path = "/api/teacher/Update/{id}",
    tag = "teachers",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    request_body = TeacherRequest,
    responses(
        (status = 200, description = "Teacher updated", body = MessageResponse),
        (status = 400, description = "Mismatched ID, missing field or database error", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_teacher<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<TeacherId>,
    payload: Result<Json<TeacherRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, HandlerError> {
    let draft = TeacherDraft::from(request_body(payload)?);

    state
        .db()
        .teachers()
        .update(id, &draft)
        .await
        .map_err(error_response)?;

    Ok(Json(MessageResponse {
        message: "Teacher updated successfully.".to_string(),
        teacher_id: id,
    }))
}

/// Delete a teacher
///
/// Deletes a teacher by ID; their courses stay but become unassigned
#[utoipa::path(
    delete,
    path = "/api/teacher/Delete/{id}",
    tag = "teachers",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher deleted", body = MessageResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 400, description = "Database error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_teacher<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<TeacherId>,
) -> Result<Json<MessageResponse>, HandlerError> {
    state
        .db()
        .teachers()
        .delete(id)
        .await
        .map_err(error_response)?;

    Ok(Json(MessageResponse {
        message: "Teacher deleted successfully.".to_string(),
        teacher_id: id,
    }))
}
