//! Teacher page handlers (`/Teacher/...`).
//!
//! Same repository calls as the JSON API; the only decision made here is
//! which page to render or where to redirect.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{instrument, warn};

use super::views::{self, FormMode, FormValues};
use crate::api::AppState;
use crate::db::{Database, DbError, TeacherDraft, TeacherId, TeacherQuery, TeacherRepository};
use crate::serde_utils::parse_date;

const LIST_PATH: &str = "/Teacher/List";

/// Submitted new/edit form. Every field arrives as text.
#[derive(Debug, Default, Deserialize)]
pub struct TeacherForm {
    #[serde(rename = "teacherId", default)]
    pub teacher_id: String,
    #[serde(rename = "teacherFName", default)]
    pub first_name: String,
    #[serde(rename = "teacherLName", default)]
    pub last_name: String,
    #[serde(rename = "employeeNumber", default)]
    pub employee_number: String,
    #[serde(rename = "hireDate", default)]
    pub hire_date: String,
    #[serde(default)]
    pub salary: String,
}

impl TeacherForm {
    /// An unparseable date or id becomes `None` and is then reported by
    /// validation like a missing value.
    fn to_draft(&self) -> TeacherDraft {
        TeacherDraft {
            id: self.teacher_id.trim().parse().ok(),
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            employee_number: Some(self.employee_number.clone()),
            hire_date: parse_date(&self.hire_date),
            salary: Some(self.salary.clone()),
        }
    }

    fn values(&self) -> FormValues {
        FormValues {
            teacher_id: self.teacher_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            employee_number: self.employee_number.clone(),
            hire_date: self.hire_date.clone(),
            salary: self.salary.clone(),
        }
    }
}

/// Submitted delete confirmation. The id arrives as text so a garbled value
/// gets an error page like any other failure.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(rename = "teacherId", default)]
    pub teacher_id: String,
}

fn not_found_page() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(views::message_page("Not Found", "Teacher not found.")),
    )
        .into_response()
}

/// Render a failed lookup or delete as a standalone page.
fn failure_page(e: DbError) -> Response {
    match e {
        DbError::NotFound { .. } => not_found_page(),
        other => {
            warn!(error = %other, "Teacher page request failed");
            (
                StatusCode::BAD_REQUEST,
                Html(views::message_page("Error", &other.to_string())),
            )
                .into_response()
        }
    }
}

/// Re-render a rejected form with its message and the values as typed.
fn rejected_form(mode: FormMode, form: &TeacherForm, e: DbError) -> Response {
    match e {
        DbError::NotFound { .. } => not_found_page(),
        other => (
            StatusCode::BAD_REQUEST,
            Html(views::form_page(
                mode,
                &form.values(),
                Some(&other.to_string()),
            )),
        )
            .into_response(),
    }
}

pub async fn index() -> Redirect {
    Redirect::to(LIST_PATH)
}

#[instrument(skip(state))]
pub async fn list<D: Database>(State(state): State<AppState<D>>) -> Response {
    match state.db().teachers().list(&TeacherQuery::default()).await {
        Ok(teachers) => Html(views::list_page(&teachers)).into_response(),
        Err(e) => failure_page(e),
    }
}

#[instrument(skip(state))]
pub async fn show<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<TeacherId>,
) -> Response {
    match state.db().teachers().get(id).await {
        Ok(teacher) => Html(views::show_page(&teacher)).into_response(),
        Err(e) => failure_page(e),
    }
}

pub async fn new_form() -> Html<String> {
    Html(views::form_page(FormMode::New, &FormValues::default(), None))
}

#[instrument(skip(state))]
pub async fn add<D: Database>(
    State(state): State<AppState<D>>,
    Form(form): Form<TeacherForm>,
) -> Response {
    match state.db().teachers().create(&form.to_draft()).await {
        Ok(_) => Redirect::to(LIST_PATH).into_response(),
        Err(e) => rejected_form(FormMode::New, &form, e),
    }
}

#[instrument(skip(state))]
pub async fn delete_confirm<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<TeacherId>,
) -> Response {
    match state.db().teachers().get(id).await {
        Ok(teacher) => Html(views::delete_confirm_page(&teacher)).into_response(),
        Err(e) => failure_page(e),
    }
}

#[instrument(skip(state))]
pub async fn delete<D: Database>(
    State(state): State<AppState<D>>,
    Form(form): Form<DeleteForm>,
) -> Response {
    let Ok(id) = form.teacher_id.trim().parse::<TeacherId>() else {
        return failure_page(DbError::validation(
            "teacherId",
            "Invalid teacher data or mismatched ID.",
        ));
    };

    match state.db().teachers().delete(id).await {
        Ok(()) => Redirect::to(LIST_PATH).into_response(),
        Err(e) => failure_page(e),
    }
}

#[instrument(skip(state))]
pub async fn edit<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<TeacherId>,
) -> Response {
    match state.db().teachers().get(id).await {
        Ok(teacher) => Html(views::form_page(
            FormMode::Edit,
            &FormValues::from(&teacher),
            None,
        ))
        .into_response(),
        Err(e) => failure_page(e),
    }
}

#[instrument(skip(state))]
pub async fn update<D: Database>(
    State(state): State<AppState<D>>,
    Form(form): Form<TeacherForm>,
) -> Response {
    let draft = form.to_draft();
    // A missing or garbled hidden id still goes through update() so the
    // mismatch is reported like any other rejected submission.
    let id = draft.id.unwrap_or_default();

    match state.db().teachers().update(id, &draft).await {
        Ok(()) => Redirect::to(LIST_PATH).into_response(),
        Err(e) => rejected_form(FormMode::Edit, &form, e),
    }
}
