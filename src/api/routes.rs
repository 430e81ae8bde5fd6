//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, ErrorResponse, HealthResponse, MessageResponse, TeacherRequest, TeacherResponse,
};
use super::pages;
use super::state::AppState;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "School API",
        version = "0.1.0",
        description = "Teacher records and the courses they teach",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::list_teachers,
        handlers::get_teacher,
        handlers::get_teacher_courses,
        handlers::add_teacher,
        handlers::update_teacher,
        handlers::delete_teacher,
    ),
    components(
        schemas(
            HealthResponse,
            TeacherResponse,
            TeacherRequest,
            MessageResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "teachers", description = "Teacher management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the router: JSON API, HTML pages and OpenAPI docs.
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // Non-generic routes
    let static_routes = Router::new()
        .route("/", get(pages::index))
        .route("/health", get(handlers::health))
        .route("/Teacher/New", get(pages::new_form));

    // JSON API (generic over Database)
    let teacher_api = routes!(D => {
        get "/api/teacher/GetAll" => handlers::list_teachers,
        get "/api/teacher/GetById/{id}" => handlers::get_teacher,
        get "/api/teacher/GetCourses/{id}" => handlers::get_teacher_courses,
        post "/api/teacher/Add" => handlers::add_teacher,
        put "/api/teacher/Update/{id}" => handlers::update_teacher,
        delete "/api/teacher/Delete/{id}" => handlers::delete_teacher,
    });

    // Server-rendered pages (generic over Database)
    let teacher_pages = routes!(D => {
        get "/Teacher/List" => pages::list,
        get "/Teacher/Show/{id}" => pages::show,
        post "/Teacher/Add" => pages::add,
        get "/Teacher/DeleteConfirm/{id}" => pages::delete_confirm,
        post "/Teacher/Delete" => pages::delete,
        get "/Teacher/Edit/{id}" => pages::edit,
        post "/Teacher/Update" => pages::update,
    });

    static_routes
        .merge(teacher_api)
        .merge(teacher_pages)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
